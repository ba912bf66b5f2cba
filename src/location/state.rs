//! Capture phase state machine: tracks whether the device position is known.

use serde::{Deserialize, Serialize};

/// Phases of a location capture session.
///
/// `Unresolved → Resolving → Resolved`, with `Resolving → Unresolved` when
/// permission is denied or no fix is available. Map taps while `Resolved`
/// do not change the phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CapturePhase {
    #[default]
    Unresolved,
    Resolving,
    Resolved,
}

impl CapturePhase {
    /// Check if a transition from `self` to `target` is valid.
    pub fn can_transition_to(&self, target: CapturePhase) -> bool {
        use CapturePhase::*;
        matches!(
            (self, target),
            (Unresolved, Resolving) | (Resolving, Resolved) | (Resolving, Unresolved)
        )
    }
}

impl std::fmt::Display for CapturePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Unresolved => "unresolved",
            Self::Resolving => "resolving",
            Self::Resolved => "resolved",
        };
        write!(f, "{s}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_transitions() {
        use CapturePhase::*;
        assert!(Unresolved.can_transition_to(Resolving));
        assert!(Resolving.can_transition_to(Resolved));
        assert!(Resolving.can_transition_to(Unresolved));
    }

    #[test]
    fn invalid_transitions() {
        use CapturePhase::*;
        assert!(!Unresolved.can_transition_to(Resolved));
        assert!(!Resolved.can_transition_to(Resolving));
        assert!(!Resolved.can_transition_to(Unresolved));
        // A second start while resolving
        assert!(!Resolving.can_transition_to(Resolving));
    }

    #[test]
    fn display_matches_serde() {
        use CapturePhase::*;
        for phase in [Unresolved, Resolving, Resolved] {
            let json = serde_json::to_string(&phase).unwrap();
            assert_eq!(format!("\"{phase}\""), json);
        }
    }
}
