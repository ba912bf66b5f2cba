//! Read-only projections and events published to the rendering layer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::draft::{AddressDraft, AddressField};
use super::state::CapturePhase;
use crate::geo::{Coordinate, Region};

/// A pin on the map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub coordinate: Coordinate,
    pub title: String,
}

/// Snapshot of the capture session for rendering.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocationView {
    pub phase: CapturePhase,
    /// Region resolved from the device; never changes once set.
    pub origin: Option<Region>,
    /// Region the map should display. `None` means no map layer.
    pub viewport: Option<Region>,
    pub selection: Option<Coordinate>,
    pub draft: AddressDraft,
    pub markers: Vec<Marker>,
}

impl LocationView {
    pub fn has_map(&self) -> bool {
        self.viewport.is_some()
    }
}

/// Events broadcast by the capture controller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LocationEvent {
    /// Device position resolved; the map can be shown.
    Resolved { region: Region },
    /// Permission denied or no fix; the map stays hidden.
    ResolutionFailed { reason: String },
    /// The delivery point moved.
    SelectionChanged { selection: Coordinate },
    /// One address field changed.
    DraftChanged { field: AddressField, value: String },
    /// Fire-and-forget viewport animation. A later one supersedes an earlier one.
    AnimateToRegion { region: Region, duration_ms: u64 },
}

/// Finalized capture state handed to the next flow step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationCommit {
    pub selection: Option<Coordinate>,
    pub address: AddressDraft,
    pub committed_at: DateTime<Utc>,
}
