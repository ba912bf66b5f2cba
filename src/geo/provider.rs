//! Device geolocation capability.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::region::Coordinate;
use crate::error::LocationError;

/// Outcome of a foreground location permission request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    Granted,
    Denied,
}

/// Source of the device's current position.
///
/// Both calls are suspend points; the capture controller awaits them one at
/// a time and never issues overlapping requests.
#[async_trait]
pub trait GeolocationProvider: Send + Sync {
    /// Ask the user for foreground location access.
    async fn request_permission(&self) -> Permission;

    /// Current device position. Fails with `PositionUnavailable` when no
    /// fix can be produced.
    async fn current_position(&self) -> Result<Coordinate, LocationError>;
}

/// Always grants and reports the same coordinate.
pub struct FixedPosition {
    position: Coordinate,
}

impl FixedPosition {
    pub fn new(position: Coordinate) -> Self {
        Self { position }
    }
}

#[async_trait]
impl GeolocationProvider for FixedPosition {
    async fn request_permission(&self) -> Permission {
        Permission::Granted
    }

    async fn current_position(&self) -> Result<Coordinate, LocationError> {
        Ok(self.position)
    }
}

/// Refuses location access.
pub struct DeniedPermission;

#[async_trait]
impl GeolocationProvider for DeniedPermission {
    async fn request_permission(&self) -> Permission {
        Permission::Denied
    }

    async fn current_position(&self) -> Result<Coordinate, LocationError> {
        Err(LocationError::PermissionDenied)
    }
}

/// Grants access but never produces a fix.
pub struct UnavailablePosition;

#[async_trait]
impl GeolocationProvider for UnavailablePosition {
    async fn request_permission(&self) -> Permission {
        Permission::Granted
    }

    async fn current_position(&self) -> Result<Coordinate, LocationError> {
        Err(LocationError::PositionUnavailable {
            reason: "no location fix".to_string(),
        })
    }
}
