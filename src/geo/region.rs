//! Coordinates and map viewports.

use serde::{Deserialize, Serialize};

use crate::error::LocationError;

/// A point on the map. Also the value of a point selection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.5}, {:.5})", self.latitude, self.longitude)
    }
}

/// A map viewport: a center coordinate plus zoom extents in degrees.
///
/// Deltas are always finite and strictly positive; use [`Region::new`] or
/// [`Region::around`] to build one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Region {
    pub latitude: f64,
    pub longitude: f64,
    pub latitude_delta: f64,
    pub longitude_delta: f64,
}

impl Region {
    pub fn new(
        center: Coordinate,
        latitude_delta: f64,
        longitude_delta: f64,
    ) -> Result<Self, LocationError> {
        for (name, delta) in [
            ("latitude_delta", latitude_delta),
            ("longitude_delta", longitude_delta),
        ] {
            if !delta.is_finite() || delta <= 0.0 {
                return Err(LocationError::InvalidRegion {
                    reason: format!("{name} must be positive, got {delta}"),
                });
            }
        }
        Ok(Self {
            latitude: center.latitude,
            longitude: center.longitude,
            latitude_delta,
            longitude_delta,
        })
    }

    /// Square viewport centered on `center`.
    pub fn around(center: Coordinate, delta: f64) -> Result<Self, LocationError> {
        Self::new(center, delta, delta)
    }

    pub fn center(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }

    /// Same zoom, new center.
    pub fn moved_to(&self, center: Coordinate) -> Self {
        Self {
            latitude: center.latitude,
            longitude: center.longitude,
            ..*self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn around_uses_same_delta_for_both_axes() {
        let region = Region::around(Coordinate::new(12.90, 77.60), 0.01).unwrap();
        assert_eq!(region.latitude_delta, 0.01);
        assert_eq!(region.longitude_delta, 0.01);
        assert_eq!(region.center(), Coordinate::new(12.90, 77.60));
    }

    #[test]
    fn degenerate_deltas_rejected() {
        let c = Coordinate::new(0.0, 0.0);
        assert!(matches!(
            Region::new(c, 0.0, 0.01),
            Err(LocationError::InvalidRegion { .. })
        ));
        assert!(Region::new(c, 0.01, -1.0).is_err());
        assert!(Region::new(c, f64::INFINITY, 0.01).is_err());
    }

    #[test]
    fn moved_to_keeps_zoom() {
        let region = Region::new(Coordinate::new(12.90, 77.60), 0.02, 0.03).unwrap();
        let moved = region.moved_to(Coordinate::new(13.0, 78.0));
        assert_eq!(moved.center(), Coordinate::new(13.0, 78.0));
        assert_eq!(moved.latitude_delta, 0.02);
        assert_eq!(moved.longitude_delta, 0.03);
    }

    #[test]
    fn region_serializes_with_map_field_names() {
        let region = Region::around(Coordinate::new(1.0, 2.0), 0.5).unwrap();
        let json = serde_json::to_value(region).unwrap();
        assert_eq!(json["latitudeDelta"], 0.5);
        assert_eq!(json["longitude"], 2.0);
    }
}
