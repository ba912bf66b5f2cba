//! Configuration types.

use std::time::Duration;

use crate::error::ConfigError;
use crate::geo::Coordinate;

/// Default map zoom applied to a freshly resolved region, in degrees.
pub const DEFAULT_ZOOM_DELTA: f64 = 0.01;

/// Default duration of the recenter animation.
pub const DEFAULT_RECENTER_MS: u64 = 1000;

/// Device position reported by the CLI driver's fixed provider.
pub const DEFAULT_DEVICE_POSITION: (f64, f64) = (12.90, 77.60);

/// Flow configuration shared by the controllers.
#[derive(Debug, Clone)]
pub struct FlowConfig {
    /// Latitude/longitude delta used when building the origin region.
    pub zoom_delta: f64,
    /// How long the view takes to animate back to the origin on recenter.
    pub recenter_animation: Duration,
    /// Base URL of the product catalog (`<base>/products`).
    pub catalog_base_url: String,
    /// Capacity of each location controller's event channel.
    pub event_capacity: usize,
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            zoom_delta: DEFAULT_ZOOM_DELTA,
            recenter_animation: Duration::from_millis(DEFAULT_RECENTER_MS),
            catalog_base_url: "https://fakestoreapi.com".to_string(),
            event_capacity: 64,
        }
    }
}

impl FlowConfig {
    /// Build from `FLITZY_*` environment variables, falling back to defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Ok(raw) = std::env::var("FLITZY_ZOOM_DELTA") {
            config.zoom_delta = parse_zoom_delta(&raw)?;
        }

        if let Ok(raw) = std::env::var("FLITZY_RECENTER_MS") {
            let ms: u64 = raw.trim().parse().map_err(|e| ConfigError::InvalidValue {
                key: "FLITZY_RECENTER_MS".to_string(),
                message: format!("{e}"),
            })?;
            config.recenter_animation = Duration::from_millis(ms);
        }

        if let Ok(url) = std::env::var("FLITZY_CATALOG_URL") {
            let url = url.trim().trim_end_matches('/').to_string();
            if url.is_empty() {
                return Err(ConfigError::InvalidValue {
                    key: "FLITZY_CATALOG_URL".to_string(),
                    message: "must not be empty".to_string(),
                });
            }
            config.catalog_base_url = url;
        }

        Ok(config)
    }
}

/// Fixed device position for the CLI driver, from `FLITZY_DEVICE_LAT` and
/// `FLITZY_DEVICE_LNG`. Unset variables keep the default.
pub fn device_position_from_env() -> Result<Coordinate, ConfigError> {
    let (mut latitude, mut longitude) = DEFAULT_DEVICE_POSITION;
    if let Ok(raw) = std::env::var("FLITZY_DEVICE_LAT") {
        latitude = parse_degrees("FLITZY_DEVICE_LAT", &raw, 90.0)?;
    }
    if let Ok(raw) = std::env::var("FLITZY_DEVICE_LNG") {
        longitude = parse_degrees("FLITZY_DEVICE_LNG", &raw, 180.0)?;
    }
    Ok(Coordinate::new(latitude, longitude))
}

fn parse_degrees(key: &str, raw: &str, limit: f64) -> Result<f64, ConfigError> {
    let invalid = |message: String| ConfigError::InvalidValue {
        key: key.to_string(),
        message,
    };
    let degrees: f64 = raw.trim().parse().map_err(|e| invalid(format!("{e}")))?;
    if !degrees.is_finite() || degrees.abs() > limit {
        return Err(invalid(format!("{degrees} is outside ±{limit}")));
    }
    Ok(degrees)
}

fn parse_zoom_delta(raw: &str) -> Result<f64, ConfigError> {
    let invalid = |message: String| ConfigError::InvalidValue {
        key: "FLITZY_ZOOM_DELTA".to_string(),
        message,
    };
    let delta: f64 = raw.trim().parse().map_err(|e| invalid(format!("{e}")))?;
    if !delta.is_finite() || delta <= 0.0 {
        return Err(invalid(format!("{delta} is not a positive delta")));
    }
    Ok(delta)
}
