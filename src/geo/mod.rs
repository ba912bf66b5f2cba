//! Geolocation: coordinate/viewport model and the device position provider.

pub mod provider;
pub mod region;

pub use provider::{DeniedPermission, FixedPosition, GeolocationProvider, Permission, UnavailablePosition};
pub use region::{Coordinate, Region};
