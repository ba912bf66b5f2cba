//! Location capture: map-based delivery point picker plus address form.
//!
//! A capture session asks for location permission, centers the map on the
//! device, lets the user move the delivery pin, and collects the address
//! text. Committing produces an immutable [`LocationCommit`] that the flow
//! hands to the next screen.

pub mod controller;
pub mod draft;
pub mod state;
pub mod view;

pub use controller::LocationCaptureController;
pub use draft::{AddressDraft, AddressField};
pub use state::CapturePhase;
pub use view::{LocationCommit, LocationEvent, LocationView, Marker};
