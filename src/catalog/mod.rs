//! Product catalog consumed by the Home screen.

pub mod client;
pub mod feed;
pub mod model;

pub use client::{Catalog, HttpCatalog};
pub use feed::HomeFeed;
pub use model::{Product, Rating};
