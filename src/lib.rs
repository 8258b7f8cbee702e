//! Translate a geolocation into links for other map services.
//!
//! Input is normalized into a [`location::Coordinate`] and then rendered
//! through every entry of the [`providers`] table.

pub mod location;
pub mod providers;
pub mod server;

pub use location::{Coordinate, GeoError, Normalizer};
