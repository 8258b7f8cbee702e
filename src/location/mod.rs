//! Location parsing subsystem.
//!
//! Recognizes map-provider URLs, generic lat/lon query parameters, and
//! hand-written coordinates in decimal or degrees-minutes-seconds notation.

pub mod normalizer;
pub mod patterns;
pub mod tokens;
pub mod types;

pub use normalizer::Normalizer;
pub use types::{AxisOrder, Coordinate, GeoError, Hemisphere, MatchMethod, Resolution};
