//! Core types for the location subsystem.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Highest zoom level any supported provider renders.
pub const MAX_ZOOM: u8 = 22;

/// A validated latitude/longitude pair, optionally carrying a zoom level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zoom: Option<u8>,
}

impl Coordinate {
    /// Build a coordinate, rejecting values outside [-90, 90] / [-180, 180].
    pub fn new(lat: f64, lon: f64) -> Result<Self, GeoError> {
        if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
            return Err(GeoError::OutOfRange { axis: "latitude", value: lat });
        }
        if !lon.is_finite() || !(-180.0..=180.0).contains(&lon) {
            return Err(GeoError::OutOfRange { axis: "longitude", value: lon });
        }
        Ok(Self { lat, lon, zoom: None })
    }

    /// Attach a zoom level. Values above [`MAX_ZOOM`] are dropped.
    pub fn with_zoom(self, zoom: Option<u8>) -> Self {
        Self {
            zoom: zoom.filter(|z| *z <= MAX_ZOOM),
            ..self
        }
    }

    /// Same position within `tolerance` degrees on both axes. Zoom is ignored.
    pub fn approx_eq(&self, other: &Coordinate, tolerance: f64) -> bool {
        (self.lat - other.lat).abs() <= tolerance && (self.lon - other.lon).abs() <= tolerance
    }

    /// Degrees-minutes-seconds rendering, e.g. `30°34′15.0″N 104°3′38.0″E`.
    pub fn to_dms(&self) -> String {
        format!(
            "{} {}",
            dms_component(self.lat, Hemisphere::North, Hemisphere::South),
            dms_component(self.lon, Hemisphere::East, Hemisphere::West),
        )
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", format_degrees(self.lat), format_degrees(self.lon))
    }
}

/// Parse a zoom literal such as `10` or `10.5`, rounding to a whole level.
pub fn parse_zoom(text: &str) -> Option<u8> {
    let z: f64 = text.parse().ok()?;
    let z = z.round();
    (0.0..=f64::from(MAX_ZOOM)).contains(&z).then_some(z as u8)
}

/// Render a degree value with at most 7 fractional digits and no trailing zeros.
pub fn format_degrees(value: f64) -> String {
    let mut s = format!("{:.7}", value);
    if s.contains('.') {
        let trimmed = s.trim_end_matches('0').trim_end_matches('.').len();
        s.truncate(trimmed);
    }
    if s == "-0" {
        s = "0".to_string();
    }
    s
}

fn dms_component(value: f64, positive: Hemisphere, negative: Hemisphere) -> String {
    let hemisphere = if value < 0.0 { negative } else { positive };
    // Work in tenths of an arc-second so rounding can carry into minutes.
    let tenths = (value.abs() * 36_000.0).round() as u64;
    let degrees = tenths / 36_000;
    let minutes = (tenths % 36_000) / 600;
    let rest = tenths % 600;
    format!(
        "{}°{}′{}.{}″{}",
        degrees,
        minutes,
        rest / 10,
        rest % 10,
        hemisphere.letter()
    )
}

/// A compass direction attached to a degree value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hemisphere {
    North,
    South,
    East,
    West,
}

impl Hemisphere {
    /// Accepts `n`, `north`, `S`, `South`, ... in any case.
    pub fn from_word(word: &str) -> Option<Self> {
        match word.to_ascii_lowercase().as_str() {
            "n" | "north" => Some(Self::North),
            "s" | "south" => Some(Self::South),
            "e" | "east" => Some(Self::East),
            "w" | "west" => Some(Self::West),
            _ => None,
        }
    }

    pub fn letter(self) -> char {
        match self {
            Self::North => 'N',
            Self::South => 'S',
            Self::East => 'E',
            Self::West => 'W',
        }
    }

    pub fn is_negative(self) -> bool {
        matches!(self, Self::South | Self::West)
    }
}

/// Which value comes first in a bare pair of decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisOrder {
    #[default]
    LatLon,
    LonLat,
}

/// How an input was recognized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMethod {
    /// A known map provider's URL scheme.
    Provider(&'static str),
    /// Generic `lat=`/`lon=` query parameters.
    QueryParams,
    /// Degrees with minutes and seconds plus hemisphere letters.
    Compass,
    /// Decimal degrees.
    Degrees,
}

impl fmt::Display for MatchMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Provider(name) => write!(f, "{} URL", name),
            Self::QueryParams => write!(f, "query parameters"),
            Self::Compass => write!(f, "compass notation"),
            Self::Degrees => write!(f, "decimal degrees"),
        }
    }
}

/// The outcome of normalizing one input string.
#[derive(Debug, Clone, Serialize)]
pub struct Resolution {
    pub input: String,
    pub coordinate: Coordinate,
    pub method: MatchMethod,
    /// Ranking score of the winning match. URL recognizers always report 0.
    pub confidence: u32,
}

/// Location conversion errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeoError {
    #[error("No location given")]
    Empty,
    #[error("Unrecognized location: '{0}'")]
    Unrecognized(String),
    #[error("{axis} {value} is out of range")]
    OutOfRange { axis: &'static str, value: f64 },
    #[error("Unknown map provider '{0}'")]
    UnknownProvider(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinate_range() {
        assert!(Coordinate::new(90.0, 180.0).is_ok());
        assert!(Coordinate::new(-90.0, -180.0).is_ok());
        assert_eq!(
            Coordinate::new(90.5, 0.0),
            Err(GeoError::OutOfRange { axis: "latitude", value: 90.5 })
        );
        assert!(Coordinate::new(0.0, 180.1).is_err());
        assert!(Coordinate::new(f64::NAN, 0.0).is_err());
    }

    #[test]
    fn test_zoom_limit() {
        let c = Coordinate::new(1.0, 2.0).unwrap();
        assert_eq!(c.with_zoom(Some(12)).zoom, Some(12));
        assert_eq!(c.with_zoom(Some(30)).zoom, None);
    }

    #[test]
    fn test_parse_zoom() {
        assert_eq!(parse_zoom("10"), Some(10));
        assert_eq!(parse_zoom("10.6"), Some(11));
        assert_eq!(parse_zoom("23"), None);
        assert_eq!(parse_zoom("x"), None);
    }

    #[test]
    fn test_format_degrees() {
        assert_eq!(format_degrees(27.175015), "27.175015");
        assert_eq!(format_degrees(37.4914), "37.4914");
        assert_eq!(format_degrees(10.0), "10");
        assert_eq!(format_degrees(-0.00000001), "0");
        assert_eq!(format_degrees(30.570833333333), "30.5708333");
    }

    #[test]
    fn test_display_canonical() {
        let c = Coordinate::new(-33.8688, 151.2093).unwrap();
        assert_eq!(c.to_string(), "-33.8688,151.2093");
    }

    #[test]
    fn test_dms() {
        let c = Coordinate::new(30.570833333, 104.060555556).unwrap();
        assert_eq!(c.to_dms(), "30°34′15.0″N 104°3′38.0″E");

        let c = Coordinate::new(-37.618889, -122.375).unwrap();
        assert_eq!(c.to_dms(), "37°37′8.0″S 122°22′30.0″W");
    }

    #[test]
    fn test_hemisphere_words() {
        assert_eq!(Hemisphere::from_word("N"), Some(Hemisphere::North));
        assert_eq!(Hemisphere::from_word("West"), Some(Hemisphere::West));
        assert_eq!(Hemisphere::from_word("deg"), None);
        assert!(Hemisphere::South.is_negative());
        assert!(!Hemisphere::East.is_negative());
    }
}
