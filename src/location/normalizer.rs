//! Turns any supported input into a [`Coordinate`].
//!
//! Flow:  provider URL → generic lat/lon query parameters → token patterns → error

use super::patterns;
use super::tokens::break_apart;
use super::types::{parse_zoom, AxisOrder, Coordinate, GeoError, MatchMethod, Resolution};
use crate::providers;
use regex::Regex;
use std::sync::LazyLock;

static LAT_PARAM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)[?&#;](?:lat|latitude|mlat)=(-?\d+(?:\.\d+)?)").expect("lat param regex is valid")
});

static LON_PARAM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)[?&#;](?:lon|lng|long|longitude|mlon)=(-?\d+(?:\.\d+)?)")
        .expect("lon param regex is valid")
});

static ZOOM_PARAM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)[?&#;](?:z|zoom|lvl)=(\d+(?:\.\d+)?)").expect("zoom param regex is valid")
});

/// Converts location text into a coordinate.
#[derive(Debug, Clone, Copy, Default)]
pub struct Normalizer {
    order: AxisOrder,
}

impl Normalizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read bare decimal pairs in the given order.
    pub fn with_axis_order(order: AxisOrder) -> Self {
        Self { order }
    }

    pub fn axis_order(&self) -> AxisOrder {
        self.order
    }

    pub fn normalize(&self, input: &str) -> Result<Resolution, GeoError> {
        let text = input.trim();
        if text.is_empty() {
            return Err(GeoError::Empty);
        }

        // 1. A map provider we know the URL scheme of
        if let Some((provider, coordinate)) = providers::recognize(text) {
            log::info!("{} URL: {}", provider.name, coordinate);
            return Ok(resolution(text, coordinate, MatchMethod::Provider(provider.name), 0));
        }

        // 2. Anything else carrying lat= / lon= parameters
        if let Some(coordinate) = query_params(text) {
            log::info!("query parameters: {}", coordinate);
            return Ok(resolution(text, coordinate, MatchMethod::QueryParams, 0));
        }

        // 3. Free-form numbers and hemisphere letters
        let tokens = break_apart(text);
        log::debug!("tokens: {:?}", tokens);
        let candidates = patterns::candidates(&tokens, self.order);
        match patterns::best(&candidates) {
            Some(best) => {
                log::info!(
                    "{} at token {}: {} (confidence {})",
                    best.method,
                    best.offset,
                    best.coordinate,
                    best.confidence
                );
                Ok(resolution(text, best.coordinate, best.method, best.confidence))
            }
            None => Err(GeoError::Unrecognized(text.to_string())),
        }
    }
}

fn resolution(input: &str, coordinate: Coordinate, method: MatchMethod, confidence: u32) -> Resolution {
    Resolution {
        input: input.to_string(),
        coordinate,
        method,
        confidence,
    }
}

fn query_params(text: &str) -> Option<Coordinate> {
    let capture = |re: &Regex| -> Option<f64> { re.captures(text)?.get(1)?.as_str().parse().ok() };
    let lat = capture(&LAT_PARAM)?;
    let lon = capture(&LON_PARAM)?;
    let zoom = ZOOM_PARAM
        .captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|z| parse_zoom(z.as_str()));
    match Coordinate::new(lat, lon) {
        Ok(c) => Some(c.with_zoom(zoom)),
        Err(e) => {
            log::debug!("query parameters rejected: {}", e);
            None
        }
    }
}
