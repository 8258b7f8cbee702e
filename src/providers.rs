//! Map providers: output URL templates and the recognizers for their URLs.
//!
//! Templates use `{lat}`, `{lon}` and `{z}` placeholders. Recognizers are
//! case-insensitive regexes with named groups `lat`, `lon` and an optional
//! `zoom`; `NUM` stands for a signed decimal number.

use crate::location::types::{format_degrees, parse_zoom};
use crate::location::{Coordinate, GeoError, Resolution};
use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

const NUM: &str = r"-?\d+(?:\.\d+)?";

/// A third-party map service.
#[derive(Debug)]
pub struct Provider {
    pub name: &'static str,
    pub label: &'static str,
    /// `None` for services whose URLs carry no zoom.
    pub default_zoom: Option<u8>,
    template: &'static str,
    recognizers: &'static [&'static str],
}

const PROVIDERS: &[Provider] = &[
    Provider {
        name: "google",
        label: "Google Maps",
        default_zoom: Some(16),
        template: "https://www.google.com/maps/@{lat},{lon},{z}z",
        recognizers: &[
            r"google\.[a-z.]+/maps/[^@\s]*@(?P<lat>NUM),(?P<lon>NUM)(?:,(?P<zoom>\d+(?:\.\d+)?)z)?",
            r"google\.[a-z.]+/maps[^\s]*[?&](?:q|ll)=(?P<lat>NUM),(?P<lon>NUM)",
            r"maps\.google\.[a-z.]+/[^\s]*[?&](?:q|ll)=(?P<lat>NUM),(?P<lon>NUM)",
        ],
    },
    Provider {
        name: "openstreetmap",
        label: "OpenStreetMap",
        default_zoom: Some(14),
        template: "https://www.openstreetmap.org/#map={z}/{lat}/{lon}",
        recognizers: &[
            r"openstreetmap\.org/[^\s]*#map=(?P<zoom>\d+)/(?P<lat>NUM)/(?P<lon>NUM)",
            r"openstreetmap\.org/[^\s]*[?&]mlat=(?P<lat>NUM)&mlon=(?P<lon>NUM)",
        ],
    },
    Provider {
        name: "bing",
        label: "Bing Maps",
        default_zoom: Some(16),
        template: "https://www.bing.com/maps?cp={lat}~{lon}&lvl={z}",
        recognizers: &[
            r"bing\.com/maps[^\s]*[?&#]cp=(?P<lat>NUM)(?:~|%7e)(?P<lon>NUM)(?:&lvl=(?P<zoom>\d+(?:\.\d+)?))?",
        ],
    },
    Provider {
        name: "apple",
        label: "Apple Maps",
        default_zoom: Some(16),
        template: "https://maps.apple.com/?ll={lat},{lon}&z={z}",
        recognizers: &[
            r"maps\.apple\.com/[^\s]*[?&]ll=(?P<lat>NUM),(?P<lon>NUM)(?:&z=(?P<zoom>\d+(?:\.\d+)?))?",
        ],
    },
    Provider {
        name: "here",
        label: "HERE WeGo",
        default_zoom: Some(15),
        template: "https://wego.here.com/?map={lat},{lon},{z},normal",
        recognizers: &[
            r"here\.com/[^\s]*[?&]map=(?P<lat>NUM),(?P<lon>NUM),(?P<zoom>\d+(?:\.\d+)?)",
            r"here\.com/(?P<lat>NUM),(?P<lon>NUM),(?P<zoom>\d+)",
        ],
    },
    Provider {
        name: "wikimapia",
        label: "Wikimapia",
        default_zoom: Some(12),
        template: "http://wikimapia.org/#lang=en&lat={lat}&lon={lon}&z={z}&m=b",
        recognizers: &[
            r"wikimapia\.org/[^\s]*[#?&]lat=(?P<lat>NUM)&lon=(?P<lon>NUM)(?:&z=(?P<zoom>\d+))?",
        ],
    },
    Provider {
        name: "hikebikemap",
        label: "Hike & Bike Map",
        default_zoom: Some(12),
        template: "http://hikebikemap.org/?zoom={z}&lat={lat}&lon={lon}&layers=B0000FFFFF",
        recognizers: &[
            r"hikebikemap\.(?:org|de)/[^\s]*[?&]zoom=(?P<zoom>\d+)&lat=(?P<lat>NUM)&lon=(?P<lon>NUM)",
        ],
    },
    // Strava puts longitude first.
    Provider {
        name: "strava",
        label: "Strava Heatmap",
        default_zoom: Some(13),
        template: "https://www.strava.com/heatmap#{z}/{lon}/{lat}/hot/all",
        recognizers: &[
            r"strava\.com/heatmap/?#(?P<zoom>\d+(?:\.\d+)?)/(?P<lon>NUM)/(?P<lat>NUM)",
        ],
    },
    Provider {
        name: "geohack",
        label: "GeoHack",
        default_zoom: None,
        template: "https://geohack.toolforge.org/geohack.php?params={lat};{lon}",
        recognizers: &[r"geohack[^\s]*[?&]params=(?P<lat>NUM);(?P<lon>NUM)"],
    },
    Provider {
        name: "geo",
        label: "geo: URI",
        default_zoom: Some(16),
        template: "geo:{lat},{lon}?z={z}",
        recognizers: &[r"^geo:(?P<lat>NUM),(?P<lon>NUM)(?:,NUM)?(?:;[^?\s]*)?(?:\?z=(?P<zoom>\d+))?"],
    },
];

static RECOGNIZERS: LazyLock<Vec<(&'static Provider, Regex)>> = LazyLock::new(|| {
    PROVIDERS
        .iter()
        .flat_map(|p| p.recognizers.iter().map(move |r| (p, r)))
        .map(|(p, r)| {
            let pattern = format!("(?i){}", r.replace("NUM", NUM));
            let re = Regex::new(&pattern).expect("provider recognizer is a valid regex");
            (p, re)
        })
        .collect()
});

/// One rendered link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedUrl {
    pub provider: &'static str,
    pub label: &'static str,
    pub url: String,
}

/// A normalized input together with its rendered links.
#[derive(Debug, Clone, Serialize)]
pub struct Conversion {
    pub input: String,
    pub coordinate: Coordinate,
    pub canonical: String,
    pub dms: String,
    pub method: String,
    pub confidence: u32,
    pub urls: Vec<RenderedUrl>,
}

impl Conversion {
    /// Render `resolution` for the named providers (all of them if `names` is empty).
    pub fn new(resolution: &Resolution, names: &[String]) -> Result<Self, GeoError> {
        let c = &resolution.coordinate;
        Ok(Self {
            input: resolution.input.clone(),
            coordinate: *c,
            canonical: c.to_string(),
            dms: c.to_dms(),
            method: resolution.method.to_string(),
            confidence: resolution.confidence,
            urls: render_selected(c, names)?,
        })
    }
}

impl Provider {
    /// The zoom this provider renders for `c`.
    pub fn zoom_for(&self, c: &Coordinate) -> Option<u8> {
        self.default_zoom.map(|default| c.zoom.unwrap_or(default))
    }

    pub fn render(&self, c: &Coordinate) -> String {
        let zoom = self.zoom_for(c).map(|z| z.to_string()).unwrap_or_default();
        self.template
            .replace("{lat}", &format_degrees(c.lat))
            .replace("{lon}", &format_degrees(c.lon))
            .replace("{z}", &zoom)
    }

    fn rendered(&self, c: &Coordinate) -> RenderedUrl {
        RenderedUrl {
            provider: self.name,
            label: self.label,
            url: self.render(c),
        }
    }
}

/// Every supported provider, in output order.
pub fn all() -> &'static [Provider] {
    PROVIDERS
}

/// Look up a provider by name, ignoring case.
pub fn find(name: &str) -> Result<&'static Provider, GeoError> {
    PROVIDERS
        .iter()
        .find(|p| p.name.eq_ignore_ascii_case(name.trim()))
        .ok_or_else(|| GeoError::UnknownProvider(name.to_string()))
}

pub fn render_all(c: &Coordinate) -> Vec<RenderedUrl> {
    PROVIDERS.iter().map(|p| p.rendered(c)).collect()
}

/// Render only the named providers, in the order given. No names means all.
pub fn render_selected(c: &Coordinate, names: &[String]) -> Result<Vec<RenderedUrl>, GeoError> {
    if names.is_empty() {
        return Ok(render_all(c));
    }
    names
        .iter()
        .map(|name| find(name).map(|p| p.rendered(c)))
        .collect()
}

/// Try every provider's URL recognizers against `input`.
pub fn recognize(input: &str) -> Option<(&'static Provider, Coordinate)> {
    for (provider, re) in RECOGNIZERS.iter() {
        let Some(caps) = re.captures(input) else {
            continue;
        };
        let (Some(lat), Some(lon)) = (caps.name("lat"), caps.name("lon")) else {
            continue;
        };
        let (Ok(lat), Ok(lon)) = (lat.as_str().parse::<f64>(), lon.as_str().parse::<f64>()) else {
            continue;
        };
        let coordinate = match Coordinate::new(lat, lon) {
            Ok(c) => c,
            Err(e) => {
                log::debug!("{} URL rejected: {}", provider.name, e);
                continue;
            }
        };
        let zoom = caps
            .name("zoom")
            .and_then(|z| parse_zoom(z.as_str()))
            .filter(|_| provider.default_zoom.is_some());
        return Some((*provider, coordinate.with_zoom(zoom)));
    }
    None
}
