//! Token patterns for coordinates written out by hand.
//!
//! Each pattern is a list of slots. A slot either accepts the token at its
//! position (storing it) or fails the whole pattern. Patterns are tried at
//! every offset of the token list and the surviving candidates are ranked by
//! confidence.

use super::tokens::{Number, Token};
use super::types::{AxisOrder, Coordinate, Hemisphere, MatchMethod};

/// Confidence of any degrees/minutes/seconds match. Those patterns are strict.
pub const COMPASS_CONFIDENCE: u32 = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    NorthSouth,
    EastWest,
    LatDeg,
    LatMin,
    LatSec,
    LatMinDec,
    LonDeg,
    LonMin,
    LonSec,
    LonMinDec,
    LatDec,
    LonDec,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    Compass,
    Degrees,
}

struct Pattern {
    kind: Kind,
    /// Restricts the pattern to one axis order.
    order: Option<AxisOrder>,
    slots: &'static [Slot],
}

use Slot::*;

const PATTERNS: &[Pattern] = &[
    Pattern {
        kind: Kind::Compass,
        order: None,
        slots: &[NorthSouth, LatDeg, LatMin, LatSec, EastWest, LonDeg, LonMin, LonSec],
    },
    Pattern {
        kind: Kind::Compass,
        order: None,
        slots: &[LatDeg, LatMin, LatSec, NorthSouth, LonDeg, LonMin, LonSec, EastWest],
    },
    Pattern {
        kind: Kind::Compass,
        order: None,
        slots: &[NorthSouth, LatDeg, LatMinDec, EastWest, LonDeg, LonMinDec],
    },
    Pattern {
        kind: Kind::Compass,
        order: None,
        slots: &[LatDeg, LatMinDec, NorthSouth, LonDeg, LonMinDec, EastWest],
    },
    Pattern {
        kind: Kind::Degrees,
        order: Some(AxisOrder::LatLon),
        slots: &[LatDec, LonDec],
    },
    Pattern {
        kind: Kind::Degrees,
        order: Some(AxisOrder::LonLat),
        slots: &[LonDec, LatDec],
    },
    // Uncommon, but a hemisphere letter may also set the sign of decimal degrees.
    Pattern {
        kind: Kind::Degrees,
        order: None,
        slots: &[NorthSouth, LatDec, EastWest, LonDec],
    },
    Pattern {
        kind: Kind::Degrees,
        order: None,
        slots: &[LatDec, NorthSouth, LonDec, EastWest],
    },
];

/// Values captured while walking a pattern.
#[derive(Debug, Default)]
struct Fields {
    ns: Option<Hemisphere>,
    ew: Option<Hemisphere>,
    lat_deg: f64,
    lat_min: f64,
    lat_sec: f64,
    lon_deg: f64,
    lon_min: f64,
    lon_sec: f64,
    lat_dec: Option<Number>,
    lon_dec: Option<Number>,
}

/// A successful pattern match at some token offset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    pub coordinate: Coordinate,
    pub method: MatchMethod,
    pub confidence: u32,
    pub offset: usize,
}

/// All pattern matches in `tokens`, in pattern order then offset order.
pub fn candidates(tokens: &[Token], order: AxisOrder) -> Vec<Candidate> {
    let mut found = Vec::new();
    for pattern in PATTERNS {
        if pattern.order.is_some_and(|o| o != order) {
            continue;
        }
        for offset in 0..tokens.len() {
            if let Some((coordinate, confidence)) = pattern.try_match(&tokens[offset..]) {
                let method = match pattern.kind {
                    Kind::Compass => MatchMethod::Compass,
                    Kind::Degrees => MatchMethod::Degrees,
                };
                log::debug!(
                    "candidate {:?} at {}: {} (confidence {})",
                    pattern.slots,
                    offset,
                    coordinate,
                    confidence
                );
                found.push(Candidate {
                    coordinate,
                    method,
                    confidence,
                    offset,
                });
            }
        }
    }
    found
}

/// Highest-confidence candidate; the earliest one wins a tie. A winner with
/// zero confidence is no match at all.
pub fn best(candidates: &[Candidate]) -> Option<Candidate> {
    let mut best: Option<Candidate> = None;
    for c in candidates {
        let better = match best {
            Some(b) => c.confidence > b.confidence,
            None => true,
        };
        if better {
            best = Some(*c);
        }
    }
    best.filter(|b| b.confidence > 0)
}

impl Pattern {
    fn try_match(&self, tokens: &[Token]) -> Option<(Coordinate, u32)> {
        if tokens.len() < self.slots.len() {
            return None;
        }
        let mut fields = Fields::default();
        for (slot, token) in self.slots.iter().zip(tokens) {
            accept(*slot, token, &mut fields)?;
        }
        self.finish(&fields)
    }

    fn finish(&self, f: &Fields) -> Option<(Coordinate, u32)> {
        match self.kind {
            Kind::Compass => {
                let mut lat = f.lat_deg + f.lat_min / 60.0 + f.lat_sec / 3600.0;
                let mut lon = f.lon_deg + f.lon_min / 60.0 + f.lon_sec / 3600.0;
                if f.ns.is_some_and(Hemisphere::is_negative) {
                    lat = -lat;
                }
                if f.ew.is_some_and(Hemisphere::is_negative) {
                    lon = -lon;
                }
                let coordinate = Coordinate::new(lat, lon).ok()?;
                Some((coordinate, COMPASS_CONFIDENCE))
            }
            Kind::Degrees => {
                let lat_n = f.lat_dec?;
                let lon_n = f.lon_dec?;
                let lat = signed(lat_n.value, f.ns);
                let lon = signed(lon_n.value, f.ew);
                let coordinate = Coordinate::new(lat, lon).ok()?;

                let tagged = f.ns.is_some() && f.ew.is_some();
                let weight = |n: &Number| {
                    let w = precision_weight(n);
                    if tagged { w.max(1) } else { w }
                };
                Some((coordinate, weight(&lat_n).saturating_mul(weight(&lon_n))))
            }
        }
    }
}

/// The more digits after the decimal point, the more likely a number is a
/// coordinate. Integers weigh nothing.
fn precision_weight(n: &Number) -> u32 {
    if n.has_point {
        n.frac_digits.saturating_add(2)
    } else {
        0
    }
}

fn signed(value: f64, hemisphere: Option<Hemisphere>) -> f64 {
    match hemisphere {
        Some(h) if h.is_negative() => -value.abs(),
        _ => value,
    }
}

fn accept(slot: Slot, token: &Token, f: &mut Fields) -> Option<()> {
    match (slot, token) {
        (NorthSouth, Token::Hemisphere(h @ (Hemisphere::North | Hemisphere::South))) => {
            f.ns = Some(*h);
        }
        (EastWest, Token::Hemisphere(h @ (Hemisphere::East | Hemisphere::West))) => {
            f.ew = Some(*h);
        }
        (LatDeg, Token::Number(n)) => f.lat_deg = whole(n, 90.0)?,
        (LonDeg, Token::Number(n)) => f.lon_deg = whole(n, 180.0)?,
        (LatMin, Token::Number(n)) => f.lat_min = minutes(n)?,
        (LonMin, Token::Number(n)) => f.lon_min = minutes(n)?,
        (LatSec, Token::Number(n)) => f.lat_sec = sexagesimal(n)?,
        (LonSec, Token::Number(n)) => f.lon_sec = sexagesimal(n)?,
        (LatMinDec, Token::Number(n)) => {
            (f.lat_min, f.lat_sec) = split_minutes(n)?;
        }
        (LonMinDec, Token::Number(n)) => {
            (f.lon_min, f.lon_sec) = split_minutes(n)?;
        }
        (LatDec, Token::Number(n)) if (-90.0..=90.0).contains(&n.value) => {
            f.lat_dec = Some(*n);
        }
        (LonDec, Token::Number(n)) if (-180.0..=180.0).contains(&n.value) => {
            f.lon_dec = Some(*n);
        }
        _ => return None,
    }
    Some(())
}

/// Whole degrees in `[0, max]`.
fn whole(n: &Number, max: f64) -> Option<f64> {
    (n.is_integer() && (0.0..=max).contains(&n.value)).then_some(n.value)
}

/// Whole minutes in `[0, 60)`.
fn minutes(n: &Number) -> Option<f64> {
    if !n.is_integer() {
        return None;
    }
    sexagesimal(n)
}

/// Any minute or second value in `[0, 60)`.
fn sexagesimal(n: &Number) -> Option<f64> {
    (0.0..60.0).contains(&n.value).then_some(n.value)
}

/// Decimal minutes become whole minutes plus seconds.
fn split_minutes(n: &Number) -> Option<(f64, f64)> {
    let value = sexagesimal(n)?;
    let whole = value.trunc();
    Some((whole, (value - whole) * 60.0))
}
