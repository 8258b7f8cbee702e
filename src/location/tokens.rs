//! Break free-form text into numbers and hemisphere words.
//!
//! Everything else (degree signs, quotes, `deg`, `min`, `latitude`, URL
//! punctuation) is dropped, so `37° 37′ 8″ N` and `37_37_08_N` produce the
//! same sequence.

use super::types::Hemisphere;
use regex::Regex;
use std::sync::LazyLock;

static ELEMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)[a-z]+|-?[0-9]+\.?[0-9]*").expect("element regex is valid")
});

/// A numeric literal as it appeared in the input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Number {
    pub value: f64,
    /// The literal contained a decimal point.
    pub has_point: bool,
    pub frac_digits: u32,
}

impl Number {
    /// Integer literal, as required for whole degrees and minutes.
    pub fn is_integer(&self) -> bool {
        !self.has_point
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Token {
    Number(Number),
    Hemisphere(Hemisphere),
}

pub fn break_apart(input: &str) -> Vec<Token> {
    ELEMENT
        .find_iter(input)
        .filter_map(|m| classify(m.as_str()))
        .collect()
}

fn classify(text: &str) -> Option<Token> {
    if let Some(h) = Hemisphere::from_word(text) {
        return Some(Token::Hemisphere(h));
    }
    if !text.starts_with(|c: char| c == '-' || c.is_ascii_digit()) {
        return None;
    }
    let value: f64 = text.parse().ok()?;
    let (has_point, frac_digits) = match text.split_once('.') {
        Some((_, frac)) => (true, u32::try_from(frac.len()).unwrap_or(u32::MAX)),
        None => (false, 0),
    };
    Some(Token::Number(Number {
        value,
        has_point,
        frac_digits,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn num(value: f64, has_point: bool, frac_digits: u32) -> Token {
        Token::Number(Number {
            value,
            has_point,
            frac_digits,
        })
    }

    #[test]
    fn test_decimal_pair() {
        assert_eq!(
            break_apart("37.618889, -122.375"),
            vec![num(37.618889, true, 6), num(-122.375, true, 3)]
        );
    }

    #[test]
    fn test_compass_symbols() {
        let tokens = break_apart("37° 37′ 8″ N, 122° 22′ 30″ W");
        assert_eq!(
            tokens,
            vec![
                num(37.0, false, 0),
                num(37.0, false, 0),
                num(8.0, false, 0),
                Token::Hemisphere(Hemisphere::North),
                num(122.0, false, 0),
                num(22.0, false, 0),
                num(30.0, false, 0),
                Token::Hemisphere(Hemisphere::West),
            ]
        );
    }

    #[test]
    fn test_words_dropped() {
        let tokens = break_apart("39 deg 13 min 26.686 sec north latitude");
        assert_eq!(
            tokens,
            vec![
                num(39.0, false, 0),
                num(13.0, false, 0),
                num(26.686, true, 3),
                Token::Hemisphere(Hemisphere::North),
            ]
        );
    }

    #[test]
    fn test_underscore_separated() {
        let tokens = break_apart("37_37_08_N_122_22_30_W");
        assert_eq!(tokens.len(), 8);
        assert_eq!(tokens[3], Token::Hemisphere(Hemisphere::North));
        assert_eq!(tokens[7], Token::Hemisphere(Hemisphere::West));
    }

    #[test]
    fn test_trailing_point() {
        assert_eq!(break_apart("10."), vec![num(10.0, true, 0)]);
    }

    #[test]
    fn test_long_fraction() {
        let tokens = break_apart(&format!("0.{}", "5".repeat(70_000)));
        assert_eq!(tokens, vec![num(0.5555555555555556, true, 70_000)]);
    }

    #[test]
    fn test_empty() {
        assert!(break_apart("").is_empty());
        assert!(break_apart("nothing here").is_empty());
    }
}
