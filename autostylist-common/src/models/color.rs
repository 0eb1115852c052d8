// File: autostylist-common/src/models/color.rs
//
// The backend reports detected colours either as CSS strings or as `[r, g, b]`
// triples. Both are folded into `Color` while the response is parsed. CSS
// values that do not reduce to plain channels are kept verbatim.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Color {
    Rgb { r: u8, g: u8, b: u8 },
    /// A CSS colour keyword such as `navy`, stored lowercase.
    Named(String),
    /// Any other CSS colour value (`rgba()`, `hsl()`, `#rrggbbaa`, ...), as sent.
    Css(String),
}

impl Color {
    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color::Rgb { r, g, b }
    }

    /// A value usable directly as `background-color`.
    pub fn to_css(&self) -> String {
        match self {
            Color::Rgb { r, g, b } => format!("#{r:02x}{g:02x}{b:02x}"),
            Color::Named(name) | Color::Css(name) => name.clone(),
        }
    }

    fn from_triple(values: &[i64]) -> Result<Self, String> {
        if values.len() != 3 {
            return Err(format!("colour triple must have 3 channels, got {}", values.len()));
        }
        let channel = |v: i64| {
            u8::try_from(v).map_err(|_| format!("colour channel {v} out of range 0-255"))
        };
        Ok(Color::rgb(channel(values[0])?, channel(values[1])?, channel(values[2])?))
    }

    fn from_hex(hex: &str) -> Option<Self> {
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let expanded: String = match hex.len() {
            3 => hex.chars().flat_map(|c| [c, c]).collect(),
            6 => hex.to_string(),
            _ => return None,
        };
        let byte = |i: usize| u8::from_str_radix(&expanded[i..i + 2], 16).ok();
        Some(Color::rgb(byte(0)?, byte(2)?, byte(4)?))
    }

    /// `rgb(r, g, b)` or `rgb(r g b)` with integer channels.
    fn from_rgb_function(inner: &str) -> Option<Self> {
        let values = inner
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|p| !p.is_empty())
            .map(|p| p.parse::<i64>().ok())
            .collect::<Option<Vec<_>>>()?;
        Color::from_triple(&values).ok()
    }
}

impl FromStr for Color {
    type Err = String;

    /// Never fails on a non-empty string.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err("empty colour string".to_string());
        }

        let lower = s.to_ascii_lowercase();
        let reduced = if let Some(hex) = lower.strip_prefix('#') {
            Color::from_hex(hex)
        } else if let Some(inner) = lower.strip_prefix("rgb(").and_then(|rest| rest.strip_suffix(')')) {
            Color::from_rgb_function(inner)
        } else if lower.chars().all(|c| c.is_ascii_alphabetic()) {
            Some(Color::Named(lower.clone()))
        } else {
            None
        };

        Ok(reduced.unwrap_or_else(|| Color::Css(s.to_string())))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_css())
    }
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum RawColor {
    Css(String),
    Triple(Vec<i64>),
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = RawColor::deserialize(deserializer)?;
        match raw {
            RawColor::Css(s) => s.parse(),
            RawColor::Triple(values) => Color::from_triple(&values),
        }
        .map_err(serde::de::Error::custom)
    }
}

impl Serialize for Color {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            Color::Rgb { r, g, b } => {
                RawColor::Triple(vec![*r as i64, *g as i64, *b as i64]).serialize(serializer)
            }
            Color::Named(css) | Color::Css(css) => RawColor::Css(css.clone()).serialize(serializer),
        }
    }
}
