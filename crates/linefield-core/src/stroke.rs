//! Stroke appearance shared by the terminal and SVG renderers.

use std::fmt;
use std::str::FromStr;

use ratatui::style::Color;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// An sRGB colour written as `#rrggbb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// The pale blue the lines are drawn in by default.
    pub const CLEAR_WATER: Rgb = Rgb(0xc3, 0xe5, 0xec);

    /// Convert to a ratatui colour.
    pub fn color(self) -> Color {
        Color::Rgb(self.0, self.1, self.2)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

/// Error returned when a colour string is not `#rrggbb`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseRgbError(pub String);

impl fmt::Display for ParseRgbError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid colour '{}', expected #rrggbb", self.0)
    }
}

impl std::error::Error for ParseRgbError {}

impl FromStr for Rgb {
    type Err = ParseRgbError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseRgbError(s.to_string());
        let hex = s.trim().strip_prefix('#').ok_or_else(err)?;
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(err());
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| err());
        Ok(Rgb(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Rgb {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Line cap used by the SVG renderer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineCap {
    Butt,
    #[default]
    Round,
    Square,
}

impl LineCap {
    pub fn as_str(self) -> &'static str {
        match self {
            LineCap::Butt => "butt",
            LineCap::Round => "round",
            LineCap::Square => "square",
        }
    }
}

/// Fixed visual attributes of every drawn segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrokeStyle {
    pub color: Rgb,
    /// Stroke width in pixels.
    pub width: u32,
    pub cap: LineCap,
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self {
            color: Rgb::CLEAR_WATER,
            width: 5,
            cap: LineCap::Round,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rgb() {
        assert_eq!("#c3e5ec".parse::<Rgb>(), Ok(Rgb::CLEAR_WATER));
        assert_eq!("#FF0010".parse::<Rgb>(), Ok(Rgb(255, 0, 16)));
        assert!("c3e5ec".parse::<Rgb>().is_err());
        assert!("#c3e5e".parse::<Rgb>().is_err());
        assert!("#zzzzzz".parse::<Rgb>().is_err());
    }

    #[test]
    fn test_rgb_display() {
        assert_eq!(Rgb::CLEAR_WATER.to_string(), "#c3e5ec");
        assert_eq!(Rgb::CLEAR_WATER.color(), Color::Rgb(0xc3, 0xe5, 0xec));
    }
}
