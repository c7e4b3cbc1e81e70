//! RGB color type used across templates, covers and the renderer.
//!
//! Colors are written as `#RGB` or `#RRGGBB` hex strings in configuration
//! and deserialized from either a hex string or an `{r, g, b}` map.

use serde::{Deserialize, Deserializer, Serialize, de};
use std::fmt;
use std::str::FromStr;

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Default for Color {
    fn default() -> Self {
        Self { r: 0, g: 0, b: 0 }
    }
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const fn gray(value: u8) -> Self {
        Self { r: value, g: value, b: value }
    }

    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);

    /// Normalized components for PDF fill operations.
    pub fn to_rgb_f32(self) -> (f32, f32, f32) {
        (
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
        )
    }

    /// Parse a `#RGB` or `#RRGGBB` hex string.
    pub fn from_hex(s: &str) -> Result<Self, ColorParseError> {
        let s = s.trim();
        let hex = s
            .strip_prefix('#')
            .ok_or_else(|| ColorParseError(format!("color must start with '#', got '{s}'")))?;

        let component = |part: &str| {
            u8::from_str_radix(part, 16)
                .map_err(|e| ColorParseError(format!("invalid hex component '{part}': {e}")))
        };

        match hex.len() {
            3 => Ok(Self {
                r: component(&hex[0..1].repeat(2))?,
                g: component(&hex[1..2].repeat(2))?,
                b: component(&hex[2..3].repeat(2))?,
            }),
            6 => Ok(Self {
                r: component(&hex[0..2])?,
                g: component(&hex[2..4])?,
                b: component(&hex[4..6])?,
            }),
            n => Err(ColorParseError(format!(
                "hex color must have 3 or 6 digits, got {n}"
            ))),
        }
    }
}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorParseError(String);

impl fmt::Display for ColorParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for ColorParseError {}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum ColorDef {
            Str(String),
            Map { r: u8, g: u8, b: u8 },
        }

        match ColorDef::deserialize(deserializer)? {
            ColorDef::Str(s) => Color::from_hex(&s).map_err(de::Error::custom),
            ColorDef::Map { r, g, b } => Ok(Color { r, g, b }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_long_hex() {
        assert_eq!(Color::from_hex("#2C3E50").unwrap(), Color::rgb(0x2C, 0x3E, 0x50));
    }

    #[test]
    fn parses_short_hex() {
        assert_eq!(Color::from_hex("#f0a").unwrap(), Color::rgb(0xFF, 0x00, 0xAA));
    }

    #[test]
    fn rejects_missing_hash_and_bad_length() {
        assert!(Color::from_hex("2C3E50").is_err());
        assert!(Color::from_hex("#12345").is_err());
    }

    #[test]
    fn deserializes_from_string_or_map() {
        let from_str: Color = serde_json::from_str("\"#003366\"").unwrap();
        assert_eq!(from_str, Color::rgb(0x00, 0x33, 0x66));

        let from_map: Color = serde_json::from_str(r#"{"r": 1, "g": 2, "b": 3}"#).unwrap();
        assert_eq!(from_map, Color::rgb(1, 2, 3));
    }

    #[test]
    fn displays_as_hex() {
        assert_eq!(Color::rgb(0, 0x33, 0x66).to_string(), "#003366");
    }
}
