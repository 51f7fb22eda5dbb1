//! RGB colors for plane materials and overlays

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ColorParseError;

/// An opaque 8-bit RGB color. Serialized as a `#RRGGBB` string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Self = Self::from_u32(0xFFFFFF);
    /// Grid line color of plane materials
    pub const PLANE_LINE: Self = Self::from_u32(0x707070);
    /// Background used when no palette color has been assigned
    pub const PLANE_BACKGROUND: Self = Self::from_u32(0x404040);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build from a packed `0xRRGGBB` value
    pub const fn from_u32(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xFF) as u8,
            g: ((hex >> 8) & 0xFF) as u8,
            b: (hex & 0xFF) as u8,
        }
    }

    pub fn to_u32(self) -> u32 {
        (u32::from(self.r) << 16) | (u32::from(self.g) << 8) | u32::from(self.b)
    }

    /// Parse `#RRGGBB` (the leading `#` is optional)
    pub fn from_hex(input: &str) -> Result<Self, ColorParseError> {
        let err = || ColorParseError {
            input: input.to_string(),
        };
        let digits = input.trim().trim_start_matches('#');
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(err());
        }
        u32::from_str_radix(digits, 16)
            .map(Self::from_u32)
            .map_err(|_| err())
    }

    pub fn to_hex(self) -> String {
        format!("#{:06X}", self.to_u32())
    }

    /// Linear `[0, 1]` channels, the form shader uniforms take
    pub fn to_rgb_f32(self) -> [f32; 3] {
        [
            f32::from(self.r) / 255.0,
            f32::from(self.g) / 255.0,
            f32::from(self.b) / 255.0,
        ]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::PLANE_BACKGROUND
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl TryFrom<String> for Color {
    type Error = ColorParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_hex(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex() {
        assert_eq!(Color::from_hex("#F44336").unwrap(), Color::rgb(0xF4, 0x43, 0x36));
        assert_eq!(Color::from_hex("00bcd4").unwrap(), Color::from_u32(0x00BCD4));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(Color::from_hex("#FFF").is_err());
        assert!(Color::from_hex("#GGGGGG").is_err());
        assert!(Color::from_hex("").is_err());
    }

    #[test]
    fn test_display_is_uppercase_hex() {
        assert_eq!(Color::from_u32(0x3f51b5).to_string(), "#3F51B5");
    }

    #[test]
    fn test_rgb_f32() {
        assert_eq!(Color::WHITE.to_rgb_f32(), [1.0, 1.0, 1.0]);
        assert_eq!(Color::rgb(0, 0, 0).to_rgb_f32(), [0.0, 0.0, 0.0]);
    }
}
