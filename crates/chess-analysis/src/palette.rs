//! Presentation colours for move ratings.

use crate::Rating;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error returned when a string is not a `#RRGGBB` colour.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid colour: {0}")]
pub struct ParseColorError(pub String);

/// An opaque 24-bit colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Builds a colour from a `0xRRGGBB` literal.
    #[inline]
    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: (hex >> 16) as u8,
            g: (hex >> 8) as u8,
            b: hex as u8,
        }
    }

    /// Returns the colour as a `0xRRGGBB` value.
    #[inline]
    pub const fn to_hex(self) -> u32 {
        (self.r as u32) << 16 | (self.g as u32) << 8 | self.b as u32
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s
            .strip_prefix('#')
            .filter(|d| d.len() == 6 && d.bytes().all(|b| b.is_ascii_hexdigit()))
            .ok_or_else(|| ParseColorError(s.to_string()))?;
        u32::from_str_radix(digits, 16)
            .map(Rgb::from_hex)
            .map_err(|_| ParseColorError(s.to_string()))
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

/// Colour used when no rating applies.
pub const UNRATED: Rgb = Rgb::from_hex(0x404040);

/// Colour of a rating.
pub const fn rating_color(rating: Rating) -> Rgb {
    match rating {
        Rating::BestMove => Rgb::from_hex(0x2DFF38),
        Rating::Excellent => Rgb::from_hex(0x1B9621),
        Rating::Good => Rgb::from_hex(0x66CE61),
        Rating::Inaccuracy => Rgb::from_hex(0xFFE400),
        Rating::Mistake => Rgb::from_hex(0xFF9700),
        Rating::Blunder => Rgb::from_hex(0xBA0000),
        Rating::Miss => Rgb::from_hex(0xFF4949),
        Rating::Brilliant => Rgb::from_hex(0x00BAC9),
        Rating::GreatMove => Rgb::from_hex(0x0094FF),
    }
}

/// Colour of an optional rating, falling back to [`UNRATED`].
pub const fn color_of(rating: Option<Rating>) -> Rgb {
    match rating {
        Some(r) => rating_color(r),
        None => UNRATED,
    }
}
