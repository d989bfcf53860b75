use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// A 24-bit RGB color. Alpha from raw pixel samples is discarded before a
/// `Color` is built, so equality over the three channels is the same
/// comparison as lower-cased 6-hex-digit strings.
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct Color([u8; 3]);

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self([r, g, b])
    }

    /// Builds a color from the low 24 bits of `rgb`, e.g. `0x00ff7b`.
    pub const fn from_rgb(rgb: u32) -> Self {
        Self([(rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8])
    }
}

impl From<image::Rgb<u8>> for Color {
    fn from(pixel: image::Rgb<u8>) -> Self {
        Self(pixel.0)
    }
}

impl From<Color> for image::Rgb<u8> {
    fn from(color: Color) -> Self {
        image::Rgb(color.0)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b] = self.0;
        write!(f, "{r:02x}{g:02x}{b:02x}")
    }
}

impl fmt::Debug for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{self}")
    }
}

#[derive(Debug, Error, Copy, Clone, PartialEq, Eq)]
#[error("expected exactly 6 hex digits")]
pub struct ParseColorError;

impl FromStr for Color {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 6 || !s.is_ascii() {
            return Err(ParseColorError);
        }
        let rgb = u32::from_str_radix(s, 16).map_err(|_| ParseColorError)?;
        Ok(Self::from_rgb(rgb))
    }
}
