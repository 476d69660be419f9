//! 8-bit RGB color with Apple IIgs 12-bit helpers.

use std::fmt;
use std::str::FromStr;

use crate::palette::ParseColorError;

/// An 8-bit-per-channel RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
}

impl Rgb {
    /// Pure black.
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    /// Pure white.
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    #[inline]
    pub fn to_array(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    #[inline]
    pub fn from_array(c: [u8; 3]) -> Self {
        Self::new(c[0], c[1], c[2])
    }

    /// Reduce to the IIgs 4-bit-per-channel form (`value >> 4`).
    #[inline]
    pub fn to_nibbles(self) -> [u8; 3] {
        [self.r >> 4, self.g >> 4, self.b >> 4]
    }

    /// Expand 4-bit channels back to 8 bits (`nibble * 17`), so 0xF maps to 0xFF.
    #[inline]
    pub fn from_nibbles(r: u8, g: u8, b: u8) -> Self {
        Self::new((r & 0x0F) * 17, (g & 0x0F) * 17, (b & 0x0F) * 17)
    }

    /// Snap this color to the nearest representable IIgs color.
    #[inline]
    pub fn to_12bit(self) -> Self {
        let [r, g, b] = self.to_nibbles();
        Self::from_nibbles(r, g, b)
    }

    /// Encode as a IIgs palette word: low byte `(G << 4) | B`, high byte `R`.
    pub fn to_shr_word(self) -> [u8; 2] {
        let [r, g, b] = self.to_nibbles();
        [(g << 4) | b, r]
    }

    /// Decode a IIgs palette word written by [`Rgb::to_shr_word`].
    pub fn from_shr_word(word: [u8; 2]) -> Self {
        Self::from_nibbles(word[1], word[0] >> 4, word[0])
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = ParseColorError;

    /// Parse `#RRGGBB`, `RRGGBB`, `#RGB` or `RGB`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let s = s.strip_prefix('#').unwrap_or(s);
        let digits = s
            .chars()
            .map(|c| c.to_digit(16).map(|d| d as u8).ok_or(ParseColorError::Digit(c)))
            .collect::<Result<Vec<u8>, _>>()?;

        match *digits.as_slice() {
            [r, g, b] => Ok(Self::from_nibbles(r, g, b)),
            [r1, r0, g1, g0, b1, b0] => Ok(Self::new(r1 << 4 | r0, g1 << 4 | g0, b1 << 4 | b0)),
            _ => Err(ParseColorError::Length(digits.len())),
        }
    }
}
