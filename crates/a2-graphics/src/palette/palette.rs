//! Fixed 16-entry palette.

use std::str::FromStr;

use super::PaletteError;
use crate::color::Rgb;

/// Number of entries in every Apple II palette.
pub const PALETTE_SIZE: usize = 16;

/// A 16-entry palette.
///
/// Palettes built from fewer than 16 colors are padded with black. Duplicate
/// entries are allowed; matching then prefers the lowest index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Palette {
    entries: [Rgb; PALETTE_SIZE],
}

impl Palette {
    /// Wrap a complete table of 16 colors.
    pub const fn from_array(entries: [Rgb; PALETTE_SIZE]) -> Self {
        Self { entries }
    }

    /// Build a palette from up to 16 colors, padding the rest with black.
    ///
    /// # Errors
    ///
    /// Returns [`PaletteError::TooManyColors`] when more than 16 colors are given.
    pub fn new(colors: &[Rgb]) -> Result<Self, PaletteError> {
        if colors.len() > PALETTE_SIZE {
            return Err(PaletteError::TooManyColors {
                count: colors.len(),
            });
        }
        let mut entries = [Rgb::BLACK; PALETTE_SIZE];
        entries[..colors.len()].copy_from_slice(colors);
        Ok(Self { entries })
    }

    /// Build a palette from hex strings such as `"#FF0000"` or `"F00"`.
    pub fn from_hex(colors: &[&str]) -> Result<Self, PaletteError> {
        let parsed = colors
            .iter()
            .map(|s| Rgb::from_str(s).map_err(PaletteError::ParseColor))
            .collect::<Result<Vec<_>, _>>()?;
        Palette::new(&parsed)
    }

    /// Color at `index`. Only the low nibble of `index` is used.
    #[inline]
    pub fn get(&self, index: u8) -> Rgb {
        self.entries[(index & 0x0F) as usize]
    }

    /// Replace the color at `index` (low nibble only).
    #[inline]
    pub fn set(&mut self, index: u8, color: Rgb) {
        self.entries[(index & 0x0F) as usize] = color;
    }

    #[inline]
    pub fn entries(&self) -> &[Rgb; PALETTE_SIZE] {
        &self.entries
    }

    /// Lowest index whose color equals `color` exactly.
    pub fn find_exact(&self, color: Rgb) -> Option<u8> {
        self.entries
            .iter()
            .position(|&c| c == color)
            .map(|i| i as u8)
    }

    /// Copy of this palette with every entry snapped to 12-bit color.
    pub fn to_12bit(&self) -> Self {
        let mut entries = self.entries;
        for c in entries.iter_mut() {
            *c = c.to_12bit();
        }
        Self { entries }
    }

    /// Serialize as 16 IIgs palette words, entry 0 first.
    pub fn to_shr_bytes(&self) -> [u8; PALETTE_SIZE * 2] {
        let mut out = [0u8; PALETTE_SIZE * 2];
        for (i, c) in self.entries.iter().enumerate() {
            out[i * 2..i * 2 + 2].copy_from_slice(&c.to_shr_word());
        }
        out
    }

    /// Serialize as 16 IIgs palette words, entry 15 first.
    pub fn to_shr_bytes_reversed(&self) -> [u8; PALETTE_SIZE * 2] {
        let mut out = [0u8; PALETTE_SIZE * 2];
        for (i, c) in self.entries.iter().rev().enumerate() {
            out[i * 2..i * 2 + 2].copy_from_slice(&c.to_shr_word());
        }
        out
    }

    /// Read 16 palette words written by [`Palette::to_shr_bytes`].
    ///
    /// `bytes` must hold at least 32 bytes; callers check lengths first.
    pub fn from_shr_bytes(bytes: &[u8]) -> Self {
        let mut entries = [Rgb::BLACK; PALETTE_SIZE];
        for (i, entry) in entries.iter_mut().enumerate() {
            *entry = Rgb::from_shr_word([bytes[i * 2], bytes[i * 2 + 1]]);
        }
        Self { entries }
    }

    /// Read 16 palette words written by [`Palette::to_shr_bytes_reversed`].
    pub fn from_shr_bytes_reversed(bytes: &[u8]) -> Self {
        let mut palette = Self::from_shr_bytes(bytes);
        palette.entries.reverse();
        palette
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_palette_pads_with_black() {
        let p = Palette::new(&[Rgb::WHITE, Rgb::new(255, 0, 0)]).unwrap();
        assert_eq!(p.get(0), Rgb::WHITE);
        assert_eq!(p.get(1), Rgb::new(255, 0, 0));
        assert!(p.entries()[2..].iter().all(|&c| c == Rgb::BLACK));
    }

    #[test]
    fn test_too_many_colors() {
        let colors = vec![Rgb::BLACK; 17];
        assert_eq!(
            Palette::new(&colors),
            Err(PaletteError::TooManyColors { count: 17 })
        );
    }

    #[test]
    fn test_find_exact_prefers_lowest_index() {
        let p = Palette::new(&[Rgb::WHITE, Rgb::WHITE]).unwrap();
        assert_eq!(p.find_exact(Rgb::WHITE), Some(0));
        // Padding entries are black, so black is found at index 2
        assert_eq!(p.find_exact(Rgb::BLACK), Some(2));
        assert_eq!(p.find_exact(Rgb::new(1, 2, 3)), None);
    }

    #[test]
    fn test_shr_bytes_orders() {
        let mut p = Palette::default();
        p.set(0, Rgb::from_nibbles(1, 2, 3));
        p.set(15, Rgb::WHITE);
        let normal = p.to_shr_bytes();
        assert_eq!(&normal[0..2], &[0x23, 0x01]);
        assert_eq!(&normal[30..32], &[0xFF, 0x0F]);
        let reversed = p.to_shr_bytes_reversed();
        assert_eq!(&reversed[0..2], &[0xFF, 0x0F]);
        assert_eq!(Palette::from_shr_bytes_reversed(&reversed), p);
        assert_eq!(Palette::from_shr_bytes(&normal), p);
    }
}
