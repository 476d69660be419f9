//! Pools of palettes for Super Hi-Res conversion.

use super::{Palette, PaletteError};

/// Pool sizes a [`PaletteSet`] may have.
pub const VALID_SET_SIZES: [usize; 4] = [1, 8, 16, 200];

/// An ordered pool of 1, 8, 16 or 200 palettes.
#[derive(Debug, Clone, PartialEq)]
pub struct PaletteSet {
    palettes: Vec<Palette>,
}

impl PaletteSet {
    /// Build a pool, checking that its size is one of [`VALID_SET_SIZES`].
    pub fn new(palettes: Vec<Palette>) -> Result<Self, PaletteError> {
        if !VALID_SET_SIZES.contains(&palettes.len()) {
            return Err(PaletteError::InvalidSetSize {
                count: palettes.len(),
            });
        }
        Ok(Self { palettes })
    }

    /// A pool holding a single palette.
    pub fn single(palette: Palette) -> Self {
        Self {
            palettes: vec![palette],
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.palettes.len()
    }

    /// Always false; pools hold at least one palette.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.palettes.is_empty()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&Palette> {
        self.palettes.get(index)
    }

    #[inline]
    pub fn as_slice(&self) -> &[Palette] {
        &self.palettes
    }

    /// First palette of the pool.
    #[inline]
    pub fn first(&self) -> &Palette {
        &self.palettes[0]
    }

    /// Copy with every palette snapped to 12-bit color.
    pub fn to_12bit(&self) -> Self {
        Self {
            palettes: self.palettes.iter().map(Palette::to_12bit).collect(),
        }
    }
}

impl From<Palette> for PaletteSet {
    fn from(palette: Palette) -> Self {
        PaletteSet::single(palette)
    }
}
