//! Super hi-res codec (320×200, 4 bits per pixel).

use crate::palette::{Palette, PaletteSet};

pub const SHR_WIDTH: usize = 320;
pub const SHR_HEIGHT: usize = 200;
pub const SHR_BYTES_PER_LINE: usize = 160;
/// Size of the packed pixel plane.
pub const SHR_PIXEL_BYTES: usize = SHR_BYTES_PER_LINE * SHR_HEIGHT;

/// Packed-nibble pixel plane. Even columns are the high nibble.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShrFramebuffer {
    pixels: Vec<u8>,
}

impl Default for ShrFramebuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl ShrFramebuffer {
    pub fn new() -> Self {
        Self {
            pixels: vec![0; SHR_PIXEL_BYTES],
        }
    }

    /// Wrap a 32000-byte plane. Returns `None` on any other length.
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        (bytes.len() == SHR_PIXEL_BYTES).then(|| Self {
            pixels: bytes.to_vec(),
        })
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.pixels
    }

    /// The 160 packed bytes of scanline `y`.
    pub fn line(&self, y: usize) -> Option<&[u8]> {
        (y < SHR_HEIGHT).then(|| &self.pixels[y * SHR_BYTES_PER_LINE..(y + 1) * SHR_BYTES_PER_LINE])
    }

    /// Overwrite scanline `y` with 160 packed bytes. Other lengths are ignored.
    pub fn set_line(&mut self, y: usize, bytes: &[u8]) {
        if y < SHR_HEIGHT && bytes.len() == SHR_BYTES_PER_LINE {
            self.pixels[y * SHR_BYTES_PER_LINE..(y + 1) * SHR_BYTES_PER_LINE].copy_from_slice(bytes);
        }
    }

    pub fn plot_pixel(&mut self, x: usize, y: usize, index: u8) {
        if x >= SHR_WIDTH || y >= SHR_HEIGHT {
            return;
        }
        let byte = &mut self.pixels[y * SHR_BYTES_PER_LINE + x / 2];
        *byte = if x % 2 == 0 {
            (*byte & 0x0F) | ((index & 0x0F) << 4)
        } else {
            (*byte & 0xF0) | (index & 0x0F)
        };
    }

    pub fn get_pixel(&self, x: usize, y: usize) -> Option<u8> {
        if x >= SHR_WIDTH || y >= SHR_HEIGHT {
            return None;
        }
        let byte = self.pixels[y * SHR_BYTES_PER_LINE + x / 2];
        Some(if x % 2 == 0 { byte >> 4 } else { byte & 0x0F })
    }
}

/// Palette layout of a super hi-res image.
#[derive(Debug, Clone, PartialEq)]
pub enum ShrPalettes {
    /// Up to 16 palettes chosen per line by a scanline control byte
    Pic { scb: Vec<u8>, palettes: Vec<Palette> },
    /// One palette per scanline
    Brooks { palettes: Vec<Palette> },
}

impl ShrPalettes {
    /// One palette for every line.
    pub fn uniform(palette: Palette) -> Self {
        ShrPalettes::Pic {
            scb: vec![0; SHR_HEIGHT],
            palettes: vec![palette; 16],
        }
    }

    /// PIC layout from a pool of 1, 8 or 16 palettes, padded to 16 with black.
    pub fn pic(scb: Vec<u8>, pool: &PaletteSet) -> Self {
        let mut palettes: Vec<Palette> = pool.as_slice().iter().take(16).copied().collect();
        palettes.resize(16, Palette::default());
        ShrPalettes::Pic { scb, palettes }
    }

    /// Palette used by scanline `y`.
    pub fn for_line(&self, y: usize) -> Option<&Palette> {
        match self {
            ShrPalettes::Pic { scb, palettes } => {
                let slot = scb.get(y)?;
                palettes.get((slot & 0x0F) as usize)
            }
            ShrPalettes::Brooks { palettes } => palettes.get(y),
        }
    }

    pub fn is_brooks(&self) -> bool {
        matches!(self, ShrPalettes::Brooks { .. })
    }
}

/// A complete super hi-res picture.
#[derive(Debug, Clone, PartialEq)]
pub struct ShrImage {
    pub pixels: ShrFramebuffer,
    pub palettes: ShrPalettes,
}
