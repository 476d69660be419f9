//! Palette-indexed image with per-row palettes.

use crate::codec::{
    DhgrFramebuffer, LoresFramebuffer, ShrImage, DHGR_HEIGHT, DHGR_WIDTH, LORES_HEIGHT,
    MONO_WIDTH, SHR_HEIGHT, SHR_WIDTH,
};
use crate::palette::{BuiltinPalette, Palette};

/// Indices plus the palette used by each row.
///
/// # Example
///
/// ```
/// use a2_graphics::{BuiltinPalette, QuantizedImage};
///
/// let image = QuantizedImage::uniform(vec![0, 15, 15, 0], 2, 2, BuiltinPalette::Tohgr.palette());
/// assert_eq!(image.to_rgb()[3..6], [255, 255, 255]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct QuantizedImage {
    indices: Vec<u8>,
    width: usize,
    height: usize,
    palettes: Vec<Palette>,
}

impl QuantizedImage {
    /// Every row shown with the same palette.
    pub fn uniform(indices: Vec<u8>, width: usize, height: usize, palette: Palette) -> Self {
        Self::per_row(indices, width, height, vec![palette; height])
    }

    /// One palette per row.
    ///
    /// # Panics (debug only)
    ///
    /// Debug-asserts that the buffer sizes match the dimensions.
    pub fn per_row(indices: Vec<u8>, width: usize, height: usize, palettes: Vec<Palette>) -> Self {
        debug_assert_eq!(indices.len(), width * height);
        debug_assert_eq!(palettes.len(), height);
        Self {
            indices,
            width,
            height,
            palettes,
        }
    }

    /// Decode a double hi-res color framebuffer.
    pub fn from_dhgr(fb: &DhgrFramebuffer, palette: Palette) -> Self {
        let indices = (0..DHGR_HEIGHT)
            .flat_map(|y| (0..DHGR_WIDTH).map(move |x| (x, y)))
            .map(|(x, y)| fb.get_pixel(x, y).unwrap_or(0))
            .collect();
        Self::uniform(indices, DHGR_WIDTH, DHGR_HEIGHT, palette)
    }

    /// Decode a double hi-res framebuffer as 560×192 black and white.
    pub fn from_dhgr_mono(fb: &DhgrFramebuffer) -> Self {
        let indices = (0..DHGR_HEIGHT)
            .flat_map(|y| (0..MONO_WIDTH).map(move |x| (x, y)))
            .map(|(x, y)| fb.get_mono(x, y).unwrap_or(false) as u8)
            .collect();
        Self::uniform(indices, MONO_WIDTH, DHGR_HEIGHT, BuiltinPalette::Mono.palette())
    }

    pub fn from_lores(fb: &LoresFramebuffer, palette: Palette) -> Self {
        let width = fb.width();
        let indices = (0..LORES_HEIGHT)
            .flat_map(|y| (0..width).map(move |x| (x, y)))
            .map(|(x, y)| fb.get_pixel(x, y).unwrap_or(0))
            .collect();
        Self::uniform(indices, width, LORES_HEIGHT, palette)
    }

    pub fn from_shr(image: &ShrImage) -> Self {
        let indices = (0..SHR_HEIGHT)
            .flat_map(|y| (0..SHR_WIDTH).map(move |x| (x, y)))
            .map(|(x, y)| image.pixels.get_pixel(x, y).unwrap_or(0))
            .collect();
        let palettes = (0..SHR_HEIGHT)
            .map(|y| image.palettes.for_line(y).copied().unwrap_or_default())
            .collect();
        Self::per_row(indices, SHR_WIDTH, SHR_HEIGHT, palettes)
    }

    #[inline]
    pub fn indices(&self) -> &[u8] {
        &self.indices
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    pub fn palette_for_row(&self, y: usize) -> Option<&Palette> {
        self.palettes.get(y)
    }

    /// RGB24 bytes, row-major.
    pub fn to_rgb(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.indices.len() * 3);
        for (y, row) in self.indices.chunks_exact(self.width.max(1)).enumerate() {
            let palette = self.palettes.get(y).copied().unwrap_or_default();
            for &i in row {
                out.extend_from_slice(&palette.get(i).to_array());
            }
        }
        out
    }

    /// Indices packed two per byte, first pixel in the high nibble.
    /// Odd-width rows end with a zero low nibble.
    pub fn to_packed_nibbles(&self) -> Vec<u8> {
        self.indices
            .chunks_exact(self.width.max(1))
            .flat_map(|row| {
                row.chunks(2)
                    .map(|pair| (pair[0] << 4) | pair.get(1).copied().unwrap_or(0))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{ShrFramebuffer, ShrPalettes};
    use crate::color::Rgb;

    #[test]
    fn test_packed_nibbles_match_shr_plane() {
        let mut pixels = ShrFramebuffer::new();
        for x in 0..SHR_WIDTH {
            pixels.plot_pixel(x, 3, (x % 16) as u8);
        }
        let image = ShrImage {
            pixels: pixels.clone(),
            palettes: ShrPalettes::uniform(Palette::default()),
        };
        let quantized = QuantizedImage::from_shr(&image);
        assert_eq!(quantized.to_packed_nibbles(), pixels.as_bytes());
    }

    #[test]
    fn test_rows_use_own_palette() {
        let red = Palette::new(&[Rgb::new(255, 0, 0)]).unwrap();
        let blue = Palette::new(&[Rgb::new(0, 0, 255)]).unwrap();
        let image = QuantizedImage::per_row(vec![0, 0], 1, 2, vec![red, blue]);
        assert_eq!(image.to_rgb(), vec![255, 0, 0, 0, 0, 255]);
    }

    #[test]
    fn test_mono_decode() {
        let mut fb = DhgrFramebuffer::new();
        fb.plot_mono(3, 0, true);
        let image = QuantizedImage::from_dhgr_mono(&fb);
        assert_eq!(image.width(), 560);
        assert_eq!(&image.indices()[..5], &[0, 0, 0, 1, 0]);
    }
}
