//! Exact palette mapping for images that already fit a palette.
//!
//! These helpers return `None` instead of an error when the image does not
//! fit, and the caller falls back to nearest-color quantization.

use crate::color::Rgb;
use crate::palette::{Palette, PALETTE_SIZE};

/// Palette holding the distinct colors of `pixels` in first-seen order.
///
/// Returns `None` when there are more than 16 distinct colors.
pub fn build_verbatim_palette(pixels: &[Rgb]) -> Option<Palette> {
    let mut colors: Vec<Rgb> = Vec::with_capacity(PALETTE_SIZE);
    for &p in pixels {
        if !colors.contains(&p) {
            if colors.len() == PALETTE_SIZE {
                return None;
            }
            colors.push(p);
        }
    }
    Palette::new(&colors).ok()
}

/// Map every pixel to the palette entry it equals byte for byte.
pub fn map_exact(line: &[Rgb], palette: &Palette) -> Option<Vec<u8>> {
    line.iter().map(|&c| palette.find_exact(c)).collect()
}

/// First palette in `pool` holding every color of `line` at 12-bit precision,
/// with the line's indices into it.
pub fn verbatim_line(line: &[Rgb], pool: &[Palette]) -> Option<(usize, Vec<u8>)> {
    let reduced: Vec<Rgb> = line.iter().map(|c| c.to_12bit()).collect();
    pool.iter().enumerate().find_map(|(i, palette)| {
        map_exact(&reduced, &palette.to_12bit()).map(|indices| (i, indices))
    })
}
