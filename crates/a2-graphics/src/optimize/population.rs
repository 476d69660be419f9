//! Palettes built from the colors an image actually uses.
//!
//! Colors are counted after reduction to 12-bit IIgs color, so every
//! generated palette is directly displayable.

use std::collections::HashMap;

use crate::color::Rgb;
use crate::palette::{ColorMetric, Palette, PaletteSet, PALETTE_SIZE};

/// Options for frequency-based palettes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PopulationOptions {
    /// Put the darkest color in slot 0 and the lightest in slot 15.
    ///
    /// Default: `true`
    pub pin_extremes: bool,

    /// Allow at most one near-black, one near-white and one grey entry.
    ///
    /// Default: `false`
    pub limit_greys: bool,
}

impl Default for PopulationOptions {
    fn default() -> Self {
        Self {
            pin_extremes: true,
            limit_greys: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tone {
    NearBlack,
    NearWhite,
    Grey,
}

fn tone(c: Rgb) -> Option<Tone> {
    let [r, g, b] = c.to_nibbles();
    if r <= 2 && g <= 2 && b <= 2 {
        Some(Tone::NearBlack)
    } else if r >= 13 && g >= 13 && b >= 13 {
        Some(Tone::NearWhite)
    } else if r == g && g == b {
        Some(Tone::Grey)
    } else {
        None
    }
}

/// Distinct 12-bit colors by descending frequency, first seen first on ties.
fn histogram(pixels: &[Rgb]) -> Vec<(Rgb, usize)> {
    let mut slots: HashMap<Rgb, usize> = HashMap::new();
    let mut counts: Vec<(Rgb, usize)> = Vec::new();
    for &p in pixels {
        let c = p.to_12bit();
        match slots.get(&c) {
            Some(&i) => counts[i].1 += 1,
            None => {
                slots.insert(c, counts.len());
                counts.push((c, 1));
            }
        }
    }
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

/// Build a palette from the most frequent colors in `pixels`.
///
/// Unused slots stay black.
pub fn population_palette(metric: &ColorMetric, pixels: &[Rgb], options: PopulationOptions) -> Palette {
    let counts = histogram(pixels);
    let mut palette = Palette::default();
    if counts.is_empty() {
        return palette;
    }

    let mut used_tones: Vec<Tone> = Vec::new();
    let mut pinned: Vec<Rgb> = Vec::new();
    let mut slots = 0..PALETTE_SIZE as u8;

    if options.pin_extremes {
        let by_luma = |a: &&(Rgb, usize), b: &&(Rgb, usize)| metric.luma(a.0).total_cmp(&metric.luma(b.0));
        let darkest = counts.iter().min_by(by_luma).map(|e| e.0).unwrap_or_default();
        let lightest = counts.iter().rev().max_by(by_luma).map(|e| e.0).unwrap_or_default();
        palette.set(0, darkest);
        palette.set(15, lightest);
        pinned.extend([darkest, lightest]);
        used_tones.extend(tone(darkest));
        used_tones.extend(tone(lightest));
        slots = 1..15;
    }

    let mut candidates = counts
        .iter()
        .map(|e| e.0)
        .filter(|c| !pinned.contains(c))
        .filter(|&c| {
            if !options.limit_greys {
                return true;
            }
            match tone(c) {
                Some(t) if used_tones.contains(&t) => false,
                Some(t) => {
                    used_tones.push(t);
                    true
                }
                None => true,
            }
        });

    for slot in slots {
        match candidates.next() {
            Some(c) => palette.set(slot, c),
            None => break,
        }
    }
    palette
}

/// One population palette per horizontal band of the image.
///
/// `bands` must be 1, 8, 16 or 200; other values are clamped to 16.
pub fn band_palettes(
    metric: &ColorMetric,
    rows: &[&[Rgb]],
    bands: usize,
    options: PopulationOptions,
) -> PaletteSet {
    let bands = if [1, 8, 16, 200].contains(&bands) { bands } else { 16 };
    let height = rows.len().max(1);
    let palettes = (0..bands)
        .map(|band| {
            let start = band * height / bands;
            let end = ((band + 1) * height / bands).max(start + 1).min(rows.len());
            let pixels: Vec<Rgb> = rows
                .get(start..end)
                .unwrap_or_default()
                .iter()
                .flat_map(|r| r.iter().copied())
                .collect();
            population_palette(metric, &pixels, options)
        })
        .collect();
    // Sizes are restricted above
    PaletteSet::new(palettes).unwrap_or_else(|_| PaletteSet::single(Palette::default()))
}
