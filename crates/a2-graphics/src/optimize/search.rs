//! Per-line palette search.

use crate::color::Rgb;
use crate::palette::{ColorMetric, Palette};

/// Summed nearest-color distance of a line against one palette.
pub fn line_distance(metric: &ColorMetric, line: &[Rgb], palette: &Palette) -> f64 {
    line.iter().map(|&c| metric.nearest(c, palette).distance).sum()
}

/// Winner of a palette search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaletteChoice {
    /// Index into the searched pool
    pub index: usize,
    /// Summed distance of the line against that palette
    pub distance: f64,
}

/// Palette in `pool` with the lowest summed distance for `line`.
///
/// Ties keep the earliest palette. Returns `None` for an empty pool.
pub fn best_palette(metric: &ColorMetric, line: &[Rgb], pool: &[Palette]) -> Option<PaletteChoice> {
    let mut best: Option<PaletteChoice> = None;
    for (index, palette) in pool.iter().enumerate() {
        let distance = line_distance(metric, line, palette);
        if best.map_or(true, |b| distance < b.distance) {
            best = Some(PaletteChoice { index, distance });
        }
        if distance == 0.0 {
            break;
        }
    }
    best
}

/// Which pool a hybrid search picked from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchMethod {
    /// One of the shared section palettes
    Sections,
    /// The line's own palette
    PerLine,
}

/// Winner of a hybrid search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HybridChoice {
    pub method: SearchMethod,
    pub choice: PaletteChoice,
}

/// Search the section pool and the per-line pool and keep the better one.
///
/// Section palettes win ties.
pub fn best_hybrid(
    metric: &ColorMetric,
    line: &[Rgb],
    sections: &[Palette],
    per_line: &[Palette],
) -> Option<HybridChoice> {
    let section = best_palette(metric, line, sections).map(|choice| HybridChoice {
        method: SearchMethod::Sections,
        choice,
    });
    let own = best_palette(metric, line, per_line).map(|choice| HybridChoice {
        method: SearchMethod::PerLine,
        choice,
    });
    match (section, own) {
        (Some(s), Some(o)) if o.choice.distance < s.choice.distance => Some(o),
        (Some(s), _) => Some(s),
        (None, o) => o,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::BuiltinPalette;

    fn solid(c: Rgb) -> Palette {
        Palette::new(&[c]).unwrap()
    }

    #[test]
    fn test_best_is_minimum() {
        let metric = ColorMetric::default();
        let line: Vec<Rgb> = (0..40).map(|x| Rgb::new(x * 6, 100, 200 - x * 4)).collect();
        let pool = [
            BuiltinPalette::Kegs32.palette(),
            BuiltinPalette::Wikipedia.palette(),
            BuiltinPalette::Mono.palette(),
            BuiltinPalette::AppleWinNtsc.palette(),
        ];
        let best = best_palette(&metric, &line, &pool).unwrap();
        for p in &pool {
            assert!(best.distance <= line_distance(&metric, &line, p));
        }
        assert_eq!(best.distance, line_distance(&metric, &line, &pool[best.index]));
    }

    #[test]
    fn test_ties_keep_first() {
        let metric = ColorMetric::default();
        let line = [Rgb::new(9, 9, 9)];
        let pool = [solid(Rgb::new(1, 1, 1)), solid(Rgb::new(1, 1, 1))];
        assert_eq!(best_palette(&metric, &line, &pool).unwrap().index, 0);
        assert!(best_palette(&metric, &line, &[]).is_none());
    }

    #[test]
    fn test_hybrid_picks_lower() {
        let metric = ColorMetric::default();
        let red = Rgb::new(200, 0, 0);
        let line = [red; 8];
        let sections = [solid(Rgb::new(0, 0, 200))];
        let own = [solid(red)];
        let pick = best_hybrid(&metric, &line, &sections, &own).unwrap();
        assert_eq!(pick.method, SearchMethod::PerLine);
        assert_eq!(pick.choice.distance, 0.0);

        let pick = best_hybrid(&metric, &line, &own, &sections).unwrap();
        assert_eq!(pick.method, SearchMethod::Sections);
    }
}
