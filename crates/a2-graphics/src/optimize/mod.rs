//! Palette selection for super hi-res conversion
//!
//! The [`PaletteOptimizer`] hands the dither engine the palette to use for
//! each scanline. How it picks depends on [`PaletteMode`]:
//!
//! - `Single`: the first pool palette for every line
//! - `Sectioned(n)`: the best of the first `n` pool palettes per line
//! - `PerScanline`: the best of the whole pool per line
//! - `Population`: a palette built from each line's own colors
//! - `Hybrid`: the better of 16 band palettes and a per-line search over the
//!   line's own palette and the whole pool
//!
//! Best means lowest summed nearest-color distance over the line.

mod population;
mod search;
mod verbatim;

pub use population::{band_palettes, population_palette, PopulationOptions};
pub use search::{best_hybrid, best_palette, line_distance, HybridChoice, PaletteChoice, SearchMethod};
pub use verbatim::{build_verbatim_palette, map_exact, verbatim_line};

use crate::color::Rgb;
use crate::palette::{ColorMetric, Palette, PaletteSet};

/// Number of band palettes a hybrid search uses.
pub const HYBRID_SECTIONS: usize = 16;

/// How scanline palettes are chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaletteMode {
    #[default]
    Single,
    Sectioned(usize),
    PerScanline,
    Population(PopulationOptions),
    Hybrid(PopulationOptions),
}

impl PaletteMode {
    /// Whether the result needs one palette per line (Brooks layout).
    pub fn is_per_line(&self) -> bool {
        matches!(
            self,
            PaletteMode::PerScanline | PaletteMode::Population(_) | PaletteMode::Hybrid(_)
        )
    }
}

/// Where a line's palette came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaletteSlot {
    /// Index into the caller's pool
    Pool(usize),
    /// Index into the band palettes of a hybrid search
    Section(usize),
    /// Built from the line itself
    Line,
}

/// The palette picked for one scanline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineChoice {
    pub palette: Palette,
    pub slot: PaletteSlot,
    /// Hybrid search side that won; `None` outside hybrid mode
    pub method: Option<SearchMethod>,
    /// Summed distance of the line against `palette`
    pub distance: f64,
}

/// Chooses the active palette for each scanline.
#[derive(Debug, Clone)]
pub struct PaletteOptimizer {
    metric: ColorMetric,
    mode: PaletteMode,
    pool: PaletteSet,
    sections: Option<PaletteSet>,
}

impl PaletteOptimizer {
    /// `rows` is the whole source image. It is only read for hybrid mode,
    /// which derives its band palettes up front.
    pub fn new(metric: ColorMetric, mode: PaletteMode, pool: PaletteSet, rows: &[&[Rgb]]) -> Self {
        let sections = match mode {
            PaletteMode::Hybrid(options) => {
                Some(band_palettes(&metric, rows, HYBRID_SECTIONS, options))
            }
            _ => None,
        };
        Self {
            metric,
            mode,
            pool,
            sections,
        }
    }

    #[inline]
    pub fn mode(&self) -> PaletteMode {
        self.mode
    }

    #[inline]
    pub fn pool(&self) -> &PaletteSet {
        &self.pool
    }

    /// Pick the palette for a line.
    ///
    /// `search_line` is what gets scored (the line with seeded error when
    /// dithering). `source_line` is what per-line palettes are built from.
    pub fn select(&self, search_line: &[Rgb], source_line: &[Rgb]) -> LineChoice {
        let pool = self.pool.as_slice();
        match self.mode {
            PaletteMode::Single => self.from_pool(search_line, &pool[..1]),
            PaletteMode::Sectioned(n) => {
                let n = n.clamp(1, pool.len().min(16));
                self.from_pool(search_line, &pool[..n])
            }
            PaletteMode::PerScanline => self.from_pool(search_line, pool),
            PaletteMode::Population(options) => {
                let palette = population_palette(&self.metric, source_line, options);
                LineChoice {
                    palette,
                    slot: PaletteSlot::Line,
                    method: None,
                    distance: line_distance(&self.metric, search_line, &palette),
                }
            }
            PaletteMode::Hybrid(options) => {
                // Per-line side: the line's own palette first, then the pool
                let mut per_line = Vec::with_capacity(pool.len() + 1);
                per_line.push(population_palette(&self.metric, source_line, options));
                per_line.extend_from_slice(pool);

                let sections = self.sections.as_ref().map(PaletteSet::as_slice).unwrap_or_default();
                match best_hybrid(&self.metric, search_line, sections, &per_line) {
                    Some(HybridChoice {
                        method: SearchMethod::Sections,
                        choice,
                    }) => LineChoice {
                        palette: sections[choice.index],
                        slot: PaletteSlot::Section(choice.index),
                        method: Some(SearchMethod::Sections),
                        distance: choice.distance,
                    },
                    Some(HybridChoice { choice, .. }) => LineChoice {
                        palette: per_line[choice.index],
                        slot: match choice.index {
                            0 => PaletteSlot::Line,
                            i => PaletteSlot::Pool(i - 1),
                        },
                        method: Some(SearchMethod::PerLine),
                        distance: choice.distance,
                    },
                    None => LineChoice {
                        palette: per_line[0],
                        slot: PaletteSlot::Line,
                        method: Some(SearchMethod::PerLine),
                        distance: f64::MAX,
                    },
                }
            }
        }
    }

    fn from_pool(&self, line: &[Rgb], candidates: &[Palette]) -> LineChoice {
        let choice = best_palette(&self.metric, line, candidates).unwrap_or(PaletteChoice {
            index: 0,
            distance: f64::MAX,
        });
        LineChoice {
            palette: candidates.get(choice.index).copied().unwrap_or_default(),
            slot: PaletteSlot::Pool(choice.index),
            method: None,
            distance: choice.distance,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(c: Rgb) -> Palette {
        Palette::new(&[c]).unwrap()
    }

    fn pool() -> PaletteSet {
        let colors = [
            Rgb::new(255, 0, 0),
            Rgb::new(0, 255, 0),
            Rgb::new(0, 0, 255),
            Rgb::new(255, 255, 0),
            Rgb::new(0, 255, 255),
            Rgb::new(255, 0, 255),
            Rgb::new(128, 128, 128),
            Rgb::new(255, 255, 255),
        ];
        PaletteSet::new(colors.iter().map(|&c| solid(c)).collect()).unwrap()
    }

    #[test]
    fn test_single_always_first() {
        let opt = PaletteOptimizer::new(ColorMetric::default(), PaletteMode::Single, pool(), &[]);
        let line = [Rgb::new(0, 0, 255); 4];
        assert_eq!(opt.select(&line, &line).slot, PaletteSlot::Pool(0));
    }

    #[test]
    fn test_sectioned_limits_search() {
        let line = [Rgb::new(255, 255, 255); 4];
        let opt = PaletteOptimizer::new(ColorMetric::default(), PaletteMode::Sectioned(2), pool(), &[]);
        assert!(matches!(opt.select(&line, &line).slot, PaletteSlot::Pool(0 | 1)));
        let opt = PaletteOptimizer::new(ColorMetric::default(), PaletteMode::PerScanline, pool(), &[]);
        assert_eq!(opt.select(&line, &line).slot, PaletteSlot::Pool(7));
    }

    #[test]
    fn test_population_builds_from_source() {
        let opt = PaletteOptimizer::new(
            ColorMetric::default(),
            PaletteMode::Population(PopulationOptions::default()),
            pool(),
            &[],
        );
        let line = [Rgb::new(0x44, 0x88, 0xCC); 4];
        let choice = opt.select(&line, &line);
        assert_eq!(choice.slot, PaletteSlot::Line);
        assert_eq!(choice.distance, 0.0);
    }

    #[test]
    fn test_hybrid_prefers_sections_when_equal() {
        let line = vec![Rgb::new(0x44, 0x88, 0xCC); 4];
        let rows: Vec<&[Rgb]> = vec![&line[..]; 16];
        let opt = PaletteOptimizer::new(
            ColorMetric::default(),
            PaletteMode::Hybrid(PopulationOptions::default()),
            pool(),
            &rows,
        );
        let choice = opt.select(&line, &line);
        assert_eq!(choice.slot, PaletteSlot::Section(0));
        assert_eq!(choice.method, Some(SearchMethod::Sections));
    }

    #[test]
    fn test_hybrid_searches_pool_per_line() {
        // Sections are built from dark red rows, so they hold no magenta
        let dark = vec![Rgb::new(90, 0, 0); 4];
        let rows: Vec<&[Rgb]> = vec![&dark[..]; 16];
        let opt = PaletteOptimizer::new(
            ColorMetric::default(),
            PaletteMode::Hybrid(PopulationOptions::default()),
            pool(),
            &rows,
        );

        // The line's own palette is built from a different source line, so
        // only the pool's magenta matches the searched line exactly
        let search = [Rgb::new(255, 0, 255); 4];
        let source = [Rgb::new(0, 0, 80); 4];
        let choice = opt.select(&search, &source);
        assert_eq!(choice.slot, PaletteSlot::Pool(5));
        assert_eq!(choice.method, Some(SearchMethod::PerLine));
        assert_eq!(choice.distance, 0.0);
        assert_eq!(choice.palette, pool().as_slice()[5]);
    }

    #[test]
    fn test_hybrid_own_palette_beats_pool() {
        let dark = vec![Rgb::new(90, 0, 0); 4];
        let rows: Vec<&[Rgb]> = vec![&dark[..]; 16];
        let opt = PaletteOptimizer::new(
            ColorMetric::default(),
            PaletteMode::Hybrid(PopulationOptions::default()),
            pool(),
            &rows,
        );
        let line = [Rgb::new(0x12, 0x34, 0x56); 4];
        let choice = opt.select(&line, &line);
        assert_eq!(choice.slot, PaletteSlot::Line);
        assert_eq!(choice.method, Some(SearchMethod::PerLine));
    }
}
