//! Luma-weighted color distance.

use super::Palette;
use crate::color::{LumaCoefficients, Rgb};

/// Weight of the per-channel term relative to the luma term.
const CHANNEL_WEIGHT: f64 = 0.75;

/// Result of a nearest-color search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Nearest {
    /// Palette index of the closest entry
    pub index: u8,
    /// Distance to that entry (0.0 for an exact match)
    pub distance: f64,
}

/// Color distance under a set of luma weights.
///
/// ```text
/// d(a, b) = 0.75 * (wr*dr^2 + wg*dg^2 + wb*db^2) + (luma(a) - luma(b))^2
/// ```
///
/// with channel differences normalized to `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ColorMetric {
    luma: LumaCoefficients,
}

impl ColorMetric {
    pub fn new(luma: LumaCoefficients) -> Self {
        Self { luma }
    }

    #[inline]
    pub fn coefficients(&self) -> LumaCoefficients {
        self.luma
    }

    #[inline]
    pub fn luma(&self, c: Rgb) -> f64 {
        self.luma.luma(c)
    }

    /// Distance between two colors. Symmetric, zero only for equal colors.
    #[inline]
    pub fn distance(&self, a: Rgb, b: Rgb) -> f64 {
        let dr = (a.r as f64 - b.r as f64) / 255.0;
        let dg = (a.g as f64 - b.g as f64) / 255.0;
        let db = (a.b as f64 - b.b as f64) / 255.0;
        let dl = self.luma(a) - self.luma(b);
        CHANNEL_WEIGHT * (self.luma.red * dr * dr + self.luma.green * dg * dg + self.luma.blue * db * db)
            + dl * dl
    }

    /// Closest palette entry to `color`.
    ///
    /// An exact byte match wins outright. Otherwise ties go to the lowest index.
    #[inline]
    pub fn nearest(&self, color: Rgb, palette: &Palette) -> Nearest {
        if let Some(index) = palette.find_exact(color) {
            return Nearest {
                index,
                distance: 0.0,
            };
        }

        let mut best = Nearest {
            index: 0,
            distance: f64::MAX,
        };
        for (i, &entry) in palette.entries().iter().enumerate() {
            let d = self.distance(color, entry);
            if d < best.distance {
                best = Nearest {
                    index: i as u8,
                    distance: d,
                };
            }
        }
        best
    }

    /// Distance from `color` to a specific palette entry, for rescoring a
    /// previously chosen index against a different palette.
    #[inline]
    pub fn distance_to(&self, color: Rgb, palette: &Palette, index: u8) -> f64 {
        self.distance(color, palette.get(index))
    }
}
