//! Integer error diffusion against 16-color palettes
//!
//! The [`DitherEngine`] processes an image one scanline at a time, top to
//! bottom and left to right:
//!
//! 1. [`DitherEngine::load_line`] adds the seeded error to the source pixels
//! 2. [`DitherEngine::diffuse`] quantizes each pixel against the active
//!    palette and spreads the error to pixels ahead and to the next two lines
//! 3. [`DitherEngine::quantize`] maps the diffused line to palette indices
//! 4. [`DitherEngine::advance`] rotates the error seed
//!
//! [`DitherEngine::process_line`] runs all four steps. The split lets the
//! palette optimizer pick a palette for the loaded line before it diffuses.
//!
//! The palette is a parameter of every call, so per-scanline palettes need
//! no engine state beyond the error buffers.

mod depth;
mod kernel;
mod options;
mod scanline;

pub use depth::PixelDepth;
pub use kernel::{
    Diffusion, DitherKernel, Kernel, UnknownKernel, ATKINSON, ATKINSON_REDUCED, BUCKELS,
    DEFAULT_BLEED, FLOYD_STEINBERG, MAX_TAPS,
};
pub use options::{DitherOptions, DEFAULT_SEED};
pub use scanline::{ErrorSeed, WorkingScanline};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::color::Rgb;
use crate::palette::{ColorMetric, Palette};

/// Palette indices for one scanline.
pub type QuantizedScanline = Vec<u8>;

/// Map a row straight to nearest palette indices, without diffusion.
///
/// Returns the indices and the summed distance.
pub fn quantize_row(metric: &ColorMetric, row: &[Rgb], palette: &Palette) -> (QuantizedScanline, f64) {
    let mut total = 0.0;
    let indices = row
        .iter()
        .map(|&c| {
            let n = metric.nearest(c, palette);
            total += n.distance;
            n.index
        })
        .collect();
    (indices, total)
}

/// Line-by-line error diffusion engine.
#[derive(Debug)]
pub struct DitherEngine {
    metric: ColorMetric,
    options: DitherOptions,
    line: WorkingScanline,
    seed: ErrorSeed,
    rng: StdRng,
}

impl DitherEngine {
    pub fn new(width: usize, metric: ColorMetric, options: DitherOptions) -> Self {
        Self {
            metric,
            options,
            line: WorkingScanline::new(width),
            seed: ErrorSeed::new(width),
            rng: StdRng::seed_from_u64(options.seed),
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.line.width()
    }

    #[inline]
    pub fn options(&self) -> &DitherOptions {
        &self.options
    }

    /// Load the next source row, adding the error seeded by earlier lines.
    pub fn load_line(&mut self, row: &[Rgb]) {
        self.line.load(row, self.seed.current());
    }

    /// The loaded line as it stands, clamped to displayable colors.
    pub fn working_line(&self) -> Vec<Rgb> {
        self.line.colors()
    }

    /// Quantize left to right against `palette`, diffusing the error.
    ///
    /// Returns the summed nearest-color distance of the line.
    pub fn diffuse(&mut self, palette: &Palette) -> f64 {
        let mut total = 0.0;

        for x in 0..self.width() {
            let color = self.line.color(x);
            self.line.set(x, color);

            let nearest = self.metric.nearest(color, palette);
            total += nearest.distance;
            let chosen = palette.get(nearest.index).to_array();
            let source = color.to_array();
            let error = [0, 1, 2].map(|c| source[c] as i32 - chosen[c] as i32);
            self.spread(x, error);
        }
        total
    }

    /// Spread one pixel's per-channel error over the kernel footprint.
    fn spread(&mut self, x: usize, error: [i32; 3]) {
        let kernel = self.options.kernel.kernel();

        // One residual tap per pixel, shared by all channels
        let residual_tap = if self.options.kernel.random_residual() {
            Some(self.rng.gen_range(0..kernel.entries.len()))
        } else {
            None
        };

        for (c, &error) in error.iter().enumerate() {
            if error == 0 {
                continue;
            }
            let diffusion = kernel.split(error, self.options.bleed, self.options.error_sum);
            for (&(dx, dy, _), &share) in kernel.entries.iter().zip(diffusion.shares()) {
                self.deposit(x, dx, dy, c, share);
            }
            if diffusion.residual != 0 {
                match residual_tap {
                    Some(tap) => {
                        let (dx, dy, _) = kernel.entries[tap];
                        self.deposit(x, dx, dy, c, diffusion.residual);
                    }
                    None => self.deposit(x, 1, 0, c, diffusion.residual),
                }
            }
        }
    }

    fn deposit(&mut self, x: usize, dx: i32, dy: i32, channel: usize, error: i32) {
        let nx = x as i64 + dx as i64;
        if nx < 0 || nx as usize >= self.width() {
            return;
        }
        if dy == 0 {
            self.line.add(nx as usize, channel, error);
        } else {
            self.seed.add(nx as usize, dy as usize, channel, error);
        }
    }

    /// Map the diffused line to palette indices.
    pub fn quantize(&self, palette: &Palette) -> QuantizedScanline {
        (0..self.width())
            .map(|x| self.metric.nearest(self.line.color(x), palette).index)
            .collect()
    }

    /// Move on to the next line.
    pub fn advance(&mut self) {
        self.seed.advance();
    }

    /// Load, diffuse, quantize and advance in one call.
    pub fn process_line(&mut self, row: &[Rgb], palette: &Palette) -> QuantizedScanline {
        self.load_line(row);
        self.diffuse(palette);
        let indices = self.quantize(palette);
        self.advance();
        indices
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::BuiltinPalette;

    fn bw() -> Palette {
        BuiltinPalette::Mono.palette()
    }

    #[test]
    fn test_solid_palette_color_has_no_error() {
        let palette = BuiltinPalette::Tohgr.palette();
        let mut engine = DitherEngine::new(8, ColorMetric::default(), DitherOptions::default());
        let row = vec![palette.get(6); 8];
        for _ in 0..4 {
            assert_eq!(engine.process_line(&row, &palette), vec![6; 8]);
        }
    }

    #[test]
    fn test_grey_dithers_to_mix() {
        let mut engine = DitherEngine::new(16, ColorMetric::default(), DitherOptions::default());
        let row = vec![Rgb::new(128, 128, 128); 16];
        let mut whites = 0;
        for _ in 0..16 {
            whites += engine
                .process_line(&row, &bw())
                .iter()
                .filter(|&&i| i == 1)
                .count();
        }
        // Mid grey should land near half white
        assert!((96..=160).contains(&whites), "whites = {}", whites);
    }

    #[test]
    fn test_forward_error_reaches_next_pixel() {
        let options = DitherOptions::new(DitherKernel::FloydSteinberg).error_sum(false);
        let mut engine = DitherEngine::new(2, ColorMetric::default(), options);
        engine.load_line(&[Rgb::new(100, 100, 100), Rgb::new(100, 100, 100)]);
        engine.diffuse(&bw());
        // First pixel goes black and pushes 7/16 of 100 forward
        assert_eq!(engine.working_line()[1], Rgb::new(143, 143, 143));
    }

    #[test]
    fn test_seeded_error_applies_to_next_line() {
        let options = DitherOptions::new(DitherKernel::Atkinson).error_sum(false);
        let mut engine = DitherEngine::new(3, ColorMetric::default(), options);
        engine.load_line(&[Rgb::new(60, 60, 60), Rgb::BLACK, Rgb::BLACK]);
        engine.diffuse(&bw());
        engine.advance();
        engine.load_line(&[Rgb::BLACK; 3]);
        // 60/6 from the first pixel, plus the small errors of the two
        // pixels it pushed above black
        let line = engine.working_line();
        assert_eq!(line[0], Rgb::new(11, 11, 11));
        assert_eq!(line[1], Rgb::new(12, 12, 12));
    }

    #[test]
    fn test_random_residual_is_reproducible() {
        let options = DitherOptions::new(DitherKernel::Buckels { random: true }).seed(7);
        let row: Vec<Rgb> = (0..32).map(|x| Rgb::new(x * 8, 255 - x * 8, 77)).collect();
        let palette = BuiltinPalette::Kegs32.palette();
        let run = || {
            let mut engine = DitherEngine::new(32, ColorMetric::default(), options);
            (0..6)
                .map(|_| engine.process_line(&row, &palette))
                .collect::<Vec<_>>()
        };
        assert_eq!(run(), run());
    }

    /// Error that `spread` left on the working line and the two seed rows,
    /// per channel, relative to a mid-grey line.
    fn deposited(engine: &mut DitherEngine) -> [i32; 3] {
        let mut total = [0i32; 3];
        for color in engine.working_line() {
            for (c, v) in color.to_array().into_iter().enumerate() {
                total[c] += v as i32 - 128;
            }
        }
        for _ in 0..2 {
            engine.advance();
            for px in engine.seed.current() {
                for c in 0..3 {
                    total[c] += px[c];
                }
            }
        }
        total
    }

    #[test]
    fn test_spread_deposits_shares_and_residual() {
        let grey = vec![Rgb::new(128, 128, 128); 32];
        let error = [100, -73, 41];
        for kernel in [
            DitherKernel::FloydSteinberg,
            DitherKernel::Atkinson,
            DitherKernel::Buckels { random: false },
            DitherKernel::Buckels { random: true },
        ] {
            for seed in 0..16 {
                let options = DitherOptions::new(kernel).seed(seed);
                let mut engine = DitherEngine::new(32, ColorMetric::default(), options);
                engine.load_line(&grey);
                engine.spread(10, error);
                assert_eq!(deposited(&mut engine), error, "{kernel} seed {seed}");
            }
        }
    }

    #[test]
    fn test_spread_reduced_kernel_deposits_six_eighths() {
        let grey = vec![Rgb::new(128, 128, 128); 32];
        let options = DitherOptions::new(DitherKernel::AtkinsonReduced);
        let mut engine = DitherEngine::new(32, ColorMetric::default(), options);
        engine.load_line(&grey);
        engine.spread(10, [100, -73, 41]);
        assert_eq!(deposited(&mut engine), [75, -54, 30]);
    }

    #[test]
    fn test_random_residual_stays_in_footprint() {
        let grey = vec![Rgb::new(128, 128, 128); 32];
        let options = DitherOptions::new(DitherKernel::Buckels { random: true });
        let mut engine = DitherEngine::new(32, ColorMetric::default(), options);
        engine.load_line(&grey);
        for _ in 0..64 {
            engine.spread(10, [1, 1, 1]);
        }
        // Pixels outside x-1..=x+2 never receive anything
        let line = engine.working_line();
        for (x, color) in line.iter().enumerate() {
            if !(11..=12).contains(&x) {
                assert_eq!(*color, Rgb::new(128, 128, 128), "x = {x}");
            }
        }
    }

    #[test]
    fn test_quantize_row_matches_nearest() {
        let metric = ColorMetric::default();
        let palette = BuiltinPalette::Kegs32.palette();
        let row = [palette.get(3), Rgb::new(250, 250, 250)];
        let (indices, total) = quantize_row(&metric, &row, &palette);
        assert_eq!(indices, vec![3, 15]);
        assert!(total > 0.0);
    }
}
