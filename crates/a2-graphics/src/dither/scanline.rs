//! Scanline buffers owned by the dither engine.

use crate::color::Rgb;

/// Per-channel signed values for the scanline being dithered.
#[derive(Debug, Clone)]
pub struct WorkingScanline {
    pixels: Vec<[i32; 3]>,
}

impl WorkingScanline {
    pub fn new(width: usize) -> Self {
        Self {
            pixels: vec![[0; 3]; width],
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.pixels.len()
    }

    /// Load source pixels plus any seeded error, clipped to `[0, 255]`.
    ///
    /// Pixels past the end of `row` load as black.
    pub fn load(&mut self, row: &[Rgb], seed: &[[i32; 3]]) {
        for (x, px) in self.pixels.iter_mut().enumerate() {
            let src = row.get(x).copied().unwrap_or_default().to_array();
            let err = seed.get(x).copied().unwrap_or_default();
            for c in 0..3 {
                px[c] = (src[c] as i32 + err[c]).clamp(0, 255);
            }
        }
    }

    /// Add diffused error to a pixel ahead on this line. Out of range is ignored.
    #[inline]
    pub fn add(&mut self, x: usize, channel: usize, error: i32) {
        if let Some(px) = self.pixels.get_mut(x) {
            px[channel] += error;
        }
    }

    /// Current value at `x`, clamped to a displayable color.
    #[inline]
    pub fn color(&self, x: usize) -> Rgb {
        let px = self.pixels[x];
        Rgb::new(
            px[0].clamp(0, 255) as u8,
            px[1].clamp(0, 255) as u8,
            px[2].clamp(0, 255) as u8,
        )
    }

    /// Replace the value at `x`.
    #[inline]
    pub fn set(&mut self, x: usize, color: Rgb) {
        self.pixels[x] = [color.r as i32, color.g as i32, color.b as i32];
    }

    /// Clamped copy of the whole line.
    pub fn colors(&self) -> Vec<Rgb> {
        (0..self.width()).map(|x| self.color(x)).collect()
    }
}

/// Error waiting to be applied to the next lines.
///
/// `rows[0]` seeds the line being dithered, `rows[1]` the next one and
/// `rows[2]` the one after that.
#[derive(Debug, Clone)]
pub struct ErrorSeed {
    rows: [Vec<[i32; 3]>; 3],
    width: usize,
}

impl ErrorSeed {
    pub fn new(width: usize) -> Self {
        Self {
            rows: [
                vec![[0; 3]; width],
                vec![[0; 3]; width],
                vec![[0; 3]; width],
            ],
            width,
        }
    }

    /// Seed for the line about to be loaded.
    #[inline]
    pub fn current(&self) -> &[[i32; 3]] {
        &self.rows[0]
    }

    /// Add error `dy` lines below the current one. Out of range is ignored.
    #[inline]
    pub fn add(&mut self, x: usize, dy: usize, channel: usize, error: i32) {
        if x < self.width && dy < self.rows.len() {
            self.rows[dy][x][channel] += error;
        }
    }

    /// Promote next to current and next-next to next, then clear next-next.
    pub fn advance(&mut self) {
        self.rows.rotate_left(1);
        self.rows[2].fill([0; 3]);
    }
}
