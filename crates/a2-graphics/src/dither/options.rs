//! Dithering options and configuration.

use super::kernel::{DitherKernel, DEFAULT_BLEED};

/// Seed used for random residual placement unless one is given.
pub const DEFAULT_SEED: u64 = 0x00A2_1986;

/// Configuration for error diffusion.
///
/// # Example
///
/// ```
/// use a2_graphics::{DitherKernel, DitherOptions};
///
/// let options = DitherOptions::new(DitherKernel::FloydSteinberg)
///     .bleed_percent(50)
///     .error_sum(false);
/// assert_eq!(options.bleed, 16);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DitherOptions {
    /// Diffusion kernel.
    pub kernel: DitherKernel,

    /// Bleed divisor scale. Larger values carry less error forward; 8
    /// carries all of it and is the minimum.
    ///
    /// Default: `8`
    pub bleed: u16,

    /// Deposit the truncation residual instead of dropping it.
    ///
    /// Default: `true`
    pub error_sum: bool,

    /// Seed for random residual placement.
    pub seed: u64,
}

impl Default for DitherOptions {
    fn default() -> Self {
        Self::new(DitherKernel::default())
    }
}

impl DitherOptions {
    pub fn new(kernel: DitherKernel) -> Self {
        Self {
            kernel,
            bleed: DEFAULT_BLEED,
            error_sum: true,
            seed: DEFAULT_SEED,
        }
    }

    /// Set the raw bleed value (at least 8).
    pub fn bleed(mut self, bleed: u16) -> Self {
        self.bleed = bleed.max(DEFAULT_BLEED);
        self
    }

    /// Set the share of quantization error carried forward, in percent,
    /// clamped to 1..=100.
    ///
    /// 100% keeps the default bleed of 8, 50% doubles it.
    pub fn bleed_percent(mut self, percent: u16) -> Self {
        let percent = percent.clamp(1, 100) as u32;
        let scaled = (DEFAULT_BLEED as u32 * 100 + percent / 2) / percent;
        self.bleed = scaled as u16;
        self
    }

    pub fn error_sum(mut self, enabled: bool) -> Self {
        self.error_sum = enabled;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}
