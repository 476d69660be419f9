//! Error diffusion kernel definitions.
//!
//! Kernels are integer weight tables. Each tap receives
//! `error * weight * 8 / (divisor * bleed)`, truncated toward zero, so the
//! default bleed of 8 leaves the plain `weight / divisor` split. Bleed never
//! drops below 8: a kernel carries at most the full error forward.

use std::fmt;
use std::str::FromStr;

/// Largest number of taps any kernel uses.
pub const MAX_TAPS: usize = 6;

/// Bleed value that leaves kernel weights unscaled. Also the minimum.
pub const DEFAULT_BLEED: u16 = 8;

/// An error diffusion kernel.
#[derive(Debug, Clone, Copy)]
pub struct Kernel {
    /// (dx, dy, weight) entries. `dy` is 0, 1 or 2.
    pub entries: &'static [(i32, i32, i32)],

    /// Divisor for the weights.
    pub divisor: i32,
}

/// Floyd-Steinberg dithering kernel.
///
/// ```text
///        X   7
///    3   5   1
/// ```
pub const FLOYD_STEINBERG: Kernel = Kernel {
    entries: &[
        (1, 0, 7),  // right
        (-1, 1, 3), // bottom-left
        (0, 1, 5),  // bottom
        (1, 1, 1),  // bottom-right
    ],
    divisor: 16,
};

/// Atkinson kernel with full propagation (6/6).
///
/// ```text
///        X   1   1
///    1   1   1
///        1
/// ```
pub const ATKINSON: Kernel = Kernel {
    entries: &[
        (1, 0, 1),
        (2, 0, 1),
        (-1, 1, 1),
        (0, 1, 1),
        (1, 1, 1),
        (0, 2, 1),
    ],
    divisor: 6,
};

/// Atkinson kernel as Bill Atkinson wrote it: 6/8 of the error propagates.
pub const ATKINSON_REDUCED: Kernel = Kernel {
    entries: ATKINSON.entries,
    divisor: 8,
};

/// Buckels kernel: Atkinson's footprint, weighted to carry the full error.
///
/// ```text
///        X   2   1
///    1   2   1
///        1
/// ```
pub const BUCKELS: Kernel = Kernel {
    entries: &[
        (1, 0, 2),
        (2, 0, 1),
        (-1, 1, 1),
        (0, 1, 2),
        (1, 1, 1),
        (0, 2, 1),
    ],
    divisor: 8,
};

/// Error split for one channel of one pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Diffusion {
    /// Share per kernel tap, in `Kernel::entries` order
    pub shares: [i32; MAX_TAPS],
    /// Number of valid entries in `shares`
    pub len: usize,
    /// Truncation residual: exact total minus the sum of shares
    pub residual: i32,
}

impl Diffusion {
    pub fn shares(&self) -> &[i32] {
        &self.shares[..self.len]
    }
}

impl Kernel {
    /// Sum of all tap weights.
    pub fn weight_sum(&self) -> i32 {
        self.entries.iter().map(|&(_, _, w)| w).sum()
    }

    /// Split `error` across the taps.
    ///
    /// When `error_sum` is set, the residual is the difference between the
    /// exact total (`error * weight_sum * 8 / (divisor * bleed)`) and the sum of
    /// the truncated shares. Otherwise the residual is zero and the truncated
    /// remainder is lost.
    pub fn split(&self, error: i32, bleed: u16, error_sum: bool) -> Diffusion {
        let denom = (self.divisor as i64) * (bleed.max(DEFAULT_BLEED) as i64);
        let mut shares = [0i32; MAX_TAPS];
        let mut spread = 0i64;
        for (slot, &(_, _, w)) in shares.iter_mut().zip(self.entries) {
            let share = (error as i64 * w as i64 * 8) / denom;
            *slot = share as i32;
            spread += share;
        }
        let residual = if error_sum {
            let total = (error as i64 * self.weight_sum() as i64 * 8) / denom;
            (total - spread) as i32
        } else {
            0
        };
        Diffusion {
            shares,
            len: self.entries.len(),
            residual,
        }
    }
}

/// Selectable kernels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DitherKernel {
    FloydSteinberg,
    Atkinson,
    AtkinsonReduced,
    /// Buckels kernel. With `random` set the truncation residual lands on a
    /// randomly chosen tap instead of the next pixel.
    Buckels { random: bool },
}

impl Default for DitherKernel {
    fn default() -> Self {
        DitherKernel::Buckels { random: false }
    }
}

impl DitherKernel {
    pub fn kernel(&self) -> &'static Kernel {
        match self {
            DitherKernel::FloydSteinberg => &FLOYD_STEINBERG,
            DitherKernel::Atkinson => &ATKINSON,
            DitherKernel::AtkinsonReduced => &ATKINSON_REDUCED,
            DitherKernel::Buckels { .. } => &BUCKELS,
        }
    }

    pub fn random_residual(&self) -> bool {
        matches!(self, DitherKernel::Buckels { random: true })
    }

    pub fn name(&self) -> &'static str {
        match self {
            DitherKernel::FloydSteinberg => "floyd-steinberg",
            DitherKernel::Atkinson => "atkinson",
            DitherKernel::AtkinsonReduced => "atkinson-reduced",
            DitherKernel::Buckels { random: false } => "buckels",
            DitherKernel::Buckels { random: true } => "buckels-random",
        }
    }
}

impl fmt::Display for DitherKernel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned for an unknown kernel name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownKernel(pub String);

impl fmt::Display for UnknownKernel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown dither kernel '{}'", self.0)
    }
}

impl std::error::Error for UnknownKernel {}

impl FromStr for DitherKernel {
    type Err = UnknownKernel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "floyd-steinberg" | "floyd" | "fs" => Ok(DitherKernel::FloydSteinberg),
            "atkinson" => Ok(DitherKernel::Atkinson),
            "atkinson-reduced" | "atkinson2" => Ok(DitherKernel::AtkinsonReduced),
            "buckels" => Ok(DitherKernel::Buckels { random: false }),
            "buckels-random" | "random" => Ok(DitherKernel::Buckels { random: true }),
            _ => Err(UnknownKernel(s.to_string())),
        }
    }
}
