//! Bit depth reduction by pattern replay.
//!
//! A 4-bit color index is replayed through its 28-bit double hi-res pattern
//! and the 4-bit window under the pixel is truncated to the requested number
//! of planes.

use crate::codec::COLOR_PATTERNS;

/// Output bit planes per pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PixelDepth {
    One,
    Two,
    #[default]
    Four,
}

impl PixelDepth {
    pub fn planes(self) -> usize {
        match self {
            PixelDepth::One => 1,
            PixelDepth::Two => 2,
            PixelDepth::Four => 4,
        }
    }

    /// Pattern bits for color `index` at color column `x`, first plane in bit 0.
    pub fn replay(self, index: u8, x: usize) -> u8 {
        let pattern = &COLOR_PATTERNS[(index & 0x0F) as usize];
        let start = (x % 7) * 4;
        (0..self.planes()).fold(0u8, |acc, i| {
            let s = start + i;
            let bit = (pattern[s / 7] >> (s % 7)) & 1;
            acc | (bit << i)
        })
    }

    /// The four mono pixels covered by color column `x`. Each plane bit is
    /// repeated to fill the window.
    pub fn mono_window(self, index: u8, x: usize) -> [bool; 4] {
        let bits = self.replay(index, x);
        let repeat = 4 / self.planes();
        std::array::from_fn(|i| (bits >> (i / repeat)) & 1 != 0)
    }
}
