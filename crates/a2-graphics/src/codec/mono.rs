//! Double hi-res monochrome codec (560×192, 1 bit per pixel).
//!
//! Horizontal position `x` is bit `x % 7` of stream byte `x / 7`. Even stream
//! bytes live in the aux bank and odd ones in main, so the color and mono
//! views share the same memory.

use super::dhgr::{DhgrFramebuffer, DHGR_HEIGHT};
use super::scanline::hires_offset;

pub const MONO_WIDTH: usize = 560;

const SET_MASKS: [u8; 7] = [0x01, 0x02, 0x04, 0x08, 0x10, 0x20, 0x40];
const CLEAR_MASKS: [u8; 7] = [0x7E, 0x7D, 0x7B, 0x77, 0x6F, 0x5F, 0x3F];

impl DhgrFramebuffer {
    fn mono_byte(&mut self, x: usize, y: usize) -> &mut u8 {
        let k = x / 7;
        let offset = hires_offset(y) + k / 2;
        if k % 2 == 0 {
            &mut self.aux[offset]
        } else {
            &mut self.main[offset]
        }
    }

    /// Set (`on`) or clear the mono pixel at (x, y).
    pub fn plot_mono(&mut self, x: usize, y: usize, on: bool) {
        if x >= MONO_WIDTH || y >= DHGR_HEIGHT {
            return;
        }
        let bit = x % 7;
        let byte = self.mono_byte(x, y);
        if on {
            *byte |= SET_MASKS[bit];
        } else {
            *byte &= CLEAR_MASKS[bit];
        }
    }

    /// Read the mono pixel at (x, y).
    pub fn get_mono(&self, x: usize, y: usize) -> Option<bool> {
        if x >= MONO_WIDTH || y >= DHGR_HEIGHT {
            return None;
        }
        let k = x / 7;
        let offset = hires_offset(y) + k / 2;
        let byte = if k % 2 == 0 {
            self.aux[offset]
        } else {
            self.main[offset]
        };
        Some(byte & SET_MASKS[x % 7] != 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mono_bank_layout() {
        let mut fb = DhgrFramebuffer::new();
        fb.plot_mono(0, 0, true);
        fb.plot_mono(7, 0, true);
        fb.plot_mono(20, 0, true);
        assert_eq!(fb.aux()[0], 0x01);
        assert_eq!(fb.main()[0], 0x01);
        assert_eq!(fb.aux()[1], 0x40);
    }

    #[test]
    fn test_clear_keeps_high_bit_clear() {
        let mut fb = DhgrFramebuffer::new();
        for x in 0..7 {
            fb.plot_mono(x, 3, true);
        }
        fb.plot_mono(2, 3, false);
        assert_eq!(fb.aux()[hires_offset(3)], 0x7B);
    }

    #[test]
    fn test_mono_matches_color_view() {
        let mut fb = DhgrFramebuffer::new();
        fb.plot_pixel(0, 0, 15);
        for x in 0..4 {
            assert_eq!(fb.get_mono(x, 0), Some(true));
        }
        assert_eq!(fb.get_mono(4, 0), Some(false));
        assert_eq!(fb.get_mono(560, 0), None);
    }
}
