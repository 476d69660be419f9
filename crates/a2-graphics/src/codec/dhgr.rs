//! Double hi-res color codec (140×192, 16 colors).
//!
//! Seven pixels share a 4-byte group laid out as
//! `aux[2g], main[2g], aux[2g+1], main[2g+1]`. Only the low 7 bits of each
//! byte are used, giving a 28-bit stream in which each pixel takes 4 bits.

use super::scanline::hires_offset;

pub const DHGR_WIDTH: usize = 140;
pub const DHGR_HEIGHT: usize = 192;
/// Size of each memory bank.
pub const BANK_SIZE: usize = 8192;

/// Canonical 4-byte pattern for each color, in group byte order.
///
/// Stream bit `s` of color `c` is bit `((s % 4) + 1) % 4` of `c`.
pub const COLOR_PATTERNS: [[u8; 4]; 16] = [
    [0x00, 0x00, 0x00, 0x00],
    [0x08, 0x11, 0x22, 0x44],
    [0x11, 0x22, 0x44, 0x08],
    [0x19, 0x33, 0x66, 0x4C],
    [0x22, 0x44, 0x08, 0x11],
    [0x2A, 0x55, 0x2A, 0x55],
    [0x33, 0x66, 0x4C, 0x19],
    [0x3B, 0x77, 0x6E, 0x5D],
    [0x44, 0x08, 0x11, 0x22],
    [0x4C, 0x19, 0x33, 0x66],
    [0x55, 0x2A, 0x55, 0x2A],
    [0x5D, 0x3B, 0x77, 0x6E],
    [0x66, 0x4C, 0x19, 0x33],
    [0x6E, 0x5D, 0x3B, 0x77],
    [0x77, 0x6E, 0x5D, 0x3B],
    [0x7F, 0x7F, 0x7F, 0x7F],
];

/// (group byte, mask) pairs for each pixel position in a group. A zero mask
/// means the pixel fits in one byte.
const PIXEL_MASKS: [[(usize, u8); 2]; 7] = [
    [(0, 0x0F), (0, 0x00)],
    [(0, 0x70), (1, 0x01)],
    [(1, 0x1E), (1, 0x00)],
    [(1, 0x60), (2, 0x03)],
    [(2, 0x3C), (2, 0x00)],
    [(2, 0x40), (3, 0x07)],
    [(3, 0x78), (3, 0x00)],
];

/// Double hi-res memory image: 8 KiB auxiliary bank plus 8 KiB main bank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DhgrFramebuffer {
    pub(super) aux: Vec<u8>,
    pub(super) main: Vec<u8>,
}

impl Default for DhgrFramebuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl DhgrFramebuffer {
    /// All-black framebuffer.
    pub fn new() -> Self {
        Self {
            aux: vec![0; BANK_SIZE],
            main: vec![0; BANK_SIZE],
        }
    }

    /// Build from the two banks. Returns `None` unless both are 8192 bytes.
    pub fn from_banks(aux: &[u8], main: &[u8]) -> Option<Self> {
        if aux.len() != BANK_SIZE || main.len() != BANK_SIZE {
            return None;
        }
        Some(Self {
            aux: aux.to_vec(),
            main: main.to_vec(),
        })
    }

    /// Build from 16384 bytes, aux bank first. Returns `None` on any other length.
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        if bytes.len() != BANK_SIZE * 2 {
            return None;
        }
        Self::from_banks(&bytes[..BANK_SIZE], &bytes[BANK_SIZE..])
    }

    #[inline]
    pub fn aux(&self) -> &[u8] {
        &self.aux
    }

    #[inline]
    pub fn main(&self) -> &[u8] {
        &self.main
    }

    /// Both banks concatenated, aux first (16384 bytes).
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(BANK_SIZE * 2);
        out.extend_from_slice(&self.aux);
        out.extend_from_slice(&self.main);
        out
    }

    /// The 40 aux bytes and 40 main bytes of scanline `y`.
    pub fn line_banks(&self, y: usize) -> Option<(&[u8], &[u8])> {
        if y >= DHGR_HEIGHT {
            return None;
        }
        let base = hires_offset(y);
        Some((&self.aux[base..base + 40], &self.main[base..base + 40]))
    }

    /// Overwrite scanline `y` from 40 aux and 40 main bytes.
    pub fn set_line_banks(&mut self, y: usize, aux: &[u8], main: &[u8]) {
        if y >= DHGR_HEIGHT || aux.len() != 40 || main.len() != 40 {
            return;
        }
        let base = hires_offset(y);
        self.aux[base..base + 40].copy_from_slice(aux);
        self.main[base..base + 40].copy_from_slice(main);
    }

    /// Mutable byte `j` (0..4) of the 4-byte group `group` on scanline `y`.
    #[inline]
    fn group_byte(&mut self, y: usize, group: usize, j: usize) -> &mut u8 {
        let offset = hires_offset(y) + group * 2 + j / 2;
        if j % 2 == 0 {
            &mut self.aux[offset]
        } else {
            &mut self.main[offset]
        }
    }

    #[inline]
    fn read_group_byte(&self, y: usize, group: usize, j: usize) -> u8 {
        let offset = hires_offset(y) + group * 2 + j / 2;
        if j % 2 == 0 {
            self.aux[offset]
        } else {
            self.main[offset]
        }
    }

    /// Write color `index` (low nibble) at (x, y), preserving neighbors.
    pub fn plot_pixel(&mut self, x: usize, y: usize, index: u8) {
        if x >= DHGR_WIDTH || y >= DHGR_HEIGHT {
            return;
        }
        let pattern = &COLOR_PATTERNS[(index & 0x0F) as usize];
        for &(j, mask) in &PIXEL_MASKS[x % 7] {
            if mask == 0 {
                continue;
            }
            let byte = self.group_byte(y, x / 7, j);
            *byte = (*byte & !mask) | (pattern[j] & mask);
        }
    }

    /// Read the color index at (x, y).
    pub fn get_pixel(&self, x: usize, y: usize) -> Option<u8> {
        if x >= DHGR_WIDTH || y >= DHGR_HEIGHT {
            return None;
        }
        let masks = PIXEL_MASKS[x % 7];
        let bits: [(usize, u8, u8); 2] = masks.map(|(j, mask)| {
            (j, mask, self.read_group_byte(y, x / 7, j) & mask)
        });
        COLOR_PATTERNS
            .iter()
            .position(|pattern| {
                bits.iter()
                    .all(|&(j, mask, value)| pattern[j] & mask == value)
            })
            .map(|i| i as u8)
    }
}
