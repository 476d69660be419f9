//! Lo-res (40×48) and double lo-res (80×48) codecs.
//!
//! Each text-page byte holds two vertically stacked pixels: the low nibble
//! is the upper pixel. Double lo-res interleaves columns between the banks,
//! even columns in aux with their color rotated left by one bit.

use super::scanline::text_offset;

pub const LORES_HEIGHT: usize = 48;
/// Size of one text/lo-res page.
pub const TEXT_PAGE_SIZE: usize = 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoresMode {
    /// 40×48, main memory only
    Single,
    /// 80×48, aux and main
    Double,
}

impl LoresMode {
    pub fn width(self) -> usize {
        match self {
            LoresMode::Single => 40,
            LoresMode::Double => 80,
        }
    }
}

#[inline]
fn rotate_left(nibble: u8) -> u8 {
    ((nibble << 1) | (nibble >> 3)) & 0x0F
}

#[inline]
fn rotate_right(nibble: u8) -> u8 {
    ((nibble >> 1) | (nibble << 3)) & 0x0F
}

/// Lo-res or double lo-res memory image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoresFramebuffer {
    mode: LoresMode,
    aux: Vec<u8>,
    main: Vec<u8>,
}

impl LoresFramebuffer {
    pub fn new(mode: LoresMode) -> Self {
        let aux_len = match mode {
            LoresMode::Single => 0,
            LoresMode::Double => TEXT_PAGE_SIZE,
        };
        Self {
            mode,
            aux: vec![0; aux_len],
            main: vec![0; TEXT_PAGE_SIZE],
        }
    }

    /// Rebuild from file bytes: 1024 bytes for lo-res, 2048 (aux first) for
    /// double lo-res.
    pub fn from_bytes(mode: LoresMode, bytes: &[u8]) -> Option<Self> {
        match (mode, bytes.len()) {
            (LoresMode::Single, TEXT_PAGE_SIZE) => Some(Self {
                mode,
                aux: Vec::new(),
                main: bytes.to_vec(),
            }),
            (LoresMode::Double, n) if n == TEXT_PAGE_SIZE * 2 => Some(Self {
                mode,
                aux: bytes[..TEXT_PAGE_SIZE].to_vec(),
                main: bytes[TEXT_PAGE_SIZE..].to_vec(),
            }),
            _ => None,
        }
    }

    #[inline]
    pub fn mode(&self) -> LoresMode {
        self.mode
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.mode.width()
    }

    /// File image: main page, preceded by the aux page for double lo-res.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.aux.len() + self.main.len());
        out.extend_from_slice(&self.aux);
        out.extend_from_slice(&self.main);
        out
    }

    /// Byte and whether the pixel sits in aux memory.
    fn locate(&self, x: usize, y: usize) -> (usize, bool) {
        let offset = text_offset(y / 2);
        match self.mode {
            LoresMode::Single => (offset + x, false),
            LoresMode::Double => (offset + x / 2, x % 2 == 0),
        }
    }

    pub fn plot_pixel(&mut self, x: usize, y: usize, index: u8) {
        if x >= self.width() || y >= LORES_HEIGHT {
            return;
        }
        let (offset, in_aux) = self.locate(x, y);
        let (byte, nibble) = if in_aux {
            (&mut self.aux[offset], rotate_left(index & 0x0F))
        } else {
            (&mut self.main[offset], index & 0x0F)
        };
        *byte = if y % 2 == 0 {
            (*byte & 0xF0) | nibble
        } else {
            (*byte & 0x0F) | (nibble << 4)
        };
    }

    pub fn get_pixel(&self, x: usize, y: usize) -> Option<u8> {
        if x >= self.width() || y >= LORES_HEIGHT {
            return None;
        }
        let (offset, in_aux) = self.locate(x, y);
        let byte = if in_aux { self.aux[offset] } else { self.main[offset] };
        let nibble = if y % 2 == 0 { byte & 0x0F } else { byte >> 4 };
        Some(if in_aux { rotate_right(nibble) } else { nibble })
    }
}
