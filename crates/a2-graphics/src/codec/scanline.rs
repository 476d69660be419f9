//! Scanline base address tables.

include!(concat!(env!("OUT_DIR"), "/scanline_tables.rs"));

/// Byte offset of hi-res scanline `y` within an 8 KiB bank.
#[inline]
pub fn hires_offset(y: usize) -> usize {
    HIRES_BASE[y] as usize - 0x2000
}

/// Byte offset of text row `row` within a 1 KiB text page.
#[inline]
pub fn text_offset(row: usize) -> usize {
    TEXT_BASE[row] as usize - 0x400
}
