//! Native Apple II framebuffers
//!
//! Each framebuffer owns its memory image and exposes only coordinate-based
//! access: `plot_pixel` writes (out-of-range writes are ignored) and
//! `get_pixel` reads (out-of-range reads return `None`). Address
//! scrambling stays inside this module.
//!
//! - [`DhgrFramebuffer`]: double hi-res, 140×192 color or 560×192 mono,
//!   split across 8 KiB auxiliary and main banks
//! - [`LoresFramebuffer`]: lo-res 40×48 and double lo-res 80×48
//! - [`ShrFramebuffer`]: super hi-res 320×200 packed nibbles, paired with
//!   per-line palettes in [`ShrImage`]

mod dhgr;
mod lores;
mod mono;
mod scanline;
mod shr;

pub use dhgr::{DhgrFramebuffer, BANK_SIZE, COLOR_PATTERNS, DHGR_HEIGHT, DHGR_WIDTH};
pub use lores::{LoresFramebuffer, LoresMode, LORES_HEIGHT, TEXT_PAGE_SIZE};
pub use mono::MONO_WIDTH;
pub use scanline::{hires_offset, text_offset};
pub use shr::{
    ShrFramebuffer, ShrImage, ShrPalettes, SHR_BYTES_PER_LINE, SHR_HEIGHT, SHR_PIXEL_BYTES,
    SHR_WIDTH,
};
