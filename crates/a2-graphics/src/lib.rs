#![allow(clippy::needless_range_loop, clippy::module_inception)]

//! a2-graphics: Apple II graphics conversion
//!
//! This library converts RGB images into the native framebuffer layouts of
//! the Apple II family and encodes them into the file formats those machines
//! load.
//!
//! # Quick Start
//!
//! The [`Converter`] builder is the primary entry point:
//!
//! ```
//! use a2_graphics::{BuiltinPalette, Converter, Rgb, RgbImage};
//!
//! let converter = Converter::new(BuiltinPalette::Kegs32.palette().into());
//! let image = RgbImage::filled(140, 192, Rgb::WHITE);
//! let fb = converter.dhgr(&image).unwrap();
//!
//! assert_eq!(fb.get_pixel(0, 0), Some(15));
//! ```
//!
//! # Targets
//!
//! | Target | Size | Colors | Framebuffer |
//! |--------|------|--------|-------------|
//! | Double hi-res | 140×192 | 16 | [`DhgrFramebuffer`] (aux + main banks) |
//! | Monochrome double hi-res | 560×192 | 2 | [`DhgrFramebuffer`] |
//! | Lo-res / double lo-res | 40×48 / 80×48 | 16 | [`LoresFramebuffer`] |
//! | Super hi-res | 320×200 | 16 per line | [`ShrImage`] |
//!
//! # Color Matching
//!
//! Nearest color uses a luma-weighted squared distance. The weights come
//! from a [`LumaStandard`] or a user-supplied [`LumaCoefficients`]:
//!
//! ```text
//! d = 0.75 * (wr*dr² + wg*dg² + wb*db²) + dl²
//! ```
//!
//! Channels are scaled to 0..1 and `dl` is the luma difference. An exact
//! palette hit always wins with distance zero; ties go to the lowest index.
//!
//! # Error Diffusion
//!
//! [`DitherEngine`] runs one scanline at a time with a three-row error
//! seed. Four kernels are available via [`DitherKernel`]:
//!
//! - Floyd-Steinberg (4 taps, /16)
//! - Atkinson (6 taps, /6, overdriven)
//! - Atkinson reduced (6 taps, /8)
//! - Buckels (6 taps, /8), optionally with the residual placed on a random tap
//!
//! The bleed setting scales every share, and error summing deposits the
//! truncation residual so that the distributed error adds up.
//!
//! # Super Hi-Res Palettes
//!
//! [`PaletteMode`] selects how each scanline gets its palette: one palette,
//! a search over a pool of up to 16, a per-line search over a pool of 200, a
//! population palette per line, or a hybrid that weighs band palettes
//! against the line's own palette and the pool.
//!
//! # File Formats
//!
//! The [`format`] module reads and writes `A2FC`, `AUX`/`BIN` pairs, `DHR`,
//! `DHX`, `PIC`, Brooks and Apple Preferred Format pictures. [`rle`] holds
//! the PackBytes and PCX run-length codecs they use.

pub mod api;
pub mod codec;
pub mod color;
pub mod dither;
pub mod format;
pub mod image;
pub mod optimize;
pub mod output;
pub mod palette;
pub mod rle;

#[cfg(test)]
mod domain_tests;

pub use api::{ConversionConfig, ConvertError, Converter, FormatError, MonoMethod, ShrConversion};
pub use codec::{DhgrFramebuffer, LoresFramebuffer, LoresMode, ShrFramebuffer, ShrImage, ShrPalettes};
pub use color::{LumaCoefficients, LumaError, LumaStandard, Rgb};
pub use dither::{DitherEngine, DitherKernel, DitherOptions, PixelDepth};
pub use image::RgbImage;
pub use optimize::{PaletteMode, PaletteOptimizer, PopulationOptions};
pub use output::QuantizedImage;
pub use palette::{BuiltinPalette, ColorMetric, Palette, PaletteError, PaletteSet, ParseColorError};
