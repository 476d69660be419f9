//! Palettes, palette pools and the color distance used to match against them
//!
//! Every Apple II target renders through a 16-entry [`Palette`]. The Super
//! Hi-Res modes additionally carry a pool of palettes ([`PaletteSet`]) from
//! which each scanline picks one.
//!
//! Matching uses [`ColorMetric`]: a luma-weighted RGB distance plus a squared
//! luma difference, with exact byte matches short-circuiting the search.

mod builtin;
mod error;
mod metric;
mod palette;
mod set;

pub use builtin::BuiltinPalette;
pub use error::{PaletteError, ParseColorError};
pub use metric::{ColorMetric, Nearest};
pub use palette::{Palette, PALETTE_SIZE};
pub use set::PaletteSet;
