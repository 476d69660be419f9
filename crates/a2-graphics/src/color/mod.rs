//! Color types and luma weighting
//!
//! Apple II conversion works on plain 8-bit RGB triples. Perceived brightness
//! is computed with one of several broadcast luma standards (or a
//! user-supplied set of weights), and the same weights drive the color
//! distance used for palette matching.
//!
//! # Example
//!
//! ```
//! use a2_graphics::{LumaStandard, Rgb};
//!
//! let luma = LumaStandard::Bt601.coefficients();
//! assert!(luma.luma(Rgb::WHITE) > 0.999);
//! assert_eq!(luma.luma(Rgb::BLACK), 0.0);
//! ```

mod luma;
mod rgb;

pub use luma::{LumaCoefficients, LumaError, LumaStandard};
pub use rgb::Rgb;
