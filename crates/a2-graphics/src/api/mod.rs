//! Public API for the a2-graphics crate.
//!
//! This module provides the high-level API: the [`Converter`] builder, its
//! [`ConversionConfig`], and the [`ConvertError`]/[`FormatError`] types.

mod builder;
mod error;

pub use builder::{ConversionConfig, Converter, MonoMethod, ShrConversion};
pub use error::{ConvertError, FormatError};
