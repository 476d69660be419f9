//! Error types for the a2-graphics public API.
//!
//! [`ConvertError`] covers everything a conversion can reject.
//! [`FormatError`] covers malformed native files and compressed streams.

use crate::palette::PaletteError;
use std::fmt;

/// Error type for malformed native files and run-length streams.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// File or stream has the wrong size
    WrongLength {
        format: &'static str,
        expected: usize,
        actual: usize,
    },
    /// File header did not match
    BadHeader { format: &'static str },
    /// Data ended early
    Truncated { format: &'static str },
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatError::WrongLength {
                format,
                expected,
                actual,
            } => write!(
                f,
                "{} data is {} bytes, expected {}",
                format, actual, expected
            ),
            FormatError::BadHeader { format } => write!(f, "not a valid {} file", format),
            FormatError::Truncated { format } => write!(f, "{} data is truncated", format),
        }
    }
}

impl std::error::Error for FormatError {}

/// Unified error type for conversions.
///
/// # Example
///
/// ```
/// use a2_graphics::{BuiltinPalette, ConvertError, Converter, Rgb, RgbImage};
///
/// let image = RgbImage::new(10, 10, vec![Rgb::BLACK; 100]).unwrap();
/// let result = Converter::new(BuiltinPalette::Tohgr.palette().into()).dhgr(&image);
/// assert!(matches!(result, Err(ConvertError::UnsupportedDimensions { .. })));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum ConvertError {
    /// Image size does not match the target mode
    UnsupportedDimensions {
        target: &'static str,
        width: usize,
        height: usize,
        expected_width: usize,
        expected_height: usize,
    },
    /// Pixel buffer length does not match width × height
    PixelCount { expected: usize, actual: usize },
    /// Palette or palette pool rejected
    Palette(PaletteError),
    /// Native file could not be decoded
    Format(FormatError),
}

impl fmt::Display for ConvertError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConvertError::UnsupportedDimensions {
                target,
                width,
                height,
                expected_width,
                expected_height,
            } => write!(
                f,
                "{} needs a {}x{} image, got {}x{}",
                target, expected_width, expected_height, width, height
            ),
            ConvertError::PixelCount { expected, actual } => {
                write!(f, "expected {} pixels, got {}", expected, actual)
            }
            ConvertError::Palette(err) => write!(f, "palette error: {}", err),
            ConvertError::Format(err) => write!(f, "format error: {}", err),
        }
    }
}

impl std::error::Error for ConvertError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConvertError::Palette(err) => Some(err),
            ConvertError::Format(err) => Some(err),
            _ => None,
        }
    }
}

impl From<PaletteError> for ConvertError {
    fn from(err: PaletteError) -> Self {
        ConvertError::Palette(err)
    }
}

impl From<FormatError> for ConvertError {
    fn from(err: FormatError) -> Self {
        ConvertError::Format(err)
    }
}
