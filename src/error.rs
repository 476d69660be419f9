use std::path::PathBuf;

use a2_graphics::{ConvertError, FormatError, LumaError, PaletteError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("PNG decode error: {0}")]
    PngDecode(#[from] png::DecodingError),

    #[error("PNG encode error: {0}")]
    PngEncode(#[from] png::EncodingError),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Luma error: {0}")]
    Luma(#[from] LumaError),

    #[error("Palette error: {0}")]
    Palette(#[from] PaletteError),

    #[error("Unsupported input: {0}")]
    UnsupportedInput(String),

    #[error("Conversion error: {0}")]
    Convert(#[from] ConvertError),
}

impl AppError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        AppError::Io {
            path: path.into(),
            source,
        }
    }
}

impl From<FormatError> for AppError {
    fn from(e: FormatError) -> Self {
        AppError::Convert(ConvertError::Format(e))
    }
}
