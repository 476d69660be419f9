//! Error types for palette operations

use std::fmt;

/// A color string that is not `RGB` or `RRGGBB` hex, with or without `#`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseColorError {
    /// Number of hex digits other than 3 or 6
    Length(usize),
    /// Character that is not a hex digit
    Digit(char),
}

impl fmt::Display for ParseColorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseColorError::Length(n) => write!(f, "{} hex digits, need 3 or 6", n),
            ParseColorError::Digit(c) => write!(f, "'{}' is not a hex digit", c),
        }
    }
}

impl std::error::Error for ParseColorError {}

/// Error type for palette and palette pool construction.
#[derive(Debug, Clone, PartialEq)]
pub enum PaletteError {
    /// More than 16 colors supplied for a single palette
    TooManyColors {
        /// Number of colors supplied
        count: usize,
    },
    /// A palette pool must hold 1, 8, 16 or 200 palettes
    InvalidSetSize {
        /// Number of palettes supplied
        count: usize,
    },
    /// No built-in palette with this name or code
    UnknownPalette(String),
    /// Invalid hex color string
    ParseColor(ParseColorError),
}

impl From<ParseColorError> for PaletteError {
    fn from(err: ParseColorError) -> Self {
        PaletteError::ParseColor(err)
    }
}

impl fmt::Display for PaletteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaletteError::TooManyColors { count } => {
                write!(f, "palette has {} colors, at most 16 allowed", count)
            }
            PaletteError::InvalidSetSize { count } => write!(
                f,
                "palette pool has {} palettes, expected 1, 8, 16 or 200",
                count
            ),
            PaletteError::UnknownPalette(name) => write!(f, "unknown palette '{}'", name),
            PaletteError::ParseColor(err) => write!(f, "invalid color: {}", err),
        }
    }
}

impl std::error::Error for PaletteError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PaletteError::ParseColor(err) => Some(err),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(ParseColorError::Length(4).to_string(), "4 hex digits, need 3 or 6");
        assert_eq!(
            PaletteError::from(ParseColorError::Digit('G')).to_string(),
            "invalid color: 'G' is not a hex digit"
        );
        assert_eq!(
            PaletteError::InvalidSetSize { count: 3 }.to_string(),
            "palette pool has 3 palettes, expected 1, 8, 16 or 200"
        );
    }
}
