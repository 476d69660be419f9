//! Luma standards and user-supplied luma weights.

use std::fmt;
use std::str::FromStr;

use super::Rgb;

/// Smallest accepted weight in a luma override.
pub const MIN_WEIGHT: f64 = 0.001;
/// Largest accepted weight in a luma override.
pub const MAX_WEIGHT: f64 = 0.999;

/// Broadcast luma standards.
///
/// `Bt601` is the default. Unknown standard names fall back to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LumaStandard {
    /// ITU-R BT.601 (0.299, 0.587, 0.114)
    #[default]
    Bt601,
    /// ITU-R BT.709 (0.2126, 0.7152, 0.0722)
    Bt709,
    /// SMPTE 240M (0.212, 0.701, 0.087)
    Smpte240m,
    /// sRGB / GIMP weights (0.2225, 0.7169, 0.0606)
    Srgb,
    /// ITU-R BT.2020 (0.2627, 0.678, 0.0593)
    Bt2020,
    /// Rounded NTSC weights (0.30, 0.59, 0.11)
    Legacy,
}

impl LumaStandard {
    /// Weights for this standard.
    pub fn coefficients(self) -> LumaCoefficients {
        let (red, green, blue) = match self {
            LumaStandard::Bt601 => (0.299, 0.587, 0.114),
            LumaStandard::Bt709 => (0.2126, 0.7152, 0.0722),
            LumaStandard::Smpte240m => (0.212, 0.701, 0.087),
            LumaStandard::Srgb => (0.2225, 0.7169, 0.0606),
            LumaStandard::Bt2020 => (0.2627, 0.678, 0.0593),
            LumaStandard::Legacy => (0.30, 0.59, 0.11),
        };
        LumaCoefficients { red, green, blue }
    }

    /// Map a numeric standard code (`601`, `709`, `240`, `911`, `2020`, `411`).
    ///
    /// Unrecognized codes yield BT.601.
    pub fn from_code(code: u32) -> Self {
        match code {
            709 => LumaStandard::Bt709,
            240 => LumaStandard::Smpte240m,
            911 => LumaStandard::Srgb,
            2020 => LumaStandard::Bt2020,
            411 => LumaStandard::Legacy,
            _ => LumaStandard::Bt601,
        }
    }
}

impl FromStr for LumaStandard {
    type Err = LumaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        let name = name.strip_prefix("bt").unwrap_or(&name);
        match name {
            "601" => Ok(LumaStandard::Bt601),
            "709" => Ok(LumaStandard::Bt709),
            "240" | "240m" | "smpte240m" | "smpte" => Ok(LumaStandard::Smpte240m),
            "911" | "srgb" | "gimp" => Ok(LumaStandard::Srgb),
            "2020" => Ok(LumaStandard::Bt2020),
            "411" | "legacy" | "ntsc" => Ok(LumaStandard::Legacy),
            _ => Err(LumaError::UnknownStandard(s.trim().to_string())),
        }
    }
}

/// Per-channel luma weights, each a fraction of 1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LumaCoefficients {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
}

impl Default for LumaCoefficients {
    fn default() -> Self {
        LumaStandard::default().coefficients()
    }
}

impl LumaCoefficients {
    /// Build custom weights, validating each one.
    pub fn new(red: f64, green: f64, blue: f64) -> Result<Self, LumaError> {
        for (channel, value) in [("red", red), ("green", green), ("blue", blue)] {
            if !(MIN_WEIGHT..=MAX_WEIGHT).contains(&value) {
                return Err(LumaError::OutOfRange { channel, value });
            }
        }
        Ok(Self { red, green, blue })
    }

    /// Parse a luma override: three lines holding the red, green and blue
    /// weights in that order.
    ///
    /// Blank lines are skipped. Anything after the third weight is ignored.
    pub fn parse(text: &str) -> Result<Self, LumaError> {
        let mut lines = text.lines().map(str::trim).filter(|l| !l.is_empty());
        let mut weights = [0.0f64; 3];
        for (line, weight) in weights.iter_mut().enumerate() {
            let raw = lines.next().ok_or(LumaError::MissingLine { line: line + 1 })?;
            *weight = raw.parse().map_err(|_| LumaError::Parse {
                line: line + 1,
                value: raw.to_string(),
            })?;
        }
        Self::new(weights[0], weights[1], weights[2])
    }

    /// Luma of a color in `[0, 1]`.
    #[inline]
    pub fn luma(&self, c: Rgb) -> f64 {
        (c.r as f64 * self.red + c.g as f64 * self.green + c.b as f64 * self.blue) / 255.0
    }
}

/// Error type for luma configuration.
#[derive(Debug, Clone, PartialEq)]
pub enum LumaError {
    /// A standard name was not recognized
    UnknownStandard(String),
    /// The override file ended before the given (1-based) weight line
    MissingLine { line: usize },
    /// A weight line was not a number
    Parse { line: usize, value: String },
    /// A weight fell outside `[0.001, 0.999]`
    OutOfRange { channel: &'static str, value: f64 },
}

impl fmt::Display for LumaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LumaError::UnknownStandard(name) => write!(f, "unknown luma standard '{}'", name),
            LumaError::MissingLine { line } => {
                write!(f, "luma override is missing weight on line {}", line)
            }
            LumaError::Parse { line, value } => {
                write!(f, "invalid luma weight '{}' on line {}", value, line)
            }
            LumaError::OutOfRange { channel, value } => write!(
                f,
                "{} luma weight {} outside [{}, {}]",
                channel, value, MIN_WEIGHT, MAX_WEIGHT
            ),
        }
    }
}

impl std::error::Error for LumaError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_bt601() {
        let luma = LumaCoefficients::default();
        assert_eq!(luma, LumaStandard::Bt601.coefficients());
        assert_eq!(LumaStandard::from_code(12345), LumaStandard::Bt601);
    }

    #[test]
    fn test_luma_white_is_one() {
        for std in [
            LumaStandard::Bt601,
            LumaStandard::Bt709,
            LumaStandard::Smpte240m,
            LumaStandard::Legacy,
        ] {
            let l = std.coefficients().luma(Rgb::WHITE);
            assert!((l - 1.0).abs() < 1e-3, "{:?} gave {}", std, l);
        }
    }

    #[test]
    fn test_parse_override() {
        let luma = LumaCoefficients::parse("0.3\n\n0.59\n0.11\n").unwrap();
        assert_eq!(luma.green, 0.59);
    }

    #[test]
    fn test_parse_override_errors() {
        assert_eq!(
            LumaCoefficients::parse("0.3\n0.59\n"),
            Err(LumaError::MissingLine { line: 3 })
        );
        assert!(matches!(
            LumaCoefficients::parse("0.3\nabc\n0.1"),
            Err(LumaError::Parse { line: 2, .. })
        ));
        assert!(matches!(
            LumaCoefficients::parse("1.0\n0.5\n0.1"),
            Err(LumaError::OutOfRange { channel: "red", .. })
        ));
        assert!(matches!(
            LumaCoefficients::parse("0.3\n0.5\n0.0005"),
            Err(LumaError::OutOfRange { channel: "blue", .. })
        ));
    }

    #[test]
    fn test_standard_names() {
        assert_eq!("BT709".parse::<LumaStandard>().unwrap(), LumaStandard::Bt709);
        assert_eq!("srgb".parse::<LumaStandard>().unwrap(), LumaStandard::Srgb);
        assert!("bt999".parse::<LumaStandard>().is_err());
    }
}
