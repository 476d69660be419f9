//! Built-in Apple II palettes, all in lo-res color order.

use std::fmt;
use std::str::FromStr;

use super::{Palette, PaletteError};
use crate::color::Rgb;

const fn pal(c: [(u8, u8, u8); 16]) -> Palette {
    let mut entries = [Rgb::BLACK; 16];
    let mut i = 0;
    while i < 16 {
        entries[i] = Rgb::new(c[i].0, c[i].1, c[i].2);
        i += 1;
    }
    Palette::from_array(entries)
}

const KEGS32: Palette = pal([
    (0, 0, 0),
    (221, 0, 51),
    (0, 0, 153),
    (221, 34, 221),
    (0, 119, 34),
    (85, 85, 85),
    (34, 34, 255),
    (102, 170, 255),
    (136, 85, 0),
    (255, 102, 0),
    (170, 170, 170),
    (255, 153, 136),
    (17, 221, 0),
    (255, 255, 0),
    (68, 255, 153),
    (255, 255, 255),
]);

const CIDERPRESS: Palette = pal([
    (0, 0, 0),
    (221, 0, 51),
    (0, 0, 153),
    (221, 0, 221),
    (0, 119, 0),
    (85, 85, 85),
    (34, 34, 255),
    (102, 170, 255),
    (136, 85, 34),
    (255, 102, 0),
    (170, 170, 170),
    (255, 153, 136),
    (0, 221, 0),
    (255, 255, 0),
    (0, 255, 153),
    (255, 255, 255),
]);

const APPLEWIN_OLD: Palette = pal([
    (0, 0, 0),
    (208, 0, 48),
    (0, 0, 128),
    (255, 0, 255),
    (0, 128, 0),
    (128, 128, 128),
    (0, 0, 255),
    (96, 160, 255),
    (128, 80, 0),
    (255, 128, 0),
    (192, 192, 192),
    (255, 144, 128),
    (0, 255, 0),
    (255, 255, 0),
    (64, 255, 144),
    (255, 255, 255),
]);

const APPLEWIN_NTSC: Palette = pal([
    (0, 0, 0),
    (157, 9, 102),
    (42, 42, 229),
    (199, 52, 255),
    (0, 118, 26),
    (128, 128, 128),
    (13, 161, 255),
    (170, 170, 255),
    (85, 85, 0),
    (242, 94, 0),
    (192, 192, 192),
    (255, 137, 229),
    (56, 203, 0),
    (213, 213, 26),
    (98, 246, 153),
    (255, 255, 255),
]);

const WIKIPEDIA: Palette = pal([
    (0, 0, 0),
    (227, 30, 96),
    (96, 78, 189),
    (255, 68, 253),
    (0, 163, 96),
    (156, 156, 156),
    (20, 207, 253),
    (208, 195, 255),
    (96, 114, 3),
    (255, 106, 60),
    (156, 156, 156),
    (255, 160, 208),
    (20, 245, 60),
    (208, 221, 141),
    (114, 255, 208),
    (255, 255, 255),
]);

const TOHGR: Palette = pal([
    (0, 0, 0),
    (148, 12, 125),
    (32, 54, 212),
    (188, 55, 255),
    (51, 111, 0),
    (126, 126, 126),
    (7, 168, 225),
    (158, 172, 255),
    (99, 77, 0),
    (249, 86, 29),
    (126, 126, 126),
    (255, 129, 236),
    (67, 200, 0),
    (221, 206, 23),
    (93, 247, 132),
    (255, 255, 255),
]);

/// Black and white in slots 0 and 1, the rest padding.
const MONO: Palette = pal([
    (0, 0, 0),
    (255, 255, 255),
    (0, 0, 0),
    (0, 0, 0),
    (0, 0, 0),
    (0, 0, 0),
    (0, 0, 0),
    (0, 0, 0),
    (0, 0, 0),
    (0, 0, 0),
    (0, 0, 0),
    (0, 0, 0),
    (0, 0, 0),
    (0, 0, 0),
    (0, 0, 0),
    (0, 0, 0),
]);

/// Emulator and reference palettes for the 16 lo-res/double hi-res colors.
///
/// Numeric codes 0..=5 follow the order of the variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BuiltinPalette {
    Kegs32,
    CiderPress,
    AppleWinOld,
    AppleWinNtsc,
    Wikipedia,
    #[default]
    Tohgr,
    /// Black/white palette used for monochrome output
    Mono,
}

impl BuiltinPalette {
    /// All color palettes, in code order.
    pub const ALL: [BuiltinPalette; 6] = [
        BuiltinPalette::Kegs32,
        BuiltinPalette::CiderPress,
        BuiltinPalette::AppleWinOld,
        BuiltinPalette::AppleWinNtsc,
        BuiltinPalette::Wikipedia,
        BuiltinPalette::Tohgr,
    ];

    pub fn palette(self) -> Palette {
        match self {
            BuiltinPalette::Kegs32 => KEGS32,
            BuiltinPalette::CiderPress => CIDERPRESS,
            BuiltinPalette::AppleWinOld => APPLEWIN_OLD,
            BuiltinPalette::AppleWinNtsc => APPLEWIN_NTSC,
            BuiltinPalette::Wikipedia => WIKIPEDIA,
            BuiltinPalette::Tohgr => TOHGR,
            BuiltinPalette::Mono => MONO,
        }
    }

    /// Palette for a numeric code. Codes past the table yield `None`.
    pub fn from_code(code: usize) -> Option<Self> {
        Self::ALL.get(code).copied()
    }

    pub fn name(self) -> &'static str {
        match self {
            BuiltinPalette::Kegs32 => "kegs32",
            BuiltinPalette::CiderPress => "ciderpress",
            BuiltinPalette::AppleWinOld => "applewin-old",
            BuiltinPalette::AppleWinNtsc => "applewin-ntsc",
            BuiltinPalette::Wikipedia => "wikipedia",
            BuiltinPalette::Tohgr => "tohgr",
            BuiltinPalette::Mono => "mono",
        }
    }
}

impl fmt::Display for BuiltinPalette {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BuiltinPalette {
    type Err = PaletteError;

    /// Accepts a name or a numeric code.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_ascii_lowercase();
        if let Ok(code) = s.parse::<usize>() {
            return Self::from_code(code).ok_or(PaletteError::UnknownPalette(s));
        }
        Self::ALL
            .into_iter()
            .chain(std::iter::once(BuiltinPalette::Mono))
            .find(|p| p.name() == s)
            .ok_or(PaletteError::UnknownPalette(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes() {
        assert_eq!(BuiltinPalette::from_code(0), Some(BuiltinPalette::Kegs32));
        assert_eq!(BuiltinPalette::from_code(5), Some(BuiltinPalette::Tohgr));
        assert_eq!(BuiltinPalette::from_code(6), None);
        assert_eq!(BuiltinPalette::default(), BuiltinPalette::Tohgr);
    }

    #[test]
    fn test_parse() {
        assert_eq!("3".parse::<BuiltinPalette>().unwrap(), BuiltinPalette::AppleWinNtsc);
        assert_eq!("Wikipedia".parse::<BuiltinPalette>().unwrap(), BuiltinPalette::Wikipedia);
        assert_eq!("mono".parse::<BuiltinPalette>().unwrap(), BuiltinPalette::Mono);
        assert!("9".parse::<BuiltinPalette>().is_err());
    }

    #[test]
    fn test_black_and_white_at_ends() {
        for p in BuiltinPalette::ALL {
            let pal = p.palette();
            assert_eq!(pal.get(0), Rgb::BLACK, "{}", p);
            assert_eq!(pal.get(15), Rgb::WHITE, "{}", p);
        }
    }
}
