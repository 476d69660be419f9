//! Raw super hi-res files.

use crate::api::FormatError;
use crate::codec::{ShrFramebuffer, ShrImage, ShrPalettes, SHR_HEIGHT, SHR_PIXEL_BYTES};
use crate::palette::Palette;

/// `PIC` file size: pixels, 200 SCBs, 56 padding bytes, 16 palettes.
pub const PIC_LEN: usize = SHR_PIXEL_BYTES + SHR_HEIGHT + 56 + 16 * 32;
/// Brooks file size: pixels and 200 palettes.
pub const BROOKS_LEN: usize = SHR_PIXEL_BYTES + SHR_HEIGHT * 32;

/// Write a `PIC` file. Brooks images are rejected with `None`.
pub fn write_pic(image: &ShrImage) -> Option<Vec<u8>> {
    let ShrPalettes::Pic { scb, palettes } = &image.palettes else {
        return None;
    };
    let mut out = Vec::with_capacity(PIC_LEN);
    out.extend_from_slice(image.pixels.as_bytes());
    let mut scbs = scb.clone();
    scbs.resize(SHR_HEIGHT, 0);
    out.extend_from_slice(&scbs);
    out.extend_from_slice(&[0u8; 56]);
    for i in 0..16 {
        let palette = palettes.get(i).copied().unwrap_or_default();
        out.extend_from_slice(&palette.to_shr_bytes());
    }
    Some(out)
}

pub fn read_pic(bytes: &[u8]) -> Result<ShrImage, FormatError> {
    if bytes.len() != PIC_LEN {
        return Err(FormatError::WrongLength {
            format: "PIC",
            expected: PIC_LEN,
            actual: bytes.len(),
        });
    }
    let (pixels, trailer) = bytes.split_at(SHR_PIXEL_BYTES);
    let scb = trailer[..SHR_HEIGHT].to_vec();
    let palettes = trailer[SHR_HEIGHT + 56..]
        .chunks_exact(32)
        .map(Palette::from_shr_bytes)
        .collect();
    Ok(ShrImage {
        pixels: ShrFramebuffer::from_bytes(pixels).unwrap_or_default(),
        palettes: ShrPalettes::Pic { scb, palettes },
    })
}

/// Write a Brooks file. `PIC` images are expanded to one palette per line.
pub fn write_brooks(image: &ShrImage) -> Vec<u8> {
    let mut out = Vec::with_capacity(BROOKS_LEN);
    out.extend_from_slice(image.pixels.as_bytes());
    for y in 0..SHR_HEIGHT {
        let palette = image.palettes.for_line(y).copied().unwrap_or_default();
        out.extend_from_slice(&palette.to_shr_bytes_reversed());
    }
    out
}

pub fn read_brooks(bytes: &[u8]) -> Result<ShrImage, FormatError> {
    if bytes.len() != BROOKS_LEN {
        return Err(FormatError::WrongLength {
            format: "Brooks",
            expected: BROOKS_LEN,
            actual: bytes.len(),
        });
    }
    let (pixels, trailer) = bytes.split_at(SHR_PIXEL_BYTES);
    let palettes = trailer
        .chunks_exact(32)
        .map(Palette::from_shr_bytes_reversed)
        .collect();
    Ok(ShrImage {
        pixels: ShrFramebuffer::from_bytes(pixels).unwrap_or_default(),
        palettes: ShrPalettes::Brooks { palettes },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgb;
    use pretty_assertions::assert_eq;

    fn pic_image() -> ShrImage {
        let mut pixels = ShrFramebuffer::new();
        pixels.plot_pixel(0, 0, 3);
        let mut palettes = vec![Palette::default(); 16];
        palettes[2].set(3, Rgb::from_nibbles(1, 2, 3));
        let mut scb = vec![0u8; SHR_HEIGHT];
        scb[0] = 2;
        ShrImage {
            pixels,
            palettes: ShrPalettes::Pic { scb, palettes },
        }
    }

    #[test]
    fn test_pic_layout() {
        let bytes = write_pic(&pic_image()).unwrap();
        assert_eq!(bytes.len(), 32768);
        assert_eq!(bytes[0], 0x30);
        assert_eq!(bytes[32000], 2);
        // palette 2, entry 3
        let at = 32000 + 256 + 2 * 32 + 3 * 2;
        assert_eq!(&bytes[at..at + 2], &[0x23, 0x01]);
        assert_eq!(read_pic(&bytes).unwrap(), pic_image());
    }

    #[test]
    fn test_brooks_stores_color_15_first() {
        let image = pic_image();
        let bytes = write_brooks(&image);
        assert_eq!(bytes.len(), 38400);
        // line 0 uses palette 2; entry 3 lands in slot 12 when reversed
        let at = 32000 + 12 * 2;
        assert_eq!(&bytes[at..at + 2], &[0x23, 0x01]);
        let back = read_brooks(&bytes).unwrap();
        assert_eq!(back.palettes.for_line(0), image.palettes.for_line(0));
        assert!(back.palettes.is_brooks());
    }

    #[test]
    fn test_brooks_image_is_not_pic() {
        let image = ShrImage {
            pixels: ShrFramebuffer::new(),
            palettes: ShrPalettes::Brooks {
                palettes: vec![Palette::default(); 200],
            },
        };
        assert_eq!(write_pic(&image), None);
        assert!(read_pic(&[0; 100]).is_err());
    }
}
