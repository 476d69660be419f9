//! Apple Preferred Format (`$C0/$0002`) pictures.
//!
//! A `MAIN` block carries the color tables, a scanline directory of
//! (packed length, mode word) pairs and the PackBytes-compressed lines.
//! Brooks images keep a single all-black table in `MAIN` and store their
//! 200 palettes in a following `MULTIPAL` block.

use std::fmt;
use std::str::FromStr;

use crate::api::FormatError;
use crate::codec::{ShrFramebuffer, ShrImage, ShrPalettes, SHR_BYTES_PER_LINE, SHR_HEIGHT, SHR_WIDTH};
use crate::palette::Palette;
use crate::rle::{unpack_bytes, PackBytes};

const MAIN_KIND: &[u8] = b"\x04MAIN";
const MULTIPAL_KIND: &[u8] = b"\x08MULTIPAL";

/// Byte order of the integer header fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ByteOrder {
    #[default]
    BigEndian,
    LittleEndian,
}

impl ByteOrder {
    fn put_u16(self, out: &mut Vec<u8>, value: u16) {
        match self {
            ByteOrder::BigEndian => out.extend_from_slice(&value.to_be_bytes()),
            ByteOrder::LittleEndian => out.extend_from_slice(&value.to_le_bytes()),
        }
    }

    fn put_u32(self, out: &mut Vec<u8>, value: u32) {
        match self {
            ByteOrder::BigEndian => out.extend_from_slice(&value.to_be_bytes()),
            ByteOrder::LittleEndian => out.extend_from_slice(&value.to_le_bytes()),
        }
    }

    fn u16_at(self, bytes: &[u8], at: usize) -> Option<u16> {
        let raw: [u8; 2] = bytes.get(at..at + 2)?.try_into().ok()?;
        Some(match self {
            ByteOrder::BigEndian => u16::from_be_bytes(raw),
            ByteOrder::LittleEndian => u16::from_le_bytes(raw),
        })
    }

    fn u32_at(self, bytes: &[u8], at: usize) -> Option<u32> {
        let raw: [u8; 4] = bytes.get(at..at + 4)?.try_into().ok()?;
        Some(match self {
            ByteOrder::BigEndian => u32::from_be_bytes(raw),
            ByteOrder::LittleEndian => u32::from_le_bytes(raw),
        })
    }
}

impl fmt::Display for ByteOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ByteOrder::BigEndian => "big",
            ByteOrder::LittleEndian => "little",
        })
    }
}

impl FromStr for ByteOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "big" | "be" | "big-endian" | "motorola" => Ok(ByteOrder::BigEndian),
            "little" | "le" | "little-endian" | "intel" => Ok(ByteOrder::LittleEndian),
            other => Err(format!("unknown byte order '{}'", other)),
        }
    }
}

/// Encode an image as an APF file.
pub fn write_apf(image: &ShrImage, order: ByteOrder) -> Vec<u8> {
    let brooks = image.palettes.is_brooks();

    let mut tables: Vec<Palette> = match &image.palettes {
        ShrPalettes::Pic { palettes, .. } => palettes.clone(),
        ShrPalettes::Brooks { .. } => vec![Palette::default()],
    };
    if !brooks {
        tables.resize(16, Palette::default());
    }

    let mut encoder = PackBytes::new();
    let mut directory = Vec::with_capacity(SHR_HEIGHT);
    let mut packed = Vec::new();
    for y in 0..SHR_HEIGHT {
        let line = image.pixels.line(y).unwrap_or_default();
        let encoded = encoder.encode(line);
        let mode = match &image.palettes {
            ShrPalettes::Pic { scb, .. } => scb.get(y).copied().unwrap_or(0) as u16,
            ShrPalettes::Brooks { .. } => 0,
        };
        directory.push((encoded.len() as u16, mode));
        packed.extend(encoded);
    }

    let header_len = 4 + MAIN_KIND.len() + 2 + 2 + 2 + tables.len() * 32 + 2 + SHR_HEIGHT * 4;
    let mut out = Vec::with_capacity(header_len + packed.len() + 6415);

    order.put_u32(&mut out, (header_len + packed.len()) as u32);
    out.extend_from_slice(MAIN_KIND);
    order.put_u16(&mut out, 0);
    order.put_u16(&mut out, SHR_WIDTH as u16);
    order.put_u16(&mut out, tables.len() as u16);
    for table in &tables {
        out.extend_from_slice(&table.to_shr_bytes());
    }
    order.put_u16(&mut out, SHR_HEIGHT as u16);
    for &(len, mode) in &directory {
        order.put_u16(&mut out, len);
        order.put_u16(&mut out, mode);
    }
    out.extend(packed);

    if let ShrPalettes::Brooks { palettes } = &image.palettes {
        let block_len = 4 + MULTIPAL_KIND.len() + 2 + SHR_HEIGHT * 32;
        order.put_u32(&mut out, block_len as u32);
        out.extend_from_slice(MULTIPAL_KIND);
        order.put_u16(&mut out, SHR_HEIGHT as u16);
        for y in 0..SHR_HEIGHT {
            let palette = palettes.get(y).copied().unwrap_or_default();
            out.extend_from_slice(&palette.to_shr_bytes());
        }
    }
    out
}

/// Decode an APF file written with the given header byte order.
pub fn read_apf(bytes: &[u8], order: ByteOrder) -> Result<ShrImage, FormatError> {
    let bad = FormatError::BadHeader { format: "APF" };
    let truncated = FormatError::Truncated { format: "APF" };

    let main_len = order.u32_at(bytes, 0).ok_or(truncated.clone())? as usize;
    if bytes.get(4..4 + MAIN_KIND.len()) != Some(MAIN_KIND) || main_len > bytes.len() {
        return Err(bad);
    }
    let mut at = 4 + MAIN_KIND.len() + 2;
    if order.u16_at(bytes, at) != Some(SHR_WIDTH as u16) {
        return Err(bad);
    }
    at += 2;
    let table_count = order.u16_at(bytes, at).ok_or(truncated.clone())? as usize;
    at += 2;
    let tables: Vec<Palette> = bytes
        .get(at..at + table_count * 32)
        .ok_or(truncated.clone())?
        .chunks_exact(32)
        .map(Palette::from_shr_bytes)
        .collect();
    at += table_count * 32;
    if order.u16_at(bytes, at) != Some(SHR_HEIGHT as u16) {
        return Err(bad);
    }
    at += 2;

    let mut directory = Vec::with_capacity(SHR_HEIGHT);
    for _ in 0..SHR_HEIGHT {
        let len = order.u16_at(bytes, at).ok_or(truncated.clone())? as usize;
        let mode = order.u16_at(bytes, at + 2).ok_or(truncated.clone())?;
        directory.push((len, mode));
        at += 4;
    }

    let mut pixels = ShrFramebuffer::new();
    for (y, &(len, _)) in directory.iter().enumerate() {
        let packed = bytes.get(at..at + len).ok_or(truncated.clone())?;
        pixels.set_line(y, &unpack_bytes(packed, SHR_BYTES_PER_LINE)?);
        at += len;
    }

    // Optional blocks follow MAIN
    let mut multipal = None;
    let mut block = main_len;
    while let Some(block_len) = order.u32_at(bytes, block) {
        let block_len = block_len as usize;
        if block_len == 0 || block + block_len > bytes.len() {
            break;
        }
        if bytes.get(block + 4..block + 4 + MULTIPAL_KIND.len()) == Some(MULTIPAL_KIND) {
            let start = block + 4 + MULTIPAL_KIND.len() + 2;
            let data = bytes.get(start..start + SHR_HEIGHT * 32).ok_or(truncated.clone())?;
            multipal = Some(data.chunks_exact(32).map(Palette::from_shr_bytes).collect());
        }
        block += block_len;
    }

    let palettes = match multipal {
        Some(palettes) => ShrPalettes::Brooks { palettes },
        None => ShrPalettes::Pic {
            scb: directory.iter().map(|&(_, mode)| mode as u8).collect(),
            palettes: tables,
        },
    };
    Ok(ShrImage { pixels, palettes })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgb;

    fn pixels() -> ShrFramebuffer {
        let mut fb = ShrFramebuffer::new();
        for y in 0..SHR_HEIGHT {
            for x in 0..SHR_WIDTH {
                fb.plot_pixel(x, y, ((x / 20 + y) % 16) as u8);
            }
        }
        fb
    }

    #[test]
    fn test_pic_header() {
        let image = ShrImage {
            pixels: ShrFramebuffer::new(),
            palettes: ShrPalettes::uniform(Palette::default()),
        };
        let apf = write_apf(&image, ByteOrder::BigEndian);
        // 1329-byte header plus 200 lines of one 2-byte token each
        assert_eq!(apf.len(), 1329 + 400);
        assert_eq!(&apf[0..4], &(1729u32).to_be_bytes());
        assert_eq!(&apf[4..9], b"\x04MAIN");
        assert_eq!(&apf[11..13], &[0x01, 0x40]);
        assert_eq!(&apf[13..15], &[0x00, 0x10]);
        // Line count, then the first directory entry: two packed bytes, mode 0
        assert_eq!(&apf[527..533], &[0x00, 0xC8, 0x00, 0x02, 0x00, 0x00]);
    }

    #[test]
    fn test_pic_round_trip() {
        let mut scb = vec![0u8; SHR_HEIGHT];
        scb[7] = 3;
        let mut palettes = vec![Palette::default(); 16];
        palettes[3].set(1, Rgb::from_nibbles(9, 8, 7));
        let image = ShrImage {
            pixels: pixels(),
            palettes: ShrPalettes::Pic { scb, palettes },
        };
        for order in [ByteOrder::BigEndian, ByteOrder::LittleEndian] {
            let apf = write_apf(&image, order);
            assert_eq!(read_apf(&apf, order).unwrap(), image);
        }
    }

    #[test]
    fn test_brooks_round_trip() {
        let palettes: Vec<Palette> = (0..200)
            .map(|y| Palette::new(&[Rgb::from_nibbles((y % 16) as u8, 0, 0)]).unwrap())
            .collect();
        let image = ShrImage {
            pixels: pixels(),
            palettes: ShrPalettes::Brooks { palettes },
        };
        let apf = write_apf(&image, ByteOrder::BigEndian);
        let main_len = u32::from_be_bytes([apf[0], apf[1], apf[2], apf[3]]) as usize;
        assert_eq!(apf.len(), main_len + 6415);
        assert_eq!(&apf[main_len + 4..main_len + 13], b"\x08MULTIPAL");
        assert_eq!(read_apf(&apf, ByteOrder::BigEndian).unwrap(), image);
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(read_apf(&[0, 0], ByteOrder::BigEndian).is_err());
        assert_eq!(
            read_apf(&[0, 0, 0, 9, 4, b'X', b'X', b'X', b'X'], ByteOrder::BigEndian),
            Err(FormatError::BadHeader { format: "APF" })
        );
    }
}
