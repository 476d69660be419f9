//! Double hi-res containers.

use crate::api::FormatError;
use crate::codec::{DhgrFramebuffer, BANK_SIZE, DHGR_HEIGHT};
use crate::rle::{decode_pcx, encode_pcx};

/// Identifier, bytes per line and line count.
pub const DHR_HEADER_LEN: usize = 5;
/// Linear raster size: 80 bytes per line, 192 lines.
pub const RASTER_LEN: usize = 80 * DHGR_HEIGHT;

const DHR_MAGIC: &[u8; 3] = b"DHR";
const DHX_MAGIC: &[u8; 3] = b"DHX";

/// Both banks, aux first.
pub fn write_a2fc(fb: &DhgrFramebuffer) -> Vec<u8> {
    fb.to_bytes()
}

pub fn read_a2fc(bytes: &[u8]) -> Result<DhgrFramebuffer, FormatError> {
    DhgrFramebuffer::from_bytes(bytes).ok_or(FormatError::WrongLength {
        format: "A2FC",
        expected: BANK_SIZE * 2,
        actual: bytes.len(),
    })
}

/// `(aux, main)` bank images.
pub fn write_aux_bin(fb: &DhgrFramebuffer) -> (Vec<u8>, Vec<u8>) {
    (fb.aux().to_vec(), fb.main().to_vec())
}

fn header(magic: &[u8; 3]) -> Vec<u8> {
    let mut out = Vec::with_capacity(DHR_HEADER_LEN + RASTER_LEN);
    out.extend_from_slice(magic);
    out.extend_from_slice(&[80, DHGR_HEIGHT as u8]);
    out
}

fn check_header(bytes: &[u8], magic: &[u8; 3], format: &'static str) -> Result<(), FormatError> {
    let ok = bytes.len() >= DHR_HEADER_LEN
        && &bytes[..3] == magic
        && bytes[3] == 80
        && bytes[4] == DHGR_HEIGHT as u8;
    if ok {
        Ok(())
    } else {
        Err(FormatError::BadHeader { format })
    }
}

/// `DHR`: header, then 40 aux bytes and 40 main bytes per line.
pub fn write_dhr(fb: &DhgrFramebuffer) -> Vec<u8> {
    let mut out = header(DHR_MAGIC);
    for y in 0..DHGR_HEIGHT {
        if let Some((aux, main)) = fb.line_banks(y) {
            out.extend_from_slice(aux);
            out.extend_from_slice(main);
        }
    }
    out
}

pub fn read_dhr(bytes: &[u8]) -> Result<DhgrFramebuffer, FormatError> {
    check_header(bytes, DHR_MAGIC, "DHR")?;
    let raster = &bytes[DHR_HEADER_LEN..];
    if raster.len() != RASTER_LEN {
        return Err(FormatError::WrongLength {
            format: "DHR",
            expected: DHR_HEADER_LEN + RASTER_LEN,
            actual: bytes.len(),
        });
    }
    let mut fb = DhgrFramebuffer::new();
    for (y, line) in raster.chunks_exact(80).enumerate() {
        fb.set_line_banks(y, &line[..40], &line[40..]);
    }
    Ok(fb)
}

/// `DHX`: header, then the raster interleaved aux/main byte by byte and
/// PCX-run encoded as a single stream.
pub fn write_dhx(fb: &DhgrFramebuffer) -> Vec<u8> {
    let mut raster = Vec::with_capacity(RASTER_LEN);
    for y in 0..DHGR_HEIGHT {
        if let Some((aux, main)) = fb.line_banks(y) {
            for (&a, &m) in aux.iter().zip(main) {
                raster.extend_from_slice(&[a, m]);
            }
        }
    }
    let mut out = header(DHX_MAGIC);
    out.extend(encode_pcx(&raster));
    out
}

pub fn read_dhx(bytes: &[u8]) -> Result<DhgrFramebuffer, FormatError> {
    check_header(bytes, DHX_MAGIC, "DHX")?;
    let raster = decode_pcx(&bytes[DHR_HEADER_LEN..], RASTER_LEN)?;
    let mut fb = DhgrFramebuffer::new();
    for (y, line) in raster.chunks_exact(80).enumerate() {
        let aux: Vec<u8> = line.iter().step_by(2).copied().collect();
        let main: Vec<u8> = line.iter().skip(1).step_by(2).copied().collect();
        fb.set_line_banks(y, &aux, &main);
    }
    Ok(fb)
}

/// Replace the even scanlines of `odd` with those of `even`.
pub fn interlace(even: &DhgrFramebuffer, odd: &DhgrFramebuffer) -> DhgrFramebuffer {
    let mut out = odd.clone();
    for y in (0..DHGR_HEIGHT).step_by(2) {
        if let Some((aux, main)) = even.line_banks(y) {
            out.set_line_banks(y, aux, main);
        }
    }
    out
}
