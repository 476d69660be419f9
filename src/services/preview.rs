//! PNG previews of quantized images.

use std::io::Cursor;

use a2_graphics::QuantizedImage;

use crate::error::AppError;

/// Encode a quantized image as PNG.
///
/// Images that use one palette throughout become 4-bit indexed PNGs. Images
/// with per-row palettes are written as RGB.
pub fn encode_preview(image: &QuantizedImage) -> Result<Vec<u8>, AppError> {
    let first = image.palette_for_row(0).copied().unwrap_or_default();
    let uniform = (0..image.height()).all(|y| image.palette_for_row(y) == Some(&first));

    if uniform {
        let plte: Vec<u8> = first.entries().iter().flat_map(|c| c.to_array()).collect();
        encode_png(
            image.width() as u32,
            image.height() as u32,
            png::ColorType::Indexed,
            png::BitDepth::Four,
            Some(&plte),
            &image.to_packed_nibbles(),
        )
    } else {
        encode_png(
            image.width() as u32,
            image.height() as u32,
            png::ColorType::Rgb,
            png::BitDepth::Eight,
            None,
            &image.to_rgb(),
        )
    }
}

fn encode_png(
    width: u32,
    height: u32,
    color_type: png::ColorType,
    bit_depth: png::BitDepth,
    plte: Option<&[u8]>,
    data: &[u8],
) -> Result<Vec<u8>, AppError> {
    let mut buf = Cursor::new(Vec::new());
    {
        let mut encoder = png::Encoder::new(&mut buf, width, height);
        encoder.set_color(color_type);
        encoder.set_depth(bit_depth);
        encoder.set_compression(png::Compression::Best);
        if let Some(plte) = plte {
            encoder.set_palette(plte);
        }
        let mut writer = encoder.write_header()?;
        writer.write_image_data(data)?;
    }
    Ok(buf.into_inner())
}
