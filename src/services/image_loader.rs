//! PNG input decoding.

use std::io::Cursor;
use std::path::Path;

use a2_graphics::palette::{Palette, PALETTE_SIZE};
use a2_graphics::{PaletteSet, Rgb, RgbImage};
use png::{ColorType, Transformations};

use crate::error::AppError;

/// Read a PNG file into an RGB image.
pub fn load_png(path: &Path) -> Result<RgbImage, AppError> {
    let bytes = std::fs::read(path).map_err(|e| AppError::io(path, e))?;
    let image = decode_png(&bytes)?;
    tracing::debug!(
        path = %path.display(),
        width = image.width(),
        height = image.height(),
        "Loaded image"
    );
    Ok(image)
}

/// Decode PNG bytes into an RGB image.
///
/// Indexed, grey and 16-bit images are expanded to 8-bit channels. Alpha is
/// dropped without compositing.
pub fn decode_png(bytes: &[u8]) -> Result<RgbImage, AppError> {
    let mut decoder = png::Decoder::new(Cursor::new(bytes));
    decoder.set_transformations(Transformations::EXPAND | Transformations::STRIP_16);
    let mut reader = decoder.read_info()?;

    let mut buf = vec![0u8; reader.output_buffer_size()];
    let info = reader.next_frame(&mut buf)?;
    let (width, height) = (info.width as usize, info.height as usize);

    let channels = match info.color_type {
        ColorType::Grayscale => 1,
        ColorType::GrayscaleAlpha => 2,
        ColorType::Rgb => 3,
        ColorType::Rgba => 4,
        ColorType::Indexed => {
            return Err(AppError::UnsupportedInput(
                "indexed PNG was not expanded".to_string(),
            ))
        }
    };

    let mut pixels = Vec::with_capacity(width * height);
    for row in buf[..info.buffer_size()].chunks_exact(info.line_size).take(height) {
        pixels.extend(row.chunks_exact(channels).take(width).map(|px| match channels {
            1 | 2 => Rgb::new(px[0], px[0], px[0]),
            _ => Rgb::new(px[0], px[1], px[2]),
        }));
    }

    Ok(RgbImage::new(width, height, pixels)?)
}

/// Read a palette strip: a PNG 16 pixels wide with one palette per row.
///
/// The row count must be 1, 8, 16 or 200.
pub fn load_palette_strip(path: &Path) -> Result<PaletteSet, AppError> {
    let image = load_png(path)?;
    palette_strip(&image)
}

pub fn palette_strip(image: &RgbImage) -> Result<PaletteSet, AppError> {
    if image.width() != PALETTE_SIZE {
        return Err(AppError::UnsupportedInput(format!(
            "palette strip must be {} pixels wide, got {}",
            PALETTE_SIZE,
            image.width()
        )));
    }
    let palettes = image
        .rows()
        .map(Palette::new)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(PaletteSet::new(palettes)?)
}
