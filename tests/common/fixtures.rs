//! Test fixtures: PNG inputs written to scratch directories.

use std::path::{Path, PathBuf};

use a2_graphics::{Palette, Rgb};

/// Encode RGB24 data as an 8-bit RGB PNG.
pub fn rgb_png(width: u32, height: u32, rgb: &[u8]) -> Vec<u8> {
    let mut buf = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut buf, width, height);
        encoder.set_color(png::ColorType::Rgb);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header().unwrap();
        writer.write_image_data(rgb).unwrap();
    }
    buf
}

/// Horizontal red ramp, vertical green ramp, constant blue.
pub fn gradient_rgb(width: usize, height: usize) -> Vec<u8> {
    (0..width * height)
        .flat_map(|i| {
            let (x, y) = (i % width, i / width);
            [
                (x * 255 / width.max(2).saturating_sub(1)) as u8,
                (y * 255 / height.max(2).saturating_sub(1)) as u8,
                0x60,
            ]
        })
        .collect()
}

pub fn solid_rgb(width: usize, height: usize, color: Rgb) -> Vec<u8> {
    (0..width * height).flat_map(|_| color.to_array()).collect()
}

/// Image whose pixels cycle through the colors of `palette`.
pub fn palette_cycle_rgb(width: usize, height: usize, palette: &Palette) -> Vec<u8> {
    (0..width * height)
        .flat_map(|i| palette.get(((i % width) % 16) as u8).to_array())
        .collect()
}

/// Write a gradient PNG into `dir`.
pub fn write_gradient_png(dir: &Path, name: &str, width: usize, height: usize) -> PathBuf {
    let path = dir.join(name);
    let png = rgb_png(width as u32, height as u32, &gradient_rgb(width, height));
    std::fs::write(&path, png).unwrap();
    path
}

/// Write a palette strip PNG (16 pixels wide, one palette per row).
pub fn write_palette_strip(dir: &Path, name: &str, palettes: &[Palette]) -> PathBuf {
    let path = dir.join(name);
    let rgb: Vec<u8> = palettes
        .iter()
        .flat_map(|p| p.entries().iter().flat_map(|c| c.to_array()))
        .collect();
    std::fs::write(&path, rgb_png(16, palettes.len() as u32, &rgb)).unwrap();
    path
}
