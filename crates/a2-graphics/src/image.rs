//! In-memory RGB source image.

use crate::api::ConvertError;
use crate::color::Rgb;

/// A top-to-bottom, left-to-right RGB raster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RgbImage {
    width: usize,
    height: usize,
    pixels: Vec<Rgb>,
}

impl RgbImage {
    /// Wrap a pixel buffer, checking it holds `width * height` pixels.
    pub fn new(width: usize, height: usize, pixels: Vec<Rgb>) -> Result<Self, ConvertError> {
        if pixels.len() != width * height {
            return Err(ConvertError::PixelCount {
                expected: width * height,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Build from packed RGB24 bytes.
    pub fn from_rgb24(width: usize, height: usize, bytes: &[u8]) -> Result<Self, ConvertError> {
        let pixels = bytes
            .chunks_exact(3)
            .map(|c| Rgb::new(c[0], c[1], c[2]))
            .collect();
        Self::new(width, height, pixels)
    }

    /// Solid image of one color.
    pub fn filled(width: usize, height: usize, color: Rgb) -> Self {
        Self {
            width,
            height,
            pixels: vec![color; width * height],
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn pixels(&self) -> &[Rgb] {
        &self.pixels
    }

    /// Row `y`. Panics if `y` is out of range.
    #[inline]
    pub fn row(&self, y: usize) -> &[Rgb] {
        &self.pixels[y * self.width..(y + 1) * self.width]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Rgb]> {
        self.pixels.chunks_exact(self.width.max(1))
    }

    pub fn get(&self, x: usize, y: usize) -> Option<Rgb> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[y * self.width + x])
    }

    pub(crate) fn expect_size(
        &self,
        target: &'static str,
        width: usize,
        height: usize,
    ) -> Result<(), ConvertError> {
        if self.width != width || self.height != height {
            return Err(ConvertError::UnsupportedDimensions {
                target,
                width: self.width,
                height: self.height,
                expected_width: width,
                expected_height: height,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pixel_count_checked() {
        assert_eq!(
            RgbImage::new(2, 2, vec![Rgb::BLACK; 3]),
            Err(ConvertError::PixelCount {
                expected: 4,
                actual: 3
            })
        );
    }

    #[test]
    fn test_rows_and_get() {
        let image = RgbImage::from_rgb24(2, 2, &[1, 1, 1, 2, 2, 2, 3, 3, 3, 4, 4, 4]).unwrap();
        assert_eq!(image.row(1), &[Rgb::new(3, 3, 3), Rgb::new(4, 4, 4)]);
        assert_eq!(image.rows().count(), 2);
        assert_eq!(image.get(1, 0), Some(Rgb::new(2, 2, 2)));
        assert_eq!(image.get(2, 0), None);
    }
}
