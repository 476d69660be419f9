//! Decoded output for previews.
//!
//! [`QuantizedImage`] holds one palette index per pixel along with the
//! palette each row is shown with. Every native framebuffer can be decoded
//! into one.

mod quantized_image;

pub use quantized_image::QuantizedImage;
