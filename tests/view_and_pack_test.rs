//! Reading existing picture files: `view` previews and `pack` re-encoding.

mod common;

use a2_graphics::format::{read_apf, write_brooks, write_dhr, write_dhx, write_pic, ByteOrder};
use a2_graphics::{
    BuiltinPalette, Converter, DhgrFramebuffer, DitherKernel, DitherOptions, PaletteMode,
    PopulationOptions, QuantizedImage, RgbImage,
};
use a2conv::services::{
    decode_png, encode_preview, pack_to_apf, write_atomic, NativeKind, NativePicture,
};
use common::fixtures;
use pretty_assertions::assert_eq;

fn sample_dhgr() -> DhgrFramebuffer {
    let rgb = fixtures::gradient_rgb(140, 192);
    let image = RgbImage::from_rgb24(140, 192, &rgb).unwrap();
    Converter::new(BuiltinPalette::Kegs32.palette().into())
        .dither(Some(DitherOptions::new(DitherKernel::FloydSteinberg)))
        .dhgr(&image)
        .unwrap()
}

fn sample_shr(per_line: bool) -> a2_graphics::ShrImage {
    let rgb = fixtures::gradient_rgb(320, 200);
    let image = RgbImage::from_rgb24(320, 200, &rgb).unwrap();
    let mode = if per_line {
        PaletteMode::Population(PopulationOptions::default())
    } else {
        PaletteMode::Single
    };
    Converter::new(BuiltinPalette::Tohgr.palette().into())
        .palette_mode(mode)
        .shr(&image)
        .unwrap()
        .image
}

#[test]
fn test_dhr_and_dhx_decode_to_same_picture() {
    let fb = sample_dhgr();
    let palette = BuiltinPalette::Kegs32.palette();
    let expected = QuantizedImage::from_dhgr(&fb, palette);

    for (name, bytes) in [("PIC.DHR", write_dhr(&fb)), ("PIC.DHX", write_dhx(&fb))] {
        let kind = NativeKind::detect(std::path::Path::new(name), &bytes).unwrap();
        let picture = NativePicture::read(&bytes, kind, ByteOrder::BigEndian).unwrap();
        assert_eq!(picture.preview(palette, false), expected, "{name}");
    }
}

#[test]
fn test_view_writes_png_matching_picture() {
    let dir = tempfile::tempdir().unwrap();
    let image = sample_shr(true);
    let bytes = write_brooks(&image);

    let picture = NativePicture::read(&bytes, NativeKind::Brooks, ByteOrder::BigEndian).unwrap();
    let preview = picture.preview(BuiltinPalette::Tohgr.palette(), false);
    let png = encode_preview(&preview).unwrap();
    let out = dir.path().join("view.png");
    write_atomic(&out, &png).unwrap();

    let written = std::fs::read(&out).unwrap();
    common::assert_png(&written);
    let decoded = decode_png(&written).unwrap();
    let rgb: Vec<u8> = decoded.pixels().iter().flat_map(|c| c.to_array()).collect();
    assert_eq!(rgb, QuantizedImage::from_shr(&image).to_rgb());
}

#[test]
fn test_pack_pic_and_brooks() {
    for per_line in [false, true] {
        let image = sample_shr(per_line);
        let (bytes, kind) = if per_line {
            (write_brooks(&image), NativeKind::Brooks)
        } else {
            (write_pic(&image).unwrap(), NativeKind::Pic)
        };

        for order in [ByteOrder::BigEndian, ByteOrder::LittleEndian] {
            let apf = pack_to_apf(&bytes, kind, order).unwrap();
            let back = read_apf(&apf, order).unwrap();
            assert_eq!(back.pixels, image.pixels);
            assert_eq!(back.palettes.is_brooks(), per_line);
        }
    }
}

#[test]
fn test_mono_view_of_dhgr() {
    let fb = sample_dhgr();
    let picture = NativePicture::Dhgr(fb.clone());
    let preview = picture.preview(BuiltinPalette::Tohgr.palette(), true);
    assert_eq!(preview.width(), 560);
    assert_eq!(preview, QuantizedImage::from_dhgr_mono(&fb));
}
