//! Reading existing Apple II picture files for `view` and `pack`.

use std::path::Path;

use a2_graphics::codec::{BANK_SIZE, TEXT_PAGE_SIZE};
use a2_graphics::format::{
    read_a2fc, read_apf, read_brooks, read_dhr, read_dhx, read_pic, write_apf, ByteOrder,
    BROOKS_LEN, PIC_LEN,
};
use a2_graphics::{DhgrFramebuffer, LoresFramebuffer, LoresMode, Palette, QuantizedImage, ShrImage};
use clap::ValueEnum;

use crate::error::AppError;

/// Native picture file kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum NativeKind {
    A2fc,
    Dhr,
    Dhx,
    Pic,
    Brooks,
    Apf,
    Lores,
    DoubleLores,
}

impl NativeKind {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_uppercase().as_str() {
            "A2FC" | "2FC" => Some(NativeKind::A2fc),
            "DHR" => Some(NativeKind::Dhr),
            "DHX" => Some(NativeKind::Dhx),
            "SHR" | "PIC" => Some(NativeKind::Pic),
            "SH3" | "3200" => Some(NativeKind::Brooks),
            "PNT" | "APF" => Some(NativeKind::Apf),
            "SLO" => Some(NativeKind::Lores),
            "DLO" => Some(NativeKind::DoubleLores),
            _ => None,
        }
    }

    /// Guess the kind from the file name, then from the header and length.
    pub fn detect(path: &Path, bytes: &[u8]) -> Option<Self> {
        let name = path.file_name()?.to_string_lossy();
        let name = name.split('#').next().unwrap_or_default();
        if let Some(kind) = name.rsplit_once('.').and_then(|(_, ext)| Self::from_extension(ext)) {
            return Some(kind);
        }
        if bytes.starts_with(b"DHR") {
            return Some(NativeKind::Dhr);
        }
        if bytes.starts_with(b"DHX") {
            return Some(NativeKind::Dhx);
        }
        match bytes.len() {
            n if n == 2 * BANK_SIZE => Some(NativeKind::A2fc),
            PIC_LEN => Some(NativeKind::Pic),
            BROOKS_LEN => Some(NativeKind::Brooks),
            TEXT_PAGE_SIZE => Some(NativeKind::Lores),
            n if n == 2 * TEXT_PAGE_SIZE => Some(NativeKind::DoubleLores),
            _ => None,
        }
    }
}

/// A decoded native picture.
#[derive(Debug, Clone)]
pub enum NativePicture {
    Dhgr(DhgrFramebuffer),
    Lores(LoresFramebuffer),
    Shr(ShrImage),
}

impl NativePicture {
    pub fn read(bytes: &[u8], kind: NativeKind, order: ByteOrder) -> Result<Self, AppError> {
        Ok(match kind {
            NativeKind::A2fc => NativePicture::Dhgr(read_a2fc(bytes)?),
            NativeKind::Dhr => NativePicture::Dhgr(read_dhr(bytes)?),
            NativeKind::Dhx => NativePicture::Dhgr(read_dhx(bytes)?),
            NativeKind::Pic => NativePicture::Shr(read_pic(bytes)?),
            NativeKind::Brooks => NativePicture::Shr(read_brooks(bytes)?),
            NativeKind::Apf => NativePicture::Shr(read_apf(bytes, order)?),
            NativeKind::Lores => NativePicture::Lores(lores(LoresMode::Single, bytes)?),
            NativeKind::DoubleLores => NativePicture::Lores(lores(LoresMode::Double, bytes)?),
        })
    }

    /// Preview image. `palette` applies to double hi-res and lo-res; super
    /// hi-res pictures carry their own palettes.
    pub fn preview(&self, palette: Palette, mono: bool) -> QuantizedImage {
        match self {
            NativePicture::Dhgr(fb) if mono => QuantizedImage::from_dhgr_mono(fb),
            NativePicture::Dhgr(fb) => QuantizedImage::from_dhgr(fb, palette),
            NativePicture::Lores(fb) => QuantizedImage::from_lores(fb, palette),
            NativePicture::Shr(image) => QuantizedImage::from_shr(image),
        }
    }
}

fn lores(mode: LoresMode, bytes: &[u8]) -> Result<LoresFramebuffer, AppError> {
    LoresFramebuffer::from_bytes(mode, bytes).ok_or_else(|| {
        AppError::UnsupportedInput(format!("{} bytes is not a {:?} lo-res page", bytes.len(), mode))
    })
}

/// Re-encode a PIC or Brooks file as APF.
pub fn pack_to_apf(bytes: &[u8], kind: NativeKind, order: ByteOrder) -> Result<Vec<u8>, AppError> {
    match NativePicture::read(bytes, kind, order)? {
        NativePicture::Shr(image) => Ok(write_apf(&image, order)),
        _ => Err(AppError::UnsupportedInput(format!(
            "{kind:?} is not a super hi-res picture"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use a2_graphics::format::{write_a2fc, write_pic};
    use a2_graphics::{BuiltinPalette, ShrFramebuffer, ShrPalettes};
    use pretty_assertions::assert_eq;

    fn sample_shr() -> ShrImage {
        let mut pixels = ShrFramebuffer::new();
        for x in 0..320 {
            pixels.plot_pixel(x, 10, (x / 20) as u8);
        }
        ShrImage {
            pixels,
            palettes: ShrPalettes::uniform(BuiltinPalette::Kegs32.palette()),
        }
    }

    #[test]
    fn test_detect_by_extension_and_tag() {
        assert_eq!(
            NativeKind::detect(Path::new("CAT.SH3#C10002"), &[]),
            Some(NativeKind::Brooks)
        );
        assert_eq!(NativeKind::detect(Path::new("cat.a2fc"), &[]), Some(NativeKind::A2fc));
    }

    #[test]
    fn test_detect_by_content() {
        assert_eq!(
            NativeKind::detect(Path::new("CAT"), b"DHX\x50\xC0"),
            Some(NativeKind::Dhx)
        );
        assert_eq!(
            NativeKind::detect(Path::new("CAT"), &vec![0; 32768]),
            Some(NativeKind::Pic)
        );
        assert_eq!(NativeKind::detect(Path::new("CAT"), &[0; 17]), None);
    }

    #[test]
    fn test_pack_pic_to_apf_round_trip() {
        let image = sample_shr();
        let pic = write_pic(&image).unwrap();
        let apf = pack_to_apf(&pic, NativeKind::Pic, ByteOrder::BigEndian).unwrap();
        assert!(apf.len() < pic.len());

        let back = read_apf(&apf, ByteOrder::BigEndian).unwrap();
        assert_eq!(back.pixels, image.pixels);
    }

    #[test]
    fn test_pack_rejects_dhgr() {
        let fb = DhgrFramebuffer::new();
        let result = pack_to_apf(&write_a2fc(&fb), NativeKind::A2fc, ByteOrder::BigEndian);
        assert!(matches!(result, Err(AppError::UnsupportedInput(_))));
    }

    #[test]
    fn test_preview_dhgr_mono_width() {
        let picture = NativePicture::Dhgr(DhgrFramebuffer::new());
        let palette = BuiltinPalette::Tohgr.palette();
        assert_eq!(picture.preview(palette, true).width(), 560);
        assert_eq!(picture.preview(palette, false).width(), 140);
    }

    #[test]
    fn test_lores_wrong_size() {
        let result = NativePicture::read(&[0; 100], NativeKind::Lores, ByteOrder::BigEndian);
        assert!(matches!(result, Err(AppError::UnsupportedInput(_))));
    }
}
