//! Conversion orchestration: configured converter in, output files out.

use std::path::Path;

use a2_graphics::codec::SHR_HEIGHT;
use a2_graphics::format::{
    interlace, write_a2fc, write_apf, write_aux_bin, write_brooks, write_dhr, write_dhx,
    write_pic, ByteOrder,
};
use a2_graphics::{
    BuiltinPalette, ConversionConfig, Converter, DhgrFramebuffer, LoresMode, MonoMethod,
    PaletteSet, PixelDepth, QuantizedImage, RgbImage, ShrImage,
};

use crate::error::AppError;
use crate::models::{tags, AppConfig, DhgrFormat, OutputFile, ShrFormat};

/// Files and preview produced by one conversion.
#[derive(Debug, Clone)]
pub struct Conversion {
    pub files: Vec<OutputFile>,
    pub preview: QuantizedImage,
}

/// Runs conversions with one fixed configuration.
#[derive(Debug, Clone)]
pub struct ConversionService {
    config: ConversionConfig,
    palette: BuiltinPalette,
    byte_order: ByteOrder,
}

impl ConversionService {
    pub fn new(config: ConversionConfig, palette: BuiltinPalette, byte_order: ByteOrder) -> Self {
        Self {
            config,
            palette,
            byte_order,
        }
    }

    /// Resolve an application config into a service.
    pub fn from_app_config(app: &AppConfig, luma_file: Option<&Path>) -> Result<Self, AppError> {
        let config = ConversionConfig {
            luma: app.luma_coefficients(luma_file)?,
            dither: app.dither_options()?,
            palette_mode: app.palette_mode(),
            verbatim: app.verbatim,
            ..ConversionConfig::default()
        };
        Ok(Self::new(config, app.builtin_palette()?, app.byte_order()?))
    }

    pub fn config(&self) -> &ConversionConfig {
        &self.config
    }

    /// Same service with a different monochrome setup.
    pub fn with_mono(mut self, method: MonoMethod, depth: PixelDepth) -> Self {
        self.config.mono = method;
        self.config.mono_depth = depth;
        self
    }

    fn converter(&self, palettes: PaletteSet) -> Converter {
        Converter::with_config(palettes, self.config.clone())
    }

    /// Double hi-res color. With `even_lines`, even scanlines are taken from
    /// that framebuffer instead.
    pub fn dhgr(
        &self,
        image: &RgbImage,
        format: DhgrFormat,
        even_lines: Option<&DhgrFramebuffer>,
    ) -> Result<Conversion, AppError> {
        let palette = self.palette.palette();
        let mut fb = self.converter(palette.into()).dhgr(image)?;
        if let Some(even) = even_lines {
            fb = interlace(even, &fb);
        }
        tracing::info!(palette = %self.palette, ?format, "Converted double hi-res");
        Ok(Conversion {
            files: dhgr_files(&fb, format),
            preview: QuantizedImage::from_dhgr(&fb, palette),
        })
    }

    /// Monochrome double hi-res from a 560×192 or 140×192 image.
    pub fn mono(&self, image: &RgbImage, format: DhgrFormat) -> Result<Conversion, AppError> {
        let fb = self.converter(self.palette.palette().into()).dhgr_mono(image)?;
        tracing::info!(method = ?self.config.mono, ?format, "Converted monochrome double hi-res");
        Ok(Conversion {
            files: dhgr_files(&fb, format),
            preview: QuantizedImage::from_dhgr_mono(&fb),
        })
    }

    pub fn lores(&self, image: &RgbImage, mode: LoresMode) -> Result<Conversion, AppError> {
        let palette = self.palette.palette();
        let fb = self.converter(palette.into()).lores(image, mode)?;
        let extension = match mode {
            LoresMode::Single => "SLO",
            LoresMode::Double => "DLO",
        };
        tracing::info!(palette = %self.palette, ?mode, "Converted lo-res");
        Ok(Conversion {
            files: vec![OutputFile::new(extension, Some(tags::BIN_0400), fb.to_bytes())],
            preview: QuantizedImage::from_lores(&fb, palette),
        })
    }

    /// Super hi-res. Without a pool, the built-in palette is the only entry.
    pub fn shr(
        &self,
        image: &RgbImage,
        pool: Option<PaletteSet>,
        format: ShrFormat,
    ) -> Result<Conversion, AppError> {
        let pool = pool.unwrap_or_else(|| self.palette.palette().into());
        let pool_len = pool.len();
        let conversion = self.converter(pool).shr(image)?;
        let (sections, own) = conversion.method_counts();
        tracing::info!(
            mode = ?self.config.palette_mode,
            pool = pool_len,
            sections,
            own,
            "Converted super hi-res"
        );
        Ok(Conversion {
            files: shr_files(&conversion.image, format, self.byte_order)?,
            preview: QuantizedImage::from_shr(&conversion.image),
        })
    }
}

/// File images for a double hi-res framebuffer.
pub fn dhgr_files(fb: &DhgrFramebuffer, format: DhgrFormat) -> Vec<OutputFile> {
    match format {
        DhgrFormat::A2fc => vec![OutputFile::new("A2FC", Some(tags::BIN_2000), write_a2fc(fb))],
        DhgrFormat::AuxBin => {
            let (aux, main) = write_aux_bin(fb);
            vec![
                OutputFile::new("AUX", Some(tags::BIN_2000), aux),
                OutputFile::new("BIN", Some(tags::BIN_2000), main),
            ]
        }
        DhgrFormat::Dhr => vec![OutputFile::new("DHR", None, write_dhr(fb))],
        DhgrFormat::Dhx => vec![OutputFile::new("DHX", None, write_dhx(fb))],
    }
}

/// File images for a super hi-res picture.
pub fn shr_files(image: &ShrImage, format: ShrFormat, order: ByteOrder) -> Result<Vec<OutputFile>, AppError> {
    let brooks = image.palettes.is_brooks();
    let file = match format {
        ShrFormat::Apf => OutputFile::new("PNT", Some(tags::APF), write_apf(image, order)),
        ShrFormat::Brooks => OutputFile::new("SH3", Some(tags::BROOKS), write_brooks(image)),
        ShrFormat::Auto if brooks => OutputFile::new("SH3", Some(tags::BROOKS), write_brooks(image)),
        ShrFormat::Auto | ShrFormat::Pic => {
            let bytes = write_pic(image).ok_or_else(|| {
                AppError::UnsupportedInput(format!(
                    "PIC holds 16 palettes, this picture uses {SHR_HEIGHT}; choose brooks or apf"
                ))
            })?;
            OutputFile::new("SHR", Some(tags::PIC), bytes)
        }
    };
    Ok(vec![file])
}
