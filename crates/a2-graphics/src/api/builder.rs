//! Converter builder -- the primary entry point for the crate.
//!
//! [`Converter`] owns the palette pool and an immutable
//! [`ConversionConfig`]. Each target method validates the image size, runs
//! the quantization pipeline and returns a filled native framebuffer.

use tracing::debug;

use super::ConvertError;
use crate::codec::{
    DhgrFramebuffer, LoresFramebuffer, LoresMode, ShrFramebuffer, ShrImage, ShrPalettes,
    DHGR_HEIGHT, DHGR_WIDTH, LORES_HEIGHT, MONO_WIDTH, SHR_HEIGHT, SHR_WIDTH,
};
use crate::color::{LumaCoefficients, Rgb};
use crate::dither::{quantize_row, DitherEngine, DitherOptions, PixelDepth};
use crate::image::RgbImage;
use crate::optimize::{
    build_verbatim_palette, map_exact, verbatim_line, LineChoice, PaletteMode, PaletteOptimizer,
    PaletteSlot, SearchMethod,
};
use crate::palette::{BuiltinPalette, ColorMetric, Palette, PaletteSet};

/// How 560-pixel-wide sources become monochrome double hi-res.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MonoMethod {
    /// On when luma is at least one half
    #[default]
    Threshold,
    /// Error diffusion against black and white
    Dither,
}

/// Everything that controls a conversion.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionConfig {
    /// Luma weights for the color metric
    pub luma: LumaCoefficients,
    /// Error diffusion, or plain nearest color when `None`
    pub dither: Option<DitherOptions>,
    /// Super hi-res palette selection
    pub palette_mode: PaletteMode,
    /// Map exactly when the source already fits the palette
    pub verbatim: bool,
    /// Monochrome method for 560-wide sources
    pub mono: MonoMethod,
    /// Planes replayed when a 140-wide source is written as monochrome
    pub mono_depth: PixelDepth,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            luma: LumaCoefficients::default(),
            dither: None,
            palette_mode: PaletteMode::Single,
            verbatim: false,
            mono: MonoMethod::Threshold,
            mono_depth: PixelDepth::Four,
        }
    }
}

/// Result of a super hi-res conversion.
#[derive(Debug, Clone, PartialEq)]
pub struct ShrConversion {
    pub image: ShrImage,
    /// Palette choice for each scanline
    pub lines: Vec<LineChoice>,
}

impl ShrConversion {
    /// Number of lines each hybrid search method won, as (sections, per-line).
    pub fn method_counts(&self) -> (usize, usize) {
        self.lines.iter().fold((0, 0), |(s, l), c| match c.method {
            Some(SearchMethod::Sections) => (s + 1, l),
            Some(SearchMethod::PerLine) => (s, l + 1),
            None => (s, l),
        })
    }
}

/// High-level converter from RGB images to Apple II framebuffers.
///
/// - The constructor takes the palette pool; double hi-res and lo-res use
///   its first palette
/// - Configuration methods consume and return `self`
/// - Conversion methods take `&self`, so one converter serves many images
///
/// # Example
///
/// ```
/// use a2_graphics::{BuiltinPalette, Converter, DitherKernel, DitherOptions, Rgb, RgbImage};
///
/// let converter = Converter::new(BuiltinPalette::Tohgr.palette().into())
///     .dither(Some(DitherOptions::new(DitherKernel::Atkinson)));
///
/// let image = RgbImage::filled(140, 192, Rgb::new(200, 80, 40));
/// let fb = converter.dhgr(&image).unwrap();
/// assert_eq!(fb.to_bytes().len(), 16384);
/// ```
#[derive(Debug, Clone)]
pub struct Converter {
    palettes: PaletteSet,
    config: ConversionConfig,
}

impl Converter {
    pub fn new(palettes: PaletteSet) -> Self {
        Self::with_config(palettes, ConversionConfig::default())
    }

    pub fn with_config(palettes: PaletteSet, config: ConversionConfig) -> Self {
        Self { palettes, config }
    }

    #[inline]
    pub fn luma(mut self, luma: LumaCoefficients) -> Self {
        self.config.luma = luma;
        self
    }

    #[inline]
    pub fn dither(mut self, options: Option<DitherOptions>) -> Self {
        self.config.dither = options;
        self
    }

    #[inline]
    pub fn palette_mode(mut self, mode: PaletteMode) -> Self {
        self.config.palette_mode = mode;
        self
    }

    #[inline]
    pub fn verbatim(mut self, enabled: bool) -> Self {
        self.config.verbatim = enabled;
        self
    }

    #[inline]
    pub fn mono(mut self, method: MonoMethod) -> Self {
        self.config.mono = method;
        self
    }

    #[inline]
    pub fn mono_depth(mut self, depth: PixelDepth) -> Self {
        self.config.mono_depth = depth;
        self
    }

    #[inline]
    pub fn config(&self) -> &ConversionConfig {
        &self.config
    }

    #[inline]
    pub fn palettes(&self) -> &PaletteSet {
        &self.palettes
    }

    fn metric(&self) -> ColorMetric {
        ColorMetric::new(self.config.luma)
    }

    /// Map an image onto one fixed palette: exact mapping when enabled and
    /// possible, otherwise error diffusion or nearest color.
    pub fn quantize(&self, image: &RgbImage, palette: &Palette) -> Vec<u8> {
        if self.config.verbatim {
            if let Some(indices) = map_exact(image.pixels(), palette) {
                debug!("source fits palette exactly");
                return indices;
            }
            debug!("source does not fit palette, falling back to nearest color");
        }

        let metric = self.metric();
        match self.config.dither {
            Some(options) => {
                let mut engine = DitherEngine::new(image.width(), metric, options);
                image
                    .rows()
                    .flat_map(|row| engine.process_line(row, palette))
                    .collect()
            }
            None => image
                .rows()
                .flat_map(|row| quantize_row(&metric, row, palette).0)
                .collect(),
        }
    }

    /// Convert a 140×192 image to double hi-res color.
    pub fn dhgr(&self, image: &RgbImage) -> Result<DhgrFramebuffer, ConvertError> {
        image.expect_size("double hi-res", DHGR_WIDTH, DHGR_HEIGHT)?;
        let indices = self.quantize(image, self.palettes.first());
        let mut fb = DhgrFramebuffer::new();
        for (i, &index) in indices.iter().enumerate() {
            fb.plot_pixel(i % DHGR_WIDTH, i / DHGR_WIDTH, index);
        }
        Ok(fb)
    }

    /// Convert to monochrome double hi-res.
    ///
    /// 560×192 sources map pixel for pixel using [`MonoMethod`]. 140×192
    /// sources are quantized to color and replayed through the color bit
    /// patterns at the configured [`PixelDepth`].
    pub fn dhgr_mono(&self, image: &RgbImage) -> Result<DhgrFramebuffer, ConvertError> {
        let mut fb = DhgrFramebuffer::new();
        if image.width() == DHGR_WIDTH && image.height() == DHGR_HEIGHT {
            let indices = self.quantize(image, self.palettes.first());
            let depth = self.config.mono_depth;
            for (i, &index) in indices.iter().enumerate() {
                let (x, y) = (i % DHGR_WIDTH, i / DHGR_WIDTH);
                for (bit, on) in depth.mono_window(index, x).into_iter().enumerate() {
                    fb.plot_mono(x * 4 + bit, y, on);
                }
            }
            return Ok(fb);
        }

        image.expect_size("monochrome double hi-res", MONO_WIDTH, DHGR_HEIGHT)?;
        let metric = self.metric();
        match self.config.mono {
            MonoMethod::Threshold => {
                for (i, &c) in image.pixels().iter().enumerate() {
                    fb.plot_mono(i % MONO_WIDTH, i / MONO_WIDTH, metric.luma(c) >= 0.5);
                }
            }
            MonoMethod::Dither => {
                let mono = BuiltinPalette::Mono.palette();
                let options = self.config.dither.unwrap_or_default();
                let mut engine = DitherEngine::new(MONO_WIDTH, metric, options);
                for (y, row) in image.rows().enumerate() {
                    for (x, index) in engine.process_line(row, &mono).into_iter().enumerate() {
                        fb.plot_mono(x, y, index == 1);
                    }
                }
            }
        }
        Ok(fb)
    }

    /// Convert a 40×48 (lo-res) or 80×48 (double lo-res) image.
    pub fn lores(&self, image: &RgbImage, mode: LoresMode) -> Result<LoresFramebuffer, ConvertError> {
        let target = match mode {
            LoresMode::Single => "lo-res",
            LoresMode::Double => "double lo-res",
        };
        image.expect_size(target, mode.width(), LORES_HEIGHT)?;
        let indices = self.quantize(image, self.palettes.first());
        let mut fb = LoresFramebuffer::new(mode);
        for (i, &index) in indices.iter().enumerate() {
            fb.plot_pixel(i % mode.width(), i / mode.width(), index);
        }
        Ok(fb)
    }

    /// Convert a 320×200 image to super hi-res.
    ///
    /// `Single` and `Sectioned` modes produce a `PIC` layout; the per-line
    /// modes produce one palette per scanline.
    pub fn shr(&self, image: &RgbImage) -> Result<ShrConversion, ConvertError> {
        image.expect_size("super hi-res", SHR_WIDTH, SHR_HEIGHT)?;
        let pool = self.palettes.to_12bit();

        if self.config.verbatim {
            if let Some(conversion) = self.shr_verbatim(image, &pool) {
                return Ok(conversion);
            }
            debug!("more than 16 colors, falling back to palette search");
        }

        let metric = self.metric();
        let rows: Vec<&[Rgb]> = image.rows().collect();
        let mode = self.config.palette_mode;
        let optimizer = PaletteOptimizer::new(metric, mode, pool.clone(), &rows);
        let mut engine = self
            .config
            .dither
            .map(|options| DitherEngine::new(SHR_WIDTH, metric, options));

        let mut pixels = ShrFramebuffer::new();
        let mut lines = Vec::with_capacity(SHR_HEIGHT);
        for (y, row) in rows.iter().enumerate() {
            let (choice, indices) = match engine.as_mut() {
                Some(engine) => {
                    engine.load_line(row);
                    let mut choice = optimizer.select(&engine.working_line(), row);
                    engine.diffuse(&choice.palette);
                    let indices = engine.quantize(&choice.palette);
                    // Rescore against what diffusion actually produced
                    choice.distance = engine
                        .working_line()
                        .iter()
                        .zip(&indices)
                        .map(|(&c, &i)| metric.distance_to(c, &choice.palette, i))
                        .sum();
                    engine.advance();
                    (choice, indices)
                }
                None => {
                    let choice = optimizer.select(row, row);
                    (choice, quantize_row(&metric, row, &choice.palette).0)
                }
            };
            for (x, &index) in indices.iter().enumerate() {
                pixels.plot_pixel(x, y, index);
            }
            lines.push(choice);
        }

        let palettes = if mode.is_per_line() {
            ShrPalettes::Brooks {
                palettes: lines.iter().map(|c| c.palette).collect(),
            }
        } else {
            let scb = lines
                .iter()
                .map(|c| match c.slot {
                    PaletteSlot::Pool(i) => i as u8,
                    _ => 0,
                })
                .collect();
            ShrPalettes::pic(scb, &pool)
        };

        let conversion = ShrConversion {
            image: ShrImage { pixels, palettes },
            lines,
        };
        let (sections, own) = conversion.method_counts();
        debug!(?mode, sections, own, "super hi-res conversion done");
        Ok(conversion)
    }

    /// Exact mapping for sources that already use pool colors, or that have
    /// at most 16 colors overall.
    fn shr_verbatim(&self, image: &RgbImage, pool: &PaletteSet) -> Option<ShrConversion> {
        let fitted: Option<Vec<(usize, Vec<u8>)>> = image
            .rows()
            .map(|row| verbatim_line(row, pool.as_slice()))
            .collect();

        let (palettes, lines, rows) = match fitted {
            Some(rows) => {
                debug!("every line fits a pool palette");
                let lines: Vec<LineChoice> = rows
                    .iter()
                    .map(|(i, _)| LineChoice {
                        palette: pool.as_slice()[*i],
                        slot: PaletteSlot::Pool(*i),
                        method: None,
                        distance: 0.0,
                    })
                    .collect();
                let palettes = if pool.len() > 16 {
                    ShrPalettes::Brooks {
                        palettes: lines.iter().map(|c| c.palette).collect(),
                    }
                } else {
                    ShrPalettes::pic(rows.iter().map(|(i, _)| *i as u8).collect(), pool)
                };
                (palettes, lines, rows.into_iter().map(|(_, r)| r).collect::<Vec<_>>())
            }
            None => {
                let reduced: Vec<Rgb> = image.pixels().iter().map(|c| c.to_12bit()).collect();
                let palette = build_verbatim_palette(&reduced)?;
                debug!("built palette from the source's own colors");
                let indices = map_exact(&reduced, &palette)?;
                let rows: Vec<Vec<u8>> = indices.chunks_exact(SHR_WIDTH).map(<[u8]>::to_vec).collect();
                let lines = vec![
                    LineChoice {
                        palette,
                        slot: PaletteSlot::Line,
                        method: None,
                        distance: 0.0,
                    };
                    SHR_HEIGHT
                ];
                (ShrPalettes::uniform(palette), lines, rows)
            }
        };

        let mut pixels = ShrFramebuffer::new();
        for (y, row) in rows.iter().enumerate() {
            for (x, &index) in row.iter().enumerate() {
                pixels.plot_pixel(x, y, index);
            }
        }
        Some(ShrConversion {
            image: ShrImage { pixels, palettes },
            lines,
        })
    }
}
