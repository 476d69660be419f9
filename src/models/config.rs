use std::path::Path;

use a2_graphics::format::ByteOrder;
use a2_graphics::{
    BuiltinPalette, DitherKernel, DitherOptions, LumaCoefficients, LumaStandard, PaletteMode,
    PopulationOptions,
};
use clap::ValueEnum;
use serde::{Deserialize, Deserializer};

use crate::error::AppError;

/// Conversion defaults loaded from an optional YAML file.
///
/// ```yaml
/// luma: 709
/// palette: kegs32
/// dither:
///   kernel: atkinson
///   bleed_percent: 80
/// shr:
///   mode: hybrid
///   limit_greys: true
/// byte_order: big
/// ```
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct AppConfig {
    /// Luma standard name or code (601, 709, 240, 911, 2020, 411)
    #[serde(default = "default_luma", deserialize_with = "string_or_number")]
    pub luma: String,

    /// Built-in palette for double hi-res and lo-res
    #[serde(default = "default_palette", deserialize_with = "string_or_number")]
    pub palette: String,

    /// Error diffusion; absent means nearest color only
    #[serde(default)]
    pub dither: Option<DitherConfig>,

    /// Super hi-res palette selection
    #[serde(default)]
    pub shr: ShrConfig,

    /// Byte order of APF header integers
    #[serde(default = "default_byte_order")]
    pub byte_order: String,

    /// Map exactly when the source already fits the palette
    #[serde(default)]
    pub verbatim: bool,

    /// Append CiderPress file type tags to output names
    #[serde(default)]
    pub tags: bool,
}

/// Accept `luma: 709` as well as `luma: bt709`.
fn string_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(u64),
        Text(String),
    }
    Ok(match Raw::deserialize(deserializer)? {
        Raw::Number(n) => n.to_string(),
        Raw::Text(s) => s,
    })
}

fn default_luma() -> String {
    "601".to_string()
}

fn default_palette() -> String {
    BuiltinPalette::default().name().to_string()
}

fn default_byte_order() -> String {
    ByteOrder::default().to_string()
}

/// Error diffusion settings
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct DitherConfig {
    /// floyd-steinberg, atkinson, atkinson-reduced, buckels, buckels-random
    pub kernel: String,

    /// Error carried forward, in percent (1..=100)
    #[serde(default = "default_bleed_percent")]
    pub bleed_percent: u16,

    /// Deposit truncation residue
    #[serde(default = "default_true")]
    pub error_sum: bool,

    /// Seed for random residual placement
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_bleed_percent() -> u16 {
    100
}

fn default_true() -> bool {
    true
}

/// How super hi-res scanlines get their palettes
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ShrModeName {
    #[default]
    Single,
    Sectioned,
    PerScanline,
    Population,
    Hybrid,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ShrConfig {
    #[serde(default)]
    pub mode: ShrModeName,

    /// Palettes searched in sectioned mode
    #[serde(default = "default_sections")]
    pub sections: usize,

    /// Keep black and white in every population palette
    #[serde(default = "default_true")]
    pub pin_extremes: bool,

    /// At most one grey per population palette
    #[serde(default)]
    pub limit_greys: bool,
}

fn default_sections() -> usize {
    16
}

impl Default for ShrConfig {
    fn default() -> Self {
        Self {
            mode: ShrModeName::default(),
            sections: default_sections(),
            pin_extremes: true,
            limit_greys: false,
        }
    }
}

impl AppConfig {
    /// Load configuration from a YAML file.
    ///
    /// A missing path gives the defaults. An unreadable or malformed file
    /// is logged and also gives the defaults.
    pub fn load(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::default();
        };
        match std::fs::read_to_string(path) {
            Ok(content) => match serde_yaml::from_str::<Self>(&content) {
                Ok(config) => {
                    tracing::info!(path = %path.display(), "Loaded configuration");
                    config
                }
                Err(e) => {
                    tracing::warn!(%e, path = %path.display(), "Failed to parse config, using defaults");
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!(%e, path = %path.display(), "Failed to read config, using defaults");
                Self::default()
            }
        }
    }

    /// Luma weights, from a three-line override file if given.
    pub fn luma_coefficients(&self, override_file: Option<&Path>) -> Result<LumaCoefficients, AppError> {
        if let Some(path) = override_file {
            let text = std::fs::read_to_string(path).map_err(|e| AppError::io(path, e))?;
            return Ok(LumaCoefficients::parse(&text)?);
        }
        Ok(self.luma.parse::<LumaStandard>()?.coefficients())
    }

    pub fn builtin_palette(&self) -> Result<BuiltinPalette, AppError> {
        Ok(self.palette.parse()?)
    }

    pub fn dither_options(&self) -> Result<Option<DitherOptions>, AppError> {
        let Some(dither) = &self.dither else {
            return Ok(None);
        };
        let kernel: DitherKernel = dither
            .kernel
            .parse()
            .map_err(|e| AppError::Config(format!("{e}")))?;
        let mut options = DitherOptions::new(kernel)
            .bleed_percent(dither.bleed_percent)
            .error_sum(dither.error_sum);
        if let Some(seed) = dither.seed {
            options = options.seed(seed);
        }
        Ok(Some(options))
    }

    pub fn palette_mode(&self) -> PaletteMode {
        let population = PopulationOptions {
            pin_extremes: self.shr.pin_extremes,
            limit_greys: self.shr.limit_greys,
        };
        match self.shr.mode {
            ShrModeName::Single => PaletteMode::Single,
            ShrModeName::Sectioned => PaletteMode::Sectioned(self.shr.sections),
            ShrModeName::PerScanline => PaletteMode::PerScanline,
            ShrModeName::Population => PaletteMode::Population(population),
            ShrModeName::Hybrid => PaletteMode::Hybrid(population),
        }
    }

    pub fn byte_order(&self) -> Result<ByteOrder, AppError> {
        self.byte_order.parse().map_err(AppError::Config)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            luma: default_luma(),
            palette: default_palette(),
            dither: None,
            shr: ShrConfig::default(),
            byte_order: default_byte_order(),
            verbatim: false,
            tags: false,
        }
    }
}
