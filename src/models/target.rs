use clap::ValueEnum;

/// File layout for double hi-res output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum DhgrFormat {
    /// 16 KiB, aux bank then main bank
    #[default]
    A2fc,
    /// Separate .AUX and .BIN halves
    AuxBin,
    /// DHR raster with header
    Dhr,
    /// DHR raster, run-length encoded
    Dhx,
}

/// File layout for super hi-res output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ShrFormat {
    /// PIC for shared palettes, Brooks for per-line palettes
    #[default]
    Auto,
    Pic,
    Brooks,
    /// Apple Preferred Format (PackBytes compressed)
    Apf,
}

/// One file produced by a conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputFile {
    /// File name extension, without the dot
    pub extension: &'static str,
    /// CiderPress type/aux suffix, e.g. `#C10000`
    pub tag: Option<&'static str>,
    pub bytes: Vec<u8>,
}

impl OutputFile {
    pub fn new(extension: &'static str, tag: Option<&'static str>, bytes: Vec<u8>) -> Self {
        Self {
            extension,
            tag,
            bytes,
        }
    }

    /// File name for `stem`, with the CiderPress tag when requested.
    pub fn file_name(&self, stem: &str, tags: bool) -> String {
        match (tags, self.tag) {
            (true, Some(tag)) => format!("{stem}.{}{tag}", self.extension),
            _ => format!("{stem}.{}", self.extension),
        }
    }
}

/// CiderPress suffixes: ProDOS file type then aux type.
pub mod tags {
    pub const BIN_2000: &str = "#062000";
    pub const BIN_0400: &str = "#060400";
    pub const PIC: &str = "#C10000";
    pub const BROOKS: &str = "#C10002";
    pub const APF: &str = "#C00002";
}
