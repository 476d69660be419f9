pub mod conversion;
pub mod file_writer;
pub mod image_loader;
pub mod native;
pub mod preview;

pub use conversion::{dhgr_files, shr_files, Conversion, ConversionService};
pub use file_writer::{output_stem, write_atomic, write_outputs};
pub use image_loader::{decode_png, load_palette_strip, load_png, palette_strip};
pub use native::{pack_to_apf, NativeKind, NativePicture};
pub use preview::encode_preview;
