pub mod config;
pub mod target;

pub use config::{AppConfig, DitherConfig, ShrConfig, ShrModeName};
pub use target::{tags, DhgrFormat, OutputFile, ShrFormat};
