//! Raster module
//!
//! Decoded pixel buffers and the decoder boundary that produces them.

mod reader;
mod image_reader;
pub mod types;

pub use reader::RasterReader;
pub use image_reader::ImageCrateReader;
pub use types::{Raster, RasterBuffer, ReadMode};
