use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::raster::types::{Raster, ReadMode};

pub trait RasterReader {
    fn read_raster(&self, data: &[u8], mode: ReadMode) -> Result<Raster>;
}
