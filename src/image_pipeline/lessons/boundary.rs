//! Boundary extraction: the image minus its erosion.

use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::point_ops::{MAX_KERNEL_SIZE, boundary};
use crate::image_pipeline::raster::types::Raster;

pub const BOUNDARY_WINDOW: &str = "OpenCV Erosion Boundary";

pub struct BoundarySession {
    gray: Raster,
    erode_size: u8,
}

impl BoundarySession {
    /// Colour input is reduced to luma first.
    pub fn new(original: &Raster) -> Result<Self> {
        Ok(Self {
            gray: original.to_grayscale()?,
            erode_size: 1,
        })
    }

    pub fn erode_size(&self) -> u8 {
        self.erode_size
    }

    /// Clamped to `1..=10`; a zero-sized element would extract nothing.
    pub fn set_erode_size(&mut self, size: u8) {
        self.erode_size = size.clamp(1, MAX_KERNEL_SIZE);
    }

    pub fn render(&self) -> Result<Raster> {
        boundary(&self.gray, self.erode_size)
    }
}
