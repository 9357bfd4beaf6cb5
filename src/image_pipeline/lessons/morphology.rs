//! Erosion and dilation driven by two sliders and a mode switch.

use tracing::debug;

use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::point_ops::{MAX_KERNEL_SIZE, dilate, erode, threshold_otsu};
use crate::image_pipeline::raster::types::Raster;

pub const MORPHOLOGY_WINDOW: &str = "OpenCV Morphology Trackbar";

/// What the morphology runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MorphologyMode {
    /// The loaded image as-is
    Color,
    /// Luma of the loaded image
    Gray,
    /// Luma binarized at the Otsu level
    Binary,
}

impl MorphologyMode {
    pub const ALL: [MorphologyMode; 3] = [MorphologyMode::Color, MorphologyMode::Gray, MorphologyMode::Binary];

    pub fn label(self) -> &'static str {
        match self {
            MorphologyMode::Color => "color",
            MorphologyMode::Gray => "gray",
            MorphologyMode::Binary => "binary",
        }
    }
}

/// State of one open morphology lesson.
pub struct MorphologySession {
    original: Raster,
    mode: MorphologyMode,
    erode_size: u8,
    dilate_size: u8,
}

impl MorphologySession {
    pub fn new(original: Raster) -> Self {
        Self {
            original,
            mode: MorphologyMode::Color,
            erode_size: 0,
            dilate_size: 0,
        }
    }

    pub fn mode(&self) -> MorphologyMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: MorphologyMode) {
        self.mode = mode;
    }

    pub fn erode_size(&self) -> u8 {
        self.erode_size
    }

    pub fn dilate_size(&self) -> u8 {
        self.dilate_size
    }

    /// Slider value, clamped to the slider range `0..=10`.
    pub fn set_erode_size(&mut self, size: u8) {
        self.erode_size = size.min(MAX_KERNEL_SIZE);
    }

    pub fn set_dilate_size(&mut self, size: u8) {
        self.dilate_size = size.min(MAX_KERNEL_SIZE);
    }

    /// Recomputes the displayed image from the original: mode conversion, then
    /// erosion, then dilation.
    pub fn render(&self) -> Result<Raster> {
        debug!(
            mode = self.mode.label(),
            erode = self.erode_size,
            dilate = self.dilate_size,
            "Applying morphology"
        );

        let base = match self.mode {
            MorphologyMode::Color => self.original.clone(),
            MorphologyMode::Gray => self.original.to_grayscale()?,
            MorphologyMode::Binary => threshold_otsu(&self.original.to_grayscale()?)?.0,
        };

        let eroded = erode(&base, self.erode_size)?;
        dilate(&eroded, self.dilate_size)
    }
}
