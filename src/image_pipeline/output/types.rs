//! Lesson configuration types

use std::path::PathBuf;

use crate::image_pipeline::display::WRONG_STEP_PADDING;
use crate::image_pipeline::point_ops::ColorAdjust;

/// TIFF compression methods
#[derive(Debug, Clone, Copy)]
pub enum TiffCompression {
    /// No compression (fastest, largest file)
    None,
    /// LZW compression (slow, good compression)
    Lzw,
    /// Deflate compression - fast level (good speed/size balance)
    DeflateFast,
    /// Deflate compression - best compression (slower)
    DeflateBest,
    /// Deflate compression - balanced (default)
    DeflateBalanced,
}

/// Configuration shared by every lesson in a run
#[derive(Debug, Clone)]
pub struct LessonConfig {
    /// Image the lessons load
    pub input_path: PathBuf,
    /// Directory each displayed window is written to
    pub output_dir: PathBuf,
    /// Compression method for TIFF output
    pub compression: TiffCompression,
    /// Predictor value for TIFF compression (2 for horizontal differencing)
    pub predictor: Option<u16>,
    /// Whether to validate decoded image dimensions before running lessons
    pub validate_dimensions: bool,
    /// Largest accepted width or height when validating
    pub max_dimension: Option<usize>,
    /// Row padding used by the wrong step demonstration
    pub wrong_step_padding: usize,
    /// Gamma slider position, gamma = slider / 10
    pub gamma_slider: u32,
    /// Level for the binary threshold lesson
    pub binary_threshold: u8,
    /// Level for the truncation lesson
    pub truncation_threshold: u8,
    /// Saturation boost and channel gains
    pub color_adjust: ColorAdjust,
    /// Initial erode slider of the morphology lesson
    pub erode_size: u8,
    /// Initial dilate slider of the morphology lesson
    pub dilate_size: u8,
    /// Initial erode slider of the boundary lesson
    pub boundary_erode_size: u8,
    /// Brush thickness of the drawing canvas
    pub brush_thickness: u32,
}

impl Default for LessonConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from("cat.jpg"),
            output_dir: PathBuf::from("lesson_output"),
            compression: TiffCompression::None,
            predictor: None,
            validate_dimensions: true,
            max_dimension: Some(50000),
            wrong_step_padding: WRONG_STEP_PADDING,
            gamma_slider: 6,
            binary_threshold: 128,
            truncation_threshold: 120,
            color_adjust: ColorAdjust::default(),
            erode_size: 0,
            dilate_size: 0,
            boundary_erode_size: 1,
            brush_thickness: 2,
        }
    }
}

impl LessonConfig {
    pub fn builder() -> LessonConfigBuilder {
        LessonConfigBuilder::default()
    }
}

/// Builder for LessonConfig
#[derive(Default)]
pub struct LessonConfigBuilder {
    input_path: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    compression: Option<TiffCompression>,
    predictor: Option<Option<u16>>,
    validate_dimensions: Option<bool>,
    max_dimension: Option<Option<usize>>,
    wrong_step_padding: Option<usize>,
    gamma_slider: Option<u32>,
    binary_threshold: Option<u8>,
    truncation_threshold: Option<u8>,
    color_adjust: Option<ColorAdjust>,
    erode_size: Option<u8>,
    dilate_size: Option<u8>,
    boundary_erode_size: Option<u8>,
    brush_thickness: Option<u32>,
}

impl LessonConfigBuilder {
    pub fn input_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.input_path = Some(path.into());
        self
    }

    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    pub fn compression(mut self, compression: TiffCompression) -> Self {
        self.compression = Some(compression);
        self
    }

    pub fn predictor(mut self, predictor: Option<u16>) -> Self {
        self.predictor = Some(predictor);
        self
    }

    pub fn validate_dimensions(mut self, validate: bool) -> Self {
        self.validate_dimensions = Some(validate);
        self
    }

    pub fn max_dimension(mut self, max: Option<usize>) -> Self {
        self.max_dimension = Some(max);
        self
    }

    pub fn wrong_step_padding(mut self, padding: usize) -> Self {
        self.wrong_step_padding = Some(padding);
        self
    }

    pub fn gamma_slider(mut self, slider: u32) -> Self {
        self.gamma_slider = Some(slider);
        self
    }

    pub fn binary_threshold(mut self, threshold: u8) -> Self {
        self.binary_threshold = Some(threshold);
        self
    }

    pub fn truncation_threshold(mut self, threshold: u8) -> Self {
        self.truncation_threshold = Some(threshold);
        self
    }

    pub fn color_adjust(mut self, adjust: ColorAdjust) -> Self {
        self.color_adjust = Some(adjust);
        self
    }

    pub fn erode_size(mut self, size: u8) -> Self {
        self.erode_size = Some(size);
        self
    }

    pub fn dilate_size(mut self, size: u8) -> Self {
        self.dilate_size = Some(size);
        self
    }

    pub fn boundary_erode_size(mut self, size: u8) -> Self {
        self.boundary_erode_size = Some(size);
        self
    }

    pub fn brush_thickness(mut self, thickness: u32) -> Self {
        self.brush_thickness = Some(thickness);
        self
    }

    pub fn build(self) -> LessonConfig {
        let default = LessonConfig::default();
        LessonConfig {
            input_path: self.input_path.unwrap_or(default.input_path),
            output_dir: self.output_dir.unwrap_or(default.output_dir),
            compression: self.compression.unwrap_or(default.compression),
            predictor: self.predictor.unwrap_or(default.predictor),
            validate_dimensions: self.validate_dimensions.unwrap_or(default.validate_dimensions),
            max_dimension: self.max_dimension.unwrap_or(default.max_dimension),
            wrong_step_padding: self.wrong_step_padding.unwrap_or(default.wrong_step_padding),
            gamma_slider: self.gamma_slider.unwrap_or(default.gamma_slider),
            binary_threshold: self.binary_threshold.unwrap_or(default.binary_threshold),
            truncation_threshold: self.truncation_threshold.unwrap_or(default.truncation_threshold),
            color_adjust: self.color_adjust.unwrap_or(default.color_adjust),
            erode_size: self.erode_size.unwrap_or(default.erode_size),
            dilate_size: self.dilate_size.unwrap_or(default.dilate_size),
            boundary_erode_size: self.boundary_erode_size.unwrap_or(default.boundary_erode_size),
            brush_thickness: self.brush_thickness.unwrap_or(default.brush_thickness),
        }
    }
}
