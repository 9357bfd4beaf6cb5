//! Image processing pipeline module
//!
//! Decoding into row-strided rasters, the adapter that turns them into displayable
//! RGB/RGBA images, the point operations the lessons teach and the orchestration
//! that runs them.

pub mod common;
pub mod raster;
pub mod display;
pub mod point_ops;
pub mod output;
pub mod lessons;
pub mod pipeline;

pub use common::{
    ConversionError,
    Result,
};

pub use raster::{
    ImageCrateReader,
    Raster,
    RasterBuffer,
    RasterReader,
    ReadMode,
};

pub use display::{
    DisplayFormat,
    DisplayImage,
    WrongStepDemo,
    WRONG_STEP_PADDING,
    to_display_image,
};

pub use output::{
    DirectoryPresenter,
    LessonConfig,
    LessonConfigBuilder,
    PngWriter,
    Presenter,
    RasterWriter,
    StandardTiffWriter,
    TiffCompression,
};

pub use lessons::Lesson;

pub use pipeline::{
    LessonPipeline,
    LessonReport,
};
