//! Output module
//!
//! Encoders for displayed images, the presentation boundary and the lesson
//! configuration.

mod writer;
mod png_writer;
mod standard_tiff_writer;
pub mod presenter;
pub mod types;

pub use writer::RasterWriter;
pub use png_writer::PngWriter;
pub use standard_tiff_writer::StandardTiffWriter;
pub use presenter::{DirectoryPresenter, Presenter};
pub use types::{LessonConfig, LessonConfigBuilder, TiffCompression};
