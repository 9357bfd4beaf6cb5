//! Lessons module
//!
//! One session type per interactive lesson, plus the one-shot point operation
//! lessons. Sessions own their state and live exactly as long as the lesson.

mod catalog;
pub mod boundary;
pub mod canvas;
pub mod gamma;
pub mod imread;
pub mod imwrite;
pub mod morphology;
pub mod point;

pub use catalog::Lesson;
pub use boundary::BoundarySession;
pub use canvas::{BrushColor, CanvasSession, MouseEvent, MouseHandler};
pub use gamma::GammaSession;
pub use imread::{ImreadSession, StepView};
pub use imwrite::generate_gradient;
pub use morphology::{MorphologyMode, MorphologySession};

use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::display::to_display_image;
use crate::image_pipeline::output::Presenter;
use crate::image_pipeline::raster::types::Raster;

/// Converts `raster` for display and hands it to `presenter`.
pub fn show_raster(presenter: &mut dyn Presenter, window: &str, raster: &Raster) -> Result<()> {
    let image = to_display_image(&raster.as_buffer()?)?;
    presenter.show(window, &image)
}
