//! Display module
//!
//! Turns decoded rasters into images a presentation layer can paint, and builds the
//! wrong row-stride demonstration.

mod adapter;
mod stride_demo;
pub mod types;


pub use adapter::to_display_image;
pub use stride_demo::{WRONG_STEP_PADDING, WrongStepDemo};
pub use types::{DisplayFormat, DisplayImage};
