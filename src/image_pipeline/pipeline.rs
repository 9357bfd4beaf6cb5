//! Pipeline module
//!
//! Orchestrates the lessons: decode once, run every lesson in order and report.

mod lesson_pipeline;
#[cfg(test)]
mod tests;

pub use lesson_pipeline::{LessonPipeline, LessonReport, ScopedPresenter};
