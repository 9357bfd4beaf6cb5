//! Presentation boundary.
//!
//! Lessons push finished images and status text through a [`Presenter`]. The crate
//! ships a presenter that writes each window to disk; an interactive front end would
//! implement the same trait and paint instead.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::image_pipeline::common::error::{ConversionError, Result};
use crate::image_pipeline::display::DisplayImage;
use crate::image_pipeline::output::types::LessonConfig;
use crate::image_pipeline::output::writer::RasterWriter;

pub trait Presenter {
    /// Shows `image` in the window called `window`, replacing what it showed before.
    fn show(&mut self, window: &str, image: &DisplayImage) -> Result<()>;
    /// Replaces the status line of the current lesson.
    fn set_status(&mut self, text: &str);
}

/// Writes every shown window as `<output_dir>/<window>.<ext>` and logs status text.
pub struct DirectoryPresenter<'a, W: RasterWriter> {
    writer: &'a W,
    config: &'a LessonConfig,
    written: Vec<PathBuf>,
    statuses: Vec<String>,
}

impl<'a, W: RasterWriter> DirectoryPresenter<'a, W> {
    /// Creates the output directory if needed.
    pub fn new(writer: &'a W, config: &'a LessonConfig) -> Result<Self> {
        std::fs::create_dir_all(&config.output_dir).map_err(|e| {
            ConversionError::OutputWriteError(format!("{}: {}", config.output_dir.display(), e))
        })?;
        Ok(Self {
            writer,
            config,
            written: Vec::new(),
            statuses: Vec::new(),
        })
    }

    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    pub fn statuses(&self) -> &[String] {
        &self.statuses
    }

    fn path_for(&self, window: &str) -> PathBuf {
        self.config
            .output_dir
            .join(format!("{}.{}", window_file_stem(window), self.writer.extension()))
    }
}

impl<W: RasterWriter> Presenter for DirectoryPresenter<'_, W> {
    fn show(&mut self, window: &str, image: &DisplayImage) -> Result<()> {
        let path = self.path_for(window);
        write_to_path(self.writer, image, &path, self.config)?;
        info!(window, path = %path.display(), "Window written");
        if !self.written.contains(&path) {
            self.written.push(path);
        }
        Ok(())
    }

    fn set_status(&mut self, text: &str) {
        for line in text.lines() {
            info!(status = line, "Status");
        }
        self.statuses.push(text.to_string());
    }
}

/// Encodes `image` with `writer` into a new file at `path`.
pub fn write_to_path<W: RasterWriter + ?Sized>(
    writer: &W,
    image: &DisplayImage,
    path: &Path,
    config: &LessonConfig,
) -> Result<()> {
    let file = File::create(path).map_err(|e| {
        ConversionError::OutputWriteError(format!("{}: {}", path.display(), e))
    })?;
    let mut output = BufWriter::new(file);
    writer.write_image(image, &mut output, config)?;
    std::io::Write::flush(&mut output)?;
    Ok(())
}

/// Lower-case file stem for a window title: alphanumerics kept, runs of anything
/// else collapsed to one underscore.
pub fn window_file_stem(window: &str) -> String {
    let mut stem = String::with_capacity(window.len());
    for ch in window.chars() {
        if ch.is_ascii_alphanumeric() {
            stem.push(ch.to_ascii_lowercase());
        } else if !stem.is_empty() && !stem.ends_with('_') {
            stem.push('_');
        }
    }
    while stem.ends_with('_') {
        stem.pop();
    }
    if stem.is_empty() {
        warn!(window, "Window title has no usable characters");
        stem.push_str("window");
    }
    stem
}
