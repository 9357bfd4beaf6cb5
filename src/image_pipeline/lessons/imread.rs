//! Reading and displaying an image, plus the wrong row-stride demonstration.

use tracing::{info, warn};

use crate::image_pipeline::common::error::{ConversionError, Result};
use crate::image_pipeline::display::{DisplayImage, WrongStepDemo, to_display_image};
use crate::image_pipeline::output::Presenter;
use crate::image_pipeline::raster::types::Raster;

pub const IMREAD_WINDOW: &str = "imread";

/// Which of the two prepared images the lesson is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepView {
    Normal,
    WrongStep,
}

pub struct ImreadSession {
    correct: DisplayImage,
    wrong_step: DisplayImage,
    status: String,
    view: StepView,
}

impl ImreadSession {
    /// Prepares the normal and the misaligned rendering of `gray`.
    ///
    /// Fails with `UnsupportedFormat` when the raster cannot be displayed; the caller
    /// reports that and keeps running.
    pub fn load(gray: &Raster, source_label: &str, padding: usize) -> Result<Self> {
        let buffer = gray.as_buffer()?;
        let correct = to_display_image(&buffer)?;
        let demo = WrongStepDemo::build(&buffer, padding)?;
        let wrong_step = demo.wrong_view()?;

        let status = format!(
            "Loaded: {}\nSource step: {} bytes/row\nPacked step: {} bytes/row\nWrong step: {} bytes/row",
            source_label,
            buffer.row_stride(),
            demo.padded_stride(),
            demo.tight_stride(),
        );
        info!(
            source = source_label,
            padded_stride = demo.padded_stride(),
            "Prepared wrong step demonstration"
        );

        Ok(Self {
            correct,
            wrong_step,
            status,
            view: StepView::Normal,
        })
    }

    pub fn correct(&self) -> &DisplayImage {
        &self.correct
    }

    pub fn wrong_step(&self) -> &DisplayImage {
        &self.wrong_step
    }

    pub fn view(&self) -> StepView {
        self.view
    }

    /// Status text including which image is on screen.
    pub fn status(&self) -> String {
        let showing = match self.view {
            StepView::Normal => "normal step",
            StepView::WrongStep => "wrong step (misaligned)",
        };
        format!("{}\nShowing: {}", self.status, showing)
    }

    pub fn show_normal(&mut self, presenter: &mut dyn Presenter) -> Result<()> {
        self.view = StepView::Normal;
        presenter.show(IMREAD_WINDOW, &self.correct)?;
        presenter.set_status(&self.status());
        Ok(())
    }

    pub fn show_wrong_step(&mut self, presenter: &mut dyn Presenter) -> Result<()> {
        self.view = StepView::WrongStep;
        presenter.show(IMREAD_WINDOW, &self.wrong_step)?;
        presenter.set_status(&self.status());
        Ok(())
    }
}

/// Loads the lesson, turning an undisplayable image into a status message instead
/// of an error. Other failures still propagate.
pub fn load_or_report(
    gray: &Raster,
    source_label: &str,
    padding: usize,
    presenter: &mut dyn Presenter,
) -> Result<Option<ImreadSession>> {
    match ImreadSession::load(gray, source_label, padding) {
        Ok(session) => Ok(Some(session)),
        Err(e @ ConversionError::UnsupportedFormat { .. }) => {
            warn!(error = %e, "Image cannot be displayed");
            presenter.set_status(&format!("Image format error: {}", e));
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        shown: Vec<(String, DisplayImage)>,
        status: String,
    }

    impl Presenter for Recorder {
        fn show(&mut self, window: &str, image: &DisplayImage) -> Result<()> {
            self.shown.push((window.to_string(), image.clone()));
            Ok(())
        }

        fn set_status(&mut self, text: &str) {
            self.status = text.to_string();
        }
    }

    fn ramp() -> Raster {
        Raster::new(4, 3, 1, (0..12).collect()).unwrap()
    }

    #[test]
    fn normal_view_matches_source() {
        let mut session = ImreadSession::load(&ramp(), "ramp.png", 16).unwrap();
        let mut recorder = Recorder::default();
        session.show_normal(&mut recorder).unwrap();

        assert_eq!(session.view(), StepView::Normal);
        assert_eq!(recorder.shown[0].0, IMREAD_WINDOW);
        assert_eq!(recorder.shown[0].1.to_packed(), ramp().data);
        assert!(recorder.status.ends_with("Showing: normal step"));
    }

    #[test]
    fn wrong_step_view_is_sheared() {
        let mut session = ImreadSession::load(&ramp(), "ramp.png", 16).unwrap();
        let mut recorder = Recorder::default();
        session.show_wrong_step(&mut recorder).unwrap();

        assert_eq!(session.view(), StepView::WrongStep);
        let shown = &recorder.shown[0].1;
        assert_eq!(shown.row(0), &[0, 1, 2, 3]);
        // second row starts inside the zero padding of the first
        assert_eq!(shown.row(1), &[0, 0, 0, 0]);
        assert!(recorder.status.contains("Packed step: 20 bytes/row"));
        assert!(recorder.status.contains("Wrong step: 4 bytes/row"));
    }

    #[test]
    fn undisplayable_image_becomes_status() {
        let two_channel = Raster::filled(2, 2, 2, 0);
        let mut recorder = Recorder::default();
        let session = load_or_report(&two_channel, "odd.png", 16, &mut recorder).unwrap();

        assert!(session.is_none());
        assert!(recorder.status.starts_with("Image format error"));
        assert!(recorder.shown.is_empty());
    }
}
