//! Gamma correction with a slider.

use crate::image_pipeline::point_ops::apply_gamma;
use crate::image_pipeline::raster::types::Raster;

pub const GAMMA_WINDOW: &str = "Gamma Result";
pub const MIN_GAMMA_SLIDER: u32 = 1;
pub const MAX_GAMMA_SLIDER: u32 = 50;

pub struct GammaSession {
    gray: Raster,
    slider: u32,
}

impl GammaSession {
    pub fn new(gray: Raster, slider: u32) -> Self {
        Self {
            gray,
            slider: slider.clamp(MIN_GAMMA_SLIDER, MAX_GAMMA_SLIDER),
        }
    }

    /// Clamped to `1..=50`.
    pub fn set_slider(&mut self, slider: u32) {
        self.slider = slider.clamp(MIN_GAMMA_SLIDER, MAX_GAMMA_SLIDER);
    }

    pub fn slider(&self) -> u32 {
        self.slider
    }

    /// Slider position divided by ten.
    pub fn gamma(&self) -> f64 {
        self.slider as f64 / 10.0
    }

    pub fn effect(&self) -> &'static str {
        match self.slider {
            s if s < 10 => "brighter (shadows lifted)",
            s if s > 10 => "darker (highlights emphasized)",
            _ => "unchanged (identity)",
        }
    }

    pub fn status(&self) -> String {
        format!("gamma = {:.2} -> {}", self.gamma(), self.effect())
    }

    pub fn render(&self) -> Raster {
        apply_gamma(&self.gray, self.gamma())
    }
}
