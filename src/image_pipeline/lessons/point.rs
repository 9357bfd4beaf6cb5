//! One-shot point operation lessons.
//!
//! Each shows the input next to the processed result and sets a status line.

use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::lessons::show_raster;
use crate::image_pipeline::output::Presenter;
use crate::image_pipeline::point_ops::{
    ColorAdjust, boost_saturation, contrast_stretch, equalize_luma, invert, threshold_binary,
    threshold_truncate,
};
use crate::image_pipeline::raster::types::Raster;

pub const ORIGINAL_WINDOW: &str = "Original";
pub const ORIGINAL_GRAY_WINDOW: &str = "Original (Gray)";

pub fn histogram(color: &Raster, presenter: &mut dyn Presenter) -> Result<()> {
    let equalized = equalize_luma(color)?;
    show_raster(presenter, ORIGINAL_WINDOW, color)?;
    show_raster(presenter, "Histogram Equalized", &equalized)?;
    presenter.set_status("Histogram equalization on the Y channel");
    Ok(())
}

pub fn truncation(color: &Raster, threshold: u8, presenter: &mut dyn Presenter) -> Result<()> {
    let gray = color.to_grayscale()?;
    let truncated = threshold_truncate(&gray, threshold);
    show_raster(presenter, ORIGINAL_GRAY_WINDOW, &gray)?;
    show_raster(presenter, "Truncated", &truncated)?;
    presenter.set_status(&format!("Truncation: threshold={}", threshold));
    Ok(())
}

pub fn color_adjust(color: &Raster, adjust: ColorAdjust, presenter: &mut dyn Presenter) -> Result<()> {
    let adjusted = boost_saturation(color, adjust)?;
    show_raster(presenter, ORIGINAL_WINDOW, color)?;
    show_raster(presenter, "Saturation & Color", &adjusted)?;
    presenter.set_status(&format!(
        "S channel +{}, red x{:.1}, blue x{:.1}",
        adjust.saturation_boost, adjust.red_gain, adjust.blue_gain
    ));
    Ok(())
}

pub fn inversion(color: &Raster, presenter: &mut dyn Presenter) -> Result<()> {
    let inverted = invert(color);
    show_raster(presenter, ORIGINAL_WINDOW, color)?;
    show_raster(presenter, "Inverted", &inverted)?;
    presenter.set_status("Per-pixel inversion: I' = 255 - I");
    Ok(())
}

pub fn threshold(color: &Raster, threshold: u8, presenter: &mut dyn Presenter) -> Result<()> {
    let gray = color.to_grayscale()?;
    let binary = threshold_binary(&gray, threshold);
    show_raster(presenter, ORIGINAL_GRAY_WINDOW, &gray)?;
    show_raster(presenter, "Binary", &binary)?;
    presenter.set_status(&format!("Binarization: threshold={}", threshold));
    Ok(())
}

pub fn stretch(color: &Raster, presenter: &mut dyn Presenter) -> Result<()> {
    let gray = color.to_grayscale()?;
    let (stretched, min, max) = contrast_stretch(&gray);
    show_raster(presenter, ORIGINAL_GRAY_WINDOW, &gray)?;
    show_raster(presenter, "Contrast Stretched", &stretched)?;
    presenter.set_status(&format!("Contrast stretch: min={:.1} max={:.1}", min as f64, max as f64));
    Ok(())
}
