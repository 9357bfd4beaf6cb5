//! Erosion, dilation and boundary extraction.
//!
//! The structuring element is a square of side `2 * size + 1`. The morphology itself
//! comes from `imageproc`; colour rasters are processed one channel at a time.

use imageproc::morphology::{Mask, grayscale_dilate, grayscale_erode};

use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::raster::types::Raster;

/// Largest size the lessons' sliders allow.
pub const MAX_KERNEL_SIZE: u8 = 10;

/// Replaces every pixel by the minimum over its `(2 * size + 1)^2` neighbourhood.
/// Bright regions shrink. `size == 0` returns a copy.
pub fn erode(raster: &Raster, size: u8) -> Result<Raster> {
    per_channel(raster, size, grayscale_erode)
}

/// Replaces every pixel by the maximum over its `(2 * size + 1)^2` neighbourhood.
/// Bright regions grow. `size == 0` returns a copy.
pub fn dilate(raster: &Raster, size: u8) -> Result<Raster> {
    per_channel(raster, size, grayscale_dilate)
}

/// `src - erode(src, size)`: the inner edge of bright regions. Gray input only.
pub fn boundary(gray: &Raster, size: u8) -> Result<Raster> {
    if gray.channels != 1 {
        return Err(gray.unsupported());
    }
    let eroded = erode(gray, size)?;
    let data = gray
        .data
        .iter()
        .zip(eroded.data.iter())
        .map(|(&a, &b)| a.abs_diff(b))
        .collect();
    Ok(Raster { data, ..gray.clone() })
}

fn per_channel(
    raster: &Raster,
    size: u8,
    op: fn(&image::GrayImage, &Mask) -> image::GrayImage,
) -> Result<Raster> {
    if size == 0 {
        return Ok(raster.clone());
    }
    let mask = Mask::square(size);

    if raster.channels == 1 {
        return Ok(Raster::from_gray_image(op(&raster.to_gray_image()?, &mask)));
    }

    let planes = raster
        .split_channels()
        .iter()
        .map(|plane| Ok(Raster::from_gray_image(op(&plane.to_gray_image()?, &mask))))
        .collect::<Result<Vec<_>>>()?;
    Raster::merge_channels(&planes)
}
