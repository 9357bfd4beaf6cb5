//! Lookup-table based point operations.
//!
//! Every operation here maps each byte independently, so they all reduce to building
//! a 256 entry table and running the raster through it.

use tracing::debug;

use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::raster::types::Raster;

pub type Lut = [u8; 256];

/// `lut[i] = round((i / 255)^gamma * 255)`, saturated to `0..=255`.
///
/// `gamma < 1` brightens the shadows, `gamma > 1` darkens the image, `1` is identity.
pub fn build_gamma_lut(gamma: f64) -> Lut {
    let mut lut = [0u8; 256];
    for (i, entry) in lut.iter_mut().enumerate() {
        let normalized = i as f64 / 255.0;
        *entry = saturate(normalized.powf(gamma) * 255.0);
    }
    lut
}

/// Maps every byte of every channel through `lut`.
pub fn apply_lut(raster: &Raster, lut: &Lut) -> Raster {
    Raster {
        data: raster.data.iter().map(|&v| lut[v as usize]).collect(),
        ..raster.clone()
    }
}

pub fn apply_gamma(raster: &Raster, gamma: f64) -> Raster {
    apply_lut(raster, &build_gamma_lut(gamma))
}

/// Bitwise not of every byte, `v' = 255 - v`. Applies to alpha as well.
pub fn invert(raster: &Raster) -> Raster {
    Raster {
        data: raster.data.iter().map(|&v| !v).collect(),
        ..raster.clone()
    }
}

/// `v > threshold` becomes 255, everything else 0.
pub fn threshold_binary(raster: &Raster, threshold: u8) -> Raster {
    let lut: Lut = std::array::from_fn(|i| if i > threshold as usize { 255 } else { 0 });
    apply_lut(raster, &lut)
}

/// Values above `threshold` are clamped down to it.
pub fn threshold_truncate(raster: &Raster, threshold: u8) -> Raster {
    let lut: Lut = std::array::from_fn(|i| (i as u8).min(threshold));
    apply_lut(raster, &lut)
}

/// Binary threshold at the level chosen by Otsu's method. Gray input only.
pub fn threshold_otsu(raster: &Raster) -> Result<(Raster, u8)> {
    let level = imageproc::contrast::otsu_level(&raster.to_gray_image()?);
    debug!(level, "Otsu level");
    Ok((threshold_binary(raster, level), level))
}

/// Linear stretch of `[min, max]` onto `[0, 255]`.
///
/// Returns the stretched raster together with the observed `(min, max)`. A flat image
/// (`min == max`) is returned unchanged.
pub fn contrast_stretch(raster: &Raster) -> (Raster, u8, u8) {
    let min = raster.data.iter().copied().min().unwrap_or(0);
    let max = raster.data.iter().copied().max().unwrap_or(0);
    if max <= min {
        return (raster.clone(), min, max);
    }

    let alpha = 255.0 / (max - min) as f64;
    let beta = -(min as f64) * alpha;
    let lut: Lut = std::array::from_fn(|i| saturate(i as f64 * alpha + beta));
    (apply_lut(raster, &lut), min, max)
}

/// Scales every byte by `gain`, saturating.
pub fn scale(values: &mut [u8], gain: f64) {
    let lut: Lut = std::array::from_fn(|i| saturate(i as f64 * gain));
    for v in values.iter_mut() {
        *v = lut[*v as usize];
    }
}

pub(crate) fn saturate(value: f64) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}
