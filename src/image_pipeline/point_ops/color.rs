//! Colour point operations: luma histogram equalization and saturation boost.
//!
//! Both work on BGR(A) rasters as produced by the decoder. Alpha, when present, is
//! carried through untouched.

use tracing::debug;

use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::point_ops::lut::{saturate, scale};
use crate::image_pipeline::raster::types::Raster;

/// Saturation and channel gains applied by [`boost_saturation`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorAdjust {
    /// Added to the 8-bit HSV saturation, saturating at 255
    pub saturation_boost: u8,
    /// Multiplier for the red channel
    pub red_gain: f64,
    /// Multiplier for the blue channel
    pub blue_gain: f64,
}

impl Default for ColorAdjust {
    fn default() -> Self {
        Self {
            saturation_boost: 40,
            red_gain: 1.2,
            blue_gain: 0.8,
        }
    }
}

/// Equalizes the luma histogram while keeping chroma.
///
/// Colour input goes through YCrCb, only Y is equalized (by `imageproc`) and the
/// pixels are rebuilt from the new Y and the original Cr/Cb. Gray input is equalized
/// directly.
pub fn equalize_luma(raster: &Raster) -> Result<Raster> {
    match raster.channels {
        1 => Ok(Raster::from_gray_image(imageproc::contrast::equalize_histogram(
            &raster.to_gray_image()?,
        ))),
        3 | 4 => {
            let channels = raster.channels;
            let ycrcb: Vec<(u8, f64, f64)> = raster
                .data
                .chunks_exact(channels)
                .map(|px| bgr_to_ycrcb(px[0], px[1], px[2]))
                .collect();

            let luma = Raster {
                width: raster.width,
                height: raster.height,
                channels: 1,
                data: ycrcb.iter().map(|&(y, _, _)| y).collect(),
            };
            let equalized = imageproc::contrast::equalize_histogram(&luma.to_gray_image()?);

            let mut data = raster.data.clone();
            for ((px, &(_, cr, cb)), &y) in data
                .chunks_exact_mut(channels)
                .zip(ycrcb.iter())
                .zip(equalized.as_raw().iter())
            {
                let [b, g, r] = ycrcb_to_bgr(y, cr, cb);
                px[..3].copy_from_slice(&[b, g, r]);
            }
            Ok(Raster { data, ..raster.clone() })
        }
        _ => Err(raster.unsupported()),
    }
}

/// Raises HSV saturation, then boosts red and damps blue.
pub fn boost_saturation(raster: &Raster, adjust: ColorAdjust) -> Result<Raster> {
    let channels = raster.channels;
    if channels != 3 && channels != 4 {
        return Err(raster.unsupported());
    }
    debug!(?adjust, "Adjusting saturation");

    let mut data = raster.data.clone();
    for px in data.chunks_exact_mut(channels) {
        let (h, s, v) = bgr_to_hsv(px[0], px[1], px[2]);
        let s = s.saturating_add(adjust.saturation_boost);
        let [b, g, r] = hsv_to_bgr(h, s, v);
        px[..3].copy_from_slice(&[b, g, r]);
    }

    let mut planes = Raster { data, ..raster.clone() }.split_channels();
    scale(&mut planes[2].data, adjust.red_gain);
    scale(&mut planes[0].data, adjust.blue_gain);
    Raster::merge_channels(&planes)
}

fn bgr_to_ycrcb(b: u8, g: u8, r: u8) -> (u8, f64, f64) {
    let (b, g, r) = (b as f64, g as f64, r as f64);
    let y = 0.299 * r + 0.587 * g + 0.114 * b;
    let cr = (r - y) * 0.713 + 128.0;
    let cb = (b - y) * 0.564 + 128.0;
    (saturate(y), cr, cb)
}

fn ycrcb_to_bgr(y: u8, cr: f64, cb: f64) -> [u8; 3] {
    let y = y as f64;
    let r = y + 1.403 * (cr - 128.0);
    let g = y - 0.714 * (cr - 128.0) - 0.344 * (cb - 128.0);
    let b = y + 1.773 * (cb - 128.0);
    [saturate(b), saturate(g), saturate(r)]
}

/// Hue in degrees `[0, 360)`, saturation and value on the 8-bit scale.
fn bgr_to_hsv(b: u8, g: u8, r: u8) -> (f64, u8, u8) {
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = (max - min) as f64;

    let s = if max == 0 { 0.0 } else { delta * 255.0 / max as f64 };
    let h = if delta == 0.0 {
        0.0
    } else if max == r {
        60.0 * (g as f64 - b as f64) / delta
    } else if max == g {
        120.0 + 60.0 * (b as f64 - r as f64) / delta
    } else {
        240.0 + 60.0 * (r as f64 - g as f64) / delta
    };
    let h = if h < 0.0 { h + 360.0 } else { h };

    (h, saturate(s), max)
}

fn hsv_to_bgr(h: f64, s: u8, v: u8) -> [u8; 3] {
    let s = s as f64 / 255.0;
    let v = v as f64;
    let sector = (h / 60.0).floor();
    let f = h / 60.0 - sector;
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));

    let (r, g, b) = match sector as i64 % 6 {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    };
    [saturate(b), saturate(g), saturate(r)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hsv_round_trip_of_primaries() {
        for bgr in [[0u8, 0, 255], [0, 255, 0], [255, 0, 0], [40, 90, 200]] {
            let (h, s, v) = bgr_to_hsv(bgr[0], bgr[1], bgr[2]);
            let back = hsv_to_bgr(h, s, v);
            for (a, b) in back.iter().zip(bgr.iter()) {
                assert!((*a as i32 - *b as i32).abs() <= 1, "{:?} -> {:?}", bgr, back);
            }
        }
    }

    #[test]
    fn saturation_boost_tints_gray() {
        let raster = Raster::new(1, 1, 3, vec![100, 100, 100]).unwrap();
        let out = boost_saturation(&raster, ColorAdjust::default()).unwrap();
        // hue 0 (red): G = B = 100 * (1 - 40/255) = 84; then R * 1.2, B * 0.8
        assert_eq!(out.data, vec![67, 84, 120]);
    }

    #[test]
    fn saturation_keeps_alpha() {
        let raster = Raster::new(1, 1, 4, vec![10, 20, 30, 99]).unwrap();
        let out = boost_saturation(&raster, ColorAdjust::default()).unwrap();
        assert_eq!(out.channels, 4);
        assert_eq!(out.data[3], 99);
    }

    #[test]
    fn saturation_rejects_gray() {
        let raster = Raster::filled(2, 2, 1, 10);
        assert!(boost_saturation(&raster, ColorAdjust::default()).is_err());
    }

    #[test]
    fn equalize_gray_spreads_levels() {
        let raster = Raster::new(4, 1, 1, vec![100, 100, 110, 110]).unwrap();
        let out = equalize_luma(&raster).unwrap();
        assert_eq!(out.channels, 1);
        assert!(out.data[0] < out.data[2]);
        assert_eq!(out.data[2], 255);
    }

    #[test]
    fn equalize_color_keeps_neutral_pixels_neutral() {
        let raster = Raster::new(
            4,
            1,
            3,
            vec![100, 100, 100, 100, 100, 100, 110, 110, 110, 110, 110, 110],
        )
        .unwrap();
        let out = equalize_luma(&raster).unwrap();
        for px in out.data.chunks_exact(3) {
            assert_eq!(px[0], px[1]);
            assert_eq!(px[1], px[2]);
        }
        assert_eq!(out.data[6], 255);
        assert!(out.data[0] < out.data[6]);
    }
}
