//! Raster reader backed by the `image` crate.
//!
//! Decodes any container the `image` crate understands (JPEG, PNG, TIFF, BMP, ...)
//! and hands the pixels back in the channel order a BGR-first decoder produces, so the
//! display adapter always sees the same layout regardless of where the bytes came from.

use image::{DynamicImage, GenericImageView};
use tracing::debug;

use crate::image_pipeline::common::error::{ConversionError, Result};
use crate::image_pipeline::raster::reader::RasterReader;
use crate::image_pipeline::raster::types::{Raster, ReadMode, bgr_to_luma};

pub struct ImageCrateReader;

impl RasterReader for ImageCrateReader {
    /// Decodes `data` and shapes the result according to `mode`.
    ///
    /// * `Grayscale` - one channel, BT.601 luma
    /// * `Color` - three channels, B G R
    /// * `Unchanged` - one channel for opaque gray sources, four (B G R A) for anything
    ///   with alpha, three otherwise
    fn read_raster(&self, data: &[u8], mode: ReadMode) -> Result<Raster> {
        debug!("Decoding image, {} bytes", data.len());

        let decoded = image::load_from_memory(data)
            .map_err(|e| ConversionError::DecodeError(e.to_string()))?;

        let (width, height) = decoded.dimensions();
        debug!(width, height, color = ?decoded.color(), ?mode, "Decoded image");

        let channels = match mode {
            ReadMode::Grayscale => 1,
            ReadMode::Color => 3,
            ReadMode::Unchanged => {
                let color = decoded.color();
                if color.has_alpha() {
                    4
                } else if color.has_color() {
                    3
                } else {
                    1
                }
            }
        };

        let data = match channels {
            1 => to_gray_bytes(&decoded),
            3 => swap_red_blue(decoded.to_rgb8().into_raw(), 3),
            _ => swap_red_blue(decoded.to_rgba8().into_raw(), 4),
        };

        Raster::new(width as usize, height as usize, channels, data)
    }
}

/// Luma computed from the colour pixels so grayscale reads agree with
/// `Raster::to_grayscale` on the same file. Gray sources are taken as-is.
fn to_gray_bytes(decoded: &DynamicImage) -> Vec<u8> {
    if !decoded.color().has_color() {
        return decoded.to_luma8().into_raw();
    }
    decoded
        .to_rgb8()
        .pixels()
        .map(|p| bgr_to_luma(p[2], p[1], p[0]))
        .collect()
}

fn swap_red_blue(mut data: Vec<u8>, channels: usize) -> Vec<u8> {
    for px in data.chunks_exact_mut(channels) {
        px.swap(0, 2);
    }
    data
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgb, RgbImage, Rgba, RgbaImage};
    use std::io::Cursor;

    fn encode_png(image: DynamicImage) -> Vec<u8> {
        let mut bytes = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();
        bytes
    }

    #[test]
    fn color_read_is_bgr() {
        let image = RgbImage::from_pixel(2, 1, Rgb([10, 20, 30]));
        let bytes = encode_png(DynamicImage::ImageRgb8(image));

        let raster = ImageCrateReader.read_raster(&bytes, ReadMode::Color).unwrap();
        assert_eq!(raster.channels, 3);
        assert_eq!(raster.data, vec![30, 20, 10, 30, 20, 10]);
    }

    #[test]
    fn unchanged_keeps_alpha() {
        let image = RgbaImage::from_pixel(1, 1, Rgba([1, 2, 3, 200]));
        let bytes = encode_png(DynamicImage::ImageRgba8(image));

        let raster = ImageCrateReader.read_raster(&bytes, ReadMode::Unchanged).unwrap();
        assert_eq!(raster.channels, 4);
        assert_eq!(raster.data, vec![3, 2, 1, 200]);
    }

    #[test]
    fn grayscale_read_matches_luma() {
        let image = RgbImage::from_pixel(1, 1, Rgb([255, 255, 255]));
        let bytes = encode_png(DynamicImage::ImageRgb8(image));

        let raster = ImageCrateReader.read_raster(&bytes, ReadMode::Grayscale).unwrap();
        assert_eq!(raster.channels, 1);
        assert_eq!(raster.data, vec![255]);
    }

    #[test]
    fn garbage_is_a_decode_error() {
        let result = ImageCrateReader.read_raster(b"not an image", ReadMode::Color);
        assert!(matches!(result, Err(ConversionError::DecodeError(_))));
    }
}
