//! Display image types

use image::{DynamicImage, GrayImage, RgbImage, RgbaImage};

use crate::image_pipeline::common::error::{ConversionError, Result};

/// Pixel format of an image ready for presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayFormat {
    /// One byte of luma per pixel
    Grayscale8,
    /// R G B, one byte each
    Rgb888,
    /// R G B A, one byte each
    Rgba8888,
}

impl DisplayFormat {
    pub fn bytes_per_pixel(self) -> usize {
        match self {
            DisplayFormat::Grayscale8 => 1,
            DisplayFormat::Rgb888 => 3,
            DisplayFormat::Rgba8888 => 4,
        }
    }
}

/// Owned image in presentation channel order.
///
/// Instances are only created through validated constructors and never mutated, so
/// `row_stride >= width * bytes_per_pixel` and `data.len() >= row_stride * height`
/// always hold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayImage {
    format: DisplayFormat,
    width: usize,
    height: usize,
    row_stride: usize,
    data: Vec<u8>,
}

impl DisplayImage {
    /// Wraps `data` laid out with `row_stride`, checking that every row fits.
    pub fn from_raw(
        format: DisplayFormat,
        width: usize,
        height: usize,
        row_stride: usize,
        data: Vec<u8>,
    ) -> Result<Self> {
        let row_bytes = width.checked_mul(format.bytes_per_pixel());
        let required = row_stride.checked_mul(height);
        let valid = match (row_bytes, required) {
            (Some(row_bytes), Some(required)) => row_stride >= row_bytes && data.len() >= required,
            _ => false,
        };
        if !valid {
            return Err(ConversionError::InvalidLayout {
                width,
                height,
                channels: format.bytes_per_pixel(),
                row_stride,
                len: data.len(),
            });
        }
        Ok(Self {
            format,
            width,
            height,
            row_stride,
            data,
        })
    }

    pub fn from_rgba_image(image: RgbaImage) -> Self {
        let (width, height) = image.dimensions();
        Self {
            format: DisplayFormat::Rgba8888,
            width: width as usize,
            height: height as usize,
            row_stride: width as usize * 4,
            data: image.into_raw(),
        }
    }

    pub fn format(&self) -> DisplayFormat {
        self.format
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn row_stride(&self) -> usize {
        self.row_stride
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn row_bytes(&self) -> usize {
        self.width * self.format.bytes_per_pixel()
    }

    /// Pixel bytes of row `y`, padding excluded.
    pub fn row(&self, y: usize) -> &[u8] {
        let start = y * self.row_stride;
        &self.data[start..start + self.row_bytes()]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        (0..self.height).map(move |y| self.row(y))
    }

    /// Pixel bytes with the row padding removed.
    pub fn to_packed(&self) -> Vec<u8> {
        let mut packed = Vec::with_capacity(self.row_bytes() * self.height);
        for row in self.rows() {
            packed.extend_from_slice(row);
        }
        packed
    }

    pub fn to_dynamic_image(&self) -> Result<DynamicImage> {
        let (width, height) = (self.width as u32, self.height as u32);
        let packed = self.to_packed();
        let image = match self.format {
            DisplayFormat::Grayscale8 => {
                GrayImage::from_raw(width, height, packed).map(DynamicImage::ImageLuma8)
            }
            DisplayFormat::Rgb888 => {
                RgbImage::from_raw(width, height, packed).map(DynamicImage::ImageRgb8)
            }
            DisplayFormat::Rgba8888 => {
                RgbaImage::from_raw(width, height, packed).map(DynamicImage::ImageRgba8)
            }
        };
        image.ok_or(ConversionError::InvalidDimensions(self.width, self.height))
    }

    pub fn to_rgba_image(&self) -> Result<RgbaImage> {
        Ok(self.to_dynamic_image()?.to_rgba8())
    }
}
