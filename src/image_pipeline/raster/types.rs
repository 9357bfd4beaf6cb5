//! Raster buffer types shared by the decoder, the point operations and the display adapter

use image::GrayImage;

use crate::image_pipeline::common::error::{ConversionError, Result};

/// How the decoder should shape the pixels it returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadMode {
    /// Keep the stored channel count, alpha included
    Unchanged,
    /// Single-channel luma
    Grayscale,
    /// Three-channel BGR, alpha dropped
    Color,
}

/// Borrowed, row-major view over 8-bit pixels.
///
/// Rows may carry padding: `row_stride` is the byte distance between the start of
/// consecutive rows and is at least `width * channels`. The channel count is not
/// restricted here; consumers decide which counts they accept.
#[derive(Debug, Clone, Copy)]
pub struct RasterBuffer<'a> {
    width: usize,
    height: usize,
    channels: usize,
    row_stride: usize,
    data: &'a [u8],
}

impl<'a> RasterBuffer<'a> {
    pub fn new(
        data: &'a [u8],
        width: usize,
        height: usize,
        channels: usize,
        row_stride: usize,
    ) -> Result<Self> {
        let row_bytes = width.checked_mul(channels);
        let required = row_stride.checked_mul(height);
        let valid = match (row_bytes, required) {
            (Some(row_bytes), Some(required)) => row_stride >= row_bytes && data.len() >= required,
            _ => false,
        };

        if !valid {
            return Err(ConversionError::InvalidLayout {
                width,
                height,
                channels,
                row_stride,
                len: data.len(),
            });
        }

        Ok(Self {
            width,
            height,
            channels,
            row_stride,
            data,
        })
    }

    /// View over a buffer without row padding.
    pub fn tight(data: &'a [u8], width: usize, height: usize, channels: usize) -> Result<Self> {
        let row_stride = width.checked_mul(channels).ok_or(ConversionError::InvalidLayout {
            width,
            height,
            channels,
            row_stride: usize::MAX,
            len: data.len(),
        })?;
        Self::new(data, width, height, channels, row_stride)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn channels(&self) -> usize {
        self.channels
    }

    pub fn row_stride(&self) -> usize {
        self.row_stride
    }

    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    /// Number of meaningful bytes per row, padding excluded.
    pub fn row_bytes(&self) -> usize {
        self.width * self.channels
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Pixel bytes of row `y`, padding excluded.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    pub fn row(&self, y: usize) -> &'a [u8] {
        assert!(y < self.height, "row {} out of range for height {}", y, self.height);
        let start = y * self.row_stride;
        &self.data[start..start + self.row_bytes()]
    }

    pub fn rows(&self) -> impl Iterator<Item = &'a [u8]> + '_ {
        (0..self.height).map(move |y| self.row(y))
    }
}

/// Owned decoded image in decoder channel order (gray, BGR or BGRA), rows packed
/// without padding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    pub width: usize,
    pub height: usize,
    pub channels: usize,
    pub data: Vec<u8>,
}

impl Raster {
    pub fn new(width: usize, height: usize, channels: usize, data: Vec<u8>) -> Result<Self> {
        let row_stride = width.checked_mul(channels);
        let expected = row_stride.and_then(|stride| stride.checked_mul(height));
        if expected != Some(data.len()) {
            return Err(ConversionError::InvalidLayout {
                width,
                height,
                channels,
                row_stride: row_stride.unwrap_or(usize::MAX),
                len: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            channels,
            data,
        })
    }

    pub fn filled(width: usize, height: usize, channels: usize, value: u8) -> Self {
        Self {
            width,
            height,
            channels,
            data: vec![value; width * height * channels],
        }
    }

    /// Copies the pixel bytes out of a possibly padded view.
    pub fn from_buffer(buffer: &RasterBuffer<'_>) -> Self {
        let mut data = Vec::with_capacity(buffer.row_bytes() * buffer.height());
        for row in buffer.rows() {
            data.extend_from_slice(row);
        }
        Self {
            width: buffer.width(),
            height: buffer.height(),
            channels: buffer.channels(),
            data,
        }
    }

    pub fn row_stride(&self) -> usize {
        self.width * self.channels
    }

    /// Validated view over the pixels. The fields are public, so a raster assembled by
    /// hand may not match its data; that is reported as `InvalidLayout`.
    pub fn as_buffer(&self) -> Result<RasterBuffer<'_>> {
        RasterBuffer::tight(&self.data, self.width, self.height, self.channels)
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn pixel(&self, x: usize, y: usize) -> &[u8] {
        let start = (y * self.width + x) * self.channels;
        &self.data[start..start + self.channels]
    }

    pub fn from_gray_image(image: GrayImage) -> Self {
        let (width, height) = image.dimensions();
        Self {
            width: width as usize,
            height: height as usize,
            channels: 1,
            data: image.into_raw(),
        }
    }

    /// Reinterprets a single-channel raster as an `imageproc` compatible image.
    pub fn to_gray_image(&self) -> Result<GrayImage> {
        if self.channels != 1 {
            return Err(self.unsupported());
        }
        GrayImage::from_raw(self.width as u32, self.height as u32, self.data.clone())
            .ok_or(ConversionError::InvalidDimensions(self.width, self.height))
    }

    /// BGR(A) to luma with the ITU-R BT.601 weights, alpha ignored. Gray input is cloned.
    pub fn to_grayscale(&self) -> Result<Raster> {
        match self.channels {
            1 => Ok(self.clone()),
            3 | 4 => {
                let data = self
                    .data
                    .chunks_exact(self.channels)
                    .map(|px| bgr_to_luma(px[0], px[1], px[2]))
                    .collect();
                Ok(Raster {
                    width: self.width,
                    height: self.height,
                    channels: 1,
                    data,
                })
            }
            _ => Err(self.unsupported()),
        }
    }

    /// Three-channel BGR: gray is replicated, alpha dropped, BGR is cloned.
    pub fn to_color(&self) -> Result<Raster> {
        let data = match self.channels {
            1 => self.data.iter().flat_map(|&v| [v, v, v]).collect(),
            3 => return Ok(self.clone()),
            4 => self
                .data
                .chunks_exact(4)
                .flat_map(|px| [px[0], px[1], px[2]])
                .collect(),
            _ => return Err(self.unsupported()),
        };
        Ok(Raster {
            width: self.width,
            height: self.height,
            channels: 3,
            data,
        })
    }

    /// Splits interleaved pixels into one single-channel raster per channel.
    pub fn split_channels(&self) -> Vec<Raster> {
        (0..self.channels)
            .map(|c| Raster {
                width: self.width,
                height: self.height,
                channels: 1,
                data: self.data.iter().skip(c).step_by(self.channels).copied().collect(),
            })
            .collect()
    }

    /// Interleaves single-channel planes of identical size back into one raster.
    pub fn merge_channels(planes: &[Raster]) -> Result<Raster> {
        let first = planes
            .first()
            .ok_or(ConversionError::InvalidDimensions(0, 0))?;
        let (width, height) = (first.width, first.height);
        if planes
            .iter()
            .any(|p| p.channels != 1 || p.width != width || p.height != height)
        {
            return Err(ConversionError::InvalidDimensions(width, height));
        }

        let channels = planes.len();
        let mut data = vec![0u8; width * height * channels];
        for (c, plane) in planes.iter().enumerate() {
            for (i, &value) in plane.data.iter().enumerate() {
                data[i * channels + c] = value;
            }
        }
        Ok(Raster {
            width,
            height,
            channels,
            data,
        })
    }

    pub(crate) fn unsupported(&self) -> ConversionError {
        ConversionError::UnsupportedFormat {
            channels: self.channels,
            width: self.width,
            height: self.height,
        }
    }
}

/// Fixed-point BT.601 luma, 14 fractional bits.
pub(crate) fn bgr_to_luma(b: u8, g: u8, r: u8) -> u8 {
    const R_W: u32 = 4899;
    const G_W: u32 = 9617;
    const B_W: u32 = 1868;
    ((r as u32 * R_W + g as u32 * G_W + b as u32 * B_W + (1 << 13)) >> 14) as u8
}
