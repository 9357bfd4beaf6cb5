//! Wrong row-stride demonstration.
//!
//! Rows are copied out of the source one at a time and packed into a buffer whose
//! stride is wider than a row by a fixed padding. Decoding that buffer with the
//! padded stride gives back the source image; decoding it with the tight stride
//! (what a reader that ignores padding would do) pulls every row a little further
//! into the padding of the previous one, which shows up as a diagonal shear. That
//! shear is the point of the lesson and must not be corrected.

use tracing::debug;

use crate::image_pipeline::common::error::{ConversionError, Result};
use crate::image_pipeline::display::adapter::{display_format_for, reorder_row_into};
use crate::image_pipeline::display::types::{DisplayFormat, DisplayImage};
use crate::image_pipeline::raster::types::RasterBuffer;

/// Padding, in bytes, appended to every row of the demonstration buffer.
pub const WRONG_STEP_PADDING: usize = 16;

#[derive(Debug, Clone)]
pub struct WrongStepDemo {
    format: DisplayFormat,
    width: usize,
    height: usize,
    padding: usize,
    data: Vec<u8>,
}

impl WrongStepDemo {
    /// Packs the rows of `source` at a stride of `row_bytes + padding`.
    ///
    /// Row `r` is read from `r * source.row_stride()` and written to
    /// `r * (row_bytes + padding)`; the padding bytes stay zero. Colour sources are
    /// reordered to display channel order on the way, exactly as the adapter does.
    pub fn build(source: &RasterBuffer<'_>, padding: usize) -> Result<Self> {
        let format = display_format_for(source)?;
        let row_bytes = source.row_bytes();
        let padded_stride = row_bytes.checked_add(padding);
        let len = padded_stride.and_then(|stride| stride.checked_mul(source.height()));
        let (Some(padded_stride), Some(len)) = (padded_stride, len) else {
            return Err(ConversionError::InvalidLayout {
                width: source.width(),
                height: source.height(),
                channels: source.channels(),
                row_stride: padded_stride.unwrap_or(usize::MAX),
                len: source.data().len(),
            });
        };

        let mut data = vec![0u8; len];
        for (y, row) in source.rows().enumerate() {
            let start = y * padded_stride;
            reorder_row_into(format, row, &mut data[start..start + row_bytes]);
        }

        debug!(
            source_stride = source.row_stride(),
            padded_stride,
            tight_stride = row_bytes,
            "Built wrong step buffer"
        );

        Ok(Self {
            format,
            width: source.width(),
            height: source.height(),
            padding,
            data,
        })
    }

    pub fn format(&self) -> DisplayFormat {
        self.format
    }

    /// Stride the buffer was actually packed with.
    pub fn padded_stride(&self) -> usize {
        self.tight_stride() + self.padding
    }

    /// Stride of an unpadded row, the wrong one for this buffer.
    pub fn tight_stride(&self) -> usize {
        self.width * self.format.bytes_per_pixel()
    }

    pub fn padding(&self) -> usize {
        self.padding
    }

    /// The packed bytes, `padded_stride * height` long.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Interprets the packed bytes with `row_stride`, whatever it is.
    pub fn decode_with_stride(&self, row_stride: usize) -> Result<DisplayImage> {
        DisplayImage::from_raw(
            self.format,
            self.width,
            self.height,
            row_stride,
            self.data.clone(),
        )
    }

    /// Decoded with the stride the buffer was packed with; matches the source.
    pub fn correct_view(&self) -> Result<DisplayImage> {
        self.decode_with_stride(self.padded_stride())
    }

    /// Decoded with the tight stride; the sheared image shown by the lesson.
    pub fn wrong_view(&self) -> Result<DisplayImage> {
        self.decode_with_stride(self.tight_stride())
    }
}
