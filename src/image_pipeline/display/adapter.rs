use tracing::{debug, instrument};

use crate::image_pipeline::common::error::{ConversionError, Result};
use crate::image_pipeline::display::types::{DisplayFormat, DisplayImage};
use crate::image_pipeline::raster::types::RasterBuffer;

/// Converts a decoded buffer into an image ready for presentation.
///
/// * 1 channel: copied as `Grayscale8`, row padding dropped
/// * 3 channels: B G R reordered to R G B, `Rgb888`
/// * 4 channels: B G R A reordered to R G B A, `Rgba8888`
///
/// The source is only borrowed for the duration of the call; the returned image owns
/// a tightly packed copy.
///
/// # Errors
///
/// `UnsupportedFormat` for any other channel count or an empty buffer. Callers are
/// expected to report this to the user and carry on without an image.
#[instrument(skip(source), fields(width = source.width(), height = source.height(), channels = source.channels()))]
pub fn to_display_image(source: &RasterBuffer<'_>) -> Result<DisplayImage> {
    let format = display_format_for(source)?;

    let row_bytes = source.row_bytes();
    let mut data = vec![0u8; row_bytes * source.height()];
    for (row, dst) in source.rows().zip(data.chunks_exact_mut(row_bytes)) {
        reorder_row_into(format, row, dst);
    }

    debug!(?format, source_stride = source.row_stride(), row_bytes, "Converted to display image");
    DisplayImage::from_raw(format, source.width(), source.height(), row_bytes, data)
}

/// Output format for `source`, or `UnsupportedFormat` when it cannot be displayed.
pub(crate) fn display_format_for(source: &RasterBuffer<'_>) -> Result<DisplayFormat> {
    let unsupported = || ConversionError::UnsupportedFormat {
        channels: source.channels(),
        width: source.width(),
        height: source.height(),
    };

    if source.is_empty() {
        return Err(unsupported());
    }

    match source.channels() {
        1 => Ok(DisplayFormat::Grayscale8),
        3 => Ok(DisplayFormat::Rgb888),
        4 => Ok(DisplayFormat::Rgba8888),
        _ => Err(unsupported()),
    }
}

/// Writes one source row into `dst` in display channel order. Both slices hold
/// exactly one row of pixels.
pub(crate) fn reorder_row_into(format: DisplayFormat, row: &[u8], dst: &mut [u8]) {
    match format {
        DisplayFormat::Grayscale8 => dst.copy_from_slice(row),
        DisplayFormat::Rgb888 => {
            for (px, out) in row.chunks_exact(3).zip(dst.chunks_exact_mut(3)) {
                out.copy_from_slice(&[px[2], px[1], px[0]]);
            }
        }
        DisplayFormat::Rgba8888 => {
            for (px, out) in row.chunks_exact(4).zip(dst.chunks_exact_mut(4)) {
                out.copy_from_slice(&[px[2], px[1], px[0], px[3]]);
            }
        }
    }
}
