use std::io::{Cursor, Write};
use image::ImageFormat;
use tracing::debug;
use crate::image_pipeline::common::error::{Result, ConversionError};
use crate::image_pipeline::display::DisplayImage;
use crate::image_pipeline::output::types::LessonConfig;
use crate::image_pipeline::output::writer::RasterWriter;

/// Lossless PNG output through the `image` crate. Ignores the TIFF settings.
pub struct PngWriter;

impl RasterWriter for PngWriter {
    fn extension(&self) -> &'static str {
        "png"
    }

    fn write_image(&self, image: &DisplayImage, output: &mut dyn Write, _config: &LessonConfig) -> Result<()> {
        debug!("Encoding PNG image: {}x{} {:?}", image.width(), image.height(), image.format());

        let mut buffer = Vec::new();
        image
            .to_dynamic_image()?
            .write_to(&mut Cursor::new(&mut buffer), ImageFormat::Png)
            .map_err(|e| ConversionError::EncodeError(e.to_string()))?;

        output.write_all(&buffer)?;

        debug!("PNG encoding complete");
        Ok(())
    }
}
