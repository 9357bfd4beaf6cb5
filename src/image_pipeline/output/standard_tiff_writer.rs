use std::io::Write;
use tracing::debug;
use crate::image_pipeline::common::error::{Result, ConversionError};
use crate::image_pipeline::display::{DisplayFormat, DisplayImage};
use crate::image_pipeline::output::types::{LessonConfig, TiffCompression};
use crate::image_pipeline::output::writer::RasterWriter;

pub struct StandardTiffWriter;

impl RasterWriter for StandardTiffWriter {
    fn extension(&self) -> &'static str {
        "tiff"
    }

    fn write_image(&self, image: &DisplayImage, output: &mut dyn Write, config: &LessonConfig) -> Result<()> {
        debug!("Encoding TIFF image: {}x{} {:?}", image.width(), image.height(), image.format());

        let mut buffer = Vec::new();

        {
            let compression = match config.compression {
                TiffCompression::None => tiff::encoder::Compression::Uncompressed,
                TiffCompression::Lzw => tiff::encoder::Compression::Lzw,
                TiffCompression::DeflateFast => tiff::encoder::Compression::Deflate(tiff::encoder::compression::DeflateLevel::Fast),
                TiffCompression::DeflateBalanced => tiff::encoder::Compression::Deflate(tiff::encoder::compression::DeflateLevel::Balanced),
                TiffCompression::DeflateBest => tiff::encoder::Compression::Deflate(tiff::encoder::compression::DeflateLevel::Best),
            };

            let mut encoder = tiff::encoder::TiffEncoder::new(std::io::Cursor::new(&mut buffer))
                .map_err(|e| ConversionError::EncodeError(e.to_string()))?
                .with_compression(compression);

            if let Some(predictor_val) = config.predictor {
                let predictor = match predictor_val {
                    2 => tiff::tags::Predictor::Horizontal,
                    _ => tiff::tags::Predictor::None,
                };
                encoder = encoder.with_predictor(predictor);
            }

            // the encoder wants rows without padding
            let pixels = image.to_packed();
            let (width, height) = (image.width() as u32, image.height() as u32);
            let written = match image.format() {
                DisplayFormat::Grayscale8 => encoder.write_image::<tiff::encoder::colortype::Gray8>(width, height, &pixels),
                DisplayFormat::Rgb888 => encoder.write_image::<tiff::encoder::colortype::RGB8>(width, height, &pixels),
                DisplayFormat::Rgba8888 => encoder.write_image::<tiff::encoder::colortype::RGBA8>(width, height, &pixels),
            };
            written.map_err(|e| ConversionError::EncodeError(e.to_string()))?;
        }

        output.write_all(&buffer)?;

        debug!("TIFF encoding complete");
        Ok(())
    }
}
