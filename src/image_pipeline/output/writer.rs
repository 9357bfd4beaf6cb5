use std::io::Write;
use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::display::DisplayImage;
use crate::image_pipeline::output::types::LessonConfig;

pub trait RasterWriter {
    /// File extension, without the dot, for images this writer produces.
    fn extension(&self) -> &'static str;
    fn write_image(&self, image: &DisplayImage, output: &mut dyn Write, config: &LessonConfig) -> Result<()>;
}
