use crate::image_pipeline::raster::types::Raster;

pub const GRADIENT_WIDTH: usize = 640;
pub const GRADIENT_HEIGHT: usize = 480;
pub const GRADIENT_ALPHA: u8 = 200;
pub const GENERATED_WINDOW: &str = "generated_from_imwrite";

/// BGRA test card: blue ramps left to right, green top to bottom, red is the
/// complement of blue, alpha constant.
pub fn generate_gradient(width: usize, height: usize) -> Raster {
    let mut raster = Raster::filled(width, height, 4, 0);
    for y in 0..height {
        for x in 0..width {
            let i = (y * width + x) * 4;
            let b = (255 * x / width) as u8;
            let g = (255 * y / height) as u8;
            raster.data[i..i + 4].copy_from_slice(&[b, g, 255 - b, GRADIENT_ALPHA]);
        }
    }
    raster
}
