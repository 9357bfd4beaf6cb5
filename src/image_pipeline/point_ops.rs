//! Point operations module
//!
//! Per-pixel transforms (lookup tables, thresholds, colour adjustments) and the
//! neighbourhood operations the morphology lessons use.

pub mod lut;
pub mod color;
pub mod morphology;

pub use lut::{
    Lut,
    apply_gamma,
    apply_lut,
    build_gamma_lut,
    contrast_stretch,
    invert,
    threshold_binary,
    threshold_otsu,
    threshold_truncate,
};
pub use color::{ColorAdjust, boost_saturation, equalize_luma};
pub use morphology::{MAX_KERNEL_SIZE, boundary, dilate, erode};
