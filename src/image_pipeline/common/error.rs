use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConversionError {
    #[error("Failed to read input file: {0}")]
    InputReadError(String),

    #[error("Failed to write output file: {0}")]
    OutputWriteError(String),

    #[error("Failed to decode image: {0}")]
    DecodeError(String),

    #[error("Failed to encode image: {0}")]
    EncodeError(String),

    #[error("Invalid image dimensions: width={0}, height={1}")]
    InvalidDimensions(usize, usize),

    #[error("Invalid buffer layout: {width}x{height}x{channels}, stride {row_stride}, {len} bytes")]
    InvalidLayout {
        width: usize,
        height: usize,
        channels: usize,
        row_stride: usize,
        len: usize,
    },

    #[error("Unsupported format: {channels} channel(s) at {width}x{height}")]
    UnsupportedFormat {
        channels: usize,
        width: usize,
        height: usize,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ConversionError>;
