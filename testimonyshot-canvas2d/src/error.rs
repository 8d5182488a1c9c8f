use thiserror::Error;

pub type Canvas2dResult<T> = Result<T, Canvas2dError>;

#[derive(Debug, Error)]
pub enum Canvas2dError {
    /// Zero-sized, or larger than a surface may be.
    #[error("Invalid canvas size {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Invalid CSS font: {0}")]
    Font(String),

    #[error("Invalid CSS color: {0}")]
    Color(String),

    #[error("PNG encoding failed: {0}")]
    Png(#[from] png::EncodingError),

    #[error("Image data of {len} bytes does not describe a {width}x{height} RGBA image")]
    ImageDataSize { len: usize, width: u32, height: u32 },
}
