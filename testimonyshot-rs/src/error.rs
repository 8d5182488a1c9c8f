//! Error types for the card renderer and export pipeline.

use testimonyshot_canvas2d::Canvas2dError;
use thiserror::Error;

/// The drawing surface could not be allocated.
///
/// This is the only way rendering can fail; it is raised before anything is drawn.
#[derive(Debug, Error)]
#[error("Failed to allocate {width}x{height} render surface: {source}")]
pub struct RenderSurfaceError {
    pub width: u32,
    pub height: u32,
    #[source]
    pub source: Canvas2dError,
}

/// Encoding a rendered surface into image bytes failed.
#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("PNG encoding failed: {0}")]
    Png(#[from] Canvas2dError),

    #[error("JPEG encoding failed: {0}")]
    Jpeg(#[from] image::ImageError),

    #[error("Surface pixel buffer does not match {width}x{height}")]
    Buffer { width: u32, height: u32 },
}

/// An avatar reference could not be turned into pixels.
#[derive(Debug, Error)]
pub enum AvatarError {
    #[error("Remote avatar references are not fetched: {0}")]
    Remote(String),

    #[error("Unsupported data URL: {0}")]
    UnsupportedDataUrl(String),

    #[error("Invalid base64 avatar payload: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("Avatar access denied: {0}")]
    AccessDenied(String),

    #[error("Failed to read avatar file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to decode avatar image: {0}")]
    Decode(#[from] image::ImageError),

    #[error("Avatar image is empty")]
    Empty,
}

/// Export options outside the bounds the editor accepts.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExportOptionsError {
    #[error("{name} must be between {min} and {max} pixels, got {value}")]
    Dimension {
        name: &'static str,
        value: u32,
        min: u32,
        max: u32,
    },

    #[error("quality must be between {min} and {max}, got {value}")]
    Quality { value: u8, min: u8, max: u8 },
}
