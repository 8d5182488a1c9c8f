//! Encoding rendered cards into image bytes.

use crate::error::EncodeError;
use crate::render::CardImage;
use image::codecs::jpeg::JpegEncoder;
use image::ExtendedColorType;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Png,
    Jpeg,
}

impl ExportFormat {
    pub fn mime_type(self) -> &'static str {
        match self {
            ExportFormat::Png => "image/png",
            ExportFormat::Jpeg => "image/jpeg",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Png => "png",
            ExportFormat::Jpeg => "jpg",
        }
    }

    /// Guess the format from a file extension, ignoring case.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "png" => Some(ExportFormat::Png),
            "jpg" | "jpeg" => Some(ExportFormat::Jpeg),
            _ => None,
        }
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_extension(s.trim()).ok_or_else(|| format!("Unsupported export format: {}", s))
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Encode a card. `quality` only affects lossy formats; PNG output is
/// identical for every quality.
pub fn encode(
    image: &CardImage,
    format: ExportFormat,
    quality: u8,
    ppi: Option<f32>,
) -> Result<Vec<u8>, EncodeError> {
    match format {
        ExportFormat::Png => Ok(image.to_png(ppi)?),
        ExportFormat::Jpeg => encode_jpeg(image, quality),
    }
}

fn encode_jpeg(image: &CardImage, quality: u8) -> Result<Vec<u8>, EncodeError> {
    let (width, height) = (image.width(), image.height());
    let rgba = image.to_rgba8();
    if rgba.len() != width as usize * height as usize * 4 {
        return Err(EncodeError::Buffer { width, height });
    }
    let rgb = flatten_on_white(&rgba);

    let mut bytes = Vec::new();
    let mut encoder = JpegEncoder::new_with_quality(&mut bytes, quality.clamp(1, 100));
    encoder.encode(&rgb, width, height, ExtendedColorType::Rgb8)?;
    log::debug!("Encoded {}x{} JPEG at quality {}", width, height, quality);
    Ok(bytes)
}

/// Composite RGBA over opaque white, dropping alpha.
fn flatten_on_white(rgba: &[u8]) -> Vec<u8> {
    let mut rgb = Vec::with_capacity(rgba.len() / 4 * 3);
    for px in rgba.chunks_exact(4) {
        let alpha = px[3] as u32;
        for &channel in &px[..3] {
            let blended = (channel as u32 * alpha + 255 * (255 - alpha) + 127) / 255;
            rgb.push(blended as u8);
        }
    }
    rgb
}
