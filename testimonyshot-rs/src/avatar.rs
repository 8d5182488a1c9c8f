//! Turning an avatar reference into pixels.

use crate::error::AvatarError;
use base64::Engine;
use image::DynamicImage;
use std::path::{Path, PathBuf};
use testimonyshot_canvas2d::CanvasImageDataRef;

/// A decoded, square avatar in non-premultiplied RGBA.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvatarImage {
    width: u32,
    height: u32,
    rgba: Vec<u8>,
}

impl AvatarImage {
    /// Wrap raw RGBA pixels. Returns `None` when the buffer does not match the size.
    pub fn from_rgba(width: u32, height: u32, rgba: Vec<u8>) -> Option<Self> {
        if width == 0 || height == 0 || rgba.len() != width as usize * height as usize * 4 {
            return None;
        }
        Some(Self {
            width,
            height,
            rgba,
        })
    }

    /// Center-crop a decoded image to a square and convert it to RGBA.
    pub fn from_image(image: &DynamicImage) -> Result<Self, AvatarError> {
        let (width, height) = (image.width(), image.height());
        if width == 0 || height == 0 {
            return Err(AvatarError::Empty);
        }
        let side = width.min(height);
        let square = image.crop_imm((width - side) / 2, (height - side) / 2, side, side);
        Ok(Self {
            width: side,
            height: side,
            rgba: square.to_rgba8().into_raw(),
        })
    }

    /// Decode an encoded image (PNG or JPEG).
    pub fn decode(bytes: &[u8]) -> Result<Self, AvatarError> {
        let image = image::load_from_memory(bytes)?;
        Self::from_image(&image)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn as_image_data(&self) -> CanvasImageDataRef<'_> {
        CanvasImageDataRef::new(&self.rgba, self.width, self.height)
    }
}

/// Where [`load_avatar`] may read avatar files from.
///
/// The default policy denies all filesystem access, so only inline `data:`
/// references resolve.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AvatarAccessPolicy {
    /// Directory avatar paths must resolve inside once symlinks and `..` are
    /// followed. Relative paths are taken relative to it.
    pub filesystem_root: Option<PathBuf>,
}

impl AvatarAccessPolicy {
    pub fn with_filesystem_root(root: impl Into<PathBuf>) -> Self {
        Self {
            filesystem_root: Some(root.into()),
        }
    }
}

/// Resolve an avatar reference: a base64 `data:` URL, a `file://` URL, or a
/// filesystem path. Remote URLs are rejected rather than fetched, and paths
/// are read only from inside the policy's filesystem root.
pub fn load_avatar(
    reference: &str,
    policy: &AvatarAccessPolicy,
) -> Result<AvatarImage, AvatarError> {
    let reference = reference.trim();
    let lower = reference.to_ascii_lowercase();

    if lower.starts_with("http://") || lower.starts_with("https://") {
        return Err(AvatarError::Remote(reference.to_string()));
    }

    if lower.starts_with("data:") {
        let bytes = decode_data_url(reference)?;
        return AvatarImage::decode(&bytes);
    }

    let path = reference.strip_prefix("file://").unwrap_or(reference);
    let Some(root) = policy.filesystem_root.as_deref() else {
        return Err(AvatarError::AccessDenied(format!(
            "filesystem access is disabled for avatar path {}",
            path
        )));
    };
    let path = ensure_path_is_under_root(&root.join(path), root)?;
    log::debug!("Loading avatar from {}", path.display());
    let bytes = std::fs::read(&path).map_err(io_error(&path))?;
    AvatarImage::decode(&bytes)
}

fn ensure_path_is_under_root(path: &Path, root: &Path) -> Result<PathBuf, AvatarError> {
    let root = std::fs::canonicalize(root).map_err(io_error(root))?;
    let resolved = std::fs::canonicalize(path).map_err(io_error(path))?;
    if !resolved.starts_with(&root) {
        return Err(AvatarError::AccessDenied(format!(
            "avatar path {} is outside {}",
            resolved.display(),
            root.display()
        )));
    }
    Ok(resolved)
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> AvatarError {
    let path = path.display().to_string();
    move |source| AvatarError::Io { path, source }
}

/// Payload of a `data:[<mediatype>];base64,<data>` URL.
fn decode_data_url(url: &str) -> Result<Vec<u8>, AvatarError> {
    let unsupported = || AvatarError::UnsupportedDataUrl(truncate(url, 64));
    let (header, payload) = url["data:".len()..].split_once(',').ok_or_else(unsupported)?;
    if !header
        .split(';')
        .any(|param| param.trim().eq_ignore_ascii_case("base64"))
    {
        return Err(unsupported());
    }
    // Tolerate line breaks in pasted payloads
    let payload: String = payload.chars().filter(|c| !c.is_whitespace()).collect();
    Ok(base64::engine::general_purpose::STANDARD.decode(payload)?)
}

fn truncate(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}…", &s[..idx]),
        None => s.to_string(),
    }
}
