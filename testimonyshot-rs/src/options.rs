//! Export options.

use crate::error::ExportOptionsError;
use crate::preset::{resolve, AspectPreset};

/// Smallest width or height the editor accepts.
pub const MIN_DIMENSION: u32 = 100;
/// Largest width or height the editor accepts.
pub const MAX_DIMENSION: u32 = 2000;
/// Lowest quality the editor accepts.
pub const MIN_QUALITY: u8 = 50;
/// Highest quality.
pub const MAX_QUALITY: u8 = 100;
/// Quality used when none is given.
pub const DEFAULT_QUALITY: u8 = 97;

/// Target size and output settings for one render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportOptions {
    pub width: u32,
    pub height: u32,
    /// Encoder quality. Only lossy formats use it.
    pub quality: u8,
    pub show_watermark: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self::for_preset(AspectPreset::default(), None, None)
    }
}

impl ExportOptions {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            quality: DEFAULT_QUALITY,
            show_watermark: true,
        }
    }

    /// Options sized by the dimension resolver.
    pub fn for_preset(
        preset: AspectPreset,
        custom_width: Option<u32>,
        custom_height: Option<u32>,
    ) -> Self {
        let (width, height) = resolve(preset, custom_width, custom_height);
        Self::new(width, height)
    }

    pub fn with_quality(mut self, quality: u8) -> Self {
        self.quality = quality;
        self
    }

    pub fn with_watermark(mut self, show_watermark: bool) -> Self {
        self.show_watermark = show_watermark;
        self
    }

    /// Check the bounds the editor enforces on user input.
    ///
    /// The renderer itself accepts any size the surface can hold; this is for
    /// callers taking dimensions from users.
    pub fn validate(&self) -> Result<(), ExportOptionsError> {
        for (name, value) in [("width", self.width), ("height", self.height)] {
            if !(MIN_DIMENSION..=MAX_DIMENSION).contains(&value) {
                return Err(ExportOptionsError::Dimension {
                    name,
                    value,
                    min: MIN_DIMENSION,
                    max: MAX_DIMENSION,
                });
            }
        }
        if !(MIN_QUALITY..=MAX_QUALITY).contains(&self.quality) {
            return Err(ExportOptionsError::Quality {
                value: self.quality,
                min: MIN_QUALITY,
                max: MAX_QUALITY,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = ExportOptions::default();
        assert_eq!((options.width, options.height), (1200, 675));
        assert_eq!(options.quality, 97);
        assert!(options.show_watermark);
        assert_eq!(options.validate(), Ok(()));
    }

    #[test]
    fn test_validate_bounds() {
        assert_eq!(
            ExportOptions::new(99, 500).validate(),
            Err(ExportOptionsError::Dimension {
                name: "width",
                value: 99,
                min: 100,
                max: 2000
            })
        );
        assert!(ExportOptions::new(500, 2001).validate().is_err());
        assert!(ExportOptions::new(100, 2000).validate().is_ok());
        assert!(matches!(
            ExportOptions::new(500, 500).with_quality(49).validate(),
            Err(ExportOptionsError::Quality { value: 49, .. })
        ));
    }

    #[test]
    fn test_for_preset() {
        let options = ExportOptions::for_preset(AspectPreset::Instagram, Some(10), None);
        assert_eq!((options.width, options.height), (1080, 1080));
        let options = ExportOptions::for_preset(AspectPreset::Custom, Some(640), Some(480))
            .with_watermark(false);
        assert_eq!((options.width, options.height), (640, 480));
        assert!(!options.show_watermark);
    }
}
