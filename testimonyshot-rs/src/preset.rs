//! Aspect presets and the dimension resolver.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Width used for `custom` when the caller supplies none.
pub const DEFAULT_CUSTOM_WIDTH: u32 = 800;
/// Height used for `custom` when the caller supplies none.
pub const DEFAULT_CUSTOM_HEIGHT: u32 = 600;

/// Named output size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AspectPreset {
    #[default]
    Twitter,
    Instagram,
    LinkedIn,
    Custom,
}

impl AspectPreset {
    pub const ALL: [AspectPreset; 4] = [
        AspectPreset::Twitter,
        AspectPreset::Instagram,
        AspectPreset::LinkedIn,
        AspectPreset::Custom,
    ];

    /// Lowercase identifier used in records and on the command line.
    pub fn name(self) -> &'static str {
        match self {
            AspectPreset::Twitter => "twitter",
            AspectPreset::Instagram => "instagram",
            AspectPreset::LinkedIn => "linkedin",
            AspectPreset::Custom => "custom",
        }
    }

    /// Human readable label with the aspect ratio.
    pub fn label(self) -> &'static str {
        match self {
            AspectPreset::Twitter => "Twitter (16:9)",
            AspectPreset::Instagram => "Instagram (1:1)",
            AspectPreset::LinkedIn => "LinkedIn (1.91:1)",
            AspectPreset::Custom => "Custom",
        }
    }

    /// Fixed pixel size, or `None` for `custom`.
    pub fn dimensions(self) -> Option<(u32, u32)> {
        match self {
            AspectPreset::Twitter => Some((1200, 675)),
            AspectPreset::Instagram => Some((1080, 1080)),
            AspectPreset::LinkedIn => Some((1200, 627)),
            AspectPreset::Custom => None,
        }
    }

    /// Parse a preset name case-insensitively; unknown names are `twitter`.
    pub fn from_name(name: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|preset| preset.name().eq_ignore_ascii_case(name.trim()))
            .unwrap_or_default()
    }
}

impl FromStr for AspectPreset {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_name(s))
    }
}

impl fmt::Display for AspectPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Resolve a preset to pixel dimensions.
///
/// Named presets ignore the custom pair. `custom` echoes the supplied pair
/// unchanged, substituting 800x600 for a missing side.
pub fn resolve(
    preset: AspectPreset,
    custom_width: Option<u32>,
    custom_height: Option<u32>,
) -> (u32, u32) {
    match preset.dimensions() {
        Some(dimensions) => dimensions,
        None => (
            custom_width.unwrap_or(DEFAULT_CUSTOM_WIDTH),
            custom_height.unwrap_or(DEFAULT_CUSTOM_HEIGHT),
        ),
    }
}

/// Resolve a preset given by name.
pub fn resolve_name(
    name: &str,
    custom_width: Option<u32>,
    custom_height: Option<u32>,
) -> (u32, u32) {
    resolve(AspectPreset::from_name(name), custom_width, custom_height)
}
