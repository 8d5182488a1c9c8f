//! Single-line shaping and measurement with cosmic-text.

use crate::font_parser::ParsedFont;
use crate::style::{TextAlign, TextBaseline};
use cosmic_text::{Attrs, Buffer, CacheKeyFlags, Family, FontSystem, Metrics, Shaping};

/// What `measure_text` reports, in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TextMetrics {
    pub width: f32,
    /// Alphabetic baseline to the top of the line box.
    pub ascent: f32,
    /// Alphabetic baseline to the bottom of the line box.
    pub descent: f32,
}

impl TextAlign {
    /// Horizontal shift from the anchor to the start of a line `width` wide.
    pub(crate) fn anchor_offset(self, width: f32) -> f32 {
        match self {
            TextAlign::Left => 0.0,
            TextAlign::Center => -width / 2.0,
            TextAlign::Right => -width,
        }
    }
}

impl TextBaseline {
    /// Vertical shift from the anchor to the alphabetic baseline.
    pub(crate) fn anchor_offset(self, ascent: f32, descent: f32) -> f32 {
        match self {
            TextBaseline::Top => ascent,
            TextBaseline::Middle => (ascent - descent) / 2.0,
            TextBaseline::Alphabetic => 0.0,
            TextBaseline::Bottom => -descent,
        }
    }
}

/// First entry of `families` that is a generic keyword or an installed
/// family. Unknown lists fall back to sans-serif.
pub(crate) fn pick_family<'a>(font_system: &FontSystem, families: &'a [String]) -> Family<'a> {
    for name in families {
        let generic = match name.to_ascii_lowercase().as_str() {
            "sans-serif" | "system-ui" => Some(Family::SansSerif),
            "serif" => Some(Family::Serif),
            "monospace" => Some(Family::Monospace),
            "cursive" => Some(Family::Cursive),
            "fantasy" => Some(Family::Fantasy),
            _ => None,
        };
        if let Some(family) = generic {
            return family;
        }
        let installed = font_system
            .db()
            .faces()
            .any(|face| face.families.iter().any(|(f, _)| f.eq_ignore_ascii_case(name)));
        if installed {
            return Family::Name(name);
        }
    }
    Family::SansSerif
}

/// Shape `text` as one line; line breaks become spaces.
pub(crate) fn shape_line(font_system: &mut FontSystem, text: &str, font: &ParsedFont) -> Buffer {
    let size = font.size_px.max(f32::EPSILON);
    let mut buffer = Buffer::new(font_system, Metrics::new(size, size * 1.2));
    // Unhinted so outlines scale linearly with the size
    let attrs = Attrs::new()
        .family(pick_family(font_system, &font.families))
        .weight(font.weight)
        .style(font.style)
        .cache_key_flags(CacheKeyFlags::DISABLE_HINTING);
    let line = text.replace(['\n', '\r'], " ");
    buffer.set_text(font_system, &line, &attrs, Shaping::Advanced, None);
    buffer.shape_until_scroll(font_system, false);
    buffer
}

/// Metrics of a shaped buffer. With no runs laid out, ascent and descent
/// are 80% and 20% of the font size.
pub(crate) fn shaped_metrics(buffer: &Buffer, font: &ParsedFont) -> TextMetrics {
    let metrics = buffer
        .layout_runs()
        .fold(TextMetrics::default(), |acc, run| TextMetrics {
            width: acc.width.max(run.line_w),
            ascent: acc.ascent.max(run.line_y - run.line_top),
            descent: acc.descent.max(run.line_top + run.line_height - run.line_y),
        });
    if metrics.ascent == 0.0 && metrics.descent == 0.0 {
        return TextMetrics {
            ascent: font.size_px * 0.8,
            descent: font.size_px * 0.2,
            ..metrics
        };
    }
    metrics
}

pub(crate) fn measure(font_system: &mut FontSystem, text: &str, font: &ParsedFont) -> TextMetrics {
    if text.is_empty() || font.size_px <= 0.0 {
        return TextMetrics::default();
    }
    let buffer = shape_line(font_system, text, font);
    shaped_metrics(&buffer, font)
}
