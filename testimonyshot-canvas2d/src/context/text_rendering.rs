use super::Canvas2dContext;
use crate::error::Canvas2dResult;
use crate::font_parser::{parse_font, ParsedFont};
use crate::style::{TextAlign, TextBaseline};
use crate::text::{self, TextMetrics};
use cosmic_text::Command;
use tiny_skia::{FillRule, PathBuilder, Transform};

impl Canvas2dContext {
    /// Set the font from CSS shorthand. On error the current font is kept.
    pub fn set_font(&mut self, css: &str) -> Canvas2dResult<()> {
        self.state.font = parse_font(css)?;
        Ok(())
    }

    pub fn set_parsed_font(&mut self, font: ParsedFont) {
        self.state.font = font;
    }

    pub fn set_text_align(&mut self, align: TextAlign) {
        self.state.text_align = align;
    }

    pub fn set_text_baseline(&mut self, baseline: TextBaseline) {
        self.state.text_baseline = baseline;
    }

    pub fn measure_text(&mut self, text: &str) -> TextMetrics {
        text::measure(&mut self.font_system, text, &self.state.font)
    }

    /// Fill `text` anchored at (`x`, `y`) with the fill style.
    ///
    /// Glyphs are filled as vector outlines; glyphs without one are skipped.
    /// Text casts no shadow.
    pub fn fill_text(&mut self, text: &str, x: f32, y: f32) {
        let font = self.state.font.clone();
        if text.is_empty() || font.size_px <= 0.0 || !(x.is_finite() && y.is_finite()) {
            return;
        }
        log::trace!(target: "canvas", "fillText {:?} at {} {}", text, x, y);
        let Some(paint) = self.paint(&self.state.fill) else {
            return;
        };
        let buffer = text::shape_line(&mut self.font_system, text, &font);
        let metrics = text::shaped_metrics(&buffer, &font);
        let origin_x = x + self.state.text_align.anchor_offset(metrics.width);
        let origin_y = y + self
            .state
            .text_baseline
            .anchor_offset(metrics.ascent, metrics.descent);
        let clip = self.clip_mask();

        for run in buffer.layout_runs() {
            for glyph in run.glyphs {
                let key = glyph.physical((origin_x, origin_y), 1.0).cache_key;
                let Some(commands) = self
                    .swash_cache
                    .get_outline_commands(&mut self.font_system, key)
                else {
                    continue;
                };
                let Some(outline) = glyph_outline(commands) else {
                    continue;
                };
                // Unrounded origin keeps subpixel placement
                let gx = origin_x + glyph.x + glyph.font_size * glyph.x_offset;
                let gy = origin_y + glyph.y - glyph.font_size * glyph.y_offset;
                let transform = Transform::from_translate(gx, gy).post_concat(self.state.transform);
                self.pixmap
                    .fill_path(&outline, &paint, FillRule::Winding, transform, clip.as_ref());
            }
        }
    }
}

/// Glyph outline flipped from font units (y up) to canvas space (y down).
fn glyph_outline(commands: &[Command]) -> Option<tiny_skia::Path> {
    let mut pb = PathBuilder::new();
    for command in commands {
        match *command {
            Command::MoveTo(p) => pb.move_to(p.x, -p.y),
            Command::LineTo(p) => pb.line_to(p.x, -p.y),
            Command::QuadTo(c, p) => pb.quad_to(c.x, -c.y, p.x, -p.y),
            Command::CurveTo(c1, c2, p) => pb.cubic_to(c1.x, -c1.y, c2.x, -c2.y, p.x, -p.y),
            Command::Close => pb.close(),
        }
    }
    pb.finish()
}
