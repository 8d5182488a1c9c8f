//! Filling, stroking, clipping and shadows.

use super::Canvas2dContext;
use crate::geometry::RectParams;
use crate::shadow;
use crate::style::{CanvasFillRule, PaintStyle};
use tiny_skia::{BlendMode, FillRule, Mask, Paint, Path, PathBuilder, Transform};

impl Canvas2dContext {
    /// Intersect the clip region with the current path (non-zero rule).
    pub fn clip(&mut self) {
        self.clip_with_rule(CanvasFillRule::NonZero);
    }

    pub fn clip_with_rule(&mut self, rule: CanvasFillRule) {
        if let Some(path) = self.path.clone().finish() {
            self.state.clip.push((path, rule));
        }
    }

    /// Fill the current path (non-zero rule). The path is kept.
    pub fn fill(&mut self) {
        self.fill_with_rule(CanvasFillRule::NonZero);
    }

    pub fn fill_with_rule(&mut self, rule: CanvasFillRule) {
        let Some(path) = self.path.clone().finish() else {
            return;
        };
        log::trace!(target: "canvas", "fill {:?}", path.bounds());
        let style = self.state.fill.clone();
        self.paint_shadow(&path, rule.into(), style.max_alpha());
        let Some(paint) = self.paint(&style) else {
            return;
        };
        let clip = self.clip_mask();
        self.pixmap
            .fill_path(&path, &paint, rule.into(), Transform::identity(), clip.as_ref());
    }

    /// Stroke the current path. The line width is in user space.
    pub fn stroke(&mut self) {
        let Some(path) = self.path.clone().finish() else {
            return;
        };
        let t = self.state.transform;
        let scale = ((t.sx.hypot(t.ky)) + (t.kx.hypot(t.sy))) / 2.0;
        let stroke = tiny_skia::Stroke {
            width: self.state.line_width * scale,
            miter_limit: self.state.miter_limit,
            line_cap: self.state.line_cap.into(),
            line_join: self.state.line_join.into(),
            dash: None,
        };

        let style = self.state.stroke.clone();
        if self.state.shadow.is_visible() {
            if let Some(outline) = path.stroke(&stroke, 1.0) {
                self.paint_shadow(&outline, FillRule::Winding, style.max_alpha());
            }
        }
        let Some(paint) = self.paint(&style) else {
            return;
        };
        let clip = self.clip_mask();
        self.pixmap
            .stroke_path(&path, &paint, &stroke, Transform::identity(), clip.as_ref());
    }

    /// Replaces the current path with `rect` and fills it.
    pub fn fill_rect(&mut self, rect: &RectParams) {
        self.begin_path();
        self.rect(rect);
        self.fill();
    }

    /// Replaces the current path with `rect` and strokes it.
    pub fn stroke_rect(&mut self, rect: &RectParams) {
        self.begin_path();
        self.rect(rect);
        self.stroke();
    }

    /// Make the pixels under `rect` transparent, inside the clip region.
    /// The current path is left alone.
    pub fn clear_rect(&mut self, rect: &RectParams) {
        let mut pb = PathBuilder::new();
        for (i, (x, y)) in rect.corners().into_iter().enumerate() {
            let (x, y) = self.device_point(x, y);
            if i == 0 {
                pb.move_to(x, y);
            } else {
                pb.line_to(x, y);
            }
        }
        pb.close();
        let Some(path) = pb.finish() else {
            return;
        };
        let paint = Paint {
            blend_mode: BlendMode::Clear,
            ..Paint::default()
        };
        let clip = self.clip_mask();
        self.pixmap
            .fill_path(&path, &paint, FillRule::Winding, Transform::identity(), clip.as_ref());
    }

    /// Draw the shadow of a device-space shape under whatever is painted next.
    ///
    /// The shape is rasterized into an alpha mask padded by three standard
    /// deviations, shifted by the shadow offset and blurred. The mask is then
    /// cropped back to the surface and limited to the clip region.
    fn paint_shadow(&mut self, path: &Path, rule: FillRule, style_alpha: f32) {
        let shadow = self.state.shadow;
        if !shadow.is_visible() || style_alpha <= 0.0 {
            return;
        }
        let sigma = shadow::blur_sigma(shadow.blur);
        let pad = shadow::blur_extent(sigma);
        let (w, h) = (self.width, self.height);
        let (pw, ph) = (w + 2 * pad, h + 2 * pad);

        let Some(mut padded) = Mask::new(pw, ph) else {
            return;
        };
        let shift = Transform::from_translate(
            shadow.offset_x + pad as f32,
            shadow.offset_y + pad as f32,
        );
        padded.fill_path(path, rule, true, shift);
        shadow::gaussian_blur_alpha(padded.data_mut(), pw as usize, ph as usize, sigma);

        let Some(mut mask) = Mask::new(w, h) else {
            return;
        };
        let (w, pw, pad) = (w as usize, pw as usize, pad as usize);
        for (row, dst) in mask.data_mut().chunks_exact_mut(w).enumerate() {
            let start = (row + pad) * pw + pad;
            dst.copy_from_slice(&padded.data()[start..start + w]);
        }
        if let Some(clip) = self.clip_mask() {
            for (m, c) in mask.data_mut().iter_mut().zip(clip.data()) {
                *m = ((u32::from(*m) * u32::from(*c) + 127) / 255) as u8;
            }
        }

        let mut color = shadow.color;
        color.apply_opacity(style_alpha * self.state.global_alpha);
        let mut paint = Paint {
            anti_alias: false,
            ..Paint::default()
        };
        paint.set_color(color);
        let area = tiny_skia::Rect::from_xywh(0.0, 0.0, self.width as f32, self.height as f32);
        if let Some(area) = area {
            self.pixmap
                .fill_rect(area, &paint, Transform::identity(), Some(&mask));
        }
    }

    /// Intersection of every clip path in the current state, if any.
    pub(crate) fn clip_mask(&self) -> Option<Mask> {
        let ((first, first_rule), rest) = self.state.clip.split_first()?;
        let mut mask = Mask::new(self.width, self.height)?;
        mask.fill_path(first, (*first_rule).into(), true, Transform::identity());
        for (path, rule) in rest {
            mask.intersect_path(path, (*rule).into(), true, Transform::identity());
        }
        Some(mask)
    }

    /// An anti-aliased paint for `style` at the current global alpha.
    ///
    /// `None` for a gradient without stops, which paints nothing.
    pub(crate) fn paint(&self, style: &PaintStyle) -> Option<Paint<'static>> {
        let alpha = self.state.global_alpha;
        let mut paint = Paint {
            anti_alias: true,
            ..Paint::default()
        };
        match style {
            PaintStyle::Solid(color) => {
                let mut color = *color;
                color.apply_opacity(alpha);
                paint.set_color(color);
            }
            PaintStyle::Gradient(gradient) => {
                paint.shader = gradient.to_shader(alpha, self.state.transform)?;
            }
        }
        Some(paint)
    }
}
