/// A stop on a [`CanvasGradient`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientStop {
    pub offset: f32,
    pub color: tiny_skia::Color,
}

/// Linear gradient between two user-space points.
#[derive(Debug, Clone, PartialEq)]
pub struct CanvasGradient {
    pub start: (f32, f32),
    pub end: (f32, f32),
    /// Sorted by offset; stops with equal offsets keep insertion order.
    pub stops: Vec<GradientStop>,
}

impl CanvasGradient {
    pub fn new_linear(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self {
            start: (x0, y0),
            end: (x1, y1),
            stops: Vec::new(),
        }
    }

    /// Offsets outside `0.0..=1.0` (or NaN) are ignored.
    pub fn add_color_stop(&mut self, offset: f32, color: tiny_skia::Color) {
        if !(0.0..=1.0).contains(&offset) {
            return;
        }
        let index = self.stops.partition_point(|stop| stop.offset <= offset);
        self.stops.insert(index, GradientStop { offset, color });
    }

    /// Build the tiny-skia shader, with every stop's alpha scaled by `alpha`.
    ///
    /// `None` when the gradient has no stops.
    pub(crate) fn to_shader(
        &self,
        alpha: f32,
        transform: tiny_skia::Transform,
    ) -> Option<tiny_skia::Shader<'static>> {
        if self.stops.is_empty() {
            return None;
        }
        let stops = self
            .stops
            .iter()
            .map(|stop| {
                let mut color = stop.color;
                color.apply_opacity(alpha);
                tiny_skia::GradientStop::new(stop.offset, color)
            })
            .collect();
        tiny_skia::LinearGradient::new(
            tiny_skia::Point::from_xy(self.start.0, self.start.1),
            tiny_skia::Point::from_xy(self.end.0, self.end.1),
            stops,
            tiny_skia::SpreadMode::Pad,
            transform,
        )
    }
}
