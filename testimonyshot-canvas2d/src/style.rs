//! Paint sources and the enumerated canvas style settings.

use crate::gradient::CanvasGradient;

/// What a fill or stroke paints with.
#[derive(Debug, Clone)]
pub enum PaintStyle {
    Solid(tiny_skia::Color),
    Gradient(CanvasGradient),
}

impl Default for PaintStyle {
    fn default() -> Self {
        PaintStyle::Solid(tiny_skia::Color::BLACK)
    }
}

impl PaintStyle {
    /// Strongest alpha the style can paint; shadows are scaled by it.
    pub(crate) fn max_alpha(&self) -> f32 {
        match self {
            PaintStyle::Solid(color) => color.alpha(),
            PaintStyle::Gradient(gradient) => gradient
                .stops
                .iter()
                .map(|stop| stop.color.alpha())
                .fold(0.0, f32::max),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineCap {
    #[default]
    Butt,
    Round,
    Square,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineJoin {
    #[default]
    Miter,
    Round,
    Bevel,
}

impl From<LineCap> for tiny_skia::LineCap {
    fn from(cap: LineCap) -> Self {
        match cap {
            LineCap::Butt => Self::Butt,
            LineCap::Round => Self::Round,
            LineCap::Square => Self::Square,
        }
    }
}

impl From<LineJoin> for tiny_skia::LineJoin {
    fn from(join: LineJoin) -> Self {
        match join {
            LineJoin::Miter => Self::Miter,
            LineJoin::Round => Self::Round,
            LineJoin::Bevel => Self::Bevel,
        }
    }
}

/// Where the anchor x sits relative to the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// Which line of the text box sits on the anchor y.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextBaseline {
    Top,
    Middle,
    #[default]
    Alphabetic,
    Bottom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CanvasFillRule {
    #[default]
    NonZero,
    EvenOdd,
}

impl From<CanvasFillRule> for tiny_skia::FillRule {
    fn from(rule: CanvasFillRule) -> Self {
        match rule {
            CanvasFillRule::NonZero => Self::Winding,
            CanvasFillRule::EvenOdd => Self::EvenOdd,
        }
    }
}
