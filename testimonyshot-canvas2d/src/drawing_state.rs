use crate::font_parser::ParsedFont;
use crate::style::{CanvasFillRule, LineCap, LineJoin, PaintStyle, TextAlign, TextBaseline};
use tiny_skia::{Color, Path, Transform};

/// Shadow settings, in the canvas model: `blur` is twice the Gaussian
/// standard deviation and offsets are in device pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct ShadowState {
    pub color: Color,
    pub blur: f32,
    pub offset_x: f32,
    pub offset_y: f32,
}

impl Default for ShadowState {
    fn default() -> Self {
        Self {
            color: Color::TRANSPARENT,
            blur: 0.0,
            offset_x: 0.0,
            offset_y: 0.0,
        }
    }
}

impl ShadowState {
    /// A shadow is drawn only when it is visible and displaced or blurred.
    pub fn is_visible(&self) -> bool {
        self.color.alpha() > 0.0
            && (self.blur > 0.0 || self.offset_x != 0.0 || self.offset_y != 0.0)
    }
}

/// Everything `save()` captures.
#[derive(Debug, Clone)]
pub(crate) struct DrawingState {
    pub fill: PaintStyle,
    pub stroke: PaintStyle,
    pub line_width: f32,
    pub line_cap: LineCap,
    pub line_join: LineJoin,
    pub miter_limit: f32,
    pub global_alpha: f32,
    pub font: ParsedFont,
    pub text_align: TextAlign,
    pub text_baseline: TextBaseline,
    pub transform: Transform,
    pub shadow: ShadowState,
    /// Device-space clip regions; the effective clip is their intersection.
    pub clip: Vec<(Path, CanvasFillRule)>,
}

impl Default for DrawingState {
    fn default() -> Self {
        Self {
            fill: PaintStyle::default(),
            stroke: PaintStyle::default(),
            line_width: 1.0,
            line_cap: LineCap::default(),
            line_join: LineJoin::default(),
            miter_limit: 10.0,
            global_alpha: 1.0,
            font: ParsedFont::default(),
            text_align: TextAlign::default(),
            text_baseline: TextBaseline::default(),
            transform: Transform::identity(),
            shadow: ShadowState::default(),
            clip: Vec::new(),
        }
    }
}
