//! Per-primitive drawing style and the card's colors.

use crate::model::Theme;
use testimonyshot_canvas2d::{Canvas2dContext, CanvasColor, ParsedFont, TextAlign, TextBaseline};

pub const BACKGROUND_START: CanvasColor = CanvasColor::from_rgba8(0xff, 0xff, 0xff, 0xff);
pub const BACKGROUND_END: CanvasColor = CanvasColor::from_rgba8(0xf8, 0xfa, 0xfc, 0xff);
/// rgba(255, 255, 255, 0.95)
pub const CARD_FILL: CanvasColor = CanvasColor::from_rgba8(0xff, 0xff, 0xff, 242);
/// rgba(0, 0, 0, 0.1)
pub const CARD_SHADOW: CanvasColor = CanvasColor::from_rgba8(0, 0, 0, 26);
pub const BADGE: CanvasColor = CanvasColor::from_rgba8(0xef, 0x44, 0x44, 0xff);
pub const WHITE: CanvasColor = CanvasColor::from_rgba8(0xff, 0xff, 0xff, 0xff);
pub const MUTED: CanvasColor = CanvasColor::from_rgba8(0x6b, 0x72, 0x80, 0xff);
pub const STAR_ON: CanvasColor = CanvasColor::from_rgba8(0xfb, 0xbf, 0x24, 0xff);
pub const STAR_OFF: CanvasColor = CanvasColor::from_rgba8(0xd1, 0xd5, 0xdb, 0xff);
pub const INK: CanvasColor = CanvasColor::from_rgba8(0x11, 0x18, 0x27, 0xff);
pub const BODY_INK: CanvasColor = CanvasColor::from_rgba8(0x37, 0x41, 0x51, 0xff);
pub const DIVIDER: CanvasColor = CanvasColor::from_rgba8(0xe5, 0xe7, 0xeb, 0xff);
pub const AVATAR_PLACEHOLDER: CanvasColor = DIVIDER;
pub const WATERMARK: CanvasColor = CanvasColor::from_rgba8(0x9c, 0xa3, 0xaf, 0xff);

/// Colors that change with the theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub body: CanvasColor,
    pub name: CanvasColor,
    pub role: CanvasColor,
}

impl Palette {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Glassmorphic => Self {
                body: WHITE,
                name: WHITE,
                role: DIVIDER,
            },
            Theme::Default => Self {
                body: BODY_INK,
                name: INK,
                role: MUTED,
            },
        }
    }
}

/// Canvas-style drop shadow.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shadow {
    pub color: CanvasColor,
    pub blur: f32,
    pub offset_x: f32,
    pub offset_y: f32,
}

/// Everything one primitive needs from the drawing state.
///
/// A style is applied inside a save/restore pair, so nothing set here is
/// visible to the next primitive.
#[derive(Debug, Clone, Default)]
pub struct DrawStyle {
    pub fill: Option<CanvasColor>,
    pub stroke: Option<CanvasColor>,
    pub line_width: Option<f32>,
    pub font: Option<ParsedFont>,
    pub align: TextAlign,
    pub baseline: TextBaseline,
    pub shadow: Option<Shadow>,
}

impl DrawStyle {
    pub fn fill(color: CanvasColor) -> Self {
        Self {
            fill: Some(color),
            ..Self::default()
        }
    }

    pub fn stroke(color: CanvasColor, line_width: f32) -> Self {
        Self {
            stroke: Some(color),
            line_width: Some(line_width),
            ..Self::default()
        }
    }

    /// Left-aligned text in `font`.
    pub fn text(color: CanvasColor, font: ParsedFont) -> Self {
        Self {
            fill: Some(color),
            font: Some(font),
            ..Self::default()
        }
    }

    pub fn aligned(mut self, align: TextAlign) -> Self {
        self.align = align;
        self
    }

    pub fn with_shadow(mut self, shadow: Shadow) -> Self {
        self.shadow = Some(shadow);
        self
    }

    pub(crate) fn apply(&self, ctx: &mut Canvas2dContext) {
        if let Some(color) = self.fill {
            ctx.set_fill_style_color(color);
        }
        if let Some(color) = self.stroke {
            ctx.set_stroke_style_color(color);
        }
        if let Some(width) = self.line_width {
            ctx.set_line_width(width);
        }
        if let Some(font) = &self.font {
            ctx.set_parsed_font(font.clone());
        }
        ctx.set_text_align(self.align);
        ctx.set_text_baseline(self.baseline);
        if let Some(shadow) = self.shadow {
            ctx.set_shadow_color_value(shadow.color);
            ctx.set_shadow_blur(shadow.blur);
            ctx.set_shadow_offset_x(shadow.offset_x);
            ctx.set_shadow_offset_y(shadow.offset_y);
        }
    }
}
