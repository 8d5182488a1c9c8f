//! Scoped drawing helpers over a canvas context.

use crate::avatar::AvatarImage;
use crate::style::DrawStyle;
use testimonyshot_canvas2d::{
    ArcParams, Canvas2dContext, Canvas2dResult, CanvasColor, ParsedFont, RectParams,
    RoundRectParams,
};

/// Draws one primitive per call, each under its own save/restore.
pub(crate) struct Painter<'a> {
    ctx: &'a mut Canvas2dContext,
}

impl<'a> Painter<'a> {
    pub fn new(ctx: &'a mut Canvas2dContext) -> Self {
        Self { ctx }
    }

    fn styled<R>(&mut self, style: &DrawStyle, draw: impl FnOnce(&mut Canvas2dContext) -> R) -> R {
        self.ctx.with_saved_state(|ctx| {
            style.apply(ctx);
            draw(ctx)
        })
    }

    /// Fill the whole surface with a diagonal two-stop gradient.
    pub fn fill_background(&mut self, from: CanvasColor, to: CanvasColor) {
        let (width, height) = (self.ctx.width() as f32, self.ctx.height() as f32);
        self.ctx.with_saved_state(|ctx| {
            let mut gradient = ctx.create_linear_gradient(0.0, 0.0, width, height);
            gradient.add_color_stop(0.0, from.into());
            gradient.add_color_stop(1.0, to.into());
            ctx.set_fill_style_gradient(gradient);
            ctx.fill_rect(&RectParams::new(0.0, 0.0, width, height));
        });
    }

    pub fn fill_round_rect(&mut self, params: &RoundRectParams, style: &DrawStyle) {
        self.styled(style, |ctx| {
            ctx.begin_path();
            ctx.round_rect(params);
            ctx.fill();
        });
    }

    pub fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32, style: &DrawStyle) {
        self.styled(style, |ctx| {
            ctx.begin_path();
            ctx.arc(&ArcParams::circle(cx, cy, radius));
            ctx.fill();
        });
    }

    pub fn stroke_line(&mut self, from: (f32, f32), to: (f32, f32), style: &DrawStyle) {
        self.styled(style, |ctx| {
            ctx.begin_path();
            ctx.move_to(from.0, from.1);
            ctx.line_to(to.0, to.1);
            ctx.stroke();
        });
    }

    pub fn fill_text(&mut self, text: &str, x: f32, y: f32, style: &DrawStyle) {
        self.styled(style, |ctx| ctx.fill_text(text, x, y));
    }

    /// Draw `image` scaled into the circle's bounding square, clipped to the circle.
    pub fn draw_image_in_circle(
        &mut self,
        image: &AvatarImage,
        cx: f32,
        cy: f32,
        radius: f32,
    ) -> Canvas2dResult<()> {
        self.ctx.with_saved_state(|ctx| {
            ctx.begin_path();
            ctx.arc(&ArcParams::circle(cx, cy, radius));
            ctx.clip();
            ctx.draw_image_data_scaled(
                &image.as_image_data(),
                cx - radius,
                cy - radius,
                radius * 2.0,
                radius * 2.0,
            )
        })
    }

    /// Run `f` with `font` selected; the font does not outlive the call.
    pub fn with_font<R>(
        &mut self,
        font: &ParsedFont,
        f: impl FnOnce(&mut Canvas2dContext) -> R,
    ) -> R {
        self.ctx.with_saved_state(|ctx| {
            ctx.set_parsed_font(font.clone());
            f(ctx)
        })
    }
}
