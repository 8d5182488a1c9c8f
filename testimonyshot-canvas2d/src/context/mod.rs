//! The drawing surface and its state machine.

mod drawing;
mod image_ops;
mod path_ops;
mod text_rendering;
mod transform;

use crate::drawing_state::DrawingState;
use crate::error::{Canvas2dError, Canvas2dResult};
use crate::font_config::{FontConfig, ResolvedFontConfig};
use crate::geometry::CanvasColor;
use crate::gradient::CanvasGradient;
use crate::style::{LineCap, LineJoin, PaintStyle};
use cosmic_text::{FontSystem, SwashCache};
use tiny_skia::{Color, PathBuilder, Pixmap};

/// Largest width or height a surface may have.
pub const MAX_DIMENSION: u32 = 32767;

/// An RGBA surface with HTML canvas drawing semantics.
pub struct Canvas2dContext {
    width: u32,
    height: u32,
    /// Premultiplied RGBA.
    pixmap: Pixmap,
    font_system: FontSystem,
    swash_cache: SwashCache,
    state: DrawingState,
    saved: Vec<DrawingState>,
    /// The current path, already in device space.
    path: PathBuilder,
    /// Whether the current path has a point for arcs to connect to.
    has_current_point: bool,
}

impl Canvas2dContext {
    /// A surface using the default font configuration (system fonts).
    pub fn new(width: u32, height: u32) -> Canvas2dResult<Self> {
        Self::with_config(width, height, &FontConfig::default())
    }

    pub fn with_config(width: u32, height: u32, config: &FontConfig) -> Canvas2dResult<Self> {
        check_dimensions(width, height)?;
        Self::with_resolved(width, height, &config.resolve())
    }

    /// A surface sharing an already loaded font database.
    pub fn with_resolved(
        width: u32,
        height: u32,
        fonts: &ResolvedFontConfig,
    ) -> Canvas2dResult<Self> {
        check_dimensions(width, height)?;
        let pixmap =
            Pixmap::new(width, height).ok_or(Canvas2dError::InvalidDimensions { width, height })?;
        log::debug!(target: "canvas", "new surface {}x{}", width, height);
        Ok(Self {
            width,
            height,
            pixmap,
            font_system: FontSystem::new_with_locale_and_db("en".to_string(), fonts.fontdb.clone()),
            swash_cache: SwashCache::new(),
            state: DrawingState::default(),
            saved: Vec::new(),
            path: PathBuilder::new(),
            has_current_point: false,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn save(&mut self) {
        self.saved.push(self.state.clone());
    }

    /// Pop the last saved state. A restore without a matching save is ignored.
    pub fn restore(&mut self) {
        if let Some(state) = self.saved.pop() {
            self.state = state;
        }
    }

    /// Run `f` between a save and a restore.
    ///
    /// Every state change made inside, including saves left open, is undone
    /// when `f` returns.
    pub fn with_saved_state<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        let depth = self.saved.len();
        self.save();
        let result = f(self);
        while self.saved.len() > depth {
            self.restore();
        }
        result
    }

    pub fn saved_state_depth(&self) -> usize {
        self.saved.len()
    }

    /// Clear the surface and return to a freshly created state.
    pub fn reset(&mut self) {
        self.pixmap.fill(Color::TRANSPARENT);
        self.state = DrawingState::default();
        self.saved.clear();
        self.begin_path();
    }

    /// Set a CSS color as the fill.
    pub fn set_fill_style(&mut self, css: &str) -> Canvas2dResult<()> {
        self.state.fill = PaintStyle::Solid(parse_color(css)?);
        Ok(())
    }

    pub fn set_fill_style_color(&mut self, color: CanvasColor) {
        self.state.fill = PaintStyle::Solid(color.into());
    }

    pub fn set_fill_style_gradient(&mut self, gradient: CanvasGradient) {
        self.state.fill = PaintStyle::Gradient(gradient);
    }

    /// Set a CSS color as the stroke.
    pub fn set_stroke_style(&mut self, css: &str) -> Canvas2dResult<()> {
        self.state.stroke = PaintStyle::Solid(parse_color(css)?);
        Ok(())
    }

    pub fn set_stroke_style_color(&mut self, color: CanvasColor) {
        self.state.stroke = PaintStyle::Solid(color.into());
    }

    pub fn set_stroke_style_gradient(&mut self, gradient: CanvasGradient) {
        self.state.stroke = PaintStyle::Gradient(gradient);
    }

    pub fn create_linear_gradient(&self, x0: f32, y0: f32, x1: f32, y1: f32) -> CanvasGradient {
        CanvasGradient::new_linear(x0, y0, x1, y1)
    }

    /// Ignored unless finite and positive.
    pub fn set_line_width(&mut self, width: f32) {
        if width.is_finite() && width > 0.0 {
            self.state.line_width = width;
        }
    }

    pub fn set_line_cap(&mut self, cap: LineCap) {
        self.state.line_cap = cap;
    }

    pub fn set_line_join(&mut self, join: LineJoin) {
        self.state.line_join = join;
    }

    /// Ignored unless finite and positive.
    pub fn set_miter_limit(&mut self, limit: f32) {
        if limit.is_finite() && limit > 0.0 {
            self.state.miter_limit = limit;
        }
    }

    /// Ignored outside `0.0..=1.0`.
    pub fn set_global_alpha(&mut self, alpha: f32) {
        if (0.0..=1.0).contains(&alpha) {
            self.state.global_alpha = alpha;
        }
    }

    pub fn set_shadow_color(&mut self, css: &str) -> Canvas2dResult<()> {
        self.state.shadow.color = parse_color(css)?;
        Ok(())
    }

    pub fn set_shadow_color_value(&mut self, color: CanvasColor) {
        self.state.shadow.color = color.into();
    }

    /// Ignored unless finite and non-negative.
    pub fn set_shadow_blur(&mut self, blur: f32) {
        if blur.is_finite() && blur >= 0.0 {
            self.state.shadow.blur = blur;
        }
    }

    pub fn set_shadow_offset_x(&mut self, offset: f32) {
        if offset.is_finite() {
            self.state.shadow.offset_x = offset;
        }
    }

    pub fn set_shadow_offset_y(&mut self, offset: f32) {
        if offset.is_finite() {
            self.state.shadow.offset_y = offset;
        }
    }
}

fn check_dimensions(width: u32, height: u32) -> Canvas2dResult<()> {
    if (1..=MAX_DIMENSION).contains(&width) && (1..=MAX_DIMENSION).contains(&height) {
        Ok(())
    } else {
        Err(Canvas2dError::InvalidDimensions { width, height })
    }
}

/// Parse any CSS color (`#rgb`, `rgba()`, `hsl()`, named colors, ...).
pub fn parse_color(css: &str) -> Canvas2dResult<Color> {
    let parsed =
        csscolorparser::parse(css).map_err(|e| Canvas2dError::Color(format!("{:?}: {}", css, e)))?;
    let [r, g, b, a] = parsed.to_rgba8();
    Ok(Color::from_rgba8(r, g, b, a))
}

/// A surface without system fonts, for tests that draw no text.
#[cfg(test)]
pub(crate) fn test_context(width: u32, height: u32) -> Canvas2dContext {
    let config = FontConfig {
        load_system_fonts: false,
        ..FontConfig::default()
    };
    Canvas2dContext::with_config(width, height, &config).unwrap()
}
