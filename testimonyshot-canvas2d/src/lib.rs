//! A software 2D canvas with HTML canvas drawing semantics.
//!
//! Paths, fills and strokes are rasterized with `tiny-skia`, text is shaped
//! with `cosmic-text` over a `fontdb` font database, and surfaces encode to
//! PNG. Only what a static card layout needs is implemented: no pattern
//! fills, dashes, composite modes or text strokes.
//!
//! ```rust,ignore
//! use testimonyshot_canvas2d::{Canvas2dContext, RoundRectParams};
//!
//! let mut ctx = Canvas2dContext::new(400, 300)?;
//! ctx.set_fill_style("#ef4444")?;
//! ctx.round_rect(&RoundRectParams::uniform(10.0, 10.0, 100.0, 50.0, 8.0));
//! ctx.fill();
//! let png = ctx.to_png(None)?;
//! ```

mod arc;
mod context;
mod drawing_state;
mod error;
mod font_config;
mod font_parser;
mod geometry;
mod gradient;
mod shadow;
mod style;
mod text;

pub use context::{parse_color, Canvas2dContext, MAX_DIMENSION};
pub use error::{Canvas2dError, Canvas2dResult};
pub use font_config::{CustomFont, FontConfig, ResolvedFontConfig, DEFAULT_SANS_SERIF};
pub use font_parser::{parse_font, ParsedFont};
pub use geometry::{ArcParams, CanvasColor, CanvasImageDataRef, RectParams, RoundRectParams};
pub use gradient::{CanvasGradient, GradientStop};
pub use style::{CanvasFillRule, LineCap, LineJoin, PaintStyle, TextAlign, TextBaseline};
pub use text::TextMetrics;
pub use tiny_skia::{Color, Transform};
