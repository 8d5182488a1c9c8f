#![allow(clippy::uninlined_format_args)]
//! Deterministic testimonial card rendering.
//!
//! [`resolve`](preset::resolve) turns a social-media preset into output
//! dimensions, [`render`] draws a [`TestimonialContent`] onto a surface of
//! exactly that size, and [`encode`](encode::encode) turns the surface into
//! PNG or JPEG bytes.

pub mod avatar;
pub mod encode;
pub mod error;
pub mod labels;
pub mod layout;
pub mod model;
pub mod options;
mod painter;
pub mod preset;
pub mod render;
pub mod style;
pub mod wrap;

#[macro_use]
extern crate lazy_static;

pub use avatar::{load_avatar, AvatarAccessPolicy, AvatarImage};
pub use encode::{encode, ExportFormat};
pub use error::{AvatarError, EncodeError, ExportOptionsError, RenderSurfaceError};
pub use labels::CardLabels;
pub use model::{Rating, TestimonialContent, Theme};
pub use options::ExportOptions;
pub use preset::{resolve, AspectPreset};
pub use render::{render, render_with_avatar, CardImage, CardRenderer};
pub use serde_json;
pub use testimonyshot_canvas2d::{FontConfig, ResolvedFontConfig};
