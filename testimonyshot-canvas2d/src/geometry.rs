//! Shapes, colors and image buffers accepted by the drawing operations.

/// An axis-aligned rectangle in user space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectParams {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl RectParams {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// The four corners, clockwise from the origin.
    pub(crate) fn corners(&self) -> [(f32, f32); 4] {
        let (right, bottom) = (self.x + self.width, self.y + self.height);
        [
            (self.x, self.y),
            (right, self.y),
            (right, bottom),
            (self.x, bottom),
        ]
    }
}

/// A rectangle with circular corners.
///
/// `radii` run clockwise from the top-left corner. Negative radii count as zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoundRectParams {
    pub rect: RectParams,
    pub radii: [f32; 4],
}

impl RoundRectParams {
    /// Same radius on every corner.
    pub fn uniform(x: f32, y: f32, width: f32, height: f32, radius: f32) -> Self {
        Self {
            rect: RectParams::new(x, y, width, height),
            radii: [radius; 4],
        }
    }
}

/// An elliptical arc around `center`, from `start_angle` to `end_angle`
/// (radians, clockwise from the positive x axis unless `anticlockwise`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcParams {
    pub center: (f32, f32),
    pub radius_x: f32,
    pub radius_y: f32,
    /// Rotation of the ellipse axes in radians.
    pub rotation: f32,
    pub start_angle: f32,
    pub end_angle: f32,
    pub anticlockwise: bool,
}

impl ArcParams {
    /// Circular arc, as drawn by `arc()`.
    pub fn circular(
        x: f32,
        y: f32,
        radius: f32,
        start_angle: f32,
        end_angle: f32,
        anticlockwise: bool,
    ) -> Self {
        Self {
            center: (x, y),
            radius_x: radius,
            radius_y: radius,
            rotation: 0.0,
            start_angle,
            end_angle,
            anticlockwise,
        }
    }

    /// A full circle.
    pub fn circle(x: f32, y: f32, radius: f32) -> Self {
        Self::circular(x, y, radius, 0.0, std::f32::consts::TAU, false)
    }

    /// Same arc with separate radii and a rotated axis.
    pub fn stretched(self, radius_x: f32, radius_y: f32, rotation: f32) -> Self {
        Self {
            radius_x,
            radius_y,
            rotation,
            ..self
        }
    }
}

/// 8-bit RGBA color, not premultiplied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CanvasColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl CanvasColor {
    pub const fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color from a `0xRRGGBB` literal.
    pub const fn from_hex(rgb: u32) -> Self {
        Self::from_rgba8((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8, 0xff)
    }

    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }
}

impl From<CanvasColor> for tiny_skia::Color {
    fn from(c: CanvasColor) -> Self {
        tiny_skia::Color::from_rgba8(c.r, c.g, c.b, c.a)
    }
}

/// Borrowed RGBA pixels (4 bytes per pixel, row-major, not premultiplied).
#[derive(Debug, Clone, Copy)]
pub struct CanvasImageDataRef<'a> {
    pub data: &'a [u8],
    pub width: u32,
    pub height: u32,
}

impl<'a> CanvasImageDataRef<'a> {
    pub fn new(data: &'a [u8], width: u32, height: u32) -> Self {
        Self {
            data,
            width,
            height,
        }
    }

    pub(crate) fn has_expected_len(&self) -> bool {
        self.data.len() == self.width as usize * self.height as usize * 4
    }
}
