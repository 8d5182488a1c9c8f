//! Card geometry as a function of the surface size.

/// Pixel font sizes, all derived from the surface width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontSizes {
    pub title: f32,
    pub body: f32,
    pub small: f32,
    pub name: f32,
    pub watermark: f32,
}

/// `⌊width · fraction⌋`, but never below one pixel.
fn scaled(width: u32, fraction: f64) -> f32 {
    (width as f64 * fraction).floor().max(1.0) as f32
}

impl FontSizes {
    pub fn for_width(width: u32) -> Self {
        Self {
            title: scaled(width, 0.025),
            body: scaled(width, 0.02),
            small: scaled(width, 0.015),
            name: scaled(width, 0.018),
            watermark: scaled(width, 0.012),
        }
    }
}

/// Size of the header badge glyph.
pub const BADGE_STAR_SIZE: f32 = 16.0;
/// Size of the rating star glyphs.
pub const RATING_STAR_SIZE: f32 = 20.0;
/// Horizontal distance between rating stars.
pub const STAR_SPACING: f32 = 25.0;
pub const CARD_RADIUS: f32 = 20.0;
pub const AVATAR_RADIUS: f32 = 24.0;

/// Fixed positions of the card. Everything below the body depends on how
/// many lines the body wraps into; see [`CardLayout::customer_y`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardLayout {
    pub width: f32,
    pub height: f32,
    pub fonts: FontSizes,
    pub card_x: f32,
    pub card_y: f32,
    pub card_width: f32,
    pub card_height: f32,
    pub header_y: f32,
    pub stars_y: f32,
    pub content_y: f32,
    /// Widest a wrapped body line may be.
    pub max_text_width: f32,
    pub line_height: f32,
}

impl CardLayout {
    pub fn new(width: u32, height: u32) -> Self {
        let (w, h) = (width as f32, height as f32);
        let padding = (width as f64 * 0.06) as f32;
        let card_x = padding;
        let card_y = padding;
        let card_width = w - padding * 2.0;
        let card_height = h - padding * 2.0;
        let header_y = card_y + 40.0;
        let stars_y = header_y + 50.0;
        Self {
            width: w,
            height: h,
            fonts: FontSizes::for_width(width),
            card_x,
            card_y,
            card_width,
            card_height,
            header_y,
            stars_y,
            content_y: stars_y + 60.0,
            max_text_width: card_width - 80.0,
            line_height: (width as f64 * 0.03).floor() as f32,
        }
    }

    /// Left edge of the card content.
    pub fn inner_left(&self) -> f32 {
        self.card_x + 40.0
    }

    /// Right edge of the card content.
    pub fn inner_right(&self) -> f32 {
        self.card_x + self.card_width - 40.0
    }

    /// Baseline of body line `index`.
    pub fn line_y(&self, index: usize) -> f32 {
        self.content_y + index as f32 * self.line_height
    }

    /// Baseline of the x-th rating star.
    pub fn star_x(&self, index: usize) -> f32 {
        self.inner_left() + index as f32 * STAR_SPACING
    }

    /// Top of the customer row after `line_count` body lines.
    pub fn customer_y(&self, line_count: usize) -> f32 {
        self.line_y(line_count.max(1) - 1) + 60.0
    }

    /// Footer divider height after `line_count` body lines.
    pub fn footer_y(&self, line_count: usize) -> f32 {
        self.customer_y(line_count) + 80.0
    }
}
