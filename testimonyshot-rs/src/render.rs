//! The card renderer.

use crate::avatar::{load_avatar, AvatarAccessPolicy, AvatarImage};
use crate::error::RenderSurfaceError;
use crate::labels::CardLabels;
use crate::layout::{CardLayout, AVATAR_RADIUS, BADGE_STAR_SIZE, CARD_RADIUS, RATING_STAR_SIZE};
use crate::model::TestimonialContent;
use crate::options::ExportOptions;
use crate::painter::Painter;
use crate::style::{self, DrawStyle, Palette, Shadow};
use crate::wrap::wrap_words;
use log::{debug, warn};
use testimonyshot_canvas2d::{
    Canvas2dContext, Canvas2dResult, FontConfig, ParsedFont, ResolvedFontConfig, RoundRectParams,
    TextAlign,
};

const CARD_FONT: [&str; 2] = ["Inter", "sans-serif"];
const STAR_FONT: [&str; 2] = ["Arial", "sans-serif"];
const STAR: &str = "★";

lazy_static! {
    static ref DEFAULT_RENDERER: CardRenderer = CardRenderer::new(FontConfig::default().resolve());
}

/// A rendered card: an RGBA surface of exactly the requested size.
pub struct CardImage {
    surface: Canvas2dContext,
}

impl CardImage {
    pub fn width(&self) -> u32 {
        self.surface.width()
    }

    pub fn height(&self) -> u32 {
        self.surface.height()
    }

    /// Non-premultiplied RGBA pixels, row-major.
    pub fn to_rgba8(&self) -> Vec<u8> {
        self.surface
            .get_image_data(0, 0, self.surface.width(), self.surface.height())
    }

    /// A single non-premultiplied RGBA pixel; transparent outside the surface.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let data = self.surface.get_image_data(x as i32, y as i32, 1, 1);
        [data[0], data[1], data[2], data[3]]
    }

    /// Encode as PNG, optionally tagging the physical pixel density.
    pub fn to_png(&self, ppi: Option<f32>) -> Canvas2dResult<Vec<u8>> {
        self.surface.to_png(ppi)
    }

    /// The underlying canvas.
    pub fn surface(&self) -> &Canvas2dContext {
        &self.surface
    }
}

/// Renders testimonial cards with a fixed font set and caption set.
pub struct CardRenderer {
    fonts: ResolvedFontConfig,
    labels: CardLabels,
}

impl Default for CardRenderer {
    fn default() -> Self {
        Self {
            fonts: DEFAULT_RENDERER.fonts.clone(),
            labels: CardLabels::default(),
        }
    }
}

impl CardRenderer {
    pub fn new(fonts: ResolvedFontConfig) -> Self {
        Self {
            fonts,
            labels: CardLabels::default(),
        }
    }

    pub fn with_labels(mut self, labels: CardLabels) -> Self {
        self.labels = labels;
        self
    }

    pub fn labels(&self) -> &CardLabels {
        &self.labels
    }

    pub fn fonts(&self) -> &ResolvedFontConfig {
        &self.fonts
    }

    /// Render a card without touching the filesystem or network.
    ///
    /// Only an inline `data:` avatar is decoded; any other reference draws the
    /// placeholder. Resolve file avatars with [`load_avatar`] and pass them to
    /// [`render_with_avatar`](Self::render_with_avatar).
    pub fn render(
        &self,
        testimonial: &TestimonialContent,
        options: &ExportOptions,
    ) -> Result<CardImage, RenderSurfaceError> {
        let avatar = testimonial.avatar_ref().and_then(|reference| {
            load_avatar(reference, &AvatarAccessPolicy::default())
                .map_err(|err| debug!("Drawing placeholder avatar: {}", err))
                .ok()
        });
        self.render_with_avatar(testimonial, options, avatar.as_ref())
    }

    /// Render a card with an already decoded avatar; `None` draws the placeholder.
    ///
    /// The output depends only on the arguments and the renderer's fonts and labels.
    pub fn render_with_avatar(
        &self,
        testimonial: &TestimonialContent,
        options: &ExportOptions,
        avatar: Option<&AvatarImage>,
    ) -> Result<CardImage, RenderSurfaceError> {
        let (width, height) = (options.width, options.height);
        let mut surface =
            Canvas2dContext::with_resolved(width, height, &self.fonts).map_err(|source| {
                RenderSurfaceError {
                    width,
                    height,
                    source,
                }
            })?;
        debug!("Rendering {}x{} card", width, height);

        let layout = CardLayout::new(width, height);
        let mut painter = Painter::new(&mut surface);
        self.draw_card(&mut painter, &layout, testimonial, options, avatar);

        Ok(CardImage { surface })
    }

    fn draw_card(
        &self,
        painter: &mut Painter<'_>,
        layout: &CardLayout,
        testimonial: &TestimonialContent,
        options: &ExportOptions,
        avatar: Option<&AvatarImage>,
    ) {
        let fonts = &layout.fonts;
        let title_font = ParsedFont::new(fonts.title, &CARD_FONT).bold();
        let body_font = ParsedFont::new(fonts.body, &CARD_FONT);
        let small_font = ParsedFont::new(fonts.small, &CARD_FONT);
        let name_font = ParsedFont::new(fonts.name, &CARD_FONT).bold();
        let palette = Palette::for_theme(testimonial.theme());
        let labels = &self.labels;
        let (left, right) = (layout.inner_left(), layout.inner_right());

        painter.fill_background(style::BACKGROUND_START, style::BACKGROUND_END);

        // Card panel; the only shape with a shadow
        painter.fill_round_rect(
            &RoundRectParams::uniform(
                layout.card_x,
                layout.card_y,
                layout.card_width,
                layout.card_height,
                CARD_RADIUS,
            ),
            &DrawStyle::fill(style::CARD_FILL).with_shadow(Shadow {
                color: style::CARD_SHADOW,
                blur: 20.0,
                offset_x: 0.0,
                offset_y: 10.0,
            }),
        );

        // Header
        let header_y = layout.header_y;
        painter.fill_round_rect(
            &RoundRectParams::uniform(left, header_y, 24.0, 24.0, 6.0),
            &DrawStyle::fill(style::BADGE),
        );
        painter.fill_text(
            STAR,
            layout.card_x + 52.0,
            header_y + 17.0,
            &DrawStyle::text(style::WHITE, ParsedFont::new(BADGE_STAR_SIZE, &STAR_FONT))
                .aligned(TextAlign::Center),
        );
        let header_caption = DrawStyle::text(style::MUTED, small_font.clone());
        painter.fill_text(
            &labels.header_title,
            layout.card_x + 80.0,
            header_y + 16.0,
            &header_caption,
        );
        painter.fill_text(
            &labels.date,
            right,
            header_y + 16.0,
            &header_caption.clone().aligned(TextAlign::Right),
        );

        // Rating
        let rating = testimonial.effective_rating();
        let stars_y = layout.stars_y;
        let star_font = ParsedFont::new(RATING_STAR_SIZE, &STAR_FONT);
        for i in 0..5 {
            let color = if i < rating.filled_stars() {
                style::STAR_ON
            } else {
                style::STAR_OFF
            };
            painter.fill_text(
                STAR,
                layout.star_x(i),
                stars_y,
                &DrawStyle::text(color, star_font.clone()),
            );
        }
        painter.fill_text(
            &format!("{}.0", rating.value()),
            layout.star_x(5) + 10.0,
            stars_y - 2.0,
            &DrawStyle::text(style::INK, title_font),
        );
        painter.fill_text(
            rating.label(),
            layout.star_x(5) + 60.0,
            stars_y - 2.0,
            &DrawStyle::text(style::MUTED, small_font.clone()),
        );

        // Body
        let lines = painter.with_font(&body_font, |ctx| {
            wrap_words(testimonial.body_text(), layout.max_text_width, |line| {
                ctx.measure_text(line).width
            })
        });
        debug!("Body wrapped into {} lines", lines.len());
        let body_style = DrawStyle::text(palette.body, body_font);
        for (index, line) in lines.iter().enumerate() {
            painter.fill_text(line, left, layout.line_y(index), &body_style);
        }

        // Customer row
        let customer_y = layout.customer_y(lines.len());
        let (avatar_x, avatar_y) = (left + AVATAR_RADIUS, customer_y + AVATAR_RADIUS);
        let drew_avatar = avatar.is_some_and(|image| {
            draw_avatar(painter, image, avatar_x, avatar_y)
                .map_err(|err| warn!("Failed to draw avatar: {}", err))
                .is_ok()
        });
        if !drew_avatar {
            painter.fill_circle(
                avatar_x,
                avatar_y,
                AVATAR_RADIUS,
                &DrawStyle::fill(style::AVATAR_PLACEHOLDER),
            );
        }
        let text_x = left + 60.0;
        painter.fill_text(
            testimonial.name_text(),
            text_x,
            customer_y + 20.0,
            &DrawStyle::text(palette.name, name_font),
        );
        painter.fill_text(
            &testimonial.role_company_text(),
            text_x,
            customer_y + 40.0,
            &DrawStyle::text(palette.role, small_font.clone()),
        );
        let muted_right =
            DrawStyle::text(style::MUTED, small_font.clone()).aligned(TextAlign::Right);
        painter.fill_text(&labels.helpful_badge, right, customer_y + 30.0, &muted_right);

        // Footer
        let footer_y = layout.footer_y(lines.len());
        painter.stroke_line(
            (left, footer_y),
            (right, footer_y),
            &DrawStyle::stroke(style::DIVIDER, 1.0),
        );
        painter.fill_text(
            &labels.review_id,
            left,
            footer_y + 25.0,
            &DrawStyle::text(style::MUTED, small_font),
        );
        painter.fill_text(&labels.helpful_caption, right, footer_y + 25.0, &muted_right);

        if options.show_watermark {
            painter.fill_text(
                &labels.watermark,
                layout.card_x + layout.card_width / 2.0,
                footer_y + 55.0,
                &DrawStyle::text(
                    style::WATERMARK,
                    ParsedFont::new(fonts.watermark, &CARD_FONT),
                )
                .aligned(TextAlign::Center),
            );
        }
    }
}

fn draw_avatar(
    painter: &mut Painter<'_>,
    image: &AvatarImage,
    cx: f32,
    cy: f32,
) -> Canvas2dResult<()> {
    painter.draw_image_in_circle(image, cx, cy, AVATAR_RADIUS)
}

/// Render with the default renderer (system fonts, stock captions).
pub fn render(
    testimonial: &TestimonialContent,
    options: &ExportOptions,
) -> Result<CardImage, RenderSurfaceError> {
    DEFAULT_RENDERER.render(testimonial, options)
}

/// Render with the default renderer and an already decoded avatar.
pub fn render_with_avatar(
    testimonial: &TestimonialContent,
    options: &ExportOptions,
    avatar: Option<&AvatarImage>,
) -> Result<CardImage, RenderSurfaceError> {
    DEFAULT_RENDERER.render_with_avatar(testimonial, options, avatar)
}
