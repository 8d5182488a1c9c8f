use base64::Engine;
use rstest::rstest;
use std::sync::OnceLock;
use testimonyshot_rs::layout::CardLayout;
use testimonyshot_rs::wrap::wrap_words;
use testimonyshot_rs::{
    encode, load_avatar, AspectPreset, AvatarAccessPolicy, AvatarImage, CardImage, CardRenderer,
    ExportFormat, ExportOptions, FontConfig, TestimonialContent,
};
use testimonyshot_canvas2d::{Canvas2dContext, ParsedFont};

fn renderer() -> &'static CardRenderer {
    static RENDERER: OnceLock<CardRenderer> = OnceLock::new();
    RENDERER.get_or_init(|| CardRenderer::new(FontConfig::default().resolve()))
}

/// Skip test if the machine has no fonts to shape text with.
macro_rules! skip_if_no_fonts {
    () => {
        if renderer().fonts().face_count() == 0 {
            eprintln!("Skipping test: no system fonts available");
            return;
        }
    };
}

fn sample() -> TestimonialContent {
    TestimonialContent {
        content: Some("Setup took five minutes and support answered within the hour.".to_string()),
        customer_name: Some("Sam Rivera".to_string()),
        customer_role: Some("Head of Growth".to_string()),
        customer_company: Some("Acme".to_string()),
        rating: Some(4),
        ..TestimonialContent::default()
    }
}

/// Center of the avatar circle for a single-line body on a twitter card.
const AVATAR_CENTER: (u32, u32) = (136, 306);
const PLACEHOLDER: [u8; 4] = [0xe5, 0xe7, 0xeb, 0xff];
const STAR_ON: [u8; 3] = [0xfb, 0xbf, 0x24];
const STAR_OFF: [u8; 3] = [0xd1, 0xd5, 0xdb];
const MUTED: [u8; 3] = [0x6b, 0x72, 0x80];
const BODY_INK: [u8; 3] = [0x37, 0x41, 0x51];
const DIVIDER: [u8; 3] = [0xe5, 0xe7, 0xeb];

/// Pixels of the box `[x0, x1) × [y0, y1)`.
fn region(image: &CardImage, x0: u32, y0: u32, x1: u32, y1: u32) -> Vec<[u8; 4]> {
    (y0..y1)
        .flat_map(|y| (x0..x1).map(move |x| (x, y)))
        .map(|(x, y)| image.pixel(x, y))
        .collect()
}

fn count_near(pixels: &[[u8; 4]], color: [u8; 3], tolerance: u8) -> usize {
    pixels
        .iter()
        .filter(|px| (0..3).all(|c| px[c].abs_diff(color[c]) <= tolerance))
        .count()
}

/// The darkest channel over a set of pixels.
fn darkest(pixels: &[[u8; 4]]) -> u8 {
    pixels
        .iter()
        .map(|px| px[0].min(px[1]).min(px[2]))
        .min()
        .unwrap_or(255)
}

/// Classify each of the five rating stars of a twitter card as filled or not.
fn star_cells(image: &CardImage) -> Vec<bool> {
    let layout = CardLayout::new(1200, 675);
    let y = layout.stars_y as u32;
    (0..5)
        .map(|i| {
            let x = layout.star_x(i) as u32;
            let cell = region(image, x, y - 22, x + 25, y + 4);
            let on = count_near(&cell, STAR_ON, 2);
            let off = count_near(&cell, STAR_OFF, 2);
            assert!(on == 0 || off == 0, "star {i} mixes colors: {on} on, {off} off");
            assert!(on + off >= 10, "star {i} is not drawn");
            on > 0
        })
        .collect()
}

/// Skip when no installed font has an outline for the star glyph.
macro_rules! skip_if_no_star_glyph {
    () => {
        let reference = renderer()
            .render(&sample(), &ExportOptions::default())
            .unwrap();
        let layout = CardLayout::new(1200, 675);
        let (x, y) = (layout.star_x(0) as u32, layout.stars_y as u32);
        if count_near(&region(&reference, x, y - 22, x + 25, y + 4), STAR_ON, 2) == 0 {
            eprintln!("Skipping test: no font with a star glyph");
            return;
        }
    };
}

#[rstest]
#[case(AspectPreset::Twitter, 1200, 675)]
#[case(AspectPreset::Instagram, 1080, 1080)]
#[case(AspectPreset::LinkedIn, 1200, 627)]
#[case(AspectPreset::Custom, 800, 600)]
fn test_render_matches_preset_size(
    #[case] preset: AspectPreset,
    #[case] width: u32,
    #[case] height: u32,
) {
    let options = ExportOptions::for_preset(preset, None, None);
    let image = renderer().render(&sample(), &options).unwrap();
    assert_eq!((image.width(), image.height()), (width, height));
    assert_eq!(image.to_rgba8().len(), (width * height * 4) as usize);
}

#[test]
fn test_render_is_deterministic() {
    let options = ExportOptions::default();
    let first = renderer().render(&sample(), &options).unwrap();
    let second = renderer().render(&sample(), &options).unwrap();
    assert!(first.to_rgba8() == second.to_rgba8());
}

#[test]
fn test_surface_is_opaque() {
    let image = renderer()
        .render(&sample(), &ExportOptions::default())
        .unwrap();
    assert!(image.to_rgba8().chunks_exact(4).all(|px| px[3] == 255));
}

#[test]
fn test_zero_size_fails_before_drawing() {
    let err = renderer()
        .render(&sample(), &ExportOptions::new(0, 675))
        .err()
        .unwrap();
    assert_eq!((err.width, err.height), (0, 675));
}

#[test]
fn test_card_casts_shadow_below() {
    let image = renderer()
        .render(&sample(), &ExportOptions::default())
        .unwrap();
    // Card bottom edge sits at y = 603; the shadow is offset 10px down
    let shadowed = image.pixel(600, 608);
    let clear = image.pixel(20, 608);
    assert!(
        shadowed[0] as u32 + 8 < clear[0] as u32,
        "shadowed {:?} vs clear {:?}",
        shadowed,
        clear
    );
    // No shadow far below the card
    let below = image.pixel(600, 670);
    assert!(below[0] >= 245, "{:?}", below);
}

#[test]
fn test_placeholder_avatar_without_image() {
    let image = renderer()
        .render(&TestimonialContent::default(), &ExportOptions::default())
        .unwrap();
    let (x, y) = AVATAR_CENTER;
    assert_eq!(image.pixel(x, y), PLACEHOLDER);
}

#[test]
fn test_remote_avatar_falls_back_to_placeholder() {
    let testimonial = TestimonialContent {
        customer_avatar: Some("https://example.com/avatar.png".to_string()),
        ..sample()
    };
    let image = renderer()
        .render(&testimonial, &ExportOptions::default())
        .unwrap();
    let (x, y) = AVATAR_CENTER;
    assert_eq!(image.pixel(x, y), PLACEHOLDER);
}

#[test]
fn test_avatar_image_is_clipped_to_circle() {
    let red = AvatarImage::from_rgba(8, 8, [255, 0, 0, 255].repeat(64)).unwrap();
    let image = renderer()
        .render_with_avatar(&sample(), &ExportOptions::default(), Some(&red))
        .unwrap();
    let (x, y) = AVATAR_CENTER;
    assert_eq!(image.pixel(x, y), [255, 0, 0, 255]);
    // Corner of the avatar's bounding square is outside the circle
    let corner = image.pixel(x - 23, y - 23);
    assert_ne!(corner[..3], [255, 0, 0]);
}

fn write_png(path: &std::path::Path, rgba: [u8; 4]) {
    image::RgbaImage::from_pixel(4, 4, image::Rgba(rgba))
        .save(path)
        .unwrap();
}

#[test]
fn test_render_does_not_read_avatar_files() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("avatar.png");
    let testimonial = TestimonialContent {
        customer_avatar: Some(path.to_str().unwrap().to_string()),
        ..sample()
    };
    let options = ExportOptions::default();

    write_png(&path, [255, 0, 0, 255]);
    let first = renderer().render(&testimonial, &options).unwrap();
    write_png(&path, [0, 0, 255, 255]);
    let second = renderer().render(&testimonial, &options).unwrap();

    let (x, y) = AVATAR_CENTER;
    assert_eq!(first.pixel(x, y), PLACEHOLDER);
    assert!(first.to_rgba8() == second.to_rgba8());
    let file_url = TestimonialContent {
        customer_avatar: Some(format!("file://{}", path.display())),
        ..sample()
    };
    let third = renderer().render(&file_url, &options).unwrap();
    assert!(first.to_rgba8() == third.to_rgba8());
}

#[test]
fn test_render_decodes_inline_avatar() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("avatar.png");
    write_png(&path, [255, 0, 0, 255]);
    let encoded = base64::engine::general_purpose::STANDARD.encode(std::fs::read(&path).unwrap());
    let testimonial = TestimonialContent {
        customer_avatar: Some(format!("data:image/png;base64,{encoded}")),
        ..sample()
    };
    let image = renderer()
        .render(&testimonial, &ExportOptions::default())
        .unwrap();
    let (x, y) = AVATAR_CENTER;
    assert_eq!(image.pixel(x, y), [255, 0, 0, 255]);
}

#[test]
fn test_avatar_loaded_inside_root_is_drawn() {
    let dir = tempfile::tempdir().unwrap();
    write_png(&dir.path().join("avatar.png"), [0, 0, 255, 255]);
    let policy = AvatarAccessPolicy::with_filesystem_root(dir.path());
    let avatar = load_avatar("avatar.png", &policy).unwrap();
    let image = renderer()
        .render_with_avatar(&sample(), &ExportOptions::default(), Some(&avatar))
        .unwrap();
    let (x, y) = AVATAR_CENTER;
    assert_eq!(image.pixel(x, y), [0, 0, 255, 255]);
}

#[test]
fn test_placeholder_text_is_drawn() {
    skip_if_no_fonts!();
    let options = ExportOptions::default();
    let placeholder = renderer()
        .render(&TestimonialContent::default(), &options)
        .unwrap();
    let written = renderer()
        .render(&TestimonialContent::new("Short."), &options)
        .unwrap();
    assert!(placeholder.to_rgba8() != written.to_rgba8());
}

#[test]
fn test_theme_changes_text_colors() {
    skip_if_no_fonts!();
    let options = ExportOptions::default();
    let plain = renderer().render(&sample(), &options).unwrap();
    let glass = TestimonialContent {
        theme: Some("glassmorphic".to_string()),
        ..sample()
    };
    let glass = renderer().render(&glass, &options).unwrap();
    assert!(plain.to_rgba8() != glass.to_rgba8());
    // Shapes are unaffected by theme
    let (x, y) = AVATAR_CENTER;
    assert_eq!(plain.pixel(x, y), glass.pixel(x, y));
    assert_eq!(plain.pixel(600, 608), glass.pixel(600, 608));
}

#[test]
fn test_rating_fills_that_many_stars() {
    skip_if_no_fonts!();
    skip_if_no_star_glyph!();
    let options = ExportOptions::default();
    for rating in 1..=5i64 {
        let testimonial = TestimonialContent {
            rating: Some(rating),
            ..sample()
        };
        let image = renderer().render(&testimonial, &options).unwrap();
        let expected: Vec<bool> = (0..5).map(|i| i < rating as usize).collect();
        assert_eq!(star_cells(&image), expected, "rating {rating}");
    }
}

#[test]
fn test_out_of_range_rating_renders_as_five() {
    skip_if_no_fonts!();
    skip_if_no_star_glyph!();
    let options = ExportOptions::default();
    let five = TestimonialContent {
        rating: Some(5),
        ..sample()
    };
    let five = renderer().render(&five, &options).unwrap();
    assert_eq!(star_cells(&five), vec![true; 5]);

    // Same stars, "5.0" and "Excellent" as an explicit five
    for rating in [Some(9), Some(0), None] {
        let testimonial = TestimonialContent { rating, ..sample() };
        let image = renderer().render(&testimonial, &options).unwrap();
        assert!(image.to_rgba8() == five.to_rgba8(), "rating {rating:?}");
    }
    let four = renderer().render(&sample(), &options).unwrap();
    assert!(four.to_rgba8() != five.to_rgba8());
}

#[test]
fn test_glassmorphic_text_colors() {
    skip_if_no_fonts!();
    let options = ExportOptions::default();
    let plain = renderer().render(&sample(), &options).unwrap();
    let glass = TestimonialContent {
        theme: Some("glassmorphic".to_string()),
        ..sample()
    };
    let glass = renderer().render(&glass, &options).unwrap();
    let layout = CardLayout::new(1200, 675);
    let left = layout.inner_left() as u32;
    let text_x = left + 60;

    // Body line: dark ink by default, white on the light card otherwise
    let body_y = layout.line_y(0) as u32;
    let plain_body = region(&plain, left, body_y - 22, 1088, body_y + 8);
    let glass_body = region(&glass, left, body_y - 22, 1088, body_y + 8);
    assert!(count_near(&plain_body, BODY_INK, 12) > 0);
    assert_eq!(count_near(&glass_body, BODY_INK, 40), 0);
    assert!(darkest(&glass_body) >= 0xf0, "{}", darkest(&glass_body));

    // Customer name is white too
    let customer_y = layout.customer_y(1) as u32;
    let glass_name = region(&glass, text_x, customer_y, 500, customer_y + 24);
    assert!(darkest(&glass_name) >= 0xf0, "{}", darkest(&glass_name));
    let plain_name = region(&plain, text_x, customer_y, 500, customer_y + 24);
    assert!(darkest(&plain_name) < 0x60);

    // Role line is drawn, but never darker than the light divider gray
    let role = region(&glass, text_x, customer_y + 30, 500, customer_y + 44);
    assert!(darkest(&role) < 0xf4, "role text not drawn");
    assert!(darkest(&role) + 3 >= DIVIDER[0], "{}", darkest(&role));
    assert_eq!(count_near(&role, MUTED, 40), 0);
    let plain_role = region(&plain, text_x, customer_y + 30, 500, customer_y + 44);
    assert!(count_near(&plain_role, MUTED, 40) > 0);
}

#[test]
fn test_captions_stay_muted_under_both_themes() {
    skip_if_no_fonts!();
    let options = ExportOptions::default();
    let layout = CardLayout::new(1200, 675);
    let header_y = layout.header_y as u32;
    let footer_y = layout.footer_y(1) as u32;
    let left = layout.inner_left() as u32;

    let mut renders = Vec::new();
    for theme in [None, Some("glassmorphic".to_string())] {
        let testimonial = TestimonialContent { theme, ..sample() };
        let image = renderer().render(&testimonial, &options).unwrap();
        // Past the red header badge
        let header = region(&image, left + 38, header_y, 1088, header_y + 22);
        let footer = region(&image, left, footer_y + 6, 1088, footer_y + 30);
        for caption in [&header, &footer] {
            assert!(count_near(caption, MUTED, 40) > 0);
            assert!(darkest(caption) + 4 >= MUTED[0], "{}", darkest(caption));
        }
        renders.push((header, footer));
    }
    assert!(renders[0] == renders[1]);
}

#[test]
fn test_watermark_toggle() {
    skip_if_no_fonts!();
    let with = renderer()
        .render(&sample(), &ExportOptions::default())
        .unwrap();
    let without = renderer()
        .render(&sample(), &ExportOptions::default().with_watermark(false))
        .unwrap();
    assert!(with.to_rgba8() != without.to_rgba8());
}

#[test]
fn test_long_body_wraps_within_card() {
    skip_if_no_fonts!();
    let content = "The onboarding was smooth and the team checked in every week. ".repeat(9);
    assert!(content.len() > 500);

    let layout = CardLayout::new(1200, 675);
    let mut ctx = Canvas2dContext::with_resolved(10, 10, renderer().fonts()).unwrap();
    ctx.set_parsed_font(ParsedFont::new(layout.fonts.body, &["Inter", "sans-serif"]));
    let lines = wrap_words(&content, layout.max_text_width, |line| {
        ctx.measure_text(line).width
    });

    assert!(lines.len() > 2);
    for line in &lines {
        let width = ctx.measure_text(line).width;
        assert!(
            width <= layout.max_text_width || !line.contains(' '),
            "{line:?} is {width}px wide"
        );
    }
    let rejoined = lines.join(" ");
    assert_eq!(rejoined, content.split_whitespace().collect::<Vec<_>>().join(" "));

    // Rendering the same body still fits the surface
    let image = renderer()
        .render(&TestimonialContent::new(content), &ExportOptions::default())
        .unwrap();
    assert_eq!(image.width(), 1200);
}

#[test]
fn test_png_export_decodes() {
    let card = renderer()
        .render(&sample(), &ExportOptions::default())
        .unwrap();
    let bytes = encode(&card, ExportFormat::Png, 97, None).unwrap();
    assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
    let decoded = image::load_from_memory(&bytes).unwrap().to_rgba8();
    assert_eq!(decoded.dimensions(), (1200, 675));
    assert!(decoded.into_raw() == card.to_rgba8());

    // Quality does not affect lossless output
    assert!(encode(&card, ExportFormat::Png, 50, None).unwrap() == bytes);
}

#[test]
fn test_jpeg_export_decodes() {
    let card = renderer()
        .render(&sample(), &ExportOptions::new(400, 300))
        .unwrap();
    let high = encode(&card, ExportFormat::Jpeg, 100, None).unwrap();
    let low = encode(&card, ExportFormat::Jpeg, 50, None).unwrap();
    assert_eq!(&high[..2], &[0xff, 0xd8]);
    assert!(low.len() < high.len());

    let decoded = image::load_from_memory(&high).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (400, 300));
}
