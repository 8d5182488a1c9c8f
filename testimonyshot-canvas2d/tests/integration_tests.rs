use std::sync::OnceLock;
use testimonyshot_canvas2d::{
    ArcParams, Canvas2dContext, FontConfig, RectParams, ResolvedFontConfig, RoundRectParams,
    TextAlign, TextBaseline,
};

fn system_fonts() -> &'static ResolvedFontConfig {
    static FONTS: OnceLock<ResolvedFontConfig> = OnceLock::new();
    FONTS.get_or_init(|| FontConfig::default().resolve())
}

/// Text tests need at least one installed font.
macro_rules! skip_if_no_fonts {
    () => {
        if system_fonts().face_count() == 0 {
            eprintln!("Skipping test: no system fonts available");
            return;
        }
    };
}

fn alpha_in(ctx: &Canvas2dContext, x0: u32, y0: u32, x1: u32, y1: u32) -> u32 {
    let data = ctx.get_image_data(x0 as i32, y0 as i32, x1 - x0, y1 - y0);
    data.chunks_exact(4).map(|p| p[3] as u32).sum()
}

#[test]
fn test_draw_rectangle() {
    let mut ctx = Canvas2dContext::with_resolved(200, 200, system_fonts()).unwrap();
    ctx.set_fill_style("#ff0000").unwrap();
    ctx.fill_rect(&RectParams::new(10.0, 10.0, 100.0, 100.0));

    let data = ctx.get_image_data(50, 50, 1, 1);
    assert_eq!(data, vec![255, 0, 0, 255]);
}

#[test]
fn test_card_with_shadow_and_badge() {
    let mut ctx = Canvas2dContext::with_resolved(300, 200, system_fonts()).unwrap();
    ctx.set_fill_style("#ffffff").unwrap();
    ctx.fill_rect(&RectParams::new(0.0, 0.0, 300.0, 200.0));

    ctx.with_saved_state(|ctx| {
        ctx.set_shadow_color("rgba(0, 0, 0, 0.1)").unwrap();
        ctx.set_shadow_blur(20.0);
        ctx.set_shadow_offset_y(10.0);
        ctx.set_fill_style("rgba(255, 255, 255, 0.95)").unwrap();
        ctx.begin_path();
        ctx.round_rect(&RoundRectParams::uniform(20.0, 20.0, 260.0, 140.0, 20.0));
        ctx.fill();
    });

    ctx.set_fill_style("#EF4444").unwrap();
    ctx.begin_path();
    ctx.round_rect(&RoundRectParams::uniform(40.0, 40.0, 24.0, 24.0, 6.0));
    ctx.fill();

    // Shadow darkens the area just below the card
    let below = ctx.get_image_data(150, 165, 1, 1);
    assert!(below[0] < 255);
    // Badge is solid red
    assert_eq!(ctx.get_image_data(52, 52, 1, 1), vec![0xEF, 0x44, 0x44, 255]);
}

#[test]
fn test_avatar_placeholder_circle() {
    let mut ctx = Canvas2dContext::with_resolved(100, 100, system_fonts()).unwrap();
    ctx.set_fill_style("#e5e7eb").unwrap();
    ctx.begin_path();
    ctx.arc(&ArcParams::circle(50.0, 50.0, 24.0));
    ctx.fill();

    assert_eq!(ctx.get_image_data(50, 50, 1, 1), vec![0xe5, 0xe7, 0xeb, 255]);
    assert_eq!(ctx.get_image_data(28, 28, 1, 1)[3], 0);
}

#[test]
fn test_fill_text_draws_pixels() {
    skip_if_no_fonts!();
    let mut ctx = Canvas2dContext::with_resolved(300, 60, system_fonts()).unwrap();
    ctx.set_font("bold 24px Inter, sans-serif").unwrap();
    ctx.set_fill_style("#111827").unwrap();
    ctx.fill_text("5.0 Excellent", 10.0, 40.0);
    assert!(alpha_in(&ctx, 0, 0, 300, 60) > 0);
}

#[test]
fn test_text_alignment() {
    skip_if_no_fonts!();
    let mut ctx = Canvas2dContext::with_resolved(400, 60, system_fonts()).unwrap();
    ctx.set_font("16px sans-serif").unwrap();
    ctx.set_text_baseline(TextBaseline::Middle);
    let width = ctx.measure_text("Review #7852").width;
    assert!(width > 0.0);

    // Right-aligned text ends at the anchor
    ctx.set_text_align(TextAlign::Right);
    ctx.fill_text("Review #7852", 200.0, 30.0);
    assert_eq!(alpha_in(&ctx, 202, 0, 400, 60), 0);
    assert!(alpha_in(&ctx, 0, 0, 200, 60) > 0);
}

#[test]
fn test_measure_text_scales_with_size() {
    skip_if_no_fonts!();
    let mut ctx = Canvas2dContext::with_resolved(10, 10, system_fonts()).unwrap();
    ctx.set_font("12px sans-serif").unwrap();
    let small = ctx.measure_text("Customer Review").width;
    ctx.set_font("24px sans-serif").unwrap();
    let large = ctx.measure_text("Customer Review").width;
    assert!(large > small * 1.8);
}

#[test]
fn test_to_png_round_trips_pixels() {
    let mut ctx = Canvas2dContext::with_resolved(8, 8, system_fonts()).unwrap();
    ctx.set_fill_style("#fbbf24").unwrap();
    ctx.fill_rect(&RectParams::new(0.0, 0.0, 8.0, 8.0));
    let png = ctx.to_png(None).unwrap();

    let decoder = png::Decoder::new(std::io::Cursor::new(png));
    let mut reader = decoder.read_info().unwrap();
    let mut buf = vec![0; reader.output_buffer_size()];
    let info = reader.next_frame(&mut buf).unwrap();
    assert_eq!((info.width, info.height), (8, 8));
    assert_eq!(&buf[..4], &[0xfb, 0xbf, 0x24, 255]);
}
