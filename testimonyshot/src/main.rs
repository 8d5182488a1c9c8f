#![allow(clippy::uninlined_format_args)]

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use log::{info, warn};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use testimonyshot_rs::model::slugify;
use testimonyshot_rs::options::{DEFAULT_QUALITY, MAX_QUALITY, MIN_QUALITY};
use testimonyshot_rs::{
    encode, load_avatar, resolve, AspectPreset, AvatarAccessPolicy, AvatarImage, CardRenderer,
    ExportFormat, ExportOptions, FontConfig, TestimonialContent,
};

/// testimonyshot: Render a testimonial record into a shareable card image
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about,
    long_about = None,
    args_conflicts_with_subcommands = true,
    subcommand_negates_reqs = true
)]
struct Args {
    /// Path to the testimonial JSON file, or - for stdin
    #[arg(short, long, required = true)]
    input: Option<String>,

    /// Path to the image file to write, or - for stdout
    #[arg(short, long)]
    output: Option<String>,

    /// Size preset. One of twitter, instagram, linkedin, custom
    #[arg(short, long, default_value = "twitter")]
    preset: AspectPreset,

    /// Width of a custom card
    #[arg(long)]
    width: Option<u32>,

    /// Height of a custom card
    #[arg(long)]
    height: Option<u32>,

    /// Encoder quality (JPEG only)
    #[arg(
        short,
        long,
        default_value_t = DEFAULT_QUALITY,
        value_parser = clap::value_parser!(u8).range(MIN_QUALITY as i64..=MAX_QUALITY as i64)
    )]
    quality: u8,

    /// Leave out the "Powered by" caption
    #[arg(long)]
    no_watermark: bool,

    /// Output format, png or jpeg. Inferred from the output file extension by default
    #[arg(short, long)]
    format: Option<ExportFormat>,

    /// Additional directory to load fonts from (repeatable)
    #[arg(long)]
    font_dir: Vec<PathBuf>,

    /// Do not load system fonts
    #[arg(long)]
    no_system_fonts: bool,

    /// Directory avatar file paths in the testimonial may be read from.
    /// Without it only inline data: URL avatars are drawn
    #[arg(long)]
    avatar_root: Option<PathBuf>,

    /// Pixels per inch recorded in PNG output
    #[arg(long)]
    ppi: Option<f32>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List the size presets and their dimensions
    Presets,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    match args.command {
        Some(Commands::Presets) => {
            print_presets();
            Ok(())
        }
        None => render_card(&args),
    }
}

fn print_presets() {
    for preset in AspectPreset::ALL {
        let (width, height) = resolve(preset, None, None);
        let note = if preset.dimensions().is_none() {
            " (default, see --width/--height)"
        } else {
            ""
        };
        println!(
            "{}\t{}x{}{}\t{}",
            preset.name(),
            width,
            height,
            note,
            preset.label()
        );
    }
}

fn render_card(args: &Args) -> anyhow::Result<()> {
    let Some(input) = args.input.as_deref() else {
        bail!("No input file given");
    };
    let testimonial = read_testimonial(input)?;

    let format = match (args.format, args.output.as_deref()) {
        (Some(format), _) => format,
        (None, Some(output)) => Path::new(output)
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(ExportFormat::from_extension)
            .unwrap_or_default(),
        (None, None) => ExportFormat::default(),
    };
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| default_output_name(&testimonial, format));

    let options = ExportOptions::for_preset(args.preset, args.width, args.height)
        .with_quality(args.quality)
        .with_watermark(!args.no_watermark);
    options.validate()?;

    let fonts = FontConfig {
        load_system_fonts: !args.no_system_fonts,
        font_dirs: args.font_dir.clone(),
        ..FontConfig::default()
    };
    let renderer = CardRenderer::new(fonts.resolve());
    let avatar = resolve_avatar(&testimonial, args.avatar_root.as_deref());
    let card = renderer.render_with_avatar(&testimonial, &options, avatar.as_ref())?;
    let bytes = encode(&card, format, options.quality, args.ppi)?;

    write_output(&output, &bytes)?;
    info!(
        "Wrote {}x{} {} card to {}",
        options.width, options.height, format, output
    );
    Ok(())
}

/// Decode the testimonial's avatar; failures fall back to the placeholder.
fn resolve_avatar(testimonial: &TestimonialContent, root: Option<&Path>) -> Option<AvatarImage> {
    let reference = testimonial.avatar_ref()?;
    let policy = AvatarAccessPolicy {
        filesystem_root: root.map(Path::to_path_buf),
    };
    load_avatar(reference, &policy)
        .map_err(|err| warn!("Ignoring avatar: {}", err))
        .ok()
}

fn read_testimonial(input: &str) -> anyhow::Result<TestimonialContent> {
    let text = if input == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read testimonial from stdin")?;
        text
    } else {
        std::fs::read_to_string(input)
            .with_context(|| format!("Failed to read input file: {}", input))?
    };
    serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse input file as testimonial JSON: {}", input))
}

fn write_output(output: &str, bytes: &[u8]) -> anyhow::Result<()> {
    if output == "-" {
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(bytes)?;
        stdout.flush()?;
        return Ok(());
    }
    std::fs::write(output, bytes)
        .with_context(|| format!("Failed to write card image to {}", output))
}

/// `testimonial-<id>.<ext>`, falling back to the customer name, then to the bare prefix.
///
/// The id is slugified so it cannot name another directory.
fn default_output_name(testimonial: &TestimonialContent, format: ExportFormat) -> String {
    let id = match &testimonial.id {
        Some(serde_json::Value::Number(id)) => slugify(&id.to_string()),
        Some(serde_json::Value::String(id)) => slugify(id),
        _ => String::new(),
    };
    let stem = if !id.is_empty() {
        format!("testimonial-{}", id)
    } else if testimonial.has_customer_name() {
        format!("testimonial-{}", testimonial.slug())
    } else {
        "testimonial".to_string()
    };
    format!("{}.{}", stem, format.extension())
}
