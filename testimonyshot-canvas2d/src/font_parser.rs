//! The CSS `font` shorthand: `[style] [weight] size[/line-height] family[, family]*`.

use crate::error::{Canvas2dError, Canvas2dResult};
use cosmic_text::{Style, Weight};
use std::str::FromStr;

/// Default size of a user agent's `em`, used for `em`, `rem` and `%`.
const EM_PX: f32 = 16.0;

#[derive(Debug, Clone, PartialEq)]
pub struct ParsedFont {
    pub style: Style,
    pub weight: Weight,
    pub size_px: f32,
    /// In order of preference; may mix concrete and generic names.
    pub families: Vec<String>,
}

/// The canvas default, `10px sans-serif`.
impl Default for ParsedFont {
    fn default() -> Self {
        Self {
            style: Style::Normal,
            weight: Weight::NORMAL,
            size_px: 10.0,
            families: vec!["sans-serif".to_string()],
        }
    }
}

impl ParsedFont {
    pub fn new(size_px: f32, families: &[&str]) -> Self {
        Self {
            size_px,
            families: families.iter().map(|f| f.to_string()).collect(),
            ..Self::default()
        }
    }

    pub fn bold(self) -> Self {
        Self {
            weight: Weight::BOLD,
            ..self
        }
    }
}

impl FromStr for ParsedFont {
    type Err = Canvas2dError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_font(s)
    }
}

/// Parse a CSS font shorthand. An empty string yields the default font; a
/// string without a size is an error.
pub fn parse_font(input: &str) -> Canvas2dResult<ParsedFont> {
    let mut font = ParsedFont::default();
    let mut rest = input.trim();
    if rest.is_empty() {
        return Ok(font);
    }

    loop {
        let (token, after) = next_token(rest);
        if token.is_empty() {
            return Err(Canvas2dError::Font(format!("no font size in {:?}", input)));
        }
        rest = after;
        if apply_modifier(&mut font, token) {
            continue;
        }
        match parse_size(token) {
            Some(size) => {
                font.size_px = size;
                break;
            }
            None => {
                return Err(Canvas2dError::Font(format!(
                    "unexpected {:?} in {:?}",
                    token, input
                )))
            }
        }
    }

    let families: Vec<String> = rest
        .split(',')
        .map(|family| family.trim().trim_matches(['"', '\'']).trim().to_string())
        .filter(|family| !family.is_empty())
        .collect();
    if !families.is_empty() {
        font.families = families;
    }
    Ok(font)
}

fn next_token(s: &str) -> (&str, &str) {
    let s = s.trim_start();
    let end = s.find(char::is_whitespace).unwrap_or(s.len());
    s.split_at(end)
}

/// Style, variant and weight keywords. Returns false for anything else.
fn apply_modifier(font: &mut ParsedFont, token: &str) -> bool {
    match token.to_ascii_lowercase().as_str() {
        "normal" | "small-caps" => {}
        "italic" => font.style = Style::Italic,
        "oblique" => font.style = Style::Oblique,
        "bold" => font.weight = Weight::BOLD,
        "bolder" => font.weight = Weight::EXTRA_BOLD,
        "lighter" => font.weight = Weight::LIGHT,
        other => match other.parse::<u16>() {
            Ok(weight) if (1..=1000).contains(&weight) => font.weight = Weight(weight),
            _ => return false,
        },
    }
    true
}

/// A size with a unit, in pixels; any `/line-height` suffix is dropped.
fn parse_size(token: &str) -> Option<f32> {
    let size = token.split('/').next()?;
    let split = size
        .find(|c: char| !(c.is_ascii_digit() || c == '.'))
        .unwrap_or(size.len());
    let (number, unit) = size.split_at(split);
    let value: f32 = number.parse().ok()?;
    let px = match unit.to_ascii_lowercase().as_str() {
        "px" => value,
        "pt" => value * 4.0 / 3.0,
        "em" | "rem" => value * EM_PX,
        "%" => value * EM_PX / 100.0,
        _ => return None,
    };
    Some(px)
}
