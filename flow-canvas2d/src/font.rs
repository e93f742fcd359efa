//! Font descriptors and face metrics.
//!
//! Parses CSS font strings like "12px Arial" or "bold italic 14pt 'Times New Roman'"
//! and resolves them against the font database at use time.

use crate::error::{Canvas2dError, Canvas2dResult};
use crate::style::FontStretch;
use cosmic_text::{Family, Style, Weight};

/// Parsed CSS font shorthand.
#[derive(Debug, Clone, PartialEq)]
pub struct FontDescriptor {
    pub style: Style,
    pub weight: Weight,
    /// Font size in pixels.
    pub size_px: f32,
    /// Font families in order of preference.
    pub families: Vec<String>,
}

impl Default for FontDescriptor {
    fn default() -> Self {
        Self {
            style: Style::Normal,
            weight: Weight::NORMAL,
            size_px: 12.0,
            families: vec!["Arial".to_string()],
        }
    }
}

/// Keywords allowed before the size, with their effect.
enum Keyword {
    Style(Style),
    Weight(Weight),
    Ignored,
}

const KEYWORDS: &[(&str, Keyword)] = &[
    ("italic", Keyword::Style(Style::Italic)),
    ("oblique", Keyword::Style(Style::Oblique)),
    ("normal", Keyword::Ignored),
    ("small-caps", Keyword::Ignored),
    ("bolder", Keyword::Weight(Weight::EXTRA_BOLD)),
    ("bold", Keyword::Weight(Weight::BOLD)),
    ("lighter", Keyword::Weight(Weight::LIGHT)),
];

impl FontDescriptor {
    /// Parse a CSS font string.
    ///
    /// Supports `[style] [variant] [weight] size[/line-height] family[, family]*`,
    /// which includes the plain `"<size>px <family>"` form.
    pub fn parse(font_str: &str) -> Canvas2dResult<Self> {
        let font_str = font_str.trim();
        if font_str.is_empty() {
            return Ok(Self::default());
        }

        let mut result = FontDescriptor {
            families: vec!["sans-serif".to_string()],
            ..Self::default()
        };
        let mut remaining = font_str;

        'tokens: loop {
            let trimmed = remaining.trim_start();
            for (name, keyword) in KEYWORDS {
                if let Some(rest) = strip_word(trimmed, name) {
                    match keyword {
                        Keyword::Style(style) => result.style = *style,
                        Keyword::Weight(weight) => result.weight = *weight,
                        Keyword::Ignored => {}
                    }
                    remaining = rest;
                    continue 'tokens;
                }
            }
            if let Some((weight, rest)) = parse_numeric_weight(trimmed) {
                result.weight = weight;
                remaining = rest;
                continue;
            }
            remaining = trimmed;
            break;
        }

        let (size, rest) = parse_font_size(remaining)?;
        result.size_px = size;
        remaining = rest.trim_start();

        if let Some(rest) = remaining.strip_prefix('/') {
            // line-height has no effect on a single line of text
            let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
            remaining = rest[end..].trim_start();
        }

        if !remaining.is_empty() {
            result.families = parse_font_families(remaining);
        }

        Ok(result)
    }

    /// Families mapped to database queries, ending with a sans-serif fallback.
    pub(crate) fn query_families(&self) -> Vec<Family<'_>> {
        let mut families: Vec<Family<'_>> = self
            .families
            .iter()
            .map(|name| generic_family(name).unwrap_or(Family::Name(name)))
            .collect();
        families.push(Family::SansSerif);
        families
    }

    /// Family used for shaping: the first family present in the database,
    /// otherwise the generic sans-serif family.
    pub(crate) fn shaping_family<'a>(&'a self, db: &fontdb::Database) -> Family<'a> {
        for name in &self.families {
            if let Some(generic) = generic_family(name) {
                return generic;
            }
            let available = db
                .faces()
                .any(|face| face.families.iter().any(|(f, _)| f.eq_ignore_ascii_case(name)));
            if available {
                return Family::Name(name);
            }
        }
        Family::SansSerif
    }
}

fn strip_word<'a>(s: &'a str, word: &str) -> Option<&'a str> {
    let rest = s.strip_prefix(word)?;
    (rest.is_empty() || rest.starts_with(char::is_whitespace)).then_some(rest)
}

fn generic_family(name: &str) -> Option<Family<'static>> {
    match name.to_ascii_lowercase().as_str() {
        "serif" => Some(Family::Serif),
        "sans-serif" => Some(Family::SansSerif),
        "monospace" => Some(Family::Monospace),
        "cursive" => Some(Family::Cursive),
        "fantasy" => Some(Family::Fantasy),
        _ => None,
    }
}

/// Try to parse a numeric weight (100-900) at the start of the string.
fn parse_numeric_weight(s: &str) -> Option<(Weight, &str)> {
    let digits = s.chars().take_while(|c| c.is_ascii_digit()).count();
    if digits == 0 {
        return None;
    }
    let weight: u16 = s[..digits].parse().ok()?;
    if !(100..=900).contains(&weight) || weight % 100 != 0 {
        return None;
    }
    let rest = &s[digits..];
    if !rest.is_empty() && !rest.starts_with(char::is_whitespace) {
        return None;
    }
    Some((Weight(weight), rest))
}

/// Parse font size from string.
fn parse_font_size(s: &str) -> Canvas2dResult<(f32, &str)> {
    let num_end = s
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit() && *c != '.')
        .map(|(i, _)| i)
        .unwrap_or(s.len());

    if num_end == 0 {
        return Err(Canvas2dError::FontParseError(format!(
            "Expected font size, got: {}",
            s
        )));
    }

    let num_str = &s[..num_end];
    let rest = &s[num_end..];
    let size: f32 = num_str.parse().map_err(|_| {
        Canvas2dError::FontParseError(format!("Invalid font size number: {}", num_str))
    })?;

    let units: [(&str, f32); 5] = [
        ("px", 1.0),
        ("pt", 4.0 / 3.0),
        ("rem", 16.0),
        ("em", 16.0),
        ("%", 16.0 / 100.0),
    ];
    for (unit, multiplier) in units {
        if let Some(rest) = rest.strip_prefix(unit) {
            return Ok((size * multiplier, rest));
        }
    }
    // Unitless sizes are pixels
    Ok((size, rest))
}

/// Parse a comma separated family list, honoring quotes.
fn parse_font_families(s: &str) -> Vec<String> {
    let families: Vec<String> = s
        .split(',')
        .map(|f| f.trim().trim_matches(|c| c == '"' || c == '\'').trim().to_string())
        .filter(|f| !f.is_empty())
        .collect();

    if families.is_empty() {
        vec!["sans-serif".to_string()]
    } else {
        families
    }
}

/// Vertical font metrics in pixels, in the backend's y-down convention:
/// `top` and `ascent` are negative (above the baseline), `descent` and
/// `bottom` positive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontMetrics {
    /// Highest extent of any glyph in the face.
    pub top: f32,
    pub ascent: f32,
    pub descent: f32,
    /// Lowest extent of any glyph in the face.
    pub bottom: f32,
    pub cap_height: f32,
}

impl FontMetrics {
    /// Proportional metrics used when no face can be resolved.
    pub fn approximate(size_px: f32) -> Self {
        Self {
            top: -size_px * 0.9,
            ascent: -size_px * 0.8,
            descent: size_px * 0.2,
            bottom: size_px * 0.25,
            cap_height: size_px * 0.7,
        }
    }

    fn from_face(face: &ttf_parser::Face<'_>, size_px: f32) -> Self {
        let scale = size_px / face.units_per_em().max(1) as f32;
        let bbox = face.global_bounding_box();
        let cap_height = face
            .capital_height()
            .map(|h| h as f32 * scale)
            .unwrap_or(size_px * 0.7);
        Self {
            top: -(bbox.y_max as f32) * scale,
            ascent: -(face.ascender() as f32) * scale,
            descent: -(face.descender() as f32) * scale,
            bottom: -(bbox.y_min as f32) * scale,
            cap_height,
        }
    }
}

/// Resolve the descriptor against the database and read the face metrics.
pub(crate) fn resolve_metrics(
    db: &fontdb::Database,
    font: &FontDescriptor,
    stretch: FontStretch,
) -> FontMetrics {
    let families = font.query_families();
    let query = fontdb::Query {
        families: &families,
        weight: font.weight,
        stretch: stretch.into(),
        style: font.style,
    };
    db.query(&query)
        .and_then(|id| {
            db.with_face_data(id, |data, index| {
                ttf_parser::Face::parse(data, index)
                    .ok()
                    .map(|face| FontMetrics::from_face(&face, font.size_px))
            })
        })
        .flatten()
        .unwrap_or_else(|| FontMetrics::approximate(font.size_px))
}
