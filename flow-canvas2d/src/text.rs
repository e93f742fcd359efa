//! Text shaping, glyph outlines and metrics using cosmic-text.

use crate::font::{FontDescriptor, FontMetrics};
use crate::style::{FontStretch, TextBaseline};
use cosmic_text::{
    Attrs, Buffer, CacheKeyFlags, Command, FontSystem, Metrics, Shaping, SwashCache,
};
use serde::{Deserialize, Serialize};
use tiny_skia::{PathBuilder, Rect};

/// Text metrics returned by measureText().
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextMetrics {
    /// Advance width of the text in pixels.
    pub width: f32,
    /// Distance from the alignment point to the left of the ink bounds.
    pub actual_bounding_box_left: f32,
    /// Distance from the alignment point to the right of the ink bounds.
    pub actual_bounding_box_right: f32,
    /// Distance from the baseline to the top of the ink bounds.
    pub actual_bounding_box_ascent: f32,
    /// Distance from the baseline to the bottom of the ink bounds.
    pub actual_bounding_box_descent: f32,
    /// Font ascent.
    pub font_bounding_box_ascent: f32,
    /// Font descent.
    pub font_bounding_box_descent: f32,
    pub em_height_ascent: f32,
    pub em_height_descent: f32,
    pub alphabetic_baseline: f32,
    pub hanging_baseline: f32,
    pub ideographic_baseline: f32,
}

impl TextMetrics {
    /// Combine shaped ink bounds with face metrics.
    pub(crate) fn new(shaped: &ShapedText, font: &FontMetrics, size_px: f32) -> Self {
        let (left, right, ascent, descent) = match shaped.ink_bounds() {
            Some(bounds) => (-bounds.left(), bounds.right(), -bounds.top(), bounds.bottom()),
            None => (0.0, 0.0, 0.0, 0.0),
        };
        // ascent is negative and descent positive, so the span is negative
        let span = font.ascent - font.descent;
        let (em_ascent, em_descent) = if span != 0.0 {
            (size_px * (font.ascent / span), size_px * (font.descent / span))
        } else {
            (size_px, 0.0)
        };
        Self {
            width: shaped.width,
            actual_bounding_box_left: left,
            actual_bounding_box_right: right,
            actual_bounding_box_ascent: ascent,
            actual_bounding_box_descent: descent,
            font_bounding_box_ascent: -font.ascent,
            font_bounding_box_descent: font.descent,
            em_height_ascent: em_ascent,
            em_height_descent: em_descent,
            alphabetic_baseline: 0.0,
            hanging_baseline: -font.ascent * 0.8,
            ideographic_baseline: font.descent * 0.8,
        }
    }
}

/// Vertical offset added to the y coordinate of a text draw.
pub fn baseline_offset(baseline: TextBaseline, metrics: &FontMetrics) -> f32 {
    match baseline {
        TextBaseline::Top => metrics.top,
        TextBaseline::Middle => metrics.top + metrics.cap_height / 2.0,
        TextBaseline::Alphabetic => metrics.bottom * 2.0,
        TextBaseline::Hanging => metrics.bottom,
        TextBaseline::Other => 0.0,
    }
}

/// A shaped single-line run. The outline holds every glyph relative to the
/// run origin on the baseline, in y-down coordinates.
#[derive(Debug, Default)]
pub(crate) struct ShapedText {
    pub width: f32,
    pub outline: Option<tiny_skia::Path>,
}

impl ShapedText {
    pub(crate) fn ink_bounds(&self) -> Option<Rect> {
        self.outline.as_ref().map(|path| path.bounds())
    }
}

/// Parameters of a shaping request.
pub(crate) struct TextStyle<'a> {
    pub font: &'a FontDescriptor,
    pub stretch: FontStretch,
    pub letter_spacing: f32,
    pub hinting: bool,
}

/// Shape `text` and collect its glyph outlines.
pub(crate) fn shape_text(
    font_system: &mut FontSystem,
    swash_cache: &mut SwashCache,
    text: &str,
    style: &TextStyle<'_>,
) -> ShapedText {
    if text.is_empty() {
        return ShapedText::default();
    }

    let font = style.font;
    let metrics = Metrics::new(font.size_px, font.size_px * 1.2);
    let mut buffer = Buffer::new(font_system, metrics);

    let family = font.shaping_family(font_system.db());
    let flags = if style.hinting {
        CacheKeyFlags::empty()
    } else {
        CacheKeyFlags::DISABLE_HINTING
    };
    let attrs = Attrs::new()
        .family(family)
        .weight(font.weight)
        .style(font.style)
        .stretch(style.stretch.into())
        .letter_spacing(style.letter_spacing)
        .cache_key_flags(flags);

    buffer.set_text(font_system, text, &attrs, Shaping::Advanced, None);
    buffer.shape_until_scroll(font_system, false);

    let mut width: f32 = 0.0;
    let mut builder = PathBuilder::new();
    for run in buffer.layout_runs() {
        width = width.max(run.line_w);
        for glyph in run.glyphs.iter() {
            let physical = glyph.physical((0.0, 0.0), 1.0);
            let Some(commands) = swash_cache.get_outline_commands(font_system, physical.cache_key)
            else {
                continue;
            };

            // Font outlines are y-up
            let gx = glyph.x + glyph.font_size * glyph.x_offset;
            let gy = glyph.y - glyph.font_size * glyph.y_offset;
            for cmd in commands {
                match cmd {
                    Command::MoveTo(p) => builder.move_to(gx + p.x, gy - p.y),
                    Command::LineTo(p) => builder.line_to(gx + p.x, gy - p.y),
                    Command::QuadTo(c, p) => builder.quad_to(gx + c.x, gy - c.y, gx + p.x, gy - p.y),
                    Command::CurveTo(c1, c2, p) => builder.cubic_to(
                        gx + c1.x,
                        gy - c1.y,
                        gx + c2.x,
                        gy - c2.y,
                        gx + p.x,
                        gy - p.y,
                    ),
                    Command::Close => builder.close(),
                }
            }
        }
    }

    ShapedText {
        width,
        outline: builder.finish(),
    }
}

/// Parse a CSS pixel length such as `"2px"` or `"1.5"`. Other units and
/// malformed input yield zero.
pub(crate) fn parse_px(value: &str) -> f32 {
    let value = value.trim();
    let number = value.strip_suffix("px").unwrap_or(value);
    number.trim().parse::<f32>().ok().filter(|v| v.is_finite()).unwrap_or(0.0)
}
