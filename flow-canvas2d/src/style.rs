//! Style values and the string-to-backend mappings used when resolving paint.
//!
//! Enumerated properties are stored as the strings scripts assign and are
//! mapped here at draw time. Unrecognized names never fail; each mapping has a
//! fixed fallback.

use crate::error::{Canvas2dError, Canvas2dResult};
use crate::gradient::CanvasGradient;
use crate::pattern::CanvasPattern;
use std::cell::RefCell;
use std::rc::Rc;

/// Shared, mutable gradient descriptor. Stops added after the gradient is
/// assigned as a style are visible to the next draw.
pub type GradientHandle = Rc<RefCell<CanvasGradient>>;

/// Shared, mutable pattern descriptor.
pub type PatternHandle = Rc<RefCell<CanvasPattern>>;

/// Value of fillStyle, strokeStyle and shadow-free paint sources.
#[derive(Debug, Clone)]
pub enum StyleValue {
    /// CSS color string, parsed when a draw resolves it.
    Color(String),
    Gradient(GradientHandle),
    Pattern(PatternHandle),
}

impl StyleValue {
    pub fn color(s: impl Into<String>) -> Self {
        StyleValue::Color(s.into())
    }
}

impl Default for StyleValue {
    fn default() -> Self {
        StyleValue::Color("#000".to_string())
    }
}

impl PartialEq for StyleValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (StyleValue::Color(a), StyleValue::Color(b)) => a == b,
            (StyleValue::Gradient(a), StyleValue::Gradient(b)) => Rc::ptr_eq(a, b),
            (StyleValue::Pattern(a), StyleValue::Pattern(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

/// Parse a CSS color string into a backend color.
pub fn parse_color(s: &str) -> Canvas2dResult<tiny_skia::Color> {
    let parsed = csscolorparser::parse(s)
        .map_err(|e| Canvas2dError::ColorParseError(format!("{}: {}", s, e)))?;

    let [r, g, b, a] = parsed.to_array();
    tiny_skia::Color::from_rgba(r, g, b, a)
        .ok_or_else(|| Canvas2dError::ColorParseError(s.to_string()))
}

/// Map a globalCompositeOperation name to a backend blend mode.
pub fn blend_mode_from_name(name: &str) -> tiny_skia::BlendMode {
    use tiny_skia::BlendMode;
    match name {
        "source-over" => BlendMode::SourceOver,
        "source-in" => BlendMode::SourceIn,
        "source-out" => BlendMode::SourceOut,
        "source-atop" => BlendMode::SourceAtop,
        "destination-over" => BlendMode::DestinationOver,
        "destination-in" => BlendMode::DestinationIn,
        "destination-out" => BlendMode::DestinationOut,
        "destination-atop" => BlendMode::DestinationAtop,
        "lighter" => BlendMode::Lighten,
        "copy" => BlendMode::Source,
        "xor" => BlendMode::Xor,
        "multiply" => BlendMode::Multiply,
        "screen" => BlendMode::Screen,
        "overlay" => BlendMode::Overlay,
        "darken" => BlendMode::Darken,
        "lighten" => BlendMode::Lighten,
        "color-dodge" => BlendMode::ColorDodge,
        "color-burn" => BlendMode::ColorBurn,
        "hard-light" => BlendMode::HardLight,
        "soft-light" => BlendMode::SoftLight,
        "difference" => BlendMode::Difference,
        "exclusion" => BlendMode::Exclusion,
        "hue" => BlendMode::Hue,
        "saturation" => BlendMode::Saturation,
        "color" => BlendMode::Color,
        "luminosity" => BlendMode::Luminosity,
        _ => BlendMode::SourceOver,
    }
}

/// Line cap style for stroke operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineCap {
    Butt,
    Round,
    Square,
}

impl LineCap {
    pub fn from_name(name: &str) -> Self {
        match name {
            "butt" => LineCap::Butt,
            "round" => LineCap::Round,
            _ => LineCap::Square,
        }
    }
}

impl From<LineCap> for tiny_skia::LineCap {
    fn from(cap: LineCap) -> Self {
        match cap {
            LineCap::Butt => tiny_skia::LineCap::Butt,
            LineCap::Round => tiny_skia::LineCap::Round,
            LineCap::Square => tiny_skia::LineCap::Square,
        }
    }
}

/// Line join style for stroke operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineJoin {
    Miter,
    Round,
    Bevel,
}

impl LineJoin {
    pub fn from_name(name: &str) -> Self {
        match name {
            "bevel" => LineJoin::Bevel,
            "miter" => LineJoin::Miter,
            _ => LineJoin::Round,
        }
    }
}

impl From<LineJoin> for tiny_skia::LineJoin {
    fn from(join: LineJoin) -> Self {
        match join {
            LineJoin::Miter => tiny_skia::LineJoin::Miter,
            LineJoin::Round => tiny_skia::LineJoin::Round,
            LineJoin::Bevel => tiny_skia::LineJoin::Bevel,
        }
    }
}

/// Image smoothing quality levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSmoothingQuality {
    Low,
    Medium,
    High,
}

impl ImageSmoothingQuality {
    pub fn from_name(name: &str) -> Self {
        match name {
            "low" => ImageSmoothingQuality::Low,
            "medium" => ImageSmoothingQuality::Medium,
            _ => ImageSmoothingQuality::High,
        }
    }
}

impl From<ImageSmoothingQuality> for tiny_skia::FilterQuality {
    fn from(quality: ImageSmoothingQuality) -> Self {
        match quality {
            ImageSmoothingQuality::Low => tiny_skia::FilterQuality::Bilinear,
            ImageSmoothingQuality::Medium => tiny_skia::FilterQuality::Bilinear,
            ImageSmoothingQuality::High => tiny_skia::FilterQuality::Bicubic,
        }
    }
}

/// Horizontal anchoring of a text run after start/end are resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

impl TextAlign {
    /// Resolve a textAlign name against the direction property.
    pub fn resolve(align: &str, direction: &str) -> Self {
        let left_to_right = matches!(direction, "inherit" | "ltr");
        match align {
            "start" if left_to_right => TextAlign::Left,
            "start" => TextAlign::Right,
            "end" if left_to_right => TextAlign::Right,
            "end" => TextAlign::Left,
            "left" => TextAlign::Left,
            "center" => TextAlign::Center,
            _ => TextAlign::Right,
        }
    }

    /// X offset applied to the anchor for a run of the given width.
    pub fn x_offset(self, width: f32) -> f32 {
        match self {
            TextAlign::Left => 0.0,
            TextAlign::Center => -width / 2.0,
            TextAlign::Right => -width,
        }
    }
}

/// Text baseline for text rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextBaseline {
    Top,
    Middle,
    Alphabetic,
    Hanging,
    /// Any other name; no vertical adjustment.
    Other,
}

impl TextBaseline {
    pub fn from_name(name: &str) -> Self {
        match name {
            "top" => TextBaseline::Top,
            "middle" => TextBaseline::Middle,
            "alphabetic" => TextBaseline::Alphabetic,
            "hanging" => TextBaseline::Hanging,
            _ => TextBaseline::Other,
        }
    }
}

/// Font width used when resolving a face.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontStretch {
    UltraCondensed,
    ExtraCondensed,
    Condensed,
    SemiCondensed,
    Normal,
    SemiExpanded,
    Expanded,
    ExtraExpanded,
    UltraExpanded,
}

impl FontStretch {
    pub fn from_name(name: &str) -> Self {
        match name {
            "ultra-condensed" => FontStretch::UltraCondensed,
            "extra-condensed" => FontStretch::ExtraCondensed,
            "condensed" => FontStretch::Condensed,
            "semi-condensed" => FontStretch::SemiCondensed,
            "semi-expanded" => FontStretch::SemiExpanded,
            "expanded" => FontStretch::Expanded,
            "extra-expanded" => FontStretch::ExtraExpanded,
            "ultra-expanded" => FontStretch::UltraExpanded,
            _ => FontStretch::Normal,
        }
    }
}

impl From<FontStretch> for cosmic_text::Stretch {
    fn from(stretch: FontStretch) -> Self {
        match stretch {
            FontStretch::UltraCondensed => cosmic_text::Stretch::UltraCondensed,
            FontStretch::ExtraCondensed => cosmic_text::Stretch::ExtraCondensed,
            FontStretch::Condensed => cosmic_text::Stretch::Condensed,
            FontStretch::SemiCondensed => cosmic_text::Stretch::SemiCondensed,
            FontStretch::Normal => cosmic_text::Stretch::Normal,
            FontStretch::SemiExpanded => cosmic_text::Stretch::SemiExpanded,
            FontStretch::Expanded => cosmic_text::Stretch::Expanded,
            FontStretch::ExtraExpanded => cosmic_text::Stretch::ExtraExpanded,
            FontStretch::UltraExpanded => cosmic_text::Stretch::UltraExpanded,
        }
    }
}

/// Backend fill type, including the inverse variants that select the area
/// outside a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FillType {
    #[default]
    Winding,
    EvenOdd,
    InverseWinding,
    InverseEvenOdd,
}

impl FillType {
    /// Map an explicitly supplied fill-rule argument.
    ///
    /// `"evenodd"` selects winding and every other value selects inverse
    /// winding. Calls that omit the rule use [`FillType::Winding`].
    pub fn from_rule_name(name: &str) -> Self {
        match name {
            "evenodd" => FillType::Winding,
            _ => FillType::InverseWinding,
        }
    }

    pub fn is_inverse(self) -> bool {
        matches!(self, FillType::InverseWinding | FillType::InverseEvenOdd)
    }

    /// Rule used to rasterize the path before any inversion.
    pub fn base_rule(self) -> tiny_skia::FillRule {
        match self {
            FillType::Winding | FillType::InverseWinding => tiny_skia::FillRule::Winding,
            FillType::EvenOdd | FillType::InverseEvenOdd => tiny_skia::FillRule::EvenOdd,
        }
    }

    /// Whether a point with the given winding number is inside.
    pub fn contains_winding(self, winding: i32) -> bool {
        let inside = match self.base_rule() {
            tiny_skia::FillRule::Winding => winding != 0,
            tiny_skia::FillRule::EvenOdd => winding % 2 != 0,
        };
        inside != self.is_inverse()
    }
}
