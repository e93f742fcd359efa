//! Drawing state that can be saved and restored.

use crate::error::{Canvas2dError, Canvas2dResult};
use crate::matrix::Matrix2x3;
use crate::style::{FillType, StyleValue};

/// A clip region recorded in device space. A missing path came from an
/// empty path and covers nothing.
#[derive(Debug, Clone, PartialEq)]
pub struct ClipRegion {
    pub path: Option<tiny_skia::Path>,
    pub fill_type: FillType,
}

/// Value of a named context property as exchanged with scripts.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    String(String),
    Number(f32),
    Bool(bool),
    Style(StyleValue),
}

impl From<&str> for PropertyValue {
    fn from(s: &str) -> Self {
        PropertyValue::String(s.to_string())
    }
}

impl From<f32> for PropertyValue {
    fn from(n: f32) -> Self {
        PropertyValue::Number(n)
    }
}

impl From<bool> for PropertyValue {
    fn from(b: bool) -> Self {
        PropertyValue::Bool(b)
    }
}

impl From<StyleValue> for PropertyValue {
    fn from(style: StyleValue) -> Self {
        PropertyValue::Style(style)
    }
}

/// Every property name accepted by [`DrawingState::get`] and [`DrawingState::set`].
pub const PROPERTY_NAMES: &[&str] = &[
    "fillStyle",
    "strokeStyle",
    "globalAlpha",
    "globalCompositeOperation",
    "lineWidth",
    "lineCap",
    "lineJoin",
    "miterLimit",
    "lineDashOffset",
    "font",
    "textAlign",
    "textBaseline",
    "direction",
    "letterSpacing",
    "wordSpacing",
    "fontKerning",
    "fontStretch",
    "fontVariantCaps",
    "textRendering",
    "imageSmoothingEnabled",
    "imageSmoothingQuality",
    "shadowColor",
    "shadowBlur",
    "shadowOffsetX",
    "shadowOffsetY",
    "filter",
];

/// Drawing state that can be saved and restored.
///
/// Enumerated properties keep the string last assigned; draws map them to
/// backend values with fixed fallbacks.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawingState {
    pub fill_style: StyleValue,
    pub stroke_style: StyleValue,
    pub global_alpha: f32,
    pub global_composite_operation: String,
    pub line_width: f32,
    pub line_cap: String,
    pub line_join: String,
    pub miter_limit: f32,
    pub line_dash_offset: f32,
    pub font: String,
    pub text_align: String,
    pub text_baseline: String,
    pub direction: String,
    pub letter_spacing: String,
    pub word_spacing: String,
    pub font_kerning: String,
    pub font_stretch: String,
    pub font_variant_caps: String,
    pub text_rendering: String,
    pub image_smoothing_enabled: bool,
    pub image_smoothing_quality: String,
    pub shadow_color: String,
    pub shadow_blur: f32,
    pub shadow_offset_x: f32,
    pub shadow_offset_y: f32,
    pub filter: String,
    pub transform: Matrix2x3,
    /// Active clips, intersected.
    pub clips: Vec<ClipRegion>,
}

impl Default for DrawingState {
    fn default() -> Self {
        Self {
            fill_style: StyleValue::default(),
            stroke_style: StyleValue::default(),
            global_alpha: 1.0,
            global_composite_operation: "source-over".to_string(),
            line_width: 1.0,
            line_cap: "butt".to_string(),
            line_join: "miter".to_string(),
            miter_limit: 10.0,
            line_dash_offset: 0.0,
            font: "12px Arial".to_string(),
            text_align: "start".to_string(),
            text_baseline: "alphabetic".to_string(),
            direction: "inherit".to_string(),
            letter_spacing: "0px".to_string(),
            word_spacing: "0px".to_string(),
            font_kerning: "auto".to_string(),
            font_stretch: "normal".to_string(),
            font_variant_caps: "normal".to_string(),
            text_rendering: "auto".to_string(),
            image_smoothing_enabled: true,
            image_smoothing_quality: "low".to_string(),
            shadow_color: "#000".to_string(),
            shadow_blur: 0.0,
            shadow_offset_x: 0.0,
            shadow_offset_y: 0.0,
            filter: "none".to_string(),
            transform: Matrix2x3::identity(),
            clips: Vec::new(),
        }
    }
}

impl DrawingState {
    /// Read a property by its script name. Unknown names read as `None`.
    pub fn get(&self, name: &str) -> Option<PropertyValue> {
        let value = match name {
            "fillStyle" => PropertyValue::Style(self.fill_style.clone()),
            "strokeStyle" => PropertyValue::Style(self.stroke_style.clone()),
            "globalAlpha" => self.global_alpha.into(),
            "lineWidth" => self.line_width.into(),
            "miterLimit" => self.miter_limit.into(),
            "lineDashOffset" => self.line_dash_offset.into(),
            "shadowBlur" => self.shadow_blur.into(),
            "shadowOffsetX" => self.shadow_offset_x.into(),
            "shadowOffsetY" => self.shadow_offset_y.into(),
            "imageSmoothingEnabled" => self.image_smoothing_enabled.into(),
            _ => PropertyValue::String(self.string_slot(name)?.clone()),
        };
        Some(value)
    }

    /// Assign a property by its script name.
    ///
    /// A value of the wrong kind is an error. Unknown names are ignored, as
    /// are non-finite numbers.
    pub fn set(&mut self, name: &str, value: PropertyValue) -> Canvas2dResult<()> {
        match name {
            "fillStyle" => self.fill_style = style_value(name, value)?,
            "strokeStyle" => self.stroke_style = style_value(name, value)?,
            "imageSmoothingEnabled" => self.image_smoothing_enabled = bool_value(name, value)?,
            _ => {
                if let Some(slot) = self.number_slot(name) {
                    let n = number_value(name, value)?;
                    if n.is_finite() {
                        *slot = n;
                    }
                } else if let Some(slot) = self.string_slot_mut(name) {
                    *slot = string_value(name, value)?;
                } else {
                    log::debug!(target: "canvas", "ignoring unknown property {}", name);
                }
            }
        }
        Ok(())
    }

    fn number_slot(&mut self, name: &str) -> Option<&mut f32> {
        Some(match name {
            "globalAlpha" => &mut self.global_alpha,
            "lineWidth" => &mut self.line_width,
            "miterLimit" => &mut self.miter_limit,
            "lineDashOffset" => &mut self.line_dash_offset,
            "shadowBlur" => &mut self.shadow_blur,
            "shadowOffsetX" => &mut self.shadow_offset_x,
            "shadowOffsetY" => &mut self.shadow_offset_y,
            _ => return None,
        })
    }

    fn string_slot(&self, name: &str) -> Option<&String> {
        Some(match name {
            "globalCompositeOperation" => &self.global_composite_operation,
            "lineCap" => &self.line_cap,
            "lineJoin" => &self.line_join,
            "font" => &self.font,
            "textAlign" => &self.text_align,
            "textBaseline" => &self.text_baseline,
            "direction" => &self.direction,
            "letterSpacing" => &self.letter_spacing,
            "wordSpacing" => &self.word_spacing,
            "fontKerning" => &self.font_kerning,
            "fontStretch" => &self.font_stretch,
            "fontVariantCaps" => &self.font_variant_caps,
            "textRendering" => &self.text_rendering,
            "imageSmoothingQuality" => &self.image_smoothing_quality,
            "shadowColor" => &self.shadow_color,
            "filter" => &self.filter,
            _ => return None,
        })
    }

    fn string_slot_mut(&mut self, name: &str) -> Option<&mut String> {
        Some(match name {
            "globalCompositeOperation" => &mut self.global_composite_operation,
            "lineCap" => &mut self.line_cap,
            "lineJoin" => &mut self.line_join,
            "font" => &mut self.font,
            "textAlign" => &mut self.text_align,
            "textBaseline" => &mut self.text_baseline,
            "direction" => &mut self.direction,
            "letterSpacing" => &mut self.letter_spacing,
            "wordSpacing" => &mut self.word_spacing,
            "fontKerning" => &mut self.font_kerning,
            "fontStretch" => &mut self.font_stretch,
            "fontVariantCaps" => &mut self.font_variant_caps,
            "textRendering" => &mut self.text_rendering,
            "imageSmoothingQuality" => &mut self.image_smoothing_quality,
            "shadowColor" => &mut self.shadow_color,
            "filter" => &mut self.filter,
            _ => return None,
        })
    }
}

fn mismatch(name: &str, expected: &'static str) -> Canvas2dError {
    Canvas2dError::TypeMismatch {
        property: name.to_string(),
        expected,
    }
}

fn style_value(name: &str, value: PropertyValue) -> Canvas2dResult<StyleValue> {
    match value {
        PropertyValue::Style(style) => Ok(style),
        PropertyValue::String(s) => Ok(StyleValue::Color(s)),
        _ => Err(mismatch(name, "a color string, gradient or pattern")),
    }
}

fn number_value(name: &str, value: PropertyValue) -> Canvas2dResult<f32> {
    match value {
        PropertyValue::Number(n) => Ok(n),
        _ => Err(mismatch(name, "a number")),
    }
}

fn bool_value(name: &str, value: PropertyValue) -> Canvas2dResult<bool> {
    match value {
        PropertyValue::Bool(b) => Ok(b),
        _ => Err(mismatch(name, "a boolean")),
    }
}

fn string_value(name: &str, value: PropertyValue) -> Canvas2dResult<String> {
    match value {
        PropertyValue::String(s) => Ok(s),
        PropertyValue::Style(StyleValue::Color(s)) => Ok(s),
        _ => Err(mismatch(name, "a string")),
    }
}
