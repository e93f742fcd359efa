//! The drawing context: state, current path and target surface.

mod drawing;
mod image_ops;
mod path_ops;
mod text_rendering;
mod transform;

use crate::config::{FontConfig, ResolvedFontConfig};
use crate::error::{Canvas2dError, Canvas2dResult};
use crate::font::FontDescriptor;
use crate::geometry::RadialGradientParams;
use crate::gradient::CanvasGradient;
use crate::image::CanvasImage;
use crate::paint::PaintResolver;
use crate::path::Path;
use crate::pattern::CanvasPattern;
use crate::state::{DrawingState, PropertyValue};
use crate::style::{GradientHandle, PatternHandle, StyleValue};
use cosmic_text::{FontSystem, SwashCache};
use std::cell::RefCell;
use std::rc::Rc;
use tiny_skia::Pixmap;

/// Maximum surface dimension.
pub const MAX_DIMENSION: u32 = 32767;

/// Immediate-mode 2D drawing context over a pixmap surface.
///
/// Owns the property state with its save stack, the current path and the
/// line dash. The surface can be swapped between frames without losing any
/// of them.
pub struct DrawingContext {
    pub(crate) surface: Pixmap,
    pub(crate) font_system: FontSystem,
    pub(crate) swash_cache: SwashCache,
    pub(crate) hinting_enabled: bool,
    pub(crate) state: DrawingState,
    state_stack: Vec<DrawingState>,
    pub(crate) path: Path,
    pub(crate) line_dash: Vec<f32>,
}

impl std::fmt::Debug for DrawingContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DrawingContext")
            .field("width", &self.surface.width())
            .field("height", &self.surface.height())
            .field("saved_states", &self.state_stack.len())
            .finish_non_exhaustive()
    }
}

/// Reject sizes outside `1..=MAX_DIMENSION` on either axis.
pub(crate) fn check_dimensions(width: u32, height: u32) -> Canvas2dResult<()> {
    if width == 0 || height == 0 || width > MAX_DIMENSION || height > MAX_DIMENSION {
        return Err(Canvas2dError::InvalidDimensions { width, height });
    }
    Ok(())
}

fn new_surface(width: u32, height: u32) -> Canvas2dResult<Pixmap> {
    check_dimensions(width, height)?;
    Pixmap::new(width, height).ok_or(Canvas2dError::InvalidDimensions { width, height })
}

impl DrawingContext {
    /// Create a context with its own transparent surface, using system fonts.
    pub fn new(width: u32, height: u32) -> Canvas2dResult<Self> {
        Self::with_config(width, height, &FontConfig::default())
    }

    pub fn with_config(width: u32, height: u32, config: &FontConfig) -> Canvas2dResult<Self> {
        Self::with_resolved(width, height, &config.resolve())
    }

    /// Create a context from an already loaded font database.
    pub fn with_resolved(
        width: u32,
        height: u32,
        resolved: &ResolvedFontConfig,
    ) -> Canvas2dResult<Self> {
        let surface = new_surface(width, height)?;
        let font_system =
            FontSystem::new_with_locale_and_db("en".to_string(), resolved.fontdb.clone());

        Ok(Self {
            surface,
            font_system,
            swash_cache: SwashCache::new(),
            hinting_enabled: resolved.hinting_enabled,
            state: DrawingState::default(),
            state_stack: Vec::new(),
            path: Path::new(),
            line_dash: Vec::new(),
        })
    }

    /// Replace the target surface and return the previous one.
    ///
    /// The transform and clip belong to the surface and are reset, in the
    /// live state and in every saved snapshot. Other properties, the current
    /// path and the line dash carry over.
    pub fn set_surface(&mut self, surface: Pixmap) -> Pixmap {
        log::debug!(target: "canvas", "setSurface {}x{}", surface.width(), surface.height());
        for state in std::iter::once(&mut self.state).chain(self.state_stack.iter_mut()) {
            state.transform = Default::default();
            state.clips.clear();
        }
        std::mem::replace(&mut self.surface, surface)
    }

    pub fn surface(&self) -> &Pixmap {
        &self.surface
    }

    pub fn width(&self) -> u32 {
        self.surface.width()
    }

    pub fn height(&self) -> u32 {
        self.surface.height()
    }

    /// Surface size as `(width, height)`.
    pub fn get_size(&self) -> (u32, u32) {
        (self.surface.width(), self.surface.height())
    }

    pub fn state(&self) -> &DrawingState {
        &self.state
    }

    /// Push a snapshot of the drawing state.
    pub fn save(&mut self) {
        log::debug!(target: "canvas", "save");
        self.state_stack.push(self.state.clone());
    }

    /// Pop the most recent snapshot. Does nothing when none was saved.
    pub fn restore(&mut self) {
        log::debug!(target: "canvas", "restore");
        if let Some(state) = self.state_stack.pop() {
            self.state = state;
        }
    }

    // --- Properties ---

    /// Read a property by name; `None` for unknown names.
    pub fn get_property(&self, name: &str) -> Option<PropertyValue> {
        self.state.get(name)
    }

    /// Assign a property by name. Fonts are validated when assigned.
    pub fn set_property(&mut self, name: &str, value: PropertyValue) -> Canvas2dResult<()> {
        if let ("font", PropertyValue::String(font)) = (name, &value) {
            FontDescriptor::parse(font)?;
        }
        self.state.set(name, value)
    }

    pub fn set_fill_style(&mut self, style: StyleValue) {
        self.state.fill_style = style;
    }

    pub fn set_stroke_style(&mut self, style: StyleValue) {
        self.state.stroke_style = style;
    }

    pub fn set_global_alpha(&mut self, alpha: f32) {
        if alpha.is_finite() {
            self.state.global_alpha = alpha;
        }
    }

    pub fn set_global_composite_operation(&mut self, op: &str) {
        self.state.global_composite_operation = op.to_string();
    }

    pub fn set_line_width(&mut self, width: f32) {
        if width.is_finite() {
            self.state.line_width = width;
        }
    }

    pub fn set_line_cap(&mut self, cap: &str) {
        self.state.line_cap = cap.to_string();
    }

    pub fn set_line_join(&mut self, join: &str) {
        self.state.line_join = join.to_string();
    }

    pub fn set_miter_limit(&mut self, limit: f32) {
        if limit.is_finite() {
            self.state.miter_limit = limit;
        }
    }

    pub fn set_line_dash_offset(&mut self, offset: f32) {
        if offset.is_finite() {
            self.state.line_dash_offset = offset;
        }
    }

    /// Set the font from a CSS font string such as `"bold 16px serif"`.
    pub fn set_font(&mut self, font: &str) -> Canvas2dResult<()> {
        FontDescriptor::parse(font)?;
        self.state.font = font.to_string();
        Ok(())
    }

    pub fn set_text_align(&mut self, align: &str) {
        self.state.text_align = align.to_string();
    }

    pub fn set_text_baseline(&mut self, baseline: &str) {
        self.state.text_baseline = baseline.to_string();
    }

    pub fn set_direction(&mut self, direction: &str) {
        self.state.direction = direction.to_string();
    }

    pub fn set_letter_spacing(&mut self, spacing: &str) {
        self.state.letter_spacing = spacing.to_string();
    }

    pub fn set_font_stretch(&mut self, stretch: &str) {
        self.state.font_stretch = stretch.to_string();
    }

    pub fn set_image_smoothing_enabled(&mut self, enabled: bool) {
        self.state.image_smoothing_enabled = enabled;
    }

    pub fn set_image_smoothing_quality(&mut self, quality: &str) {
        self.state.image_smoothing_quality = quality.to_string();
    }

    pub fn set_shadow_color(&mut self, color: &str) {
        self.state.shadow_color = color.to_string();
    }

    pub fn set_shadow_blur(&mut self, blur: f32) {
        if blur.is_finite() {
            self.state.shadow_blur = blur;
        }
    }

    pub fn set_shadow_offset(&mut self, x: f32, y: f32) {
        if x.is_finite() && y.is_finite() {
            self.state.shadow_offset_x = x;
            self.state.shadow_offset_y = y;
        }
    }

    // --- Line dash ---

    /// Set the dash pattern. Arrays with negative or non-finite entries are
    /// ignored; odd-length arrays are repeated to even length.
    pub fn set_line_dash(&mut self, mut segments: Vec<f32>) {
        if segments.iter().any(|&v| !v.is_finite() || v < 0.0) {
            return;
        }
        if segments.len() % 2 == 1 {
            segments.extend_from_within(..);
        }
        self.line_dash = segments;
    }

    pub fn get_line_dash(&self) -> &[f32] {
        &self.line_dash
    }

    // --- Gradients and patterns ---

    pub fn create_linear_gradient(&self, x0: f32, y0: f32, x1: f32, y1: f32) -> GradientHandle {
        Rc::new(RefCell::new(CanvasGradient::new_linear(x0, y0, x1, y1)))
    }

    pub fn create_radial_gradient(&self, params: &RadialGradientParams) -> GradientHandle {
        Rc::new(RefCell::new(CanvasGradient::new_radial(params)))
    }

    /// Sweep gradient around `(x, y)` starting at `start_angle` radians.
    pub fn create_conic_gradient(&self, start_angle: f32, x: f32, y: f32) -> GradientHandle {
        Rc::new(RefCell::new(CanvasGradient::new_conic(start_angle, x, y)))
    }

    pub fn create_pattern(&self, image: &CanvasImage, repetition: &str) -> PatternHandle {
        Rc::new(RefCell::new(CanvasPattern::new(image.clone(), repetition)))
    }

    pub(crate) fn paint_resolver(&self) -> PaintResolver<'_> {
        PaintResolver {
            state: &self.state,
            line_dash: &self.line_dash,
            width: self.surface.width(),
            height: self.surface.height(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn context() -> DrawingContext {
        DrawingContext::with_config(8, 8, &FontConfig::empty()).unwrap()
    }

    #[rstest]
    #[case(0, 10)]
    #[case(10, 0)]
    #[case(MAX_DIMENSION + 1, 10)]
    fn test_invalid_dimensions(#[case] width: u32, #[case] height: u32) {
        let result = DrawingContext::with_config(width, height, &FontConfig::empty());
        assert!(matches!(result, Err(Canvas2dError::InvalidDimensions { .. })));
    }

    #[test]
    fn test_save_restore_round_trip() {
        let mut ctx = context();
        ctx.set_line_width(3.0);
        ctx.set_fill_style(StyleValue::color("red"));
        let before = ctx.state().clone();
        ctx.save();
        ctx.restore();
        assert_eq!(ctx.state(), &before);
    }

    #[test]
    fn test_restore_brings_back_saved_values() {
        let mut ctx = context();
        ctx.save();
        ctx.set_line_width(5.0);
        ctx.set_text_baseline("top");
        ctx.restore();
        assert_eq!(ctx.state().line_width, 1.0);
        assert_eq!(ctx.state().text_baseline, "alphabetic");
    }

    #[test]
    fn test_restore_on_empty_stack_is_noop() {
        let mut ctx = context();
        ctx.set_line_width(2.0);
        ctx.restore();
        assert_eq!(ctx.state().line_width, 2.0);
    }

    #[test]
    fn test_line_dash_rules() {
        let mut ctx = context();
        ctx.set_line_dash(vec![5.0, 3.0, 1.0]);
        assert_eq!(ctx.get_line_dash(), &[5.0, 3.0, 1.0, 5.0, 3.0, 1.0]);
        ctx.set_line_dash(vec![1.0, -1.0]);
        assert_eq!(ctx.get_line_dash().len(), 6);
        ctx.set_line_dash(vec![f32::NAN]);
        assert_eq!(ctx.get_line_dash().len(), 6);
        ctx.set_line_dash(Vec::new());
        assert!(ctx.get_line_dash().is_empty());
    }

    #[test]
    fn test_line_dash_is_not_saved() {
        let mut ctx = context();
        ctx.save();
        ctx.set_line_dash(vec![2.0, 2.0]);
        ctx.restore();
        assert_eq!(ctx.get_line_dash(), &[2.0, 2.0]);
    }

    #[test]
    fn test_bad_font_is_rejected() {
        let mut ctx = context();
        assert!(ctx.set_font("Arial").is_err());
        assert!(ctx
            .set_property("font", PropertyValue::from("huge"))
            .is_err());
        assert_eq!(ctx.state().font, "12px Arial");
        ctx.set_font("bold 20px serif").unwrap();
        assert_eq!(ctx.get_property("font"), Some("bold 20px serif".into()));
    }

    #[test]
    fn test_set_surface_keeps_state_and_resets_transform() {
        let mut ctx = context();
        ctx.set_line_width(4.0);
        ctx.translate(3.0, 3.0);
        ctx.move_to(1.0, 1.0);
        let old = ctx.set_surface(Pixmap::new(16, 4).unwrap());
        assert_eq!((old.width(), old.height()), (8, 8));
        assert_eq!(ctx.get_size(), (16, 4));
        assert_eq!(ctx.state().line_width, 4.0);
        assert!(ctx.get_transform().is_identity());
        assert!(!ctx.path.is_empty());
    }

    #[test]
    fn test_set_surface_resets_saved_transform_and_clip() {
        let mut ctx = context();
        ctx.set_line_width(6.0);
        ctx.translate(2.0, 2.0);
        ctx.rect(&crate::geometry::RectParams {
            x: 0.0,
            y: 0.0,
            width: 2.0,
            height: 2.0,
        });
        ctx.clip(None, None);
        assert_eq!(ctx.state().clips.len(), 1);
        ctx.save();
        ctx.set_surface(Pixmap::new(8, 8).unwrap());
        ctx.restore();
        assert!(ctx.get_transform().is_identity());
        assert!(ctx.state().clips.is_empty());
        assert_eq!(ctx.state().line_width, 6.0);
    }

    #[test]
    fn test_gradient_mutation_is_visible_through_style() {
        let mut ctx = context();
        let gradient = ctx.create_linear_gradient(0.0, 0.0, 1.0, 0.0);
        ctx.set_fill_style(StyleValue::Gradient(gradient.clone()));
        gradient.borrow_mut().add_color_stop(0.5, "blue").unwrap();
        let StyleValue::Gradient(assigned) = &ctx.state().fill_style else {
            panic!("expected gradient");
        };
        assert_eq!(assigned.borrow().stops.len(), 1);
    }
}
