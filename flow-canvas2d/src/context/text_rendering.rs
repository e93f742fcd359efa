//! Text measurement and rendering for DrawingContext.

use super::DrawingContext;
use crate::error::Canvas2dResult;
use crate::font::{resolve_metrics, FontDescriptor};
use crate::matrix::Matrix2x3;
use crate::style::{FillType, FontStretch, TextAlign, TextBaseline};
use crate::text::{baseline_offset, parse_px, shape_text, ShapedText, TextMetrics, TextStyle};

impl DrawingContext {
    /// Measure `text` with the current font.
    pub fn measure_text(&mut self, text: &str) -> Canvas2dResult<TextMetrics> {
        let font = FontDescriptor::parse(&self.state.font)?;
        let stretch = FontStretch::from_name(&self.state.font_stretch);
        let shaped = self.shape(text, &font, stretch);
        let metrics = resolve_metrics(self.font_system.db(), &font, stretch);
        Ok(TextMetrics::new(&shaped, &metrics, font.size_px))
    }

    /// Fill `text` anchored at (x, y). When `max_width` is given and the run
    /// is wider, it is compressed horizontally to fit.
    pub fn fill_text(
        &mut self,
        text: &str,
        x: f32,
        y: f32,
        max_width: Option<f32>,
    ) -> Canvas2dResult<()> {
        log::debug!(target: "canvas", "fillText \"{}\" {} {}", text, x, y);
        self.render_text(text, x, y, max_width, true)
    }

    pub fn stroke_text(
        &mut self,
        text: &str,
        x: f32,
        y: f32,
        max_width: Option<f32>,
    ) -> Canvas2dResult<()> {
        log::debug!(target: "canvas", "strokeText \"{}\" {} {}", text, x, y);
        self.render_text(text, x, y, max_width, false)
    }

    fn shape(&mut self, text: &str, font: &FontDescriptor, stretch: FontStretch) -> ShapedText {
        let style = TextStyle {
            font,
            stretch,
            letter_spacing: parse_px(&self.state.letter_spacing),
            hinting: self.hinting_enabled,
        };
        shape_text(&mut self.font_system, &mut self.swash_cache, text, &style)
    }

    fn render_text(
        &mut self,
        text: &str,
        x: f32,
        y: f32,
        max_width: Option<f32>,
        fill: bool,
    ) -> Canvas2dResult<()> {
        // NaN and non-positive widths draw nothing
        if max_width.is_some_and(|mw| !(mw > 0.0)) {
            return Ok(());
        }

        let font = FontDescriptor::parse(&self.state.font)?;
        let stretch = FontStretch::from_name(&self.state.font_stretch);
        let shaped = self.shape(text, &font, stretch);
        let Some(outline) = shaped.outline else {
            return Ok(());
        };

        let scale_x = match max_width {
            Some(mw) if mw.is_finite() && shaped.width > mw => mw / shaped.width,
            _ => 1.0,
        };
        if scale_x < 0.001 {
            return Ok(());
        }

        let metrics = resolve_metrics(self.font_system.db(), &font, stretch);
        let align = TextAlign::resolve(&self.state.text_align, &self.state.direction);
        let baseline = TextBaseline::from_name(&self.state.text_baseline);
        let x_offset = align.x_offset(shaped.width) * scale_x;
        let y_offset = baseline_offset(baseline, &metrics);

        let placement = Matrix2x3::new(scale_x, 0.0, 0.0, 1.0, x + x_offset, y + y_offset);
        let Some(path) = outline.transform(placement.into()) else {
            return Ok(());
        };
        if fill {
            self.fill_skia_path(Some(path), FillType::Winding)
        } else {
            self.stroke_skia_path(Some(path))
        }
    }
}
