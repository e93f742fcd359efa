//! Resolution of drawing state into concrete backend paints.
//!
//! Paints are rebuilt for every draw call from the current state, so
//! gradients and patterns mutated after assignment take effect immediately.

use crate::error::Canvas2dResult;
use crate::gradient::GradientShader;
use crate::image::CanvasImage;
use crate::shadow::ShadowParams;
use crate::state::DrawingState;
use crate::style::{
    blend_mode_from_name, parse_color, ImageSmoothingQuality, LineCap, LineJoin, StyleValue,
};
use tiny_skia::{
    BlendMode, Color, FilterQuality, Paint, Pixmap, PixmapPaint, Shader, SpreadMode, Stroke,
    StrokeDash, Transform,
};

/// Where the color of a paint comes from.
pub(crate) enum PaintSource {
    Solid(Color),
    /// User-space shader.
    Shader(Shader<'static>),
    Pattern {
        image: CanvasImage,
        spread: SpreadMode,
        quality: FilterQuality,
        opacity: f32,
        transform: Transform,
    },
    /// Colors already laid out in device space. `transform` undoes the
    /// current transform the backend applies to shaders.
    Device {
        pixmap: Pixmap,
        opacity: f32,
        transform: Transform,
    },
}

/// A fill or stroke paint with its compositing parameters.
pub(crate) struct ResolvedPaint {
    pub source: PaintSource,
    pub blend_mode: BlendMode,
    pub shadow: Option<ShadowParams>,
}

impl ResolvedPaint {
    /// Backend paint using `blend_mode` instead of the resolved one.
    pub(crate) fn paint_with(&self, blend_mode: BlendMode) -> Paint<'_> {
        let mut paint = Paint {
            anti_alias: true,
            blend_mode,
            ..Default::default()
        };
        match &self.source {
            PaintSource::Solid(color) => paint.set_color(*color),
            PaintSource::Shader(shader) => paint.shader = shader.clone(),
            PaintSource::Pattern {
                image,
                spread,
                quality,
                opacity,
                transform,
            } => {
                paint.shader = tiny_skia::Pattern::new(
                    image.pixmap().as_ref(),
                    *spread,
                    *quality,
                    *opacity,
                    *transform,
                )
            }
            PaintSource::Device {
                pixmap,
                opacity,
                transform,
            } => {
                paint.shader = tiny_skia::Pattern::new(
                    pixmap.as_ref(),
                    SpreadMode::Pad,
                    FilterQuality::Nearest,
                    *opacity,
                    *transform,
                )
            }
        }
        paint
    }

    pub(crate) fn paint(&self) -> Paint<'_> {
        self.paint_with(self.blend_mode)
    }
}

/// Paint for drawing images.
pub(crate) struct ImagePaint {
    pub pixmap_paint: PixmapPaint,
    pub shadow: Option<ShadowParams>,
}

/// Builds paints from a state snapshot.
pub(crate) struct PaintResolver<'a> {
    pub state: &'a DrawingState,
    pub line_dash: &'a [f32],
    pub width: u32,
    pub height: u32,
}

impl PaintResolver<'_> {
    /// Paint for fill operations. `None` means nothing should be drawn.
    pub(crate) fn resolve_fill_paint(&self) -> Canvas2dResult<Option<ResolvedPaint>> {
        self.resolve_style(&self.state.fill_style)
    }

    /// Paint and stroke geometry for stroke operations.
    pub(crate) fn resolve_stroke_paint(&self) -> Canvas2dResult<Option<(ResolvedPaint, Stroke)>> {
        let Some(paint) = self.resolve_style(&self.state.stroke_style)? else {
            return Ok(None);
        };
        Ok(Some((paint, self.stroke())))
    }

    /// Paint for drawImage.
    pub(crate) fn resolve_image_paint(&self) -> Canvas2dResult<ImagePaint> {
        Ok(ImagePaint {
            pixmap_paint: PixmapPaint {
                opacity: self.global_alpha(),
                blend_mode: self.blend_mode(),
                quality: self.image_quality(),
            },
            shadow: ShadowParams::from_state(self.state)?,
        })
    }

    pub(crate) fn stroke(&self) -> Stroke {
        // Every interval is lengthened by the dash offset; the pattern
        // itself starts at phase zero.
        let dash = if self.line_dash.is_empty() {
            None
        } else {
            let offset = self.state.line_dash_offset;
            StrokeDash::new(self.line_dash.iter().map(|d| d + offset).collect(), 0.0)
        };
        Stroke {
            width: self.state.line_width,
            line_cap: LineCap::from_name(&self.state.line_cap).into(),
            line_join: LineJoin::from_name(&self.state.line_join).into(),
            miter_limit: self.state.miter_limit,
            dash,
        }
    }

    fn global_alpha(&self) -> f32 {
        self.state.global_alpha.clamp(0.0, 1.0)
    }

    fn blend_mode(&self) -> BlendMode {
        blend_mode_from_name(&self.state.global_composite_operation)
    }

    fn image_quality(&self) -> FilterQuality {
        if self.state.image_smoothing_enabled {
            ImageSmoothingQuality::from_name(&self.state.image_smoothing_quality).into()
        } else {
            FilterQuality::Nearest
        }
    }

    fn resolve_style(&self, style: &StyleValue) -> Canvas2dResult<Option<ResolvedPaint>> {
        let transform = self.state.transform;
        let source = match style {
            StyleValue::Color(css) => {
                let color = parse_color(css)?;
                Some(PaintSource::Solid(apply_global_alpha(color, self.global_alpha())))
            }
            StyleValue::Gradient(gradient) => gradient
                .borrow()
                .materialize(self.global_alpha(), &transform, self.width, self.height)
                .and_then(|shader| match shader {
                    GradientShader::Native(shader) => Some(PaintSource::Shader(shader)),
                    GradientShader::Raster(pixmap) => self.device_source(pixmap, 1.0),
                }),
            StyleValue::Pattern(pattern) => {
                let pattern = pattern.borrow();
                match pattern.uniform_spread() {
                    Some(spread) => Some(PaintSource::Pattern {
                        image: pattern.image().clone(),
                        spread,
                        quality: self.image_quality(),
                        opacity: self.global_alpha(),
                        transform: pattern.transform().into(),
                    }),
                    None => pattern
                        .rasterize(&transform, self.width, self.height)
                        .and_then(|pixmap| self.device_source(pixmap, self.global_alpha())),
                }
            }
        };

        let Some(source) = source else {
            return Ok(None);
        };
        Ok(Some(ResolvedPaint {
            source,
            blend_mode: self.blend_mode(),
            shadow: ShadowParams::from_state(self.state)?,
        }))
    }

    fn device_source(&self, pixmap: Pixmap, opacity: f32) -> Option<PaintSource> {
        let Some(inverse) = self.state.transform.invert() else {
            log::warn!(target: "canvas", "skipping draw under non-invertible transform");
            return None;
        };
        Some(PaintSource::Device {
            pixmap,
            opacity,
            transform: inverse.into(),
        })
    }
}

/// Scale the color's alpha by global alpha in the 8-bit domain, truncating.
pub(crate) fn apply_global_alpha(color: Color, global_alpha: f32) -> Color {
    if global_alpha >= 1.0 {
        return color;
    }
    let c = color.to_color_u8();
    let alpha = (c.alpha() as f32 * global_alpha) as u8;
    Color::from_rgba8(c.red(), c.green(), c.blue(), alpha)
}
