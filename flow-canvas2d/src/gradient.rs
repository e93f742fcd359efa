//! Gradient descriptors and their materialization into backend shaders.

use crate::error::Canvas2dResult;
use crate::geometry::RadialGradientParams;
use crate::matrix::Matrix2x3;
use crate::style::parse_color;
use std::f32::consts::TAU;
use tiny_skia::{Color, ColorU8, Pixmap, Point, Shader, SpreadMode, Transform};

/// A color stop in a gradient.
#[derive(Debug, Clone, PartialEq)]
pub struct GradientStop {
    /// Offset as supplied; not clamped or sorted.
    pub offset: f32,
    pub color: Color,
}

/// Gradient geometry.
#[derive(Debug, Clone, PartialEq)]
pub enum GradientKind {
    /// Linear gradient from (x0, y0) to (x1, y1).
    Linear { x0: f32, y0: f32, x1: f32, y1: f32 },
    /// Radial gradient between two circles.
    Radial(RadialGradientParams),
    /// Sweep around (x, y) covering one full turn from `start_angle`.
    Conic { start_angle: f32, x: f32, y: f32 },
}

/// Gradient descriptor: geometry plus stops in insertion order.
#[derive(Debug, Clone, PartialEq)]
pub struct CanvasGradient {
    pub kind: GradientKind,
    pub stops: Vec<GradientStop>,
}

/// A gradient ready to be attached to a paint.
pub(crate) enum GradientShader {
    /// Shader in user space.
    Native(Shader<'static>),
    /// Colors rasterized in device space for the whole surface.
    Raster(Pixmap),
}

impl CanvasGradient {
    pub fn new_linear(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self {
            kind: GradientKind::Linear { x0, y0, x1, y1 },
            stops: Vec::new(),
        }
    }

    pub fn new_radial(params: &RadialGradientParams) -> Self {
        Self {
            kind: GradientKind::Radial(*params),
            stops: Vec::new(),
        }
    }

    pub fn new_conic(start_angle: f32, x: f32, y: f32) -> Self {
        Self {
            kind: GradientKind::Conic { start_angle, x, y },
            stops: Vec::new(),
        }
    }

    /// Append a color stop. The color string must parse.
    pub fn add_color_stop(&mut self, offset: f32, color: &str) -> Canvas2dResult<()> {
        let color = parse_color(color)?;
        self.stops.push(GradientStop { offset, color });
        Ok(())
    }

    /// Stops as the backend sees them: offsets clamped into [0, 1] and
    /// forced non-decreasing in insertion order, alpha scaled.
    fn effective_stops(&self, global_alpha: f32) -> Vec<(f32, Color)> {
        let mut prev = 0.0f32;
        self.stops
            .iter()
            .map(|stop| {
                let offset = if stop.offset.is_finite() {
                    stop.offset.clamp(prev, 1.0)
                } else {
                    prev
                };
                prev = offset;
                let mut color = stop.color;
                if global_alpha < 1.0 {
                    color.set_alpha((color.alpha() * global_alpha).clamp(0.0, 1.0));
                }
                (offset, color)
            })
            .collect()
    }

    /// Build a shader for the current stop list. Returns `None` when nothing
    /// should be painted (no stops or degenerate geometry).
    pub(crate) fn materialize(
        &self,
        global_alpha: f32,
        transform: &Matrix2x3,
        width: u32,
        height: u32,
    ) -> Option<GradientShader> {
        if self.stops.is_empty() {
            log::warn!(target: "canvas", "gradient has no color stops");
            return None;
        }
        let stops = self.effective_stops(global_alpha);

        match &self.kind {
            GradientKind::Linear { x0, y0, x1, y1 } => tiny_skia::LinearGradient::new(
                Point::from_xy(*x0, *y0),
                Point::from_xy(*x1, *y1),
                to_backend_stops(&stops),
                SpreadMode::Pad,
                Transform::identity(),
            )
            .map(GradientShader::Native),
            GradientKind::Radial(params) => {
                // The backend's start circle is a point; fold r0 into the
                // stop offsets measured along the end radius.
                let stops = if params.r1 > 0.0 && params.r0 > 0.0 {
                    let inner = (params.r0 / params.r1).clamp(0.0, 1.0);
                    stops
                        .iter()
                        .map(|(t, c)| (inner + t * (1.0 - inner), *c))
                        .collect()
                } else {
                    stops
                };
                tiny_skia::RadialGradient::new(
                    Point::from_xy(params.x0, params.y0),
                    Point::from_xy(params.x1, params.y1),
                    params.r1,
                    to_backend_stops(&stops),
                    SpreadMode::Pad,
                    Transform::identity(),
                )
                .map(GradientShader::Native)
            }
            GradientKind::Conic { start_angle, x, y } => {
                rasterize_conic(&stops, *start_angle, *x, *y, transform, width, height)
                    .map(GradientShader::Raster)
            }
        }
    }
}

fn to_backend_stops(stops: &[(f32, Color)]) -> Vec<tiny_skia::GradientStop> {
    stops
        .iter()
        .map(|(offset, color)| tiny_skia::GradientStop::new(*offset, *color))
        .collect()
}

/// Color at `t` along monotonic stops, padded at both ends.
fn sample_stops(stops: &[(f32, Color)], t: f32) -> Color {
    let Some(&(first_offset, first)) = stops.first() else {
        return Color::TRANSPARENT;
    };
    if t <= first_offset {
        return first;
    }
    for pair in stops.windows(2) {
        let (o0, c0) = pair[0];
        let (o1, c1) = pair[1];
        if t <= o1 {
            let span = o1 - o0;
            let f = if span > 0.0 { (t - o0) / span } else { 1.0 };
            return lerp_color(c0, c1, f);
        }
    }
    stops[stops.len() - 1].1
}

fn lerp_color(a: Color, b: Color, t: f32) -> Color {
    let mix = |x: f32, y: f32| x + (y - x) * t;
    Color::from_rgba(
        mix(a.red(), b.red()),
        mix(a.green(), b.green()),
        mix(a.blue(), b.blue()),
        mix(a.alpha(), b.alpha()),
    )
    .unwrap_or(a)
}

/// Rasterize a sweep gradient over the surface. Each device pixel center is
/// mapped back to user space and colored by its angle around the center.
fn rasterize_conic(
    stops: &[(f32, Color)],
    start_angle: f32,
    cx: f32,
    cy: f32,
    transform: &Matrix2x3,
    width: u32,
    height: u32,
) -> Option<Pixmap> {
    let Some(inverse) = transform.invert() else {
        log::warn!(target: "canvas", "conic gradient under non-invertible transform");
        return None;
    };
    let mut pixmap = Pixmap::new(width, height)?;
    let pixels = pixmap.pixels_mut();
    for py in 0..height {
        for px in 0..width {
            let (ux, uy) = inverse.map_point(px as f32 + 0.5, py as f32 + 0.5);
            let angle = (uy - cy).atan2(ux - cx);
            let t = (angle - start_angle).rem_euclid(TAU) / TAU;
            let c = sample_stops(stops, t).to_color_u8();
            pixels[(py * width + px) as usize] =
                ColorU8::from_rgba(c.red(), c.green(), c.blue(), c.alpha()).premultiply();
        }
    }
    Some(pixmap)
}
