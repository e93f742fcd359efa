//! Named argument records for path, rect, image and gradient calls.

use crate::error::{Canvas2dError, Canvas2dResult};
use serde::{Deserialize, Serialize};

/// Circle arc around `(x, y)`. Angles are radians measured from the +x axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcParams {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    pub start_angle: f32,
    pub end_angle: f32,
    pub counterclockwise: bool,
}

/// Corner rounding between the lines current→(x1, y1) and (x1, y1)→(x2, y2).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcToParams {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
    pub radius: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicBezierParams {
    pub cp1x: f32,
    pub cp1y: f32,
    pub cp2x: f32,
    pub cp2y: f32,
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadraticBezierParams {
    pub cpx: f32,
    pub cpy: f32,
    pub x: f32,
    pub y: f32,
}

/// Axis-aligned rectangle in user space. Width and height may be negative.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectParams {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Elliptical corner radius, the `{x, y}` form of a roundRect radius.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CornerRadius {
    pub x: f32,
    pub y: f32,
}

impl CornerRadius {
    /// Circular corner.
    pub const fn uniform(r: f32) -> Self {
        Self { x: r, y: r }
    }
}

/// The accepted shapes of the `radii` argument of roundRect.
#[derive(Debug, Clone, PartialEq)]
pub enum RoundRectRadii {
    /// One radius for every corner.
    Scalar(f32),
    /// One to four radii, expanded per corner.
    List(Vec<f32>),
    /// A single `{x, y}` corner object.
    Corner(CornerRadius),
}

impl Default for RoundRectRadii {
    fn default() -> Self {
        RoundRectRadii::Scalar(0.0)
    }
}

impl RoundRectRadii {
    /// Expand into per-corner radii ordered
    /// `[top-left, top-right, bottom-right, bottom-left]`.
    pub fn resolve(&self) -> Canvas2dResult<[CornerRadius; 4]> {
        let u = CornerRadius::uniform;
        match self {
            RoundRectRadii::Scalar(r) => Ok([u(*r); 4]),
            // The object form only carries its x radius through.
            RoundRectRadii::Corner(c) => Ok([u(c.x); 4]),
            RoundRectRadii::List(values) => match values.as_slice() {
                [a] => Ok([u(*a); 4]),
                [a, b] => Ok([u(*a), u(*b), u(*a), u(*b)]),
                [a, b, c] => Ok([u(*a), u(*b), u(*c), u(*b)]),
                [a, b, c, d] => Ok([u(*a), u(*b), u(*c), u(*d)]),
                other => Err(Canvas2dError::InvalidArgument(format!(
                    "roundRect expects 1 to 4 radii, got {}",
                    other.len()
                ))),
            },
        }
    }
}

/// A rectangle with resolved corners, clockwise from the top-left.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoundRectParams {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub radii: [CornerRadius; 4],
}

/// `drawImage` with a source crop: `s*` selects image pixels, `d*` places them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImageCropParams {
    pub sx: f32,
    pub sy: f32,
    pub sw: f32,
    pub sh: f32,
    pub dx: f32,
    pub dy: f32,
    pub dw: f32,
    pub dh: f32,
}

/// Region of an [`ImageData`](crate::ImageData) to write, in source pixel
/// coordinates. Negative sizes extend left/up from `x`/`y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirtyRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

/// Start circle `(x0, y0, r0)` and end circle `(x1, y1, r1)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadialGradientParams {
    pub x0: f32,
    pub y0: f32,
    pub r0: f32,
    pub x1: f32,
    pub y1: f32,
    pub r1: f32,
}
