//! 2D affine matrix used by transform(), setTransform() and getTransform().

use serde::{Deserialize, Serialize};

/// Six-coefficient affine matrix.
///
/// ```text
/// | a c e |     | scaleX skewX translateX |
/// | b d f |  =  | skewY  scaleY translateY |
/// | 0 0 1 |     | 0      0      1          |
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Matrix2x3 {
    /// Scale X component.
    pub a: f32,
    /// Skew Y component.
    pub b: f32,
    /// Skew X component.
    pub c: f32,
    /// Scale Y component.
    pub d: f32,
    /// Translate X component.
    pub e: f32,
    /// Translate Y component.
    pub f: f32,
}

impl Default for Matrix2x3 {
    fn default() -> Self {
        Self::identity()
    }
}

impl Matrix2x3 {
    /// Create a matrix from its six letters.
    pub fn new(a: f32, b: f32, c: f32, d: f32, e: f32, f: f32) -> Self {
        Self { a, b, c, d, e, f }
    }

    pub fn identity() -> Self {
        Self::new(1.0, 0.0, 0.0, 1.0, 0.0, 0.0)
    }

    /// Create a matrix from named components, in the argument order of the
    /// scripted `Matrix.create`.
    pub fn from_components(
        translate_x: f32,
        translate_y: f32,
        scale_x: f32,
        scale_y: f32,
        skew_x: f32,
        skew_y: f32,
    ) -> Self {
        Self {
            a: scale_x,
            b: skew_y,
            c: skew_x,
            d: scale_y,
            e: translate_x,
            f: translate_y,
        }
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::identity()
    }

    /// Compose `self × other`: `other` is applied first, in the coordinate
    /// frame established by `self`.
    pub fn multiply(&self, other: &Matrix2x3) -> Matrix2x3 {
        Matrix2x3 {
            a: self.a * other.a + self.c * other.b,
            b: self.b * other.a + self.d * other.b,
            c: self.a * other.c + self.c * other.d,
            d: self.b * other.c + self.d * other.d,
            e: self.a * other.e + self.c * other.f + self.e,
            f: self.b * other.e + self.d * other.f + self.f,
        }
    }

    pub fn determinant(&self) -> f32 {
        self.a * self.d - self.b * self.c
    }

    /// Inverse matrix, or `None` when the matrix is singular.
    pub fn invert(&self) -> Option<Matrix2x3> {
        let det = self.determinant();
        if det == 0.0 || !det.is_finite() {
            return None;
        }
        let inv = 1.0 / det;
        Some(Matrix2x3 {
            a: self.d * inv,
            b: -self.b * inv,
            c: -self.c * inv,
            d: self.a * inv,
            e: (self.c * self.f - self.d * self.e) * inv,
            f: (self.b * self.e - self.a * self.f) * inv,
        })
    }

    pub fn map_point(&self, x: f32, y: f32) -> (f32, f32) {
        (
            self.a * x + self.c * y + self.e,
            self.b * x + self.d * y + self.f,
        )
    }
}

impl From<tiny_skia::Transform> for Matrix2x3 {
    fn from(t: tiny_skia::Transform) -> Self {
        Matrix2x3 {
            a: t.sx,
            b: t.ky,
            c: t.kx,
            d: t.sy,
            e: t.tx,
            f: t.ty,
        }
    }
}

impl From<Matrix2x3> for tiny_skia::Transform {
    fn from(m: Matrix2x3) -> Self {
        tiny_skia::Transform::from_row(m.a, m.b, m.c, m.d, m.e, m.f)
    }
}
