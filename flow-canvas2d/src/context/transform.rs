//! Transform operations for DrawingContext.

use super::DrawingContext;
use crate::matrix::Matrix2x3;

impl DrawingContext {
    pub fn translate(&mut self, x: f32, y: f32) {
        self.transform(&Matrix2x3::new(1.0, 0.0, 0.0, 1.0, x, y));
    }

    pub fn scale(&mut self, x: f32, y: f32) {
        self.transform(&Matrix2x3::new(x, 0.0, 0.0, y, 0.0, 0.0));
    }

    /// Rotate by `angle` radians, clockwise on a y-down surface.
    pub fn rotate(&mut self, angle: f32) {
        let (sin, cos) = angle.sin_cos();
        self.transform(&Matrix2x3::new(cos, sin, -sin, cos, 0.0, 0.0));
    }

    /// Multiply the current transform by `matrix`; the new matrix applies
    /// first, inside the existing coordinate frame.
    pub fn transform(&mut self, matrix: &Matrix2x3) {
        self.state.transform = self.state.transform.multiply(matrix);
    }

    pub fn set_transform(&mut self, matrix: &Matrix2x3) {
        self.state.transform = *matrix;
    }

    pub fn reset_transform(&mut self) {
        self.state.transform = Matrix2x3::identity();
    }

    pub fn get_transform(&self) -> Matrix2x3 {
        self.state.transform
    }
}
