//! Current-path construction for DrawingContext.

use super::DrawingContext;
use crate::error::Canvas2dResult;
use crate::geometry::{
    ArcParams, ArcToParams, CubicBezierParams, QuadraticBezierParams, RectParams, RoundRectRadii,
};
use crate::path::Path;

impl DrawingContext {
    /// Start a new, empty current path.
    pub fn begin_path(&mut self) {
        log::debug!(target: "canvas", "beginPath");
        self.path.clear();
    }

    pub fn close_path(&mut self) {
        self.path.close_path();
    }

    pub fn move_to(&mut self, x: f32, y: f32) {
        self.path.move_to(x, y);
    }

    pub fn line_to(&mut self, x: f32, y: f32) {
        self.path.line_to(x, y);
    }

    pub fn bezier_curve_to(&mut self, params: &CubicBezierParams) {
        self.path.bezier_curve_to(params);
    }

    pub fn quadratic_curve_to(&mut self, params: &QuadraticBezierParams) {
        self.path.quadratic_curve_to(params);
    }

    pub fn arc(&mut self, params: &ArcParams) {
        self.path.arc(params);
    }

    pub fn arc_to(&mut self, params: &ArcToParams) {
        self.path.arc_to(params);
    }

    pub fn rect(&mut self, params: &RectParams) {
        self.path.rect(params);
    }

    pub fn round_rect(&mut self, rect: &RectParams, radii: &RoundRectRadii) -> Canvas2dResult<()> {
        self.path.round_rect(rect, radii)
    }

    /// Append the segments of a path object to the current path.
    pub fn add_path(&mut self, path: &Path) {
        self.path.add_path(path);
    }

    /// The current path.
    pub fn current_path(&self) -> &Path {
        &self.path
    }
}
