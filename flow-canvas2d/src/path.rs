//! Path geometry shared by the context's current path and script path objects.
//!
//! Segments are recorded in user space exactly as issued and replayed into a
//! `tiny_skia::Path` when a draw, clip or hit test needs one. The transform
//! in effect at draw time is applied by the caller.

use crate::arc::{self, ArcSweep, ArcToGeometry};
use crate::error::{Canvas2dError, Canvas2dResult};
use crate::geometry::{
    ArcParams, ArcToParams, CornerRadius, CubicBezierParams, QuadraticBezierParams, RectParams,
    RoundRectParams, RoundRectRadii,
};
use crate::style::FillType;
use tiny_skia::{PathBuilder, PathSegment, Point};

/// Number of line pieces used per curve when hit testing.
const CURVE_STEPS: usize = 16;

/// One recorded path operation.
#[derive(Debug, Clone, PartialEq)]
pub enum PathCommand {
    MoveTo { x: f32, y: f32 },
    LineTo { x: f32, y: f32 },
    QuadTo(QuadraticBezierParams),
    CubicTo(CubicBezierParams),
    Arc { x: f32, y: f32, radius: f32, sweep: ArcSweep },
    ArcTo(ArcToParams),
    Rect(RectParams),
    RoundRect(RoundRectParams),
    Close,
}

/// An ordered sequence of path segments.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Path {
    commands: Vec<PathCommand>,
}

impl Path {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a path from SVG path data.
    ///
    /// # Example
    ///
    /// ```rust
    /// use flow_canvas2d::Path;
    /// let path = Path::from_svg_path_data("M10,10 L50,50 A10,10 0 0 1 100,100 Z").unwrap();
    /// assert!(!path.is_empty());
    /// ```
    pub fn from_svg_path_data(path_data: &str) -> Canvas2dResult<Self> {
        let mut path = Path::new();

        for segment in svgtypes::SimplifyingPathParser::from(path_data) {
            let segment = segment.map_err(|e| {
                Canvas2dError::InvalidArgument(format!("Invalid SVG path data: {:?}", e))
            })?;

            match segment {
                svgtypes::SimplePathSegment::MoveTo { x, y } => {
                    path.move_to(x as f32, y as f32);
                }
                svgtypes::SimplePathSegment::LineTo { x, y } => {
                    path.line_to(x as f32, y as f32);
                }
                svgtypes::SimplePathSegment::Quadratic { x1, y1, x, y } => {
                    path.quadratic_curve_to(&QuadraticBezierParams {
                        cpx: x1 as f32,
                        cpy: y1 as f32,
                        x: x as f32,
                        y: y as f32,
                    });
                }
                svgtypes::SimplePathSegment::CurveTo {
                    x1,
                    y1,
                    x2,
                    y2,
                    x,
                    y,
                } => {
                    path.bezier_curve_to(&CubicBezierParams {
                        cp1x: x1 as f32,
                        cp1y: y1 as f32,
                        cp2x: x2 as f32,
                        cp2y: y2 as f32,
                        x: x as f32,
                        y: y as f32,
                    });
                }
                svgtypes::SimplePathSegment::ClosePath => {
                    path.close_path();
                }
            }
        }

        Ok(path)
    }

    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Drop every segment (beginPath).
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn move_to(&mut self, x: f32, y: f32) {
        self.commands.push(PathCommand::MoveTo { x, y });
    }

    pub fn line_to(&mut self, x: f32, y: f32) {
        self.commands.push(PathCommand::LineTo { x, y });
    }

    pub fn bezier_curve_to(&mut self, params: &CubicBezierParams) {
        self.commands.push(PathCommand::CubicTo(*params));
    }

    pub fn quadratic_curve_to(&mut self, params: &QuadraticBezierParams) {
        self.commands.push(PathCommand::QuadTo(*params));
    }

    /// Add a circular arc. Angles are normalized as described on
    /// [`arc::arc_sweep`].
    pub fn arc(&mut self, params: &ArcParams) {
        let sweep = arc::arc_sweep(params.start_angle, params.end_angle, params.counterclockwise);
        self.commands.push(PathCommand::Arc {
            x: params.x,
            y: params.y,
            radius: params.radius.abs(),
            sweep,
        });
    }

    pub fn arc_to(&mut self, params: &ArcToParams) {
        self.commands.push(PathCommand::ArcTo(*params));
    }

    pub fn rect(&mut self, params: &RectParams) {
        self.commands.push(PathCommand::Rect(*params));
    }

    /// Add a rounded rectangle; `radii` is expanded per corner.
    pub fn round_rect(&mut self, rect: &RectParams, radii: &RoundRectRadii) -> Canvas2dResult<()> {
        let radii = radii.resolve()?;
        self.commands.push(PathCommand::RoundRect(RoundRectParams {
            x: rect.x,
            y: rect.y,
            width: rect.width,
            height: rect.height,
            radii,
        }));
        Ok(())
    }

    /// Close the current subpath. Repeated calls add nothing.
    pub fn close_path(&mut self) {
        if matches!(self.commands.last(), None | Some(PathCommand::Close)) {
            return;
        }
        self.commands.push(PathCommand::Close);
    }

    /// Append every segment of `other`.
    pub fn add_path(&mut self, other: &Path) {
        self.commands.extend_from_slice(&other.commands);
    }

    /// Replay the segments into a backend path. `None` when nothing
    /// renderable was recorded.
    pub fn to_skia(&self) -> Option<tiny_skia::Path> {
        let mut replay = Replay::default();
        for command in &self.commands {
            replay.apply(command);
        }
        replay.builder.finish()
    }

    /// Hit test a point in path coordinates.
    pub fn contains(&self, x: f32, y: f32, fill_type: FillType) -> bool {
        match self.to_skia() {
            Some(path) => fill_type.contains_winding(winding_number(&path, x, y)),
            None => fill_type.is_inverse(),
        }
    }
}

/// Builder state while replaying commands.
#[derive(Default)]
struct Replay {
    builder: PathBuilder,
    current: Option<(f32, f32)>,
    subpath_start: (f32, f32),
}

impl Replay {
    fn move_to(&mut self, x: f32, y: f32) {
        self.builder.move_to(x, y);
        self.current = Some((x, y));
        self.subpath_start = (x, y);
    }

    /// Start a subpath at (x, y) when there is no current point.
    fn ensure_subpath(&mut self, x: f32, y: f32) {
        if self.current.is_none() {
            self.move_to(x, y);
        }
    }

    fn connect_to(&mut self, x: f32, y: f32) {
        if self.current.is_some() {
            self.builder.line_to(x, y);
            self.current = Some((x, y));
        } else {
            self.move_to(x, y);
        }
    }

    fn close(&mut self) {
        if self.current.is_some() {
            self.builder.close();
            self.current = Some(self.subpath_start);
        }
    }

    fn apply(&mut self, command: &PathCommand) {
        match *command {
            PathCommand::MoveTo { x, y } => self.move_to(x, y),
            PathCommand::LineTo { x, y } => self.connect_to(x, y),
            PathCommand::QuadTo(p) => {
                self.ensure_subpath(p.cpx, p.cpy);
                self.builder.quad_to(p.cpx, p.cpy, p.x, p.y);
                self.current = Some((p.x, p.y));
            }
            PathCommand::CubicTo(p) => {
                self.ensure_subpath(p.cp1x, p.cp1y);
                self.builder
                    .cubic_to(p.cp1x, p.cp1y, p.cp2x, p.cp2y, p.x, p.y);
                self.current = Some((p.x, p.y));
            }
            PathCommand::Arc {
                x,
                y,
                radius,
                sweep,
            } => {
                let (sx, sy) = arc::point_on_circle(x, y, radius, sweep.start_angle);
                self.connect_to(sx, sy);
                arc::append_arc_segments(&mut self.builder, x, y, radius, sweep);
                self.current = Some(arc::point_on_circle(
                    x,
                    y,
                    radius,
                    sweep.start_angle + sweep.sweep_angle,
                ));
            }
            PathCommand::ArcTo(p) => {
                let Some((x0, y0)) = self.current else {
                    self.move_to(p.x1, p.y1);
                    return;
                };
                match arc::arc_to_geometry(x0, y0, p.x1, p.y1, p.x2, p.y2, p.radius) {
                    ArcToGeometry::Line { x, y } => self.connect_to(x, y),
                    ArcToGeometry::Arc {
                        start,
                        center,
                        radius,
                        sweep,
                    } => {
                        self.connect_to(start.0, start.1);
                        arc::append_arc_segments(
                            &mut self.builder,
                            center.0,
                            center.1,
                            radius,
                            sweep,
                        );
                        self.current = Some(arc::point_on_circle(
                            center.0,
                            center.1,
                            radius,
                            sweep.start_angle + sweep.sweep_angle,
                        ));
                    }
                }
            }
            PathCommand::Rect(r) => {
                self.move_to(r.x, r.y);
                self.builder.line_to(r.x + r.width, r.y);
                self.builder.line_to(r.x + r.width, r.y + r.height);
                self.builder.line_to(r.x, r.y + r.height);
                self.close();
            }
            PathCommand::RoundRect(params) => self.round_rect(&params),
            PathCommand::Close => self.close(),
        }
    }

    fn round_rect(&mut self, params: &RoundRectParams) {
        // Handle negative dimensions by adjusting position
        let (x, width) = if params.width < 0.0 {
            (params.x + params.width, -params.width)
        } else {
            (params.x, params.width)
        };
        let (y, height) = if params.height < 0.0 {
            (params.y + params.height, -params.height)
        } else {
            (params.y, params.height)
        };

        let clamp = |c: CornerRadius| CornerRadius {
            x: c.x.max(0.0),
            y: c.y.max(0.0),
        };
        let [mut tl, mut tr, mut br, mut bl] = params.radii.map(clamp);

        // Scale radii uniformly if they exceed the rectangle dimensions
        let top = (tl.x + tr.x).max(1e-10);
        let bottom = (bl.x + br.x).max(1e-10);
        let left = (tl.y + bl.y).max(1e-10);
        let right = (tr.y + br.y).max(1e-10);
        let scale = (width / top)
            .min(width / bottom)
            .min(height / left)
            .min(height / right)
            .min(1.0);
        if scale < 1.0 {
            for corner in [&mut tl, &mut tr, &mut br, &mut bl] {
                corner.x *= scale;
                corner.y *= scale;
            }
        }

        // Kappa for quarter-ellipse cubic Bezier approximation
        const K: f32 = 0.552_284_8;
        let b = &mut self.builder;

        b.move_to(x + tl.x, y);
        b.line_to(x + width - tr.x, y);
        if tr.x > 0.0 || tr.y > 0.0 {
            b.cubic_to(
                x + width - tr.x + tr.x * K,
                y,
                x + width,
                y + tr.y - tr.y * K,
                x + width,
                y + tr.y,
            );
        }
        b.line_to(x + width, y + height - br.y);
        if br.x > 0.0 || br.y > 0.0 {
            b.cubic_to(
                x + width,
                y + height - br.y + br.y * K,
                x + width - br.x + br.x * K,
                y + height,
                x + width - br.x,
                y + height,
            );
        }
        b.line_to(x + bl.x, y + height);
        if bl.x > 0.0 || bl.y > 0.0 {
            b.cubic_to(
                x + bl.x - bl.x * K,
                y + height,
                x,
                y + height - bl.y + bl.y * K,
                x,
                y + height - bl.y,
            );
        }
        b.line_to(x, y + tl.y);
        if tl.x > 0.0 || tl.y > 0.0 {
            b.cubic_to(
                x,
                y + tl.y - tl.y * K,
                x + tl.x - tl.x * K,
                y,
                x + tl.x,
                y,
            );
        }
        b.close();

        self.subpath_start = (x, y);
        self.current = Some((x, y));
    }
}

/// Winding number of `path` around (x, y), closing each contour implicitly.
pub(crate) fn winding_number(path: &tiny_skia::Path, x: f32, y: f32) -> i32 {
    let mut winding = 0;
    let mut start = Point::zero();
    let mut last = Point::zero();
    let mut edge = |a: Point, b: Point| {
        let is_left = (b.x - a.x) * (y - a.y) - (x - a.x) * (b.y - a.y);
        if a.y <= y {
            if b.y > y && is_left > 0.0 {
                winding += 1;
            }
        } else if b.y <= y && is_left < 0.0 {
            winding -= 1;
        }
    };

    for segment in path.segments() {
        match segment {
            PathSegment::MoveTo(p) => {
                edge(last, start);
                start = p;
                last = p;
            }
            PathSegment::LineTo(p) => {
                edge(last, p);
                last = p;
            }
            PathSegment::QuadTo(c, p) => {
                let from = last;
                for i in 1..=CURVE_STEPS {
                    let t = i as f32 / CURVE_STEPS as f32;
                    let mt = 1.0 - t;
                    let q = Point::from_xy(
                        mt * mt * from.x + 2.0 * mt * t * c.x + t * t * p.x,
                        mt * mt * from.y + 2.0 * mt * t * c.y + t * t * p.y,
                    );
                    edge(last, q);
                    last = q;
                }
            }
            PathSegment::CubicTo(c1, c2, p) => {
                let from = last;
                for i in 1..=CURVE_STEPS {
                    let t = i as f32 / CURVE_STEPS as f32;
                    let mt = 1.0 - t;
                    let (w0, w1, w2, w3) = (mt * mt * mt, 3.0 * mt * mt * t, 3.0 * mt * t * t, t * t * t);
                    let q = Point::from_xy(
                        w0 * from.x + w1 * c1.x + w2 * c2.x + w3 * p.x,
                        w0 * from.y + w1 * c1.y + w2 * c2.y + w3 * p.y,
                    );
                    edge(last, q);
                    last = q;
                }
            }
            PathSegment::Close => {
                edge(last, start);
                last = start;
            }
        }
    }
    edge(last, start);
    winding
}
