//! Arc geometry.
//!
//! tiny-skia has no arc primitive, so arcs are flattened into cubic bezier
//! segments with kurbo.

use std::f32::consts::{PI, TAU};
use tiny_skia::PathBuilder;

/// Curve fitting tolerance in user units.
const ARC_TOLERANCE: f64 = 0.05;

/// Start angle and signed sweep of a circular arc, in radians.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcSweep {
    pub start_angle: f32,
    pub sweep_angle: f32,
}

/// Wrap an angle into `[0, 2π)`.
pub fn normalize_angle(angle: f32) -> f32 {
    let a = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if a >= TAU {
        0.0
    } else {
        a
    }
}

/// Compute the arc start and sweep for `arc(start, end, counterclockwise)`.
///
/// Both angles are wrapped into `[0, 2π)` first, so sweeps of a full turn or
/// more collapse to their remainder. Counterclockwise swaps the endpoints and
/// negates the sweep.
pub fn arc_sweep(start_angle: f32, end_angle: f32, counterclockwise: bool) -> ArcSweep {
    let start = normalize_angle(start_angle);
    let end = normalize_angle(end_angle);
    let sweep = end - start;
    if counterclockwise {
        ArcSweep {
            start_angle: end,
            sweep_angle: -sweep,
        }
    } else {
        ArcSweep {
            start_angle: start,
            sweep_angle: sweep,
        }
    }
}

/// Point on the circle at `angle`.
pub fn point_on_circle(cx: f32, cy: f32, radius: f32, angle: f32) -> (f32, f32) {
    (cx + radius * angle.cos(), cy + radius * angle.sin())
}

/// Append cubic segments for an arc whose start point is already the
/// builder's current point.
pub fn append_arc_segments(
    builder: &mut PathBuilder,
    cx: f32,
    cy: f32,
    radius: f32,
    sweep: ArcSweep,
) {
    let arc = kurbo::Arc {
        center: kurbo::Point::new(cx as f64, cy as f64),
        radii: kurbo::Vec2::new(radius as f64, radius as f64),
        start_angle: sweep.start_angle as f64,
        sweep_angle: sweep.sweep_angle as f64,
        x_rotation: 0.0,
    };
    for el in arc.append_iter(ARC_TOLERANCE) {
        match el {
            kurbo::PathEl::CurveTo(p1, p2, p3) => builder.cubic_to(
                p1.x as f32,
                p1.y as f32,
                p2.x as f32,
                p2.y as f32,
                p3.x as f32,
                p3.y as f32,
            ),
            kurbo::PathEl::QuadTo(p1, p2) => {
                builder.quad_to(p1.x as f32, p1.y as f32, p2.x as f32, p2.y as f32)
            }
            kurbo::PathEl::LineTo(p) => builder.line_to(p.x as f32, p.y as f32),
            kurbo::PathEl::MoveTo(_) | kurbo::PathEl::ClosePath => {}
        }
    }
}

/// Tangent arc for arcTo, from the current point `(x0, y0)` through the
/// corner `(x1, y1)` toward `(x2, y2)`.
pub enum ArcToGeometry {
    /// Degenerate input: a straight line to the corner.
    Line { x: f32, y: f32 },
    /// Line to `start`, then the arc.
    Arc {
        start: (f32, f32),
        center: (f32, f32),
        radius: f32,
        sweep: ArcSweep,
    },
}

#[allow(clippy::too_many_arguments)]
pub fn arc_to_geometry(
    x0: f32,
    y0: f32,
    x1: f32,
    y1: f32,
    x2: f32,
    y2: f32,
    radius: f32,
) -> ArcToGeometry {
    let line = ArcToGeometry::Line { x: x1, y: y1 };
    if radius <= 0.0 {
        return line;
    }

    // Vectors from corner to adjacent points
    let v1x = x0 - x1;
    let v1y = y0 - y1;
    let v2x = x2 - x1;
    let v2y = y2 - y1;

    let len1 = (v1x * v1x + v1y * v1y).sqrt();
    let len2 = (v2x * v2x + v2y * v2y).sqrt();
    if len1 < 1e-6 || len2 < 1e-6 {
        return line;
    }

    let (v1x, v1y) = (v1x / len1, v1y / len1);
    let (v2x, v2y) = (v2x / len2, v2y / len2);

    let cross = v1x * v2y - v1y * v2x;
    let dot = v1x * v2x + v1y * v2y;
    let angle = cross.atan2(dot);
    if angle.abs() < 1e-6 || (angle.abs() - PI).abs() < 1e-6 {
        return line;
    }

    // Tangent points
    let seg_len = radius / (angle / 2.0).tan().abs();
    let start = (x1 + v1x * seg_len, y1 + v1y * seg_len);
    let end = (x1 + v2x * seg_len, y1 + v2y * seg_len);

    let sign = if cross < 0.0 { -1.0 } else { 1.0 };
    let center = (start.0 - v1y * sign * radius, start.1 + v1x * sign * radius);

    let a0 = (start.1 - center.1).atan2(start.0 - center.0);
    let a1 = (end.1 - center.1).atan2(end.0 - center.0);
    // Shortest way around
    let mut sweep = a1 - a0;
    if sweep > PI {
        sweep -= TAU;
    } else if sweep < -PI {
        sweep += TAU;
    }

    ArcToGeometry::Arc {
        start,
        center,
        radius,
        sweep: ArcSweep {
            start_angle: a0,
            sweep_angle: sweep,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_angle() {
        assert_eq!(normalize_angle(0.0), 0.0);
        assert!((normalize_angle(-PI / 2.0) - 1.5 * PI).abs() < 1e-5);
        assert!((normalize_angle(5.0 * PI) - PI).abs() < 1e-4);
        assert!(normalize_angle(TAU) < 1e-5);
    }

    #[test]
    fn test_counterclockwise_negates_sweep() {
        let pairs = [(0.0, PI / 2.0), (0.3, 2.0), (PI, 0.5), (-1.0, 4.0)];
        for (start, end) in pairs {
            let cw = arc_sweep(start, end, false);
            let ccw = arc_sweep(start, end, true);
            assert!((cw.sweep_angle + ccw.sweep_angle).abs() < 1e-5);
            assert!((cw.sweep_angle.abs() - ccw.sweep_angle.abs()).abs() < 1e-5);
        }
    }

    #[test]
    fn test_counterclockwise_swaps_endpoints() {
        let ccw = arc_sweep(0.0, PI / 2.0, true);
        assert!((ccw.start_angle - PI / 2.0).abs() < 1e-6);
        assert!((ccw.sweep_angle + PI / 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_full_turn_degenerates() {
        let sweep = arc_sweep(0.0, TAU, false);
        assert!(sweep.sweep_angle.abs() < 1e-5);
    }

    #[test]
    fn test_arc_segments_end_on_circle() {
        let mut builder = PathBuilder::new();
        builder.move_to(60.0, 50.0);
        append_arc_segments(
            &mut builder,
            50.0,
            50.0,
            10.0,
            ArcSweep {
                start_angle: 0.0,
                sweep_angle: PI / 2.0,
            },
        );
        let path = builder.finish().unwrap();
        let bounds = path.bounds();
        assert!((bounds.right() - 60.0).abs() < 0.01);
        assert!((bounds.bottom() - 60.0).abs() < 0.01);
    }

    #[test]
    fn test_arc_to_right_angle_corner() {
        match arc_to_geometry(0.0, 0.0, 10.0, 0.0, 10.0, 10.0, 5.0) {
            ArcToGeometry::Arc {
                start,
                center,
                sweep,
                ..
            } => {
                assert!((start.0 - 5.0).abs() < 1e-4 && start.1.abs() < 1e-4);
                assert!((center.0 - 5.0).abs() < 1e-4 && (center.1 - 5.0).abs() < 1e-4);
                assert!((sweep.sweep_angle - PI / 2.0).abs() < 1e-4);
            }
            ArcToGeometry::Line { .. } => panic!("expected an arc"),
        }
    }

    #[test]
    fn test_arc_to_collinear_is_line() {
        assert!(matches!(
            arc_to_geometry(0.0, 0.0, 5.0, 0.0, 10.0, 0.0, 3.0),
            ArcToGeometry::Line { x, y } if x == 5.0 && y == 0.0
        ));
    }
}
