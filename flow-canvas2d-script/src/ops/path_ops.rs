//! Path construction, shared by the context's current path and path objects.

use super::{ContextOp, PathOp, Table};
use crate::args::Args;
use crate::error::ScriptResult;
use crate::value::Value;
use flow_canvas2d::{
    ArcParams, ArcToParams, Canvas2dResult, CornerRadius, CubicBezierParams, DrawingContext, Path,
    QuadraticBezierParams, RectParams, RoundRectRadii,
};

/// Anything that accepts path segments.
pub(crate) trait PathTarget {
    fn move_to(&mut self, x: f32, y: f32);
    fn line_to(&mut self, x: f32, y: f32);
    fn bezier_curve_to(&mut self, params: &CubicBezierParams);
    fn quadratic_curve_to(&mut self, params: &QuadraticBezierParams);
    fn arc(&mut self, params: &ArcParams);
    fn arc_to(&mut self, params: &ArcToParams);
    fn rect(&mut self, params: &RectParams);
    fn round_rect(&mut self, rect: &RectParams, radii: &RoundRectRadii) -> Canvas2dResult<()>;
    fn close_path(&mut self);
}

macro_rules! impl_path_target {
    ($ty:ty) => {
        impl PathTarget for $ty {
            fn move_to(&mut self, x: f32, y: f32) {
                <$ty>::move_to(self, x, y)
            }
            fn line_to(&mut self, x: f32, y: f32) {
                <$ty>::line_to(self, x, y)
            }
            fn bezier_curve_to(&mut self, params: &CubicBezierParams) {
                <$ty>::bezier_curve_to(self, params)
            }
            fn quadratic_curve_to(&mut self, params: &QuadraticBezierParams) {
                <$ty>::quadratic_curve_to(self, params)
            }
            fn arc(&mut self, params: &ArcParams) {
                <$ty>::arc(self, params)
            }
            fn arc_to(&mut self, params: &ArcToParams) {
                <$ty>::arc_to(self, params)
            }
            fn rect(&mut self, params: &RectParams) {
                <$ty>::rect(self, params)
            }
            fn round_rect(
                &mut self,
                rect: &RectParams,
                radii: &RoundRectRadii,
            ) -> Canvas2dResult<()> {
                <$ty>::round_rect(self, rect, radii)
            }
            fn close_path(&mut self) {
                <$ty>::close_path(self)
            }
        }
    };
}

impl_path_target!(DrawingContext);
impl_path_target!(Path);

pub(super) fn register(table: &mut Table<ContextOp>) {
    table.insert("beginPath", begin_path);
    table.insert("closePath", close_path::<DrawingContext>);
    table.insert("moveTo", move_to::<DrawingContext>);
    table.insert("lineTo", line_to::<DrawingContext>);
    table.insert("bezierCurveTo", bezier_curve_to::<DrawingContext>);
    table.insert("quadraticCurveTo", quadratic_curve_to::<DrawingContext>);
    table.insert("arc", arc::<DrawingContext>);
    table.insert("arcTo", arc_to::<DrawingContext>);
    table.insert("rect", rect::<DrawingContext>);
    table.insert("roundRect", round_rect::<DrawingContext>);
}

pub(super) fn path_table() -> Table<PathOp> {
    let mut table: Table<PathOp> = Table::new();
    table.insert("addPath", add_path);
    table.insert("closePath", close_path::<Path>);
    table.insert("moveTo", move_to::<Path>);
    table.insert("lineTo", line_to::<Path>);
    table.insert("bezierCurveTo", bezier_curve_to::<Path>);
    table.insert("quadraticCurveTo", quadratic_curve_to::<Path>);
    table.insert("arc", arc::<Path>);
    table.insert("arcTo", arc_to::<Path>);
    table.insert("rect", rect::<Path>);
    table.insert("roundRect", round_rect::<Path>);
    table
}

fn begin_path(ctx: &mut DrawingContext, args: Args<'_>) -> ScriptResult<Value> {
    args.expect_arity(&[0])?;
    ctx.begin_path();
    Ok(Value::Null)
}

fn add_path(path: &mut Path, args: Args<'_>) -> ScriptResult<Value> {
    args.expect_arity(&[1])?;
    path.add_path(&args.path(0)?);
    Ok(Value::Null)
}

fn close_path<T: PathTarget>(target: &mut T, args: Args<'_>) -> ScriptResult<Value> {
    args.expect_arity(&[0])?;
    target.close_path();
    Ok(Value::Null)
}

fn move_to<T: PathTarget>(target: &mut T, args: Args<'_>) -> ScriptResult<Value> {
    args.expect_arity(&[2])?;
    target.move_to(args.number(0)?, args.number(1)?);
    Ok(Value::Null)
}

fn line_to<T: PathTarget>(target: &mut T, args: Args<'_>) -> ScriptResult<Value> {
    args.expect_arity(&[2])?;
    target.line_to(args.number(0)?, args.number(1)?);
    Ok(Value::Null)
}

fn bezier_curve_to<T: PathTarget>(target: &mut T, args: Args<'_>) -> ScriptResult<Value> {
    args.expect_arity(&[6])?;
    target.bezier_curve_to(&CubicBezierParams {
        cp1x: args.number(0)?,
        cp1y: args.number(1)?,
        cp2x: args.number(2)?,
        cp2y: args.number(3)?,
        x: args.number(4)?,
        y: args.number(5)?,
    });
    Ok(Value::Null)
}

fn quadratic_curve_to<T: PathTarget>(target: &mut T, args: Args<'_>) -> ScriptResult<Value> {
    args.expect_arity(&[4])?;
    target.quadratic_curve_to(&QuadraticBezierParams {
        cpx: args.number(0)?,
        cpy: args.number(1)?,
        x: args.number(2)?,
        y: args.number(3)?,
    });
    Ok(Value::Null)
}

/// `arc(x, y, r, start, end[, counterclockwise])`. The direction flag
/// defaults to counterclockwise.
fn arc<T: PathTarget>(target: &mut T, args: Args<'_>) -> ScriptResult<Value> {
    args.expect_arity(&[5, 6])?;
    target.arc(&ArcParams {
        x: args.number(0)?,
        y: args.number(1)?,
        radius: args.number(2)?,
        start_angle: args.number(3)?,
        end_angle: args.number(4)?,
        counterclockwise: args.bool_or(5, true)?,
    });
    Ok(Value::Null)
}

fn arc_to<T: PathTarget>(target: &mut T, args: Args<'_>) -> ScriptResult<Value> {
    args.expect_arity(&[5])?;
    target.arc_to(&ArcToParams {
        x1: args.number(0)?,
        y1: args.number(1)?,
        x2: args.number(2)?,
        y2: args.number(3)?,
        radius: args.number(4)?,
    });
    Ok(Value::Null)
}

pub(super) fn rect_args(args: Args<'_>) -> ScriptResult<RectParams> {
    Ok(RectParams {
        x: args.number(0)?,
        y: args.number(1)?,
        width: args.number(2)?,
        height: args.number(3)?,
    })
}

fn rect<T: PathTarget>(target: &mut T, args: Args<'_>) -> ScriptResult<Value> {
    args.expect_arity(&[4])?;
    target.rect(&rect_args(args)?);
    Ok(Value::Null)
}

/// Read the radii argument: a number, a list of numbers, or an `{x, y}` map.
fn radii_arg(args: Args<'_>, index: usize) -> ScriptResult<RoundRectRadii> {
    match args.get(index) {
        None | Some(Value::Null) => Ok(RoundRectRadii::default()),
        Some(Value::Number(r)) => Ok(RoundRectRadii::Scalar(*r as f32)),
        Some(Value::List(_)) => Ok(RoundRectRadii::List(args.number_list(index)?)),
        Some(Value::Map(_)) => Ok(RoundRectRadii::Corner(
            args.record::<CornerRadius>(index, "a number, list or {x, y} map")?,
        )),
        Some(_) => Err(args.type_error(index, "a number, list or {x, y} map")),
    }
}

fn round_rect<T: PathTarget>(target: &mut T, args: Args<'_>) -> ScriptResult<Value> {
    args.expect_arity(&[4, 5])?;
    let radii = radii_arg(args, 4)?;
    target.round_rect(&rect_args(args)?, &radii)?;
    Ok(Value::Null)
}
