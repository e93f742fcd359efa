//! Transform operations.

use super::{ContextOp, Table};
use crate::args::Args;
use crate::error::ScriptResult;
use crate::value::Value;
use flow_canvas2d::{DrawingContext, Matrix2x3};

pub(super) fn register(table: &mut Table<ContextOp>) {
    table.insert("translate", translate);
    table.insert("scale", scale);
    table.insert("rotate", rotate);
    table.insert("transform", transform);
    table.insert("setTransform", set_transform);
    table.insert("getTransform", get_transform);
    table.insert("resetTransform", reset_transform);
}

/// A matrix given either as one `{a, b, c, d, e, f}` map or as six numbers.
fn matrix_args(args: Args<'_>) -> ScriptResult<Matrix2x3> {
    if args.len() == 1 {
        return args.record(0, "a matrix map");
    }
    Ok(Matrix2x3::new(
        args.number(0)?,
        args.number(1)?,
        args.number(2)?,
        args.number(3)?,
        args.number(4)?,
        args.number(5)?,
    ))
}

fn translate(ctx: &mut DrawingContext, args: Args<'_>) -> ScriptResult<Value> {
    args.expect_arity(&[2])?;
    ctx.translate(args.number(0)?, args.number(1)?);
    Ok(Value::Null)
}

fn scale(ctx: &mut DrawingContext, args: Args<'_>) -> ScriptResult<Value> {
    args.expect_arity(&[2])?;
    ctx.scale(args.number(0)?, args.number(1)?);
    Ok(Value::Null)
}

fn rotate(ctx: &mut DrawingContext, args: Args<'_>) -> ScriptResult<Value> {
    args.expect_arity(&[1])?;
    ctx.rotate(args.number(0)?);
    Ok(Value::Null)
}

fn transform(ctx: &mut DrawingContext, args: Args<'_>) -> ScriptResult<Value> {
    args.expect_arity(&[1, 6])?;
    ctx.transform(&matrix_args(args)?);
    Ok(Value::Null)
}

/// With no arguments the transform is reset to identity.
fn set_transform(ctx: &mut DrawingContext, args: Args<'_>) -> ScriptResult<Value> {
    args.expect_arity(&[0, 1, 6])?;
    let matrix = if args.is_empty() {
        Matrix2x3::identity()
    } else {
        matrix_args(args)?
    };
    ctx.set_transform(&matrix);
    Ok(Value::Null)
}

fn get_transform(ctx: &mut DrawingContext, args: Args<'_>) -> ScriptResult<Value> {
    args.expect_arity(&[0])?;
    Ok(Value::from_record(&ctx.get_transform()))
}

fn reset_transform(ctx: &mut DrawingContext, args: Args<'_>) -> ScriptResult<Value> {
    args.expect_arity(&[0])?;
    ctx.reset_transform();
    Ok(Value::Null)
}
