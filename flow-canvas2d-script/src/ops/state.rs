//! State stack, line dash, surface size and style factories.

use super::{ContextOp, Table};
use crate::args::Args;
use crate::error::ScriptResult;
use crate::value::Value;
use flow_canvas2d::{DrawingContext, RadialGradientParams};
use std::collections::BTreeMap;

pub(super) fn register(table: &mut Table<ContextOp>) {
    table.insert("save", save);
    table.insert("restore", restore);
    table.insert("setLineDash", set_line_dash);
    table.insert("getLineDash", get_line_dash);
    table.insert("getSize", get_size);
    table.insert("createLinearGradient", create_linear_gradient);
    table.insert("createRadialGradient", create_radial_gradient);
    table.insert("createConicGradient", create_conic_gradient);
    table.insert("createPattern", create_pattern);
}

fn save(ctx: &mut DrawingContext, args: Args<'_>) -> ScriptResult<Value> {
    args.expect_arity(&[0])?;
    ctx.save();
    Ok(Value::Null)
}

fn restore(ctx: &mut DrawingContext, args: Args<'_>) -> ScriptResult<Value> {
    args.expect_arity(&[0])?;
    ctx.restore();
    Ok(Value::Null)
}

fn set_line_dash(ctx: &mut DrawingContext, args: Args<'_>) -> ScriptResult<Value> {
    args.expect_arity(&[1])?;
    ctx.set_line_dash(args.number_list(0)?);
    Ok(Value::Null)
}

fn get_line_dash(ctx: &mut DrawingContext, args: Args<'_>) -> ScriptResult<Value> {
    args.expect_arity(&[0])?;
    Ok(Value::List(
        ctx.get_line_dash().iter().map(|&d| Value::from(d)).collect(),
    ))
}

/// `{width, height}` of the current surface.
fn get_size(ctx: &mut DrawingContext, args: Args<'_>) -> ScriptResult<Value> {
    args.expect_arity(&[0])?;
    let (width, height) = ctx.get_size();
    let mut map = BTreeMap::new();
    map.insert("width".to_string(), Value::Number(width as f64));
    map.insert("height".to_string(), Value::Number(height as f64));
    Ok(Value::Map(map))
}

fn create_linear_gradient(ctx: &mut DrawingContext, args: Args<'_>) -> ScriptResult<Value> {
    args.expect_arity(&[4])?;
    Ok(Value::Gradient(ctx.create_linear_gradient(
        args.number(0)?,
        args.number(1)?,
        args.number(2)?,
        args.number(3)?,
    )))
}

fn create_radial_gradient(ctx: &mut DrawingContext, args: Args<'_>) -> ScriptResult<Value> {
    args.expect_arity(&[6])?;
    Ok(Value::Gradient(ctx.create_radial_gradient(
        &RadialGradientParams {
            x0: args.number(0)?,
            y0: args.number(1)?,
            r0: args.number(2)?,
            x1: args.number(3)?,
            y1: args.number(4)?,
            r1: args.number(5)?,
        },
    )))
}

fn create_conic_gradient(ctx: &mut DrawingContext, args: Args<'_>) -> ScriptResult<Value> {
    args.expect_arity(&[3])?;
    Ok(Value::Gradient(ctx.create_conic_gradient(
        args.number(0)?,
        args.number(1)?,
        args.number(2)?,
    )))
}

/// `createPattern(image, repetition)`; a null repetition means `"repeat"`.
fn create_pattern(ctx: &mut DrawingContext, args: Args<'_>) -> ScriptResult<Value> {
    args.expect_arity(&[2])?;
    let image = args.image(0)?;
    let repetition = match args.get(1) {
        Some(Value::Null) => "repeat",
        _ => args.string(1)?,
    };
    Ok(Value::Pattern(ctx.create_pattern(&image, repetition)))
}
