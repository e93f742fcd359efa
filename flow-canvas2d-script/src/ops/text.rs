//! Text measurement and rendering.

use super::{ContextOp, Table};
use crate::args::Args;
use crate::error::ScriptResult;
use crate::value::Value;
use flow_canvas2d::DrawingContext;

pub(super) fn register(table: &mut Table<ContextOp>) {
    table.insert("measureText", measure_text);
    table.insert("fillText", fill_text);
    table.insert("strokeText", stroke_text);
}

fn measure_text(ctx: &mut DrawingContext, args: Args<'_>) -> ScriptResult<Value> {
    args.expect_arity(&[1])?;
    let metrics = ctx.measure_text(args.string(0)?)?;
    Ok(Value::from_record(&metrics))
}

/// `(text, x, y[, maxWidth])`
fn text_args<'a>(args: Args<'a>) -> ScriptResult<(&'a str, f32, f32, Option<f32>)> {
    args.expect_arity(&[3, 4])?;
    let max_width = match args.len() {
        4 => Some(args.number(3)?),
        _ => None,
    };
    Ok((args.string(0)?, args.number(1)?, args.number(2)?, max_width))
}

fn fill_text(ctx: &mut DrawingContext, args: Args<'_>) -> ScriptResult<Value> {
    let (text, x, y, max_width) = text_args(args)?;
    ctx.fill_text(text, x, y, max_width)?;
    Ok(Value::Null)
}

fn stroke_text(ctx: &mut DrawingContext, args: Args<'_>) -> ScriptResult<Value> {
    let (text, x, y, max_width) = text_args(args)?;
    ctx.stroke_text(text, x, y, max_width)?;
    Ok(Value::Null)
}
