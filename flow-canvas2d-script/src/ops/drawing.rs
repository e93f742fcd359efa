//! Fill, stroke, clip, hit testing and rectangle operations.
//!
//! `fill`, `stroke`, `clip` and `isPointInPath` take an optional leading
//! path object and, except for stroke, an optional trailing fill rule. The
//! form is chosen from the argument count and the kind of the first argument.

use super::path_ops::rect_args;
use super::{ContextOp, Table};
use crate::args::Args;
use crate::error::ScriptResult;
use crate::value::Value;
use flow_canvas2d::{DrawingContext, Path};

pub(super) fn register(table: &mut Table<ContextOp>) {
    table.insert("fill", fill);
    table.insert("stroke", stroke);
    table.insert("clip", clip);
    table.insert("isPointInPath", is_point_in_path);
    table.insert("fillRect", fill_rect);
    table.insert("strokeRect", stroke_rect);
    table.insert("clearRect", clear_rect);
}

/// Split `([path][, fillRule])`.
fn path_and_rule<'a>(args: Args<'a>) -> ScriptResult<(Option<Path>, Option<&'a str>)> {
    args.expect_arity(&[0, 1, 2])?;
    match args.len() {
        0 => Ok((None, None)),
        1 => match args.get(0) {
            Some(Value::String(rule)) => Ok((None, Some(rule.as_str()))),
            Some(Value::Path(_)) => Ok((Some(args.path(0)?), None)),
            _ => Err(args.type_error(0, "a Path or fill rule")),
        },
        _ => Ok((Some(args.path(0)?), Some(args.string(1)?))),
    }
}

fn fill(ctx: &mut DrawingContext, args: Args<'_>) -> ScriptResult<Value> {
    let (path, rule) = path_and_rule(args)?;
    ctx.fill(path.as_ref(), rule)?;
    Ok(Value::Null)
}

fn stroke(ctx: &mut DrawingContext, args: Args<'_>) -> ScriptResult<Value> {
    args.expect_arity(&[0, 1])?;
    let path = match args.len() {
        0 => None,
        _ => Some(args.path(0)?),
    };
    ctx.stroke(path.as_ref())?;
    Ok(Value::Null)
}

fn clip(ctx: &mut DrawingContext, args: Args<'_>) -> ScriptResult<Value> {
    let (path, rule) = path_and_rule(args)?;
    ctx.clip(path.as_ref(), rule);
    Ok(Value::Null)
}

/// `isPointInPath([path, ]x, y[, fillRule])`.
fn is_point_in_path(ctx: &mut DrawingContext, args: Args<'_>) -> ScriptResult<Value> {
    args.expect_arity(&[2, 3, 4])?;
    let with_path = matches!(args.get(0), Some(Value::Path(_)));
    let path = if with_path { Some(args.path(0)?) } else { None };
    let first = usize::from(with_path);
    let x = args.number(first)?;
    let y = args.number(first + 1)?;
    let rule = match args.len() - first {
        2 => None,
        3 => Some(args.string(first + 2)?),
        // Four arguments without a leading path
        _ => return Err(args.type_error(0, "a Path")),
    };
    Ok(Value::Bool(ctx.is_point_in_path(path.as_ref(), x, y, rule)))
}

fn fill_rect(ctx: &mut DrawingContext, args: Args<'_>) -> ScriptResult<Value> {
    args.expect_arity(&[4])?;
    ctx.fill_rect(&rect_args(args)?)?;
    Ok(Value::Null)
}

fn stroke_rect(ctx: &mut DrawingContext, args: Args<'_>) -> ScriptResult<Value> {
    args.expect_arity(&[4])?;
    ctx.stroke_rect(&rect_args(args)?)?;
    Ok(Value::Null)
}

fn clear_rect(ctx: &mut DrawingContext, args: Args<'_>) -> ScriptResult<Value> {
    args.expect_arity(&[4])?;
    ctx.clear_rect(&rect_args(args)?);
    Ok(Value::Null)
}

#[cfg(test)]
mod tests {
    use super::*;
    use flow_canvas2d::FontConfig;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn ctx() -> DrawingContext {
        DrawingContext::with_config(20, 20, &FontConfig::empty()).unwrap()
    }

    fn square() -> Value {
        let mut path = Path::new();
        path.move_to(0.0, 0.0);
        path.line_to(10.0, 0.0);
        path.line_to(10.0, 10.0);
        path.line_to(0.0, 10.0);
        path.close_path();
        Value::Path(Rc::new(RefCell::new(path)))
    }

    fn hit(ctx: &mut DrawingContext, values: &[Value]) -> ScriptResult<Value> {
        is_point_in_path(ctx, Args::new("isPointInPath", values))
    }

    #[test]
    fn test_path_and_rule_forms() {
        let rule = [Value::from("evenodd")];
        let (path, r) = path_and_rule(Args::new("fill", &rule)).unwrap();
        assert!(path.is_none());
        assert_eq!(r, Some("evenodd"));

        let both = [square(), Value::from("nonzero")];
        let (path, r) = path_and_rule(Args::new("fill", &both)).unwrap();
        assert!(path.is_some());
        assert_eq!(r, Some("nonzero"));
    }

    #[test]
    fn test_fill_rejects_map_argument() {
        let values = [Value::Map(Default::default())];
        assert!(fill(&mut ctx(), Args::new("fill", &values)).is_err());
    }

    #[test]
    fn test_is_point_in_path_forms() {
        let mut ctx = ctx();
        let n = Value::Number;
        assert_eq!(hit(&mut ctx, &[square(), n(5.0), n(5.0)]).unwrap(), Value::Bool(true));
        assert_eq!(
            hit(&mut ctx, &[square(), n(5.0), n(5.0), Value::from("evenodd")]).unwrap(),
            Value::Bool(true)
        );
        // Current path is empty
        assert_eq!(hit(&mut ctx, &[n(5.0), n(5.0)]).unwrap(), Value::Bool(false));
        assert_eq!(
            hit(&mut ctx, &[n(5.0), n(5.0), Value::from("evenodd")]).unwrap(),
            Value::Bool(false)
        );
        assert!(hit(&mut ctx, &[n(1.0), n(5.0), n(5.0), Value::from("evenodd")]).is_err());
    }
}
