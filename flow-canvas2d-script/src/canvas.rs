//! A drawing context as seen from scripts.

use crate::args::Args;
use crate::error::{ScriptError, ScriptResult};
use crate::ops;
use crate::value::Value;
use flow_canvas2d::{DrawingContext, PropertyValue, StyleValue};

/// Wraps a [`DrawingContext`] and dispatches named calls and property
/// access to it.
#[derive(Debug)]
pub struct ScriptCanvas {
    ctx: DrawingContext,
}

impl ScriptCanvas {
    pub fn new(ctx: DrawingContext) -> Self {
        Self { ctx }
    }

    pub fn context(&self) -> &DrawingContext {
        &self.ctx
    }

    pub fn context_mut(&mut self) -> &mut DrawingContext {
        &mut self.ctx
    }

    pub fn into_context(self) -> DrawingContext {
        self.ctx
    }

    /// Invoke operation `op` with positional arguments.
    pub fn call(&mut self, op: &str, args: &[Value]) -> ScriptResult<Value> {
        let (name, handler) =
            ops::context_op(op).ok_or_else(|| ScriptError::UnknownOperation(op.to_string()))?;
        log::trace!(target: "canvas", "call {} ({} args)", name, args.len());
        handler(&mut self.ctx, Args::new(name, args))
    }

    /// Read a property. Unknown names read as null.
    pub fn get(&self, name: &str) -> Value {
        match self.ctx.get_property(name) {
            Some(PropertyValue::String(s)) => Value::String(s),
            Some(PropertyValue::Number(n)) => Value::from(n),
            Some(PropertyValue::Bool(b)) => Value::Bool(b),
            Some(PropertyValue::Style(StyleValue::Color(css))) => Value::String(css),
            Some(PropertyValue::Style(StyleValue::Gradient(g))) => Value::Gradient(g),
            Some(PropertyValue::Style(StyleValue::Pattern(p))) => Value::Pattern(p),
            None => Value::Null,
        }
    }

    /// Assign a property. Values of the wrong kind are errors; unknown names
    /// are ignored.
    pub fn set(&mut self, name: &str, value: Value) -> ScriptResult<()> {
        let property = match value {
            Value::String(s) => PropertyValue::String(s),
            Value::Number(n) => PropertyValue::Number(n as f32),
            Value::Bool(b) => PropertyValue::Bool(b),
            Value::Gradient(g) => PropertyValue::Style(StyleValue::Gradient(g)),
            Value::Pattern(p) => PropertyValue::Style(StyleValue::Pattern(p)),
            other => {
                return Err(ScriptError::Type {
                    op: name.to_string(),
                    index: 0,
                    expected: "a string, number, boolean, Gradient or Pattern",
                    got: other.type_name(),
                })
            }
        };
        self.ctx.set_property(name, property)?;
        Ok(())
    }
}
