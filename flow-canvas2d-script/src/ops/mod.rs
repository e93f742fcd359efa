//! Operation tables for the script boundary.
//!
//! Each table maps an operation name to a plain function pointer and is
//! built once on first use. Overloads are resolved inside the handler from
//! the argument count and kinds.

mod drawing;
mod image_ops;
mod path_ops;
mod state;
mod text;
mod transform;

pub(crate) use image_ops::color_space_setting;

use crate::args::Args;
use crate::error::ScriptResult;
use crate::value::Value;
use flow_canvas2d::{DrawingContext, Path};
use std::collections::HashMap;
use std::sync::OnceLock;

/// Handler for an operation on a drawing context.
pub(crate) type ContextOp = fn(&mut DrawingContext, Args<'_>) -> ScriptResult<Value>;

/// Handler for a method of a path object.
pub(crate) type PathOp = fn(&mut Path, Args<'_>) -> ScriptResult<Value>;

pub(crate) type Table<T> = HashMap<&'static str, T>;

fn context_table() -> &'static Table<ContextOp> {
    static TABLE: OnceLock<Table<ContextOp>> = OnceLock::new();
    TABLE.get_or_init(|| {
        let mut table = Table::new();
        state::register(&mut table);
        path_ops::register(&mut table);
        drawing::register(&mut table);
        transform::register(&mut table);
        text::register(&mut table);
        image_ops::register(&mut table);
        table
    })
}

/// Look up a context operation, returning its registered name with it.
pub(crate) fn context_op(name: &str) -> Option<(&'static str, ContextOp)> {
    context_table()
        .get_key_value(name)
        .map(|(name, op)| (*name, *op))
}

/// Look up a path object method.
pub(crate) fn path_op(name: &str) -> Option<(&'static str, PathOp)> {
    static TABLE: OnceLock<Table<PathOp>> = OnceLock::new();
    TABLE
        .get_or_init(path_ops::path_table)
        .get_key_value(name)
        .map(|(name, op)| (*name, *op))
}

/// Names of every context operation, sorted.
pub fn context_op_names() -> Vec<&'static str> {
    let mut names: Vec<&'static str> = context_table().keys().copied().collect();
    names.sort_unstable();
    names
}
