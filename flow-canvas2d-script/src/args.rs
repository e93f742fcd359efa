//! Typed access to positional script arguments.

use crate::error::{ScriptError, ScriptResult};
use crate::value::Value;
use flow_canvas2d::{CanvasImage, Path};
use serde::de::DeserializeOwned;

/// Arguments of one call, tagged with the operation name for error reporting.
#[derive(Debug, Clone, Copy)]
pub struct Args<'a> {
    op: &'a str,
    values: &'a [Value],
}

impl<'a> Args<'a> {
    pub fn new(op: &'a str, values: &'a [Value]) -> Self {
        Self { op, values }
    }

    pub fn op(&self) -> &'a str {
        self.op
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&'a Value> {
        self.values.get(index)
    }

    /// Fail unless the argument count is one of `accepted`.
    pub fn expect_arity(&self, accepted: &[usize]) -> ScriptResult<()> {
        if accepted.contains(&self.values.len()) {
            return Ok(());
        }
        Err(ScriptError::Arity {
            op: self.op.to_string(),
            got: self.values.len(),
            expected: describe_counts(accepted),
        })
    }

    pub fn type_error(&self, index: usize, expected: &'static str) -> ScriptError {
        ScriptError::Type {
            op: self.op.to_string(),
            index,
            expected,
            got: self.get(index).map_or("nothing", Value::type_name),
        }
    }

    pub fn number(&self, index: usize) -> ScriptResult<f32> {
        self.get(index)
            .and_then(Value::as_f64)
            .map(|n| n as f32)
            .ok_or_else(|| self.type_error(index, "a number"))
    }

    /// Number truncated toward zero, saturating at the i32 range.
    pub fn int(&self, index: usize) -> ScriptResult<i32> {
        self.get(index)
            .and_then(Value::as_f64)
            .map(|n| n as i32)
            .ok_or_else(|| self.type_error(index, "a number"))
    }

    /// Non-negative size; negative and NaN values become 0.
    pub fn size(&self, index: usize) -> ScriptResult<u32> {
        self.get(index)
            .and_then(Value::as_f64)
            .map(|n| n as u32)
            .ok_or_else(|| self.type_error(index, "a number"))
    }

    pub fn string(&self, index: usize) -> ScriptResult<&'a str> {
        self.get(index)
            .and_then(Value::as_str)
            .ok_or_else(|| self.type_error(index, "a string"))
    }

    pub fn bool(&self, index: usize) -> ScriptResult<bool> {
        self.get(index)
            .and_then(Value::as_bool)
            .ok_or_else(|| self.type_error(index, "a boolean"))
    }

    /// Optional boolean: absent or null yields `default`.
    pub fn bool_or(&self, index: usize, default: bool) -> ScriptResult<bool> {
        match self.get(index) {
            None | Some(Value::Null) => Ok(default),
            _ => self.bool(index),
        }
    }

    pub fn number_list(&self, index: usize) -> ScriptResult<Vec<f32>> {
        let items = self
            .get(index)
            .and_then(Value::as_list)
            .ok_or_else(|| self.type_error(index, "a list of numbers"))?;
        items
            .iter()
            .map(|v| v.as_f64().map(|n| n as f32))
            .collect::<Option<Vec<_>>>()
            .ok_or_else(|| self.type_error(index, "a list of numbers"))
    }

    /// A copy of the path object at `index`.
    pub fn path(&self, index: usize) -> ScriptResult<Path> {
        match self.get(index) {
            Some(Value::Path(handle)) => handle
                .try_borrow()
                .map(|path| path.clone())
                .map_err(|_| self.type_error(index, "a Path not in use")),
            _ => Err(self.type_error(index, "a Path")),
        }
    }

    /// An image, or a snapshot of a standalone canvas.
    pub fn image(&self, index: usize) -> ScriptResult<CanvasImage> {
        match self.get(index) {
            Some(Value::Image(image)) => Ok(image.clone()),
            Some(Value::Canvas(handle)) => handle
                .try_borrow()
                .map(|canvas| canvas.context().to_image())
                .map_err(|_| self.type_error(index, "a Canvas other than the target")),
            _ => Err(self.type_error(index, "an Image or Canvas")),
        }
    }

    /// Deserialize a map argument into a record.
    pub fn record<T: DeserializeOwned>(&self, index: usize, expected: &'static str) -> ScriptResult<T> {
        match self.get(index) {
            Some(value @ Value::Map(_)) => value
                .to_record()
                .ok_or_else(|| self.type_error(index, expected)),
            _ => Err(self.type_error(index, expected)),
        }
    }
}

fn describe_counts(accepted: &[usize]) -> String {
    match accepted {
        [] => "none".to_string(),
        [one] => one.to_string(),
        [init @ .., last] => {
            let init: Vec<String> = init.iter().map(usize::to_string).collect();
            format!("{} or {}", init.join(", "), last)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flow_canvas2d::Matrix2x3;
    use rstest::rstest;

    #[rstest]
    #[case(&[3], "3")]
    #[case(&[3, 5], "3 or 5")]
    #[case(&[3, 5, 9], "3, 5 or 9")]
    fn test_describe_counts(#[case] accepted: &[usize], #[case] expected: &str) {
        assert_eq!(describe_counts(accepted), expected);
    }

    #[test]
    fn test_arity_error() {
        let values = [Value::from(1.0)];
        let err = Args::new("moveTo", &values).expect_arity(&[2]).unwrap_err();
        assert!(matches!(err, ScriptError::Arity { got: 1, .. }));
        assert_eq!(err.to_string(), "moveTo: got 1 arguments, expected 2");
    }

    #[test]
    fn test_type_error_names_the_argument() {
        let values = [Value::from("ten")];
        let err = Args::new("lineTo", &values).number(0).unwrap_err();
        assert!(matches!(
            err,
            ScriptError::Type {
                index: 0,
                got: "string",
                ..
            }
        ));
    }

    #[test]
    fn test_missing_optional_bool_uses_default() {
        let args = Args::new("arc", &[]);
        assert!(args.bool_or(5, true).unwrap());
    }

    #[test]
    fn test_record_requires_map() {
        let values = [Value::from(1.0)];
        let args = Args::new("setTransform", &values);
        assert!(args.record::<Matrix2x3>(0, "a matrix").is_err());
    }

    #[test]
    fn test_number_list_rejects_mixed_items() {
        let values = [Value::List(vec![Value::from(1.0), Value::from("x")])];
        assert!(Args::new("setLineDash", &values).number_list(0).is_err());
    }
}
