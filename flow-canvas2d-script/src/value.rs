//! Values exchanged with scripts.
//!
//! Plain data (numbers, strings, lists, maps) round-trips through
//! `serde_json::Value`; engine objects travel as shared handles.

use crate::canvas::ScriptCanvas;
use flow_canvas2d::{CanvasImage, GradientHandle, Path, PatternHandle};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

/// Shared path object created by `Path.create`.
pub type PathHandle = Rc<RefCell<Path>>;

/// Shared standalone canvas created by `Canvas.create`.
pub type CanvasHandle = Rc<RefCell<ScriptCanvas>>;

/// A script value.
#[derive(Debug, Clone, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    List(Vec<Value>),
    Map(BTreeMap<String, Value>),
    Path(PathHandle),
    Gradient(GradientHandle),
    Pattern(PatternHandle),
    Image(CanvasImage),
    Canvas(CanvasHandle),
}

impl Value {
    /// Name of the value kind, used in type errors.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::List(_) => "list",
            Value::Map(_) => "map",
            Value::Path(_) => "Path",
            Value::Gradient(_) => "Gradient",
            Value::Pattern(_) => "Pattern",
            Value::Image(_) => "Image",
            Value::Canvas(_) => "Canvas",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&BTreeMap<String, Value>> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Convert plain JSON data.
    pub fn from_json(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => n.as_f64().map_or(Value::Null, Value::Number),
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::List(items.into_iter().map(Value::from_json).collect())
            }
            serde_json::Value::Object(map) => Value::Map(
                map.into_iter()
                    .map(|(k, v)| (k, Value::from_json(v)))
                    .collect(),
            ),
        }
    }

    /// Convert to JSON. Engine handles have no JSON form and yield `None`.
    pub fn to_json(&self) -> Option<serde_json::Value> {
        Some(match self {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(*b),
            // Integral numbers go out as integers so byte and size fields deserialize
            Value::Number(n) if n.fract() == 0.0 && n.abs() < 9.0e15 => {
                serde_json::Value::Number((*n as i64).into())
            }
            Value::Number(n) => serde_json::Number::from_f64(*n)
                .map_or(serde_json::Value::Null, serde_json::Value::Number),
            Value::String(s) => serde_json::Value::String(s.clone()),
            Value::List(items) => serde_json::Value::Array(
                items
                    .iter()
                    .map(Value::to_json)
                    .collect::<Option<Vec<_>>>()?,
            ),
            Value::Map(map) => serde_json::Value::Object(
                map.iter()
                    .map(|(k, v)| Some((k.clone(), v.to_json()?)))
                    .collect::<Option<serde_json::Map<_, _>>>()?,
            ),
            _ => return None,
        })
    }

    /// Build a map value from a serializable record.
    pub fn from_record<T: Serialize>(record: &T) -> Self {
        // Plain records always serialize; a failure reads back as null
        serde_json::to_value(record)
            .map(Value::from_json)
            .unwrap_or_default()
    }

    /// Read a record out of a map value.
    pub fn to_record<T: DeserializeOwned>(&self) -> Option<T> {
        serde_json::from_value(self.to_json()?).ok()
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Map(a), Value::Map(b)) => a == b,
            (Value::Path(a), Value::Path(b)) => Rc::ptr_eq(a, b),
            (Value::Gradient(a), Value::Gradient(b)) => Rc::ptr_eq(a, b),
            (Value::Pattern(a), Value::Pattern(b)) => Rc::ptr_eq(a, b),
            (Value::Canvas(a), Value::Canvas(b)) => Rc::ptr_eq(a, b),
            (Value::Image(a), Value::Image(b)) => {
                a.width() == b.width() && a.height() == b.height() && a.to_rgba() == b.to_rgba()
            }
            _ => false,
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<f32> for Value {
    fn from(n: f32) -> Self {
        Value::Number(n as f64)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}

impl From<CanvasImage> for Value {
    fn from(image: CanvasImage) -> Self {
        Value::Image(image)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flow_canvas2d::{ImageData, Matrix2x3};
    use serde_json::json;

    #[test]
    fn test_json_round_trip() {
        let json = json!({"a": [1, "two", true, null], "b": {"c": 3.5}});
        let value = Value::from_json(json.clone());
        assert_eq!(value.to_json(), Some(json));
    }

    #[test]
    fn test_handles_have_no_json_form() {
        let value = Value::List(vec![Value::Path(Default::default())]);
        assert_eq!(value.to_json(), None);
    }

    #[test]
    fn test_matrix_record() {
        let value = Value::from_record(&Matrix2x3::new(1.0, 2.0, 3.0, 4.0, 5.0, 6.0));
        assert_eq!(value.as_map().unwrap()["e"], Value::Number(5.0));
        let back: Matrix2x3 = value.to_record().unwrap();
        assert_eq!(back, Matrix2x3::new(1.0, 2.0, 3.0, 4.0, 5.0, 6.0));
    }

    #[test]
    fn test_image_data_record_uses_wire_names() {
        let value = Value::from_record(&ImageData::new(1, 1, None));
        let map = value.as_map().unwrap();
        assert_eq!(map["colorSpace"], Value::from("srgb"));
        assert_eq!(map["data"].as_list().unwrap().len(), 4);
    }

    #[test]
    fn test_type_names() {
        assert_eq!(Value::Null.type_name(), "null");
        assert_eq!(Value::from(1.0).type_name(), "number");
        assert_eq!(Value::from("x").type_name(), "string");
        assert_eq!(Value::Map(Default::default()).type_name(), "map");
    }
}
