//! Script object classes: static constructors and instance methods for
//! Path, Gradient, Pattern, Matrix, ImageData and standalone canvases.

use crate::args::Args;
use crate::error::{ScriptError, ScriptResult};
use crate::ops;
use crate::value::Value;
use flow_canvas2d::{ImageData, Matrix2x3, Path};
use std::cell::RefCell;
use std::rc::Rc;

/// `Path.create([svgPathData])`
pub fn create_path(args: &[Value]) -> ScriptResult<Value> {
    let args = Args::new("Path.create", args);
    args.expect_arity(&[0, 1])?;
    let path = match args.get(0) {
        None | Some(Value::Null) => Path::new(),
        Some(Value::String(data)) => Path::from_svg_path_data(data)?,
        Some(Value::Path(_)) => args.path(0)?,
        Some(_) => return Err(args.type_error(0, "SVG path data or a Path")),
    };
    Ok(Value::Path(Rc::new(RefCell::new(path))))
}

/// `Matrix.create(translateX, translateY, scaleX, scaleY, skewX, skewY)`
pub fn create_matrix(args: &[Value]) -> ScriptResult<Value> {
    let args = Args::new("Matrix.create", args);
    args.expect_arity(&[6])?;
    let matrix = Matrix2x3::from_components(
        args.number(0)?,
        args.number(1)?,
        args.number(2)?,
        args.number(3)?,
        args.number(4)?,
        args.number(5)?,
    );
    Ok(Value::from_record(&matrix))
}

/// `ImageData.create(width, height[, settings])`, or `ImageData.create(imageData)`
/// for a blank buffer of the same size and color space.
pub fn create_image_data(args: &[Value]) -> ScriptResult<Value> {
    let args = Args::new("ImageData.create", args);
    args.expect_arity(&[1, 2, 3])?;
    let data = if args.len() == 1 {
        let source: ImageData = args.record(0, "an ImageData map")?;
        ImageData::blank(source.width, source.height, Some(&source.color_space))?
    } else {
        ImageData::blank(
            args.size(0)?,
            args.size(1)?,
            ops::color_space_setting(args, 2)?,
        )?
    };
    Ok(Value::from_record(&data))
}

/// Invoke `method` on an object value.
///
/// Canvas handles forward to their context's operation table, so every
/// context operation is also a method of a standalone canvas.
pub fn call_method(target: &Value, method: &str, args: &[Value]) -> ScriptResult<Value> {
    match target {
        Value::Path(handle) => {
            let (name, op) = ops::path_op(method)
                .ok_or_else(|| unknown_method("Path", method))?;
            // Arguments may hold the same handle, so work on a copy.
            let mut path = handle
                .try_borrow()
                .map_err(|_| busy(name))?
                .clone();
            let result = op(&mut path, Args::new(name, args))?;
            *handle.try_borrow_mut().map_err(|_| busy(name))? = path;
            Ok(result)
        }
        Value::Gradient(handle) if method == "addColorStop" => {
            let args = Args::new("addColorStop", args);
            args.expect_arity(&[2])?;
            let (offset, color) = (args.number(0)?, args.string(1)?);
            handle
                .try_borrow_mut()
                .map_err(|_| busy("addColorStop"))?
                .add_color_stop(offset, color)?;
            Ok(Value::Null)
        }
        Value::Pattern(handle) if method == "setTransform" => {
            let args = Args::new("setTransform", args);
            args.expect_arity(&[0, 1])?;
            let matrix = match args.get(0) {
                None | Some(Value::Null) => Matrix2x3::identity(),
                Some(_) => args.record(0, "a matrix map")?,
            };
            handle
                .try_borrow_mut()
                .map_err(|_| busy("setTransform"))?
                .set_transform(matrix);
            Ok(Value::Null)
        }
        Value::Canvas(handle) => handle
            .try_borrow_mut()
            .map_err(|_| busy(method))?
            .call(method, args),
        other => Err(unknown_method(other.type_name(), method)),
    }
}

fn unknown_method(class: &str, method: &str) -> ScriptError {
    ScriptError::UnknownOperation(format!("{}.{}", class, method))
}

fn busy(op: &str) -> ScriptError {
    ScriptError::Type {
        op: op.to_string(),
        index: 0,
        expected: "an object not already in use",
        got: "an object in use",
    }
}
