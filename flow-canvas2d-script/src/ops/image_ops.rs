//! Image drawing and pixel buffers.

use super::{ContextOp, Table};
use crate::args::Args;
use crate::error::ScriptResult;
use crate::value::Value;
use flow_canvas2d::{DirtyRect, DrawingContext, ImageCropParams, ImageData};

pub(super) fn register(table: &mut Table<ContextOp>) {
    table.insert("drawImage", draw_image);
    table.insert("putImageData", put_image_data);
    table.insert("createImageData", create_image_data);
    table.insert("toImageData", to_image_data);
    table.insert("toImage", to_image);
}

/// `drawImage(img, dx, dy)`, `(img, dx, dy, dw, dh)` or
/// `(img, sx, sy, sw, sh, dx, dy, dw, dh)`.
fn draw_image(ctx: &mut DrawingContext, args: Args<'_>) -> ScriptResult<Value> {
    args.expect_arity(&[3, 5, 9])?;
    let image = args.image(0)?;
    match args.len() {
        3 => ctx.draw_image(&image, args.number(1)?, args.number(2)?)?,
        5 => ctx.draw_image_scaled(
            &image,
            args.number(1)?,
            args.number(2)?,
            args.number(3)?,
            args.number(4)?,
        )?,
        _ => ctx.draw_image_cropped(
            &image,
            &ImageCropParams {
                sx: args.number(1)?,
                sy: args.number(2)?,
                sw: args.number(3)?,
                sh: args.number(4)?,
                dx: args.number(5)?,
                dy: args.number(6)?,
                dw: args.number(7)?,
                dh: args.number(8)?,
            },
        )?,
    }
    Ok(Value::Null)
}

/// `putImageData(imageData, dx, dy[, dirtyX, dirtyY, dirtyWidth, dirtyHeight])`
fn put_image_data(ctx: &mut DrawingContext, args: Args<'_>) -> ScriptResult<Value> {
    args.expect_arity(&[3, 7])?;
    let data: ImageData = args.record(0, "an ImageData map")?;
    let dirty = match args.len() {
        7 => Some(DirtyRect {
            x: args.int(3)?,
            y: args.int(4)?,
            width: args.int(5)?,
            height: args.int(6)?,
        }),
        _ => None,
    };
    ctx.put_image_data(&data, args.int(1)?, args.int(2)?, dirty.as_ref())?;
    Ok(Value::Null)
}

/// `createImageData(width, height[, {colorSpace}])`
fn create_image_data(ctx: &mut DrawingContext, args: Args<'_>) -> ScriptResult<Value> {
    args.expect_arity(&[2, 3])?;
    let color_space = color_space_setting(args, 2)?;
    let data = ctx.create_image_data(args.size(0)?, args.size(1)?, color_space)?;
    Ok(Value::from_record(&data))
}

/// Read `settings.colorSpace` from an optional settings map.
pub(crate) fn color_space_setting<'a>(args: Args<'a>, index: usize) -> ScriptResult<Option<&'a str>> {
    match args.get(index) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Map(settings)) => match settings.get("colorSpace") {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(space)) => Ok(Some(space.as_str())),
            Some(_) => Err(args.type_error(index, "settings with a string colorSpace")),
        },
        Some(_) => Err(args.type_error(index, "a settings map")),
    }
}

fn to_image_data(ctx: &mut DrawingContext, args: Args<'_>) -> ScriptResult<Value> {
    args.expect_arity(&[0])?;
    Ok(Value::from_record(&ctx.to_image_data()))
}

fn to_image(ctx: &mut DrawingContext, args: Args<'_>) -> ScriptResult<Value> {
    args.expect_arity(&[0])?;
    Ok(Value::Image(ctx.to_image()))
}
