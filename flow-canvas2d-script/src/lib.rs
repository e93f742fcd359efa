//! Scripting boundary for flow-canvas2d.
//!
//! Scripts reach a [`DrawingContext`](flow_canvas2d::DrawingContext) through
//! [`ScriptCanvas::call`], which looks the operation up in a fixed name table
//! and resolves overloads by argument count and kind. Properties are read and
//! written with [`ScriptCanvas::get`] and [`ScriptCanvas::set`].
//!
//! [`ScriptHost`] provides the static classes (`Path.create`,
//! `Matrix.create`, `ImageData.create`, `Canvas.create`, `Image.loadImage`)
//! and [`FrameDriver`] swaps host surfaces in and out once per frame.

mod args;
mod canvas;
mod error;
mod host;
mod loader;
mod objects;
mod ops;
mod value;

pub use args::Args;
pub use canvas::ScriptCanvas;
pub use error::{ScriptError, ScriptResult};
pub use host::{FrameDriver, ScriptHost};
pub use loader::{decode_image, FileImageLoader, ImageLoader};
pub use objects::{call_method, create_image_data, create_matrix, create_path};
pub use ops::context_op_names;
pub use value::{CanvasHandle, PathHandle, Value};
