//! Host side of the script boundary.

use crate::args::Args;
use crate::canvas::ScriptCanvas;
use crate::error::{ScriptError, ScriptResult};
use crate::loader::{FileImageLoader, ImageLoader};
use crate::objects;
use crate::value::Value;
use flow_canvas2d::{DrawingContext, FontConfig, ResolvedFontConfig};
use std::cell::RefCell;
use std::rc::Rc;
use tiny_skia::Pixmap;

/// Resolves the static classes scripts can reach (`Path`, `Matrix`,
/// `ImageData`, `Canvas`, `Image`) and owns what they need: a resolved font
/// database for new canvases and an image loader.
pub struct ScriptHost {
    fonts: ResolvedFontConfig,
    loader: Box<dyn ImageLoader>,
}

impl std::fmt::Debug for ScriptHost {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScriptHost")
            .field("fonts", &self.fonts)
            .finish_non_exhaustive()
    }
}

impl ScriptHost {
    /// A host loading images from the file system.
    pub fn new(config: &FontConfig) -> Self {
        Self::with_loader(config, Box::new(FileImageLoader::new()))
    }

    pub fn with_loader(config: &FontConfig, loader: Box<dyn ImageLoader>) -> Self {
        Self {
            fonts: config.resolve(),
            loader,
        }
    }

    pub fn fonts(&self) -> &ResolvedFontConfig {
        &self.fonts
    }

    /// A context with its own surface, sharing the host's fonts.
    pub fn create_context(&self, width: u32, height: u32) -> ScriptResult<ScriptCanvas> {
        let ctx = DrawingContext::with_resolved(width, height, &self.fonts)?;
        Ok(ScriptCanvas::new(ctx))
    }

    /// `Canvas.create(width, height)`
    pub fn create_canvas(&self, width: u32, height: u32) -> ScriptResult<Value> {
        let canvas = self.create_context(width, height)?;
        Ok(Value::Canvas(Rc::new(RefCell::new(canvas))))
    }

    /// `Image.loadImage(url)`. Blocks until the loader returns.
    pub fn load_image(&self, url: &str) -> ScriptResult<Value> {
        Ok(Value::Image(self.loader.load(url)?))
    }

    /// Call a static function such as `Path.create`.
    pub fn call_static(&self, class: &str, name: &str, args: &[Value]) -> ScriptResult<Value> {
        log::trace!(target: "canvas", "{}.{} ({} args)", class, name, args.len());
        match (class, name) {
            ("Path", "create") => objects::create_path(args),
            ("Matrix", "create") => objects::create_matrix(args),
            ("ImageData", "create") => objects::create_image_data(args),
            ("Canvas", "create") => {
                let args = Args::new("Canvas.create", args);
                args.expect_arity(&[2])?;
                self.create_canvas(args.size(0)?, args.size(1)?)
            }
            ("Image", "loadImage") => {
                let args = Args::new("Image.loadImage", args);
                args.expect_arity(&[1])?;
                self.load_image(args.string(0)?)
            }
            _ => Err(ScriptError::UnknownOperation(format!("{}.{}", class, name))),
        }
    }

    /// Call a method of an object value.
    pub fn call_method(&self, target: &Value, method: &str, args: &[Value]) -> ScriptResult<Value> {
        objects::call_method(target, method, args)
    }
}

/// Drives a script canvas over surfaces handed in one frame at a time.
///
/// Each frame swaps the host's surface into the context, runs the draw
/// callback and swaps it back out. Properties, the current path and saved
/// states persist between frames. Transform and clip start fresh, and saved
/// states lose theirs too, so a `restore` in a later frame never brings back
/// a transform or clip set against an earlier surface.
#[derive(Debug)]
pub struct FrameDriver {
    canvas: ScriptCanvas,
    frames: u64,
}

impl FrameDriver {
    pub fn new(canvas: ScriptCanvas) -> Self {
        Self { canvas, frames: 0 }
    }

    pub fn canvas(&self) -> &ScriptCanvas {
        &self.canvas
    }

    pub fn canvas_mut(&mut self) -> &mut ScriptCanvas {
        &mut self.canvas
    }

    /// Number of frames rendered so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Draw one frame onto `surface` and hand it back.
    ///
    /// The surface is returned to the caller's ownership even when `draw`
    /// fails; the error is reported alongside it.
    pub fn render_frame<F>(&mut self, surface: Pixmap, draw: F) -> (Pixmap, ScriptResult<()>)
    where
        F: FnOnce(&mut ScriptCanvas) -> ScriptResult<()>,
    {
        let previous = self.canvas.context_mut().set_surface(surface);
        let result = draw(&mut self.canvas);
        let drawn = self.canvas.context_mut().set_surface(previous);
        self.frames += 1;
        if let Err(e) = &result {
            log::warn!(target: "canvas", "frame {} failed: {}", self.frames, e);
        }
        (drawn, result)
    }
}
