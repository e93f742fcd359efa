//! Blocking image loading for `Image.loadImage`.

use crate::error::{ScriptError, ScriptResult};
use flow_canvas2d::CanvasImage;
use std::path::PathBuf;

/// Resolves an image reference to decoded pixels.
///
/// `load` blocks until the image is available. A failed load is returned as
/// [`ScriptError::ImageLoad`] and aborts the calling script operation.
pub trait ImageLoader {
    fn load(&self, url: &str) -> ScriptResult<CanvasImage>;
}

/// Loads images from the local file system.
///
/// Accepts plain paths and `file://` URLs. Relative paths are resolved
/// against `base_dir` when one is set.
#[derive(Debug, Clone, Default)]
pub struct FileImageLoader {
    base_dir: Option<PathBuf>,
}

impl FileImageLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_base_dir(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: Some(base_dir.into()),
        }
    }

    fn resolve(&self, url: &str) -> PathBuf {
        let path = PathBuf::from(url.strip_prefix("file://").unwrap_or(url));
        match &self.base_dir {
            Some(base) if path.is_relative() => base.join(path),
            _ => path,
        }
    }
}

impl ImageLoader for FileImageLoader {
    fn load(&self, url: &str) -> ScriptResult<CanvasImage> {
        let path = self.resolve(url);
        log::debug!(target: "canvas", "loadImage {}", path.display());
        let bytes = std::fs::read(&path).map_err(|e| ScriptError::ImageLoad {
            url: url.to_string(),
            reason: e.to_string(),
        })?;
        decode_image(&bytes).map_err(|reason| ScriptError::ImageLoad {
            url: url.to_string(),
            reason,
        })
    }
}

/// Decode PNG or JPEG bytes into an image.
pub fn decode_image(bytes: &[u8]) -> Result<CanvasImage, String> {
    let img = image::load_from_memory(bytes)
        .map_err(|e| format!("Failed to decode image: {}", e))?;
    let rgba = img.to_rgba8();
    CanvasImage::from_rgba(rgba.width(), rgba.height(), rgba.as_raw()).map_err(|e| e.to_string())
}
