//! Image handles and the ImageData pixel buffer.

use crate::context::check_dimensions;
use crate::error::{Canvas2dError, Canvas2dResult};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tiny_skia::{Pixmap, PremultipliedColorU8};

/// Color space tag of buffers created without explicit settings.
pub const DEFAULT_COLOR_SPACE: &str = "srgb";

/// A decoded image ready to be drawn or used as a pattern source.
///
/// Pixels are stored premultiplied and shared, so handles are cheap to clone.
#[derive(Clone)]
pub struct CanvasImage {
    pixmap: Arc<Pixmap>,
}

impl std::fmt::Debug for CanvasImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CanvasImage")
            .field("width", &self.width())
            .field("height", &self.height())
            .finish()
    }
}

impl CanvasImage {
    /// Wrap non-premultiplied RGBA pixels.
    pub fn from_rgba(width: u32, height: u32, data: &[u8]) -> Canvas2dResult<Self> {
        let expected = (width as usize).saturating_mul(height as usize).saturating_mul(4);
        if data.len() != expected {
            return Err(Canvas2dError::ImageError(format!(
                "Data length {} does not match expected {} for {}x{} RGBA image",
                data.len(),
                expected,
                width,
                height
            )));
        }
        let mut pixmap =
            Pixmap::new(width, height).ok_or(Canvas2dError::InvalidDimensions { width, height })?;
        for (pixel, rgba) in pixmap.pixels_mut().iter_mut().zip(data.chunks_exact(4)) {
            *pixel = premultiply(rgba[0], rgba[1], rgba[2], rgba[3]);
        }
        Ok(Self::from_pixmap(pixmap))
    }

    /// Wrap an already premultiplied pixmap.
    pub fn from_pixmap(pixmap: Pixmap) -> Self {
        Self {
            pixmap: Arc::new(pixmap),
        }
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    pub(crate) fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    /// Non-premultiplied RGBA copy of the pixels.
    pub fn to_rgba(&self) -> Vec<u8> {
        unpremultiply(self.pixmap.pixels())
    }
}

/// Pixel buffer exchanged with scripts.
///
/// Serializes as `{width, height, colorSpace, data}` where `data` holds
/// `width * height * 4` non-premultiplied RGBA bytes in row-major order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageData {
    pub width: u32,
    pub height: u32,
    pub color_space: String,
    pub data: Vec<u8>,
}

impl ImageData {
    /// Create a zero-filled buffer.
    pub fn new(width: u32, height: u32, color_space: Option<&str>) -> Self {
        Self {
            width,
            height,
            color_space: color_space.unwrap_or(DEFAULT_COLOR_SPACE).to_string(),
            data: vec![0u8; width as usize * height as usize * 4],
        }
    }

    /// Create a zero-filled buffer, rejecting sizes a surface could not have.
    pub fn blank(width: u32, height: u32, color_space: Option<&str>) -> Canvas2dResult<Self> {
        check_dimensions(width, height)?;
        Ok(Self::new(width, height, color_space))
    }

    /// Copy the pixels of a decoded image.
    pub fn from_image(image: &CanvasImage) -> Self {
        Self {
            width: image.width(),
            height: image.height(),
            color_space: DEFAULT_COLOR_SPACE.to_string(),
            data: image.to_rgba(),
        }
    }

    /// Check that the byte length matches the dimensions.
    pub fn validate(&self) -> Canvas2dResult<()> {
        let expected = (self.width as usize)
            .checked_mul(self.height as usize)
            .and_then(|n| n.checked_mul(4));
        if expected == Some(self.data.len()) {
            Ok(())
        } else {
            Err(Canvas2dError::ImageError(format!(
                "ImageData of {}x{} does not fit its {} data bytes",
                self.width,
                self.height,
                self.data.len()
            )))
        }
    }
}

/// Convert straight alpha to premultiplied using integer math.
pub(crate) fn premultiply(r: u8, g: u8, b: u8, a: u8) -> PremultipliedColorU8 {
    let (pr, pg, pb) = match a {
        255 => (r, g, b),
        0 => (0, 0, 0),
        _ => {
            let a16 = a as u16;
            (
                ((r as u16 * a16 + 127) / 255) as u8,
                ((g as u16 * a16 + 127) / 255) as u8,
                ((b as u16 * a16 + 127) / 255) as u8,
            )
        }
    };
    // Channels never exceed alpha after the scaling above.
    PremultipliedColorU8::from_rgba(pr, pg, pb, a).unwrap_or(PremultipliedColorU8::TRANSPARENT)
}

/// Convert premultiplied pixels to straight-alpha RGBA bytes.
pub(crate) fn unpremultiply(pixels: &[PremultipliedColorU8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(pixels.len() * 4);
    for p in pixels {
        let c = p.demultiply();
        out.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
    }
    out
}
