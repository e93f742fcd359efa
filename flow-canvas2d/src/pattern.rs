//! Pattern descriptors.

use crate::image::CanvasImage;
use crate::matrix::Matrix2x3;
use tiny_skia::{Pixmap, SpreadMode};

/// How a pattern continues past the image edge along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileMode {
    Repeat,
    /// Extend the edge pixels.
    Clamp,
}

impl From<TileMode> for SpreadMode {
    fn from(mode: TileMode) -> Self {
        match mode {
            TileMode::Repeat => SpreadMode::Repeat,
            TileMode::Clamp => SpreadMode::Pad,
        }
    }
}

/// Map a repetition string to `(x, y)` tile modes.
pub fn tile_modes_from_repetition(repetition: &str) -> (TileMode, TileMode) {
    match repetition {
        "repeat" => (TileMode::Repeat, TileMode::Repeat),
        "repeat-x" => (TileMode::Repeat, TileMode::Clamp),
        "repeat-y" => (TileMode::Clamp, TileMode::Repeat),
        _ => (TileMode::Clamp, TileMode::Clamp),
    }
}

/// Image-backed paint source with independent tiling per axis.
#[derive(Debug, Clone)]
pub struct CanvasPattern {
    image: CanvasImage,
    tile_x: TileMode,
    tile_y: TileMode,
    transform: Matrix2x3,
}

impl CanvasPattern {
    pub fn new(image: CanvasImage, repetition: &str) -> Self {
        let (tile_x, tile_y) = tile_modes_from_repetition(repetition);
        Self {
            image,
            tile_x,
            tile_y,
            transform: Matrix2x3::identity(),
        }
    }

    /// Replace the pattern-space to user-space transform.
    pub fn set_transform(&mut self, transform: Matrix2x3) {
        self.transform = transform;
    }

    pub fn transform(&self) -> Matrix2x3 {
        self.transform
    }

    pub fn tile_modes(&self) -> (TileMode, TileMode) {
        (self.tile_x, self.tile_y)
    }

    pub fn image(&self) -> &CanvasImage {
        &self.image
    }

    /// Spread mode when both axes tile the same way, so the backend pattern
    /// shader can be used directly.
    pub(crate) fn uniform_spread(&self) -> Option<SpreadMode> {
        (self.tile_x == self.tile_y).then(|| self.tile_x.into())
    }

    /// Rasterize mixed tiling into a device-space pixmap covering the surface.
    pub(crate) fn rasterize(&self, ctm: &Matrix2x3, width: u32, height: u32) -> Option<Pixmap> {
        let Some(inverse) = ctm.multiply(&self.transform).invert() else {
            log::warn!(target: "canvas", "pattern under non-invertible transform");
            return None;
        };
        let source = self.image.pixmap();
        let (iw, ih) = (source.width() as i64, source.height() as i64);
        let src = source.pixels();
        let mut pixmap = Pixmap::new(width, height)?;
        let pixels = pixmap.pixels_mut();
        for py in 0..height {
            for px in 0..width {
                let (ix, iy) = inverse.map_point(px as f32 + 0.5, py as f32 + 0.5);
                let sx = wrap(ix.floor() as i64, iw, self.tile_x);
                let sy = wrap(iy.floor() as i64, ih, self.tile_y);
                pixels[(py * width + px) as usize] = src[(sy * iw + sx) as usize];
            }
        }
        Some(pixmap)
    }
}

fn wrap(coord: i64, size: i64, mode: TileMode) -> i64 {
    match mode {
        TileMode::Repeat => coord.rem_euclid(size),
        TileMode::Clamp => coord.clamp(0, size - 1),
    }
}
