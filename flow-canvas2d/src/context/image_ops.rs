//! Image drawing, pixel access and PNG output for DrawingContext.

use super::DrawingContext;
use crate::error::Canvas2dResult;
use crate::geometry::{DirtyRect, ImageCropParams};
use crate::image::{premultiply, unpremultiply, CanvasImage, ImageData, DEFAULT_COLOR_SPACE};
use tiny_skia::{Paint, PathBuilder, Rect, SpreadMode, Transform};

impl DrawingContext {
    /// Draw `image` at its natural size with its top-left corner at (dx, dy).
    pub fn draw_image(&mut self, image: &CanvasImage, dx: f32, dy: f32) -> Canvas2dResult<()> {
        let (w, h) = (image.width() as f32, image.height() as f32);
        self.draw_image_scaled(image, dx, dy, w, h)
    }

    /// Draw `image` stretched over the destination rectangle.
    pub fn draw_image_scaled(
        &mut self,
        image: &CanvasImage,
        dx: f32,
        dy: f32,
        dw: f32,
        dh: f32,
    ) -> Canvas2dResult<()> {
        let (sw, sh) = (image.width() as f32, image.height() as f32);
        self.draw_image_cropped(
            image,
            &ImageCropParams {
                sx: 0.0,
                sy: 0.0,
                sw,
                sh,
                dx,
                dy,
                dw,
                dh,
            },
        )
    }

    /// Draw the source rectangle of `image` into the destination rectangle.
    pub fn draw_image_cropped(
        &mut self,
        image: &CanvasImage,
        params: &ImageCropParams,
    ) -> Canvas2dResult<()> {
        let ImageCropParams {
            sx,
            sy,
            sw,
            sh,
            dx,
            dy,
            dw,
            dh,
        } = *params;
        log::debug!(target: "canvas", "drawImage {}x{} -> {} {} {} {}", image.width(), image.height(), dx, dy, dw, dh);
        if sw == 0.0 || sh == 0.0 || dw == 0.0 || dh == 0.0 {
            return Ok(());
        }

        let Some(dest) = Rect::from_ltrb(dx.min(dx + dw), dy.min(dy + dh), dx.max(dx + dw), dy.max(dy + dh))
        else {
            return Ok(());
        };
        let image_paint = self.paint_resolver().resolve_image_paint()?;
        let pixmap_paint = image_paint.pixmap_paint;

        // Map the source rectangle onto the destination rectangle
        let shader_transform = Transform::from_translate(dx, dy)
            .pre_scale(dw / sw, dh / sh)
            .pre_translate(-sx, -sy);
        let path = PathBuilder::from_rect(dest);
        let ctm: Transform = self.state.transform.into();
        let source = image.clone();

        self.composite(
            pixmap_paint.blend_mode,
            image_paint.shadow,
            None,
            |target, blend, mask| {
                let paint = Paint {
                    shader: tiny_skia::Pattern::new(
                        source.pixmap().as_ref(),
                        SpreadMode::Pad,
                        pixmap_paint.quality,
                        pixmap_paint.opacity,
                        shader_transform,
                    ),
                    blend_mode: blend,
                    anti_alias: true,
                    ..Default::default()
                };
                target.fill_path(&path, &paint, tiny_skia::FillRule::Winding, ctm, mask);
            },
        );
        Ok(())
    }

    // --- Image data ---

    /// Create a transparent pixel buffer.
    pub fn create_image_data(
        &self,
        width: u32,
        height: u32,
        color_space: Option<&str>,
    ) -> Canvas2dResult<ImageData> {
        ImageData::blank(width, height, color_space)
    }

    /// Copy the whole surface as straight-alpha RGBA.
    pub fn to_image_data(&self) -> ImageData {
        ImageData {
            width: self.surface.width(),
            height: self.surface.height(),
            color_space: DEFAULT_COLOR_SPACE.to_string(),
            data: unpremultiply(self.surface.pixels()),
        }
    }

    /// Snapshot the surface as an image handle.
    pub fn to_image(&self) -> CanvasImage {
        CanvasImage::from_pixmap(self.surface.clone())
    }

    /// Write pixels directly, bypassing transform, clip, alpha and compositing.
    ///
    /// With `dirty`, only that rectangle of the source is written, still
    /// positioned relative to (dx, dy).
    pub fn put_image_data(
        &mut self,
        image_data: &ImageData,
        dx: i32,
        dy: i32,
        dirty: Option<&DirtyRect>,
    ) -> Canvas2dResult<()> {
        image_data.validate()?;
        let (iw, ih) = (image_data.width as i64, image_data.height as i64);
        let DirtyRect {
            x,
            y,
            width,
            height,
        } = dirty.copied().unwrap_or(DirtyRect {
            x: 0,
            y: 0,
            width: iw as i32,
            height: ih as i32,
        });

        // Negative sizes extend left/up from the dirty origin
        let (mut x0, mut w) = (x as i64, width as i64);
        if w < 0 {
            x0 += w;
            w = -w;
        }
        let (mut y0, mut h) = (y as i64, height as i64);
        if h < 0 {
            y0 += h;
            h = -h;
        }
        let (x1, y1) = ((x0 + w).min(iw), (y0 + h).min(ih));
        let (x0, y0) = (x0.max(0), y0.max(0));
        if x1 <= x0 || y1 <= y0 {
            return Ok(());
        }

        let (sw, sh) = (self.surface.width() as i64, self.surface.height() as i64);
        let pixels = self.surface.pixels_mut();
        for row in y0..y1 {
            let ty = dy as i64 + row;
            if ty < 0 || ty >= sh {
                continue;
            }
            for col in x0..x1 {
                let tx = dx as i64 + col;
                if tx < 0 || tx >= sw {
                    continue;
                }
                let src = ((row * iw + col) * 4) as usize;
                let rgba = &image_data.data[src..src + 4];
                pixels[(ty * sw + tx) as usize] = premultiply(rgba[0], rgba[1], rgba[2], rgba[3]);
            }
        }
        Ok(())
    }

    /// Encode the surface as PNG.
    pub fn to_png(&self) -> Canvas2dResult<Vec<u8>> {
        let mut buf = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut buf, self.surface.width(), self.surface.height());
            encoder.set_color(png::ColorType::Rgba);
            encoder.set_depth(png::BitDepth::Eight);
            let mut writer = encoder.write_header()?;
            writer.write_image_data(&unpremultiply(self.surface.pixels()))?;
        }
        Ok(buf)
    }
}
