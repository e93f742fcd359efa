//! Fill, stroke, clip and rectangle operations for DrawingContext.

use super::DrawingContext;
use crate::error::Canvas2dResult;
use crate::geometry::RectParams;
use crate::path::Path;
use crate::shadow::ShadowParams;
use crate::state::ClipRegion;
use crate::style::FillType;
use tiny_skia::{BlendMode, FilterQuality, Mask, Pixmap, PixmapPaint, Transform};

fn fill_type(fill_rule: Option<&str>) -> FillType {
    fill_rule.map(FillType::from_rule_name).unwrap_or_default()
}

fn rect_path(params: &RectParams) -> Path {
    let mut path = Path::new();
    path.rect(params);
    path
}

/// Coverage mask of `path` under `fill_type`, in device space.
fn coverage_mask(
    path: Option<&tiny_skia::Path>,
    fill_type: FillType,
    transform: Transform,
    width: u32,
    height: u32,
) -> Option<Mask> {
    let mut mask = Mask::new(width, height)?;
    if let Some(path) = path {
        mask.fill_path(path, fill_type.base_rule(), true, transform);
    }
    if fill_type.is_inverse() {
        for value in mask.data_mut() {
            *value = 255 - *value;
        }
    }
    Some(mask)
}

fn intersect(a: Option<&Mask>, b: Option<&Mask>) -> Option<Mask> {
    match (a, b) {
        (None, None) => None,
        (Some(m), None) | (None, Some(m)) => Some(m.clone()),
        (Some(a), Some(b)) => {
            let mut out = a.clone();
            for (dst, src) in out.data_mut().iter_mut().zip(b.data()) {
                *dst = ((*dst as u16 * *src as u16 + 127) / 255) as u8;
            }
            Some(out)
        }
    }
}

impl DrawingContext {
    // --- Clipping ---

    /// Intersect the clip with the current path or `path`.
    pub fn clip(&mut self, path: Option<&Path>, fill_rule: Option<&str>) {
        log::debug!(target: "canvas", "clip {:?}", fill_rule);
        let source = path.unwrap_or(&self.path);
        let device_path = source
            .to_skia()
            .and_then(|p| p.transform(self.state.transform.into()));
        self.state.clips.push(ClipRegion {
            path: device_path,
            fill_type: fill_type(fill_rule),
        });
    }

    /// Mask for the active clips, `None` when unclipped.
    pub(crate) fn clip_mask(&self) -> Option<Mask> {
        let (width, height) = self.get_size();
        self.state.clips.iter().fold(None, |acc, clip| {
            let mask = coverage_mask(
                clip.path.as_ref(),
                clip.fill_type,
                Transform::identity(),
                width,
                height,
            )?;
            Some(match acc {
                Some(acc) => intersect(Some(&acc), Some(&mask)).unwrap_or(mask),
                None => mask,
            })
        })
    }

    /// Run `draw` against the surface, preceded by a shadow pass when one
    /// is active. `draw` receives the target, the blend mode to use and the
    /// mask limiting the draw.
    pub(crate) fn composite<F>(
        &mut self,
        blend_mode: BlendMode,
        shadow: Option<ShadowParams>,
        shape_mask: Option<&Mask>,
        draw: F,
    ) where
        F: Fn(&mut Pixmap, BlendMode, Option<&Mask>),
    {
        let clip = self.clip_mask();
        let mask = intersect(shape_mask, clip.as_ref());

        if let Some(shadow) = shadow {
            let (width, height) = self.get_size();
            if let Some(mut layer) = Pixmap::new(width, height) {
                draw(&mut layer, BlendMode::SourceOver, shape_mask);
                if let Some(cast) = shadow.cast(&layer) {
                    let paint = PixmapPaint {
                        opacity: 1.0,
                        blend_mode,
                        quality: FilterQuality::Nearest,
                    };
                    self.surface.draw_pixmap(
                        0,
                        0,
                        cast.as_ref(),
                        &paint,
                        Transform::identity(),
                        mask.as_ref(),
                    );
                }
            }
        }

        draw(&mut self.surface, blend_mode, mask.as_ref());
    }

    // --- Drawing operations ---

    /// Fill the current path or `path`.
    ///
    /// Without a rule the non-zero winding rule applies. An explicit
    /// `"evenodd"` selects winding; any other explicit rule paints the area
    /// outside the path.
    pub fn fill(&mut self, path: Option<&Path>, fill_rule: Option<&str>) -> Canvas2dResult<()> {
        log::debug!(target: "canvas", "fill {:?}", fill_rule);
        let source = path.unwrap_or(&self.path).to_skia();
        self.fill_skia_path(source, fill_type(fill_rule))
    }

    pub(crate) fn fill_skia_path(
        &mut self,
        path: Option<tiny_skia::Path>,
        fill_type: FillType,
    ) -> Canvas2dResult<()> {
        let Some(paint) = self.paint_resolver().resolve_fill_paint()? else {
            return Ok(());
        };
        let ctm: Transform = self.state.transform.into();
        let (width, height) = self.get_size();

        if !fill_type.is_inverse() {
            let Some(path) = path else {
                return Ok(());
            };
            self.composite(paint.blend_mode, paint.shadow, None, |target, blend, mask| {
                target.fill_path(&path, &paint.paint_with(blend), fill_type.base_rule(), ctm, mask);
            });
            return Ok(());
        }

        // Paint the whole surface through a mask of the outside region
        let Some(inverse) = self.state.transform.invert() else {
            log::warn!(target: "canvas", "skipping inverse fill under non-invertible transform");
            return Ok(());
        };
        let outside = coverage_mask(path.as_ref(), fill_type, ctm, width, height);
        let cover = tiny_skia::Rect::from_xywh(0.0, 0.0, width as f32, height as f32)
            .map(tiny_skia::PathBuilder::from_rect)
            .and_then(|p| p.transform(inverse.into()));
        let Some(cover) = cover else {
            return Ok(());
        };
        self.composite(
            paint.blend_mode,
            paint.shadow,
            outside.as_ref(),
            |target, blend, mask| {
                target.fill_path(
                    &cover,
                    &paint.paint_with(blend),
                    tiny_skia::FillRule::Winding,
                    ctm,
                    mask,
                );
            },
        );
        Ok(())
    }

    /// Stroke the current path or `path`.
    pub fn stroke(&mut self, path: Option<&Path>) -> Canvas2dResult<()> {
        log::debug!(target: "canvas", "stroke");
        let source = path.unwrap_or(&self.path).to_skia();
        self.stroke_skia_path(source)
    }

    pub(crate) fn stroke_skia_path(&mut self, path: Option<tiny_skia::Path>) -> Canvas2dResult<()> {
        let Some(path) = path else {
            return Ok(());
        };
        let Some((paint, stroke)) = self.paint_resolver().resolve_stroke_paint()? else {
            return Ok(());
        };
        let ctm: Transform = self.state.transform.into();
        self.composite(paint.blend_mode, paint.shadow, None, |target, blend, mask| {
            target.stroke_path(&path, &paint.paint_with(blend), &stroke, ctm, mask);
        });
        Ok(())
    }

    /// Hit test in path coordinates; the current transform is not applied.
    pub fn is_point_in_path(
        &self,
        path: Option<&Path>,
        x: f32,
        y: f32,
        fill_rule: Option<&str>,
    ) -> bool {
        path.unwrap_or(&self.path)
            .contains(x, y, fill_type(fill_rule))
    }

    /// Fill a rectangle without touching the current path.
    pub fn fill_rect(&mut self, params: &RectParams) -> Canvas2dResult<()> {
        log::debug!(target: "canvas", "fillRect {} {} {} {}", params.x, params.y, params.width, params.height);
        self.fill_skia_path(rect_path(params).to_skia(), FillType::Winding)
    }

    /// Stroke a rectangle without touching the current path.
    pub fn stroke_rect(&mut self, params: &RectParams) -> Canvas2dResult<()> {
        log::debug!(target: "canvas", "strokeRect {} {} {} {}", params.x, params.y, params.width, params.height);
        self.stroke_skia_path(rect_path(params).to_skia())
    }

    /// Set the pixels of a rectangle to transparent black, inside the clip.
    pub fn clear_rect(&mut self, params: &RectParams) {
        log::debug!(target: "canvas", "clearRect {} {} {} {}", params.x, params.y, params.width, params.height);
        let Some(path) = rect_path(params).to_skia() else {
            return;
        };
        let paint = tiny_skia::Paint {
            blend_mode: BlendMode::Clear,
            anti_alias: true,
            ..Default::default()
        };
        let mask = self.clip_mask();
        self.surface.fill_path(
            &path,
            &paint,
            tiny_skia::FillRule::Winding,
            self.state.transform.into(),
            mask.as_ref(),
        );
    }
}
