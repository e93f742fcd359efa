//! Drop shadows rendered through an offscreen coverage layer.

use crate::error::Canvas2dResult;
use crate::image::premultiply;
use crate::state::DrawingState;
use crate::style::parse_color;
use tiny_skia::{ColorU8, Pixmap};

/// Shadow parameters resolved from the drawing state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct ShadowParams {
    pub color: ColorU8,
    /// Gaussian sigma in device pixels.
    pub blur: f32,
    pub offset_x: f32,
    pub offset_y: f32,
}

impl ShadowParams {
    /// `None` when the shadow color is fully transparent.
    pub(crate) fn from_state(state: &DrawingState) -> Canvas2dResult<Option<Self>> {
        let color = parse_color(&state.shadow_color)?.to_color_u8();
        if color.alpha() == 0 {
            return Ok(None);
        }
        Ok(Some(Self {
            color,
            blur: state.shadow_blur.max(0.0),
            offset_x: state.shadow_offset_x,
            offset_y: state.shadow_offset_y,
        }))
    }

    /// Turn the coverage of `layer` into a tinted, blurred and offset shadow
    /// of the same size.
    pub(crate) fn cast(&self, layer: &Pixmap) -> Option<Pixmap> {
        let (width, height) = (layer.width(), layer.height());
        let mut coverage: Vec<u8> = layer.pixels().iter().map(|p| p.alpha()).collect();
        if self.blur > 0.0 {
            let kernel = gaussian_kernel_q16(self.blur, width.max(height));
            coverage = blur_alpha_q16(&coverage, width as usize, height as usize, &kernel);
        }

        let dx = self.offset_x.round() as i64;
        let dy = self.offset_y.round() as i64;
        let (w, h) = (width as i64, height as i64);
        let c = self.color;

        let mut shadow = Pixmap::new(width, height)?;
        let pixels = shadow.pixels_mut();
        for y in 0..h {
            let sy = y.saturating_sub(dy);
            if sy < 0 || sy >= h {
                continue;
            }
            for x in 0..w {
                let sx = x.saturating_sub(dx);
                if sx < 0 || sx >= w {
                    continue;
                }
                let a = coverage[(sy * w + sx) as usize];
                if a == 0 {
                    continue;
                }
                let alpha = ((a as u16 * c.alpha() as u16 + 127) / 255) as u8;
                pixels[(y * w + x) as usize] = premultiply(c.red(), c.green(), c.blue(), alpha);
            }
        }
        Some(shadow)
    }
}

/// Normalized gaussian weights in Q16 fixed point, radius `ceil(3 * sigma)`.
///
/// Taps past `max_radius` could only sample outside a buffer of that extent,
/// so the kernel is cut there. A cut kernel keeps the weights of the full
/// one and no longer sums to 1.
fn gaussian_kernel_q16(sigma: f32, max_radius: u32) -> Vec<u32> {
    let full_radius = (sigma as f64 * 3.0).ceil();
    let radius = full_radius.min(max_radius as f64) as i64;
    if radius == 0 {
        return vec![1 << 16];
    }

    let sigma = sigma as f64;
    let denom = 2.0 * sigma * sigma;
    let weight = |i: i64| (-(i as f64).powi(2) / denom).exp();
    let truncated = (radius as f64) < full_radius;
    let sum: f64 = if truncated {
        // Integral of the untruncated kernel
        sigma * (2.0 * std::f64::consts::PI).sqrt()
    } else {
        (-radius..=radius).map(weight).sum()
    };

    let mut weights: Vec<u32> = (-radius..=radius)
        .map(|i| ((weight(i) / sum) * 65536.0).round().clamp(0.0, 65536.0) as u32)
        .collect();
    if !truncated {
        // Push the rounding error into the center tap so the kernel sums to 1
        let total: i64 = weights.iter().map(|&w| w as i64).sum();
        let mid = weights.len() / 2;
        weights[mid] = (weights[mid] as i64 + 65536 - total).clamp(0, 65536) as u32;
    }
    weights
}

/// Separable blur of a single channel. Samples outside the buffer are zero.
fn blur_alpha_q16(src: &[u8], width: usize, height: usize, kernel: &[u32]) -> Vec<u8> {
    let radius = (kernel.len() / 2) as isize;
    let mut tmp = vec![0u8; src.len()];
    let mut dst = vec![0u8; src.len()];

    for y in 0..height {
        let row = &src[y * width..(y + 1) * width];
        for x in 0..width {
            let mut acc = 0u64;
            for (k, &weight) in kernel.iter().enumerate() {
                let sx = x as isize + k as isize - radius;
                if sx >= 0 && (sx as usize) < width {
                    acc += weight as u64 * row[sx as usize] as u64;
                }
            }
            tmp[y * width + x] = q16_to_u8(acc);
        }
    }

    for x in 0..width {
        for y in 0..height {
            let mut acc = 0u64;
            for (k, &weight) in kernel.iter().enumerate() {
                let sy = y as isize + k as isize - radius;
                if sy >= 0 && (sy as usize) < height {
                    acc += weight as u64 * tmp[sy as usize * width + x] as u64;
                }
            }
            dst[y * width + x] = q16_to_u8(acc);
        }
    }
    dst
}

fn q16_to_u8(acc: u64) -> u8 {
    ((acc + (1 << 15)) >> 16).min(255) as u8
}
