//! Immediate-mode 2D drawing context over tiny-skia and cosmic-text.
//!
//! [`DrawingContext`] keeps a property state with a save/restore stack, a
//! current path and a line dash, and draws onto a swappable
//! `tiny_skia::Pixmap` surface. It uses:
//! - `tiny-skia` for rasterization, shaders and blend modes
//! - `cosmic-text` for shaping and glyph outlines
//! - `ttf-parser` for font metrics
//!
//! # Example
//!
//! ```rust,ignore
//! use flow_canvas2d::{DrawingContext, RectParams, StyleValue};
//!
//! let mut ctx = DrawingContext::new(400, 300)?;
//! ctx.set_fill_style(StyleValue::color("#ff0000"));
//! ctx.fill_rect(&RectParams { x: 10.0, y: 10.0, width: 100.0, height: 50.0 })?;
//! let png_data = ctx.to_png()?;
//! ```

mod arc;
mod config;
mod context;
mod error;
mod font;
mod geometry;
mod gradient;
mod image;
mod matrix;
mod paint;
mod path;
mod pattern;
mod shadow;
mod state;
mod style;
mod text;

pub use arc::{arc_sweep, normalize_angle, ArcSweep};
pub use config::{FontConfig, GenericFamilyMap, ResolvedFontConfig};
pub use context::{DrawingContext, MAX_DIMENSION};
pub use error::{Canvas2dError, Canvas2dResult};
pub use font::{FontDescriptor, FontMetrics};
pub use geometry::{
    ArcParams, ArcToParams, CornerRadius, CubicBezierParams, DirtyRect, ImageCropParams,
    QuadraticBezierParams, RadialGradientParams, RectParams, RoundRectParams, RoundRectRadii,
};
pub use gradient::{CanvasGradient, GradientKind, GradientStop};
pub use image::{CanvasImage, ImageData, DEFAULT_COLOR_SPACE};
pub use matrix::Matrix2x3;
pub use path::{Path, PathCommand};
pub use pattern::{tile_modes_from_repetition, CanvasPattern, TileMode};
pub use state::{ClipRegion, DrawingState, PropertyValue, PROPERTY_NAMES};
pub use style::{
    blend_mode_from_name, parse_color, FillType, FontStretch, GradientHandle,
    ImageSmoothingQuality, LineCap, LineJoin, PatternHandle, StyleValue, TextAlign, TextBaseline,
};
pub use text::{baseline_offset, TextMetrics};

// Re-exported so callers can build and inspect surfaces without a direct dependency.
pub use tiny_skia::Pixmap;
