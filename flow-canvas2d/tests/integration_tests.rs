//! Integration tests for flow-canvas2d.
//!
//! Contexts are built without system fonts so results do not depend on the
//! host machine.

use flow_canvas2d::{
    arc_sweep, ArcParams, CanvasImage, DirtyRect, DrawingContext, FontConfig, ImageCropParams,
    ImageData, Matrix2x3, Path, PropertyValue, RectParams, RoundRectRadii, StyleValue,
    PROPERTY_NAMES,
};
use rstest::rstest;
use std::f32::consts::PI;

fn context(width: u32, height: u32) -> DrawingContext {
    DrawingContext::with_config(width, height, &FontConfig::empty()).unwrap()
}

/// Context with the shadow disabled, so edges are not darkened.
fn plain_context(width: u32, height: u32) -> DrawingContext {
    let mut ctx = context(width, height);
    ctx.set_shadow_color("transparent");
    ctx
}

fn rect(x: f32, y: f32, width: f32, height: f32) -> RectParams {
    RectParams {
        x,
        y,
        width,
        height,
    }
}

fn pixel(data: &ImageData, x: u32, y: u32) -> [u8; 4] {
    let idx = ((y * data.width + x) * 4) as usize;
    [
        data.data[idx],
        data.data[idx + 1],
        data.data[idx + 2],
        data.data[idx + 3],
    ]
}

const RED: [u8; 4] = [255, 0, 0, 255];
const BLUE: [u8; 4] = [0, 0, 255, 255];
const CLEAR: [u8; 4] = [0, 0, 0, 0];

#[test]
fn test_fill_rect_covers_whole_surface() {
    let mut ctx = context(10, 10);
    ctx.fill_rect(&rect(0.0, 0.0, 10.0, 10.0)).unwrap();

    let data = ctx.to_image_data();
    assert_eq!(data.data.len(), 400);
    assert!(data.data.chunks_exact(4).all(|p| p == [0, 0, 0, 255]));
}

#[test]
fn test_fill_rect_leaves_outside_untouched() {
    let mut ctx = plain_context(100, 100);
    ctx.set_fill_style(StyleValue::color("#ff0000"));
    ctx.fill_rect(&rect(10.0, 10.0, 50.0, 50.0)).unwrap();

    let data = ctx.to_image_data();
    assert_eq!(pixel(&data, 30, 30), RED);
    assert_eq!(pixel(&data, 80, 80), CLEAR);
}

#[test]
fn test_fill_rect_does_not_touch_current_path() {
    let mut ctx = plain_context(20, 20);
    ctx.move_to(1.0, 1.0);
    ctx.line_to(5.0, 5.0);
    let before = ctx.current_path().clone();
    ctx.fill_rect(&rect(0.0, 0.0, 4.0, 4.0)).unwrap();
    assert_eq!(ctx.current_path(), &before);
}

#[test]
fn test_path_fill() {
    let mut ctx = plain_context(100, 100);
    ctx.set_fill_style(StyleValue::color("#0000ff"));
    ctx.begin_path();
    ctx.move_to(10.0, 10.0);
    ctx.line_to(90.0, 10.0);
    ctx.line_to(90.0, 90.0);
    ctx.line_to(10.0, 90.0);
    ctx.close_path();
    ctx.fill(None, None).unwrap();

    let data = ctx.to_image_data();
    assert_eq!(pixel(&data, 50, 50), BLUE);
    assert_eq!(pixel(&data, 5, 5), CLEAR);
}

#[test]
fn test_stroke_line() {
    let mut ctx = plain_context(100, 100);
    ctx.set_stroke_style(StyleValue::color("#0000ff"));
    ctx.set_line_width(4.0);
    ctx.begin_path();
    ctx.move_to(10.0, 50.0);
    ctx.line_to(90.0, 50.0);
    ctx.stroke(None).unwrap();

    let data = ctx.to_image_data();
    assert_eq!(pixel(&data, 50, 50), BLUE);
    assert_eq!(pixel(&data, 50, 20), CLEAR);
}

#[test]
fn test_fill_with_path_object() {
    let mut ctx = plain_context(40, 40);
    let path = Path::from_svg_path_data("M 0 0 H 20 V 20 H 0 Z").unwrap();
    ctx.set_fill_style(StyleValue::color("red"));
    ctx.fill(Some(&path), None).unwrap();

    let data = ctx.to_image_data();
    assert_eq!(pixel(&data, 10, 10), RED);
    assert_eq!(pixel(&data, 30, 30), CLEAR);
    assert!(ctx.current_path().is_empty());
}

#[test]
fn test_invalid_fill_color_is_an_error() {
    let mut ctx = plain_context(10, 10);
    ctx.set_fill_style(StyleValue::color("not-a-color"));
    assert!(ctx.fill_rect(&rect(0.0, 0.0, 5.0, 5.0)).is_err());
}

#[test]
fn test_default_properties() {
    let ctx = context(10, 10);
    let expected: &[(&str, PropertyValue)] = &[
        ("fillStyle", StyleValue::color("#000").into()),
        ("strokeStyle", StyleValue::color("#000").into()),
        ("globalAlpha", PropertyValue::Number(1.0)),
        ("globalCompositeOperation", "source-over".into()),
        ("lineWidth", PropertyValue::Number(1.0)),
        ("lineCap", "butt".into()),
        ("lineJoin", "miter".into()),
        ("miterLimit", PropertyValue::Number(10.0)),
        ("lineDashOffset", PropertyValue::Number(0.0)),
        ("font", "12px Arial".into()),
        ("textAlign", "start".into()),
        ("textBaseline", "alphabetic".into()),
        ("direction", "inherit".into()),
        ("imageSmoothingEnabled", true.into()),
        ("imageSmoothingQuality", "low".into()),
        ("shadowColor", "#000".into()),
        ("shadowBlur", PropertyValue::Number(0.0)),
        ("letterSpacing", "0px".into()),
        ("filter", "none".into()),
    ];
    for (name, value) in expected {
        assert_eq!(ctx.get_property(name).as_ref(), Some(value), "{}", name);
    }
    assert!(ctx.get_line_dash().is_empty());
    assert!(ctx.get_transform().is_identity());
}

#[test]
fn test_every_property_name_reads_back() {
    let ctx = context(4, 4);
    for name in PROPERTY_NAMES {
        assert!(ctx.get_property(name).is_some(), "{}", name);
    }
    assert!(ctx.get_property("noSuchProperty").is_none());
}

#[test]
fn test_save_restore_round_trip() {
    let mut ctx = context(10, 10);
    ctx.set_fill_style(StyleValue::color("#ff0000"));
    ctx.set_line_width(5.0);
    ctx.translate(3.0, 4.0);
    let before = ctx.state().clone();

    ctx.save();
    ctx.set_fill_style(StyleValue::color("#00ff00"));
    ctx.set_line_width(10.0);
    ctx.set_font("bold 20px serif").unwrap();
    ctx.rotate(1.0);
    ctx.clip(None, None);
    ctx.restore();

    assert_eq!(ctx.state(), &before);
}

#[test]
fn test_save_then_restore_is_noop() {
    let mut ctx = context(10, 10);
    ctx.set_global_alpha(0.25);
    let before = ctx.state().clone();
    ctx.save();
    ctx.restore();
    assert_eq!(ctx.state(), &before);
}

#[test]
fn test_restore_on_empty_stack_is_silent() {
    let mut ctx = context(10, 10);
    ctx.set_line_width(7.0);
    ctx.restore();
    assert_eq!(ctx.get_property("lineWidth"), Some(PropertyValue::Number(7.0)));
}

#[test]
fn test_line_dash_survives_restore() {
    let mut ctx = context(10, 10);
    ctx.save();
    ctx.set_line_dash(vec![4.0, 2.0]);
    ctx.restore();
    assert_eq!(ctx.get_line_dash(), &[4.0, 2.0]);
}

#[rstest]
#[case::odd_is_duplicated(vec![1.0, 2.0, 3.0], vec![1.0, 2.0, 3.0, 1.0, 2.0, 3.0])]
#[case::even_is_kept(vec![5.0, 5.0], vec![5.0, 5.0])]
#[case::negative_is_ignored(vec![5.0, -1.0], vec![4.0, 2.0])]
#[case::nan_is_ignored(vec![f32::NAN], vec![4.0, 2.0])]
#[case::empty_clears(vec![], vec![])]
fn test_set_line_dash(#[case] input: Vec<f32>, #[case] expected: Vec<f32>) {
    let mut ctx = context(4, 4);
    ctx.set_line_dash(vec![4.0, 2.0]);
    ctx.set_line_dash(input);
    assert_eq!(ctx.get_line_dash(), expected.as_slice());
}

#[test]
fn test_unknown_composite_draws_like_source_over() {
    let draw = |op: &str| {
        let mut ctx = plain_context(20, 20);
        ctx.set_fill_style(StyleValue::color("#ff0000"));
        ctx.fill_rect(&rect(0.0, 0.0, 20.0, 20.0)).unwrap();
        ctx.set_global_composite_operation(op);
        ctx.set_fill_style(StyleValue::color("rgba(0, 0, 255, 0.5)"));
        ctx.fill_rect(&rect(5.0, 5.0, 10.0, 10.0)).unwrap();
        ctx.to_image_data()
    };
    assert_eq!(draw("not-a-blend-mode"), draw("source-over"));
    assert_ne!(draw("destination-over"), draw("source-over"));
}

#[test]
fn test_unknown_composite_name_is_stored() {
    let mut ctx = context(4, 4);
    ctx.set_global_composite_operation("made-up");
    assert_eq!(
        ctx.get_property("globalCompositeOperation"),
        Some("made-up".into())
    );
}

#[test]
fn test_global_alpha_scales_fill() {
    let mut ctx = plain_context(10, 10);
    ctx.set_fill_style(StyleValue::color("#ff0000"));
    ctx.set_global_alpha(0.5);
    ctx.fill_rect(&rect(0.0, 0.0, 10.0, 10.0)).unwrap();

    let [r, g, b, a] = pixel(&ctx.to_image_data(), 5, 5);
    assert_eq!((r, g, b), (255, 0, 0));
    assert!((126..=128).contains(&a), "alpha {}", a);
}

#[test]
fn test_clear_rect() {
    let mut ctx = context(20, 20);
    ctx.fill_rect(&rect(0.0, 0.0, 20.0, 20.0)).unwrap();
    ctx.clear_rect(&rect(5.0, 5.0, 10.0, 10.0));

    let data = ctx.to_image_data();
    assert_eq!(pixel(&data, 10, 10), CLEAR);
    assert_eq!(pixel(&data, 1, 1), [0, 0, 0, 255]);
}

#[test]
fn test_clip_limits_drawing() {
    let mut ctx = plain_context(100, 100);
    ctx.rect(&rect(0.0, 0.0, 50.0, 50.0));
    ctx.clip(None, None);
    ctx.set_fill_style(StyleValue::color("red"));
    ctx.fill_rect(&rect(0.0, 0.0, 100.0, 100.0)).unwrap();

    let data = ctx.to_image_data();
    assert_eq!(pixel(&data, 25, 25), RED);
    assert_eq!(pixel(&data, 75, 75), CLEAR);
}

#[test]
fn test_clips_intersect() {
    let mut ctx = plain_context(100, 100);
    ctx.rect(&rect(0.0, 0.0, 60.0, 60.0));
    ctx.clip(None, None);
    ctx.begin_path();
    ctx.rect(&rect(40.0, 40.0, 60.0, 60.0));
    ctx.clip(None, None);
    ctx.set_fill_style(StyleValue::color("red"));
    ctx.fill_rect(&rect(0.0, 0.0, 100.0, 100.0)).unwrap();

    let data = ctx.to_image_data();
    assert_eq!(pixel(&data, 50, 50), RED);
    assert_eq!(pixel(&data, 20, 20), CLEAR);
    assert_eq!(pixel(&data, 80, 80), CLEAR);
}

#[test]
fn test_restore_drops_clip() {
    let mut ctx = plain_context(100, 100);
    ctx.save();
    ctx.rect(&rect(0.0, 0.0, 10.0, 10.0));
    ctx.clip(None, None);
    ctx.restore();
    ctx.set_fill_style(StyleValue::color("red"));
    ctx.fill_rect(&rect(0.0, 0.0, 100.0, 100.0)).unwrap();

    assert_eq!(pixel(&ctx.to_image_data(), 75, 75), RED);
}

#[test]
fn test_linear_gradient_keeps_insertion_order() {
    let ctx = context(10, 10);
    let gradient = ctx.create_linear_gradient(0.0, 0.0, 10.0, 0.0);
    gradient.borrow_mut().add_color_stop(1.0, "#ffffff").unwrap();
    gradient.borrow_mut().add_color_stop(0.0, "#000000").unwrap();

    let offsets: Vec<f32> = gradient.borrow().stops.iter().map(|s| s.offset).collect();
    assert_eq!(offsets, vec![1.0, 0.0]);
}

#[test]
fn test_gradient_stop_with_bad_color_fails() {
    let ctx = context(10, 10);
    let gradient = ctx.create_linear_gradient(0.0, 0.0, 10.0, 0.0);
    assert!(gradient.borrow_mut().add_color_stop(0.5, "nope").is_err());
    assert!(gradient.borrow().stops.is_empty());
}

#[test]
fn test_linear_gradient_fill() {
    let mut ctx = plain_context(100, 10);
    let gradient = ctx.create_linear_gradient(0.0, 0.0, 100.0, 0.0);
    gradient.borrow_mut().add_color_stop(0.0, "#000000").unwrap();
    gradient.borrow_mut().add_color_stop(1.0, "#ffffff").unwrap();
    ctx.set_fill_style(StyleValue::Gradient(gradient));
    ctx.fill_rect(&rect(0.0, 0.0, 100.0, 10.0)).unwrap();

    let data = ctx.to_image_data();
    let left = pixel(&data, 5, 5);
    let right = pixel(&data, 95, 5);
    assert_eq!(left[3], 255);
    assert!(left[0] < 40, "{:?}", left);
    assert!(right[0] > 215, "{:?}", right);
}

#[test]
fn test_stops_added_after_assignment_are_used() {
    let mut ctx = plain_context(10, 10);
    let gradient = ctx.create_linear_gradient(0.0, 0.0, 10.0, 0.0);
    ctx.set_fill_style(StyleValue::Gradient(gradient.clone()));
    gradient.borrow_mut().add_color_stop(0.0, "red").unwrap();
    gradient.borrow_mut().add_color_stop(1.0, "red").unwrap();
    ctx.fill_rect(&rect(0.0, 0.0, 10.0, 10.0)).unwrap();

    assert_eq!(pixel(&ctx.to_image_data(), 5, 5), RED);
}

#[test]
fn test_gradient_without_stops_paints_nothing() {
    let mut ctx = plain_context(10, 10);
    let gradient = ctx.create_radial_gradient(&flow_canvas2d::RadialGradientParams {
        x0: 5.0,
        y0: 5.0,
        r0: 0.0,
        x1: 5.0,
        y1: 5.0,
        r1: 5.0,
    });
    ctx.set_fill_style(StyleValue::Gradient(gradient));
    ctx.fill_rect(&rect(0.0, 0.0, 10.0, 10.0)).unwrap();

    assert!(ctx.to_image_data().data.iter().all(|&b| b == 0));
}

#[test]
fn test_conic_gradient_fill() {
    let mut ctx = plain_context(20, 20);
    let gradient = ctx.create_conic_gradient(0.0, 10.0, 10.0);
    gradient.borrow_mut().add_color_stop(0.0, "blue").unwrap();
    gradient.borrow_mut().add_color_stop(1.0, "blue").unwrap();
    ctx.set_fill_style(StyleValue::Gradient(gradient));
    ctx.fill_rect(&rect(0.0, 0.0, 20.0, 20.0)).unwrap();

    assert_eq!(pixel(&ctx.to_image_data(), 3, 15), BLUE);
}

fn checker() -> CanvasImage {
    #[rustfmt::skip]
    let rgba = [
        255, 0, 0, 255,   0, 0, 255, 255,
        0, 0, 255, 255,   255, 0, 0, 255,
    ];
    CanvasImage::from_rgba(2, 2, &rgba).unwrap()
}

#[test]
fn test_pattern_fill_repeats() {
    let mut ctx = plain_context(8, 8);
    ctx.set_image_smoothing_enabled(false);
    let pattern = ctx.create_pattern(&checker(), "repeat");
    ctx.set_fill_style(StyleValue::Pattern(pattern));
    ctx.fill_rect(&rect(0.0, 0.0, 8.0, 8.0)).unwrap();

    let data = ctx.to_image_data();
    assert_eq!(pixel(&data, 0, 0), RED);
    assert_eq!(pixel(&data, 1, 0), BLUE);
    assert_eq!(pixel(&data, 4, 4), RED);
    assert_eq!(pixel(&data, 5, 6), BLUE);
}

#[test]
fn test_pattern_transform_shifts_tiles() {
    let mut ctx = plain_context(8, 8);
    ctx.set_image_smoothing_enabled(false);
    let pattern = ctx.create_pattern(&checker(), "repeat");
    pattern
        .borrow_mut()
        .set_transform(Matrix2x3::from_components(1.0, 0.0, 1.0, 1.0, 0.0, 0.0));
    ctx.set_fill_style(StyleValue::Pattern(pattern));
    ctx.fill_rect(&rect(0.0, 0.0, 8.0, 8.0)).unwrap();

    let data = ctx.to_image_data();
    assert_eq!(pixel(&data, 1, 0), RED);
    assert_eq!(pixel(&data, 2, 0), BLUE);
}

#[test]
fn test_draw_image_at_offset() {
    let mut ctx = plain_context(6, 6);
    ctx.set_image_smoothing_enabled(false);
    ctx.draw_image(&checker(), 2.0, 2.0).unwrap();

    let data = ctx.to_image_data();
    assert_eq!(pixel(&data, 2, 2), RED);
    assert_eq!(pixel(&data, 3, 2), BLUE);
    assert_eq!(pixel(&data, 1, 1), CLEAR);
    assert_eq!(pixel(&data, 4, 4), CLEAR);
}

#[test]
fn test_draw_image_scaled() {
    let mut ctx = plain_context(8, 8);
    ctx.set_image_smoothing_enabled(false);
    ctx.draw_image_scaled(&checker(), 0.0, 0.0, 8.0, 8.0).unwrap();

    let data = ctx.to_image_data();
    assert_eq!(pixel(&data, 1, 1), RED);
    assert_eq!(pixel(&data, 6, 1), BLUE);
    assert_eq!(pixel(&data, 6, 6), RED);
}

#[test]
fn test_draw_image_cropped() {
    let mut ctx = plain_context(4, 4);
    ctx.set_image_smoothing_enabled(false);
    ctx.draw_image_cropped(
        &checker(),
        &ImageCropParams {
            sx: 1.0,
            sy: 0.0,
            sw: 1.0,
            sh: 1.0,
            dx: 0.0,
            dy: 0.0,
            dw: 4.0,
            dh: 4.0,
        },
    )
    .unwrap();

    let data = ctx.to_image_data();
    assert!(data.data.chunks_exact(4).all(|p| p == BLUE));
}

#[test]
fn test_to_image_snapshot_is_independent() {
    let mut ctx = plain_context(4, 4);
    ctx.set_fill_style(StyleValue::color("red"));
    ctx.fill_rect(&rect(0.0, 0.0, 4.0, 4.0)).unwrap();
    let snapshot = ctx.to_image();
    ctx.clear_rect(&rect(0.0, 0.0, 4.0, 4.0));

    assert_eq!(&snapshot.to_rgba()[..4], &RED);
    assert_eq!(pixel(&ctx.to_image_data(), 0, 0), CLEAR);
}

#[test]
fn test_put_image_data_round_trip() {
    let mut ctx = context(4, 4);
    let mut data = ctx.create_image_data(2, 2, None).unwrap();
    data.data.copy_from_slice(&[
        255, 0, 0, 255, 0, 255, 0, 255, 0, 0, 255, 255, 10, 20, 30, 255,
    ]);
    ctx.put_image_data(&data, 1, 1, None).unwrap();

    let out = ctx.to_image_data();
    assert_eq!(pixel(&out, 1, 1), RED);
    assert_eq!(pixel(&out, 2, 1), [0, 255, 0, 255]);
    assert_eq!(pixel(&out, 2, 2), [10, 20, 30, 255]);
    assert_eq!(pixel(&out, 0, 0), CLEAR);
}

#[test]
fn test_put_image_data_ignores_transform_and_alpha() {
    let mut ctx = context(4, 4);
    ctx.translate(2.0, 2.0);
    ctx.set_global_alpha(0.1);
    let mut data = ImageData::new(1, 1, None);
    data.data.copy_from_slice(&RED);
    ctx.put_image_data(&data, 0, 0, None).unwrap();

    assert_eq!(pixel(&ctx.to_image_data(), 0, 0), RED);
}

#[test]
fn test_put_image_data_dirty_rect() {
    let mut ctx = context(4, 4);
    let mut data = ImageData::new(2, 2, None);
    for px in data.data.chunks_exact_mut(4) {
        px.copy_from_slice(&RED);
    }
    let dirty = DirtyRect {
        x: 1,
        y: 1,
        width: 1,
        height: 1,
    };
    ctx.put_image_data(&data, 0, 0, Some(&dirty)).unwrap();

    let out = ctx.to_image_data();
    assert_eq!(pixel(&out, 1, 1), RED);
    assert_eq!(pixel(&out, 0, 0), CLEAR);
}

#[test]
fn test_create_image_data_defaults() {
    let ctx = context(4, 4);
    let data = ctx.create_image_data(3, 2, None).unwrap();
    assert_eq!((data.width, data.height), (3, 2));
    assert_eq!(data.color_space, "srgb");
    assert_eq!(data.data.len(), 24);
    assert!(ctx.create_image_data(0, 2, None).is_err());
}

#[test]
fn test_to_png_signature() {
    let mut ctx = context(8, 8);
    ctx.fill_rect(&rect(0.0, 0.0, 4.0, 4.0)).unwrap();
    let png = ctx.to_png().unwrap();
    assert_eq!(&png[..8], &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]);
}

#[test]
fn test_set_identity_then_get() {
    let mut ctx = context(4, 4);
    ctx.translate(10.0, 5.0);
    ctx.set_transform(&Matrix2x3::identity());
    let json = serde_json::to_value(ctx.get_transform()).unwrap();
    assert_eq!(
        json,
        serde_json::json!({"a": 1.0, "b": 0.0, "c": 0.0, "d": 1.0, "e": 0.0, "f": 0.0})
    );
}

#[test]
fn test_translate_moves_drawing() {
    let mut ctx = plain_context(20, 20);
    ctx.translate(10.0, 10.0);
    ctx.set_fill_style(StyleValue::color("red"));
    ctx.fill_rect(&rect(0.0, 0.0, 5.0, 5.0)).unwrap();

    let data = ctx.to_image_data();
    assert_eq!(pixel(&data, 12, 12), RED);
    assert_eq!(pixel(&data, 2, 2), CLEAR);
}

#[test]
fn test_set_surface_swaps_and_resets_transform() {
    let mut ctx = plain_context(10, 10);
    ctx.set_fill_style(StyleValue::color("red"));
    ctx.translate(3.0, 3.0);
    ctx.fill_rect(&rect(0.0, 0.0, 2.0, 2.0)).unwrap();

    let previous = ctx.set_surface(flow_canvas2d::Pixmap::new(20, 30).unwrap());
    assert_eq!(previous.width(), 10);
    assert_eq!(ctx.get_size(), (20, 30));
    assert!(ctx.get_transform().is_identity());
    // Properties carry over to the new surface
    assert_eq!(
        ctx.get_property("fillStyle"),
        Some(StyleValue::color("red").into())
    );

    ctx.fill_rect(&rect(0.0, 0.0, 2.0, 2.0)).unwrap();
    assert_eq!(pixel(&ctx.to_image_data(), 0, 0), RED);
}

#[rstest]
#[case(0.0, PI / 2.0)]
#[case(PI / 4.0, PI)]
#[case(1.0, 5.0)]
fn test_arc_ccw_negates_sweep(#[case] start: f32, #[case] end: f32) {
    let cw = arc_sweep(start, end, false);
    let ccw = arc_sweep(start, end, true);
    assert!((cw.sweep_angle + ccw.sweep_angle).abs() < 1e-6);
    assert!(cw.sweep_angle.abs() > 0.0);
}

#[test]
fn test_full_arc_fills_circle() {
    let mut ctx = plain_context(40, 40);
    ctx.set_fill_style(StyleValue::color("red"));
    ctx.arc(&ArcParams {
        x: 20.0,
        y: 20.0,
        radius: 10.0,
        start_angle: 0.0,
        end_angle: PI,
        counterclockwise: false,
    });
    ctx.fill(None, None).unwrap();

    let data = ctx.to_image_data();
    // Lower half only: the arc spans 0 to π through +y
    assert_eq!(pixel(&data, 20, 25), RED);
    assert_eq!(pixel(&data, 20, 14)[3], 0);
}

#[rstest]
#[case::scalar(RoundRectRadii::Scalar(5.0))]
#[case::pair(RoundRectRadii::List(vec![5.0, 0.0]))]
fn test_round_rect_rounds_corners(#[case] radii: RoundRectRadii) {
    let mut ctx = plain_context(40, 40);
    ctx.set_fill_style(StyleValue::color("red"));
    ctx.round_rect(&rect(0.0, 0.0, 40.0, 40.0), &radii).unwrap();
    ctx.fill(None, None).unwrap();

    let data = ctx.to_image_data();
    assert_eq!(pixel(&data, 0, 0), CLEAR);
    assert_eq!(pixel(&data, 20, 20), RED);
}

#[test]
fn test_round_rect_rejects_five_radii() {
    let mut ctx = context(10, 10);
    let radii = RoundRectRadii::List(vec![1.0; 5]);
    assert!(ctx.round_rect(&rect(0.0, 0.0, 5.0, 5.0), &radii).is_err());
}

#[test]
fn test_is_point_in_path() {
    let mut ctx = context(10, 10);
    ctx.rect(&rect(0.0, 0.0, 10.0, 10.0));
    assert!(ctx.is_point_in_path(None, 5.0, 5.0, None));
    assert!(!ctx.is_point_in_path(None, 15.0, 5.0, None));

    let path = Path::from_svg_path_data("M 20 20 h 5 v 5 h -5 z").unwrap();
    assert!(ctx.is_point_in_path(Some(&path), 22.0, 22.0, None));
    assert!(!ctx.is_point_in_path(Some(&path), 5.0, 5.0, None));
}

#[test]
fn test_is_point_in_path_explicit_rules() {
    let mut ctx = context(10, 10);
    ctx.rect(&rect(0.0, 0.0, 10.0, 10.0));
    // "evenodd" selects winding, any other explicit rule the outside
    assert!(ctx.is_point_in_path(None, 5.0, 5.0, Some("evenodd")));
    assert!(!ctx.is_point_in_path(None, 5.0, 5.0, Some("nonzero")));
    assert!(ctx.is_point_in_path(None, 50.0, 50.0, Some("nonzero")));
}

#[test]
fn test_measure_empty_text() {
    let mut ctx = context(10, 10);
    ctx.set_font("20px sans-serif").unwrap();
    let metrics = ctx.measure_text("").unwrap();

    assert_eq!(metrics.width, 0.0);
    assert_eq!(metrics.actual_bounding_box_left, 0.0);
    assert_eq!(metrics.actual_bounding_box_right, 0.0);
    assert_eq!(metrics.actual_bounding_box_ascent, 0.0);
    assert_eq!(metrics.actual_bounding_box_descent, 0.0);
    assert_eq!(metrics.alphabetic_baseline, 0.0);
    assert!(metrics.font_bounding_box_ascent > 0.0);
    assert!(metrics.font_bounding_box_descent > 0.0);
    // The descent share is reported with a negative sign
    assert!((metrics.em_height_ascent - metrics.em_height_descent - 20.0).abs() < 1e-3);
}

#[test]
fn test_text_metrics_wire_names() {
    let mut ctx = context(10, 10);
    let json = serde_json::to_value(ctx.measure_text("").unwrap()).unwrap();
    for key in [
        "width",
        "actualBoundingBoxLeft",
        "actualBoundingBoxRight",
        "actualBoundingBoxAscent",
        "actualBoundingBoxDescent",
        "fontBoundingBoxAscent",
        "fontBoundingBoxDescent",
        "emHeightAscent",
        "emHeightDescent",
        "alphabeticBaseline",
        "hangingBaseline",
        "ideographicBaseline",
    ] {
        assert!(json.get(key).is_some(), "{}", key);
    }
}

#[test]
fn test_invalid_font_is_rejected() {
    let mut ctx = context(10, 10);
    assert!(ctx.set_font("bold serif").is_err());
    assert_eq!(ctx.get_property("font"), Some("12px Arial".into()));
}

#[test]
fn test_fill_text_without_fonts_draws_nothing() {
    let mut ctx = context(40, 20);
    ctx.fill_text("Hello", 2.0, 15.0, None).unwrap();
    ctx.stroke_text("Hello", 2.0, 15.0, Some(10.0)).unwrap();
    assert!(ctx.to_image_data().data.iter().all(|&b| b == 0));
}

#[test]
fn test_shadow_offset_draws_below_shape() {
    let mut ctx = context(30, 30);
    ctx.set_shadow_color("#0000ff");
    ctx.set_shadow_offset(10.0, 10.0);
    ctx.set_fill_style(StyleValue::color("red"));
    ctx.fill_rect(&rect(0.0, 0.0, 10.0, 10.0)).unwrap();

    let data = ctx.to_image_data();
    assert_eq!(pixel(&data, 5, 5), RED);
    assert_eq!(pixel(&data, 15, 15), BLUE);
    assert_eq!(pixel(&data, 25, 25), CLEAR);
}

#[test]
fn test_invalid_dimensions() {
    assert!(DrawingContext::with_config(0, 10, &FontConfig::empty()).is_err());
    assert!(DrawingContext::with_config(10, 40000, &FontConfig::empty()).is_err());
}

/// Context with a visible shadow and a small stroked square as the path.
fn shadowed_square() -> DrawingContext {
    let mut ctx = context(16, 16);
    ctx.set_shadow_color("#0000ff");
    ctx.set_fill_style(StyleValue::color("red"));
    ctx.rect(&rect(4.0, 4.0, 8.0, 8.0));
    ctx
}

#[rstest]
#[case("shadowBlur")]
#[case("shadowOffsetX")]
#[case("shadowOffsetY")]
#[case("lineWidth")]
#[case("miterLimit")]
#[case("lineDashOffset")]
#[case("globalAlpha")]
fn test_huge_numeric_property_still_draws(
    #[case] name: &str,
    #[values(1.0e12, -1.0e12)] value: f32,
) {
    let mut ctx = shadowed_square();
    ctx.set_line_dash(vec![2.0, 1.0]);
    ctx.set_property(name, PropertyValue::Number(value)).unwrap();
    ctx.fill(None, None).unwrap();
    ctx.stroke(None).unwrap();
    ctx.fill_rect(&rect(0.0, 0.0, 4.0, 4.0)).unwrap();
}

#[test]
fn test_huge_dash_and_geometry_still_draw() {
    let mut ctx = shadowed_square();
    ctx.set_line_dash(vec![1.0e12, 1.0e12]);
    ctx.set_shadow_blur(1.0e12);
    ctx.stroke(None).unwrap();

    ctx.begin_path();
    ctx.arc(&ArcParams {
        x: 8.0,
        y: 8.0,
        radius: 1.0e12,
        start_angle: 0.0,
        end_angle: 2.0 * PI,
        counterclockwise: false,
    });
    ctx.fill(None, None).unwrap();

    ctx.translate(1.0e12, 1.0e12);
    ctx.scale(1.0e12, 1.0e12);
    ctx.fill_rect(&rect(0.0, 0.0, 1.0, 1.0)).unwrap();
    ctx.stroke_rect(&rect(0.0, 0.0, 1.0, 1.0)).unwrap();
}

#[rstest]
#[case(1_000_000_000, 1_000_000_000)]
#[case(40_000, 1)]
#[case(1, u32::MAX)]
fn test_create_image_data_rejects_huge_sizes(#[case] width: u32, #[case] height: u32) {
    let ctx = context(4, 4);
    assert!(ctx.create_image_data(width, height, None).is_err());
    assert!(DrawingContext::with_config(width, height, &FontConfig::empty()).is_err());
}
