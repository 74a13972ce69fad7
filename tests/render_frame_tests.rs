use balance_chart::ChartError;
use balance_chart::core::build_monotone_path;
use balance_chart::render::{
    CirclePrimitive, Color, EstimatedTextMeasurer, FontSpec, LayerKind, LinePrimitive,
    NullRenderer, PathPrimitive, RectPrimitive, RenderFrame, RenderGroup, Renderer, TextHAlign,
    TextPrimitive, estimate_text_width_px, measure_or_estimate,
};

fn sample_frame() -> RenderFrame {
    let mut grid = RenderGroup::new(LayerKind::Grid, 0.3);
    grid.lines
        .push(LinePrimitive::new(10.0, 50.0, 300.0, 50.0, 1.0, Color::WHITE));
    grid.texts.push(TextPrimitive::new(
        "$3k",
        310.0,
        44.5,
        FontSpec::regular(11.0),
        Color::WHITE,
        TextHAlign::Left,
    ));

    let mut series = RenderGroup::new(LayerKind::Series, 1.0);
    series.paths.push(PathPrimitive::new(
        build_monotone_path(&[(10.0, 80.0), (100.0, 40.0), (200.0, 60.0)]),
        2.0,
        Color::WHITE,
    ));

    let mut cursor = RenderGroup::new(LayerKind::Cursor, 0.0);
    cursor
        .circles
        .push(CirclePrimitive::filled(100.0, 40.0, 3.0, Color::WHITE));
    cursor
        .rects
        .push(RectPrimitive::new(110.0, 10.0, 60.0, 50.0, Color::WHITE).with_corner_radius(6.0));

    RenderFrame::new(360.0, 360.0)
        .with_group(grid)
        .with_group(series)
        .with_group(cursor)
}

#[test]
fn null_renderer_records_group_and_primitive_counts() {
    let mut renderer = NullRenderer::default();
    renderer.render(&sample_frame()).expect("render");

    assert_eq!(renderer.frames_rendered, 1);
    assert_eq!(renderer.last_group_count, 3);
    assert_eq!(renderer.last_visible_group_count, 2);
    assert_eq!(renderer.last_primitive_count, 5);
}

#[test]
fn invalid_primitives_are_rejected_before_drawing() {
    let mut frame = sample_frame();
    frame.groups[0]
        .lines
        .push(LinePrimitive::new(0.0, f64::NAN, 1.0, 1.0, 1.0, Color::WHITE));

    let mut renderer = NullRenderer::default();
    let err = renderer.render(&frame).expect_err("nan must fail");
    assert!(matches!(err, ChartError::InvalidData(_)));
    assert_eq!(renderer.frames_rendered, 0);
}

#[test]
fn group_opacity_must_be_a_fraction() {
    let frame = RenderFrame::new(100.0, 100.0).with_group(RenderGroup::new(LayerKind::Cursor, 1.5));
    assert!(frame.validate().is_err());
}

#[test]
fn zero_area_frame_is_valid_but_negative_size_is_not() {
    let collapsed = RenderFrame::new(0.0, 100.0);
    collapsed.validate().expect("zero width is a no-op frame");
    assert!(!collapsed.has_area());

    let err = RenderFrame::new(-1.0, 100.0)
        .validate()
        .expect_err("negative width must fail");
    assert!(matches!(err, ChartError::InvalidLayout { .. }));
    assert!(RenderFrame::new(10.0, f64::NAN).validate().is_err());
}

#[test]
fn stroked_circle_needs_positive_width() {
    let circle = CirclePrimitive::stroked(0.0, 0.0, 5.0, 0.0, Color::WHITE);
    assert!(circle.validate().is_err());
}

#[test]
fn frame_lookup_by_layer_kind() {
    let frame = sample_frame();
    assert_eq!(frame.group(LayerKind::Series).expect("series").paths.len(), 1);
    assert!(frame.group(LayerKind::Tooltip).is_none());
    assert!(!frame.is_empty());
    assert!(RenderFrame::new(10.0, 10.0).is_empty());
}

#[test]
fn estimated_widths_grow_with_text_and_weight() {
    let regular = FontSpec::regular(11.0);
    let short = estimate_text_width_px("$3k", regular);
    let long = estimate_text_width_px("$12.5k", regular);
    assert!(long > short);
    assert!(estimate_text_width_px("$3k", FontSpec::bold(11.0)) > short);
    assert_eq!(measure_or_estimate(&EstimatedTextMeasurer, "$3k", regular), short);
}
