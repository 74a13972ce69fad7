#![cfg(feature = "cairo-backend")]

use cairo::{Context, Format, ImageSurface};
use balance_chart::ChartError;
use balance_chart::api::{BalanceChart, ChartConfig, ChartHooks};
use balance_chart::core::DataPoint;
use balance_chart::render::{CairoRenderer, PangoTextMeasurer};
use chrono::{DateTime, TimeZone, Utc};
use std::sync::Arc;

fn ymd(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0)
        .single()
        .expect("valid date")
}

fn year_series() -> Vec<DataPoint> {
    vec![
        DataPoint::new(ymd(2024, 1, 1), 2_000.0),
        DataPoint::new(ymd(2024, 6, 1), 4_000.0),
        DataPoint::new(ymd(2024, 12, 1), 3_000.0),
    ]
}

#[test]
fn cairo_renderer_rejects_invalid_surface_size() {
    let err = CairoRenderer::new(0, 480).expect_err("invalid width must fail");
    assert!(matches!(err, ChartError::Backend(_)));
}

#[test]
fn cairo_renderer_skips_hidden_overlays_at_rest() {
    let renderer = CairoRenderer::new(360, 360).expect("renderer");
    let mut chart = BalanceChart::new(
        renderer,
        year_series(),
        ChartConfig::default(),
        ChartHooks::default(),
    )
    .expect("chart init");

    chart.render().expect("render");
    let stats = chart.into_renderer().last_stats();

    assert_eq!(stats.groups_drawn, 2);
    assert_eq!(stats.groups_skipped, 2);
    assert_eq!(stats.lines_drawn, 7);
    assert_eq!(stats.paths_drawn, 1);
    assert_eq!(stats.texts_drawn, 7);
}

#[test]
fn cairo_renderer_draws_cursor_and_tooltip_while_scrubbing() {
    let renderer = CairoRenderer::new(360, 360).expect("renderer");
    let hooks = ChartHooks::default().with_text_measurer(Arc::new(PangoTextMeasurer));
    let mut chart = BalanceChart::new(renderer, year_series(), ChartConfig::default(), hooks)
        .expect("chart init");

    chart.pan_begin(180.0);
    chart.flush_interactions().expect("flush");

    let surface = ImageSurface::create(Format::ARgb32, 360, 360).expect("surface");
    let context = Context::new(&surface).expect("context");
    chart
        .render_on_cairo_context(&context)
        .expect("render on context");

    let stats = chart.into_renderer().last_stats();
    assert_eq!(stats.groups_drawn, 4);
    assert_eq!(stats.circles_drawn, 2);
    assert_eq!(stats.rects_drawn, 1);
}

#[test]
fn cairo_renderer_skips_zero_area_frames() {
    let renderer = CairoRenderer::new(360, 360).expect("renderer");
    let mut chart = BalanceChart::new(
        renderer,
        year_series(),
        ChartConfig::default(),
        ChartHooks::default(),
    )
    .expect("chart init");

    chart.resize_to_surface_width(10.0).expect("resize");
    chart.render().expect("zero-area render");
    let stats = chart.into_renderer().last_stats();

    assert_eq!(stats.groups_drawn, 0);
    assert_eq!(stats.groups_skipped, 4);
    assert_eq!(stats.lines_drawn, 0);
}
