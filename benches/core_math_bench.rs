use balance_chart::api::{BalanceChart, ChartConfig, ChartHooks};
use balance_chart::core::{
    ChartScales, DataPoint, LayoutBox, LinearScale, build_line_path, project_points,
};
use balance_chart::interaction::{ProjectionTable, resolve_nearest_point};
use balance_chart::render::NullRenderer;
use chrono::{DateTime, Duration, TimeZone, Utc};
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

fn start_date() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0)
        .single()
        .expect("valid start date")
}

fn daily_series(len: usize) -> Vec<DataPoint> {
    let start = start_date();
    (0..len)
        .map(|i| {
            let t = i as f64;
            let balance = 5_000.0 + t * 1.5 + (t * 0.05).sin() * 400.0;
            DataPoint::new(start + Duration::days(i as i64), balance)
        })
        .collect()
}

fn layout() -> LayoutBox {
    LayoutBox::new(360.0, 360.0).with_margins(10.0, 10.0, 30.0, 10.0)
}

fn bench_linear_scale_round_trip(c: &mut Criterion) {
    let scale = LinearScale::new((0.0, 10_000.0), (330.0, 10.0))
        .expect("valid scale")
        .nice(3);

    c.bench_function("linear_scale_round_trip", |b| {
        b.iter(|| {
            let px = scale.map(black_box(4_321.123));
            let _ = scale.invert(px);
        })
    });
}

fn bench_scale_build_10k(c: &mut Criterion) {
    let points = daily_series(10_000);

    c.bench_function("scale_build_10k", |b| {
        b.iter(|| {
            let _ = ChartScales::build(black_box(&points), black_box(layout()))
                .expect("scales should build");
        })
    });
}

fn bench_monotone_path_10k(c: &mut Criterion) {
    let points = daily_series(10_000);
    let scales = ChartScales::build(&points, layout()).expect("scales");
    let projections = project_points(&points, scales);

    c.bench_function("monotone_path_10k", |b| {
        b.iter(|| {
            let _ = build_line_path(black_box(&projections));
        })
    });
}

fn bench_nearest_point(c: &mut Criterion) {
    for len in [200_usize, 10_000] {
        let points = daily_series(len);
        let scales = ChartScales::build(&points, layout()).expect("scales");
        let table = ProjectionTable::build(&points, scales, layout());

        c.bench_function(&format!("nearest_point_{len}"), |b| {
            b.iter(|| {
                let _ = resolve_nearest_point(
                    black_box(187.3),
                    black_box(table.projections()),
                    black_box(table.layout()),
                )
                .expect("non-empty table");
            })
        });
    }
}

fn bench_render_frame_2k(c: &mut Criterion) {
    let chart = BalanceChart::new(
        NullRenderer::default(),
        daily_series(2_000),
        ChartConfig::default(),
        ChartHooks::default(),
    )
    .expect("chart init");

    c.bench_function("render_frame_2k", |b| {
        b.iter(|| {
            let _ = black_box(chart.build_render_frame());
        })
    });
}

criterion_group!(
    benches,
    bench_linear_scale_round_trip,
    bench_scale_build_10k,
    bench_monotone_path_10k,
    bench_nearest_point,
    bench_render_frame_2k
);
criterion_main!(benches);
