use balance_chart::core::{ChartScales, DataPoint, LayoutBox, PointProjection};
use balance_chart::interaction::{ProjectionTable, resolve_nearest_point};
use chrono::{DateTime, TimeZone, Utc};
use proptest::prelude::*;

fn ymd(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0)
        .single()
        .expect("valid date")
}

fn scenario_table() -> ProjectionTable {
    let points = vec![
        DataPoint::new(ymd(2025, 1, 1), 5_000.0),
        DataPoint::new(ymd(2025, 2, 1), 5_500.0),
        DataPoint::new(ymd(2025, 3, 1), 5_200.0),
    ];
    let layout = LayoutBox::new(300.0, 200.0).with_margins(10.0, 10.0, 30.0, 10.0);
    let scales = ChartScales::build(&points, layout).expect("scales");
    ProjectionTable::build(&points, scales, layout)
}

fn projection_at(x: f64) -> PointProjection {
    PointProjection {
        x,
        y: 0.0,
        point: DataPoint::new(ymd(2025, 1, 1), x),
    }
}

#[test]
fn left_margin_resolves_first_point() {
    let resolved = scenario_table().resolve(10.0).expect("non-empty");
    assert_eq!(resolved.index, 0);
    assert_eq!(resolved.projection.point.balance, 5_000.0);
}

#[test]
fn right_margin_resolves_last_point() {
    let resolved = scenario_table().resolve(290.0).expect("non-empty");
    assert_eq!(resolved.index, 2);
    assert_eq!(resolved.projection.point.balance, 5_200.0);
}

#[test]
fn pointer_far_outside_is_clamped() {
    let table = scenario_table();
    assert_eq!(table.resolve(-10_000.0).expect("left").index, 0);
    assert_eq!(table.resolve(10_000.0).expect("right").index, 2);
    assert_eq!(table.resolve(f64::NAN).expect("nan").index, 0);
}

#[test]
fn middle_pointer_resolves_middle_point() {
    let table = scenario_table();
    let middle_x = table.projections()[1].x;
    let resolved = table.resolve(middle_x + 3.0).expect("non-empty");
    assert_eq!(resolved.index, 1);
    assert_eq!(resolved.projection.x, middle_x);
}

#[test]
fn exact_tie_goes_to_the_earlier_point() {
    let layout = LayoutBox::new(100.0, 100.0);
    let projections = vec![projection_at(20.0), projection_at(40.0)];
    let resolved = resolve_nearest_point(30.0, &projections, layout).expect("non-empty");
    assert_eq!(resolved.index, 0);
}

#[test]
fn duplicate_positions_resolve_to_first_occurrence() {
    let layout = LayoutBox::new(100.0, 100.0);
    let projections = vec![projection_at(10.0), projection_at(50.0), projection_at(50.0)];
    let resolved = resolve_nearest_point(50.0, &projections, layout).expect("non-empty");
    assert_eq!(resolved.index, 1);
}

#[test]
fn empty_projection_list_resolves_nothing() {
    assert!(resolve_nearest_point(5.0, &[], LayoutBox::new(100.0, 100.0)).is_none());
}

proptest! {
    #[test]
    fn resolver_returns_minimal_distance_with_earliest_tie(
        xs in prop::collection::vec(0.0f64..400.0, 1..80),
        pointer in -5_000.0f64..5_000.0,
        margin_left in 0.0f64..40.0,
        margin_right in 0.0f64..40.0
    ) {
        let layout = LayoutBox::new(400.0, 300.0).with_margins(0.0, margin_right, 0.0, margin_left);
        let projections: Vec<PointProjection> = xs.iter().map(|x| projection_at(*x)).collect();
        let resolved = resolve_nearest_point(pointer, &projections, layout).expect("non-empty");

        let clamped = pointer.clamp(layout.plot_left(), layout.plot_right());
        let best = (resolved.projection.x - clamped).abs();
        for (index, projection) in projections.iter().enumerate() {
            let distance = (projection.x - clamped).abs();
            prop_assert!(best <= distance);
            if index < resolved.index {
                prop_assert!(distance > best);
            }
        }
    }

    #[test]
    fn repeated_lookups_are_stateless(
        xs in prop::collection::vec(0.0f64..400.0, 1..40),
        pointer in 0.0f64..400.0
    ) {
        let layout = LayoutBox::new(400.0, 300.0);
        let projections: Vec<PointProjection> = xs.iter().map(|x| projection_at(*x)).collect();
        let first = resolve_nearest_point(pointer, &projections, layout);
        let second = resolve_nearest_point(pointer, &projections, layout);
        prop_assert_eq!(first, second);
    }
}
