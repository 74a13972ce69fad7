use balance_chart::core::{ChartScales, DataPoint, LayoutBox};
use chrono::{DateTime, Duration, TimeZone, Utc};
use proptest::prelude::*;

fn series_from(balances: &[f64], step_days: i64) -> Vec<DataPoint> {
    let start: DateTime<Utc> = Utc
        .with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
        .single()
        .expect("valid date");
    balances
        .iter()
        .enumerate()
        .map(|(index, balance)| {
            DataPoint::new(start + Duration::days(step_days * index as i64), *balance)
        })
        .collect()
}

fn layout() -> LayoutBox {
    LayoutBox::new(360.0, 360.0).with_margins(10.0, 10.0, 30.0, 10.0)
}

proptest! {
    #[test]
    fn nice_domain_contains_every_balance(
        balances in prop::collection::vec(-1_000_000.0f64..1_000_000.0, 1..64),
        step_days in 1i64..40
    ) {
        let points = series_from(&balances, step_days);
        let scales = ChartScales::build(&points, layout()).expect("scales");
        let (low, high) = scales.y.domain();
        let (raw_min, raw_max) = scales.y.raw_extent();

        prop_assert!(low <= raw_min);
        prop_assert!(high >= raw_max);
        for balance in &balances {
            prop_assert!(*balance >= low && *balance <= high);
            let px = scales.y.balance_to_pixel(*balance);
            prop_assert!(px >= 10.0 - 1e-9 && px <= 330.0 + 1e-9);
        }
    }

    #[test]
    fn builds_are_deterministic(
        balances in prop::collection::vec(-50_000.0f64..50_000.0, 1..32),
        probe in -100_000.0f64..100_000.0
    ) {
        let points = series_from(&balances, 7);
        let first = ChartScales::build(&points, layout()).expect("first");
        let second = ChartScales::build(&points, layout()).expect("second");

        prop_assert_eq!(first, second);
        prop_assert_eq!(
            first.y.balance_to_pixel(probe).to_bits(),
            second.y.balance_to_pixel(probe).to_bits()
        );
    }

    #[test]
    fn projected_x_stays_inside_plot(
        balances in prop::collection::vec(0.0f64..10_000.0, 2..48),
        step_days in 1i64..90
    ) {
        let points = series_from(&balances, step_days);
        let scales = ChartScales::build(&points, layout()).expect("scales");

        let mut previous = f64::NEG_INFINITY;
        for point in &points {
            let (x, _) = scales.project(*point);
            prop_assert!(x >= 10.0 - 1e-9 && x <= 350.0 + 1e-9);
            prop_assert!(x > previous);
            previous = x;
        }
    }
}
