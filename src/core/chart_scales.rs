use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{BalanceScale, BalanceScaleTuning, DataPoint, LayoutBox, TimeScale};
use crate::error::{ChartError, ChartResult};

/// Time (x) and balance (y) scales for one dataset + layout pair.
///
/// Scales are rebuilt, never patched: a new dataset or layout produces a new
/// `ChartScales` value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartScales {
    pub x: TimeScale,
    pub y: BalanceScale,
}

impl ChartScales {
    pub fn build(points: &[DataPoint], layout: LayoutBox) -> ChartResult<Self> {
        Self::build_with_tuning(points, layout, BalanceScaleTuning::default())
    }

    pub fn build_with_tuning(
        points: &[DataPoint],
        layout: LayoutBox,
        tuning: BalanceScaleTuning,
    ) -> ChartResult<Self> {
        let layout = layout.validate()?;
        let first = points.first().ok_or(ChartError::EmptySeries)?;

        let mut min_date = first.date;
        let mut max_date = first.date;
        let mut min_balance = first.balance;
        let mut max_balance = first.balance;
        for point in points {
            if !point.balance.is_finite() {
                return Err(ChartError::InvalidData(format!(
                    "balance at {} must be finite",
                    point.date
                )));
            }
            min_date = min_date.min(point.date);
            max_date = max_date.max(point.date);
            min_balance = min_balance.min(point.balance);
            max_balance = max_balance.max(point.balance);
        }

        let x = TimeScale::new(min_date, max_date, layout.plot_left(), layout.plot_right())?;
        let y = BalanceScale::from_extent(
            min_balance,
            max_balance,
            layout.plot_bottom(),
            layout.plot_top(),
            tuning,
        )?;

        debug!(
            count = points.len(),
            y_min = y.domain().0,
            y_max = y.domain().1,
            width = layout.width,
            "rebuilt chart scales"
        );
        Ok(Self { x, y })
    }

    #[must_use]
    pub fn project(self, point: DataPoint) -> (f64, f64) {
        (
            self.x.time_to_pixel(point.date),
            self.y.balance_to_pixel(point.balance),
        )
    }
}
