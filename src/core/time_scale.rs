use chrono::{DateTime, Months, Utc};
use serde::{Deserialize, Serialize};

use crate::core::LinearScale;
use crate::core::primitives::{datetime_to_unix_millis, unix_millis_to_datetime};
use crate::error::ChartResult;

/// Horizontal time axis: `[first date, last date]` mapped without padding
/// onto the plot's left/right edges.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeScale {
    linear: LinearScale,
}

impl TimeScale {
    pub fn new(
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        pixel_left: f64,
        pixel_right: f64,
    ) -> ChartResult<Self> {
        let linear = LinearScale::new(
            (datetime_to_unix_millis(start), datetime_to_unix_millis(end)),
            (pixel_left, pixel_right),
        )?;
        Ok(Self { linear })
    }

    #[must_use]
    pub fn domain(self) -> (DateTime<Utc>, DateTime<Utc>) {
        let (start, end) = self.linear.domain();
        (unix_millis_to_datetime(start), unix_millis_to_datetime(end))
    }

    #[must_use]
    pub fn range(self) -> (f64, f64) {
        self.linear.range()
    }

    #[must_use]
    pub fn time_to_pixel(self, time: DateTime<Utc>) -> f64 {
        self.linear.map(datetime_to_unix_millis(time))
    }

    #[must_use]
    pub fn pixel_to_time(self, pixel: f64) -> DateTime<Utc> {
        unix_millis_to_datetime(self.linear.invert(pixel))
    }

    /// Tick dates every `step_months` months, starting `inset_months` after
    /// the first date and stopping `inset_months` before the last one.
    ///
    /// Returns an empty list when the inset window is empty or `step_months`
    /// is zero.
    #[must_use]
    pub fn month_ticks(self, step_months: u32, inset_months: u32) -> Vec<DateTime<Utc>> {
        if step_months == 0 {
            return Vec::new();
        }
        let (start, end) = self.domain();
        let (Some(first), Some(last)) = (
            start.checked_add_months(Months::new(inset_months)),
            end.checked_sub_months(Months::new(inset_months)),
        ) else {
            return Vec::new();
        };

        let mut ticks = Vec::new();
        let mut offset = 0u32;
        while let Some(tick) = first.checked_add_months(Months::new(offset)) {
            if tick > last {
                break;
            }
            ticks.push(tick);
            offset = match offset.checked_add(step_months) {
                Some(next) => next,
                None => break,
            };
        }
        ticks
    }
}
