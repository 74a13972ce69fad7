use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::error::{ChartError, ChartResult};

pub fn decimal_to_f64(value: Decimal, field_name: &str) -> ChartResult<f64> {
    value.to_f64().ok_or_else(|| {
        ChartError::InvalidData(format!("{field_name} cannot be represented as f64"))
    })
}

#[must_use]
pub fn datetime_to_unix_millis(time: DateTime<Utc>) -> f64 {
    time.timestamp_millis() as f64
}

/// Converts fractional unix milliseconds back to a UTC timestamp.
///
/// Values outside chrono's representable range saturate to the nearest bound.
#[must_use]
pub fn unix_millis_to_datetime(millis: f64) -> DateTime<Utc> {
    let clamped = if millis.is_finite() {
        millis.round().clamp(
            DateTime::<Utc>::MIN_UTC.timestamp_millis() as f64,
            DateTime::<Utc>::MAX_UTC.timestamp_millis() as f64,
        )
    } else {
        0.0
    };
    DateTime::<Utc>::from_timestamp_millis(clamped as i64).unwrap_or_default()
}
