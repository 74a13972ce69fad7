use serde::{Deserialize, Serialize};

use crate::core::LinearScale;
use crate::error::{ChartError, ChartResult};

/// Tuning controls for balance-domain autoscaling.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BalanceScaleTuning {
    pub top_padding_ratio: f64,
    pub bottom_padding_ratio: f64,
    /// Approximate tick count the nice step is chosen for.
    pub nice_tick_count: usize,
}

impl Default for BalanceScaleTuning {
    fn default() -> Self {
        Self {
            top_padding_ratio: 0.10,
            bottom_padding_ratio: 0.10,
            nice_tick_count: 10,
        }
    }
}

impl BalanceScaleTuning {
    pub fn validate(self) -> ChartResult<Self> {
        if !self.top_padding_ratio.is_finite()
            || !self.bottom_padding_ratio.is_finite()
            || self.top_padding_ratio < 0.0
            || self.bottom_padding_ratio < 0.0
        {
            return Err(ChartError::InvalidData(
                "balance scale padding ratios must be finite and >= 0".to_owned(),
            ));
        }
        Ok(self)
    }
}

/// Vertical balance axis mapped onto an inverted pixel range
/// (larger balances sit higher on screen).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BalanceScale {
    linear: LinearScale,
    raw_min: f64,
    raw_max: f64,
}

impl BalanceScale {
    /// Pads `[min, max]` by the tuning ratios of its span, then rounds the
    /// padded bounds outward to nice values.
    pub fn from_extent(
        min: f64,
        max: f64,
        pixel_bottom: f64,
        pixel_top: f64,
        tuning: BalanceScaleTuning,
    ) -> ChartResult<Self> {
        let tuning = tuning.validate()?;
        if !min.is_finite() || !max.is_finite() || min > max {
            return Err(ChartError::InvalidData(
                "balance extent must be finite with min <= max".to_owned(),
            ));
        }

        let span = max - min;
        let padded = (
            min - span * tuning.bottom_padding_ratio,
            max + span * tuning.top_padding_ratio,
        );
        let linear =
            LinearScale::new(padded, (pixel_bottom, pixel_top))?.nice(tuning.nice_tick_count);

        Ok(Self {
            linear,
            raw_min: min,
            raw_max: max,
        })
    }

    /// Nice domain as `(bottom value, top value)`.
    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        self.linear.domain()
    }

    /// Unpadded `(min, max)` of the balances the scale was built from.
    #[must_use]
    pub fn raw_extent(self) -> (f64, f64) {
        (self.raw_min, self.raw_max)
    }

    #[must_use]
    pub fn range(self) -> (f64, f64) {
        self.linear.range()
    }

    #[must_use]
    pub fn balance_to_pixel(self, balance: f64) -> f64 {
        self.linear.map(balance)
    }

    #[must_use]
    pub fn pixel_to_balance(self, pixel: f64) -> f64 {
        self.linear.invert(pixel)
    }
}
