use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::primitives::decimal_to_f64;
use crate::error::{ChartError, ChartResult};

/// One balance observation.
///
/// Series are expected in ascending date order; duplicates are kept as-is.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub date: DateTime<Utc>,
    pub balance: f64,
}

impl DataPoint {
    #[must_use]
    pub fn new(date: DateTime<Utc>, balance: f64) -> Self {
        Self { date, balance }
    }

    pub fn from_decimal(date: DateTime<Utc>, balance: Decimal) -> ChartResult<Self> {
        Ok(Self {
            date,
            balance: decimal_to_f64(balance, "balance")?,
        })
    }
}

/// Surface size plus the margins that carve out the plotting rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutBox {
    pub width: f64,
    pub height: f64,
    pub margin_top: f64,
    pub margin_right: f64,
    pub margin_bottom: f64,
    pub margin_left: f64,
}

impl Default for LayoutBox {
    fn default() -> Self {
        Self {
            width: 360.0,
            height: 360.0,
            margin_top: 10.0,
            margin_right: 10.0,
            margin_bottom: 30.0,
            margin_left: 10.0,
        }
    }
}

impl LayoutBox {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            margin_top: 0.0,
            margin_right: 0.0,
            margin_bottom: 0.0,
            margin_left: 0.0,
        }
    }

    #[must_use]
    pub fn with_margins(mut self, top: f64, right: f64, bottom: f64, left: f64) -> Self {
        self.margin_top = top;
        self.margin_right = right;
        self.margin_bottom = bottom;
        self.margin_left = left;
        self
    }

    #[must_use]
    pub fn with_width(mut self, width: f64) -> Self {
        self.width = width;
        self
    }

    #[must_use]
    pub fn plot_left(self) -> f64 {
        self.margin_left
    }

    #[must_use]
    pub fn plot_right(self) -> f64 {
        self.width - self.margin_right
    }

    #[must_use]
    pub fn plot_top(self) -> f64 {
        self.margin_top
    }

    #[must_use]
    pub fn plot_bottom(self) -> f64 {
        self.height - self.margin_bottom
    }

    #[must_use]
    pub fn plot_width(self) -> f64 {
        self.plot_right() - self.plot_left()
    }

    #[must_use]
    pub fn plot_height(self) -> f64 {
        self.plot_bottom() - self.plot_top()
    }

    /// Clamps a horizontal coordinate into `[plot_left, plot_right]`.
    ///
    /// A degenerate box (right edge left of the left edge) clamps to the left edge.
    #[must_use]
    pub fn clamp_x(self, x: f64) -> f64 {
        let left = self.plot_left();
        let right = self.plot_right().max(left);
        if x.is_nan() { left } else { x.clamp(left, right) }
    }

    /// Rejects non-finite or negative values.
    ///
    /// A zero-area plotting rectangle passes: it yields degenerate geometry,
    /// not an error.
    pub fn validate(self) -> ChartResult<Self> {
        let values = [
            self.width,
            self.height,
            self.margin_top,
            self.margin_right,
            self.margin_bottom,
            self.margin_left,
        ];
        if values.iter().any(|value| !value.is_finite() || *value < 0.0) {
            return Err(ChartError::InvalidLayout {
                width: self.width,
                height: self.height,
            });
        }
        Ok(self)
    }
}
