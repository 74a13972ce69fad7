use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

const E10: f64 = 7.071_067_811_865_476; // sqrt(50)
const E5: f64 = 3.162_277_660_168_379_5; // sqrt(10)
const E2: f64 = std::f64::consts::SQRT_2;

/// Affine mapping from a numeric domain onto a pixel range.
///
/// A zero-span domain is allowed and maps every value to the middle of the
/// range, so flat series still render as a straight mid-height line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearScale {
    domain_start: f64,
    domain_end: f64,
    range_start: f64,
    range_end: f64,
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> ChartResult<Self> {
        let (domain_start, domain_end) = domain;
        let (range_start, range_end) = range;
        if !domain_start.is_finite() || !domain_end.is_finite() {
            return Err(ChartError::InvalidData(
                "scale domain must be finite".to_owned(),
            ));
        }
        if !range_start.is_finite() || !range_end.is_finite() {
            return Err(ChartError::InvalidData(
                "scale range must be finite".to_owned(),
            ));
        }

        Ok(Self {
            domain_start,
            domain_end,
            range_start,
            range_end,
        })
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    #[must_use]
    pub fn range(self) -> (f64, f64) {
        (self.range_start, self.range_end)
    }

    #[must_use]
    pub fn map(self, value: f64) -> f64 {
        let span = self.domain_end - self.domain_start;
        let normalized = if span == 0.0 {
            0.5
        } else {
            (value - self.domain_start) / span
        };
        self.range_start + normalized * (self.range_end - self.range_start)
    }

    #[must_use]
    pub fn invert(self, pixel: f64) -> f64 {
        let span = self.range_end - self.range_start;
        if span == 0.0 {
            return self.domain_start;
        }
        let normalized = (pixel - self.range_start) / span;
        self.domain_start + normalized * (self.domain_end - self.domain_start)
    }

    /// Extends the domain outward to multiples of a 1/2/5×10ⁿ step.
    ///
    /// `count` is the approximate number of ticks the step is chosen for.
    /// Zero-span domains come back unchanged.
    #[must_use]
    pub fn nice(self, count: usize) -> Self {
        let reversed = self.domain_end < self.domain_start;
        let (mut start, mut stop) = if reversed {
            (self.domain_end, self.domain_start)
        } else {
            (self.domain_start, self.domain_end)
        };

        let mut previous_step: Option<f64> = None;
        for _ in 0..10 {
            let Some(step) = tick_increment(start, stop, count) else {
                break;
            };
            if previous_step == Some(step) {
                break;
            }
            if step > 0.0 {
                start = (start / step).floor() * step;
                stop = (stop / step).ceil() * step;
            } else {
                start = (start * step).ceil() / step;
                stop = (stop * step).floor() / step;
            }
            previous_step = Some(step);
        }

        let (domain_start, domain_end) = if reversed {
            (stop, start)
        } else {
            (start, stop)
        };
        Self {
            domain_start,
            domain_end,
            ..self
        }
    }
}

/// Tick step for `count` ticks over `[start, stop]`.
///
/// Positive results are the step itself; negative results encode `1 / -step`
/// for sub-unit steps so that the caller can divide instead of multiplying by
/// an inexact fraction.
pub(crate) fn tick_increment(start: f64, stop: f64, count: usize) -> Option<f64> {
    if count == 0 || !(stop > start) {
        return None;
    }
    let step = (stop - start) / count as f64;
    let power = step.log10().floor();
    let error = step / 10f64.powf(power);
    let factor = if error >= E10 {
        10.0
    } else if error >= E5 {
        5.0
    } else if error >= E2 {
        2.0
    } else {
        1.0
    };

    let increment = if power >= 0.0 {
        factor * 10f64.powf(power)
    } else {
        -10f64.powf(-power) / factor
    };
    increment.is_finite().then_some(increment)
}

#[cfg(test)]
mod tests {
    use super::{LinearScale, tick_increment};

    #[test]
    fn tick_increment_picks_one_two_five_steps() {
        assert_eq!(tick_increment(0.0, 10.0, 10), Some(1.0));
        assert_eq!(tick_increment(0.0, 35.0, 10), Some(5.0));
        assert_eq!(tick_increment(0.0, 1.0, 10), Some(-10.0));
        assert_eq!(tick_increment(5.0, 5.0, 10), None);
    }

    #[test]
    fn nice_rounds_outward() {
        let scale = LinearScale::new((4_650.0, 8_850.0), (330.0, 10.0))
            .expect("valid scale")
            .nice(10);
        assert_eq!(scale.domain(), (4_500.0, 9_000.0));
        assert_eq!(scale.range(), (330.0, 10.0));
    }

    #[test]
    fn zero_span_domain_maps_to_mid_range() {
        let scale = LinearScale::new((1_000.0, 1_000.0), (300.0, 100.0)).expect("valid scale");
        assert_eq!(scale.nice(10).domain(), (1_000.0, 1_000.0));
        assert_eq!(scale.map(1_000.0), 200.0);
        assert_eq!(scale.map(-5.0), 200.0);
    }
}
