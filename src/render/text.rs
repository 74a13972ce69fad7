use tracing::warn;

use crate::error::ChartResult;
use crate::render::{FontSpec, FontWeight};

/// Measures rendered label widths in pixels.
///
/// Backends with real font metrics implement this; layout code goes through
/// [`measure_or_estimate`] so a failed measurement never aborts a frame.
pub trait TextMeasurer: Send + Sync {
    fn measure_width(&self, text: &str, font: FontSpec) -> ChartResult<f64>;
}

/// Deterministic, backend-independent width estimate from per-glyph class
/// widths.
#[must_use]
pub fn estimate_text_width_px(text: &str, font: FontSpec) -> f64 {
    let units = text.chars().fold(0.0, |acc, ch| {
        acc + match ch {
            '0'..='9' => 0.62,
            '.' | ',' => 0.34,
            '-' | '+' | '%' => 0.42,
            '$' => 0.60,
            ' ' => 0.33,
            'A'..='Z' => 0.68,
            _ => 0.56,
        }
    });
    let weight_factor = match font.weight {
        FontWeight::Regular => 1.0,
        FontWeight::Bold => 1.08,
    };
    units * font.size_px * weight_factor
}

/// Measurer backed by [`estimate_text_width_px`]; used headless and in tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct EstimatedTextMeasurer;

impl TextMeasurer for EstimatedTextMeasurer {
    fn measure_width(&self, text: &str, font: FontSpec) -> ChartResult<f64> {
        Ok(estimate_text_width_px(text, font))
    }
}

/// Measures with `measurer`, falling back to the estimate on errors or
/// non-finite results.
#[must_use]
pub fn measure_or_estimate(measurer: &dyn TextMeasurer, text: &str, font: FontSpec) -> f64 {
    match measurer.measure_width(text, font) {
        Ok(width) if width.is_finite() && width >= 0.0 => width,
        Ok(width) => {
            warn!(text, width, "text measurer returned an unusable width; estimating");
            estimate_text_width_px(text, font)
        }
        Err(err) => {
            warn!(text, error = %err, "text measurement failed; estimating");
            estimate_text_width_px(text, font)
        }
    }
}
