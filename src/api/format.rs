use chrono::{DateTime, Utc};

/// String formatting used for labels, tooltip text and the header.
///
/// Implementations are pure: same input, same output, no internal state.
pub trait BalanceFormatter: Send + Sync {
    /// Whole-unit currency with grouped thousands, e.g. `$5,000`.
    fn currency(&self, value: f64) -> String;

    /// Abbreviated currency for axis labels, e.g. `$3.2k`.
    fn currency_compact(&self, value: f64) -> String;

    fn date_short(&self, date: DateTime<Utc>) -> String;

    fn date_long(&self, date: DateTime<Utc>) -> String;

    fn month_abbrev(&self, date: DateTime<Utc>) -> String;
}

/// Australian-dollar formatting in en-AU style, with the currency shown as `$`.
#[derive(Debug, Default, Clone, Copy)]
pub struct AudFormatter;

impl BalanceFormatter for AudFormatter {
    fn currency(&self, value: f64) -> String {
        if !value.is_finite() {
            return "$0".to_owned();
        }
        let rounded = value.round();
        let sign = if rounded < 0.0 { "-" } else { "" };
        format!("{sign}${}", group_thousands(rounded.abs()))
    }

    fn currency_compact(&self, value: f64) -> String {
        if !value.is_finite() {
            return "$0".to_owned();
        }
        let abs = value.abs();
        let whole = abs.round();
        let sign = if value < 0.0 && whole > 0.0 { "-" } else { "" };

        if whole < 1_000.0 {
            return format!("{sign}${whole}");
        }
        let thousands = round_to_tenth(abs / 1_000.0);
        if thousands < 1_000.0 {
            return format!("{sign}${}k", trim_tenth(thousands));
        }
        let millions = round_to_tenth(abs / 1_000_000.0);
        format!("{sign}${}M", trim_tenth(millions))
    }

    fn date_short(&self, date: DateTime<Utc>) -> String {
        date.format("%-d %b").to_string()
    }

    fn date_long(&self, date: DateTime<Utc>) -> String {
        date.format("%-d %b %Y").to_string()
    }

    fn month_abbrev(&self, date: DateTime<Utc>) -> String {
        date.format("%b").to_string()
    }
}

fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// `3.0` -> `3`, `3.2` -> `3.2`.
fn trim_tenth(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.1}")
    }
}

fn group_thousands(whole: f64) -> String {
    let digits = format!("{whole:.0}");
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}
