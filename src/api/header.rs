use serde::{Deserialize, Serialize};

use crate::core::DataPoint;

use super::BalanceFormatter;

/// Text shown above the chart: a formatted balance and its caption.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderDisplay {
    pub value: String,
    pub label: String,
}

impl HeaderDisplay {
    /// The scrubbed point with its long date, or `latest` with
    /// `default_caption` when nothing is selected.
    #[must_use]
    pub fn derive(
        selection: Option<DataPoint>,
        latest: DataPoint,
        default_caption: &str,
        formatter: &dyn BalanceFormatter,
    ) -> Self {
        match selection {
            Some(point) => Self {
                value: formatter.currency(point.balance),
                label: formatter.date_long(point.date),
            },
            None => Self {
                value: formatter.currency(latest.balance),
                label: default_caption.to_owned(),
            },
        }
    }
}
