pub mod balance_scale;
pub mod chart_scales;
pub mod line_series;
pub mod primitives;
pub mod scale;
pub mod time_scale;
pub mod types;

pub use balance_scale::{BalanceScale, BalanceScaleTuning};
pub use chart_scales::ChartScales;
pub use line_series::{
    LinePath, PathCommand, PointProjection, build_line_path, build_monotone_path, project_points,
};
pub use scale::LinearScale;
pub use time_scale::TimeScale;
pub use types::{DataPoint, LayoutBox};
