mod chart;
mod chart_config;
mod cursor_frame_builder;
mod format;
mod grid_frame_builder;
mod header;

pub use chart::{BalanceChart, ChartHooks};
pub use chart_config::{
    ChartColors, ChartConfig, CursorStyle, GridStyle, LineStyle, TooltipStyle, Typography,
};
pub use cursor_frame_builder::{CursorFrameBuilder, clamp_tooltip_x};
pub use format::{AudFormatter, BalanceFormatter};
pub use grid_frame_builder::{GridFrameBuilder, gridline_values};
pub use header::HeaderDisplay;
