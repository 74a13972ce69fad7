//! balance-chart: headless core of an interactive balance line chart.
//!
//! The crate turns a dated balance series into scales, a monotone line path
//! and backend-agnostic render frames, and runs the scrubbing gesture
//! pipeline (nearest-point lookup, cursor scalars, haptics, selection
//! callback) on a dedicated resolver worker.

pub mod api;
pub mod core;
pub mod error;
pub mod interaction;
pub mod render;
pub mod telemetry;

pub use api::{BalanceChart, ChartConfig, ChartHooks};
pub use error::{ChartError, ChartResult};
