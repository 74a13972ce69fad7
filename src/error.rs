use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("empty series: a balance chart needs at least one data point")]
    EmptySeries,

    #[error("invalid layout box: width={width}, height={height}")]
    InvalidLayout { width: f64, height: f64 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("render backend failure: {0}")]
    Backend(String),

    #[error("gesture resolver worker is no longer running")]
    WorkerUnavailable,
}
