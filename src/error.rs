use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid drawing area: width={width}, height={height}")]
    InvalidDrawingArea { width: f64, height: f64 },

    #[error("grid y divisions must be >= 1 to range the y axis")]
    InvalidGridDivisions,

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("invalid config: {0}")]
    InvalidConfig(String),
}
