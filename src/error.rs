use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid price domain: {0}")]
    InvalidDomain(String),

    #[error("unsupported pattern number: {0} (expected 0..=3)")]
    InvalidPattern(i64),

    #[error("malformed price range: min={min}, max={max}")]
    MalformedRange { min: f64, max: f64 },

    #[error("invalid data: {0}")]
    InvalidData(String),
}
