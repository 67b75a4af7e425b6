use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid drawing area: width={width}, height={height}")]
    InvalidViewport { width: f64, height: f64 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    /// Broken precondition inside a render pass, e.g. an axis segment with
    /// negative render length. Signals a defect in axis pre-computation
    /// rather than bad user data.
    #[error("render invariant violated: {0}")]
    InvariantViolation(String),

    #[error("drawing backend failure: {0}")]
    Backend(String),
}
