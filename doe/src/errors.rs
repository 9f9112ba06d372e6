use thiserror::Error;

/// A result type for design of experiments
pub type Result<T> = std::result::Result<T, DoeError>;

/// An error raised when building or generating a design of experiments
#[derive(Error, Debug)]
pub enum DoeError {
    /// When the sampling space is ill-defined
    #[error("Bad sampling space: {0}")]
    BadSamplingSpace(String),
    /// When a value is invalid
    #[error("Value error: {0}")]
    InvalidValue(String),
    /// When dimensions of the given arguments do not agree
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// expected dimension
        expected: usize,
        /// actual dimension
        actual: usize,
    },
    /// When a trajectory can not be built from a starting point
    #[error("Trajectory error: {0}")]
    TrajectoryError(String),
}
