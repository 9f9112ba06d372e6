use thiserror::Error;

/// A result type for sensitivity analysis
pub type Result<T> = std::result::Result<T, SensitivityError>;

/// An error raised by the Morris screening method
#[derive(Error, Debug)]
pub enum SensitivityError {
    /// When an invalid value is encountered
    #[error("Value error: {0}")]
    InvalidValue(String),
    /// When dimensions of the given arrays do not agree
    #[error("Dimension mismatch for {what}: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// name of the mismatching quantity
        what: String,
        /// expected dimension
        expected: usize,
        /// actual dimension
        actual: usize,
    },
    /// When input samples are not made of Morris trajectories
    #[error("Trajectory {trajectory} is invalid at step {step}: {reason}")]
    BadTrajectory {
        /// index of the trajectory
        trajectory: usize,
        /// index of the faulty step within the trajectory
        step: usize,
        /// description of the problem
        reason: String,
    },
    /// When the design of experiments fails
    #[error("DOE error")]
    DoeError(#[from] morrisbox_doe::DoeError),
    /// When IO fails
    #[error("IO error")]
    IoError(#[from] std::io::Error),
    /// When numpy array read fails
    #[error("IO error")]
    ReadNpyError(#[from] ndarray_npy::ReadNpyError),
    /// When numpy array write fails
    #[error("IO error")]
    WriteNpyError(#[from] ndarray_npy::WriteNpyError),
    /// When JSON (de)serialization fails
    #[cfg(feature = "serializable")]
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}
