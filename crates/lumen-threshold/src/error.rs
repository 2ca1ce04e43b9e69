//! Error types for lumen-threshold

use thiserror::Error;

/// Errors that can occur during thresholding
#[derive(Debug, Error)]
pub enum ThresholdError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] lumen_core::Error),

    /// Invalid parameters
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),
}

/// Result type for thresholding operations
pub type ThresholdResult<T> = Result<T, ThresholdError>;
