//! Error types for lumen-morph

use thiserror::Error;

/// Errors that can occur during morphological operations
#[derive(Debug, Error)]
pub enum MorphError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] lumen_core::Error),
}

/// Result type for morphological operations
pub type MorphResult<T> = Result<T, MorphError>;
