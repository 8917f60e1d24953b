//! Error types for the dash_charts crate
//!
//! Rendering itself never fails; these errors only surface at the edges
//! (configuration, chart requests, SVG output).

use thiserror::Error;

/// Errors that can occur around chart rendering
#[derive(Error, Debug)]
pub enum ChartError {
    /// Input data could not be interpreted
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for ChartError {
    fn from(err: serde_json::Error) -> Self {
        ChartError::InvalidData(err.to_string())
    }
}

/// Result type for chart operations
pub type ChartResult<T> = Result<T, ChartError>;
