//! Error types for the glucose insights crate
//!
//! Calculators are total and never fail; only the surrounding surface
//! (configuration, file input, command line) returns these.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum InsightsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}
