//! Error types for the RTRWH advisor service

use thiserror::Error;

/// Result type alias for advisor operations
pub type Result<T> = std::result::Result<T, ReportError>;

#[derive(Error, Debug)]
pub enum ReportError {

    // =============================
    // Service Errors
    // =============================

    /// Required configuration missing or invalid at startup. Fatal.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Any failure in the external analysis call path: transport, non-2xx
    /// status, or a payload that does not conform to the report schema.
    /// Carries the externally-facing message only; the underlying cause is
    /// logged where the failure is detected.
    #[error("Analysis error: {0}")]
    Analysis(String),

    // =============================
    // External Library Conversions
    // =============================

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
