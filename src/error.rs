//! # Error Types
//!
//! This module defines error types used throughout the zpl-preview library.
//!
//! Most degraded input never reaches these types: unknown directives,
//! unparseable arguments and unterminated fields are resolved inside the
//! interpreter. Errors here cover the collaborators (symbol generation,
//! fonts, PNG encoding) and host configuration.

use thiserror::Error;

/// Main error type for zpl-preview operations
#[derive(Debug, Error)]
pub enum PreviewError {
    /// The matrix symbol generator could not encode the content
    #[error("Symbol generation failed: {0}")]
    Symbol(String),

    /// Outline font data was rejected
    #[error("Font error: {0}")]
    Font(String),

    /// PNG encoding error
    #[error("Image encoding error: {0}")]
    ImageEncode(String),

    /// Invalid host configuration value
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// JSON (de)serialization error wrapper
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
