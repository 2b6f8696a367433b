//! Error types for Trellis
//!
//! These are engine faults: malformed inputs handed to the checker. Problems
//! found *in* a canvas are reported as taxonomy records, never as errors.

use thiserror::Error;

/// The main error type for Trellis operations
#[derive(Debug, Error)]
pub enum TrellisError {
    #[error("Component id must not be empty")]
    EmptyComponentId,

    #[error("Component '{id}' has non-finite {field}: {value}")]
    NonFiniteGeometry {
        id: String,
        field: &'static str,
        value: f64,
    },

    #[error("Invalid canvas bounds: width {width}, height {height}")]
    InvalidCanvasBounds { width: f64, height: f64 },

    #[error("Duplicate component id: {0}")]
    DuplicateComponentId(String),

    #[error("Component not found: {0}")]
    ComponentNotFound(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParseError(String),

    #[error("TOML serialization error: {0}")]
    TomlSerError(String),

    #[error("JSON error: {0}")]
    JsonError(String),
}

/// Result type alias for Trellis operations
pub type Result<T> = std::result::Result<T, TrellisError>;

impl From<toml::de::Error> for TrellisError {
    fn from(err: toml::de::Error) -> Self {
        TrellisError::TomlParseError(err.to_string())
    }
}

impl From<toml::ser::Error> for TrellisError {
    fn from(err: toml::ser::Error) -> Self {
        TrellisError::TomlSerError(err.to_string())
    }
}

impl From<serde_json::Error> for TrellisError {
    fn from(err: serde_json::Error) -> Self {
        TrellisError::JsonError(err.to_string())
    }
}
