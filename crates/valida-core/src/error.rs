//! Error types for valida-core
//!
//! Provides error handling for:
//! - Dataset extraction from a loaded table
//! - Engine failures on the primary `value` series
//! - Configuration loading and validation

use thiserror::Error;
use valida_io::IoError;
use valida_stats::StatsError;

/// Main error type for valida operations
#[derive(Error, Debug)]
pub enum ValidaError {
    /// Table loading errors
    #[error("Failed to read table: {0}")]
    Io(#[from] IoError),

    /// Dataset extraction errors
    #[error("Invalid dataset: {0}")]
    Dataset(#[from] DatasetError),

    /// Engine errors
    #[error("Validation failed: {0}")]
    Engine(#[from] EngineError),

    /// Configuration errors
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),
}

/// Errors related to building a dataset
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DatasetError {
    /// Required column absent from the table
    #[error("Column '{field}' not found in dataset")]
    FieldNotFound { field: String },

    /// Column has the wrong type
    #[error("Type mismatch for column '{field}': expected {expected}, got {actual}")]
    TypeMismatch {
        field: String,
        expected: String,
        actual: String,
    },

    /// Paired series differ in length
    #[error("Column '{field}' has {actual} entries, expected {expected}")]
    LengthMismatch {
        field: String,
        expected: usize,
        actual: usize,
    },
}

/// Errors that abort a whole report
///
/// Only the primary `value` series and the reference value can fail a
/// report; problems in optional columns mark their block unavailable.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    /// Too few observations for the sample standard deviation
    #[error("Insufficient data in '{series}': need at least {needed} points, got {got}")]
    InsufficientData {
        series: String,
        needed: usize,
        got: usize,
    },

    /// Non-finite or otherwise unusable series
    #[error("Invalid data in '{series}': {source}")]
    InvalidSeries {
        series: String,
        #[source]
        source: StatsError,
    },

    /// NaN or infinite reference value
    #[error("Reference value must be finite, got {0}")]
    InvalidReference(f64),
}

impl EngineError {
    /// Attach a series name to a statistics failure
    pub fn for_series(series: &str, err: StatsError) -> Self {
        match err {
            StatsError::InsufficientData { needed, got } => EngineError::InsufficientData {
                series: series.to_string(),
                needed,
                got,
            },
            source => EngineError::InvalidSeries {
                series: series.to_string(),
                source,
            },
        }
    }
}

/// Configuration validation error
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Value is out of valid range
    #[error("Value out of range: {0}")]
    OutOfRange(String),

    /// Two settings conflict
    #[error("Conflicting settings: {0}")]
    Conflict(String),

    /// Config file could not be read
    #[error("Failed to read config: {0}")]
    Read(#[from] std::io::Error),

    /// TOML syntax or schema error
    #[error("Failed to parse TOML config: {0}")]
    Toml(#[from] toml::de::Error),

    /// JSON syntax or schema error
    #[error("Failed to parse JSON config: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for valida operations
pub type ValidaResult<T> = Result<T, ValidaError>;

/// Result type alias for dataset operations
pub type DatasetResult<T> = Result<T, DatasetError>;

/// Result type alias for engine operations
pub type EngineResult<T> = Result<T, EngineError>;
