//! Error types for valida-report

use thiserror::Error;
use valida_stats::StatsError;

use crate::render::RenderError;

/// Errors raised while turning a report into charts or files
#[derive(Error, Debug)]
pub enum ReportError {
    /// Document compilation failed
    #[error("Render failed: {0}")]
    Render(#[from] RenderError),

    /// Chart geometry could not be computed
    #[error("Cannot draw {chart}: {source}")]
    Chart {
        chart: &'static str,
        #[source]
        source: StatsError,
    },

    /// Renderer returned a different output kind than requested
    #[error("Renderer produced {actual} output, expected {expected}")]
    UnexpectedOutput {
        expected: &'static str,
        actual: &'static str,
    },

    /// Filesystem error while writing an export
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Temporary file could not be moved to its destination
    #[error("Failed to persist export: {0}")]
    Persist(#[from] tempfile::PersistError),
}

/// Result type alias for report operations
pub type ReportResult<T> = Result<T, ReportError>;
