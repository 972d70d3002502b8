//! Error types for the linegrid pipelines.
//!
//! - [`PipelineError`] - Top-level orchestration errors (no input, read failures, layout)
//! - [`LayoutError`] - Invalid or unreadable reconstruction layouts
//! - [`ExportError`] - CSV/HTML export failures
//!
//! Malformed input lines are deliberately *not* errors: they are collected as
//! [`crate::models::SkippedLine`] entries on the reports. Conversion between
//! levels is automatic via `From`, so `?` works across boundaries.

use std::path::PathBuf;
use thiserror::Error;

// =============================================================================
// Layout Errors
// =============================================================================

/// Errors while loading or validating a [`crate::layout::Layout`].
#[derive(Debug, Error)]
pub enum LayoutError {
    /// Failed to read the layout file.
    #[error("Failed to read layout file: {0}")]
    IoError(#[from] std::io::Error),

    /// Layout JSON could not be parsed.
    #[error("Invalid layout JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    /// A field name is empty.
    #[error("Layout field '{0}' must not be empty")]
    EmptyName(&'static str),

    /// The count field is not one of the special fields.
    #[error("Count field '{0}' must be listed among the special fields")]
    CountNotSpecial(String),

    /// A marker field collides with a special field.
    #[error("Field '{field}' cannot be both special and the {role}")]
    MarkerIsSpecial { field: String, role: &'static str },

    /// The same special field is listed twice.
    #[error("Special field '{0}' is listed more than once")]
    DuplicateSpecial(String),
}

// =============================================================================
// Export Errors
// =============================================================================

/// Errors while serializing results.
#[derive(Debug, Error)]
pub enum ExportError {
    /// CSV writer failure.
    #[error("CSV export failed: {0}")]
    Csv(#[from] csv::Error),

    /// IO error while writing output.
    #[error("Failed to write export: {0}")]
    IoError(#[from] std::io::Error),

    /// Writer produced bytes that are not UTF-8.
    #[error("Export produced invalid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

// =============================================================================
// Pipeline Errors (top-level)
// =============================================================================

/// Top-level pipeline errors.
///
/// Returned by [`crate::pipeline::run_transpose`] and
/// [`crate::pipeline::run_reconstruct`].
#[derive(Debug, Error)]
pub enum PipelineError {
    /// No files were selected; nothing was processed.
    #[error("Please select at least one input file")]
    NoInput,

    /// A file could not be read; the whole batch is aborted.
    #[error("Failed to read '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A background read task failed to complete.
    #[error("Read task failed: {0}")]
    Join(#[from] tokio::task::JoinError),

    /// Layout error.
    #[error("Layout error: {0}")]
    Layout(#[from] LayoutError),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for layout operations.
pub type LayoutResult<T> = Result<T, LayoutError>;

/// Result type for export operations.
pub type ExportResult<T> = Result<T, ExportError>;

/// Result type for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;
