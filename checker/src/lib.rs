//! # linegrid - line-oriented CSV transposer and transaction reconstructor
//!
//! Two independent pipelines over local text files:
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌──────────────┐     ┌─────────────┐
//! │ Text files  │────▶│   Reader    │────▶│  Transpose   │────▶│ quoted CSV  │
//! │ (ISO/UTF8)  │     │ (concurrent)│     │ line→column  │     │ / HTML      │
//! └─────────────┘     └─────────────┘     ├──────────────┤     ├─────────────┤
//!                                         │ Reconstruct  │────▶│ matrix CSV  │
//!                                         │ KEY,VALUE→tx │     │ + gaps      │
//!                                         └──────────────┘     └─────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use linegrid::{run_reconstruct, export_matrix, Layout};
//!
//! #[tokio::main]
//! async fn main() {
//!     let report = run_reconstruct(&["batch.txt"], &Layout::default()).await.unwrap();
//!     print!("{}", export_matrix(&report.result.matrix));
//! }
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Error types
//! - [`models`] - Source files, transaction records, skipped lines
//! - [`layout`] - Field names driving reconstruction
//! - [`parser`] - Decoding and line/field splitting
//! - [`reader`] - Concurrent file loading
//! - [`transpose`] - Line-to-column transposer
//! - [`reconstruct`] - Transaction reconstruction, gaps, render and export
//! - [`pipeline`] - End-to-end async pipelines
//! - [`logs`] - Log broadcasting

// Core modules
pub mod error;
pub mod logs;
pub mod models;

// Configuration
pub mod layout;

// Input
pub mod parser;
pub mod reader;

// Pipelines
pub mod html;
pub mod pipeline;
pub mod reconstruct;
pub mod transpose;

// =============================================================================
// Re-exports - Errors and models
// =============================================================================

pub use error::{ExportError, LayoutError, PipelineError};
pub use layout::Layout;
pub use models::{ClampedCount, SkipReason, SkippedLine, SourceFile, TransactionRecord};

// =============================================================================
// Re-exports - Parsing
// =============================================================================

pub use parser::{decode_bytes, parse_leading_int, split_key_value};
pub use reader::read_sources;

// =============================================================================
// Re-exports - Transposer
// =============================================================================

pub use transpose::{transpose, TransposeOptions, TransposedTable};

// =============================================================================
// Re-exports - Reconstruction
// =============================================================================

pub use reconstruct::{
    build_file,
    export_matrix,
    find_gaps,
    parse_export,
    reconstruct,
    FieldMatrix,
    GapReport,
    Reconstruction,
    RenderedTable,
};

// =============================================================================
// Re-exports - Pipeline
// =============================================================================

pub use pipeline::{run_reconstruct, run_transpose, ReconstructReport, TransposeReport};
