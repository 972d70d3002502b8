//! High-level pipeline API.
//!
//! Each pipeline reads all files concurrently, waits for every read to
//! finish, then processes the batch on a single thread.
//!
//! # Example
//!
//! ```rust,ignore
//! use linegrid::{run_reconstruct, Layout};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let report = run_reconstruct(&["day1.txt", "day2.txt"], &Layout::default()).await?;
//!     println!("{}", report.result.gaps.headline());
//!     Ok(())
//! }
//! ```

use serde::Serialize;
use std::path::Path;

use crate::error::PipelineResult;
use crate::layout::Layout;
use crate::logs::{
    log_error, log_info, log_info_indent, log_success, log_warning, log_warning_indent,
};
use crate::models::{ClampedCount, SkippedLine, SourceFile};
use crate::reader::read_sources;
use crate::reconstruct::{reconstruct, Reconstruction, MAX_GROUP_COUNT};
use crate::transpose::{transpose, TransposeOptions, TransposedTable};

/// How many skipped lines are listed individually in the log.
const SKIPPED_LOG_LIMIT: usize = 5;

/// Input file information
#[derive(Debug, Clone, Serialize)]
pub struct FileInfo {
    pub name: String,
    pub encoding: String,
    pub line_count: usize,
}

impl From<&SourceFile> for FileInfo {
    fn from(source: &SourceFile) -> Self {
        Self {
            name: source.name.clone(),
            encoding: source.encoding.clone(),
            line_count: source.content.lines().count(),
        }
    }
}

/// Result of the transposer pipeline
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransposeReport {
    pub files: Vec<FileInfo>,
    pub table: TransposedTable,
    pub generated_at: String,
}

/// Result of the reconstruction pipeline
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReconstructReport {
    pub files: Vec<FileInfo>,
    pub layout: Layout,
    pub result: Reconstruction,
    pub generated_at: String,
}

/// Read files and transpose every line into a column.
pub async fn run_transpose<P: AsRef<Path>>(
    paths: &[P],
    options: &TransposeOptions,
) -> PipelineResult<TransposeReport> {
    let sources = load(paths).await?;

    log_info("🔄 Transposing lines into columns...");
    let table = transpose(&sources, options);
    log_success(format!(
        "{} columns x {} rows",
        table.headers.len(),
        table.row_labels.len()
    ));

    Ok(TransposeReport {
        files: sources.iter().map(FileInfo::from).collect(),
        table,
        generated_at: chrono::Utc::now().to_rfc3339(),
    })
}

/// Read batch files and reconstruct their transactions.
pub async fn run_reconstruct<P: AsRef<Path>>(
    paths: &[P],
    layout: &Layout,
) -> PipelineResult<ReconstructReport> {
    layout.validate().map_err(logged)?;
    let sources = load(paths).await?;

    log_info("📦 Reconstructing transactions...");
    let result = reconstruct(&sources, layout);
    log_success(format!(
        "{} transactions, {} fields",
        result.record_count,
        result.matrix.len()
    ));

    log_skipped(&result.skipped, &sources);
    log_clamped(&result.clamped, &sources);

    if result.gaps.has_gaps() {
        log_warning(result.gaps.headline());
        if result.gaps.is_truncated() {
            let listed = result.gaps.missing.len();
            log_warning_indent(format!("only the first {} are listed", listed), 1);
        }
    } else {
        log_success(result.gaps.headline());
    }

    Ok(ReconstructReport {
        files: sources.iter().map(FileInfo::from).collect(),
        layout: layout.clone(),
        result,
        generated_at: chrono::Utc::now().to_rfc3339(),
    })
}

async fn load<P: AsRef<Path>>(paths: &[P]) -> PipelineResult<Vec<SourceFile>> {
    log_info(format!("📖 Reading {} file(s)...", paths.len()));
    let sources = read_sources(paths).await.map_err(logged)?;
    for source in &sources {
        log_info_indent(format!("{} ({})", source.name, source.encoding), 1);
    }
    log_success(format!("Read {} file(s)", sources.len()));
    Ok(sources)
}

/// Broadcast a failure before it is returned to the caller.
fn logged<E: std::fmt::Display>(err: E) -> E {
    log_error(err.to_string());
    err
}

fn log_clamped(clamped: &[ClampedCount], sources: &[SourceFile]) {
    for entry in clamped {
        let name = sources
            .get(entry.file)
            .map(|s| s.name.as_str())
            .unwrap_or("?");
        log_warning(format!(
            "{}: group count {} capped at {}",
            name, entry.requested, MAX_GROUP_COUNT
        ));
    }
}

fn log_skipped(skipped: &[SkippedLine], sources: &[SourceFile]) {
    if skipped.is_empty() {
        return;
    }

    log_warning(format!("{} line(s) ignored", skipped.len()));
    for line in skipped.iter().take(SKIPPED_LOG_LIMIT) {
        let name = sources
            .get(line.file)
            .map(|s| s.name.as_str())
            .unwrap_or("?");
        log_warning_indent(format!("{}:{} ({:?})", name, line.line, line.reason), 1);
    }
    if skipped.len() > SKIPPED_LOG_LIMIT {
        log_warning_indent(format!("... +{}", skipped.len() - SKIPPED_LOG_LIMIT), 1);
    }
}
