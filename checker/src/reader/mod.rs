//! Concurrent file loading.
//!
//! Each path gets its own read task; all of them are joined before anything
//! is returned, so callers only ever see a complete batch. One failed read
//! aborts the whole batch.

use futures::future::try_join_all;
use std::path::{Path, PathBuf};

use crate::error::{PipelineError, PipelineResult};
use crate::models::SourceFile;
use crate::parser::decode_bytes;

/// Read and decode every path concurrently, in selection order.
///
/// # Errors
/// - [`PipelineError::NoInput`] when `paths` is empty (no I/O happens)
/// - [`PipelineError::Read`] for the first file that could not be read
pub async fn read_sources<P: AsRef<Path>>(paths: &[P]) -> PipelineResult<Vec<SourceFile>> {
    if paths.is_empty() {
        return Err(PipelineError::NoInput);
    }

    let tasks = paths.iter().enumerate().map(|(index, path)| {
        let path = path.as_ref().to_path_buf();
        tokio::spawn(async move { read_one(index, path).await })
    });

    // try_join_all keeps input order, whatever order the reads finish in
    let joined = try_join_all(tasks).await?;
    joined.into_iter().collect()
}

async fn read_one(index: usize, path: PathBuf) -> PipelineResult<SourceFile> {
    let bytes = tokio::fs::read(&path)
        .await
        .map_err(|source| PipelineError::Read { path: path.clone(), source })?;

    let (content, encoding) = decode_bytes(&bytes);

    Ok(SourceFile {
        index,
        name: display_name(&path),
        encoding,
        content,
    })
}

/// File name component of a path, or the whole path if it has none.
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
