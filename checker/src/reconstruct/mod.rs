//! Transaction reconstruction.
//!
//! Rebuilds transaction records from flat `KEY,VALUE` batch files:
//! - Prescan: group header values (merchant, date, count, ...)
//! - Builder: per-file fold into records and padded special columns
//! - Aggregate: merge files, sort by transaction number
//! - Matrix/Gaps: field-by-transaction matrix and missing numbers
//! - Render/Export: display table and comma-joined export

pub mod aggregate;
pub mod builder;
pub mod export;
pub mod gaps;
pub mod matrix;
pub mod policy;
pub mod prescan;
pub mod render;
pub mod special;

pub use aggregate::{identifiers, merge_files, sort_records, Aggregate};
pub use builder::{build_file, FileParse};
pub use export::{export_matrix, parse_export, DOWNLOAD_NAME};
pub use gaps::{find_gaps, GapReport};
pub use matrix::FieldMatrix;
pub use policy::{count_policy, identifier_policy, strip_commas, MAX_GROUP_COUNT};
pub use prescan::{prescan_group, PendingGroup};
pub use render::{render_page, RenderedTable};
pub use special::{expand, SpecialColumns};

use serde::Serialize;

use crate::layout::Layout;
use crate::models::{ClampedCount, SkippedLine, SourceFile};

/// Result of reconstructing a batch of files.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Reconstruction {
    pub matrix: FieldMatrix,
    pub gaps: GapReport,
    pub record_count: usize,
    pub skipped: Vec<SkippedLine>,
    pub clamped: Vec<ClampedCount>,
}

/// Parse every source independently, then merge at a single barrier.
pub fn reconstruct(sources: &[SourceFile], layout: &Layout) -> Reconstruction {
    let parses: Vec<FileParse> = sources.iter().map(|s| build_file(s, layout)).collect();
    let aggregate = merge_files(parses, layout);

    let gaps = GapReport::new(
        layout.identifier.clone(),
        identifiers(&aggregate.records, layout),
    );
    let matrix = FieldMatrix::build(&aggregate.records, aggregate.specials);

    Reconstruction {
        matrix,
        gaps,
        record_count: aggregate.records.len(),
        skipped: aggregate.skipped,
        clamped: aggregate.clamped,
    }
}
