//! Record builder: one file's lines to transaction records.
//!
//! A pure fold with per-file state only (pending group values, the record
//! being built, a label counter), so files can be parsed independently and
//! merged afterwards.
//!
//! ```text
//! CCCODE,C01          ─┐
//! NO_TRN,2             ├─▶ special columns: CCCODE [C01, ""], NO_TRN [2, ""]
//! CDATE,0412          ─┐
//! TRANSACTION_NO,7     ├─▶ Transaction 1 { CDATE, TRANSACTION_NO }
//! CDATE,0413          ─┐
//! TRANSACTION_NO,8     ├─▶ Transaction 2 { CDATE, TRANSACTION_NO }
//! Transaction,END        (footer, ignored)
//! ```

use serde::Serialize;

use crate::layout::Layout;
use crate::models::{ClampedCount, SkipReason, SkippedLine, SourceFile, TransactionRecord};
use crate::parser::{split_key_value, split_lines};
use super::prescan::prescan_group;
use super::special::SpecialColumns;

/// Everything reconstructed from one file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileParse {
    /// Index of the source file.
    pub source: usize,
    /// Records in file order.
    pub records: Vec<TransactionRecord>,
    /// Padded special field sequences emitted by this file.
    pub specials: SpecialColumns,
    /// Lines that were ignored.
    pub skipped: Vec<SkippedLine>,
    /// Set when the group count was above the expansion cap.
    pub clamped: Option<ClampedCount>,
}

/// Label of the `n`-th record of a file (1-based).
pub fn record_label(n: usize) -> String {
    format!("Transaction {}", n)
}

/// Rebuild the records and special columns of one file.
pub fn build_file(source: &SourceFile, layout: &Layout) -> FileParse {
    let lines = split_lines(&source.content);
    let mut pending = prescan_group(&lines, layout);
    let clamped = pending.excess_count(layout).map(|requested| ClampedCount {
        file: source.index,
        requested,
    });

    let mut specials = SpecialColumns::new(layout);
    let mut records = Vec::new();
    let mut skipped = Vec::new();
    let mut label_counter = 1;
    let mut current = TransactionRecord::new(source.index, record_label(label_counter));

    for (line_idx, line) in lines.iter().enumerate() {
        if line.is_empty() {
            continue;
        }

        let skip = |reason| SkippedLine {
            file: source.index,
            line: line_idx + 1,
            reason,
        };

        let Some((key, value)) = split_key_value(line) else {
            skipped.push(skip(SkipReason::MissingSeparator));
            continue;
        };

        if key == layout.footer {
            continue;
        }

        if layout.is_special(key) {
            // Count is read before taking, so the count field itself expands too
            let count = pending.count(layout);
            match pending.take(key) {
                Some(group_value) => specials.push_expanded(key, &group_value, count),
                None => skipped.push(skip(SkipReason::DroppedSpecial)),
            }
            continue;
        }

        if key == layout.record_start && !current.is_empty() {
            label_counter += 1;
            let next = TransactionRecord::new(source.index, record_label(label_counter));
            records.push(std::mem::replace(&mut current, next));
        }

        current.insert(key, value);
    }

    if !current.is_empty() {
        records.push(current);
    }

    FileParse {
        source: source.index,
        records,
        specials,
        skipped,
        clamped,
    }
}
