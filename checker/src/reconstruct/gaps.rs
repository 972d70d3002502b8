//! Gap detection over the transaction-number field.

use serde::Serialize;
use std::collections::BTreeSet;

/// Most missing numbers listed individually. The count is always exact.
pub const MAX_LISTED_GAPS: usize = 10_000;

/// Integers in `[min, max]` of `values` that never occur, ascending, at most
/// [`MAX_LISTED_GAPS`] of them.
///
/// ```
/// use linegrid::reconstruct::gaps::find_gaps;
///
/// assert_eq!(find_gaps([1, 2, 4, 6]), vec![3, 5]);
/// assert!(find_gaps([5]).is_empty());
/// ```
pub fn find_gaps(values: impl IntoIterator<Item = i64>) -> Vec<i64> {
    let seen: BTreeSet<i64> = values.into_iter().collect();
    gaps_between(&seen).take(MAX_LISTED_GAPS).collect()
}

fn gaps_between(seen: &BTreeSet<i64>) -> impl Iterator<Item = i64> + '_ {
    seen.iter()
        .zip(seen.iter().skip(1))
        .flat_map(|(&lo, &hi)| (lo + 1)..hi)
}

fn gap_count(seen: &BTreeSet<i64>) -> u64 {
    seen.iter()
        .zip(seen.iter().skip(1))
        .map(|(&lo, &hi)| hi.abs_diff(lo) - 1)
        .sum()
}

/// Missing transaction numbers of a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GapReport {
    /// Identifier field the numbers were read from.
    pub field: String,
    /// How many identifiers were observed.
    pub observed: usize,
    /// Total count of missing numbers.
    pub missing_count: u64,
    /// Missing numbers, ascending, capped at [`MAX_LISTED_GAPS`].
    pub missing: Vec<i64>,
}

impl GapReport {
    pub fn new(field: impl Into<String>, values: Vec<i64>) -> Self {
        let observed = values.len();
        let seen: BTreeSet<i64> = values.into_iter().collect();

        Self {
            field: field.into(),
            observed,
            missing_count: gap_count(&seen),
            missing: gaps_between(&seen).take(MAX_LISTED_GAPS).collect(),
        }
    }

    pub fn has_gaps(&self) -> bool {
        self.missing_count > 0
    }

    /// More numbers are missing than are listed.
    pub fn is_truncated(&self) -> bool {
        self.missing_count > self.missing.len() as u64
    }

    /// One-line summary, as shown above the table.
    pub fn headline(&self) -> String {
        if self.has_gaps() {
            format!("Missing {} count: {}", self.field, self.missing_count)
        } else {
            format!("No missing {} found.", self.field)
        }
    }

    /// `(position, number)` rows of the missing-number table, 1-based.
    pub fn rows(&self) -> impl Iterator<Item = (usize, i64)> + '_ {
        self.missing.iter().enumerate().map(|(i, &n)| (i + 1, n))
    }
}
