//! Aggregation barrier: merge every file's parse into one batch.

use serde::Serialize;

use crate::layout::Layout;
use crate::models::{ClampedCount, SkippedLine, TransactionRecord};
use crate::parser::parse_leading_int;
use super::builder::FileParse;
use super::policy::identifier_policy;
use super::special::SpecialColumns;

/// All files merged, records sorted by identifier.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Aggregate {
    pub records: Vec<TransactionRecord>,
    pub specials: SpecialColumns,
    pub skipped: Vec<SkippedLine>,
    pub clamped: Vec<ClampedCount>,
}

/// Merge file parses in selection order, then sort records by identifier.
pub fn merge_files(mut parses: Vec<FileParse>, layout: &Layout) -> Aggregate {
    parses.sort_by_key(|p| p.source);

    let mut records = Vec::new();
    let mut specials = SpecialColumns::new(layout);
    let mut skipped = Vec::new();
    let mut clamped = Vec::new();

    for parse in parses {
        records.extend(parse.records);
        specials.append(parse.specials);
        skipped.extend(parse.skipped);
        clamped.extend(parse.clamped);
    }

    sort_records(&mut records, layout);

    Aggregate {
        records,
        specials,
        skipped,
        clamped,
    }
}

/// Stable ascending sort on the identifier field (see [`identifier_policy`]).
pub fn sort_records(records: &mut [TransactionRecord], layout: &Layout) {
    records.sort_by_key(|r| identifier_policy(r.get(&layout.identifier)));
}

/// Identifiers that are present and parse as integers, in record order.
pub fn identifiers(records: &[TransactionRecord], layout: &Layout) -> Vec<i64> {
    records
        .iter()
        .filter_map(|r| r.get(&layout.identifier))
        .filter_map(parse_leading_int)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(source: usize, label: &str, id: Option<&str>) -> TransactionRecord {
        let mut r = TransactionRecord::new(source, label);
        r.insert("CDATE", "0101");
        if let Some(id) = id {
            r.insert("TRANSACTION_NO", id);
        }
        r
    }

    fn file(source: usize, records: Vec<TransactionRecord>, cccode: &str) -> FileParse {
        let layout = Layout::default();
        let mut specials = SpecialColumns::new(&layout);
        specials.push_expanded("CCCODE", cccode, records.len());
        FileParse { source, records, specials, skipped: Vec::new(), clamped: None }
    }

    #[test]
    fn test_sort_is_stable_and_ascending() {
        let layout = Layout::default();
        let mut records = vec![
            record(0, "a", Some("3")),
            record(0, "b", Some("1")),
            record(0, "c", Some("3")),
            record(0, "d", Some("2")),
        ];
        sort_records(&mut records, &layout);

        let labels: Vec<_> = records.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, vec!["b", "d", "a", "c"]);
    }

    #[test]
    fn test_malformed_identifiers_sort_as_zero() {
        let layout = Layout::default();
        let mut records = vec![
            record(0, "five", Some("5")),
            record(0, "missing", None),
            record(0, "garbage", Some("N/A")),
            record(0, "minus", Some("-1")),
        ];
        sort_records(&mut records, &layout);

        let labels: Vec<_> = records.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, vec!["minus", "missing", "garbage", "five"]);
    }

    #[test]
    fn test_merge_keeps_selection_order_for_specials() {
        let layout = Layout::default();
        let second = file(1, vec![record(1, "x", Some("1"))], "C02");
        let first = file(0, vec![record(0, "y", Some("2")), record(0, "z", Some("3"))], "C01");

        let merged = merge_files(vec![second, first], &layout);

        assert_eq!(merged.specials.get("CCCODE").unwrap(), ["C01", "", "C02"]);
        let labels: Vec<_> = merged.records.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, vec!["x", "y", "z"]);
    }

    #[test]
    fn test_identifiers_skip_missing_and_invalid() {
        let layout = Layout::default();
        let records = vec![
            record(0, "a", Some("4")),
            record(0, "b", None),
            record(0, "c", Some("oops")),
            record(0, "d", Some("6")),
        ];
        assert_eq!(identifiers(&records, &layout), vec![4, 6]);
    }
}
