//! Render-ready views of a reconstructed batch.
//!
//! Cells are display text: missing values are empty and commas are removed
//! (see [`strip_commas`]). Exports use the raw values instead.

use serde::Serialize;

use crate::html;
use super::gaps::GapReport;
use super::matrix::FieldMatrix;
use super::policy::strip_commas;

/// Corner label of the field column.
pub const FIELD_HEADER: &str = "FIELD";

/// Header of the `n`-th transaction column (1-based).
pub fn column_header(n: usize) -> String {
    format!("Transaction {}", n)
}

/// A field-by-transaction table ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedTable {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RenderedTable {
    /// One row per field, one column per record index up to the widest field.
    pub fn from_matrix(matrix: &FieldMatrix) -> Self {
        let width = matrix.width();

        let mut header = Vec::with_capacity(width + 1);
        header.push(FIELD_HEADER.to_string());
        header.extend((1..=width).map(column_header));

        let rows: Vec<Vec<String>> = matrix
            .rows()
            .map(|(key, values)| {
                let mut row = Vec::with_capacity(width + 1);
                row.push(key.to_string());
                row.extend((0..width).map(|i| {
                    values.get(i).map(|v| strip_commas(v)).unwrap_or_default()
                }));
                row
            })
            .collect();

        Self { header, rows }
    }

    pub fn to_html(&self) -> String {
        html::table(&self.header, &self.rows)
    }
}

/// HTML block for the missing-number summary.
pub fn gap_report_html(report: &GapReport) -> String {
    let headline = format!("<p>{}</p>\n", html::escape(&report.headline()));
    if !report.has_gaps() {
        return headline;
    }

    let header = vec!["#".to_string(), format!("Missing {}", report.field)];
    let rows: Vec<Vec<String>> = report
        .rows()
        .map(|(i, n)| vec![i.to_string(), n.to_string()])
        .collect();

    headline + &html::table(&header, &rows)
}

/// Full HTML page: gap summary followed by the matrix table.
pub fn render_page(matrix: &FieldMatrix, report: &GapReport) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head><meta charset=\"utf-8\"><title>Transactions</title></head>\n<body>\n{}{}</body>\n</html>\n",
        gap_report_html(report),
        RenderedTable::from_matrix(matrix).to_html()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix() -> FieldMatrix {
        let mut m = FieldMatrix::new();
        m.set("NO_TRN", vec!["3".into(), "".into(), "".into()]);
        m.set("AMOUNT", vec!["1,250.00".into(), "7.50".into()]);
        m
    }

    #[test]
    fn test_header_spans_widest_field() {
        let table = RenderedTable::from_matrix(&matrix());
        assert_eq!(
            table.header,
            vec!["FIELD", "Transaction 1", "Transaction 2", "Transaction 3"]
        );
    }

    #[test]
    fn test_cells_pad_and_strip_commas() {
        let table = RenderedTable::from_matrix(&matrix());
        assert_eq!(table.rows[0], vec!["NO_TRN", "3", "", ""]);
        assert_eq!(table.rows[1], vec!["AMOUNT", "1250.00", "7.50", ""]);
    }

    #[test]
    fn test_empty_matrix_renders_header_only() {
        let table = RenderedTable::from_matrix(&FieldMatrix::new());
        assert_eq!(table.header, vec!["FIELD"]);
        assert!(table.rows.is_empty());
    }

    #[test]
    fn test_gap_report_html() {
        let with_gaps = GapReport::new("TRANSACTION_NO", vec![1, 3]);
        let html = gap_report_html(&with_gaps);
        assert!(html.contains("Missing TRANSACTION_NO count: 1"));
        assert!(html.contains("<th>Missing TRANSACTION_NO</th>"));
        assert!(html.contains("<td>1</td><td>2</td>"));

        let clean = GapReport::new("TRANSACTION_NO", vec![1, 2]);
        assert_eq!(gap_report_html(&clean), "<p>No missing TRANSACTION_NO found.</p>\n");
    }

    #[test]
    fn test_render_page_contains_both_parts() {
        let page = render_page(&matrix(), &GapReport::new("TRANSACTION_NO", vec![]));
        assert!(page.contains("No missing TRANSACTION_NO found."));
        assert!(page.contains("<td>1250.00</td>"));
    }
}
