//! Tabular transposer: every line of every file becomes a table column.
//!
//! ```text
//! day1.txt            day2.txt                      day1.txt - Line 1 | day1.txt - Line 2 | day2.txt - Line 1
//! ┌──────────────┐    ┌──────────────┐     Value 1  10                | 20                | 30
//! │ A,10,x       │    │ A,30,z       │  →  Value 2  x                 | y                 | z
//! │ B,20,y       │    └──────────────┘
//! └──────────────┘
//! ```
//!
//! The first field of a line is its key; the remaining fields fill the rows
//! by position. Rows therefore align by field position across all files.

use csv::{QuoteStyle, Terminator, WriterBuilder};
use serde::{Deserialize, Serialize};

use crate::error::{ExportError, ExportResult};
use crate::html;
use crate::models::SourceFile;
use crate::parser::split_fields;

/// File name offered for the export.
pub const DOWNLOAD_NAME: &str = "table_export.csv";

/// Default label of the row-label column.
pub const DEFAULT_CORNER: &str = "Field";

/// Header of a line column, e.g. `day1.txt - Line 3`.
pub fn column_header(file_name: &str, line_number: usize) -> String {
    format!("{} - Line {}", file_name, line_number)
}

/// Transposer options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransposeOptions {
    /// Fixed row template. When set, exactly these rows are produced and
    /// extra fields are dropped; otherwise rows grow to the longest line.
    #[serde(default)]
    pub row_labels: Option<Vec<String>>,

    /// Label of the row-label column.
    #[serde(default = "default_corner")]
    pub corner_label: String,
}

fn default_corner() -> String {
    DEFAULT_CORNER.to_string()
}

impl Default for TransposeOptions {
    fn default() -> Self {
        Self {
            row_labels: None,
            corner_label: default_corner(),
        }
    }
}

/// A transposed table: `rows[r][c]` is field `r + 1` of column `c`'s line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransposedTable {
    pub corner_label: String,
    /// One header per line column.
    pub headers: Vec<String>,
    /// Key (first field) of each line column.
    pub keys: Vec<String>,
    pub row_labels: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// One line of one file, split into key and values.
struct LineColumn {
    header: String,
    key: String,
    values: Vec<String>,
}

fn line_columns(source: &SourceFile) -> Vec<LineColumn> {
    source
        .content
        .trim()
        .split('\n')
        .enumerate()
        .map(|(i, line)| {
            let line = line.strip_suffix('\r').unwrap_or(line);
            let mut fields = split_fields(line).into_iter().map(str::to_string);
            LineColumn {
                header: column_header(&source.name, i + 1),
                key: fields.next().unwrap_or_default(),
                values: fields.collect(),
            }
        })
        .collect()
}

/// Build the table from sources, in the order given.
pub fn transpose(sources: &[SourceFile], options: &TransposeOptions) -> TransposedTable {
    let columns: Vec<LineColumn> = sources.iter().flat_map(line_columns).collect();

    let row_labels = match &options.row_labels {
        Some(labels) => labels.clone(),
        None => {
            let height = columns.iter().map(|c| c.values.len()).max().unwrap_or(0);
            (1..=height).map(|n| format!("Value {}", n)).collect()
        }
    };

    let rows: Vec<Vec<String>> = (0..row_labels.len())
        .map(|r| {
            columns
                .iter()
                .map(|c| c.values.get(r).cloned().unwrap_or_default())
                .collect()
        })
        .collect();

    TransposedTable {
        corner_label: options.corner_label.clone(),
        headers: columns.iter().map(|c| c.header.clone()).collect(),
        keys: columns.into_iter().map(|c| c.key).collect(),
        row_labels,
        rows,
    }
}

impl TransposedTable {
    /// Header row including the corner label.
    pub fn header_row(&self) -> Vec<String> {
        std::iter::once(self.corner_label.clone())
            .chain(self.headers.iter().cloned())
            .collect()
    }

    /// Data rows, each prefixed with its row label.
    pub fn labeled_rows(&self) -> Vec<Vec<String>> {
        self.row_labels
            .iter()
            .zip(&self.rows)
            .map(|(label, cells)| {
                std::iter::once(label.clone())
                    .chain(cells.iter().cloned())
                    .collect()
            })
            .collect()
    }

    /// Export as CSV: every cell quoted, quotes doubled, `\n` line ends.
    pub fn to_csv(&self) -> ExportResult<String> {
        let mut writer = WriterBuilder::new()
            .quote_style(QuoteStyle::Always)
            .terminator(Terminator::Any(b'\n'))
            .from_writer(Vec::new());

        writer.write_record(self.header_row())?;
        for row in self.labeled_rows() {
            writer.write_record(row)?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| ExportError::IoError(e.into_error()))?;
        Ok(String::from_utf8(bytes)?)
    }

    pub fn to_html(&self) -> String {
        html::table(&self.header_row(), &self.labeled_rows())
    }
}
