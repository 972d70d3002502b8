//! Plain comma-joined export of a [`FieldMatrix`].
//!
//! Each field becomes one line: `KEY,v1,v2,...`. Values are written raw:
//! no quoting and no escaping, so a value containing a comma or a quote does
//! not survive a re-parse. The transposer export quotes every cell instead.

use super::matrix::FieldMatrix;

/// File name offered for the export.
pub const DOWNLOAD_NAME: &str = "downloadedcsv.txt";

/// Serialize the matrix, one `\n`-terminated line per field.
pub fn export_matrix(matrix: &FieldMatrix) -> String {
    let mut out = String::new();
    for (key, values) in matrix.rows() {
        out.push_str(key);
        out.push(',');
        out.push_str(&values.join(","));
        out.push('\n');
    }
    out
}

/// Parse an export back into a matrix.
///
/// Inverse of [`export_matrix`] for values without commas or quotes. Lines
/// without a comma are taken as fields with no values.
pub fn parse_export(text: &str) -> FieldMatrix {
    let mut matrix = FieldMatrix::new();
    for line in text.lines() {
        if line.is_empty() {
            continue;
        }
        match line.split_once(',') {
            Some((key, rest)) => {
                matrix.set(key, rest.split(',').map(str::to_string).collect());
            }
            None => matrix.set(line, Vec::new()),
        }
    }
    matrix
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> FieldMatrix {
        let mut m = FieldMatrix::new();
        m.set("CCCODE", vec!["C01".into(), "".into(), "".into()]);
        m.set("CDATE", vec!["0412".into(), "0412".into(), "0413".into()]);
        m.set("TIP", vec!["".into(), "2.00".into(), "".into()]);
        m
    }

    #[test]
    fn test_export_format() {
        assert_eq!(
            export_matrix(&sample()),
            "CCCODE,C01,,\nCDATE,0412,0412,0413\nTIP,,2.00,\n"
        );
    }

    #[test]
    fn test_export_then_parse_restores_matrix() {
        let matrix = sample();
        assert_eq!(parse_export(&export_matrix(&matrix)), matrix);
    }

    #[test]
    fn test_values_are_not_escaped() {
        let mut m = FieldMatrix::new();
        m.set("MERCHANT_NAME", vec![r#"ACME "EAST", INC."#.into()]);
        assert_eq!(export_matrix(&m), "MERCHANT_NAME,ACME \"EAST\", INC.\n");
    }

    #[test]
    fn test_empty_sequence_exports_trailing_comma() {
        let mut m = FieldMatrix::new();
        m.set("TRN_DATE", Vec::new());
        assert_eq!(export_matrix(&m), "TRN_DATE,\n");
        // Indistinguishable from a single empty value once exported
        assert_eq!(parse_export("TRN_DATE,").get("TRN_DATE").unwrap(), [""]);
    }
}
