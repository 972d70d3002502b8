//! Text decoding and line/field splitting.
//!
//! Both pipelines read raw bytes, decode them (auto-detecting legacy
//! encodings) and then split the text into lines and comma-separated fields.
//! No pipeline-specific logic here.

/// Byte-order mark some exporters put in front of UTF-8 files.
const UTF8_BOM: char = '\u{feff}';

/// Detect the encoding of raw bytes using chardet
pub fn detect_encoding(bytes: &[u8]) -> String {
    let result = chardet::detect(bytes);
    let charset = result.0;

    // Normalize charset names
    match charset.to_lowercase().as_str() {
        "ascii" | "utf-8" | "utf8" => "utf-8".to_string(),
        "iso-8859-1" | "iso-8859-15" | "latin-1" | "latin1" => "iso-8859-1".to_string(),
        "windows-1252" | "cp1252" => "windows-1252".to_string(),
        _ => charset,
    }
}

/// Decode bytes with a named encoding. Unknown encodings decode as lossy UTF-8.
pub fn decode_content(bytes: &[u8], encoding: &str) -> String {
    match encoding.to_lowercase().as_str() {
        "iso-8859-1" | "latin-1" | "latin1" => {
            encoding_rs::ISO_8859_15.decode(bytes).0.into_owned()
        }
        "windows-1252" | "cp1252" => encoding_rs::WINDOWS_1252.decode(bytes).0.into_owned(),
        _ => String::from_utf8_lossy(bytes).into_owned(),
    }
}

/// Decode a file's bytes, returning `(text, encoding)`.
///
/// Valid UTF-8 is taken as-is; anything else goes through detection.
pub fn decode_bytes(bytes: &[u8]) -> (String, String) {
    let (text, encoding) = match std::str::from_utf8(bytes) {
        Ok(text) => (text.to_string(), "utf-8".to_string()),
        Err(_) => {
            let encoding = detect_encoding(bytes);
            (decode_content(bytes, &encoding), encoding)
        }
    };

    match text.strip_prefix(UTF8_BOM) {
        Some(rest) => (rest.to_string(), encoding),
        None => (text, encoding),
    }
}

/// Split content on `\n` and trim every line. Blank lines are kept so line
/// numbers stay meaningful.
pub fn split_lines(content: &str) -> Vec<&str> {
    content.split('\n').map(str::trim).collect()
}

/// Split a line into a trimmed `(key, value)` pair.
///
/// The split stops after the first comma, so any further commas stay in the
/// value. Lines without a comma yield `None`.
///
/// # Example
/// ```
/// use linegrid::parser::split_key_value;
///
/// assert_eq!(split_key_value("AMOUNT, 1,250.00"), Some(("AMOUNT", "1,250.00")));
/// assert_eq!(split_key_value("END OF FILE"), None);
/// ```
pub fn split_key_value(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.split_once(',')?;
    Some((key.trim(), value.trim()))
}

/// Split a line on every comma, without trimming or quote handling.
pub fn split_fields(line: &str) -> Vec<&str> {
    line.split(',').collect()
}

/// Parse the leading integer of a string: optional whitespace, an optional
/// sign, then decimal digits. Trailing text is ignored (`"12abc"` is 12).
/// Returns `None` when there are no digits or the value overflows `i64`.
pub fn parse_leading_int(text: &str) -> Option<i64> {
    let text = text.trim_start();
    let (negative, digits) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };

    let end = digits
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    let magnitude: i64 = digits[..end].parse().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_value_caps_at_two_parts() {
        assert_eq!(split_key_value("MERCHANT_NAME,ACME, INC."), Some(("MERCHANT_NAME", "ACME, INC.")));
        assert_eq!(split_key_value(" CDATE , 0412 "), Some(("CDATE", "0412")));
        assert_eq!(split_key_value("KEY,"), Some(("KEY", "")));
    }

    #[test]
    fn test_key_value_requires_comma() {
        assert_eq!(split_key_value("no separator here"), None);
        assert_eq!(split_key_value(""), None);
    }

    #[test]
    fn test_split_lines_trims() {
        let lines = split_lines("  A,1 \r\nB,2\n\nC,3");
        assert_eq!(lines, vec!["A,1", "B,2", "", "C,3"]);
    }

    #[test]
    fn test_split_fields_keeps_empties() {
        assert_eq!(split_fields("a,,c"), vec!["a", "", "c"]);
        assert_eq!(split_fields(""), vec![""]);
    }

    #[test]
    fn test_parse_leading_int() {
        assert_eq!(parse_leading_int("42"), Some(42));
        assert_eq!(parse_leading_int("  007"), Some(7));
        assert_eq!(parse_leading_int("-3"), Some(-3));
        assert_eq!(parse_leading_int("+8"), Some(8));
        assert_eq!(parse_leading_int("12abc"), Some(12));
        assert_eq!(parse_leading_int("abc"), None);
        assert_eq!(parse_leading_int(""), None);
        assert_eq!(parse_leading_int("-"), None);
        assert_eq!(parse_leading_int("99999999999999999999"), None);
    }

    #[test]
    fn test_decode_utf8_strips_bom() {
        let bytes = "\u{feff}CDATE,0101".as_bytes();
        let (text, encoding) = decode_bytes(bytes);
        assert_eq!(text, "CDATE,0101");
        assert_eq!(encoding, "utf-8");
    }

    #[test]
    fn test_latin1_decoding() {
        // "Société" in ISO-8859-1
        let bytes: &[u8] = &[0x53, 0x6F, 0x63, 0x69, 0xE9, 0x74, 0xE9];
        let decoded = decode_content(bytes, "iso-8859-1");
        assert_eq!(decoded, "Société");
    }

    #[test]
    fn test_invalid_utf8_is_still_decoded() {
        let bytes: &[u8] = &[b'K', b',', 0xE9, b't', b'e'];
        let (text, _) = decode_bytes(bytes);
        assert!(text.starts_with("K,"));
        assert_eq!(text.chars().count(), 5);
    }
}
