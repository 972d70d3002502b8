//! Named defaulting policies.
//!
//! Malformed numbers never fail the pipeline; they fall back to the values
//! below. Keeping each rule in one function lets tests pin them down.

use crate::parser::parse_leading_int;

/// Slots used when the group count is absent, unparseable or below one.
pub const DEFAULT_GROUP_COUNT: usize = 1;

/// Most slots one special value may expand into.
pub const MAX_GROUP_COUNT: usize = 10_000;

/// Sort key for records whose identifier is missing or unparseable.
pub const DEFAULT_IDENTIFIER: i64 = 0;

/// Group count as written, before the cap.
pub fn requested_count(raw: Option<&str>) -> usize {
    raw.and_then(parse_leading_int)
        .and_then(|n| usize::try_from(n).ok())
        .filter(|&n| n >= 1)
        .unwrap_or(DEFAULT_GROUP_COUNT)
}

/// Number of slots a special value expands into, at most [`MAX_GROUP_COUNT`].
pub fn count_policy(raw: Option<&str>) -> usize {
    requested_count(raw).min(MAX_GROUP_COUNT)
}

/// Sort key of a record's identifier. Malformed records sort to the front.
pub fn identifier_policy(raw: Option<&str>) -> i64 {
    raw.and_then(parse_leading_int).unwrap_or(DEFAULT_IDENTIFIER)
}

/// Rendered cells drop every comma; exports keep them.
pub fn strip_commas(value: &str) -> String {
    value.replace(',', "")
}
