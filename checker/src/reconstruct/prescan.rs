//! Group metadata pre-scan.
//!
//! Before records are built, each file is scanned once for the values of its
//! special fields. The scan stops at the count field, which closes the group
//! header.

use std::collections::HashMap;

use crate::layout::Layout;
use crate::parser::split_key_value;
use super::policy::{count_policy, requested_count};

/// Special values captured by the pre-scan, waiting to be emitted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingGroup {
    values: HashMap<String, String>,
}

impl PendingGroup {
    /// Take the pending value of `key` if it is non-empty.
    ///
    /// The slot is cleared either way, so a value is emitted at most once.
    pub fn take(&mut self, key: &str) -> Option<String> {
        self.values.remove(key).filter(|v| !v.is_empty())
    }

    /// Slots per special value, from the still-pending count field.
    pub fn count(&self, layout: &Layout) -> usize {
        count_policy(self.values.get(&layout.count_field).map(String::as_str))
    }

    /// Count as written, when it exceeds the expansion cap.
    pub fn excess_count(&self, layout: &Layout) -> Option<usize> {
        let raw = self.values.get(&layout.count_field).map(String::as_str);
        let requested = requested_count(raw);
        (requested > count_policy(raw)).then_some(requested)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Capture special field values up to and including the count field.
///
/// A special field seen twice before the count field keeps its first value.
pub fn prescan_group(lines: &[&str], layout: &Layout) -> PendingGroup {
    let mut pending = PendingGroup::default();

    for line in lines {
        let Some((key, value)) = split_key_value(line) else {
            continue;
        };

        if layout.is_special(key) {
            pending
                .values
                .entry(key.to_string())
                .or_insert_with(|| value.to_string());
        }
        if key == layout.count_field {
            break;
        }
    }

    pending
}
