//! Group-level ("special") field columns.
//!
//! A special value applies to the next `count` records of its group but is
//! stored once: the first slot holds the value, the remaining slots are
//! empty padding.

use serde::Serialize;

use crate::layout::Layout;

/// Expand a group value into `count` slots.
///
/// ```
/// use linegrid::reconstruct::special::expand;
///
/// assert_eq!(expand("ABC", 3), vec!["ABC", "", ""]);
/// ```
pub fn expand(value: &str, count: usize) -> Vec<String> {
    let mut slots = Vec::with_capacity(count.max(1));
    slots.push(value.to_string());
    slots.resize(count.max(1), String::new());
    slots
}

/// Padded sequences for every special field, in preferred order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpecialColumns {
    columns: Vec<(String, Vec<String>)>,
}

impl SpecialColumns {
    /// One empty column per special field of the layout.
    pub fn new(layout: &Layout) -> Self {
        Self {
            columns: layout
                .special_fields
                .iter()
                .map(|f| (f.clone(), Vec::new()))
                .collect(),
        }
    }

    /// Append `value` expanded to `count` slots. Unknown keys are ignored.
    pub fn push_expanded(&mut self, key: &str, value: &str, count: usize) {
        if let Some((_, column)) = self.columns.iter_mut().find(|(k, _)| k == key) {
            column.extend(expand(value, count));
        }
    }

    /// Append another file's columns after ours, field by field.
    pub fn append(&mut self, other: SpecialColumns) {
        for (key, values) in other.columns {
            match self.columns.iter_mut().find(|(k, _)| *k == key) {
                Some((_, column)) => column.extend(values),
                None => self.columns.push((key, values)),
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&[String]> {
        self.columns
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_slice())
    }

    /// `(field, values)` in preferred order.
    pub fn into_columns(self) -> Vec<(String, Vec<String>)> {
        self.columns
    }
}
