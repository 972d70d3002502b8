//! Domain models shared by both pipelines.
//!
//! - [`SourceFile`] - A decoded input file and its position in the selection
//! - [`TransactionRecord`] - One reconstructed transaction (ordered field map)
//! - [`SkippedLine`] - A malformed line that was ignored, with the reason

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// =============================================================================
// Input Files
// =============================================================================

/// A decoded input file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceFile {
    /// Position in the user's selection (0-based).
    pub index: usize,
    /// Display name (file name component of the path).
    pub name: String,
    /// Encoding the bytes were decoded from.
    pub encoding: String,
    /// Decoded text content.
    pub content: String,
}

impl SourceFile {
    /// Build an in-memory UTF-8 source.
    pub fn new(index: usize, name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            index,
            name: name.into(),
            encoding: "utf-8".to_string(),
            content: content.into(),
        }
    }
}

// =============================================================================
// Transaction Records
// =============================================================================

/// One reconstructed transaction.
///
/// Values live in a map; `order` remembers the first-sight order of keys so
/// rendering never depends on map iteration order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// Index of the file this record came from.
    pub source: usize,
    /// Per-file label, e.g. `Transaction 3`.
    pub label: String,
    order: Vec<String>,
    values: HashMap<String, String>,
}

impl TransactionRecord {
    pub fn new(source: usize, label: impl Into<String>) -> Self {
        Self {
            source,
            label: label.into(),
            order: Vec::new(),
            values: HashMap::new(),
        }
    }

    /// Set a field. A repeated key overwrites the value and keeps its position.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        if !self.values.contains_key(&key) {
            self.order.push(key.clone());
        }
        self.values.insert(key, value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Field names in first-sight order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }
}

// =============================================================================
// Skipped Lines
// =============================================================================

/// Why a line was ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// No comma, so no `KEY,VALUE` pair.
    MissingSeparator,
    /// A special field line whose value was not emitted: already emitted
    /// earlier in the file, or seen only after the count field.
    DroppedSpecial,
}

/// A malformed line that was silently ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkippedLine {
    /// Index of the source file.
    pub file: usize,
    /// 1-based line number.
    pub line: usize,
    pub reason: SkipReason,
}

/// A group count above the expansion cap. The group was expanded to the cap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClampedCount {
    /// Index of the source file.
    pub file: usize,
    /// Count as written in the file.
    pub requested: usize,
}
