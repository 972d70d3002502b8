//! Field-by-transaction matrix.
//!
//! Rows are field names, columns are record positions. Special fields come
//! first (preferred order) and carry their padded group sequences; regular
//! fields follow in encounter order with one value per record.

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use std::collections::HashMap;

use crate::models::TransactionRecord;
use super::special::SpecialColumns;

/// Ordered field → values mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldMatrix {
    order: Vec<String>,
    columns: HashMap<String, Vec<String>>,
}

impl FieldMatrix {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the matrix from sorted records and merged special columns.
    ///
    /// Regular fields are aligned by record index, with `""` where a record
    /// lacks the field. Special columns overwrite any record values under the
    /// same key.
    pub fn build(records: &[TransactionRecord], specials: SpecialColumns) -> Self {
        let mut matrix = Self::new();

        for (key, values) in specials.into_columns() {
            matrix.set(key, values);
        }

        let mut regular: Vec<&str> = Vec::new();
        for record in records {
            for key in record.keys() {
                if !matrix.columns.contains_key(key) && !regular.contains(&key) {
                    regular.push(key);
                }
            }
        }

        for key in regular {
            let values = records
                .iter()
                .map(|r| r.get(key).unwrap_or_default().to_string())
                .collect();
            matrix.set(key, values);
        }

        matrix
    }

    /// Set a field's values. New fields are appended to the order.
    pub fn set(&mut self, key: impl Into<String>, values: Vec<String>) {
        let key = key.into();
        if !self.columns.contains_key(&key) {
            self.order.push(key.clone());
        }
        self.columns.insert(key, values);
    }

    pub fn get(&self, key: &str) -> Option<&[String]> {
        self.columns.get(key).map(Vec::as_slice)
    }

    /// Field names in display order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// `(field, values)` in display order.
    pub fn rows(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.order
            .iter()
            .map(move |k| (k.as_str(), self.columns[k].as_slice()))
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Longest sequence over all fields; the rendered column count.
    pub fn width(&self) -> usize {
        self.columns.values().map(Vec::len).max().unwrap_or(0)
    }
}

impl Serialize for FieldMatrix {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.order.len()))?;
        for (key, values) in self.rows() {
            map.serialize_entry(key, values)?;
        }
        map.end()
    }
}
