//! Reconstruction layout: which field names drive the transaction parser.
//!
//! The layout is plain JSON so a batch format with different markers can be
//! handled without recompiling:
//!
//! ```json
//! {
//!   "special_fields": ["CCCODE", "MERCHANT_NAME", "TRN_DATE", "NO_TRN"],
//!   "count_field": "NO_TRN",
//!   "record_start": "CDATE",
//!   "footer": "Transaction",
//!   "identifier": "TRANSACTION_NO"
//! }
//! ```
//!
//! Every key is optional and falls back to the defaults above.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

use crate::error::{LayoutError, LayoutResult};

/// Field names that drive transaction reconstruction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layout {
    /// Group-level fields, in preferred display order.
    #[serde(default = "default_special_fields")]
    pub special_fields: Vec<String>,

    /// Special field whose value is the group's record count.
    #[serde(default = "default_count_field")]
    pub count_field: String,

    /// Field whose recurrence starts a new record.
    #[serde(default = "default_record_start")]
    pub record_start: String,

    /// Footer marker, ignored wherever it appears.
    #[serde(default = "default_footer")]
    pub footer: String,

    /// Numeric transaction identifier used for sorting and gap detection.
    #[serde(default = "default_identifier")]
    pub identifier: String,
}

fn default_special_fields() -> Vec<String> {
    ["CCCODE", "MERCHANT_NAME", "TRN_DATE", "NO_TRN"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_count_field() -> String {
    "NO_TRN".to_string()
}

fn default_record_start() -> String {
    "CDATE".to_string()
}

fn default_footer() -> String {
    "Transaction".to_string()
}

fn default_identifier() -> String {
    "TRANSACTION_NO".to_string()
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            special_fields: default_special_fields(),
            count_field: default_count_field(),
            record_start: default_record_start(),
            footer: default_footer(),
            identifier: default_identifier(),
        }
    }
}

impl Layout {
    /// Parse and validate a layout from JSON.
    pub fn from_json(json: &str) -> LayoutResult<Self> {
        let layout: Layout = serde_json::from_str(json)?;
        layout.validate()?;
        Ok(layout)
    }

    /// Load and validate a layout file.
    pub fn from_file(path: impl AsRef<Path>) -> LayoutResult<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_json(&content)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn is_special(&self, key: &str) -> bool {
        self.special_fields.iter().any(|f| f == key)
    }

    /// Check names are non-empty, the count field is special and no marker
    /// doubles as a special field.
    pub fn validate(&self) -> LayoutResult<()> {
        if self.count_field.is_empty() {
            return Err(LayoutError::EmptyName("count_field"));
        }
        if self.record_start.is_empty() {
            return Err(LayoutError::EmptyName("record_start"));
        }
        if self.identifier.is_empty() {
            return Err(LayoutError::EmptyName("identifier"));
        }
        if self.footer.is_empty() {
            return Err(LayoutError::EmptyName("footer"));
        }

        let mut seen = HashSet::new();
        for field in &self.special_fields {
            if field.is_empty() {
                return Err(LayoutError::EmptyName("special_fields"));
            }
            if !seen.insert(field.as_str()) {
                return Err(LayoutError::DuplicateSpecial(field.clone()));
            }
        }

        if !self.is_special(&self.count_field) {
            return Err(LayoutError::CountNotSpecial(self.count_field.clone()));
        }

        let markers = [
            (&self.record_start, "record start marker"),
            (&self.footer, "footer marker"),
            (&self.identifier, "identifier field"),
        ];
        for (field, role) in markers {
            if self.is_special(field) {
                return Err(LayoutError::MarkerIsSpecial {
                    field: field.clone(),
                    role,
                });
            }
        }

        Ok(())
    }
}
