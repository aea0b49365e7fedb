//! Data models for the edit audit trail
//!
//! An audit record captures one changed cell: who changed it, when, and the
//! stringified values before and after. Records are append-only.

use super::Column;
use crate::constants::AUDIT_TIMESTAMP_FORMAT;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

// =============================================================================
// Cell Edits
// =============================================================================

/// A requested change to one cell of the dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellEdit {
    /// Row identity of the target record
    pub row_id: usize,

    /// Column to change
    pub column: Column,

    /// New value as text, parsed with the loader's field rules
    pub new_value: String,
}

impl CellEdit {
    pub fn new(row_id: usize, column: Column, new_value: impl Into<String>) -> Self {
        Self {
            row_id,
            column,
            new_value: new_value.into(),
        }
    }
}

// =============================================================================
// Audit Records
// =============================================================================

/// One row of the audit log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditRecord {
    /// Name of the user who made the change
    pub user: String,

    /// Local time of the change, second precision
    #[serde(with = "audit_timestamp")]
    pub timestamp: NaiveDateTime,

    /// Row identity of the changed record
    pub row_id: usize,

    /// Column name as it appears in the dataset header
    pub column_name: String,

    /// Value before the change, stringified
    pub old_value: String,

    /// Value after the change, stringified
    pub new_value: String,
}

/// Serde adapter for the audit log's `YYYY-MM-DD HH:MM:SS` timestamps
mod audit_timestamp {
    use super::AUDIT_TIMESTAMP_FORMAT;
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(timestamp: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&timestamp.format(AUDIT_TIMESTAMP_FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(text.trim(), AUDIT_TIMESTAMP_FORMAT)
            .map_err(serde::de::Error::custom)
    }
}
