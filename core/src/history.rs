//! Stock history journal entries.
//!
//! The journal is the audit trail: every stock mutation attributable to a
//! sale or a received purchase has exactly one entry with the matching
//! signed delta. Entries are append-only; nothing but the `archived` flag is
//! ever changed after the write.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque journal entry identifier (UUID).
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(String);

impl EntryId {
    /// Wraps an id string.
    #[must_use]
    pub const fn new(id: String) -> Self {
        Self(id)
    }

    /// The raw id, which is also the store key.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One stock adjustment.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockHistoryEntry {
    /// Opaque id.
    pub id: EntryId,
    /// Product name copied at write time - a snapshot, not a live
    /// reference; renaming the product later does not rewrite history.
    pub product_name: String,
    /// Signed stock delta: positive for stock-in (receiving), negative for
    /// stock-out (sales).
    pub stock_adjustment: i64,
    /// When the adjustment happened.
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub date: DateTime<Utc>,
    /// Soft-delete flag, the only mutable field.
    #[serde(default)]
    pub archived: bool,
}

impl StockHistoryEntry {
    /// Whether this entry is a stock-in (positive adjustment).
    #[must_use]
    pub const fn is_stock_in(&self) -> bool {
        self.stock_adjustment > 0
    }
}
