//! Stock history journal.

use crate::typed::{Collection, LiveView};
use lunamart_core::collections::{Collections, Path, StoreError};
use lunamart_core::environment::{Clock, IdSource};
use lunamart_core::history::{EntryId, StockHistoryEntry};
use serde_json::json;
use std::sync::Arc;

/// The append-only stock audit trail.
///
/// Every stock mutation attributable to a sale or a received purchase gets
/// exactly one entry with the matching signed delta. Entries are written
/// once; the archive flag is the only later mutation.
#[derive(Clone)]
pub struct StockJournal {
    records: Collection<StockHistoryEntry>,
    clock: Arc<dyn Clock>,
    ids: Arc<dyn IdSource>,
}

impl StockJournal {
    /// Creates the journal on a store.
    #[must_use]
    pub fn new(store: Arc<dyn Collections>, clock: Arc<dyn Clock>, ids: Arc<dyn IdSource>) -> Self {
        Self {
            records: Collection::new(store, Path::STOCK_HISTORY),
            clock,
            ids,
        }
    }

    /// Appends one adjustment entry.
    ///
    /// # Errors
    ///
    /// Backend failures; the entry is written once or not at all.
    pub async fn append(
        &self,
        product_name: String,
        stock_adjustment: i64,
    ) -> Result<StockHistoryEntry, StoreError> {
        let entry = StockHistoryEntry {
            id: EntryId::new(self.ids.opaque_id()),
            product_name,
            stock_adjustment,
            date: self.clock.now(),
            archived: false,
        };
        self.records.put(entry.id.as_str(), &entry).await?;
        Ok(entry)
    }

    /// Flips the soft-delete flag.
    ///
    /// # Errors
    ///
    /// Backend failures.
    pub async fn set_archived(&self, id: &EntryId, archived: bool) -> Result<(), StoreError> {
        self.records
            .merge_value(id.as_str(), json!({ "archived": archived }))
            .await
    }

    /// All entries.
    ///
    /// # Errors
    ///
    /// Backend or decode failures.
    pub async fn all(&self) -> Result<Vec<StockHistoryEntry>, StoreError> {
        self.records.all().await
    }

    /// Live view of the journal.
    #[must_use]
    pub fn live(&self) -> LiveView<StockHistoryEntry> {
        self.records.live()
    }
}
