//! Sales ledger.

use crate::typed::{Collection, LiveView};
use lunamart_core::collections::{Collections, Path, StoreError};
use lunamart_core::sale::{Sale, SaleId};
use serde_json::json;
use std::sync::Arc;

/// Completed sales, the data behind the sales report.
#[derive(Clone)]
pub struct SalesLedger {
    records: Collection<Sale>,
}

impl SalesLedger {
    /// Creates the ledger on a store.
    #[must_use]
    pub fn new(store: Arc<dyn Collections>) -> Self {
        Self {
            records: Collection::new(store, Path::SALES),
        }
    }

    /// Persists a completed sale.
    ///
    /// # Errors
    ///
    /// Backend failures.
    pub async fn record(&self, sale: &Sale) -> Result<(), StoreError> {
        self.records.put(sale.id.as_str(), sale).await
    }

    /// Flips the soft-delete flag.
    ///
    /// # Errors
    ///
    /// Backend failures.
    pub async fn set_archived(&self, id: &SaleId, archived: bool) -> Result<(), StoreError> {
        self.records
            .merge_value(id.as_str(), json!({ "archived": archived }))
            .await
    }

    /// All sales, archived included.
    ///
    /// # Errors
    ///
    /// Backend or decode failures.
    pub async fn all(&self) -> Result<Vec<Sale>, StoreError> {
        self.records.all().await
    }

    /// Live view of the collection.
    #[must_use]
    pub fn live(&self) -> LiveView<Sale> {
        self.records.live()
    }
}
