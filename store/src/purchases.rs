//! Purchase ledger.

use crate::typed::{Collection, LiveView};
use lunamart_core::collections::{Collections, Path, StoreError};
use lunamart_core::purchase::{Purchase, PurchaseId};
use serde_json::json;
use std::sync::Arc;

/// Persisted purchase orders. No delete is exposed; archiving is the only
/// removal mechanism.
#[derive(Clone)]
pub struct PurchaseLedger {
    records: Collection<Purchase>,
}

impl PurchaseLedger {
    /// Creates the ledger on a store.
    #[must_use]
    pub fn new(store: Arc<dyn Collections>) -> Self {
        Self {
            records: Collection::new(store, Path::PURCHASES),
        }
    }

    /// Persists a submission: whole-record write for a create, shallow merge
    /// of the full record for an edit.
    ///
    /// # Errors
    ///
    /// Backend failures.
    pub async fn save(&self, purchase: &Purchase, created: bool) -> Result<(), StoreError> {
        let key = purchase.id.as_str().to_string();
        if created {
            self.records.put(&key, purchase).await
        } else {
            self.records.merge(&key, purchase).await
        }
    }

    /// Flips the soft-delete flag.
    ///
    /// # Errors
    ///
    /// Backend failures.
    pub async fn set_archived(&self, id: &PurchaseId, archived: bool) -> Result<(), StoreError> {
        self.records
            .merge_value(id.as_str(), json!({ "archived": archived }))
            .await
    }

    /// Loads one purchase.
    ///
    /// # Errors
    ///
    /// Backend or decode failures.
    pub async fn get(&self, id: &PurchaseId) -> Result<Option<Purchase>, StoreError> {
        self.records.get(id.as_str()).await
    }

    /// All purchases, archived included.
    ///
    /// # Errors
    ///
    /// Backend or decode failures.
    pub async fn all(&self) -> Result<Vec<Purchase>, StoreError> {
        self.records.all().await
    }

    /// Live view of the collection.
    #[must_use]
    pub fn live(&self) -> LiveView<Purchase> {
        self.records.live()
    }
}
