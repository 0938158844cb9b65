//! Supplier ledger.

use crate::typed::{Collection, LiveView};
use lunamart_core::collections::{Collections, Path, StoreError};
use lunamart_core::environment::Clock;
use lunamart_core::supplier::{NewSupplier, Supplier, SupplierId};
use std::sync::Arc;

/// Supplier records. Updates always restamp `updated_at`, archive toggles
/// included.
#[derive(Clone)]
pub struct SupplierLedger {
    records: Collection<Supplier>,
    clock: Arc<dyn Clock>,
}

impl SupplierLedger {
    /// Creates the ledger on a store.
    #[must_use]
    pub fn new(store: Arc<dyn Collections>, clock: Arc<dyn Clock>) -> Self {
        Self {
            records: Collection::new(store, Path::SUPPLIERS),
            clock,
        }
    }

    /// Adds a supplier: next id above the current maximum (starting at
    /// 1001), both timestamps stamped.
    ///
    /// # Errors
    ///
    /// Backend failures.
    pub async fn add(&self, input: NewSupplier) -> Result<Supplier, StoreError> {
        let existing = self.records.all().await?;
        let id = SupplierId::next(existing.iter().map(|s| s.id));
        let supplier = Supplier::create(input, id, self.clock.now());
        self.records.put(&id.key(), &supplier).await?;
        Ok(supplier)
    }

    /// Replaces a supplier record, restamping `updated_at` and keeping the
    /// id authoritative.
    ///
    /// # Errors
    ///
    /// Backend failures.
    pub async fn update(&self, id: SupplierId, mut supplier: Supplier) -> Result<Supplier, StoreError> {
        supplier.id = id;
        supplier.updated_at = self.clock.now();
        self.records.put(&id.key(), &supplier).await?;
        Ok(supplier)
    }

    /// Flips the soft-delete flag, restamping `updated_at`. No-op for an
    /// unknown id.
    ///
    /// # Errors
    ///
    /// Backend or decode failures.
    pub async fn set_archived(&self, id: SupplierId, archived: bool) -> Result<(), StoreError> {
        let Some(mut supplier) = self.records.get(&id.key()).await? else {
            return Ok(());
        };
        supplier.archived = archived;
        supplier.updated_at = self.clock.now();
        self.records.put(&id.key(), &supplier).await
    }

    /// Loads one supplier.
    ///
    /// # Errors
    ///
    /// Backend or decode failures.
    pub async fn get(&self, id: SupplierId) -> Result<Option<Supplier>, StoreError> {
        self.records.get(&id.key()).await
    }

    /// All suppliers, archived included.
    ///
    /// # Errors
    ///
    /// Backend or decode failures.
    pub async fn all(&self) -> Result<Vec<Supplier>, StoreError> {
        self.records.all().await
    }

    /// Live view of the collection.
    #[must_use]
    pub fn live(&self) -> LiveView<Supplier> {
        self.records.live()
    }
}
