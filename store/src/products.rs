//! Product ledger.

use crate::typed::{Collection, LiveView};
use lunamart_core::collections::{Collections, Path, StoreError};
use lunamart_core::environment::Clock;
use lunamart_core::product::{NewProduct, Product, ProductId, ProductPatch};
use serde_json::json;
use std::sync::Arc;

/// Product records and the per-product stock counters.
///
/// Stock is never overwritten wholesale here: [`apply_stock_delta`]
/// delegates to the store's transaction primitive so concurrent receiving
/// and point-of-sale writers cannot lose updates. The ledger accepts any
/// delta - it does not enforce non-negative stock; the POS pre-checks
/// availability before decrementing.
///
/// [`apply_stock_delta`]: ProductLedger::apply_stock_delta
#[derive(Clone)]
pub struct ProductLedger {
    records: Collection<Product>,
    clock: Arc<dyn Clock>,
}

impl ProductLedger {
    /// Creates the ledger on a store.
    #[must_use]
    pub fn new(store: Arc<dyn Collections>, clock: Arc<dyn Clock>) -> Self {
        Self {
            records: Collection::new(store, Path::PRODUCTS),
            clock,
        }
    }

    /// Adds a product: assigns the next id above the current maximum
    /// (starting at 80000001) and stamps the creation time.
    ///
    /// # Errors
    ///
    /// Backend failures reading existing ids or writing the record.
    pub async fn add(&self, input: NewProduct) -> Result<Product, StoreError> {
        let existing = self.records.all().await?;
        let id = ProductId::next(existing.iter().map(|p| p.id));
        let product = Product::create(input, id, self.clock.now());
        self.records.put(&id.key(), &product).await?;
        Ok(product)
    }

    /// Atomically applies a signed stock delta and returns the new level.
    ///
    /// # Errors
    ///
    /// Backend failures; the increment either fully happens or not at all.
    pub async fn apply_stock_delta(&self, id: ProductId, delta: i64) -> Result<i64, StoreError> {
        self.records.apply_delta(&id.key(), "stock", delta).await
    }

    /// Materializes a minimal record for a product id first seen on a
    /// received purchase line. No-op when the record exists.
    ///
    /// # Errors
    ///
    /// Backend failures.
    pub async fn ensure_exists(&self, id: ProductId, name: &str) -> Result<(), StoreError> {
        if self.records.get(&id.key()).await?.is_none() {
            let placeholder = Product::placeholder(id, name.to_string(), self.clock.now());
            self.records.put(&id.key(), &placeholder).await?;
        }
        Ok(())
    }

    /// Applies a partial update. Stock is not patchable; it only moves via
    /// [`apply_stock_delta`](Self::apply_stock_delta).
    ///
    /// # Errors
    ///
    /// Backend failures.
    pub async fn patch(&self, id: ProductId, patch: &ProductPatch) -> Result<(), StoreError> {
        self.records.merge(&id.key(), patch).await
    }

    /// Flips the soft-delete flag.
    ///
    /// # Errors
    ///
    /// Backend failures.
    pub async fn set_archived(&self, id: ProductId, archived: bool) -> Result<(), StoreError> {
        self.records
            .merge_value(&id.key(), json!({ "archived": archived }))
            .await
    }

    /// Loads one product.
    ///
    /// # Errors
    ///
    /// Backend or decode failures.
    pub async fn get(&self, id: ProductId) -> Result<Option<Product>, StoreError> {
        self.records.get(&id.key()).await
    }

    /// All products, archived included.
    ///
    /// # Errors
    ///
    /// Backend or decode failures.
    pub async fn all(&self) -> Result<Vec<Product>, StoreError> {
        self.records.all().await
    }

    /// Live view of the collection.
    #[must_use]
    pub fn live(&self) -> LiveView<Product> {
        self.records.live()
    }

    /// Current stock of one product, `None` when the record is missing.
    ///
    /// # Errors
    ///
    /// Backend or decode failures.
    pub async fn stock_of(&self, id: ProductId) -> Result<Option<i64>, StoreError> {
        Ok(self.get(id).await?.map(|p| p.stock))
    }
}
