//! Collection store abstraction.
//!
//! All persistent data lives in a hosted real-time database organized as a
//! small set of top-level keyed collections. This module defines the seam:
//! a minimal, dyn-compatible trait covering exactly the operations the
//! ledgers use - whole-record writes, shallow merges (PATCH), a store-side
//! transactional increment, and latest-snapshot subscriptions.
//!
//! # Implementations
//!
//! - `MemoryCollections` (in `lunamart-store`): in-process store with watch
//!   fan-out, used by the server in emulator mode and by every test.
//! - The hosted production backend is an external collaborator reached
//!   through this same trait; its client is deliberately not bundled here.
//!
//! # Dyn compatibility
//!
//! Methods return explicit `Pin<Box<dyn Future>>` instead of `async fn` so
//! the trait can be used as `Arc<dyn Collections>` and injected into the
//! ledgers and workflows.

use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::watch;

/// Immutable snapshot of one collection: record key → stored document.
pub type Snapshot = Arc<BTreeMap<String, Value>>;

/// Future type returned by [`Collections`] methods.
pub type StoreFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, StoreError>> + Send + 'a>>;

/// A top-level collection path in the store.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Path(&'static str);

impl Path {
    /// Product records, keyed by numeric product id.
    pub const PRODUCTS: Self = Self("products");
    /// Purchase orders, keyed by opaque id.
    pub const PURCHASES: Self = Self("purchases");
    /// Supplier records, keyed by numeric supplier id.
    pub const SUPPLIERS: Self = Self("suppliers");
    /// Append-only stock adjustment journal, keyed by opaque id.
    pub const STOCK_HISTORY: Self = Self("stock_history");
    /// Completed sales, keyed by opaque id.
    pub const SALES: Self = Self("sales");
    /// In-app notifications, keyed by opaque id.
    pub const NOTIFICATIONS: Self = Self("notifications");

    /// The path segment as stored.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        self.0
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Errors raised by collection store operations.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The backend rejected or failed the operation.
    #[error("store backend error: {0}")]
    Backend(String),

    /// A stored document did not (de)serialize as the expected record shape.
    #[error("serialization error at {path}/{key}: {message}")]
    Serialization {
        /// Collection the document lives in.
        path: Path,
        /// Record key.
        key: String,
        /// Underlying serde message.
        message: String,
    },
}

/// Keyed collection store with latest-value subscriptions.
///
/// # Semantics
///
/// - [`put`](Self::put) replaces a whole record.
/// - [`merge`](Self::merge) shallow-merges the given object's fields into the
///   record, creating the record if absent (the store never 404s a patch).
/// - [`apply_delta`](Self::apply_delta) is the store's transaction primitive:
///   a read-add-write of one integer field performed atomically store-side.
///   A missing record or field reads as `0`, so the write can materialize a
///   partial record. This is the only correct way to mutate a counter that
///   has concurrent writers; the ledgers never read-modify-write stock.
/// - [`subscribe`](Self::subscribe) returns a receiver whose current value is
///   the latest snapshot; it observes every subsequent committed mutation in
///   the store's delivery order for that collection. Ordering across
///   collections is not guaranteed.
///
/// # Thread safety
///
/// Implementations must be `Send + Sync`; they are shared as
/// `Arc<dyn Collections>` across the ledgers and the HTTP handlers.
pub trait Collections: Send + Sync {
    /// Loads one record, or `None` if absent.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Backend`] if the backend fails the read.
    fn load(&self, path: Path, key: String) -> StoreFuture<'_, Option<Value>>;

    /// Returns the current snapshot of a collection.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Backend`] if the backend fails the read.
    fn snapshot(&self, path: Path) -> StoreFuture<'_, Snapshot>;

    /// Writes a whole record.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Backend`] if the backend rejects the write.
    fn put(&self, path: Path, key: String, value: Value) -> StoreFuture<'_, ()>;

    /// Shallow-merges `partial`'s fields into a record, creating it if
    /// absent. `partial` must be a JSON object.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Backend`] if the backend rejects the write or
    /// `partial` is not an object.
    fn merge(&self, path: Path, key: String, partial: Value) -> StoreFuture<'_, ()>;

    /// Atomically adds `delta` to an integer field of a record, treating a
    /// missing record or field as `0`. Returns the post-increment value.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Backend`] if the backend rejects the
    /// transaction.
    fn apply_delta(
        &self,
        path: Path,
        key: String,
        field: &'static str,
        delta: i64,
    ) -> StoreFuture<'_, i64>;

    /// Deletes a record. Only the notifications collection uses this; every
    /// other collection soft-deletes via an `archived` flag.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Backend`] if the backend rejects the delete.
    fn remove(&self, path: Path, key: String) -> StoreFuture<'_, ()>;

    /// Subscribes to a collection's snapshots. The receiver's current value
    /// is the snapshot as of the call.
    fn subscribe(&self, path: Path) -> watch::Receiver<Snapshot>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_display_matches_segment() {
        assert_eq!(Path::STOCK_HISTORY.to_string(), "stock_history");
        assert_eq!(Path::PRODUCTS.as_str(), "products");
    }

    #[test]
    fn serialization_error_names_the_document() {
        let err = StoreError::Serialization {
            path: Path::PRODUCTS,
            key: "80000001".to_string(),
            message: "missing field `name`".to_string(),
        };
        let display = err.to_string();
        assert!(display.contains("products/80000001"));
        assert!(display.contains("missing field"));
    }
}
