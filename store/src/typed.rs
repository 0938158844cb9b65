//! Typed handles over the dyn collection store.
//!
//! `Collection<T>` pairs a store path with a record type and hides the JSON
//! documents; `LiveView<T>` is the injected, snapshot-based replacement for
//! ambient subscription state - consumers hold one and decode its current
//! immutable snapshot whenever they need the latest collection contents.

use lunamart_core::collections::{Collections, Path, Snapshot, StoreError};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::marker::PhantomData;
use std::sync::Arc;
use tokio::sync::watch;

/// A typed view of one collection.
pub struct Collection<T> {
    store: Arc<dyn Collections>,
    path: Path,
    _record: PhantomData<fn() -> T>,
}

impl<T> Clone for Collection<T> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            path: self.path,
            _record: PhantomData,
        }
    }
}

impl<T> Collection<T>
where
    T: Serialize + DeserializeOwned,
{
    /// Binds a record type to a collection path.
    #[must_use]
    pub fn new(store: Arc<dyn Collections>, path: Path) -> Self {
        Self {
            store,
            path,
            _record: PhantomData,
        }
    }

    /// The collection path.
    #[must_use]
    pub const fn path(&self) -> Path {
        self.path
    }

    fn decode(&self, key: &str, value: &Value) -> Result<T, StoreError> {
        serde_json::from_value(value.clone()).map_err(|e| StoreError::Serialization {
            path: self.path,
            key: key.to_string(),
            message: e.to_string(),
        })
    }

    fn encode(&self, key: &str, record: &T) -> Result<Value, StoreError> {
        serde_json::to_value(record).map_err(|e| StoreError::Serialization {
            path: self.path,
            key: key.to_string(),
            message: e.to_string(),
        })
    }

    /// Loads and decodes one record.
    ///
    /// # Errors
    ///
    /// Backend failures, or a stored document that no longer decodes as `T`.
    pub async fn get(&self, key: &str) -> Result<Option<T>, StoreError> {
        let value = self.store.load(self.path, key.to_string()).await?;
        value.map(|v| self.decode(key, &v)).transpose()
    }

    /// Writes one whole record.
    ///
    /// # Errors
    ///
    /// Backend failures, or an unencodable record.
    pub async fn put(&self, key: &str, record: &T) -> Result<(), StoreError> {
        let value = self.encode(key, record)?;
        self.store.put(self.path, key.to_string(), value).await
    }

    /// Shallow-merges a JSON object into one record.
    ///
    /// # Errors
    ///
    /// Backend failures.
    pub async fn merge_value(&self, key: &str, partial: Value) -> Result<(), StoreError> {
        self.store.merge(self.path, key.to_string(), partial).await
    }

    /// Shallow-merges a serializable patch into one record.
    ///
    /// # Errors
    ///
    /// Backend failures, or an unencodable patch.
    pub async fn merge<P: Serialize>(&self, key: &str, patch: &P) -> Result<(), StoreError> {
        let value = serde_json::to_value(patch).map_err(|e| StoreError::Serialization {
            path: self.path,
            key: key.to_string(),
            message: e.to_string(),
        })?;
        self.merge_value(key, value).await
    }

    /// Atomically adds `delta` to an integer field of a record.
    ///
    /// # Errors
    ///
    /// Backend failures.
    pub async fn apply_delta(
        &self,
        key: &str,
        field: &'static str,
        delta: i64,
    ) -> Result<i64, StoreError> {
        self.store
            .apply_delta(self.path, key.to_string(), field, delta)
            .await
    }

    /// Deletes one record.
    ///
    /// # Errors
    ///
    /// Backend failures.
    pub async fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.store.remove(self.path, key.to_string()).await
    }

    /// Decodes the whole collection, in store-key order.
    ///
    /// # Errors
    ///
    /// Backend failures, or any document that does not decode as `T`.
    pub async fn all(&self) -> Result<Vec<T>, StoreError> {
        let snapshot = self.store.snapshot(self.path).await?;
        snapshot
            .iter()
            .map(|(key, value)| self.decode(key, value))
            .collect()
    }

    /// A live view of this collection.
    #[must_use]
    pub fn live(&self) -> LiveView<T> {
        LiveView {
            path: self.path,
            rx: self.store.subscribe(self.path),
            _record: PhantomData,
        }
    }
}

/// A subscription to one collection holding the latest immutable snapshot.
pub struct LiveView<T> {
    path: Path,
    rx: watch::Receiver<Snapshot>,
    _record: PhantomData<fn() -> T>,
}

impl<T> Clone for LiveView<T> {
    fn clone(&self) -> Self {
        Self {
            path: self.path,
            rx: self.rx.clone(),
            _record: PhantomData,
        }
    }
}

impl<T> LiveView<T>
where
    T: DeserializeOwned,
{
    /// Decodes the current snapshot, in store-key order.
    ///
    /// # Errors
    ///
    /// Any document that does not decode as `T`.
    pub fn current(&self) -> Result<Vec<T>, StoreError> {
        let snapshot = self.rx.borrow().clone();
        snapshot
            .iter()
            .map(|(key, value)| {
                serde_json::from_value(value.clone()).map_err(|e| StoreError::Serialization {
                    path: self.path,
                    key: key.clone(),
                    message: e.to_string(),
                })
            })
            .collect()
    }

    /// Waits for the next published snapshot.
    ///
    /// # Errors
    ///
    /// [`StoreError::Backend`] when the store has shut down.
    pub async fn changed(&mut self) -> Result<(), StoreError> {
        self.rx
            .changed()
            .await
            .map_err(|_| StoreError::Backend(format!("{} subscription closed", self.path)))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)] // test code
mod tests {
    use super::*;
    use crate::memory::MemoryCollections;
    use serde::Deserialize;

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    struct Record {
        name: String,
        #[serde(default)]
        archived: bool,
    }

    fn collection() -> Collection<Record> {
        Collection::new(MemoryCollections::shared(), Path::SUPPLIERS)
    }

    #[tokio::test]
    async fn put_get_roundtrip() {
        let suppliers = collection();
        let record = Record {
            name: "Acme Optical".to_string(),
            archived: false,
        };
        suppliers.put("1001", &record).await.unwrap();
        assert_eq!(suppliers.get("1001").await.unwrap(), Some(record));
        assert_eq!(suppliers.get("1002").await.unwrap(), None);
    }

    #[tokio::test]
    async fn merge_patches_single_fields() {
        let suppliers = collection();
        suppliers
            .put(
                "1001",
                &Record {
                    name: "Acme Optical".to_string(),
                    archived: false,
                },
            )
            .await
            .unwrap();
        suppliers
            .merge_value("1001", serde_json::json!({"archived": true}))
            .await
            .unwrap();

        let record = suppliers.get("1001").await.unwrap().unwrap();
        assert!(record.archived);
        assert_eq!(record.name, "Acme Optical");
    }

    #[tokio::test]
    async fn live_view_tracks_writes() {
        let suppliers = collection();
        let mut live = suppliers.live();
        assert!(live.current().unwrap().is_empty());

        suppliers
            .put(
                "1001",
                &Record {
                    name: "Acme Optical".to_string(),
                    archived: false,
                },
            )
            .await
            .unwrap();

        live.changed().await.unwrap();
        let current = live.current().unwrap();
        assert_eq!(current.len(), 1);
        assert_eq!(current[0].name, "Acme Optical");
    }

    #[tokio::test]
    async fn undecodable_documents_surface_as_errors() {
        let store = MemoryCollections::shared();
        store
            .put(Path::SUPPLIERS, "1001".to_string(), serde_json::json!(17))
            .await
            .unwrap();

        let suppliers: Collection<Record> = Collection::new(store, Path::SUPPLIERS);
        assert!(suppliers.all().await.is_err());
    }
}
