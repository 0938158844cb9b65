//! In-process collection store.
//!
//! `MemoryCollections` implements the `Collections` seam with plain maps and
//! one `watch` channel per collection. It is the store the server runs on in
//! emulator mode and the store every test runs on; the hosted production
//! backend is reached through the same trait by a client this crate does not
//! bundle.
//!
//! Write atomicity comes from holding the write lock across each mutation,
//! which is exactly the contract `apply_delta` needs: the read-add-write of
//! a counter field cannot interleave with another writer.

use lunamart_core::collections::{Collections, Path, Snapshot, StoreError, StoreFuture};
use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tokio::sync::{RwLock, watch};

const ALL_PATHS: [Path; 6] = [
    Path::PRODUCTS,
    Path::PURCHASES,
    Path::SUPPLIERS,
    Path::STOCK_HISTORY,
    Path::SALES,
    Path::NOTIFICATIONS,
];

/// In-memory implementation of the collection store.
pub struct MemoryCollections {
    data: RwLock<HashMap<Path, BTreeMap<String, Value>>>,
    watchers: HashMap<Path, watch::Sender<Snapshot>>,
}

impl MemoryCollections {
    /// An empty store with a live (empty) snapshot per collection.
    #[must_use]
    pub fn new() -> Self {
        let mut data = HashMap::new();
        let mut watchers = HashMap::new();
        for path in ALL_PATHS {
            data.insert(path, BTreeMap::new());
            let (tx, _rx) = watch::channel(Snapshot::default());
            watchers.insert(path, tx);
        }
        Self {
            data: RwLock::new(data),
            watchers,
        }
    }

    /// Convenience constructor for injection sites.
    #[must_use]
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Publishes the current state of one collection to its watchers.
    fn publish(&self, path: Path, collection: &BTreeMap<String, Value>) {
        if let Some(tx) = self.watchers.get(&path) {
            tx.send_replace(Arc::new(collection.clone()));
        }
    }

    async fn mutate<F>(&self, path: Path, apply: F) -> Result<(), StoreError>
    where
        F: FnOnce(&mut BTreeMap<String, Value>) -> Result<(), StoreError>,
    {
        let mut data = self.data.write().await;
        let collection = data.entry(path).or_default();
        apply(collection)?;
        self.publish(path, collection);
        Ok(())
    }
}

impl Default for MemoryCollections {
    fn default() -> Self {
        Self::new()
    }
}

impl Collections for MemoryCollections {
    fn load(&self, path: Path, key: String) -> StoreFuture<'_, Option<Value>> {
        Box::pin(async move {
            let data = self.data.read().await;
            Ok(data.get(&path).and_then(|c| c.get(&key)).cloned())
        })
    }

    fn snapshot(&self, path: Path) -> StoreFuture<'_, Snapshot> {
        Box::pin(async move {
            let data = self.data.read().await;
            Ok(data
                .get(&path)
                .map(|c| Arc::new(c.clone()))
                .unwrap_or_default())
        })
    }

    fn put(&self, path: Path, key: String, value: Value) -> StoreFuture<'_, ()> {
        Box::pin(async move {
            self.mutate(path, |collection| {
                collection.insert(key, value);
                Ok(())
            })
            .await
        })
    }

    fn merge(&self, path: Path, key: String, partial: Value) -> StoreFuture<'_, ()> {
        Box::pin(async move {
            let Value::Object(fields) = partial else {
                return Err(StoreError::Backend(format!(
                    "merge into {path}/{key} requires an object"
                )));
            };
            self.mutate(path, move |collection| {
                let record = collection
                    .entry(key)
                    .or_insert_with(|| Value::Object(Map::new()));
                match record {
                    Value::Object(existing) => {
                        for (field, value) in fields {
                            existing.insert(field, value);
                        }
                        Ok(())
                    },
                    _ => Err(StoreError::Backend(
                        "merge target is not an object".to_string(),
                    )),
                }
            })
            .await
        })
    }

    fn apply_delta(
        &self,
        path: Path,
        key: String,
        field: &'static str,
        delta: i64,
    ) -> StoreFuture<'_, i64> {
        Box::pin(async move {
            let mut data = self.data.write().await;
            let collection = data.entry(path).or_default();
            let record = collection
                .entry(key)
                .or_insert_with(|| Value::Object(Map::new()));
            let Value::Object(existing) = record else {
                return Err(StoreError::Backend(
                    "delta target is not an object".to_string(),
                ));
            };

            // Missing record or field reads as zero; the write materializes it.
            let current = existing.get(field).and_then(Value::as_i64).unwrap_or(0);
            let updated = current + delta;
            existing.insert(field.to_string(), Value::from(updated));

            self.publish(path, collection);
            Ok(updated)
        })
    }

    fn remove(&self, path: Path, key: String) -> StoreFuture<'_, ()> {
        Box::pin(async move {
            self.mutate(path, |collection| {
                collection.remove(&key);
                Ok(())
            })
            .await
        })
    }

    fn subscribe(&self, path: Path) -> watch::Receiver<Snapshot> {
        self.watchers.get(&path).map_or_else(
            || watch::channel(Snapshot::default()).1,
            watch::Sender::subscribe,
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)] // test code
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn put_then_load_roundtrips() {
        let store = MemoryCollections::new();
        store
            .put(
                Path::PRODUCTS,
                "80000001".to_string(),
                json!({"name": "Widget"}),
            )
            .await
            .unwrap();

        let loaded = store
            .load(Path::PRODUCTS, "80000001".to_string())
            .await
            .unwrap();
        assert_eq!(loaded, Some(json!({"name": "Widget"})));
    }

    #[tokio::test]
    async fn merge_is_shallow_and_creates_records() {
        let store = MemoryCollections::new();
        store
            .merge(
                Path::PRODUCTS,
                "80000001".to_string(),
                json!({"name": "Widget"}),
            )
            .await
            .unwrap();
        store
            .merge(
                Path::PRODUCTS,
                "80000001".to_string(),
                json!({"archived": true}),
            )
            .await
            .unwrap();

        let loaded = store
            .load(Path::PRODUCTS, "80000001".to_string())
            .await
            .unwrap();
        assert_eq!(loaded, Some(json!({"name": "Widget", "archived": true})));
    }

    #[tokio::test]
    async fn merge_rejects_non_objects() {
        let store = MemoryCollections::new();
        let result = store
            .merge(Path::PRODUCTS, "80000001".to_string(), json!(42))
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn apply_delta_materializes_missing_counters() {
        let store = MemoryCollections::new();
        let value = store
            .apply_delta(Path::PRODUCTS, "80000001".to_string(), "stock", 7)
            .await
            .unwrap();
        assert_eq!(value, 7);

        let value = store
            .apply_delta(Path::PRODUCTS, "80000001".to_string(), "stock", -10)
            .await
            .unwrap();
        assert_eq!(value, -3);
    }

    #[tokio::test]
    async fn concurrent_deltas_lose_no_updates() {
        let store = MemoryCollections::shared();
        let tasks: Vec<_> = (0..100)
            .map(|i| {
                let store = Arc::clone(&store);
                let delta = if i % 2 == 0 { 3 } else { -1 };
                tokio::spawn(async move {
                    store
                        .apply_delta(Path::PRODUCTS, "80000001".to_string(), "stock", delta)
                        .await
                })
            })
            .collect();
        for task in tasks {
            task.await.unwrap().unwrap();
        }

        let loaded = store
            .load(Path::PRODUCTS, "80000001".to_string())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(loaded["stock"], json!(50 * 3 - 50));
    }

    #[tokio::test]
    async fn subscribers_observe_writes_in_order() {
        let store = MemoryCollections::new();
        let mut rx = store.subscribe(Path::SALES);
        assert!(rx.borrow().is_empty());

        store
            .put(Path::SALES, "s-1".to_string(), json!({"amount": 100}))
            .await
            .unwrap();
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow().len(), 1);
    }

    #[tokio::test]
    async fn remove_deletes_the_record() {
        let store = MemoryCollections::new();
        store
            .put(Path::NOTIFICATIONS, "n-1".to_string(), json!({"read": false}))
            .await
            .unwrap();
        store
            .remove(Path::NOTIFICATIONS, "n-1".to_string())
            .await
            .unwrap();
        let loaded = store
            .load(Path::NOTIFICATIONS, "n-1".to_string())
            .await
            .unwrap();
        assert!(loaded.is_none());
    }
}
