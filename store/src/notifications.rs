//! Notification ledger.

use crate::typed::{Collection, LiveView};
use lunamart_core::collections::{Collections, Path, StoreError};
use lunamart_core::environment::{Clock, IdSource};
use lunamart_core::notification::{Notification, NotificationId};
use serde_json::json;
use std::sync::Arc;

/// In-app notifications. The only collection with hard deletion.
#[derive(Clone)]
pub struct NotificationLedger {
    records: Collection<Notification>,
    clock: Arc<dyn Clock>,
    ids: Arc<dyn IdSource>,
}

impl NotificationLedger {
    /// Creates the ledger on a store.
    #[must_use]
    pub fn new(store: Arc<dyn Collections>, clock: Arc<dyn Clock>, ids: Arc<dyn IdSource>) -> Self {
        Self {
            records: Collection::new(store, Path::NOTIFICATIONS),
            clock,
            ids,
        }
    }

    /// Raises a notification.
    ///
    /// # Errors
    ///
    /// Backend failures.
    pub async fn push(
        &self,
        title: impl Into<String> + Send,
        message: impl Into<String> + Send,
    ) -> Result<Notification, StoreError> {
        let notification = Notification {
            id: NotificationId::new(self.ids.opaque_id()),
            date: self.clock.now(),
            title: title.into(),
            message: message.into(),
            read: false,
        };
        self.records
            .put(notification.id.as_str(), &notification)
            .await?;
        Ok(notification)
    }

    /// Marks a notification as seen.
    ///
    /// # Errors
    ///
    /// Backend failures.
    pub async fn mark_read(&self, id: &NotificationId) -> Result<(), StoreError> {
        self.records
            .merge_value(id.as_str(), json!({ "read": true }))
            .await
    }

    /// Deletes a notification.
    ///
    /// # Errors
    ///
    /// Backend failures.
    pub async fn remove(&self, id: &NotificationId) -> Result<(), StoreError> {
        self.records.remove(id.as_str()).await
    }

    /// All notifications.
    ///
    /// # Errors
    ///
    /// Backend or decode failures.
    pub async fn all(&self) -> Result<Vec<Notification>, StoreError> {
        self.records.all().await
    }

    /// Live view of the collection.
    #[must_use]
    pub fn live(&self) -> LiveView<Notification> {
        self.records.live()
    }
}
