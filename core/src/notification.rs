//! In-app notifications.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque notification identifier (UUID).
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NotificationId(String);

impl NotificationId {
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

impl fmt::Display for NotificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A notification shown in the top bar. The one record kind that supports
/// hard deletion.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    /// Opaque id.
    pub id: NotificationId,
    /// When it was raised.
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub date: DateTime<Utc>,
    /// Short title, e.g. "Sale completed".
    pub title: String,
    /// Body text.
    pub message: String,
    /// Whether the operator has seen it.
    #[serde(default)]
    pub read: bool,
}

/// Picks the first unread notification, the one the top bar surfaces.
#[must_use]
pub fn first_unread(notifications: &[Notification]) -> Option<&Notification> {
    notifications.iter().find(|n| !n.read)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn notification(id: &str, read: bool) -> Notification {
        Notification {
            id: NotificationId::new(id.to_string()),
            date: DateTime::from_timestamp_millis(0).unwrap_or_default(),
            title: "Sale completed".to_string(),
            message: "Maria purchased 2 items.".to_string(),
            read,
        }
    }

    #[test]
    fn first_unread_skips_read_ones() {
        let list = vec![notification("a", true), notification("b", false)];
        assert_eq!(
            first_unread(&list).map(|n| n.id.as_str()),
            Some("b")
        );
    }

    #[test]
    fn first_unread_none_when_all_read() {
        let list = vec![notification("a", true)];
        assert!(first_unread(&list).is_none());
    }
}
