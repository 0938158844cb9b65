//! Notifications.

use crate::error::AppError;
use crate::state::AppState;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use lunamart_core::notification::{Notification, NotificationId, first_unread};
use serde::Serialize;

/// Notification list plus the one the top bar should surface.
#[derive(Debug, Clone, Serialize)]
pub struct NotificationsResponse {
    /// All notifications.
    pub notifications: Vec<Notification>,
    /// The first unread notification, if any.
    pub unread: Option<Notification>,
}

/// Lists notifications.
///
/// # Errors
///
/// 502 on store failure.
pub async fn list_notifications(
    State(state): State<AppState>,
) -> Result<Json<NotificationsResponse>, AppError> {
    let notifications = state.notifications.all().await?;
    let unread = first_unread(&notifications).cloned();
    Ok(Json(NotificationsResponse {
        notifications,
        unread,
    }))
}

/// Marks a notification as read.
///
/// # Errors
///
/// 502 on store failure.
pub async fn mark_read(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    state
        .notifications
        .mark_read(&NotificationId::new(id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Deletes a notification - the one hard delete in the panel.
///
/// # Errors
///
/// 502 on store failure.
pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    state
        .notifications
        .remove(&NotificationId::new(id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
