//! Stock audit log.

use crate::error::AppError;
use crate::state::AppState;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use lunamart_core::history::{EntryId, StockHistoryEntry};
use serde::Deserialize;

/// Lists the journal, newest first.
///
/// # Endpoint
///
/// ```text
/// GET /api/v1/stock-history
/// ```
///
/// # Errors
///
/// 502 on store failure.
pub async fn list_entries(
    State(state): State<AppState>,
) -> Result<Json<Vec<StockHistoryEntry>>, AppError> {
    let mut entries = state.journal.all().await?;
    entries.sort_by_key(|e| std::cmp::Reverse(e.date));
    Ok(Json(entries))
}

/// Archive flag request body.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ArchiveRequest {
    /// Target archived state.
    pub archived: bool,
}

/// Flips an entry's archive flag - the only mutation the journal permits.
///
/// # Errors
///
/// 502 on store failure.
pub async fn archive_entry(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<ArchiveRequest>,
) -> Result<StatusCode, AppError> {
    state
        .journal
        .set_archived(&EntryId::new(id), request.archived)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
