//! Supplier CRUD.

use crate::error::AppError;
use crate::state::AppState;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use lunamart_core::supplier::{NewSupplier, Supplier, SupplierId};
use serde::Deserialize;

/// Lists suppliers, archived included.
///
/// # Errors
///
/// 502 on store failure.
pub async fn list_suppliers(
    State(state): State<AppState>,
) -> Result<Json<Vec<Supplier>>, AppError> {
    Ok(Json(state.suppliers.all().await?))
}

/// Adds a supplier; the ledger assigns the id and timestamps.
///
/// # Endpoint
///
/// ```text
/// POST /api/v1/suppliers
/// ```
///
/// # Errors
///
/// 502 on store failure.
pub async fn add_supplier(
    State(state): State<AppState>,
    Json(input): Json<NewSupplier>,
) -> Result<(StatusCode, Json<Supplier>), AppError> {
    let supplier = state.suppliers.add(input).await?;
    Ok((StatusCode::CREATED, Json(supplier)))
}

/// Replaces a supplier record; `updated_at` is restamped and the path id is
/// authoritative.
///
/// # Endpoint
///
/// ```text
/// PUT /api/v1/suppliers/:id
/// ```
///
/// # Errors
///
/// 404 for an unknown id, 502 on store failure.
pub async fn update_supplier(
    State(state): State<AppState>,
    Path(id): Path<u32>,
    Json(supplier): Json<Supplier>,
) -> Result<Json<Supplier>, AppError> {
    let id = SupplierId::new(id);
    if state.suppliers.get(id).await?.is_none() {
        return Err(AppError::not_found("Supplier", id));
    }
    let updated = state.suppliers.update(id, supplier).await?;
    Ok(Json(updated))
}

/// Archive flag request body.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ArchiveRequest {
    /// Target archived state.
    pub archived: bool,
}

/// Flips a supplier's soft-delete flag.
///
/// # Errors
///
/// 502 on store failure.
pub async fn archive_supplier(
    State(state): State<AppState>,
    Path(id): Path<u32>,
    Json(request): Json<ArchiveRequest>,
) -> Result<StatusCode, AppError> {
    state
        .suppliers
        .set_archived(SupplierId::new(id), request.archived)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
