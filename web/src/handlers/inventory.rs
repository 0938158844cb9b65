//! Product CRUD.

use crate::error::AppError;
use crate::state::AppState;
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use lunamart_core::product::{NewProduct, Product, ProductId, ProductPatch};
use lunamart_core::report;
use serde::Deserialize;

/// Optional list filters: a category chip and a free-text query.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListQuery {
    /// Category filter; absent means "All".
    pub category: Option<String>,
    /// Case-insensitive search over name and id.
    pub q: Option<String>,
}

/// Lists products. Without filters the full ledger (archived included) is
/// returned; with a category or query only the matching active products.
///
/// # Endpoint
///
/// ```text
/// GET /api/v1/products?category=Frames&q=wayfarer
/// ```
///
/// # Errors
///
/// 502 on store failure.
pub async fn list_products(
    State(state): State<AppState>,
    Query(filters): Query<ListQuery>,
) -> Result<Json<Vec<Product>>, AppError> {
    let products = state.products.all().await?;
    if filters.category.is_none() && filters.q.is_none() {
        return Ok(Json(products));
    }

    let filtered = report::filter_products(
        &products,
        filters.category.as_deref(),
        filters.q.as_deref().unwrap_or(""),
    )
    .into_iter()
    .cloned()
    .collect();
    Ok(Json(filtered))
}

/// Adds a product; the ledger assigns the id and creation time.
///
/// # Endpoint
///
/// ```text
/// POST /api/v1/products
/// ```
///
/// # Errors
///
/// 502 on store failure.
pub async fn add_product(
    State(state): State<AppState>,
    Json(input): Json<NewProduct>,
) -> Result<(StatusCode, Json<Product>), AppError> {
    let product = state.products.add(input).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// Applies a partial update to a product. Stock is not patchable.
///
/// # Endpoint
///
/// ```text
/// PATCH /api/v1/products/:id
/// ```
///
/// # Errors
///
/// 404 for an unknown id, 502 on store failure.
pub async fn patch_product(
    State(state): State<AppState>,
    Path(id): Path<u32>,
    Json(patch): Json<ProductPatch>,
) -> Result<Json<Product>, AppError> {
    let id = ProductId::new(id);
    if state.products.get(id).await?.is_none() {
        return Err(AppError::not_found("Product", id));
    }
    state.products.patch(id, &patch).await?;
    let updated = state
        .products
        .get(id)
        .await?
        .ok_or_else(|| AppError::not_found("Product", id))?;
    Ok(Json(updated))
}

/// Archive flag request body.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ArchiveRequest {
    /// Target archived state.
    pub archived: bool,
}

/// Flips a product's soft-delete flag.
///
/// # Endpoint
///
/// ```text
/// POST /api/v1/products/:id/archive
/// { "archived": true }
/// ```
///
/// # Errors
///
/// 502 on store failure.
pub async fn archive_product(
    State(state): State<AppState>,
    Path(id): Path<u32>,
    Json(request): Json<ArchiveRequest>,
) -> Result<StatusCode, AppError> {
    state
        .products
        .set_archived(ProductId::new(id), request.archived)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
