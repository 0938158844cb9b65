//! Purchase orders.

use crate::error::AppError;
use crate::state::AppState;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use lunamart_core::money::Money;
use lunamart_core::product::ProductId;
use lunamart_core::purchase::{Purchase, PurchaseDraft, PurchaseId, PurchaseLine, PurchaseStatus};
use serde::Deserialize;

/// Lists purchases, archived included.
///
/// # Endpoint
///
/// ```text
/// GET /api/v1/purchases
/// ```
///
/// # Errors
///
/// 502 on store failure.
pub async fn list_purchases(
    State(state): State<AppState>,
) -> Result<Json<Vec<Purchase>>, AppError> {
    Ok(Json(state.purchases.all().await?))
}

/// A purchase submission: a create when `id` is absent, an edit otherwise.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitPurchaseRequest {
    /// Persisted purchase id when editing.
    pub id: Option<String>,
    /// Supplier shop name.
    pub supplier: String,
    /// Target status.
    pub status: PurchaseStatus,
    /// Line items.
    pub products: Vec<SubmitLine>,
}

/// One submitted line.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitLine {
    /// Referenced product id.
    pub product_id: u32,
    /// Product name (denormalized at order time).
    pub name: String,
    /// Ordered quantity.
    pub quantity: u32,
    /// Unit price in centavos.
    #[serde(default)]
    pub price: i64,
    /// Received quantity; clamped into `[0, quantity]` server-side.
    #[serde(default)]
    pub received_quantity: Option<i64>,
}

impl SubmitLine {
    fn into_line(self) -> PurchaseLine {
        let mut line = PurchaseLine {
            product_id: ProductId::new(self.product_id),
            name: self.name,
            quantity: self.quantity,
            price: Money::from_cents(self.price),
            received_quantity: None,
        };
        line.received_quantity = self.received_quantity.map(|raw| line.clamp_received(raw));
        line
    }
}

/// Submits a purchase. Validation, the received-purchase lock, amount
/// recomputation and the stock reconciliation all run in the receiving
/// workflow; this handler only shapes the draft.
///
/// # Endpoint
///
/// ```text
/// POST /api/v1/purchases/submit
/// {
///   "supplier": "Acme",
///   "status": "Received",
///   "products": [
///     { "product_id": 80000001, "name": "Widget", "quantity": 10,
///       "price": 500, "received_quantity": 10 }
///   ]
/// }
/// ```
///
/// # Errors
///
/// 422 on validation rejects, 409 when touching a completed purchase's
/// locked fields, 502 when the store fails (including partial stock
/// propagation - the purchase record itself stands in that case).
pub async fn submit_purchase(
    State(state): State<AppState>,
    Json(request): Json<SubmitPurchaseRequest>,
) -> Result<(StatusCode, Json<Purchase>), AppError> {
    let created = request.id.is_none();

    let mut draft = PurchaseDraft::new();
    draft.id = request.id.map(PurchaseId::new);
    draft.supplier = request.supplier;
    draft.status = request.status;
    draft.lines = request
        .products
        .into_iter()
        .map(SubmitLine::into_line)
        .collect();

    let saved = state.receiving.submit(&draft).await?;
    let status = if created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((status, Json(saved)))
}

/// Archive flag request body.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ArchiveRequest {
    /// Target archived state.
    pub archived: bool,
}

/// Flips a purchase's soft-delete flag. No hard delete exists.
///
/// # Endpoint
///
/// ```text
/// POST /api/v1/purchases/:id/archive
/// ```
///
/// # Errors
///
/// 502 on store failure.
pub async fn archive_purchase(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<ArchiveRequest>,
) -> Result<StatusCode, AppError> {
    state
        .purchases
        .set_archived(&PurchaseId::new(id), request.archived)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
