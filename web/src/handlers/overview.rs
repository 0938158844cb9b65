//! Dashboard overview.

use crate::error::AppError;
use crate::state::AppState;
use axum::{Json, extract::State};
use lunamart_core::product::ProductId;
use lunamart_core::purchase::{Purchase, PurchaseStatus};
use lunamart_core::report::{self, MovementPoint, Overview};
use serde::Serialize;

/// One row of the low-stock / top-products tables.
#[derive(Debug, Clone, Serialize)]
pub struct ProductRow {
    /// Product code (the id, as printed on barcodes).
    pub code: ProductId,
    /// Product name.
    pub name: String,
    /// Current stock.
    pub stock: i64,
}

/// The dashboard payload.
#[derive(Debug, Clone, Serialize)]
pub struct OverviewResponse {
    /// Headline numbers.
    pub overview: Overview,
    /// Products at or below the low-stock threshold.
    pub low_stock: Vec<ProductRow>,
    /// Top five products by stock.
    pub top_products: Vec<ProductRow>,
    /// Stock movement, last thirty adjustments.
    pub movement: Vec<MovementPoint>,
    /// Suppliers of the most recent purchases.
    pub recent_suppliers: Vec<String>,
    /// Purchases still pending.
    pub pending_purchases: Vec<Purchase>,
}

/// Computes the dashboard from full collection snapshots.
///
/// # Endpoint
///
/// ```text
/// GET /api/v1/overview
/// ```
///
/// # Errors
///
/// 502 on store failure.
pub async fn overview(State(state): State<AppState>) -> Result<Json<OverviewResponse>, AppError> {
    let (products, purchases, sales, history) = tokio::try_join!(
        state.products.all(),
        state.purchases.all(),
        state.sales.all(),
        state.journal.all(),
    )?;

    let row = |p: &lunamart_core::product::Product| ProductRow {
        code: p.id,
        name: p.name.clone(),
        stock: p.stock,
    };

    Ok(Json(OverviewResponse {
        overview: Overview::compute(&products, &purchases, &sales, &history),
        low_stock: report::low_stock(&products).into_iter().map(row).collect(),
        top_products: report::top_by_stock(&products, 5).into_iter().map(row).collect(),
        movement: report::stock_movement(&history),
        recent_suppliers: report::recent_suppliers(&purchases),
        pending_purchases: purchases
            .iter()
            .filter(|p| p.status == PurchaseStatus::Pending)
            .cloned()
            .collect(),
    }))
}
