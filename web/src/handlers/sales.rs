//! Sales report.

use crate::error::AppError;
use crate::state::AppState;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use lunamart_core::money::Money;
use lunamart_core::sale::{Sale, SaleId};
use serde::{Deserialize, Serialize};

/// Sales report payload: the records plus their running total.
#[derive(Debug, Clone, Serialize)]
pub struct SalesReportResponse {
    /// All sales, archived included, newest first.
    pub sales: Vec<Sale>,
    /// Sum of all sale amounts.
    pub total_sales: Money,
}

/// The sales audit report.
///
/// # Endpoint
///
/// ```text
/// GET /api/v1/sales-report
/// ```
///
/// # Errors
///
/// 502 on store failure.
pub async fn sales_report(
    State(state): State<AppState>,
) -> Result<Json<SalesReportResponse>, AppError> {
    let mut sales = state.sales.all().await?;
    sales.sort_by_key(|s| std::cmp::Reverse(s.date));
    let total_sales = sales.iter().map(|s| s.amount).sum();
    Ok(Json(SalesReportResponse { sales, total_sales }))
}

/// Archive flag request body.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ArchiveRequest {
    /// Target archived state.
    pub archived: bool,
}

/// Flips a sale's soft-delete flag.
///
/// # Errors
///
/// 502 on store failure.
pub async fn archive_sale(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<ArchiveRequest>,
) -> Result<StatusCode, AppError> {
    state
        .sales
        .set_archived(&SaleId::new(id), request.archived)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
