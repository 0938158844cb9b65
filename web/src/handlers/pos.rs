//! Point-of-sale checkout.

use crate::error::AppError;
use crate::extractors::CorrelationId;
use crate::state::AppState;
use axum::{Json, extract::State, http::StatusCode};
use lunamart_core::product::ProductId;
use lunamart_core::sale::{Cart, Receipt};
use serde::Deserialize;

/// Checkout request: the customer and the cart contents.
#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutRequest {
    /// Customer name for the receipt.
    pub customer: String,
    /// Cart lines.
    pub items: Vec<CheckoutItem>,
}

/// One requested cart line.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct CheckoutItem {
    /// Product to sell.
    pub product_id: u32,
    /// Requested quantity; clamped into `[1, stock]` like the register's
    /// quantity field.
    pub quantity: i64,
}

/// Completes a sale: builds the cart against live stock, persists the sale,
/// decrements stock with matching journal entries and returns the receipt.
///
/// # Endpoint
///
/// ```text
/// POST /api/v1/pos/checkout
/// {
///   "customer": "Maria",
///   "items": [ { "product_id": 80000001, "quantity": 2 } ]
/// }
/// ```
///
/// # Errors
///
/// 404 for an unknown product, 422 for an empty cart, missing customer or
/// exhausted stock, 502 when the store fails mid-flight.
pub async fn checkout(
    State(state): State<AppState>,
    correlation_id: CorrelationId,
    Json(request): Json<CheckoutRequest>,
) -> Result<(StatusCode, Json<Receipt>), AppError> {
    tracing::debug!(%correlation_id, customer = %request.customer, "checkout requested");
    let mut cart = Cart::new();
    for item in &request.items {
        let id = ProductId::new(item.product_id);
        let product = state
            .products
            .get(id)
            .await?
            .ok_or_else(|| AppError::not_found("Product", id))?;
        cart.add(&product, product.stock, state.clock.now())?;
        if item.quantity > 1 {
            cart.set_quantity(id, item.quantity, product.stock);
        }
    }

    let receipt = state.checkout.checkout(&cart, &request.customer).await?;
    Ok((StatusCode::CREATED, Json(receipt)))
}
