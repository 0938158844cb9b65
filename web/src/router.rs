//! Router composition for the admin panel API.

use crate::handlers::{
    auth, barcode, health, inventory, notifications, overview, pos, purchases, sales, settings,
    stock_history, suppliers,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{delete, get, patch, post, put},
};

/// Builds the full application router.
///
/// # Routes
///
/// Everything but the health probe lives under `/api/v1`, one group per
/// panel area: auth, overview, products, POS, purchases, suppliers,
/// stock history, sales report, barcode labels, notifications, settings.
#[must_use]
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .nest("/api/v1", api_router())
        .with_state(state)
}

fn api_router() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(auth::login))
        .route("/overview", get(overview::overview))
        .route(
            "/products",
            get(inventory::list_products).post(inventory::add_product),
        )
        .route("/products/:id", patch(inventory::patch_product))
        .route("/products/:id/archive", post(inventory::archive_product))
        .route("/pos/checkout", post(pos::checkout))
        .route("/purchases", get(purchases::list_purchases))
        .route("/purchases/submit", post(purchases::submit_purchase))
        .route("/purchases/:id/archive", post(purchases::archive_purchase))
        .route(
            "/suppliers",
            get(suppliers::list_suppliers).post(suppliers::add_supplier),
        )
        .route("/suppliers/:id", put(suppliers::update_supplier))
        .route("/suppliers/:id/archive", post(suppliers::archive_supplier))
        .route("/stock-history", get(stock_history::list_entries))
        .route(
            "/stock-history/:id/archive",
            post(stock_history::archive_entry),
        )
        .route("/sales-report", get(sales::sales_report))
        .route("/sales/:id/archive", post(sales::archive_sale))
        .route("/barcode/labels", post(barcode::labels))
        .route("/notifications", get(notifications::list_notifications))
        .route("/notifications/:id/read", post(notifications::mark_read))
        .route("/notifications/:id", delete(notifications::remove))
        .route(
            "/settings/profile",
            get(settings::profile).patch(settings::update_profile),
        )
        .route("/settings/password", post(settings::change_password))
}
