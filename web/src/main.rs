//! Lunamart admin panel server.
//!
//! # Usage
//!
//! Run against the in-process store (local development / emulator mode):
//!
//! ```bash
//! LUNAMART_EMULATOR=true cargo run --bin lunamart-server
//! ```
//!
//! # Environment
//!
//! - `LUNAMART_ADDR` - bind address (default `0.0.0.0:3000`)
//! - `LUNAMART_EMULATOR` - `true` to target the local emulator endpoints
//! - `LUNAMART_ADMIN_EMAIL` / `LUNAMART_ADMIN_PASSWORD` - the admin account
//!   the bundled identity gateway accepts
//!
//! # Example requests
//!
//! ```bash
//! # Add a product
//! curl -X POST http://localhost:3000/api/v1/products \
//!   -H "Content-Type: application/json" \
//!   -d '{"name": "Reading Glasses", "category": "Frames", "stock": 12,
//!        "cost_price": 25000, "sell_price": 45000}'
//!
//! # Receive a purchase
//! curl -X POST http://localhost:3000/api/v1/purchases/submit \
//!   -H "Content-Type: application/json" \
//!   -d '{"supplier": "Acme", "status": "Received",
//!        "products": [{"product_id": 80000001, "name": "Reading Glasses",
//!                      "quantity": 10, "price": 500, "received_quantity": 10}]}'
//! ```

use lunamart_store::MemoryCollections;
use lunamart_testing::mocks::FakeAuth;
use lunamart_web::{AppState, Config, app_router};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = Config::from_env();
    let backend = config.backend();
    info!(
        emulator = config.emulator,
        auth = %backend.auth_url,
        database = %backend.database_url,
        "backend targets selected"
    );

    // The hosted database and identity clients are external collaborators;
    // the bundled implementations are the in-process store and the single-
    // account identity gateway, which is what emulator mode runs on.
    if !config.emulator {
        info!("hosted backend client not configured; serving from the in-process store");
    }
    let store = MemoryCollections::shared();
    let auth = Arc::new(FakeAuth::new(
        config.admin_email.clone(),
        config.admin_password.clone(),
    ));

    let state = AppState::new(
        store,
        auth,
        Arc::new(lunamart_core::environment::SystemClock),
        Arc::new(lunamart_core::environment::UuidIds),
    );

    let app = app_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let listener = tokio::net::TcpListener::bind(&config.addr).await?;
    info!("server listening on http://{}", config.addr);

    axum::serve(listener, app).await?;
    Ok(())
}
