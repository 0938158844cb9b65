//! # Lunamart Web
//!
//! The admin panel's HTTP surface: one Axum router covering inventory,
//! point-of-sale checkout, purchase orders, suppliers, the stock audit log,
//! the sales report, barcode label batches, notifications, account settings
//! and the dashboard overview.
//!
//! # Request flow
//!
//! 1. Extract and decode the JSON request.
//! 2. Call the matching ledger or workflow from [`state::AppState`].
//! 3. Map domain errors to HTTP via [`error::AppError`] - validation
//!    rejections become 422, the received-purchase lock 409, identity
//!    failures 401, store/propagation failures 502. Every failure is a
//!    single JSON error body; nothing is retried here.

#![forbid(unsafe_code)]
#![warn(missing_docs, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod router;
pub mod state;

pub use config::{BackendTargets, Config};
pub use error::AppError;
pub use extractors::CorrelationId;
pub use router::app_router;
pub use state::AppState;

/// Result type alias for web handlers.
pub type WebResult<T> = Result<T, AppError>;
