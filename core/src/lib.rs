//! # Lunamart Core
//!
//! Domain model and pure business logic for the Lunamart retail suite:
//! inventory, purchase orders, point-of-sale checkout, stock auditing and
//! reporting for a small retail shop.
//!
//! ## Architecture
//!
//! The crate follows a "Functional Core, Imperative Shell" split:
//!
//! - **Records** ([`Product`], [`Purchase`], [`Supplier`], [`Sale`],
//!   [`StockHistoryEntry`], [`Notification`]) are plain serde types stored in
//!   a keyed collection store.
//! - **Pure logic** (validation, draft editing rules, reconciliation
//!   planning, report computation) lives here and is testable at memory
//!   speed - no I/O, no side effects.
//! - **Seams** are traits: [`collections::Collections`] abstracts the hosted
//!   real-time database, [`auth::AuthGateway`] the hosted identity provider,
//!   and [`environment`] the clock and id generation. The effectful side
//!   (the store runtime, ledgers and workflows) lives in `lunamart-store`.
//!
//! ## The receiving workflow
//!
//! The most intricate flow is purchase receiving: a purchase transitioning
//! into (or edited while in) the `Received` status produces per-line signed
//! stock deltas and matching stock-history journal entries. [`reconcile`]
//! computes that plan purely; execution is the shell's job.

#![forbid(unsafe_code)]
#![warn(missing_docs, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod auth;
pub mod barcode;
pub mod collections;
pub mod environment;
pub mod error;
pub mod history;
pub mod money;
pub mod notification;
pub mod product;
pub mod purchase;
pub mod reconcile;
pub mod report;
pub mod sale;
pub mod supplier;

pub use error::{ValidationError, WorkflowError};
pub use history::{EntryId, StockHistoryEntry};
pub use money::Money;
pub use notification::{Notification, NotificationId};
pub use product::{NewProduct, Product, ProductId, ProductPatch};
pub use purchase::{Purchase, PurchaseDraft, PurchaseId, PurchaseLine, PurchaseStatus};
pub use sale::{Cart, CartItem, Receipt, Sale, SaleId};
pub use supplier::{NewSupplier, Supplier, SupplierId};

// Re-export commonly used time types, matching the store's epoch-ms encoding.
pub use chrono::{DateTime, NaiveDate, Utc};
