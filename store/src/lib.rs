//! # Lunamart Store
//!
//! The effectful half of the retail suite: the in-process collection store,
//! the typed ledgers over it, and the two multi-step workflows (purchase
//! receiving, POS checkout).
//!
//! ## Layout
//!
//! - [`memory`]: `MemoryCollections`, an in-process implementation of the
//!   `Collections` seam with latest-snapshot watch fan-out. It backs the
//!   server in emulator mode and every test.
//! - [`typed`]: `Collection<T>` / `LiveView<T>` - typed handles over the
//!   dyn store, decoding records and snapshots.
//! - One ledger module per collection: [`products`], [`purchases`],
//!   [`suppliers`], [`journal`], [`sales`], [`notifications`].
//! - [`receiving`] and [`checkout`]: the workflows, sharing the best-effort
//!   stock [`propagation`] step.
//!
//! ## Consistency model
//!
//! The workflows are best-effort, not transactional: the primary record
//! write is accepted first, then the per-line stock deltas and journal
//! appends fan out concurrently. A failed effect is logged and surfaced as
//! one aggregate error; nothing is rolled back or retried. The only hard
//! guarantee is on the stock counters themselves, which move exclusively
//! through the store's atomic `apply_delta` primitive.

#![forbid(unsafe_code)]
#![warn(missing_docs, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod checkout;
pub mod journal;
pub mod memory;
pub mod notifications;
pub mod products;
pub mod propagation;
pub mod purchases;
pub mod receiving;
pub mod sales;
pub mod suppliers;
pub mod typed;

pub use checkout::CheckoutWorkflow;
pub use journal::StockJournal;
pub use memory::MemoryCollections;
pub use notifications::NotificationLedger;
pub use products::ProductLedger;
pub use purchases::PurchaseLedger;
pub use receiving::ReceivingWorkflow;
pub use sales::SalesLedger;
pub use suppliers::SupplierLedger;
pub use typed::{Collection, LiveView};
