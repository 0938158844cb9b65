//! Error taxonomy for the domain workflows.
//!
//! Validation errors are raised synchronously, before any write, and block
//! the whole submission. Workflow errors wrap the asynchronous failures of
//! the collection store; a multi-step workflow surfaces exactly one of them
//! per user action even when several sub-steps failed (the causes are logged,
//! not enumerated back to the caller).

use crate::collections::StoreError;
use thiserror::Error;

/// A submission was rejected before any write happened.
///
/// The messages are user-facing; they are what the admin panel shows in its
/// failure notification.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A purchase draft has no supplier selected.
    #[error("supplier is required")]
    MissingSupplier,

    /// A purchase draft has no line items.
    #[error("add at least one product")]
    EmptyPurchase,

    /// A line item has an empty product name.
    #[error("product name is required")]
    MissingLineName,

    /// A line item's ordered quantity is zero.
    #[error("quantity for {name} must be greater than 0")]
    InvalidQuantity {
        /// Product name on the offending line.
        name: String,
    },

    /// A line on a purchase being received has a negative unit price.
    #[error("price for {name} is required")]
    InvalidPrice {
        /// Product name on the offending line.
        name: String,
    },

    /// A line on a purchase being received has no received quantity.
    #[error("received quantity for {name} is required")]
    MissingReceivedQuantity {
        /// Product name on the offending line.
        name: String,
    },

    /// An attempt to change locked fields of an already-received purchase.
    ///
    /// Once a purchase is `Received`, its supplier, line set, and each
    /// line's product id, name and ordered quantity are immutable; only
    /// price and received quantity may still change.
    #[error("cannot modify a completed purchase")]
    ReceivedLocked,

    /// A checkout was attempted without a customer name.
    #[error("customer name is required")]
    MissingCustomer,

    /// A checkout was attempted with an empty cart.
    #[error("select at least one product")]
    EmptyCart,

    /// An attempt to put more of a product in the cart than is in stock.
    #[error("stock limit reached for {name} ({stock} available)")]
    StockLimit {
        /// Product name.
        name: String,
        /// Units currently in stock.
        stock: i64,
    },
}

/// Failure of an effectful workflow (purchase submission, checkout).
#[derive(Error, Debug)]
pub enum WorkflowError {
    /// The submission was rejected up front; nothing was written.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The primary record write was rejected by the store.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Some of the per-line stock/journal effects failed after the primary
    /// record write had already been accepted.
    ///
    /// The record write is NOT rolled back and nothing is retried; the store
    /// is left partially reconciled. Individual causes are logged by the
    /// workflow at error level.
    #[error("inventory update failed for {failed} of {total} lines")]
    Propagation {
        /// Number of lines whose effects failed.
        failed: usize,
        /// Total number of lines with effects.
        total: usize,
    },
}
