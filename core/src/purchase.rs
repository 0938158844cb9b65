//! Purchase orders and the draft-editing rules.
//!
//! A purchase embeds its line items; lines have no lifecycle of their own.
//! Status moves Pending → Sent → Received in practice (the panel never moves
//! one back, though nothing structural prevents it). Receiving is the point
//! of no return: once a purchase is `Received`, its supplier, line set and
//! each line's identity fields are locked, and only per-line price and
//! received quantity may still be corrected.

use crate::error::ValidationError;
use crate::money::Money;
use crate::product::{Product, ProductId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque purchase identifier (UUID).
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PurchaseId(String);

impl PurchaseId {
    /// Wraps an id string.
    #[must_use]
    pub const fn new(id: String) -> Self {
        Self(id)
    }

    /// The raw id, which is also the store key.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PurchaseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Lifecycle status of a purchase order.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PurchaseStatus {
    /// Drafted, not yet sent to the supplier.
    #[default]
    Pending,
    /// Sent to the supplier, awaiting delivery.
    Sent,
    /// Delivered; stock effects apply from here on.
    Received,
}

impl PurchaseStatus {
    /// Whether this status carries stock effects.
    #[must_use]
    pub const fn is_received(self) -> bool {
        matches!(self, Self::Received)
    }
}

impl fmt::Display for PurchaseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "Pending"),
            Self::Sent => write!(f, "Sent"),
            Self::Received => write!(f, "Received"),
        }
    }
}

/// One line of a purchase order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseLine {
    /// Referenced product id. No referential integrity is enforced; a
    /// received line with an unknown id materializes a placeholder product.
    pub product_id: ProductId,
    /// Product name copied at order time (denormalized on purpose).
    pub name: String,
    /// Ordered quantity.
    pub quantity: u32,
    /// Unit cost price.
    #[serde(default)]
    pub price: Money,
    /// Quantity actually received, once known. Always within
    /// `[0, quantity]`.
    #[serde(default)]
    pub received_quantity: Option<u32>,
}

impl PurchaseLine {
    /// The quantity that counts toward amounts and stock: received if known,
    /// ordered otherwise.
    #[must_use]
    pub fn effective_quantity(&self) -> u32 {
        self.received_quantity.unwrap_or(self.quantity)
    }

    /// This line's contribution to the purchase amount.
    #[must_use]
    pub fn amount(&self) -> Money {
        self.price.times(self.effective_quantity())
    }

    /// Clamps a raw received-quantity input into `[0, quantity]`.
    #[must_use]
    pub fn clamp_received(&self, raw: i64) -> u32 {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        // clamped into u32 range by construction
        {
            raw.clamp(0, i64::from(self.quantity)) as u32
        }
    }
}

/// A persisted purchase order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Purchase {
    /// Opaque id.
    pub id: PurchaseId,
    /// When the purchase was created.
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub date: DateTime<Utc>,
    /// Supplier shop name (denormalized copy).
    pub supplier: String,
    /// Lifecycle status.
    pub status: PurchaseStatus,
    /// Embedded line items.
    pub products: Vec<PurchaseLine>,
    /// Total: `Σ price × (received_quantity ?? quantity)`. Recomputed at
    /// every submit, never kept incrementally.
    pub amount: Money,
    /// Soft-delete flag.
    #[serde(default)]
    pub archived: bool,
}

impl Purchase {
    /// Finds this purchase's line for a product id.
    #[must_use]
    pub fn line_for(&self, product_id: ProductId) -> Option<&PurchaseLine> {
        self.products.iter().find(|l| l.product_id == product_id)
    }

    /// Recomputes the amount from the embedded lines.
    #[must_use]
    pub fn computed_amount(&self) -> Money {
        self.products.iter().map(PurchaseLine::amount).sum()
    }
}

/// An edit to one line of a draft.
#[derive(Clone, Debug)]
pub enum LineEdit {
    /// Rename the line (locked once received).
    Name(String),
    /// Change the ordered quantity (locked once received).
    OrderedQuantity(u32),
    /// Change the unit price (only while the draft status is Received).
    Price(Money),
    /// Change the received quantity (only while the draft status is
    /// Received); the raw input is clamped into `[0, quantity]`.
    ReceivedQuantity(i64),
}

/// An in-progress purchase submission: a brand-new order, or an edit of a
/// persisted one.
///
/// The draft enforces the editing rules continuously, exactly as the panel's
/// form does - not only at submit time.
#[derive(Clone, Debug)]
pub struct PurchaseDraft {
    /// Persisted id when editing, `None` when creating.
    pub id: Option<PurchaseId>,
    /// Selected supplier shop name.
    pub supplier: String,
    /// Target status.
    pub status: PurchaseStatus,
    /// Line items.
    pub lines: Vec<PurchaseLine>,
    locked: bool,
}

impl PurchaseDraft {
    /// A fresh, empty draft.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            id: None,
            supplier: String::new(),
            status: PurchaseStatus::Pending,
            lines: Vec::new(),
            locked: false,
        }
    }

    /// A draft editing a persisted purchase. If that purchase is already
    /// `Received`, the draft is locked: only price and received quantity
    /// remain editable.
    #[must_use]
    pub fn from_existing(purchase: &Purchase) -> Self {
        Self {
            id: Some(purchase.id.clone()),
            supplier: purchase.supplier.clone(),
            status: purchase.status,
            lines: purchase.products.clone(),
            locked: purchase.status.is_received(),
        }
    }

    /// Whether the underlying purchase was already received.
    #[must_use]
    pub const fn is_locked(&self) -> bool {
        self.locked
    }

    /// Selects the supplier.
    ///
    /// # Errors
    ///
    /// [`ValidationError::ReceivedLocked`] on a locked draft.
    pub fn set_supplier(&mut self, supplier: impl Into<String>) -> Result<(), ValidationError> {
        if self.locked {
            return Err(ValidationError::ReceivedLocked);
        }
        self.supplier = supplier.into();
        Ok(())
    }

    /// Sets the target status.
    ///
    /// # Errors
    ///
    /// [`ValidationError::ReceivedLocked`] on a locked draft.
    pub fn set_status(&mut self, status: PurchaseStatus) -> Result<(), ValidationError> {
        if self.locked {
            return Err(ValidationError::ReceivedLocked);
        }
        self.status = status;
        Ok(())
    }

    /// Adds a product to the order, or bumps its ordered quantity by one if
    /// already present.
    ///
    /// # Errors
    ///
    /// [`ValidationError::ReceivedLocked`] on a locked draft.
    pub fn add_product(&mut self, product: &Product) -> Result<(), ValidationError> {
        if self.locked {
            return Err(ValidationError::ReceivedLocked);
        }
        if let Some(line) = self.lines.iter_mut().find(|l| l.product_id == product.id) {
            line.quantity += 1;
        } else {
            self.lines.push(PurchaseLine {
                product_id: product.id,
                name: product.name.clone(),
                quantity: 1,
                price: Money::ZERO,
                received_quantity: None,
            });
        }
        Ok(())
    }

    /// Removes a line.
    ///
    /// # Errors
    ///
    /// [`ValidationError::ReceivedLocked`] on a locked draft.
    pub fn remove_line(&mut self, index: usize) -> Result<(), ValidationError> {
        if self.locked {
            return Err(ValidationError::ReceivedLocked);
        }
        if index < self.lines.len() {
            self.lines.remove(index);
        }
        Ok(())
    }

    /// Applies one edit to one line, enforcing the continuous rules:
    ///
    /// - received quantity is clamped into `[0, quantity]` on every edit;
    /// - received quantity and price are inert unless the draft status is
    ///   Received (the form disables those inputs);
    /// - name and ordered quantity are rejected on a locked draft.
    ///
    /// Out-of-range indexes are ignored.
    ///
    /// # Errors
    ///
    /// [`ValidationError::ReceivedLocked`] for locked-field edits on a
    /// locked draft.
    pub fn edit_line(&mut self, index: usize, edit: LineEdit) -> Result<(), ValidationError> {
        let received_status = self.status.is_received();
        let locked = self.locked;
        let Some(line) = self.lines.get_mut(index) else {
            return Ok(());
        };

        match edit {
            LineEdit::Name(_) | LineEdit::OrderedQuantity(_) if locked => {
                Err(ValidationError::ReceivedLocked)
            },
            LineEdit::Name(name) => {
                line.name = name;
                Ok(())
            },
            LineEdit::OrderedQuantity(quantity) => {
                line.quantity = quantity;
                // Keep the invariant if the order shrank below what was
                // already entered as received.
                if let Some(received) = line.received_quantity {
                    line.received_quantity = Some(received.min(quantity));
                }
                Ok(())
            },
            LineEdit::Price(price) => {
                if received_status {
                    line.price = price;
                }
                Ok(())
            },
            LineEdit::ReceivedQuantity(raw) => {
                if received_status {
                    line.received_quantity = Some(line.clamp_received(raw));
                }
                Ok(())
            },
        }
    }

    /// Total for the draft as it stands.
    #[must_use]
    pub fn amount(&self) -> Money {
        self.lines.iter().map(PurchaseLine::amount).sum()
    }
}

impl Default for PurchaseDraft {
    fn default() -> Self {
        Self::new()
    }
}
