//! Point-of-sale carts, sales records and checkout planning.

use crate::error::ValidationError;
use crate::money::Money;
use crate::product::{Product, ProductId};
use crate::reconcile::StockEffect;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque sale identifier (UUID).
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SaleId(String);

impl SaleId {
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

impl fmt::Display for SaleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One cart line. Name, price and image are copied from the product at add
/// time so the sale record stays stable if the product changes later.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    /// When the item was added (used to show newest first).
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub time: DateTime<Utc>,
    /// Referenced product.
    pub product_id: ProductId,
    /// Product name at add time.
    pub product_name: String,
    /// Unit selling price at add time.
    pub product_price: Money,
    /// Product image at add time.
    #[serde(default)]
    pub product_img: String,
    /// Units in the cart. Always at least 1.
    pub quantity: u32,
}

impl CartItem {
    /// Builds a single-unit cart line from a product.
    #[must_use]
    pub fn of(product: &Product, time: DateTime<Utc>) -> Self {
        Self {
            time,
            product_id: product.id,
            product_name: product.name.clone(),
            product_price: product.sell_price,
            product_img: product.img_src.clone(),
            quantity: 1,
        }
    }

    /// This line's subtotal.
    #[must_use]
    pub fn subtotal(&self) -> Money {
        self.product_price.times(self.quantity)
    }
}

/// The in-progress checkout cart.
///
/// Quantities are bounded by the available stock the caller passes in: the
/// POS pre-checks availability here, because the product ledger itself
/// accepts any delta (and the counter may legitimately go negative under
/// racing writers).
#[derive(Clone, Debug, Default)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    /// An empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// The cart lines.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Whether the cart is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Grand total.
    #[must_use]
    pub fn total(&self) -> Money {
        self.items.iter().map(CartItem::subtotal).sum()
    }

    /// Adds one unit of a product, merging into an existing line.
    ///
    /// # Errors
    ///
    /// [`ValidationError::StockLimit`] when the cart already holds all
    /// available stock of the product.
    pub fn add(&mut self, product: &Product, available_stock: i64, time: DateTime<Utc>) -> Result<(), ValidationError> {
        let in_cart = self
            .items
            .iter()
            .find(|i| i.product_id == product.id)
            .map_or(0, |i| i64::from(i.quantity));
        if in_cart >= available_stock {
            return Err(ValidationError::StockLimit {
                name: product.name.clone(),
                stock: available_stock,
            });
        }

        if let Some(item) = self.items.iter_mut().find(|i| i.product_id == product.id) {
            item.quantity += 1;
        } else {
            self.items.push(CartItem::of(product, time));
        }
        Ok(())
    }

    /// Sets a line's quantity, clamped into `[1, available_stock]`. Returns
    /// the stored quantity. Unknown product ids are ignored and report 0.
    pub fn set_quantity(&mut self, product_id: ProductId, raw: i64, available_stock: i64) -> u32 {
        let Some(item) = self.items.iter_mut().find(|i| i.product_id == product_id) else {
            return 0;
        };
        let clamped = raw.clamp(1, available_stock.max(1));
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        // clamped at least 1, bounded by stock
        {
            item.quantity = clamped as u32;
        }
        item.quantity
    }

    /// Removes a line.
    pub fn remove(&mut self, product_id: ProductId) {
        self.items.retain(|i| i.product_id != product_id);
    }

    /// Empties the cart.
    pub fn clear(&mut self) {
        self.items.clear();
    }
}

/// A completed sale.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Sale {
    /// Opaque id.
    pub id: SaleId,
    /// When the sale happened.
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub date: DateTime<Utc>,
    /// Customer name as typed at the register.
    pub customer: String,
    /// The sold lines, denormalized.
    pub carts: Vec<CartItem>,
    /// Grand total, `Σ product_price × quantity`.
    pub amount: Money,
    /// Soft-delete flag.
    #[serde(default)]
    pub archived: bool,
}

/// Receipt data handed back after a successful checkout, ready for the
/// printable receipt view.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Receipt {
    /// Customer name.
    pub customer: String,
    /// Sold lines.
    pub items: Vec<CartItem>,
    /// Grand total.
    pub total: Money,
    /// Sale timestamp.
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub date: DateTime<Utc>,
}

/// Validates a checkout: a customer name and a non-empty cart.
///
/// # Errors
///
/// [`ValidationError::MissingCustomer`] or [`ValidationError::EmptyCart`].
pub fn validate_checkout(customer: &str, cart: &Cart) -> Result<(), ValidationError> {
    if customer.trim().is_empty() {
        return Err(ValidationError::MissingCustomer);
    }
    if cart.is_empty() {
        return Err(ValidationError::EmptyCart);
    }
    Ok(())
}

/// Plans a checkout: the sale record plus one negative stock effect per cart
/// line.
///
/// # Errors
///
/// Propagates [`validate_checkout`] rejections.
pub fn plan_checkout(
    cart: &Cart,
    customer: &str,
    id: SaleId,
    now: DateTime<Utc>,
) -> Result<(Sale, Vec<StockEffect>), ValidationError> {
    validate_checkout(customer, cart)?;

    let sale = Sale {
        id,
        date: now,
        customer: customer.trim().to_string(),
        carts: cart.items().to_vec(),
        amount: cart.total(),
        archived: false,
    };
    let effects = cart
        .items()
        .iter()
        .map(|item| StockEffect {
            product_id: item.product_id,
            product_name: item.product_name.clone(),
            delta: -i64::from(item.quantity),
        })
        .collect();

    Ok((sale, effects))
}
