//! Product records.

use crate::money::Money;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Numeric ids are assigned sequentially above this base; the first product
/// ever created gets `80000001`. The ids double as printable barcode values.
const ID_BASE: u32 = 80_000_000;

/// Unique product identifier.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(u32);

impl ProductId {
    /// Wraps a raw id.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// The raw numeric value.
    #[must_use]
    pub const fn as_u32(self) -> u32 {
        self.0
    }

    /// The store key for this id.
    #[must_use]
    pub fn key(self) -> String {
        self.0.to_string()
    }

    /// Assigns the next id: one past the highest existing id, starting at
    /// `80000001` for an empty ledger.
    #[must_use]
    pub fn next(existing: impl IntoIterator<Item = Self>) -> Self {
        let max = existing
            .into_iter()
            .map(|id| id.0)
            .fold(ID_BASE, u32::max);
        Self(max + 1)
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A product in the inventory.
///
/// `stock` is a live counter mutated only by signed-delta application (never
/// overwritten wholesale) so that concurrent receiving and point-of-sale
/// writers cannot lose updates. Products are soft-deleted via `archived` and
/// never physically removed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Unique id, also used as the barcode value.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Category used for filtering and the POS category chips.
    #[serde(default)]
    pub category: String,
    /// Free-form product type.
    #[serde(rename = "type", default)]
    pub kind: String,
    /// Brand name.
    #[serde(default)]
    pub brand: String,
    /// Units in stock. May go negative; the ledger accepts any delta and
    /// callers pre-check availability where it matters.
    #[serde(default)]
    pub stock: i64,
    /// Expiry date, if the product has one.
    #[serde(default)]
    pub expiry: Option<NaiveDate>,
    /// Unit cost price.
    #[serde(default)]
    pub cost_price: Money,
    /// Unit selling price.
    #[serde(default)]
    pub sell_price: Money,
    /// Image URL for the product cards.
    #[serde(default)]
    pub img_src: String,
    /// Soft-delete flag.
    #[serde(default)]
    pub archived: bool,
    /// Creation timestamp.
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created: DateTime<Utc>,
}

/// Input for creating a product; the ledger assigns `id` and `created`.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct NewProduct {
    /// Display name.
    pub name: String,
    /// Category.
    #[serde(default)]
    pub category: String,
    /// Free-form product type.
    #[serde(rename = "type", default)]
    pub kind: String,
    /// Brand name.
    #[serde(default)]
    pub brand: String,
    /// Opening stock.
    #[serde(default)]
    pub stock: i64,
    /// Expiry date.
    #[serde(default)]
    pub expiry: Option<NaiveDate>,
    /// Unit cost price.
    #[serde(default)]
    pub cost_price: Money,
    /// Unit selling price.
    #[serde(default)]
    pub sell_price: Money,
    /// Image URL.
    #[serde(default)]
    pub img_src: String,
}

impl Product {
    /// Materializes a record from creation input.
    #[must_use]
    pub fn create(input: NewProduct, id: ProductId, created: DateTime<Utc>) -> Self {
        Self {
            id,
            name: input.name,
            category: input.category,
            kind: input.kind,
            brand: input.brand,
            stock: input.stock,
            expiry: input.expiry,
            cost_price: input.cost_price,
            sell_price: input.sell_price,
            img_src: input.img_src,
            archived: false,
            created,
        }
    }

    /// A minimal record for a product id first seen on a received purchase
    /// line: the line's denormalized name, everything else defaulted. The
    /// stock delta that follows materializes the counter.
    #[must_use]
    pub fn placeholder(id: ProductId, name: String, created: DateTime<Utc>) -> Self {
        Self::create(
            NewProduct {
                name,
                ..NewProduct::default()
            },
            id,
            created,
        )
    }
}

/// Partial update for a product. `None` fields are left untouched; `stock`
/// is deliberately absent - stock moves only through signed deltas.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct ProductPatch {
    /// New display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New category.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// New product type.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// New brand.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    /// New expiry date (`Some(None)` clears it).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry: Option<Option<NaiveDate>>,
    /// New unit cost price.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost_price: Option<Money>,
    /// New unit selling price.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sell_price: Option<Money>,
    /// New image URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub img_src: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_id_is_one_past_the_base() {
        assert_eq!(ProductId::next([]), ProductId::new(80_000_001));
    }

    #[test]
    fn next_id_is_max_plus_one() {
        let existing = [ProductId::new(80_000_001), ProductId::new(80_000_007)];
        assert_eq!(ProductId::next(existing), ProductId::new(80_000_008));
    }

    #[test]
    fn created_serializes_as_epoch_millis() {
        let product = Product::create(
            NewProduct {
                name: "Reading Glasses".to_string(),
                ..NewProduct::default()
            },
            ProductId::new(80_000_001),
            DateTime::from_timestamp_millis(1_700_000_000_000).unwrap_or_default(),
        );
        #[allow(clippy::unwrap_used)] // record shape is statically serializable
        let json = serde_json::to_value(&product).unwrap();
        assert_eq!(json["created"], serde_json::json!(1_700_000_000_000_i64));
        assert_eq!(json["type"], serde_json::json!(""));
    }

    #[test]
    fn patch_skips_untouched_fields() {
        let patch = ProductPatch {
            sell_price: Some(Money::from_pesos(250)),
            ..ProductPatch::default()
        };
        #[allow(clippy::unwrap_used)] // record shape is statically serializable
        let json = serde_json::to_value(&patch).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "sell_price": 25_000 })
        );
    }

    #[test]
    fn placeholder_carries_the_line_name_only() {
        let p = Product::placeholder(
            ProductId::new(80_000_009),
            "Contact Lens Solution".to_string(),
            DateTime::from_timestamp_millis(0).unwrap_or_default(),
        );
        assert_eq!(p.name, "Contact Lens Solution");
        assert_eq!(p.stock, 0);
        assert!(!p.archived);
    }
}
