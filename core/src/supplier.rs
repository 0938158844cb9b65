//! Supplier records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Supplier ids are assigned sequentially above this base; the first
/// supplier gets `1001`.
const ID_BASE: u32 = 1_000;

/// Unique supplier identifier.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SupplierId(u32);

impl SupplierId {
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
    /// `1001` for an empty ledger.
    #[must_use]
    pub fn next(existing: impl IntoIterator<Item = Self>) -> Self {
        let max = existing.into_iter().map(|id| id.0).fold(ID_BASE, u32::max);
        Self(max + 1)
    }
}

impl fmt::Display for SupplierId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A supplier the shop orders from. Purchases reference suppliers by shop
/// name (a denormalized copy), not by id.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Supplier {
    /// Unique id.
    pub id: SupplierId,
    /// Shop or company name; the value purchase orders carry.
    pub shop_name: String,
    /// Person in charge.
    #[serde(default)]
    pub contact_person: String,
    /// Phone number.
    #[serde(default)]
    pub phone: String,
    /// Email address.
    #[serde(default)]
    pub email: String,
    /// Shop or company address.
    #[serde(default)]
    pub address: String,
    /// Soft-delete flag.
    #[serde(default)]
    pub archived: bool,
    /// When the supplier was added.
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
    /// Last modification, including archive toggles.
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a supplier; the ledger assigns id and timestamps.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct NewSupplier {
    /// Shop or company name.
    pub shop_name: String,
    /// Person in charge.
    #[serde(default)]
    pub contact_person: String,
    /// Phone number.
    #[serde(default)]
    pub phone: String,
    /// Email address.
    #[serde(default)]
    pub email: String,
    /// Shop or company address.
    #[serde(default)]
    pub address: String,
}

impl Supplier {
    /// Materializes a record from creation input.
    #[must_use]
    pub fn create(input: NewSupplier, id: SupplierId, now: DateTime<Utc>) -> Self {
        Self {
            id,
            shop_name: input.shop_name,
            contact_person: input.contact_person,
            phone: input.phone,
            email: input.email,
            address: input.address,
            archived: false,
            created_at: now,
            updated_at: now,
        }
    }
}
