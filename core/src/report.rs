//! Read-model computations for the dashboard, inventory and report pages.
//!
//! All functions are pure over decoded collection snapshots; the live views
//! in `lunamart-store` feed them. Snapshot iteration order is by store key,
//! so anything chronological sorts by record date first.

use crate::history::StockHistoryEntry;
use crate::money::Money;
use crate::product::Product;
use crate::purchase::{Purchase, PurchaseStatus};
use crate::sale::Sale;
use chrono::NaiveDate;
use serde::Serialize;

/// Products at or below this stock level are flagged as low stock.
pub const LOW_STOCK_THRESHOLD: i64 = 10;

/// How many journal entries the movement chart covers.
const MOVEMENT_WINDOW: usize = 30;

/// How many recent purchases the supplier sidebar scans.
const RECENT_PURCHASE_SCAN: usize = 50;

/// How many suppliers the sidebar lists.
const RECENT_SUPPLIER_TAKE: usize = 5;

/// Headline numbers for the overview page.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Overview {
    /// Number of product records, archived included.
    pub total_products: usize,
    /// Products at or below [`LOW_STOCK_THRESHOLD`].
    pub low_stock_count: usize,
    /// Total units in stock across all products.
    pub total_stock_units: i64,
    /// Sum of all sale amounts.
    pub total_sales: Money,
    /// Sum of all purchase amounts.
    pub total_purchased: Money,
    /// Sum of all positive stock adjustments.
    pub total_stock_in: i64,
    /// Purchases still pending.
    pub pending_purchases: usize,
}

impl Overview {
    /// Computes the overview from full collection snapshots.
    #[must_use]
    pub fn compute(
        products: &[Product],
        purchases: &[Purchase],
        sales: &[Sale],
        history: &[StockHistoryEntry],
    ) -> Self {
        Self {
            total_products: products.len(),
            low_stock_count: low_stock(products).len(),
            total_stock_units: products.iter().map(|p| p.stock).sum(),
            total_sales: sales.iter().map(|s| s.amount).sum(),
            total_purchased: purchases.iter().map(|p| p.amount).sum(),
            total_stock_in: history
                .iter()
                .filter(|e| e.is_stock_in())
                .map(|e| e.stock_adjustment)
                .sum(),
            pending_purchases: purchases
                .iter()
                .filter(|p| p.status == PurchaseStatus::Pending)
                .count(),
        }
    }
}

/// Products at or below the low-stock threshold.
#[must_use]
pub fn low_stock(products: &[Product]) -> Vec<&Product> {
    products
        .iter()
        .filter(|p| p.stock <= LOW_STOCK_THRESHOLD)
        .collect()
}

/// One point of the stock movement chart: an adjustment split by sign.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MovementPoint {
    /// Calendar day of the adjustment.
    pub date: NaiveDate,
    /// Units received that entry.
    pub stock_in: i64,
    /// Units sold that entry.
    pub stock_out: i64,
}

/// The last 30 journal entries, oldest first, split into in/out series.
#[must_use]
pub fn stock_movement(history: &[StockHistoryEntry]) -> Vec<MovementPoint> {
    let mut entries: Vec<&StockHistoryEntry> = history.iter().collect();
    entries.sort_by_key(|e| e.date);

    entries
        .iter()
        .rev()
        .take(MOVEMENT_WINDOW)
        .rev()
        .map(|e| MovementPoint {
            date: e.date.date_naive(),
            stock_in: e.stock_adjustment.max(0),
            stock_out: (-e.stock_adjustment).max(0),
        })
        .collect()
}

/// The top `n` products by stock, highest first.
#[must_use]
pub fn top_by_stock(products: &[Product], n: usize) -> Vec<&Product> {
    let mut sorted: Vec<&Product> = products.iter().collect();
    sorted.sort_by(|a, b| b.stock.cmp(&a.stock));
    sorted.truncate(n);
    sorted
}

/// Suppliers of the most recent purchases: the last 50 orders, newest
/// first, deduplicated by supplier name, first five.
#[must_use]
pub fn recent_suppliers(purchases: &[Purchase]) -> Vec<String> {
    let mut sorted: Vec<&Purchase> = purchases.iter().collect();
    sorted.sort_by_key(|p| p.date);

    let mut seen = Vec::new();
    for purchase in sorted.iter().rev().take(RECENT_PURCHASE_SCAN) {
        if !seen.contains(&purchase.supplier) {
            seen.push(purchase.supplier.clone());
            if seen.len() == RECENT_SUPPLIER_TAKE {
                break;
            }
        }
    }
    seen
}

/// Distinct categories of the active (non-archived) products, sorted - the
/// POS category chips.
#[must_use]
pub fn distinct_categories(products: &[Product]) -> Vec<String> {
    let mut categories: Vec<String> = products
        .iter()
        .filter(|p| !p.archived && !p.category.is_empty())
        .map(|p| p.category.clone())
        .collect();
    categories.sort();
    categories.dedup();
    categories
}

/// Active products matching a category chip and a search query.
///
/// The query matches case-insensitively against the product name or its
/// numeric id; an empty query matches everything. `None` category means
/// "All".
#[must_use]
pub fn filter_products<'a>(
    products: &'a [Product],
    category: Option<&str>,
    query: &str,
) -> Vec<&'a Product> {
    let needle = query.trim().to_lowercase();
    products
        .iter()
        .filter(|p| !p.archived)
        .filter(|p| category.is_none_or(|c| p.category == c))
        .filter(|p| {
            needle.is_empty()
                || p.name.to_lowercase().contains(&needle)
                || p.id.to_string().contains(&needle)
        })
        .collect()
}
