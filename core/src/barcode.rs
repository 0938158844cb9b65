//! Barcode label batches.
//!
//! The barcode page builds a batch of products with per-product label
//! counts, then flattens it into one printable label per physical unit.
//! Rendering and printing are the panel's job; the batch and the label
//! payloads are the data surface.

use crate::product::ProductId;
use serde::{Deserialize, Serialize};

/// One product selected for label printing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelSelection {
    /// Product id; the label value when present.
    pub product_id: Option<ProductId>,
    /// Product name, printed under the barcode.
    pub product_name: String,
    /// How many labels to print. Always at least 1.
    pub quantity: u32,
}

/// A single printable label.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Label {
    /// Caption under the barcode.
    pub name: String,
    /// Encoded value: the product id, or the name for products without one.
    pub value: String,
}

/// The batch of selections on the barcode page.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct LabelBatch {
    /// Current selections.
    #[serde(default)]
    pub selections: Vec<LabelSelection>,
}

impl LabelBatch {
    /// An empty batch.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            selections: Vec::new(),
        }
    }

    /// Adds a product, or bumps its label count if already selected.
    pub fn add(&mut self, product_id: Option<ProductId>, product_name: impl Into<String>) {
        if let Some(existing) = self
            .selections
            .iter_mut()
            .find(|s| s.product_id == product_id)
        {
            existing.quantity += 1;
        } else {
            self.selections.push(LabelSelection {
                product_id,
                product_name: product_name.into(),
                quantity: 1,
            });
        }
    }

    /// Sets a selection's label count, floored at 1.
    pub fn set_quantity(&mut self, product_id: Option<ProductId>, quantity: u32) {
        if let Some(selection) = self
            .selections
            .iter_mut()
            .find(|s| s.product_id == product_id)
        {
            selection.quantity = quantity.max(1);
        }
    }

    /// Drops a selection.
    pub fn remove(&mut self, product_id: Option<ProductId>) {
        self.selections.retain(|s| s.product_id != product_id);
    }

    /// Flattens the batch: each selection repeated `quantity` times.
    #[must_use]
    pub fn labels(&self) -> Vec<Label> {
        self.selections
            .iter()
            .flat_map(|s| {
                let value = s
                    .product_id
                    .map_or_else(|| s.product_name.clone(), |id| id.to_string());
                std::iter::repeat_n(
                    Label {
                        name: s.product_name.clone(),
                        value,
                    },
                    s.quantity as usize,
                )
            })
            .collect()
    }
}
