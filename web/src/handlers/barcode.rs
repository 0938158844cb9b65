//! Barcode label batches.

use crate::error::AppError;
use crate::state::AppState;
use axum::{Json, extract::State};
use lunamart_core::barcode::{Label, LabelBatch, LabelSelection};
use lunamart_core::product::ProductId;
use serde::{Deserialize, Serialize};

/// A label batch to flatten.
#[derive(Debug, Clone, Deserialize)]
pub struct LabelBatchRequest {
    /// The selected products and their label counts.
    pub selections: Vec<SelectionRequest>,
}

/// One selection in the batch.
#[derive(Debug, Clone, Deserialize)]
pub struct SelectionRequest {
    /// Product id; labels fall back to the name without one.
    pub product_id: Option<u32>,
    /// Caption under the barcode.
    pub product_name: String,
    /// Label count; floored at 1.
    #[serde(default)]
    pub quantity: u32,
}

/// Flattened labels, one per physical unit.
#[derive(Debug, Clone, Serialize)]
pub struct LabelsResponse {
    /// The printable labels.
    pub labels: Vec<Label>,
}

/// Flattens a batch into printable labels. Rendering is the client's job.
///
/// # Endpoint
///
/// ```text
/// POST /api/v1/barcode/labels
/// {
///   "selections": [
///     { "product_id": 80000001, "product_name": "Widget", "quantity": 3 }
///   ]
/// }
/// ```
///
/// # Errors
///
/// None beyond request decoding; the computation is pure.
#[allow(clippy::unused_async)]
pub async fn labels(
    State(_state): State<AppState>,
    Json(request): Json<LabelBatchRequest>,
) -> Result<Json<LabelsResponse>, AppError> {
    let batch = LabelBatch {
        selections: request
            .selections
            .into_iter()
            .map(|s| LabelSelection {
                product_id: s.product_id.map(ProductId::new),
                product_name: s.product_name,
                quantity: s.quantity.max(1),
            })
            .collect(),
    };
    Ok(Json(LabelsResponse {
        labels: batch.labels(),
    }))
}
