//! Purchase submission and receiving.
//!
//! The one workflow in the suite with real coordination: persist the
//! purchase, and - when the submission is (or stays) `Received` - translate
//! the received-quantity changes into stock deltas and audit entries,
//! exactly once per unit of change.

use crate::journal::StockJournal;
use crate::products::ProductLedger;
use crate::propagation::apply_stock_effects;
use crate::purchases::PurchaseLedger;
use lunamart_core::environment::{Clock, IdSource};
use lunamart_core::error::WorkflowError;
use lunamart_core::purchase::{Purchase, PurchaseDraft, PurchaseId};
use lunamart_core::reconcile::plan_submission;
use std::sync::Arc;

/// The purchase submission workflow.
#[derive(Clone)]
pub struct ReceivingWorkflow {
    purchases: PurchaseLedger,
    products: ProductLedger,
    journal: StockJournal,
    clock: Arc<dyn Clock>,
    ids: Arc<dyn IdSource>,
}

impl ReceivingWorkflow {
    /// Wires the workflow to its ledgers.
    #[must_use]
    pub fn new(
        purchases: PurchaseLedger,
        products: ProductLedger,
        journal: StockJournal,
        clock: Arc<dyn Clock>,
        ids: Arc<dyn IdSource>,
    ) -> Self {
        Self {
            purchases,
            products,
            journal,
            clock,
            ids,
        }
    }

    /// Submits a purchase draft - a create when the draft has no id, an
    /// edit otherwise.
    ///
    /// The sequence is: load the previous persisted state, validate and
    /// plan (pure), persist the purchase record, then fire the per-line
    /// stock propagation. A propagation failure leaves the already-written
    /// purchase in place and surfaces as one aggregate error; see
    /// [`apply_stock_effects`] for the consistency model.
    ///
    /// # Errors
    ///
    /// [`WorkflowError::Validation`] before any write,
    /// [`WorkflowError::Store`] if the purchase write fails,
    /// [`WorkflowError::Propagation`] if stock effects partially failed.
    pub async fn submit(&self, draft: &PurchaseDraft) -> Result<Purchase, WorkflowError> {
        let previous = match &draft.id {
            Some(id) => self.purchases.get(id).await?,
            None => None,
        };

        let plan = plan_submission(
            draft,
            previous.as_ref(),
            PurchaseId::new(self.ids.opaque_id()),
            self.clock.now(),
        )
        .inspect_err(|error| {
            tracing::warn!(%error, "purchase submission rejected");
        })?;

        self.purchases.save(&plan.record, plan.created).await?;
        tracing::info!(
            purchase = %plan.record.id,
            status = %plan.record.status,
            amount = %plan.record.amount,
            lines = plan.record.products.len(),
            effects = plan.effects.len(),
            created = plan.created,
            "purchase saved"
        );

        apply_stock_effects(&self.products, &self.journal, &plan.effects).await?;
        Ok(plan.record)
    }
}
