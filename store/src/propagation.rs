//! Best-effort stock propagation shared by receiving and checkout.

use crate::journal::StockJournal;
use crate::products::ProductLedger;
use futures::future::join_all;
use lunamart_core::collections::StoreError;
use lunamart_core::error::WorkflowError;
use lunamart_core::reconcile::StockEffect;

/// Applies a set of stock effects: per effect, one atomic stock delta plus
/// one journal entry, fired together; effects for different lines run
/// concurrently with no ordering between them.
///
/// This step is deliberately NOT transactional. It runs only after the
/// primary record write was accepted, and when some effects fail the rest
/// still land: each failure is logged with its cause and the caller gets a
/// single aggregate [`WorkflowError::Propagation`]. Nothing is rolled back
/// or retried.
///
/// A zero-effect set resolves immediately - that is the idempotence of
/// re-submitting an already-reconciled purchase.
///
/// # Errors
///
/// [`WorkflowError::Propagation`] when any effect failed.
pub async fn apply_stock_effects(
    products: &ProductLedger,
    journal: &StockJournal,
    effects: &[StockEffect],
) -> Result<(), WorkflowError> {
    let total = effects.len();
    let results = join_all(effects.iter().map(|e| apply_one(products, journal, e))).await;

    let mut failed = 0;
    for (effect, result) in effects.iter().zip(results) {
        if let Err(error) = result {
            failed += 1;
            tracing::error!(
                product = %effect.product_id,
                name = %effect.product_name,
                delta = effect.delta,
                %error,
                "stock propagation failed"
            );
        }
    }

    if failed > 0 {
        Err(WorkflowError::Propagation { failed, total })
    } else {
        Ok(())
    }
}

async fn apply_one(
    products: &ProductLedger,
    journal: &StockJournal,
    effect: &StockEffect,
) -> Result<(), StoreError> {
    // Materialize first-seen product ids so the counter lands on a full
    // record rather than a bare {stock} document.
    products
        .ensure_exists(effect.product_id, &effect.product_name)
        .await?;

    let (delta, entry) = tokio::join!(
        products.apply_stock_delta(effect.product_id, effect.delta),
        journal.append(effect.product_name.clone(), effect.delta),
    );
    delta?;
    entry?;
    Ok(())
}
