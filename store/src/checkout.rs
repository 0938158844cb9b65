//! Point-of-sale checkout.
//!
//! Checkout is the stock-out mirror of receiving: persist the sale record,
//! then fan out one negative stock delta plus one journal entry per cart
//! line, best-effort, and raise a completion notification.

use crate::journal::StockJournal;
use crate::notifications::NotificationLedger;
use crate::products::ProductLedger;
use crate::propagation::apply_stock_effects;
use crate::sales::SalesLedger;
use lunamart_core::environment::{Clock, IdSource};
use lunamart_core::error::WorkflowError;
use lunamart_core::sale::{Cart, Receipt, SaleId, plan_checkout};
use std::sync::Arc;

/// The checkout workflow.
#[derive(Clone)]
pub struct CheckoutWorkflow {
    sales: SalesLedger,
    products: ProductLedger,
    journal: StockJournal,
    notifications: NotificationLedger,
    clock: Arc<dyn Clock>,
    ids: Arc<dyn IdSource>,
}

impl CheckoutWorkflow {
    /// Wires the workflow to its ledgers.
    #[must_use]
    pub fn new(
        sales: SalesLedger,
        products: ProductLedger,
        journal: StockJournal,
        notifications: NotificationLedger,
        clock: Arc<dyn Clock>,
        ids: Arc<dyn IdSource>,
    ) -> Self {
        Self {
            sales,
            products,
            journal,
            notifications,
            clock,
            ids,
        }
    }

    /// Completes a sale: validate, persist the sale, decrement stock with
    /// matching journal entries, notify, and hand back the receipt data.
    ///
    /// Stock availability is the cart's concern ([`Cart::add`] and
    /// [`Cart::set_quantity`] clamp against live stock); the ledger itself
    /// accepts any delta, so a race with another register can legitimately
    /// drive a counter negative.
    ///
    /// # Errors
    ///
    /// [`WorkflowError::Validation`] before any write,
    /// [`WorkflowError::Store`] if the sale write or the notification
    /// fails, [`WorkflowError::Propagation`] if stock effects partially
    /// failed (the sale record stands).
    pub async fn checkout(&self, cart: &Cart, customer: &str) -> Result<Receipt, WorkflowError> {
        let (sale, effects) = plan_checkout(
            cart,
            customer,
            SaleId::new(self.ids.opaque_id()),
            self.clock.now(),
        )
        .inspect_err(|error| {
            tracing::warn!(%error, "checkout rejected");
        })?;

        self.sales.record(&sale).await?;
        tracing::info!(
            sale = %sale.id,
            customer = %sale.customer,
            amount = %sale.amount,
            lines = sale.carts.len(),
            "sale recorded"
        );

        apply_stock_effects(&self.products, &self.journal, &effects).await?;

        self.notifications
            .push(
                "Sale completed",
                format!("{} purchased {} items.", sale.customer, sale.carts.len()),
            )
            .await?;

        Ok(Receipt {
            customer: sale.customer.clone(),
            items: sale.carts.clone(),
            total: sale.amount,
            date: sale.date,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)] // test code
mod tests {
    use super::*;
    use crate::memory::MemoryCollections;
    use lunamart_core::environment::Clock as _;
    use lunamart_core::error::ValidationError;
    use lunamart_core::money::Money;
    use lunamart_core::product::{NewProduct, Product};
    use lunamart_testing::mocks::{SequentialIds, test_clock};

    struct Rig {
        workflow: CheckoutWorkflow,
        products: ProductLedger,
        journal: StockJournal,
        notifications: NotificationLedger,
    }

    fn rig() -> Rig {
        let store = MemoryCollections::shared();
        let clock = Arc::new(test_clock());
        let ids = Arc::new(SequentialIds::new("sale"));
        let products = ProductLedger::new(store.clone(), clock.clone());
        let journal = StockJournal::new(store.clone(), clock.clone(), ids.clone());
        let notifications = NotificationLedger::new(store.clone(), clock.clone(), ids.clone());
        let sales = SalesLedger::new(store);
        Rig {
            workflow: CheckoutWorkflow::new(
                sales,
                products.clone(),
                journal.clone(),
                notifications.clone(),
                clock,
                ids,
            ),
            products,
            journal,
            notifications,
        }
    }

    async fn seeded(rig: &Rig, name: &str, stock: i64, pesos: i64) -> Product {
        rig.products
            .add(NewProduct {
                name: name.to_string(),
                stock,
                sell_price: Money::from_pesos(pesos),
                ..NewProduct::default()
            })
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn empty_cart_is_rejected() {
        let rig = rig();
        let result = rig.workflow.checkout(&Cart::new(), "Maria").await;
        assert!(matches!(
            result,
            Err(WorkflowError::Validation(ValidationError::EmptyCart))
        ));
    }

    #[tokio::test]
    async fn checkout_decrements_stock_and_journals() {
        let rig = rig();
        let widget = seeded(&rig, "Widget", 10, 5).await;
        let clock = test_clock();

        let mut cart = Cart::new();
        cart.add(&widget, 10, clock.now()).unwrap();
        cart.set_quantity(widget.id, 3, 10);

        let receipt = rig.workflow.checkout(&cart, "Maria").await.unwrap();
        assert_eq!(receipt.total, Money::from_pesos(15));

        assert_eq!(rig.products.stock_of(widget.id).await.unwrap(), Some(7));

        let history = rig.journal.all().await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].stock_adjustment, -3);

        let notifications = rig.notifications.all().await.unwrap();
        assert_eq!(notifications.len(), 1);
        assert_eq!(notifications[0].message, "Maria purchased 1 items.");
    }
}
