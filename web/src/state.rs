//! Application state shared across all HTTP handlers.

use lunamart_core::auth::AuthGateway;
use lunamart_core::collections::Collections;
use lunamart_core::environment::{Clock, IdSource};
use lunamart_store::{
    CheckoutWorkflow, NotificationLedger, ProductLedger, PurchaseLedger, ReceivingWorkflow,
    SalesLedger, StockJournal, SupplierLedger,
};
use std::sync::Arc;

/// The ledgers, workflows and seams every handler reaches through.
#[derive(Clone)]
pub struct AppState {
    /// Product records and stock counters.
    pub products: ProductLedger,
    /// Purchase orders.
    pub purchases: PurchaseLedger,
    /// Supplier records.
    pub suppliers: SupplierLedger,
    /// Stock audit journal.
    pub journal: StockJournal,
    /// Completed sales.
    pub sales: SalesLedger,
    /// In-app notifications.
    pub notifications: NotificationLedger,
    /// Purchase submission workflow.
    pub receiving: ReceivingWorkflow,
    /// POS checkout workflow.
    pub checkout: CheckoutWorkflow,
    /// Identity provider seam.
    pub auth: Arc<dyn AuthGateway>,
    /// Clock, used to stamp cart lines.
    pub clock: Arc<dyn Clock>,
}

impl AppState {
    /// Wires the full application onto one store and one identity gateway.
    #[must_use]
    pub fn new(
        store: Arc<dyn Collections>,
        auth: Arc<dyn AuthGateway>,
        clock: Arc<dyn Clock>,
        ids: Arc<dyn IdSource>,
    ) -> Self {
        let products = ProductLedger::new(Arc::clone(&store), Arc::clone(&clock));
        let purchases = PurchaseLedger::new(Arc::clone(&store));
        let suppliers = SupplierLedger::new(Arc::clone(&store), Arc::clone(&clock));
        let journal = StockJournal::new(Arc::clone(&store), Arc::clone(&clock), Arc::clone(&ids));
        let sales = SalesLedger::new(Arc::clone(&store));
        let notifications =
            NotificationLedger::new(Arc::clone(&store), Arc::clone(&clock), Arc::clone(&ids));

        let receiving = ReceivingWorkflow::new(
            purchases.clone(),
            products.clone(),
            journal.clone(),
            Arc::clone(&clock),
            Arc::clone(&ids),
        );
        let checkout = CheckoutWorkflow::new(
            sales.clone(),
            products.clone(),
            journal.clone(),
            notifications.clone(),
            Arc::clone(&clock),
            Arc::clone(&ids),
        );

        Self {
            products,
            purchases,
            suppliers,
            journal,
            sales,
            notifications,
            receiving,
            checkout,
            auth,
            clock,
        }
    }
}
