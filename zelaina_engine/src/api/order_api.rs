use std::fmt::Debug;

use log::*;

use crate::{
    db_types::{NewOrder, Order},
    traits::{OrderApiError, OrderManagement},
};

/// `OrderApi` is the primary API for persisting checkouts and reading order history.
pub struct OrderApi<B> {
    db: B,
}

impl<B> Debug for OrderApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "OrderApi")
    }
}

impl<B> OrderApi<B> {
    pub fn new(db: B) -> Self {
        Self { db }
    }
}

impl<B> OrderApi<B>
where B: OrderManagement
{
    /// Submits a new order. The insert is a single statement, so a failure leaves no partial
    /// state behind. Returns the stored order, including its generated id.
    pub async fn process_new_order(&self, order: NewOrder) -> Result<Order, OrderApiError> {
        let order = self.db.insert_order(order).await?;
        debug!(
            "🗃️ Order #{} saved. {} x{} for {} (total {})",
            order.id, order.product_name, order.quantity, order.customer_name, order.total_amount
        );
        Ok(order)
    }

    /// The orders placed by `user_id`, newest first.
    pub async fn orders_for_user(&self, user_id: i64) -> Result<Vec<Order>, OrderApiError> {
        let orders = self.db.fetch_orders_for_user(user_id).await?;
        trace!("🗃️ Fetched {} orders for user #{user_id}", orders.len());
        Ok(orders)
    }

    /// Every order in the store, newest first.
    pub async fn all_orders(&self) -> Result<Vec<Order>, OrderApiError> {
        self.db.fetch_all_orders().await
    }

    /// Probes the database connection.
    pub async fn check_db(&self) -> Result<i64, OrderApiError> {
        self.db.ping().await
    }
}
