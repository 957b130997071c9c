use thiserror::Error;

use crate::db_types::{NewOrder, Order};

#[derive(Debug, Clone, Error)]
pub enum OrderApiError {
    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl From<sqlx::Error> for OrderApiError {
    fn from(e: sqlx::Error) -> Self {
        OrderApiError::DatabaseError(e.to_string())
    }
}

/// The `OrderManagement` trait defines behaviour for persisting and querying checkout orders.
#[allow(async_fn_in_trait)]
pub trait OrderManagement {
    /// Persists a new order in a single statement and returns the stored row, including the
    /// generated id. Orders are always created with status `pending`; later transitions are
    /// administrative and happen outside the storefront.
    async fn insert_order(&self, order: NewOrder) -> Result<Order, OrderApiError>;

    /// Fetches the orders placed by the given user, newest first.
    async fn fetch_orders_for_user(&self, user_id: i64) -> Result<Vec<Order>, OrderApiError>;

    /// Fetches every order in the store, newest first.
    async fn fetch_all_orders(&self) -> Result<Vec<Order>, OrderApiError>;

    /// Runs a trivial query against the backend to verify the connection is alive.
    async fn ping(&self) -> Result<i64, OrderApiError>;
}
