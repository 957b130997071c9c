use log::debug;
use sqlx::SqliteConnection;

use crate::db_types::{NewOrder, Order};

/// Inserts a new order. A single statement; there is no partial state to clean up when it fails.
/// The status column falls back to its `'pending'` default.
pub async fn insert_order(order: NewOrder, conn: &mut SqliteConnection) -> Result<Order, sqlx::Error> {
    let order: Order = sqlx::query_as(
        r#"
            INSERT INTO orders (
                user_id,
                customer_name,
                customer_phone,
                customer_note,
                product_name,
                product_price,
                quantity,
                total_amount,
                created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *;
        "#,
    )
    .bind(order.user_id)
    .bind(order.customer_name)
    .bind(order.customer_phone)
    .bind(order.customer_note)
    .bind(order.product_name)
    .bind(order.product_price)
    .bind(order.quantity)
    .bind(order.total_amount)
    .bind(order.created_at)
    .fetch_one(conn)
    .await?;
    debug!("📝️ Order inserted with id {}", order.id);
    Ok(order)
}

/// Orders placed by `user_id`, newest first. The id is the tie-breaker for orders created within
/// the same timestamp.
pub async fn fetch_orders_for_user(user_id: i64, conn: &mut SqliteConnection) -> Result<Vec<Order>, sqlx::Error> {
    let orders = sqlx::query_as("SELECT * FROM orders WHERE user_id = $1 ORDER BY created_at DESC, id DESC")
        .bind(user_id)
        .fetch_all(conn)
        .await?;
    Ok(orders)
}

pub async fn fetch_all_orders(conn: &mut SqliteConnection) -> Result<Vec<Order>, sqlx::Error> {
    let orders =
        sqlx::query_as("SELECT * FROM orders ORDER BY created_at DESC, id DESC").fetch_all(conn).await?;
    Ok(orders)
}

pub async fn ping(conn: &mut SqliteConnection) -> Result<i64, sqlx::Error> {
    let (test,): (i64,) = sqlx::query_as("SELECT 1 as test").fetch_one(conn).await?;
    Ok(test)
}
