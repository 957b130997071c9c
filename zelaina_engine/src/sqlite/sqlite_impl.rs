use std::fmt::Debug;

use log::trace;
use sqlx::SqlitePool;

use super::db::{create_schema, db_url, new_pool, orders, users};
use crate::{
    db_types::{NewOrder, NewUser, Order, User, UserSummary},
    traits::{AuthApiError, AuthManagement, OrderApiError, OrderManagement},
};

#[derive(Clone)]
pub struct SqliteDatabase {
    url: String,
    pool: SqlitePool,
}

impl Debug for SqliteDatabase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "SqliteDatabase ({:?})", self.pool)
    }
}

impl SqliteDatabase {
    /// Creates a new database API object using the URL from the environment (or the default).
    pub async fn new(max_connections: u32) -> Result<Self, sqlx::Error> {
        let url = db_url();
        SqliteDatabase::new_with_url(url.as_str(), max_connections).await
    }

    /// Connects to the given database URL and bootstraps the schema. The schema statements are
    /// `CREATE TABLE IF NOT EXISTS`, so this is safe to run on every startup.
    pub async fn new_with_url(url: &str, max_connections: u32) -> Result<Self, sqlx::Error> {
        trace!("Creating new database connection pool with url {url}");
        let pool = new_pool(url, max_connections).await?;
        let mut conn = pool.acquire().await?;
        create_schema(&mut conn).await?;
        drop(conn);
        let url = url.to_string();
        Ok(Self { url, pool })
    }

    pub fn url(&self) -> &str {
        self.url.as_str()
    }

    /// Returns a reference to the database connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

impl AuthManagement for SqliteDatabase {
    async fn register_user(&self, user: NewUser) -> Result<User, AuthApiError> {
        let mut conn = self.pool.acquire().await?;
        users::insert_user(user, &mut conn).await.map_err(|e| {
            // Two concurrent registrations can both pass the email pre-check. The UNIQUE
            // constraint on the email column rejects the loser here.
            if e.as_database_error().map(|db| db.is_unique_violation()).unwrap_or(false) {
                AuthApiError::EmailTaken
            } else {
                e.into()
            }
        })
    }

    async fn email_is_registered(&self, email: &str) -> Result<bool, AuthApiError> {
        let mut conn = self.pool.acquire().await?;
        let user = users::fetch_user_by_email(email, &mut conn).await?;
        Ok(user.is_some())
    }

    async fn fetch_user_by_credentials(&self, email: &str, password: &str) -> Result<Option<User>, AuthApiError> {
        let mut conn = self.pool.acquire().await?;
        let user = users::fetch_user_by_credentials(email, password, &mut conn).await?;
        Ok(user)
    }

    async fn fetch_all_users(&self) -> Result<Vec<UserSummary>, AuthApiError> {
        let mut conn = self.pool.acquire().await?;
        let users = users::fetch_all_users(&mut conn).await?;
        Ok(users)
    }
}

impl OrderManagement for SqliteDatabase {
    async fn insert_order(&self, order: NewOrder) -> Result<Order, OrderApiError> {
        let mut conn = self.pool.acquire().await?;
        let order = orders::insert_order(order, &mut conn).await?;
        Ok(order)
    }

    async fn fetch_orders_for_user(&self, user_id: i64) -> Result<Vec<Order>, OrderApiError> {
        let mut conn = self.pool.acquire().await?;
        let orders = orders::fetch_orders_for_user(user_id, &mut conn).await?;
        Ok(orders)
    }

    async fn fetch_all_orders(&self) -> Result<Vec<Order>, OrderApiError> {
        let mut conn = self.pool.acquire().await?;
        let orders = orders::fetch_all_orders(&mut conn).await?;
        Ok(orders)
    }

    async fn ping(&self) -> Result<i64, OrderApiError> {
        let mut conn = self.pool.acquire().await?;
        let test = orders::ping(&mut conn).await?;
        Ok(test)
    }
}
