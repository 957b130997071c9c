//! # SQLite database methods
//!
//! This module contains the "low-level" SQLite interactions for the storefront.
//!
//! All interactions are maintained as simple functions (rather than stateful structs) that accept
//! a `&mut SqliteConnection` argument. Callers obtain a connection from a pool, or create a
//! transaction as the need arises, and call through without any other changes.
use std::{env, str::FromStr};

use log::info;
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    Error as SqlxError,
    SqliteConnection,
    SqlitePool,
};

pub mod orders;
pub mod users;

const SQLITE_DB_URL: &str = "sqlite://data/zelaina.db";

pub fn db_url() -> String {
    let result = env::var("ZSF_DATABASE_URL").unwrap_or_else(|_| {
        info!("ZSF_DATABASE_URL is not set. Using the default.");
        SQLITE_DB_URL.to_string()
    });
    info!("Using database URL: {result}");
    result
}

pub async fn new_pool(url: &str, max_connections: u32) -> Result<SqlitePool, SqlxError> {
    let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);
    let pool = SqlitePoolOptions::new().max_connections(max_connections).connect_with(options).await?;
    Ok(pool)
}

/// Creates the `users` and `orders` tables when they do not exist yet. Idempotent. The server
/// runs this on every startup; there is no migration tooling in the storefront.
pub async fn create_schema(conn: &mut SqliteConnection) -> Result<(), SqlxError> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            email TEXT NOT NULL UNIQUE,
            password TEXT NOT NULL,
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(&mut *conn)
    .await?;
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS orders (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id INTEGER,
            customer_name TEXT NOT NULL,
            customer_phone TEXT NOT NULL,
            customer_note TEXT NOT NULL DEFAULT '',
            product_name TEXT NOT NULL,
            product_price REAL NOT NULL,
            quantity INTEGER NOT NULL DEFAULT 1,
            total_amount REAL NOT NULL,
            status TEXT NOT NULL DEFAULT 'pending',
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(conn)
    .await?;
    Ok(())
}
