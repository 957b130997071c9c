//! Zelaina Storefront Engine
//!
//! The storefront engine holds the persistence logic behind the Zelaina shop: user registration
//! and login, and the order records created at checkout. It is provider-agnostic. The library is
//! divided into two main sections:
//! 1. The backend traits ([`mod@traits`]). A storage backend implements [`traits::AuthManagement`]
//!    and [`traits::OrderManagement`] to act as a database for the storefront server. SQLite (via `sqlx`) is
//!    the backend shipped here; the raw queries live in the `sqlite` module and should never be
//!    called directly by consumers.
//! 2. The public API wrappers ([`AuthApi`] and [`OrderApi`]). These add the storefront semantics
//!    on top of a backend: duplicate-email rejection, credential matching, and order persistence
//!    with its single-line normalization contract.
pub mod db_types;
pub mod traits;

mod api;
#[cfg(feature = "sqlite")]
mod sqlite;

pub use api::{AuthApi, OrderApi};
#[cfg(feature = "sqlite")]
pub use sqlite::SqliteDatabase;
