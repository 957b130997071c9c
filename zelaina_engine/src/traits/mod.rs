//! # Storefront backend traits
//!
//! This module defines the interface contracts a storage backend must satisfy to sit behind the
//! Zelaina storefront server.
//!
//! * [`AuthManagement`] covers the `users` table: registration, credential lookup, and listing.
//! * [`OrderManagement`] covers the `orders` table: persisting checkouts and querying them, plus
//!   the connectivity probe used by the health endpoints.
//!
//! Backends implement both; the server only ever talks to them through the [`crate::AuthApi`] and
//! [`crate::OrderApi`] wrappers.
mod auth_management;
mod order_management;

pub use auth_management::{AuthApiError, AuthManagement};
pub use order_management::{OrderApiError, OrderManagement};
