//! # Zelaina storefront server
//! This crate hosts the REST backend for the Zelaina storefront. It is responsible for:
//! * Registering users and checking their credentials.
//! * Accepting order submissions from the client cart and persisting them.
//! * Serving the order history and the diagnostic endpoints.
//!
//! ## Configuration
//! The server is configured via environment variables. See [config](config/index.html) for more
//! information.
//!
//! ## Routes
//! * `/health`: A health check route that returns a 200 OK response.
//! * `/api/auth/register`, `/api/auth/login`: user registration and login.
//! * `/api/orders`: order submission (POST) and per-user history (GET with a user id).
//! * `/api/users`, `/api/all-orders`, `/api/test`, `/api/check-db`: listing and diagnostics.
pub mod cli;
pub mod config;
pub mod data_objects;
pub mod errors;
pub mod routes;
pub mod server;

#[cfg(test)]
mod endpoint_tests;
