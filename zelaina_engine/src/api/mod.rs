mod auth_api;
mod order_api;

pub use auth_api::AuthApi;
pub use order_api::OrderApi;
