//! Checkout: validation, payload assembly, and the submit-then-clear flow.
use log::warn;
use serde_json::json;
use thiserror::Error;
use zelaina_server::data_objects::{OrderRequest, OrderResponse, ProductPayload, ProductsPayload};

use crate::{
    cart::{self, CartLine},
    client::{ClientError, OrderSubmission},
    reconcile::{cart_total, line_quantity, resolve_price},
    session,
    storage::KeyValueStore,
};

#[derive(Debug, Error)]
pub enum CheckoutError {
    /// Submission was blocked before anything left the machine.
    #[error("{0}")]
    Validation(String),
    /// The server answered with a failure. The cart is left intact.
    #[error("{0}")]
    Rejected(String),
    /// The server could not be reached. The cart is left intact.
    #[error("{0}")]
    Connection(String),
}

impl From<ClientError> for CheckoutError {
    fn from(e: ClientError) -> Self {
        match e {
            ClientError::Rejected(msg) => CheckoutError::Rejected(msg),
            ClientError::Transport(msg) | ClientError::InvalidResponse(msg) => CheckoutError::Connection(msg),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct CustomerInfo {
    pub name: String,
    pub phone: String,
    pub note: String,
}

pub fn validate_customer(info: &CustomerInfo) -> Result<(), CheckoutError> {
    if info.name.trim().is_empty() || info.phone.trim().is_empty() {
        return Err(CheckoutError::Validation("Please fill in your name and phone number".to_string()));
    }
    Ok(())
}

/// Client-side registration checks. The server only checks for an `@`; the length and
/// confirmation rules live here.
pub fn validate_registration(email: &str, password: &str, confirm: &str) -> Result<(), CheckoutError> {
    if !email.contains('@') {
        return Err(CheckoutError::Validation("Please provide a valid email address".to_string()));
    }
    if password.len() < 6 {
        return Err(CheckoutError::Validation("Password must be at least 6 characters long".to_string()));
    }
    if password != confirm {
        return Err(CheckoutError::Validation("Passwords do not match".to_string()));
    }
    Ok(())
}

/// Builds the submission payload from the reconciled cart. Every line is resolved with the same
/// price and quantity rules the cart display uses, and the total is computed from the same
/// lines, never read from anywhere else.
pub fn build_order_request(cart: &[CartLine], info: &CustomerInfo, user_id: Option<i64>) -> OrderRequest {
    let products = cart
        .iter()
        .map(|line| ProductPayload {
            name: Some(line.name.clone()),
            price: json!(resolve_price(line).value()),
            quantity: json!(line_quantity(line)),
        })
        .collect();
    OrderRequest {
        user_id,
        customer_name: Some(info.name.trim().to_string()),
        customer_phone: Some(info.phone.trim().to_string()),
        customer_note: Some(info.note.trim().to_string()),
        products: Some(ProductsPayload::Lines(products)),
        total_amount: json!(cart_total(cart).value()),
    }
}

/// The full checkout flow. On a declared success the cart is cleared; on any failure the cart is
/// left intact and the error is surfaced without retry.
pub async fn place_order<S: KeyValueStore, C: OrderSubmission>(
    store: &mut S,
    client: &C,
    info: &CustomerInfo,
) -> Result<OrderResponse, CheckoutError> {
    validate_customer(info)?;
    let cart = cart::load_cart(store);
    if cart.is_empty() {
        return Err(CheckoutError::Validation("Add items to your cart before placing an order".to_string()));
    }
    let user_id = session::current_user(store).map(|u| u.id);
    let request = build_order_request(&cart, info, user_id);
    let response = client.submit_order(&request).await?;
    // The order exists on the server at this point. A cart that refuses to clear must not turn
    // a placed order into a reported failure.
    if let Err(e) = cart::clear_cart(store) {
        warn!("🛒️ Order #{} was placed but the cart could not be cleared. {e}", response.order.id);
    }
    Ok(response)
}

#[cfg(test)]
mod test {
    use serde_json::json;
    use zelaina_server::data_objects::{OrderHandle, OrderRequest, OrderResponse, ProductsPayload};
    use zsf_common::coerce::{price_or_zero, quantity_or_one};

    use super::{build_order_request, place_order, validate_customer, validate_registration, CheckoutError, CustomerInfo};
    use crate::{
        cart::{add_or_increment, load_cart, save_cart, CartLine},
        client::{ClientError, OrderSubmission},
        storage::{KeyValueStore, MemoryStore, StorageError},
    };

    /// A canned gateway standing in for the HTTP client.
    struct StubGateway(fn() -> Result<OrderResponse, ClientError>);

    impl OrderSubmission for StubGateway {
        async fn submit_order(&self, _order: &OrderRequest) -> Result<OrderResponse, ClientError> {
            (self.0)()
        }
    }

    fn placed() -> Result<OrderResponse, ClientError> {
        Ok(OrderResponse {
            success: true,
            message: "Order placed successfully! We will contact you shortly.".to_string(),
            order: OrderHandle { id: 7 },
        })
    }

    fn stocked_store() -> MemoryStore {
        let mut store = MemoryStore::new();
        let mut cart = Vec::new();
        add_or_increment(&mut cart, "алоэ вера", json!(600));
        save_cart(&mut store, &cart).unwrap();
        store
    }

    fn customer() -> CustomerInfo {
        CustomerInfo { name: "Анна".into(), phone: "+7 900 000-00-00".into(), note: String::new() }
    }

    #[test]
    fn blank_name_or_phone_blocks_submission() {
        let info = CustomerInfo { name: "  ".into(), ..customer() };
        assert!(validate_customer(&info).is_err());
        let info = CustomerInfo { phone: String::new(), ..customer() };
        assert!(validate_customer(&info).is_err());
        assert!(validate_customer(&customer()).is_ok());
    }

    #[test]
    fn registration_rules() {
        assert!(validate_registration("olga@example.com", "secret123", "secret123").is_ok());
        assert!(validate_registration("not-an-email", "secret123", "secret123").is_err());
        assert!(validate_registration("olga@example.com", "short", "short").is_err());
        assert!(validate_registration("olga@example.com", "secret123", "secret124").is_err());
    }

    #[test]
    fn payload_carries_resolved_lines_and_total() {
        let cart = vec![
            CartLine { name: "алоэ вера".into(), price: json!(600), quantity: json!(2) },
            CartLine { name: "хлорофитум".into(), price: json!("bad"), quantity: json!(1) },
        ];
        let req = build_order_request(&cart, &customer(), Some(3));
        assert_eq!(req.user_id, Some(3));
        assert_eq!(req.total_amount, json!(1650.0));
        let Some(ProductsPayload::Lines(lines)) = req.products else {
            panic!("Expected a list of product lines");
        };
        assert_eq!(lines.len(), 2);
        // The mangled price has been repaired from the catalog before submission.
        assert_eq!(price_or_zero(&lines[1].price).value(), 450.0);
        assert_eq!(quantity_or_one(&lines[1].quantity), 1);
    }

    #[tokio::test]
    async fn declared_success_clears_the_cart() {
        let mut store = stocked_store();
        let gateway = StubGateway(placed);
        let response = place_order(&mut store, &gateway, &customer()).await.expect("checkout failed");
        assert_eq!(response.order.id, 7);
        assert!(load_cart(&store).is_empty());
    }

    #[tokio::test]
    async fn rejection_leaves_the_cart_intact() {
        let mut store = stocked_store();
        let gateway = StubGateway(|| Err(ClientError::Rejected("Database error: database is locked".to_string())));
        let err = place_order(&mut store, &gateway, &customer()).await.expect_err("expected rejection");
        assert!(matches!(err, CheckoutError::Rejected(_)));
        assert_eq!(load_cart(&store).len(), 1);
    }

    #[tokio::test]
    async fn transport_failure_leaves_the_cart_intact() {
        let mut store = stocked_store();
        let gateway = StubGateway(|| Err(ClientError::Transport("connection refused".to_string())));
        let err = place_order(&mut store, &gateway, &customer()).await.expect_err("expected failure");
        assert!(matches!(err, CheckoutError::Connection(_)));
        assert_eq!(load_cart(&store).len(), 1);
    }

    #[tokio::test]
    async fn empty_cart_blocks_submission_before_the_network() {
        let mut store = MemoryStore::new();
        // A gateway that must not be reached.
        let gateway = StubGateway(|| panic!("the network must not be touched for an empty cart"));
        let err = place_order(&mut store, &gateway, &customer()).await.expect_err("expected validation error");
        assert!(matches!(err, CheckoutError::Validation(_)));
    }

    #[tokio::test]
    async fn placed_order_is_reported_even_when_the_cart_will_not_clear() {
        // Reads fine, refuses to forget.
        struct StickyStore(MemoryStore);
        impl KeyValueStore for StickyStore {
            fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
                self.0.get(key)
            }

            fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
                self.0.set(key, value)
            }

            fn remove(&mut self, _key: &str) -> Result<(), StorageError> {
                Err(StorageError::Format("backing file is read-only".to_string()))
            }
        }

        let mut store = StickyStore(stocked_store());
        let gateway = StubGateway(placed);
        let response = place_order(&mut store, &gateway, &customer()).await.expect("checkout should succeed");
        assert_eq!(response.order.id, 7);
    }
}
