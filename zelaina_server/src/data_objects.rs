//! Request and response payloads for the storefront endpoints.
//!
//! The order payload is the interesting one: `products` has accumulated three historical shapes
//! on the wire, captured here as an untagged union with an explicit normalization step rather
//! than ad-hoc type sniffing.
use serde::{Deserialize, Serialize};
use serde_json::Value;
use zsf_common::{
    coerce::{price_or_zero, quantity_or_one},
    Price,
};

/// The product name recorded when a payload carries none.
pub const DEFAULT_PRODUCT_NAME: &str = "Товар";

//----------------------------------------     Auth      ----------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// The user projection returned on successful register/login. Also what the client keeps in its
/// `currentUser` slot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserHandle {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub success: bool,
    pub message: String,
    pub user: UserHandle,
}

//----------------------------------------     Orders     ----------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderRequest {
    #[serde(default)]
    pub user_id: Option<i64>,
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub customer_phone: Option<String>,
    #[serde(default)]
    pub customer_note: Option<String>,
    #[serde(default)]
    pub products: Option<ProductsPayload>,
    /// The client-computed cart total. Coerced with a zero fallback like every other numeric
    /// field in this payload.
    #[serde(default)]
    pub total_amount: Value,
}

/// One product entry as it appears on the wire. Price and quantity are raw JSON values because
/// clients have historically sent numbers and numeric strings interchangeably.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductPayload {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub price: Value,
    #[serde(default)]
    pub quantity: Value,
}

/// The three shapes `products` can take. Variant order matters for untagged deserialization:
/// arrays before objects before strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProductsPayload {
    /// A list of product objects. Only the first element is honored; the rest are silently
    /// dropped. The persisted order records a single product line, a documented limitation of
    /// the storefront that is preserved as-is.
    Lines(Vec<ProductPayload>),
    /// A single product object.
    Single(ProductPayload),
    /// A bare product name, implying price 0 and quantity 1.
    Name(String),
}

/// The single canonical line an order records.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderLine {
    pub name: String,
    pub price: Price,
    pub quantity: i64,
}

impl ProductPayload {
    fn normalize(self) -> OrderLine {
        let name = self
            .name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| DEFAULT_PRODUCT_NAME.to_string());
        OrderLine { name, price: price_or_zero(&self.price), quantity: quantity_or_one(&self.quantity) }
    }
}

impl ProductsPayload {
    /// Collapses whichever shape arrived into the one line the order will record.
    pub fn normalize(self) -> OrderLine {
        match self {
            ProductsPayload::Lines(lines) => match lines.into_iter().next() {
                Some(line) => line.normalize(),
                None => ProductPayload::default().normalize(),
            },
            ProductsPayload::Single(line) => line.normalize(),
            ProductsPayload::Name(name) => ProductPayload { name: Some(name), ..Default::default() }.normalize(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderHandle {
    pub id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderResponse {
    pub success: bool,
    pub message: String,
    pub order: OrderHandle,
}

/// The body shape every error response carries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}
