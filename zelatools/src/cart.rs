//! The client cart.
//!
//! A cart line keeps its price and quantity as raw JSON values rather than numbers: the slot is
//! shared with other (historical) clients that stored prices as strings scraped from markup, and
//! the cart must keep rendering even when a line is mangled. All numeric interpretation is
//! deferred to [`crate::reconcile`].
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::storage::{KeyValueStore, StorageError};

const CART_KEY: &str = "cart";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartLine {
    pub name: String,
    #[serde(default)]
    pub price: Value,
    #[serde(default)]
    pub quantity: Value,
}

impl CartLine {
    pub fn new<S: Into<String>>(name: S, price: Value) -> Self {
        Self { name: name.into(), price, quantity: Value::from(1) }
    }
}

/// Loads the cart from storage. A missing slot, corrupt JSON, or a slot that does not hold an
/// array all read as an empty cart; the cart slot is never allowed to wedge the client.
pub fn load_cart<S: KeyValueStore>(store: &S) -> Vec<CartLine> {
    let raw = match store.get(CART_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(e) => {
            log::warn!("🛒️ Could not read the cart slot. Treating the cart as empty. {e}");
            return Vec::new();
        },
    };
    match serde_json::from_str::<Value>(&raw) {
        Ok(Value::Array(items)) => items
            .into_iter()
            .filter_map(|item| match serde_json::from_value::<CartLine>(item) {
                Ok(line) => Some(line),
                Err(e) => {
                    log::warn!("🛒️ Dropped an unreadable cart line. {e}");
                    None
                },
            })
            .collect(),
        _ => {
            log::warn!("🛒️ The stored cart could not be read and has been treated as empty.");
            Vec::new()
        },
    }
}

pub fn save_cart<S: KeyValueStore>(store: &mut S, cart: &[CartLine]) -> Result<(), StorageError> {
    let json = serde_json::to_string(cart).map_err(|e| StorageError::Format(e.to_string()))?;
    store.set(CART_KEY, &json)
}

pub fn clear_cart<S: KeyValueStore>(store: &mut S) -> Result<(), StorageError> {
    store.remove(CART_KEY)
}

//--------------------------------------   Pure cart edits   ----------------------------------------------------

/// Adds one unit of the named product, merging into an existing line when one matches by name.
/// A merged line keeps its stored price; the incoming price only applies to a brand-new line.
pub fn add_or_increment(cart: &mut Vec<CartLine>, name: &str, price: Value) {
    match cart.iter_mut().find(|line| line.name == name) {
        Some(line) => {
            let quantity = zsf_common::coerce::quantity_or_one(&line.quantity);
            line.quantity = Value::from(quantity + 1);
        },
        None => cart.push(CartLine::new(name, price)),
    }
}

/// Adjusts the quantity of the named line by `delta` (positive or negative). A quantity that
/// drops to zero or below removes the line. A missing name is a no-op.
pub fn change_quantity(cart: &mut Vec<CartLine>, name: &str, delta: i64) {
    let Some(line) = cart.iter_mut().find(|line| line.name == name) else {
        return;
    };
    let quantity = zsf_common::coerce::quantity_or_one(&line.quantity) + delta;
    if quantity <= 0 {
        cart.retain(|line| line.name != name);
    } else {
        line.quantity = Value::from(quantity);
    }
}
