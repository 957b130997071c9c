//! The logged-in user slot.
use serde::{Deserialize, Serialize};

use crate::{
    cart,
    storage::{KeyValueStore, StorageError},
};

const USER_KEY: &str = "currentUser";

/// The user identity the client holds after a successful login or registration. This is the
/// whole session: there is no token and no expiry, only the stored id that gets attached to
/// submitted orders.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: i64,
    pub name: String,
}

/// Reads the current user, if any. A corrupt slot reads as logged-out.
pub fn current_user<S: KeyValueStore>(store: &S) -> Option<SessionUser> {
    let raw = store.get(USER_KEY).ok().flatten()?;
    serde_json::from_str(&raw).ok()
}

pub fn save_user<S: KeyValueStore>(store: &mut S, user: &SessionUser) -> Result<(), StorageError> {
    let json = serde_json::to_string(user).map_err(|e| StorageError::Format(e.to_string()))?;
    store.set(USER_KEY, &json)
}

/// Logs out: the user slot and the cart are both cleared. The cart is considered part of the
/// session on shared machines.
pub fn logout<S: KeyValueStore>(store: &mut S) -> Result<(), StorageError> {
    store.remove(USER_KEY)?;
    cart::clear_cart(store)
}
