use std::{fmt::Display, str::FromStr};

use chrono::{DateTime, Utc};
use log::error;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use thiserror::Error;
use zsf_common::Price;

//--------------------------------------        User          ---------------------------------------------------------
/// A registered storefront user, as stored. The password is kept verbatim; the storefront has no
/// credential hashing and this type must never be serialized onto the wire. Use [`UserSummary`]
/// for anything that leaves the process.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub password: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl NewUser {
    pub fn new<S: Into<String>>(name: S, email: S, password: S) -> Self {
        Self { name: name.into(), email: email.into(), password: password.into() }
    }
}

/// The public projection of a user record: everything except the password.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

//--------------------------------------   OrderStatusType     ---------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq, Eq, Type, Serialize, Deserialize)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum OrderStatusType {
    /// The order has been submitted and nobody has looked at it yet.
    Pending,
    /// A human has confirmed the order with the customer.
    Confirmed,
    /// The order has been delivered.
    Completed,
}

impl Display for OrderStatusType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderStatusType::Pending => write!(f, "pending"),
            OrderStatusType::Confirmed => write!(f, "confirmed"),
            OrderStatusType::Completed => write!(f, "completed"),
        }
    }
}

#[derive(Debug, Clone, Error)]
#[error("Invalid order status: {0}")]
pub struct ConversionError(String);

impl FromStr for OrderStatusType {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "confirmed" => Ok(Self::Confirmed),
            "completed" => Ok(Self::Completed),
            s => Err(ConversionError(s.to_string())),
        }
    }
}

impl From<String> for OrderStatusType {
    fn from(value: String) -> Self {
        value.parse().unwrap_or_else(|_| {
            error!("Invalid order status: {value}. But this conversion cannot fail. Defaulting to pending");
            OrderStatusType::Pending
        })
    }
}

//--------------------------------------        Order         ---------------------------------------------------------
/// A persisted checkout. An order records exactly one product line. Carts can hold several lines,
/// but the submission protocol collapses them to the first one; this is a documented limitation
/// of the storefront, not something to paper over here.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Order {
    pub id: i64,
    pub user_id: Option<i64>,
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_note: String,
    pub product_name: String,
    pub product_price: Price,
    pub quantity: i64,
    pub total_amount: Price,
    pub status: OrderStatusType,
    pub created_at: DateTime<Utc>,
}

//--------------------------------------       NewOrder       ---------------------------------------------------------
#[derive(Debug, Clone)]
pub struct NewOrder {
    /// The user that placed the order, when the customer was logged in at checkout.
    pub user_id: Option<i64>,
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_note: String,
    /// The single product line recorded for this order (see [`Order`]).
    pub product_name: String,
    pub product_price: Price,
    pub quantity: i64,
    /// The client-computed cart total. Stored as given; it is not rederived from the single
    /// recorded line, because the cart may have held more lines than the order records.
    pub total_amount: Price,
    pub created_at: DateTime<Utc>,
}

impl NewOrder {
    pub fn new<S: Into<String>>(customer_name: S, customer_phone: S) -> Self {
        Self {
            user_id: None,
            customer_name: customer_name.into(),
            customer_phone: customer_phone.into(),
            customer_note: String::new(),
            product_name: String::new(),
            product_price: Price::ZERO,
            quantity: 1,
            total_amount: Price::ZERO,
            created_at: Utc::now(),
        }
    }

    pub fn for_user(mut self, user_id: Option<i64>) -> Self {
        self.user_id = user_id;
        self
    }

    pub fn with_note<S: Into<String>>(mut self, note: S) -> Self {
        self.customer_note = note.into();
        self
    }

    pub fn with_product<S: Into<String>>(mut self, name: S, price: Price, quantity: i64) -> Self {
        self.product_name = name.into();
        self.product_price = price;
        self.quantity = quantity;
        self
    }

    pub fn with_total(mut self, total: Price) -> Self {
        self.total_amount = total;
        self
    }
}
