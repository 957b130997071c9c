use std::{
    fmt::Display,
    iter::Sum,
    ops::{Add, Mul},
};

use serde::{Deserialize, Serialize};
use sqlx::Type;

//--------------------------------------       Price         ---------------------------------------------------------
/// A unit price or order total, in rubles.
///
/// Backed by `f64` because both the wire format and the storage column carry plain JSON numbers.
/// Untrusted sources go through [`crate::coerce`] rather than constructing a `Price` directly.
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd, Type, Serialize, Deserialize)]
#[sqlx(transparent)]
#[serde(transparent)]
pub struct Price(f64);

impl Price {
    pub const ZERO: Price = Price(0.0);

    pub fn value(&self) -> f64 {
        self.0
    }
}

impl From<f64> for Price {
    fn from(value: f64) -> Self {
        Self(value)
    }
}

impl From<i64> for Price {
    #[allow(clippy::cast_precision_loss)]
    fn from(value: i64) -> Self {
        Self(value as f64)
    }
}

impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Mul<i64> for Price {
    type Output = Self;

    #[allow(clippy::cast_precision_loss)]
    fn mul(self, rhs: i64) -> Self::Output {
        Self(self.0 * rhs as f64)
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}

impl Display for Price {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.0.fract() == 0.0 {
            write!(f, "{:.0} руб.", self.0)
        } else {
            write!(f, "{:.2} руб.", self.0)
        }
    }
}
