//! Cart reconciliation: turning possibly-mangled cart lines into authoritative totals.
//!
//! Totals are always computed fresh from the lines; no stored total is ever trusted. The same
//! functions feed both the on-screen cart summary and the submitted order payload, so the two
//! can never disagree.
use zsf_common::{
    coerce::{coerce_price, quantity_or_one},
    Price,
};

use crate::{cart::CartLine, catalog};

/// Resolves the effective unit price of a line. A finite stored price wins, including zero;
/// otherwise the catalog is consulted; otherwise the price degrades to zero. Rendering a total
/// must never fail outright on a bad line.
pub fn resolve_price(line: &CartLine) -> Price {
    coerce_price(&line.price).or_else(|| catalog::price_by_name(&line.name)).unwrap_or(Price::ZERO)
}

/// The effective quantity of a line. Absent or unparseable means one unit, never zero.
pub fn line_quantity(line: &CartLine) -> i64 {
    quantity_or_one(&line.quantity)
}

pub fn line_total(line: &CartLine) -> Price {
    resolve_price(line) * line_quantity(line)
}

pub fn cart_total(cart: &[CartLine]) -> Price {
    cart.iter().map(line_total).sum()
}
