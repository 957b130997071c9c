//! The static product catalog.
//!
//! Prices live in the page markup; this table is the fallback used when a cart line carries a
//! missing or mangled price. Names are the display names, lower-case, as they appear on the
//! product cards.
use zsf_common::Price;

pub const CATALOG: [(&str, f64); 12] = [
    ("монстера деликатесная", 2500.0),
    ("фикус бенджамина", 1800.0),
    ("замиокулькас", 1200.0),
    ("спатифиллум", 900.0),
    ("драцена маргината", 2100.0),
    ("алоэ вера", 600.0),
    ("хлорофитум", 450.0),
    ("фикус лирата", 3400.0),
    ("сансевиерия", 800.0),
    ("антуриум", 1500.0),
    ("каланхоэ", 550.0),
    ("пеперомия", 750.0),
];

/// Looks up the canonical unit price for a product display name.
pub fn price_by_name(name: &str) -> Option<Price> {
    CATALOG.iter().find(|(n, _)| *n == name).map(|&(_, p)| Price::from(p))
}
