pub mod coerce;
mod price;

pub use price::Price;
