//! Shared domain types for Kyboot Shop.

pub mod cart;
pub mod id;
pub mod price;
pub mod product;

pub use cart::CartLine;
pub use id::ProductId;
pub use price::{CurrencyCode, Price};
pub use product::Product;
