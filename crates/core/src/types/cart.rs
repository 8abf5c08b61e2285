//! Cart line items.

use serde::{Deserialize, Serialize};

use crate::types::id::ProductId;

/// One (product, quantity) pairing within the cart.
///
/// The product id is a foreign key into the catalog, but referential
/// integrity is not enforced at write time: a line whose product has since
/// disappeared from the catalog is skipped at render/subtotal time rather
/// than rejected. A stored quantity is always at least 1 - decrementing a
/// line to zero removes it instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    /// Catalog identifier of the product.
    pub product_id: ProductId,
    /// Units of the product in the cart. Always positive.
    pub quantity: u32,
}

impl CartLine {
    /// Create a new cart line.
    #[must_use]
    pub fn new(product_id: impl Into<ProductId>, quantity: u32) -> Self {
        Self {
            product_id: product_id.into(),
            quantity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_as_product_id_quantity_pair() {
        let line = CartLine::new("kb-002", 3);
        let json = serde_json::to_string(&line).unwrap();
        assert_eq!(json, r#"{"product_id":"kb-002","quantity":3}"#);
    }
}
