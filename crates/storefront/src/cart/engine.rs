//! Pure cart state transitions.
//!
//! `CartEngine` owns the ordered cart line collection and implements every
//! mutation the UI can express. The contract is deliberately forgiving:
//! no operation errors for ordinary malformed input. An unknown product id
//! is a no-op on add and "already absent" on remove, a non-positive
//! quantity is a removal intent, and a line whose product has left the
//! catalog contributes zero to the subtotal instead of failing it. The UI
//! is the only caller and always supplies well-formed intents, so strict
//! validation here would only change observable behavior for the worse.
//!
//! Persistence is the caller's concern: the session layer saves after
//! every mutation. The engine itself never touches storage.

use kyboot_core::{CartLine, Price, ProductId};

use crate::catalog::Catalog;

/// The cart: an ordered collection of lines, at most one per product id.
///
/// Order is the insertion order of each product's first add, stable across
/// quantity updates.
#[derive(Debug, Default)]
pub struct CartEngine {
    lines: Vec<CartLine>,
}

impl CartEngine {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Create a cart from previously persisted lines.
    #[must_use]
    pub const fn from_lines(lines: Vec<CartLine>) -> Self {
        Self { lines }
    }

    /// Add `qty` units of a product.
    ///
    /// Unknown product ids and a zero quantity are no-ops. An existing
    /// line is incremented in place; otherwise a new line is appended at
    /// the end of the collection.
    pub fn add(&mut self, catalog: &Catalog, id: &ProductId, qty: u32) {
        if qty == 0 || catalog.get(id).is_none() {
            return;
        }

        match self.line_mut(id) {
            Some(line) => line.quantity = line.quantity.saturating_add(qty),
            None => self.lines.push(CartLine::new(id.clone(), qty)),
        }
    }

    /// Set the quantity of an existing line.
    ///
    /// Zero removes the line (removal intent, not an error). Setting a
    /// quantity on an absent line does not create one.
    pub fn set_quantity(&mut self, id: &ProductId, qty: u32) {
        if qty == 0 {
            self.remove(id);
            return;
        }

        if let Some(line) = self.line_mut(id) {
            line.quantity = qty;
        }
    }

    /// Remove a line. No-op if absent.
    pub fn remove(&mut self, id: &ProductId) {
        self.lines.retain(|line| line.product_id != *id);
    }

    /// Empty the cart.
    ///
    /// Unconditional here - confirming the destructive intent is the
    /// presentation layer's job.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Sum of `price x quantity` over all lines whose product still exists
    /// in the catalog. Orphaned lines contribute zero and do not error.
    #[must_use]
    pub fn subtotal(&self, catalog: &Catalog) -> Price {
        let mut total = Price::zero(catalog.currency());
        for line in &self.lines {
            if let Some(product) = catalog.get(&line.product_id) {
                total.amount += product.price.amount * rust_decimal::Decimal::from(line.quantity);
            }
        }
        total
    }

    /// Sum of quantities across all lines. Drives the cart badge.
    #[must_use]
    pub fn total_item_count(&self) -> u32 {
        self.lines
            .iter()
            .fold(0, |count, line| count.saturating_add(line.quantity))
    }

    /// The lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// The current quantity of a product, zero if absent.
    #[must_use]
    pub fn quantity_of(&self, id: &ProductId) -> u32 {
        self.lines
            .iter()
            .find(|line| line.product_id == *id)
            .map_or(0, |line| line.quantity)
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    fn line_mut(&mut self, id: &ProductId) -> Option<&mut CartLine> {
        self.lines.iter_mut().find(|line| line.product_id == *id)
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;
    use crate::catalog::Catalog;

    /// Two-product catalog: A (100, category X) and B (50, category Y).
    fn scenario_catalog() -> Catalog {
        Catalog::from_json(
            r#"{
              "currency": "QAR",
              "products": [
                {"id": "A", "title": "Product A", "price": "100",
                 "category": "X", "description": "a", "image": "a.png"},
                {"id": "B", "title": "Product B", "price": "50",
                 "category": "Y", "description": "b", "image": "b.png"}
              ]
            }"#,
        )
        .expect("scenario catalog must parse")
    }

    fn id(s: &str) -> ProductId {
        ProductId::new(s)
    }

    #[test]
    fn add_merges_into_existing_line_instead_of_duplicating() {
        let catalog = scenario_catalog();
        let mut cart = CartEngine::new();

        cart.add(&catalog, &id("A"), 1);
        cart.add(&catalog, &id("A"), 2);

        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.quantity_of(&id("A")), 3);
    }

    #[test]
    fn split_adds_equal_one_combined_add() {
        let catalog = scenario_catalog();

        let mut split = CartEngine::new();
        split.add(&catalog, &id("A"), 2);
        split.add(&catalog, &id("A"), 5);

        let mut combined = CartEngine::new();
        combined.add(&catalog, &id("A"), 7);

        assert_eq!(split.lines(), combined.lines());
    }

    #[test]
    fn add_of_unknown_product_is_a_silent_no_op() {
        let catalog = scenario_catalog();
        let mut cart = CartEngine::new();

        cart.add(&catalog, &id("missing"), 1);
        assert!(cart.is_empty());
    }

    #[test]
    fn add_of_zero_quantity_is_a_no_op() {
        let catalog = scenario_catalog();
        let mut cart = CartEngine::new();

        cart.add(&catalog, &id("A"), 0);
        assert!(cart.is_empty());
    }

    #[test]
    fn set_quantity_zero_is_equivalent_to_remove() {
        let catalog = scenario_catalog();

        let mut via_set = CartEngine::new();
        via_set.add(&catalog, &id("A"), 2);
        via_set.set_quantity(&id("A"), 0);

        let mut via_remove = CartEngine::new();
        via_remove.add(&catalog, &id("A"), 2);
        via_remove.remove(&id("A"));

        assert_eq!(via_set.lines(), via_remove.lines());
        assert!(via_set.is_empty());
    }

    #[test]
    fn set_quantity_on_absent_line_does_not_create_one() {
        let mut cart = CartEngine::new();
        cart.set_quantity(&id("A"), 5);
        assert!(cart.is_empty());
    }

    #[test]
    fn remove_of_absent_line_is_a_no_op() {
        let catalog = scenario_catalog();
        let mut cart = CartEngine::new();
        cart.add(&catalog, &id("A"), 1);

        cart.remove(&id("B"));
        assert_eq!(cart.lines().len(), 1);
    }

    #[test]
    fn lines_keep_first_add_order_across_updates() {
        let catalog = scenario_catalog();
        let mut cart = CartEngine::new();

        cart.add(&catalog, &id("B"), 1);
        cart.add(&catalog, &id("A"), 1);
        cart.set_quantity(&id("B"), 9);
        cart.add(&catalog, &id("A"), 1);

        let order: Vec<&str> = cart
            .lines()
            .iter()
            .map(|line| line.product_id.as_str())
            .collect();
        assert_eq!(order, vec!["B", "A"]);
    }

    #[test]
    fn subtotal_ignores_lines_for_products_gone_from_the_catalog() {
        let catalog = scenario_catalog();
        let mut cart = CartEngine::from_lines(vec![
            CartLine::new("A", 1),
            // Persisted before the product was retired from the catalog.
            CartLine::new("discontinued", 4),
        ]);

        assert_eq!(cart.subtotal(&catalog).amount, Decimal::from(100));

        // The orphaned line still exists; it is skipped, not pruned.
        assert_eq!(cart.lines().len(), 2);
        cart.remove(&id("discontinued"));
        assert_eq!(cart.lines().len(), 1);
    }

    #[test]
    fn clear_empties_everything() {
        let catalog = scenario_catalog();
        let mut cart = CartEngine::new();
        cart.add(&catalog, &id("A"), 1);
        cart.add(&catalog, &id("B"), 2);

        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.total_item_count(), 0);
        assert_eq!(cart.subtotal(&catalog).amount, Decimal::ZERO);
    }

    #[test]
    fn add_update_readd_walkthrough() {
        let catalog = scenario_catalog();
        let mut cart = CartEngine::new();

        cart.add(&catalog, &id("A"), 1);
        cart.add(&catalog, &id("B"), 2);
        assert_eq!(cart.lines().len(), 2);
        assert_eq!(cart.subtotal(&catalog).amount, Decimal::from(200));
        assert_eq!(cart.total_item_count(), 3);

        cart.set_quantity(&id("B"), 0);
        assert_eq!(cart.lines(), &[CartLine::new("A", 1)]);
        assert_eq!(cart.subtotal(&catalog).amount, Decimal::from(100));

        cart.add(&catalog, &id("A"), 1);
        assert_eq!(cart.lines(), &[CartLine::new("A", 2)]);
        assert_eq!(cart.subtotal(&catalog).amount, Decimal::from(200));
    }
}
