//! The render/sync layer's state holder.
//!
//! `ShopSession` owns the only mutable state in the application: the cart
//! engine, the ephemeral filter state, and the undo bookkeeping for the
//! most recent add. Route handlers forward user intents here verbatim and
//! re-derive their views from the accessors immediately afterwards, so a
//! mutation is never observable through a stale view.
//!
//! Every state-changing call persists the cart before returning. Filter
//! changes are the exception: filter state is ephemeral by design and is
//! never written to storage.

use kyboot_core::{CartLine, Price, Product, ProductId};

use crate::browse::{self, FilterState};
use crate::cart::{CartEngine, CartStore, UiMode};
use crate::catalog::Catalog;

/// Result of an add intent, used by the inline feedback affordance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// The product was added (or its line incremented).
    Added,
    /// The product id is not in the catalog; nothing happened.
    UnknownProduct,
}

/// Result of an undo intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UndoOutcome {
    /// One unit of the most recent add was taken back.
    Undone,
    /// The product was not the most recent add (or was already gone);
    /// nothing happened.
    NothingToUndo,
}

/// Session state: cart, filters, and persistence wiring.
pub struct ShopSession {
    engine: CartEngine,
    filters: FilterState,
    store: CartStore,
    last_added: Option<ProductId>,
}

impl ShopSession {
    /// Start a session, recovering any previously persisted cart.
    #[must_use]
    pub fn new(store: CartStore) -> Self {
        let engine = CartEngine::from_lines(store.load());
        Self {
            engine,
            filters: FilterState::default(),
            store,
            last_added: None,
        }
    }

    // =========================================================================
    // Mutation API - user intents, forwarded verbatim from the routes
    // =========================================================================

    /// Replace the filter state. Not persisted.
    pub fn on_filter_changed(&mut self, filters: FilterState) {
        self.filters = filters;
    }

    /// Add one or more units of a product to the cart.
    pub fn on_add_to_cart(&mut self, catalog: &Catalog, id: &ProductId, qty: u32) -> AddOutcome {
        if catalog.get(id).is_none() {
            // Silently ignored by contract; still worth a trace.
            tracing::debug!(product_id = %id, "Add ignored: unknown product");
            return AddOutcome::UnknownProduct;
        }

        self.engine.add(catalog, id, qty);
        self.last_added = Some(id.clone());
        self.persist();
        AddOutcome::Added
    }

    /// Set the quantity of a cart line. Zero removes it.
    pub fn on_quantity_changed(&mut self, id: &ProductId, qty: u32) {
        self.engine.set_quantity(id, qty);
        self.persist();
    }

    /// Remove a cart line.
    pub fn on_remove(&mut self, id: &ProductId) {
        self.engine.remove(id);
        self.persist();
    }

    /// Empty the cart. The confirm dialog lives in the presentation layer;
    /// once invoked this is unconditional.
    pub fn on_clear_cart(&mut self) {
        self.engine.clear();
        self.last_added = None;
        self.persist();
    }

    /// Undo the most recent add: quantity 1 removes the line, otherwise
    /// one unit is taken back. Only the product of the most recent add
    /// qualifies; anything else is a no-op.
    pub fn on_undo_add(&mut self, id: &ProductId) -> UndoOutcome {
        if self.last_added.as_ref() != Some(id) {
            return UndoOutcome::NothingToUndo;
        }

        let current = self.engine.quantity_of(id);
        if current == 0 {
            return UndoOutcome::NothingToUndo;
        }

        self.engine.set_quantity(id, current - 1);
        // One undo per add, matching the single-shot inline affordance.
        self.last_added = None;
        self.persist();
        UndoOutcome::Undone
    }

    // =========================================================================
    // Read accessors - views re-derive from these after every mutation
    // =========================================================================

    /// Current cart lines in insertion order.
    #[must_use]
    pub fn current_cart_lines(&self) -> &[CartLine] {
        self.engine.lines()
    }

    /// Current subtotal over lines whose product still exists.
    #[must_use]
    pub fn current_subtotal(&self, catalog: &Catalog) -> Price {
        self.engine.subtotal(catalog)
    }

    /// Current total item count for the badge.
    #[must_use]
    pub fn current_item_count(&self) -> u32 {
        self.engine.total_item_count()
    }

    /// Products visible under the current filter state.
    #[must_use]
    pub fn current_visible_products<'a>(&self, catalog: &'a Catalog) -> Vec<&'a Product> {
        browse::derive(catalog, &self.filters)
    }

    /// The current filter state.
    #[must_use]
    pub const fn filters(&self) -> &FilterState {
        &self.filters
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn cart_is_empty(&self) -> bool {
        self.engine.is_empty()
    }

    /// Persist the UI mode through the session's store. Fire-and-forget,
    /// like every other persistence call.
    pub fn persist_ui_mode(&self, mode: UiMode) {
        self.store.save_ui_mode(mode);
    }

    fn persist(&self) {
        self.store.save(self.engine.lines());
    }
}
