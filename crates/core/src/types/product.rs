//! The product record served by the catalog.

use serde::{Deserialize, Serialize};

use crate::types::id::ProductId;
use crate::types::price::Price;

/// A purchasable product.
///
/// Products are created once at startup from static catalog configuration
/// and never mutated or deleted during a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Unique catalog identifier (e.g., `kb-001`).
    pub id: ProductId,
    /// Display title.
    pub title: String,
    /// Unit price.
    pub price: Price,
    /// Category label. Matched case-sensitively when filtering.
    pub category: String,
    /// Short marketing description.
    pub description: String,
    /// Image URI.
    pub image: String,
}
