//! The static product catalog.
//!
//! The catalog is an immutable, ordered list of products loaded once at
//! startup - either from a JSON file pointed at by `KYBOOT_CATALOG_PATH`
//! or from the built-in catalog embedded in the binary. It is never
//! mutated afterward; every other component treats it as read-only input.
//!
//! The file format carries one currency for the whole catalog:
//!
//! ```json
//! {
//!   "currency": "QAR",
//!   "products": [
//!     { "id": "kb-001", "title": "...", "price": "349", "category": "...",
//!       "description": "...", "image": "https://..." }
//!   ]
//! }
//! ```

use std::collections::HashMap;
use std::path::Path;

use rust_decimal::Decimal;
use serde::Deserialize;

use kyboot_core::{CurrencyCode, Price, Product, ProductId};

/// Built-in catalog bundled with the binary.
const BUILTIN_CATALOG: &str = include_str!("../catalog/products.json");

/// Catalog loading errors.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("IO error reading catalog: {0}")]
    Io(String),
    #[error("Parse error in catalog: {0}")]
    Parse(String),
}

/// On-disk product record. Converted into [`Product`] at load time, once
/// the catalog-wide currency is known.
#[derive(Debug, Deserialize)]
struct ProductRecord {
    id: ProductId,
    title: String,
    price: Decimal,
    category: String,
    description: String,
    image: String,
}

/// On-disk catalog file.
#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    currency: CurrencyCode,
    products: Vec<ProductRecord>,
}

/// The immutable, ordered product catalog.
///
/// Holds products in their configuration order and an id index for O(1)
/// lookup. Duplicate ids keep the first occurrence in the index; the
/// listing itself preserves every record as configured.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product>,
    index: HashMap<ProductId, usize>,
    currency: CurrencyCode,
}

impl Catalog {
    /// Load the catalog bundled into the binary.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Parse` if the embedded catalog is malformed,
    /// which would be a packaging defect.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_json(BUILTIN_CATALOG)
    }

    /// Load a catalog from a JSON file on disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed. Unlike cart
    /// persistence, a broken catalog is a startup failure - there is no
    /// sensible empty-storefront fallback.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let raw = std::fs::read_to_string(path).map_err(|e| CatalogError::Io(e.to_string()))?;
        Self::from_json(&raw)
    }

    /// Parse a catalog from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Parse` if the JSON does not match the
    /// catalog file format.
    pub fn from_json(raw: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile =
            serde_json::from_str(raw).map_err(|e| CatalogError::Parse(e.to_string()))?;

        let products: Vec<Product> = file
            .products
            .into_iter()
            .map(|record| Product {
                id: record.id,
                title: record.title,
                price: Price::new(record.price, file.currency),
                category: record.category,
                description: record.description,
                image: record.image,
            })
            .collect();

        let mut index = HashMap::with_capacity(products.len());
        for (position, product) in products.iter().enumerate() {
            index.entry(product.id.clone()).or_insert(position);
        }

        Ok(Self {
            products,
            index,
            currency: file.currency,
        })
    }

    /// Look up a product by id.
    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        self.index.get(id).map(|&position| &self.products[position])
    }

    /// The full listing in configuration order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Unique category labels in first-seen order.
    ///
    /// Used to populate the category filter control.
    #[must_use]
    pub fn categories(&self) -> Vec<&str> {
        let mut seen = Vec::new();
        for product in &self.products {
            if !seen.contains(&product.category.as_str()) {
                seen.push(product.category.as_str());
            }
        }
        seen
    }

    /// The catalog-wide currency.
    #[must_use]
    pub const fn currency(&self) -> CurrencyCode {
        self.currency
    }

    /// Number of products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Whether the catalog has no products.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_parses_and_keeps_configuration_order() {
        let catalog = Catalog::builtin().expect("builtin catalog must parse");
        assert_eq!(catalog.len(), 12);
        assert_eq!(catalog.products()[0].id.as_str(), "kb-001");
        assert_eq!(catalog.products()[11].id.as_str(), "kb-012");
    }

    #[test]
    fn lookup_by_id_resolves_price_in_catalog_currency() {
        let catalog = Catalog::builtin().unwrap();
        let boot = catalog.get(&ProductId::new("kb-002")).unwrap();
        assert_eq!(boot.title, "Kyboot TrailMaster");
        assert_eq!(boot.price.display(), "429.00 QAR");
    }

    #[test]
    fn unknown_id_is_none() {
        let catalog = Catalog::builtin().unwrap();
        assert!(catalog.get(&ProductId::new("kb-999")).is_none());
    }

    #[test]
    fn categories_are_unique_in_first_seen_order() {
        let catalog = Catalog::builtin().unwrap();
        assert_eq!(
            catalog.categories(),
            vec!["Sneakers", "Boots", "Casual", "Kids", "Running", "sandals"]
        );
    }

    #[test]
    fn malformed_catalog_is_a_parse_error() {
        let err = Catalog::from_json("{\"products\": 42}").unwrap_err();
        assert!(matches!(err, CatalogError::Parse(_)));
    }
}
