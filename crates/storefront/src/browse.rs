//! The filter/sort engine deriving the visible product listing.
//!
//! `derive` is pure: identical inputs always produce an identical ordered
//! output, and neither the catalog nor the filter state is mutated. Steps
//! apply in a fixed order - category, then query, then sort - and the sort
//! is stable, so ties keep their post-filter relative order.

use kyboot_core::Product;

use crate::catalog::Catalog;

/// Sentinel category meaning "no category restriction".
pub const ALL_CATEGORIES: &str = "all";

/// Sort order for the product listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortMode {
    /// Keep the post-filter order (catalog configuration order).
    #[default]
    Default,
    /// Ascending by price.
    PriceAsc,
    /// Descending by price.
    PriceDesc,
}

impl SortMode {
    /// Parse a wire name leniently: anything unrecognized is the default
    /// order, in keeping with the forgiving input contract.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw {
            "price-asc" => Self::PriceAsc,
            "price-desc" => Self::PriceDesc,
            _ => Self::Default,
        }
    }

    /// Wire name, as used in the sort `<select>`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::PriceAsc => "price-asc",
            Self::PriceDesc => "price-desc",
        }
    }
}

/// The current (query, category, sort) tuple driving catalog display.
///
/// Ephemeral by design: filter state is never persisted and resets to
/// defaults on every restart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState {
    /// Free-form query, matched case-insensitively as a substring of
    /// title + description + category.
    pub query: String,
    /// Exact category label, or [`ALL_CATEGORIES`].
    pub category: String,
    /// Sort order, applied last.
    pub sort: SortMode,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            query: String::new(),
            category: ALL_CATEGORIES.to_owned(),
            sort: SortMode::default(),
        }
    }
}

impl FilterState {
    /// Whether the category selector is the "all" sentinel.
    #[must_use]
    pub fn is_all_categories(&self) -> bool {
        self.category == ALL_CATEGORIES
    }
}

/// Derive the displayed product subset from the catalog.
///
/// 1. Start from the full catalog in configuration order.
/// 2. Retain the selected category (exact, case-sensitive) unless "all".
/// 3. Retain products whose title, description, and category contain the
///    query, case-insensitively.
/// 4. Sort by price if requested; stable, ties keep their order.
#[must_use]
pub fn derive<'a>(catalog: &'a Catalog, filters: &FilterState) -> Vec<&'a Product> {
    let mut listing: Vec<&Product> = catalog.products().iter().collect();

    if !filters.is_all_categories() {
        listing.retain(|product| product.category == filters.category);
    }

    let query = filters.query.trim().to_lowercase();
    if !query.is_empty() {
        listing.retain(|product| {
            let haystack = format!(
                "{} {} {}",
                product.title, product.description, product.category
            )
            .to_lowercase();
            haystack.contains(&query)
        });
    }

    match filters.sort {
        SortMode::Default => {}
        SortMode::PriceAsc => listing.sort_by(|a, b| a.price.amount.cmp(&b.price.amount)),
        SortMode::PriceDesc => listing.sort_by(|a, b| b.price.amount.cmp(&a.price.amount)),
    }

    listing
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    fn catalog() -> Catalog {
        Catalog::from_json(
            r#"{
              "currency": "QAR",
              "products": [
                {"id": "A", "title": "Product A", "price": "100",
                 "category": "X", "description": "alpha walker", "image": "a.png"},
                {"id": "B", "title": "Product B", "price": "50",
                 "category": "Y", "description": "beta runner", "image": "b.png"},
                {"id": "C", "title": "Product C", "price": "50",
                 "category": "X", "description": "gamma Runner", "image": "c.png"}
              ]
            }"#,
        )
        .expect("test catalog must parse")
    }

    fn ids(listing: &[&kyboot_core::Product]) -> Vec<String> {
        listing.iter().map(|p| p.id.to_string()).collect()
    }

    #[test]
    fn default_filters_return_the_full_catalog_in_original_order() {
        let catalog = catalog();
        let listing = derive(&catalog, &FilterState::default());
        assert_eq!(ids(&listing), vec!["A", "B", "C"]);
    }

    #[test]
    fn category_filter_is_exact_and_case_sensitive() {
        let catalog = catalog();

        let filters = FilterState {
            category: "Y".to_owned(),
            ..FilterState::default()
        };
        assert_eq!(ids(&derive(&catalog, &filters)), vec!["B"]);

        let filters = FilterState {
            category: "y".to_owned(),
            ..FilterState::default()
        };
        assert!(derive(&catalog, &filters).is_empty());
    }

    #[test]
    fn query_matches_title_description_and_category_case_insensitively() {
        let catalog = catalog();

        let filters = FilterState {
            query: "RUNNER".to_owned(),
            ..FilterState::default()
        };
        assert_eq!(ids(&derive(&catalog, &filters)), vec!["B", "C"]);

        let filters = FilterState {
            query: "product a".to_owned(),
            ..FilterState::default()
        };
        assert_eq!(ids(&derive(&catalog, &filters)), vec!["A"]);
    }

    #[test]
    fn price_sorts_are_applied_last_and_are_stable() {
        let catalog = catalog();

        let filters = FilterState {
            sort: SortMode::PriceAsc,
            ..FilterState::default()
        };
        // B and C tie at 50 and keep their relative catalog order.
        assert_eq!(ids(&derive(&catalog, &filters)), vec!["B", "C", "A"]);

        let filters = FilterState {
            sort: SortMode::PriceDesc,
            ..FilterState::default()
        };
        assert_eq!(ids(&derive(&catalog, &filters)), vec!["A", "B", "C"]);
    }

    #[test]
    fn category_then_query_then_sort_compose() {
        let catalog = catalog();
        let filters = FilterState {
            query: "runner".to_owned(),
            category: "X".to_owned(),
            sort: SortMode::PriceAsc,
        };
        assert_eq!(ids(&derive(&catalog, &filters)), vec!["C"]);
    }

    #[test]
    fn sort_mode_parses_wire_names_and_falls_back_to_default() {
        assert_eq!(SortMode::parse("price-asc"), SortMode::PriceAsc);
        assert_eq!(SortMode::parse("price-desc"), SortMode::PriceDesc);
        assert_eq!(SortMode::parse("default"), SortMode::Default);
        assert_eq!(SortMode::parse("bogus"), SortMode::Default);
    }

    #[test]
    fn derive_does_not_mutate_its_inputs() {
        let catalog = catalog();
        let filters = FilterState {
            sort: SortMode::PriceDesc,
            ..FilterState::default()
        };

        let first = ids(&derive(&catalog, &filters));
        let second = ids(&derive(&catalog, &filters));
        assert_eq!(first, second);
        assert_eq!(catalog.products()[0].id.as_str(), "A");
    }
}
