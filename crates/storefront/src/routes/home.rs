//! Catalog page handler.
//!
//! The home page is the storefront: filter controls, the product grid,
//! and the slide-in cart panel. Filter changes arrive as plain query
//! parameters and are forwarded verbatim to the session before the
//! visible listing is re-derived.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::Query, extract::State, response::IntoResponse};
use serde::Deserialize;
use tracing::instrument;

use kyboot_core::Product;

use crate::browse::{FilterState, SortMode};
use crate::filters;
use crate::fx::{self, Orb};
use crate::routes::cart::CartView;
use crate::state::AppState;

/// Product display data for templates.
#[derive(Clone)]
pub struct ProductView {
    pub id: String,
    pub title: String,
    pub category: String,
    pub price: String,
    pub description: String,
    pub image: String,
}

impl From<&Product> for ProductView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.to_string(),
            title: product.title.clone(),
            category: product.category.clone(),
            price: product.price.display(),
            description: product.description.clone(),
            image: product.image.clone(),
        }
    }
}

/// Filter controls as they arrive on the wire. Everything is optional
/// and parsed leniently; a bogus sort value falls back to the default
/// order rather than rejecting the request.
#[derive(Debug, Deserialize)]
pub struct BrowseQuery {
    pub query: Option<String>,
    pub category: Option<String>,
    pub sort: Option<String>,
}

impl BrowseQuery {
    fn into_filter_state(self) -> FilterState {
        let defaults = FilterState::default();
        FilterState {
            query: self.query.unwrap_or(defaults.query),
            category: self.category.unwrap_or(defaults.category),
            sort: self
                .sort
                .map_or(defaults.sort, |raw| SortMode::parse(&raw)),
        }
    }
}

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home/index.html")]
pub struct HomeTemplate {
    pub products: Vec<ProductView>,
    pub categories: Vec<String>,
    pub filters: FilterState,
    pub results_count: usize,
    pub cart: CartView,
    pub cart_count: u32,
    pub glass: bool,
    pub fx_enabled: bool,
    pub orbs: Vec<Orb>,
}

/// Product grid fragment template (for HTMX filter updates).
#[derive(Template, WebTemplate)]
#[template(path = "partials/product_grid.html")]
pub struct ProductGridTemplate {
    pub products: Vec<ProductView>,
    pub results_count: usize,
}

/// Display the storefront page.
#[instrument(skip(state))]
pub async fn home(State(state): State<AppState>, Query(query): Query<BrowseQuery>) -> impl IntoResponse {
    let catalog = state.catalog();
    let filters_state = query.into_filter_state();

    let (products, cart, cart_count) = {
        let mut session = state.session();
        session.on_filter_changed(filters_state.clone());

        let products: Vec<ProductView> = session
            .current_visible_products(catalog)
            .into_iter()
            .map(ProductView::from)
            .collect();
        let cart = CartView::project(&session, catalog);
        let cart_count = session.current_item_count();
        (products, cart, cart_count)
    };

    let fx_enabled = state.config().fx.enabled;
    let orbs = if fx_enabled {
        fx::orb_field(&mut rand::rng(), fx::ORB_COUNT)
    } else {
        Vec::new()
    };

    let results_count = products.len();
    HomeTemplate {
        products,
        categories: catalog
            .categories()
            .into_iter()
            .map(str::to_owned)
            .collect(),
        filters: filters_state,
        results_count,
        cart,
        cart_count,
        glass: state.ui_mode() == crate::cart::UiMode::Glass,
        fx_enabled,
        orbs,
    }
}

/// Product grid fragment (for HTMX filter updates without a full reload).
#[instrument(skip(state))]
pub async fn grid(State(state): State<AppState>, Query(query): Query<BrowseQuery>) -> impl IntoResponse {
    let catalog = state.catalog();
    let filters_state = query.into_filter_state();

    let mut session = state.session();
    session.on_filter_changed(filters_state);

    let products: Vec<ProductView> = session
        .current_visible_products(catalog)
        .into_iter()
        .map(ProductView::from)
        .collect();

    let results_count = products.len();
    ProductGridTemplate {
        products,
        results_count,
    }
}
