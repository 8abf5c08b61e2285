//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Storefront page (filters via query params)
//! GET  /products/grid          - Product grid fragment (HTMX)
//! GET  /health                 - Health check
//!
//! # Cart (HTMX fragments)
//! GET  /cart                   - Cart page
//! POST /cart/add               - Add to cart (inline feedback + cart-updated)
//! POST /cart/update            - Update quantity (cart_items fragment)
//! POST /cart/remove            - Remove item (cart_items fragment)
//! POST /cart/undo              - Undo the most recent add
//! GET  /cart/count             - Cart count badge (fragment)
//! GET  /cart/clear/confirm     - Confirm dialog for destructive clear
//! POST /cart/clear             - Clear the cart
//!
//! # Checkout
//! GET  /checkout/confirm       - Confirm dialog with subtotal
//! GET  /checkout               - Redirect to external checkout
//!
//! # Pages & UI
//! GET  /pages/terms            - Terms popover fragment
//! GET  /contact                - Contact popover fragment
//! POST /contact                - Contact submission (validated)
//! POST /mode                   - Toggle glass/normal mode
//! ```

pub mod cart;
pub mod home;
pub mod pages;

use axum::{
    Router,
    http::Uri,
    routing::{get, post},
};

use crate::error::AppError;
use crate::state::AppState;

/// Fallback for unknown paths, routed through the unified error type.
async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(uri.path().to_owned())
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/undo", post(cart::undo))
        .route("/count", get(cart::count))
        .route("/clear/confirm", get(cart::clear_confirm))
        .route("/clear", post(cart::clear))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Storefront page
        .route("/", get(home::home))
        .route("/products/grid", get(home::grid))
        // Cart routes
        .nest("/cart", cart_routes())
        // Checkout hand-off
        .route("/checkout/confirm", get(cart::checkout_confirm))
        .route("/checkout", get(cart::checkout))
        // Pages & UI
        .route("/pages/terms", get(pages::terms))
        .route("/contact", get(pages::contact_form).post(pages::contact_submit))
        .route("/mode", post(pages::toggle_mode))
        .fallback(not_found)
}
