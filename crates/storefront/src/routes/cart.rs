//! Cart route handlers.
//!
//! Cart operations use HTMX for dynamic updates without full page
//! reloads. Every mutation locks the session, forwards the intent, and
//! re-renders the affected fragment in the same request, so the response
//! the client swaps in is never stale. State-changing responses carry an
//! `HX-Trigger: cart-updated` header so the badge refreshes itself.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{AppendHeaders, IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tracing::instrument;

use kyboot_core::ProductId;

use crate::catalog::Catalog;
use crate::filters;
use crate::fx::Orb;
use crate::session::{AddOutcome, ShopSession, UndoOutcome};
use crate::state::AppState;

/// Cart item display data for templates.
#[derive(Clone)]
pub struct CartItemView {
    pub product_id: String,
    pub title: String,
    pub quantity: u32,
    pub price: String,
    pub line_price: String,
    pub image: String,
    /// Quantity the `-` button submits; floors at 1 like the original
    /// stepper (going below 1 is the Remove button's job).
    pub dec_quantity: u32,
    /// Quantity the `+` button submits.
    pub inc_quantity: u32,
}

/// Cart display data for templates.
#[derive(Clone)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub subtotal: String,
    pub item_count: u32,
}

impl CartView {
    /// Project the session's cart state against the catalog.
    ///
    /// Lines whose product is no longer in the catalog are skipped here,
    /// matching the subtotal contract: they linger in storage but never
    /// render.
    #[must_use]
    pub fn project(session: &ShopSession, catalog: &Catalog) -> Self {
        let items = session
            .current_cart_lines()
            .iter()
            .filter_map(|line| {
                let product = catalog.get(&line.product_id)?;
                let mut line_price = product.price;
                line_price.amount *= rust_decimal::Decimal::from(line.quantity);
                Some(CartItemView {
                    product_id: product.id.to_string(),
                    title: product.title.clone(),
                    quantity: line.quantity,
                    price: product.price.display(),
                    line_price: line_price.display(),
                    image: product.image.clone(),
                    dec_quantity: line.quantity.saturating_sub(1).max(1),
                    inc_quantity: line.quantity.saturating_add(1),
                })
            })
            .collect();

        Self {
            items,
            subtotal: session.current_subtotal(catalog).display(),
            item_count: session.current_item_count(),
        }
    }
}

// =============================================================================
// Form payloads
// =============================================================================

/// Add to cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub product_id: String,
    pub quantity: Option<u32>,
}

/// Update cart form data.
#[derive(Debug, Deserialize)]
pub struct UpdateCartForm {
    pub product_id: String,
    pub quantity: u32,
}

/// Remove / undo form data.
#[derive(Debug, Deserialize)]
pub struct CartLineForm {
    pub product_id: String,
}

// =============================================================================
// Templates
// =============================================================================

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub cart: CartView,
    pub cart_count: u32,
    pub glass: bool,
    pub fx_enabled: bool,
    pub orbs: Vec<Orb>,
}

/// Cart items fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_items.html")]
pub struct CartItemsTemplate {
    pub cart: CartView,
}

/// Cart count badge fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub count: u32,
}

/// Inline per-product feedback fragment, with the undo affordance.
#[derive(Template, WebTemplate)]
#[template(path = "partials/inline_feedback.html")]
pub struct InlineFeedbackTemplate {
    pub product_id: String,
    pub message: &'static str,
    pub show_undo: bool,
}

/// Toast fragment template.
#[derive(Template, WebTemplate)]
#[template(path = "partials/toast.html")]
pub struct ToastTemplate {
    pub level: &'static str,
    pub message: String,
}

/// Confirm dialog fragment for the destructive clear.
#[derive(Template, WebTemplate)]
#[template(path = "partials/confirm_clear.html")]
pub struct ConfirmClearTemplate;

/// Confirm dialog fragment for checkout hand-off.
#[derive(Template, WebTemplate)]
#[template(path = "partials/confirm_checkout.html")]
pub struct ConfirmCheckoutTemplate {
    pub subtotal: String,
}

// =============================================================================
// Handlers
// =============================================================================

const CART_UPDATED: (&str, &str) = ("HX-Trigger", "cart-updated");

/// Display the cart page.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>) -> impl IntoResponse {
    let catalog = state.catalog();
    let session = state.session();
    let cart = CartView::project(&session, catalog);
    let cart_count = session.current_item_count();
    drop(session);

    CartShowTemplate {
        cart,
        cart_count,
        glass: state.ui_mode() == crate::cart::UiMode::Glass,
        fx_enabled: state.config().fx.enabled,
        orbs: Vec::new(),
    }
}

/// Add item to cart (HTMX).
///
/// Returns inline feedback with the undo affordance and triggers a badge
/// refresh. An unknown product id is ignored by contract; the feedback
/// then renders without the undo button.
#[instrument(skip(state))]
pub async fn add(State(state): State<AppState>, Form(form): Form<AddToCartForm>) -> Response {
    let id = ProductId::new(form.product_id.clone());
    let quantity = form.quantity.unwrap_or(1).max(1);

    let outcome = state
        .session()
        .on_add_to_cart(state.catalog(), &id, quantity);

    let feedback = InlineFeedbackTemplate {
        product_id: form.product_id,
        message: match outcome {
            AddOutcome::Added => "Added",
            AddOutcome::UnknownProduct => "Unavailable",
        },
        show_undo: outcome == AddOutcome::Added,
    };
    (AppendHeaders([CART_UPDATED]), feedback).into_response()
}

/// Update cart item quantity (HTMX). Quantity zero removes the line.
#[instrument(skip(state))]
pub async fn update(State(state): State<AppState>, Form(form): Form<UpdateCartForm>) -> Response {
    let id = ProductId::new(form.product_id);
    let catalog = state.catalog();

    let mut session = state.session();
    session.on_quantity_changed(&id, form.quantity);
    let cart = CartView::project(&session, catalog);
    drop(session);

    (AppendHeaders([CART_UPDATED]), CartItemsTemplate { cart }).into_response()
}

/// Remove item from cart (HTMX).
#[instrument(skip(state))]
pub async fn remove(State(state): State<AppState>, Form(form): Form<CartLineForm>) -> Response {
    let id = ProductId::new(form.product_id);
    let catalog = state.catalog();

    let mut session = state.session();
    session.on_remove(&id);
    let cart = CartView::project(&session, catalog);
    drop(session);

    (AppendHeaders([CART_UPDATED]), CartItemsTemplate { cart }).into_response()
}

/// Undo the most recent add (HTMX, from the inline feedback slot).
#[instrument(skip(state))]
pub async fn undo(State(state): State<AppState>, Form(form): Form<CartLineForm>) -> Response {
    let id = ProductId::new(form.product_id.clone());

    let outcome = state.session().on_undo_add(&id);
    let message = match outcome {
        UndoOutcome::Undone => "Removed",
        UndoOutcome::NothingToUndo => "Nothing to undo",
    };

    let feedback = InlineFeedbackTemplate {
        product_id: form.product_id,
        message,
        show_undo: false,
    };
    (AppendHeaders([CART_UPDATED]), feedback).into_response()
}

/// Get cart count badge (HTMX).
#[instrument(skip(state))]
pub async fn count(State(state): State<AppState>) -> impl IntoResponse {
    let count = state.session().current_item_count();
    CartCountTemplate { count }
}

/// Confirm dialog for clearing the cart (HTMX).
///
/// The destructive guard lives here, in the presentation layer; the
/// engine clears unconditionally once asked.
#[instrument(skip(state))]
pub async fn clear_confirm(State(state): State<AppState>) -> Response {
    if state.session().cart_is_empty() {
        return ToastTemplate {
            level: "info",
            message: "Cart already empty".to_owned(),
        }
        .into_response();
    }

    ConfirmClearTemplate.into_response()
}

/// Clear the cart (HTMX).
#[instrument(skip(state))]
pub async fn clear(State(state): State<AppState>) -> Response {
    let catalog = state.catalog();

    let mut session = state.session();
    session.on_clear_cart();
    let cart = CartView::project(&session, catalog);
    drop(session);

    (AppendHeaders([CART_UPDATED]), CartItemsTemplate { cart }).into_response()
}

/// Confirm dialog for checkout hand-off (HTMX).
#[instrument(skip(state))]
pub async fn checkout_confirm(State(state): State<AppState>) -> Response {
    let catalog = state.catalog();
    let session = state.session();

    if session.cart_is_empty() {
        return ToastTemplate {
            level: "error",
            message: "Your cart is empty.".to_owned(),
        }
        .into_response();
    }

    let subtotal = session.current_subtotal(catalog).display();
    drop(session);

    ConfirmCheckoutTemplate { subtotal }.into_response()
}

/// Hand off to the external checkout page.
///
/// Checkout itself is not modeled here - an empty cart bounces back to
/// the cart page, anything else redirects to the configured target.
#[instrument(skip(state))]
pub async fn checkout(State(state): State<AppState>) -> Response {
    if state.session().cart_is_empty() {
        return Redirect::to("/cart").into_response();
    }

    Redirect::to(&state.config().checkout_url).into_response()
}
