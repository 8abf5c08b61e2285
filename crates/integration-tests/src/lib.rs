//! Integration tests for Kyboot Shop.
//!
//! The storefront is exercised in-process: each test builds the full
//! router over a [`MemoryBackend`] cart store and the built-in catalog,
//! then drives it with `tower::ServiceExt::oneshot`. No server, no
//! network, no filesystem.
//!
//! Run with: `cargo test -p kyboot-integration-tests`

use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, StatusCode, header};
use http_body_util::BodyExt;
use tower::ServiceExt;

use kyboot_storefront::cart::{CartStore, MemoryBackend};
use kyboot_storefront::catalog::Catalog;
use kyboot_storefront::config::StorefrontConfig;
use kyboot_storefront::routes;
use kyboot_storefront::state::AppState;

/// Build the storefront router over a fresh in-memory cart store.
///
/// The router is `Clone` and every clone shares the same session state,
/// so a test can issue a sequence of requests against one app.
#[must_use]
pub fn test_app() -> Router {
    let catalog = Catalog::builtin().expect("built-in catalog must parse");
    let store = CartStore::new(Box::new(MemoryBackend::new()));
    let state = AppState::new(StorefrontConfig::default(), catalog, store);
    routes::routes().with_state(state)
}

/// Issue a GET request and return the response.
pub async fn get(app: &Router, uri: &str) -> Response<Body> {
    app.clone()
        .oneshot(
            Request::builder()
                .uri(uri)
                .body(Body::empty())
                .expect("request must build"),
        )
        .await
        .expect("request must not fail")
}

/// Issue a POST with a urlencoded form body and return the response.
pub async fn post_form(app: &Router, uri: &str, body: &str) -> Response<Body> {
    app.clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(body.to_owned()))
                .expect("request must build"),
        )
        .await
        .expect("request must not fail")
}

/// Collect a response body into a string, asserting the expected status.
pub async fn body_text(response: Response<Body>, expected: StatusCode) -> String {
    assert_eq!(response.status(), expected);
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body must collect")
        .to_bytes();
    String::from_utf8(bytes.to_vec()).expect("body must be utf-8")
}

/// Whether a response carries the `HX-Trigger: cart-updated` header.
#[must_use]
pub fn triggers_cart_update(response: &Response<Body>) -> bool {
    response
        .headers()
        .get("HX-Trigger")
        .is_some_and(|v| v == "cart-updated")
}
