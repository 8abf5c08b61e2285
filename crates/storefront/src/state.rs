//! Application state shared across handlers.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::cart::{CartStore, UiMode};
use crate::catalog::Catalog;
use crate::config::StorefrontConfig;
use crate::session::ShopSession;

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`. The session sits behind a `Mutex`: user
/// intents arrive one at a time and run to completion while holding the
/// lock, which serializes cart mutations exactly like the single UI event
/// loop the storefront models.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: Catalog,
    session: Mutex<ShopSession>,
    ui_mode: Mutex<UiMode>,
}

impl AppState {
    /// Create a new application state.
    ///
    /// Loads the persisted cart and UI mode through `store` once, at
    /// session start.
    #[must_use]
    pub fn new(config: StorefrontConfig, catalog: Catalog, store: CartStore) -> Self {
        let ui_mode = store.load_ui_mode();
        let session = ShopSession::new(store);

        Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                session: Mutex::new(session),
                ui_mode: Mutex::new(ui_mode),
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the product catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    /// Lock the shop session for the duration of one user intent.
    #[must_use]
    pub fn session(&self) -> MutexGuard<'_, ShopSession> {
        self.inner
            .session
            .lock()
            .expect("shop session lock poisoned")
    }

    /// The current UI presentation mode.
    #[must_use]
    pub fn ui_mode(&self) -> UiMode {
        *self.inner.ui_mode.lock().expect("ui mode lock poisoned")
    }

    /// Replace the UI presentation mode, returning the new value.
    pub fn set_ui_mode(&self, mode: UiMode) -> UiMode {
        *self.inner.ui_mode.lock().expect("ui mode lock poisoned") = mode;
        mode
    }
}
