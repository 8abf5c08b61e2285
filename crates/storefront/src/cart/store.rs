//! Durable cart persistence.
//!
//! The cart survives restarts through a small key-value store holding a
//! single fixed key, [`CART_KEY`], whose value is the JSON-serialized list
//! of cart lines. The store is deliberately forgiving in both directions:
//!
//! - `load` treats an absent or unparseable value as "no prior cart" and
//!   returns an empty collection - a format change never propagates an
//!   error to the caller.
//! - `save` is fire-and-forget - a write failure is logged at `warn` and
//!   swallowed, never surfaced as a user-facing error mid-mutation.
//!
//! There is no versioning or migration logic. A structurally different
//! stored value simply reads back as an empty cart.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;

use kyboot_core::CartLine;

/// Fixed storage key for the serialized cart collection.
pub const CART_KEY: &str = "kyboot_cart_v1";

/// Fixed storage key for the persisted UI mode (glass/normal).
pub const UI_MODE_KEY: &str = "kyboot_ui_mode";

/// Storage write errors. Reads never error - missing data is `None`.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("IO error writing {key}: {message}")]
    Io { key: String, message: String },
}

/// A durable local key-value store.
///
/// The abstraction point between the cart logic and the machine it runs
/// on: production uses [`FileBackend`], tests use [`MemoryBackend`].
pub trait StorageBackend: Send + Sync {
    /// Read the value stored under `key`, if any.
    fn read(&self, key: &str) -> Option<String>;

    /// Write `value` under `key`, overwriting any prior value.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the value could not be made durable.
    fn write(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// File-per-key backend rooted at a data directory.
#[derive(Debug)]
pub struct FileBackend {
    dir: PathBuf,
}

impl FileBackend {
    /// Create a backend rooted at `dir`. The directory is created lazily
    /// on first write.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl StorageBackend for FileBackend {
    fn read(&self, key: &str) -> Option<String> {
        std::fs::read_to_string(self.path_for(key)).ok()
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StoreError> {
        std::fs::create_dir_all(&self.dir).map_err(|e| StoreError::Io {
            key: key.to_owned(),
            message: e.to_string(),
        })?;
        std::fs::write(self.path_for(key), value).map_err(|e| StoreError::Io {
            key: key.to_owned(),
            message: e.to_string(),
        })
    }
}

/// In-memory backend for tests and ephemeral runs.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    map: Mutex<HashMap<String, String>>,
}

impl MemoryBackend {
    /// Create an empty in-memory backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageBackend for MemoryBackend {
    fn read(&self, key: &str) -> Option<String> {
        self.map
            .lock()
            .expect("storage map lock poisoned")
            .get(key)
            .cloned()
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.map
            .lock()
            .expect("storage map lock poisoned")
            .insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

/// Persisted UI presentation mode. Glass is the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UiMode {
    #[default]
    Glass,
    Normal,
}

impl UiMode {
    /// Wire name used in storage.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Glass => "glass",
            Self::Normal => "normal",
        }
    }

    /// The other mode.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Glass => Self::Normal,
            Self::Normal => Self::Glass,
        }
    }
}

/// The persistent cart store.
///
/// Owns a storage backend and speaks in domain types: the serialization
/// format (a JSON array of `{product_id, quantity}` pairs, order
/// preserved) is private to this module.
pub struct CartStore {
    backend: Box<dyn StorageBackend>,
}

impl CartStore {
    /// Create a store over the given backend.
    #[must_use]
    pub fn new(backend: Box<dyn StorageBackend>) -> Self {
        Self { backend }
    }

    /// Load the persisted cart.
    ///
    /// Returns an empty collection if nothing was stored or if the stored
    /// value fails to parse. Lines referencing products no longer in the
    /// catalog are NOT pruned here - they are skipped lazily at render and
    /// subtotal time.
    #[must_use]
    pub fn load(&self) -> Vec<CartLine> {
        let Some(raw) = self.backend.read(CART_KEY) else {
            return Vec::new();
        };

        match serde_json::from_str::<Vec<CartLine>>(&raw) {
            Ok(lines) => lines,
            Err(e) => {
                tracing::warn!("Stored cart is unreadable, starting empty: {e}");
                Vec::new()
            }
        }
    }

    /// Persist the cart, overwriting any prior value.
    ///
    /// Fire-and-forget: failures are logged and swallowed so a storage
    /// problem never aborts a cart mutation that already happened.
    pub fn save(&self, lines: &[CartLine]) {
        let raw = match serde_json::to_string(lines) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!("Failed to serialize cart, skipping persist: {e}");
                return;
            }
        };

        if let Err(e) = self.backend.write(CART_KEY, &raw) {
            tracing::warn!("Failed to persist cart: {e}");
        }
    }

    /// Load the persisted UI mode. Unknown or absent values fall back to
    /// the default (glass).
    #[must_use]
    pub fn load_ui_mode(&self) -> UiMode {
        match self.backend.read(UI_MODE_KEY).as_deref() {
            Some("normal") => UiMode::Normal,
            _ => UiMode::Glass,
        }
    }

    /// Persist the UI mode. Fire-and-forget, like [`CartStore::save`].
    pub fn save_ui_mode(&self, mode: UiMode) {
        if let Err(e) = self.backend.write(UI_MODE_KEY, mode.as_str()) {
            tracing::warn!("Failed to persist UI mode: {e}");
        }
    }
}

impl std::fmt::Debug for CartStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartStore").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn memory_store() -> CartStore {
        CartStore::new(Box::new(MemoryBackend::new()))
    }

    #[test]
    fn load_of_absent_cart_is_empty() {
        assert!(memory_store().load().is_empty());
    }

    #[test]
    fn round_trip_preserves_pairs_and_insertion_order() {
        let store = memory_store();
        let lines = vec![
            CartLine::new("kb-005", 2),
            CartLine::new("kb-001", 1),
            CartLine::new("kb-009", 4),
        ];

        store.save(&lines);
        assert_eq!(store.load(), lines);
    }

    #[test]
    fn empty_cart_round_trips_to_empty_not_error() {
        let store = memory_store();
        store.save(&[]);
        assert!(store.load().is_empty());
    }

    #[test]
    fn corrupt_value_reads_back_as_empty_cart() {
        let backend = MemoryBackend::new();
        backend.write(CART_KEY, "{not json at all").unwrap();
        let store = CartStore::new(Box::new(backend));
        assert!(store.load().is_empty());
    }

    #[test]
    fn structurally_different_value_is_treated_as_absent() {
        let backend = MemoryBackend::new();
        backend
            .write(CART_KEY, r#"{"version": 2, "lines": []}"#)
            .unwrap();
        let store = CartStore::new(Box::new(backend));
        assert!(store.load().is_empty());
    }

    #[test]
    fn file_backend_round_trips_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let store = CartStore::new(Box::new(FileBackend::new(dir.path())));

        let lines = vec![CartLine::new("kb-002", 3)];
        store.save(&lines);
        assert_eq!(store.load(), lines);

        // A fresh store over the same directory sees the same cart.
        let reopened = CartStore::new(Box::new(FileBackend::new(dir.path())));
        assert_eq!(reopened.load(), lines);
    }

    #[test]
    fn ui_mode_defaults_to_glass_and_round_trips() {
        let store = memory_store();
        assert_eq!(store.load_ui_mode(), UiMode::Glass);

        store.save_ui_mode(UiMode::Normal);
        assert_eq!(store.load_ui_mode(), UiMode::Normal);

        store.save_ui_mode(UiMode::Glass);
        assert_eq!(store.load_ui_mode(), UiMode::Glass);
    }
}
