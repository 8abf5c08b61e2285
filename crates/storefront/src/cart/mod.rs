//! Cart state and persistence.
//!
//! - [`engine`] - pure state transitions over the cart line collection
//! - [`store`] - durable key-value persistence with a forgiving contract

pub mod engine;
pub mod store;

pub use engine::CartEngine;
pub use store::{CART_KEY, CartStore, FileBackend, MemoryBackend, StorageBackend, UiMode};
