//! Kyboot Core - Shared types library.
//!
//! This crate provides the domain types used across the Kyboot Shop
//! components:
//! - `storefront` - Public-facing shop site
//! - `integration-tests` - End-to-end route tests
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP, no storage access.
//! This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs and prices, plus the
//!   `Product` and `CartLine` records shared by the catalog and the cart.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
