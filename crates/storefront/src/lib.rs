//! Kyboot Shop storefront library.
//!
//! This crate provides the storefront functionality as a library,
//! allowing it to be tested and reused. The core lives in four modules:
//!
//! - [`catalog`] - the static, read-only product listing
//! - [`cart`] - cart state transitions and durable persistence
//! - [`browse`] - the pure filter/sort derivation
//! - [`session`] - the render/sync layer's single state holder
//!
//! Everything else is plumbing around them: axum routes with askama
//! templates, configuration, and the decorative [`fx`] layer.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod browse;
pub mod cart;
pub mod catalog;
pub mod config;
pub mod error;
pub mod filters;
pub mod fx;
pub mod routes;
pub mod session;
pub mod state;
