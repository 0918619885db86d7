//! Confeitaria Core - Shared domain types.
//!
//! This crate provides the types used across all Confeitaria components:
//! - `storefront` - Catalog, order state, persistence and the terminal page
//! - `cli` - Scriptable one-shot commands over the same order
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access, no clocks.
//! Anything that needs "today" takes it as an argument.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for product IDs, prices, quantities and
//!   delivery dates

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
