//! Lorena Felicio Confeitaria storefront library.
//!
//! Catalog browsing, the order state manager and the quote request, shared
//! by the interactive `confeitaria` shell and the `confeitaria-cli` tool.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod config;
pub mod error;
pub mod order;
pub mod quote;
pub mod scheduler;
pub mod session;
pub mod shell;
pub mod state;
pub mod storage;
