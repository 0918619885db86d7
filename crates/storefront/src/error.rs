//! Unified error handling for the binaries.
//!
//! Order-level failures (storage, malformed records, bad user input) never
//! reach this type: they are logged and absorbed where they happen. `AppError`
//! covers what can stop the program from starting or a command from
//! producing output.

use confeitaria_core::DeliveryDateError;
use thiserror::Error;

use crate::catalog::CatalogError;
use crate::config::ConfigError;
use crate::quote::QuoteError;

/// Application-level error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The built-in catalog is inconsistent.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// The quote message or link could not be built.
    #[error("Quote error: {0}")]
    Quote(#[from] QuoteError),

    /// Terminal input or output failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A delivery date that is malformed or in the past.
    #[error("Invalid delivery date: {0}")]
    DeliveryDate(#[from] DeliveryDateError),

    /// A product id that the catalog does not know.
    #[error("Unknown product: {0}")]
    UnknownProduct(String),
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
