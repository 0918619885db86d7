//! Core types for Confeitaria.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod delivery_date;
pub mod id;
pub mod price;
pub mod quantity;

pub use delivery_date::{DeliveryDate, DeliveryDateError};
pub use id::*;
pub use price::{CurrencyCode, Price};
pub use quantity::Quantity;
