//! On-device record layout for a saved order.
//!
//! ```json
//! { "quantities": { "1": 2, "14": 10 }, "deliveryDate": "2026-12-25" }
//! ```
//!
//! `deliveryDate` is `""` when no date is set. Both fields must be present
//! and well-typed; anything else is treated as "no saved order".

use std::collections::BTreeMap;

use confeitaria_core::{DeliveryDate, DeliveryDateError, ProductId, Quantity};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::Order;

/// Reasons a stored record is not accepted.
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("record is not a valid order object: {0}")]
    Shape(#[from] serde_json::Error),
    #[error("record has an invalid delivery date: {0}")]
    DeliveryDate(#[from] DeliveryDateError),
}

/// Serialized form of an [`Order`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedOrder {
    pub quantities: BTreeMap<ProductId, i64>,
    pub delivery_date: String,
}

impl PersistedOrder {
    /// Parse and validate a stored JSON payload.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::Shape`] when the JSON is malformed, is not an
    /// object, misses a field, or has non-integer quantities.
    pub fn from_json(payload: &str) -> Result<Self, RecordError> {
        Ok(serde_json::from_str(payload)?)
    }

    /// Serialize to the stored JSON payload.
    ///
    /// # Errors
    ///
    /// Propagates `serde_json` failures, which cannot occur for this shape
    /// in practice.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Convert into an order. Quantities are clamped; the date is parsed but
    /// not compared against today.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::DeliveryDate`] if the date is neither empty
    /// nor an ISO calendar date.
    pub fn into_order(self) -> Result<Order, RecordError> {
        let delivery_date = if self.delivery_date.is_empty() {
            None
        } else {
            Some(DeliveryDate::parse(&self.delivery_date)?)
        };
        let quantities = self
            .quantities
            .into_iter()
            .map(|(id, q)| (id, Quantity::clamped(q)))
            .collect();
        Ok(Order::from_parts(quantities, delivery_date))
    }
}

impl From<&Order> for PersistedOrder {
    fn from(order: &Order) -> Self {
        Self {
            quantities: order
                .quantities()
                .iter()
                .map(|(id, q)| (id.clone(), i64::from(q.get())))
                .collect(),
            delivery_date: order
                .delivery_date()
                .map(|d| d.to_iso())
                .unwrap_or_default(),
        }
    }
}
