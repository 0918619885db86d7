//! In-memory order state and its derived views.
//!
//! [`Order`] holds the selected quantities and the optional delivery date.
//! It is mutated only through the methods below; everything shown to the
//! user (selected items, totals) is derived from it on demand and never
//! cached.

mod record;

use std::collections::BTreeMap;

use chrono::NaiveDate;
use confeitaria_core::{CurrencyCode, DeliveryDate, DeliveryDateError, Price, ProductId, Quantity};

use crate::catalog::{Catalog, Product};

pub use record::{PersistedOrder, RecordError};

/// A product the user picked, with its quantity (always non-zero).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectedItem<'a> {
    pub product: &'a Product,
    pub quantity: Quantity,
}

impl SelectedItem<'_> {
    /// Unit price times quantity.
    #[must_use]
    pub fn subtotal(&self) -> Price {
        self.product.price * self.quantity
    }
}

/// Quantities per product plus an optional delivery date.
///
/// Zero quantities are never stored: setting a product to zero removes its
/// entry, so an empty map and an all-zero map are the same order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Order {
    quantities: BTreeMap<ProductId, Quantity>,
    delivery_date: Option<DeliveryDate>,
}

impl Order {
    /// An order with nothing selected and no date.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the quantity for a product, clamping into `0..=999`.
    ///
    /// Returns the quantity actually stored.
    pub fn set_quantity(&mut self, product_id: impl Into<ProductId>, quantity: i64) -> Quantity {
        let product_id = product_id.into();
        let quantity = Quantity::clamped(quantity);
        if quantity.is_zero() {
            self.quantities.remove(&product_id);
        } else {
            self.quantities.insert(product_id, quantity);
        }
        quantity
    }

    /// Current quantity for a product (zero when not selected).
    #[must_use]
    pub fn quantity(&self, product_id: &str) -> Quantity {
        self.quantities.get(product_id).copied().unwrap_or_default()
    }

    /// Add one unit of a product.
    pub fn increment(&mut self, product_id: &str) -> Quantity {
        let next = self.quantity(product_id).increment();
        self.set_quantity(product_id, i64::from(next.get()))
    }

    /// Remove one unit of a product.
    pub fn decrement(&mut self, product_id: &str) -> Quantity {
        let next = self.quantity(product_id).decrement();
        self.set_quantity(product_id, i64::from(next.get()))
    }

    /// Set or clear the delivery date from user input.
    ///
    /// An empty (or blank) string clears the date. Otherwise the input must be
    /// an ISO calendar date no earlier than `today`. On rejection the order is
    /// left unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`DeliveryDateError`] when the input is malformed or in the
    /// past.
    pub fn set_delivery_date(&mut self, input: &str, today: NaiveDate) -> Result<(), DeliveryDateError> {
        if input.trim().is_empty() {
            self.delivery_date = None;
            return Ok(());
        }
        let date = DeliveryDate::parse_from(input, today)?;
        self.delivery_date = Some(date);
        Ok(())
    }

    #[must_use]
    pub const fn delivery_date(&self) -> Option<DeliveryDate> {
        self.delivery_date
    }

    /// Forget every quantity and the delivery date.
    pub fn clear(&mut self) {
        self.quantities.clear();
        self.delivery_date = None;
    }

    /// True when nothing is selected and no date is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        !self.has_items() && self.delivery_date.is_none()
    }

    /// True when at least one product has a non-zero quantity.
    #[must_use]
    pub fn has_items(&self) -> bool {
        !self.quantities.is_empty()
    }

    /// Raw quantity map, including ids the catalog may not know.
    #[must_use]
    pub const fn quantities(&self) -> &BTreeMap<ProductId, Quantity> {
        &self.quantities
    }

    /// Every catalog product with a non-zero quantity, in catalog order.
    #[must_use]
    pub fn selected_items<'a>(&self, catalog: &'a Catalog) -> Vec<SelectedItem<'a>> {
        catalog
            .products()
            .iter()
            .filter_map(|product| {
                let quantity = self.quantity(product.id.as_str());
                (!quantity.is_zero()).then_some(SelectedItem { product, quantity })
            })
            .collect()
    }

    pub(crate) fn from_parts(
        quantities: BTreeMap<ProductId, Quantity>,
        delivery_date: Option<DeliveryDate>,
    ) -> Self {
        let quantities = quantities.into_iter().filter(|(_, q)| !q.is_zero()).collect();
        Self {
            quantities,
            delivery_date,
        }
    }
}

/// Sum of price times quantity over `items`.
///
/// An empty selection totals zero in `currency`.
#[must_use]
pub fn total(items: &[SelectedItem<'_>], currency: CurrencyCode) -> Price {
    items
        .iter()
        .map(SelectedItem::subtotal)
        .fold(Price::zero(currency), |acc, p| acc + p)
}

/// Total number of units across `items`.
#[must_use]
pub fn total_quantity(items: &[SelectedItem<'_>]) -> u32 {
    items.iter().map(|item| u32::from(item.quantity)).sum()
}
