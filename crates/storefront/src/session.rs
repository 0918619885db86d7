//! The order state manager.
//!
//! [`OrderSession`] owns the in-memory [`Order`] for one run of the app and
//! keeps it synchronized with the on-device record:
//!
//! 1. [`OrderSession::load`] reads the saved record once at startup. A missing
//!    or malformed record yields an empty order; nothing here is fatal.
//! 2. Every mutation after the load schedules a debounced save. Mutations made
//!    before the load completes are never written, so an empty initial order
//!    cannot clobber a saved one.
//! 3. A save writes `{quantities, deliveryDate}`, or deletes the record when
//!    the order is empty.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use confeitaria_core::{DeliveryDateError, Quantity};

use crate::order::{Order, PersistedOrder};
use crate::scheduler::{SaveAction, SaveJob, SaveScheduler};
use crate::storage::OrderStore;

/// Default key of the saved order record.
pub const DEFAULT_STORAGE_KEY: &str = "lorena-felicio-order";

/// How the initial load went.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// A saved order was restored.
    Restored,
    /// There was no saved order.
    Empty,
    /// A record existed but could not be used; the order starts empty.
    Discarded,
}

/// Source of "today" for delivery-date validation.
pub type Today = Arc<dyn Fn() -> NaiveDate + Send + Sync>;

fn local_today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Owned order state plus its persistence.
pub struct OrderSession {
    order: Order,
    store: Arc<dyn OrderStore>,
    key: String,
    loaded: bool,
    scheduler: SaveScheduler,
    today: Today,
}

impl fmt::Debug for OrderSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OrderSession")
            .field("order", &self.order)
            .field("key", &self.key)
            .field("loaded", &self.loaded)
            .field("debounce", &self.scheduler.delay())
            .finish_non_exhaustive()
    }
}

impl OrderSession {
    /// Create a session over `store`. Call [`OrderSession::load`] before use.
    #[must_use]
    pub fn new(store: Arc<dyn OrderStore>, key: impl Into<String>, debounce: Duration) -> Self {
        Self {
            order: Order::new(),
            store,
            key: key.into(),
            loaded: false,
            scheduler: SaveScheduler::new(debounce),
            today: Arc::new(local_today),
        }
    }

    /// Replace the clock used to decide what "today" is.
    #[must_use]
    pub fn with_today(mut self, today: impl Fn() -> NaiveDate + Send + Sync + 'static) -> Self {
        self.today = Arc::new(today);
        self
    }

    #[must_use]
    pub const fn order(&self) -> &Order {
        &self.order
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Whether the initial load has completed.
    #[must_use]
    pub const fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Whether a debounced save is waiting to run.
    #[must_use]
    pub fn has_pending_save(&self) -> bool {
        self.scheduler.is_pending()
    }

    /// Restore the saved order, if there is a usable one.
    ///
    /// Always completes the load gate, whatever the outcome.
    pub fn load(&mut self) -> LoadOutcome {
        let outcome = self.read_saved();
        self.loaded = true;
        outcome
    }

    fn read_saved(&mut self) -> LoadOutcome {
        let payload = match self.store.read(&self.key) {
            Ok(Some(payload)) => payload,
            Ok(None) => return LoadOutcome::Empty,
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "could not read saved order");
                self.order = Order::new();
                return LoadOutcome::Discarded;
            }
        };

        match PersistedOrder::from_json(&payload).and_then(PersistedOrder::into_order) {
            Ok(order) => {
                tracing::info!(
                    key = %self.key,
                    products = order.quantities().len(),
                    delivery_date = ?order.delivery_date().map(|d| d.to_iso()),
                    "restored saved order"
                );
                self.order = order;
                LoadOutcome::Restored
            }
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "ignoring malformed saved order");
                self.order = Order::new();
                LoadOutcome::Discarded
            }
        }
    }

    /// Set a product's quantity, clamped to `0..=999`.
    pub fn set_quantity(&mut self, product_id: &str, quantity: i64) -> Quantity {
        let stored = self.order.set_quantity(product_id, quantity);
        self.schedule_save();
        stored
    }

    /// Add one unit of a product.
    pub fn increment(&mut self, product_id: &str) -> Quantity {
        let stored = self.order.increment(product_id);
        self.schedule_save();
        stored
    }

    /// Remove one unit of a product.
    pub fn decrement(&mut self, product_id: &str) -> Quantity {
        let stored = self.order.decrement(product_id);
        self.schedule_save();
        stored
    }

    /// Set the delivery date from ISO input, or clear it with `""`.
    ///
    /// Past or malformed dates are logged and leave the order unchanged.
    ///
    /// # Errors
    ///
    /// Returns the rejection so callers can show it; no state has changed.
    pub fn set_delivery_date(&mut self, input: &str) -> Result<(), DeliveryDateError> {
        let today = (self.today)();
        if let Err(e) = self.order.set_delivery_date(input, today) {
            tracing::warn!(input, error = %e, "rejected delivery date");
            return Err(e);
        }
        self.schedule_save();
        Ok(())
    }

    /// Empty the order and delete the saved record.
    pub fn clear_order(&mut self) {
        self.order.clear();
        self.scheduler.cancel();
        if let Err(e) = self.store.remove(&self.key) {
            tracing::warn!(key = %self.key, error = %e, "failed to remove saved order");
        }
    }

    /// Save right now, cancelling any pending debounced save.
    ///
    /// Does nothing before the initial load.
    pub fn persist(&mut self) {
        if let Some(job) = self.save_job() {
            self.scheduler.flush(job);
        }
    }

    /// Schedule a debounced save of the current order.
    ///
    /// Does nothing before the initial load.
    pub fn schedule_save(&mut self) {
        if let Some(job) = self.save_job() {
            self.scheduler.schedule(job);
        }
    }

    fn save_job(&self) -> Option<SaveJob> {
        if !self.loaded {
            tracing::debug!("skipping save before initial load");
            return None;
        }
        let action = if self.order.is_empty() {
            SaveAction::Remove
        } else {
            match PersistedOrder::from(&self.order).to_json() {
                Ok(payload) => SaveAction::Write(payload),
                Err(e) => {
                    tracing::warn!(error = %e, "failed to serialize order");
                    return None;
                }
            }
        };
        Some(SaveJob {
            store: Arc::clone(&self.store),
            key: self.key.clone(),
            action,
        })
    }
}
