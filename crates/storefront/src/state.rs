//! Application state shared by the shell and the CLI.

use std::sync::Arc;

use crate::catalog::{self, Catalog};
use crate::config::AppConfig;
use crate::error::Result;
use crate::session::OrderSession;
use crate::storage::{FileStore, OrderStore};

/// Configuration, catalog and storage for one process.
///
/// This struct is cheaply cloneable via `Arc`.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AppConfig,
    catalog: Catalog,
    store: Arc<dyn OrderStore>,
}

impl AppState {
    /// Build state with the built-in catalog and a file store under the
    /// configured data directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the built-in catalog is inconsistent.
    pub fn new(config: AppConfig) -> Result<Self> {
        let store = Arc::new(FileStore::new(config.data_dir.clone()));
        Ok(Self::with_store(config, catalog::builtin()?, store))
    }

    /// Build state from explicit parts.
    #[must_use]
    pub fn with_store(config: AppConfig, catalog: Catalog, store: Arc<dyn OrderStore>) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                store,
            }),
        }
    }

    #[must_use]
    pub fn config(&self) -> &AppConfig {
        &self.inner.config
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    #[must_use]
    pub fn store(&self) -> Arc<dyn OrderStore> {
        Arc::clone(&self.inner.store)
    }

    /// Open the order session and run its initial load.
    #[must_use]
    pub fn open_session(&self) -> OrderSession {
        let config = self.config();
        let mut session =
            OrderSession::new(self.store(), config.storage_key.clone(), config.save_debounce);
        let outcome = session.load();
        tracing::debug!(?outcome, "order session opened");
        session
    }
}
