//! Integration tests for the Confeitaria quote app.
//!
//! Each test gets its own temporary data directory, so the on-device record
//! is real files and nothing leaks between tests.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p confeitaria-integration-tests
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use confeitaria_storefront::catalog::{self, Catalog};
use confeitaria_storefront::config::AppConfig;
use confeitaria_storefront::session::OrderSession;
use confeitaria_storefront::state::AppState;
use confeitaria_storefront::storage::{FileStore, OrderStore, StorageError};
use tempfile::TempDir;

/// Fixed "today" for date validation.
#[must_use]
pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 19).unwrap_or_default()
}

/// App state over a throwaway data directory.
pub struct TestContext {
    pub dir: TempDir,
    pub state: AppState,
}

impl TestContext {
    /// Built-in catalog, saves without debounce.
    ///
    /// # Errors
    ///
    /// Returns an error if the temporary directory cannot be created.
    pub fn new() -> std::io::Result<Self> {
        let catalog = catalog::builtin().map_err(std::io::Error::other)?;
        Self::with_catalog(catalog, Duration::ZERO)
    }

    /// # Errors
    ///
    /// Returns an error if the temporary directory cannot be created.
    pub fn with_catalog(catalog: Catalog, save_debounce: Duration) -> std::io::Result<Self> {
        let dir = tempfile::tempdir()?;
        let config = AppConfig {
            data_dir: dir.path().to_path_buf(),
            save_debounce,
            ..AppConfig::default()
        };
        let store: Arc<dyn OrderStore> = Arc::new(FileStore::new(dir.path()));
        let state = AppState::with_store(config, catalog, store);
        Ok(Self { dir, state })
    }

    /// A freshly loaded session, as at app start.
    #[must_use]
    pub fn session(&self) -> OrderSession {
        self.state.open_session().with_today(today)
    }

    /// A session that has not run its initial load yet.
    #[must_use]
    pub fn unloaded_session(&self) -> OrderSession {
        let config = self.state.config();
        OrderSession::new(
            self.state.store(),
            config.storage_key.clone(),
            config.save_debounce,
        )
        .with_today(today)
    }

    /// Path of the saved order file.
    #[must_use]
    pub fn record_path(&self) -> PathBuf {
        self.dir
            .path()
            .join(format!("{}.json", self.state.config().storage_key))
    }

    /// The saved record, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn record(&self) -> Result<Option<String>, StorageError> {
        self.state.store().read(&self.state.config().storage_key)
    }

    /// Put `payload` on disk as the saved record.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    pub fn seed_record(&self, payload: &str) -> Result<(), StorageError> {
        self.state
            .store()
            .write(&self.state.config().storage_key, payload)
    }
}
