//! On-device key/value storage for the saved order.
//!
//! The order lives in a single record under one key. [`FileStore`] keeps each
//! record as `<dir>/<key>.json`; [`MemoryStore`] keeps records in process and
//! is used for tests and throwaway sessions.

use std::collections::HashMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use thiserror::Error;

/// Errors from reading or writing a record.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid storage key: {0:?}")]
    InvalidKey(String),
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// A key/value record store.
///
/// Implementations must be shareable across tasks: the debounced save runs on
/// a background task holding a handle to the store.
pub trait OrderStore: Send + Sync {
    /// Read the record for `key`; `Ok(None)` when there is none.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the backing storage cannot be read.
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the record for `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the backing storage cannot be written.
    fn write(&self, key: &str, payload: &str) -> Result<(), StorageError>;

    /// Delete the record for `key`. Deleting a missing record succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the backing storage cannot be modified.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Records stored as JSON files in a directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Use `dir` for records. The directory is created on first write.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File path holding the record for `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::InvalidKey`] for keys that are empty or could
    /// escape the directory.
    pub fn record_path(&self, key: &str) -> Result<PathBuf, StorageError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
            && !key.starts_with('.');
        if !valid {
            return Err(StorageError::InvalidKey(key.to_owned()));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

fn io_error(path: &Path) -> impl FnOnce(io::Error) -> StorageError + '_ {
    move |source| StorageError::Io {
        path: path.to_path_buf(),
        source,
    }
}

impl OrderStore for FileStore {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.record_path(key)?;
        match fs::read_to_string(&path) {
            Ok(payload) => Ok(Some(payload)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(io_error(&path)(e)),
        }
    }

    fn write(&self, key: &str, payload: &str) -> Result<(), StorageError> {
        let path = self.record_path(key)?;
        fs::create_dir_all(&self.dir).map_err(io_error(&self.dir))?;

        // A crash must never leave a truncated record behind.
        let tmp = path.with_extension("json.tmp");
        let mut file = fs::File::create(&tmp).map_err(io_error(&tmp))?;
        file.write_all(payload.as_bytes()).map_err(io_error(&tmp))?;
        file.sync_all().map_err(io_error(&tmp))?;
        drop(file);
        fs::rename(&tmp, &path).map_err(io_error(&path))
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let path = self.record_path(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(io_error(&path)(e)),
        }
    }
}

/// Records held in memory for the life of the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-seeded with one record.
    #[must_use]
    pub fn with_record(key: &str, payload: &str) -> Self {
        let store = Self::new();
        store
            .records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_owned(), payload.to_owned());
        store
    }
}

impl OrderStore for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        let records = self.records.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(records.get(key).cloned())
    }

    fn write(&self, key: &str, payload: &str) -> Result<(), StorageError> {
        let mut records = self.records.lock().unwrap_or_else(PoisonError::into_inner);
        records.insert(key.to_owned(), payload.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut records = self.records.lock().unwrap_or_else(PoisonError::into_inner);
        records.remove(key);
        Ok(())
    }
}

/// A memory store whose writes take a while, flagging when one has started.
#[cfg(test)]
#[derive(Debug)]
pub(crate) struct SlowStore {
    inner: MemoryStore,
    delay: std::time::Duration,
    write_started: std::sync::atomic::AtomicBool,
}

#[cfg(test)]
impl SlowStore {
    pub(crate) fn new(delay: std::time::Duration) -> Self {
        Self {
            inner: MemoryStore::new(),
            delay,
            write_started: std::sync::atomic::AtomicBool::new(false),
        }
    }

    pub(crate) fn write_started(&self) -> bool {
        self.write_started.load(std::sync::atomic::Ordering::SeqCst)
    }
}

#[cfg(test)]
impl OrderStore for SlowStore {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.inner.read(key)
    }

    fn write(&self, key: &str, payload: &str) -> Result<(), StorageError> {
        self.write_started
            .store(true, std::sync::atomic::Ordering::SeqCst);
        std::thread::sleep(self.delay);
        self.inner.write(key, payload)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.inner.remove(key)
    }
}
