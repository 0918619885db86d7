//! Debounced saving of the order record.
//!
//! Every mutation schedules a save; scheduling again before the delay elapses
//! cancels the earlier save, so a burst of edits produces a single write.
//! Saves run on the tokio runtime when one is available and inline otherwise.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;

use crate::storage::OrderStore;

/// Default delay between the last edit and the write.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

/// What a save does to the stored record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveAction {
    /// Replace the record with this payload.
    Write(String),
    /// Delete the record (the order is empty).
    Remove,
}

/// A snapshot of one save, independent of the session that produced it.
#[derive(Clone)]
pub struct SaveJob {
    pub store: Arc<dyn OrderStore>,
    pub key: String,
    pub action: SaveAction,
}

impl SaveJob {
    /// Perform the save. Failures are logged and dropped.
    pub fn run(self) {
        let result = match &self.action {
            SaveAction::Write(payload) => self.store.write(&self.key, payload),
            SaveAction::Remove => self.store.remove(&self.key),
        };
        match result {
            Ok(()) => tracing::debug!(key = %self.key, action = self.action_kind(), "order saved"),
            Err(e) => tracing::warn!(key = %self.key, error = %e, "failed to save order"),
        }
    }

    const fn action_kind(&self) -> &'static str {
        match self.action {
            SaveAction::Write(_) => "write",
            SaveAction::Remove => "remove",
        }
    }
}

struct PendingSave {
    cancel: CancellationToken,
    handle: JoinHandle<()>,
}

/// Cancel-and-reschedule save timer.
///
/// Every job is stamped with the generation current when it was queued.
/// A job only touches the store while holding `current` and only if its stamp
/// still matches, so once [`SaveScheduler::cancel`] returns no earlier job can
/// write.
pub struct SaveScheduler {
    delay: Duration,
    generation: u64,
    current: Arc<Mutex<u64>>,
    pending: Option<PendingSave>,
}

impl Default for SaveScheduler {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

impl SaveScheduler {
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            generation: 0,
            current: Arc::new(Mutex::new(0)),
            pending: None,
        }
    }

    #[must_use]
    pub const fn delay(&self) -> Duration {
        self.delay
    }

    /// Number of times queued saves have been invalidated.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether a scheduled save has neither run nor been cancelled.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending
            .as_ref()
            .is_some_and(|p| !p.cancel.is_cancelled() && !p.handle.is_finished())
    }

    /// Cancel any pending save and schedule `job` after the delay.
    ///
    /// Without a tokio runtime, or with a zero delay, the job runs
    /// immediately.
    pub fn schedule(&mut self, job: SaveJob) {
        self.cancel();
        let generation = self.generation;

        let runtime = tokio::runtime::Handle::try_current();
        let Ok(runtime) = runtime else {
            run_if_current(job, &self.current, generation);
            return;
        };
        if self.delay.is_zero() {
            run_if_current(job, &self.current, generation);
            return;
        }

        let cancel = CancellationToken::new();
        let token = cancel.clone();
        let delay = self.delay;
        let current = Arc::clone(&self.current);
        let handle = runtime.spawn(async move {
            tokio::select! {
                () = token.cancelled() => {
                    tracing::trace!(generation, "save superseded");
                }
                () = sleep(delay) => run_if_current(job, &current, generation),
            }
        });
        self.pending = Some(PendingSave { cancel, handle });
    }

    /// Cancel any pending save and run `job` now.
    pub fn flush(&mut self, job: SaveJob) {
        self.cancel();
        run_if_current(job, &self.current, self.generation);
    }

    /// Drop the pending save, if any, without running it.
    ///
    /// Blocks while an already started save finishes; after this returns no
    /// earlier job writes.
    pub fn cancel(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.cancel.cancel();
        }
        let mut current = self.current.lock().unwrap_or_else(PoisonError::into_inner);
        *current = current.wrapping_add(1);
        self.generation = *current;
    }
}

fn run_if_current(job: SaveJob, current: &Mutex<u64>, generation: u64) {
    let current = current.lock().unwrap_or_else(PoisonError::into_inner);
    if *current != generation {
        tracing::trace!(generation, latest = *current, "dropping stale save");
        return;
    }
    job.run();
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::storage::{MemoryStore, OrderStore, SlowStore};

    fn job(store: &Arc<MemoryStore>, payload: &str) -> SaveJob {
        SaveJob {
            store: Arc::clone(store) as Arc<dyn OrderStore>,
            key: "order".to_owned(),
            action: SaveAction::Write(payload.to_owned()),
        }
    }

    #[test]
    fn test_runs_inline_without_runtime() {
        let store = Arc::new(MemoryStore::new());
        let mut scheduler = SaveScheduler::default();
        scheduler.schedule(job(&store, "a"));
        assert_eq!(store.read("order").unwrap().as_deref(), Some("a"));
        assert!(!scheduler.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn test_waits_for_delay() {
        let store = Arc::new(MemoryStore::new());
        let mut scheduler = SaveScheduler::new(Duration::from_millis(500));

        scheduler.schedule(job(&store, "a"));
        assert!(scheduler.is_pending());
        sleep(Duration::from_millis(499)).await;
        assert_eq!(store.read("order").unwrap(), None);

        sleep(Duration::from_millis(2)).await;
        assert_eq!(store.read("order").unwrap().as_deref(), Some("a"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_reschedule_cancels_previous() {
        let store = Arc::new(MemoryStore::new());
        let mut scheduler = SaveScheduler::new(Duration::from_millis(500));

        scheduler.schedule(job(&store, "first"));
        sleep(Duration::from_millis(300)).await;
        scheduler.schedule(job(&store, "second"));
        sleep(Duration::from_millis(300)).await;
        // 600ms after the first schedule: the first save must not have run.
        assert_eq!(store.read("order").unwrap(), None);

        sleep(Duration::from_millis(300)).await;
        assert_eq!(store.read("order").unwrap().as_deref(), Some("second"));
        assert_eq!(scheduler.generation(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_flush_runs_now_and_cancels_pending() {
        let store = Arc::new(MemoryStore::new());
        let mut scheduler = SaveScheduler::new(Duration::from_millis(500));

        scheduler.schedule(job(&store, "stale"));
        scheduler.flush(job(&store, "fresh"));
        assert_eq!(store.read("order").unwrap().as_deref(), Some("fresh"));

        sleep(Duration::from_secs(1)).await;
        assert_eq!(store.read("order").unwrap().as_deref(), Some("fresh"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_drops_pending() {
        let store = Arc::new(MemoryStore::new());
        let mut scheduler = SaveScheduler::new(Duration::from_millis(500));

        scheduler.schedule(job(&store, "a"));
        scheduler.cancel();
        assert!(!scheduler.is_pending());
        sleep(Duration::from_secs(1)).await;
        assert_eq!(store.read("order").unwrap(), None);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_flush_waits_for_running_save() {
        let store = Arc::new(SlowStore::new(Duration::from_millis(300)));
        let mut scheduler = SaveScheduler::new(Duration::from_millis(10));
        let save = |payload: &str| SaveJob {
            store: Arc::clone(&store) as Arc<dyn OrderStore>,
            key: "order".to_owned(),
            action: SaveAction::Write(payload.to_owned()),
        };

        scheduler.schedule(save("stale"));
        while !store.write_started() {
            sleep(Duration::from_millis(5)).await;
        }
        scheduler.flush(save("fresh"));

        sleep(Duration::from_millis(500)).await;
        assert_eq!(store.read("order").unwrap().as_deref(), Some("fresh"));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_cancel_blocks_until_running_save_finishes() {
        let store = Arc::new(SlowStore::new(Duration::from_millis(300)));
        let mut scheduler = SaveScheduler::new(Duration::from_millis(10));

        scheduler.schedule(SaveJob {
            store: Arc::clone(&store) as Arc<dyn OrderStore>,
            key: "order".to_owned(),
            action: SaveAction::Write("a".to_owned()),
        });
        while !store.write_started() {
            sleep(Duration::from_millis(5)).await;
        }
        scheduler.cancel();
        assert_eq!(store.read("order").unwrap().as_deref(), Some("a"));
    }
}
