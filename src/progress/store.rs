//! The completion store
//!
//! Owns the in-memory [`CompletionRecord`] and keeps it mirrored to a
//! [`KeyValueBackend`]. Mutations apply in memory first, then the whole
//! record is written and awaited. A failed write is reported through
//! [`WriteOutcome`] and leaves memory ahead of storage until the next
//! successful write.

use super::backend::KeyValueBackend;
use super::error::PersistenceError;
use super::record::CompletionRecord;

/// Default storage key for the completion record
pub const DEFAULT_STORAGE_KEY: &str = "completedProblems";

/// Result of a mutation that was applied in memory
#[derive(Debug)]
#[must_use]
pub struct WriteOutcome {
    /// Record after the mutation
    pub snapshot: CompletionRecord,
    /// Why the write did not reach storage, if it didn't
    pub error: Option<PersistenceError>,
}

impl WriteOutcome {
    pub fn is_persisted(&self) -> bool {
        self.error.is_none()
    }

    /// Turn into a `Result`, discarding the snapshot on failure
    pub fn into_result(self) -> Result<CompletionRecord, PersistenceError> {
        match self.error {
            None => Ok(self.snapshot),
            Some(e) => Err(e),
        }
    }
}

/// Single-writer store for completed problem ids
#[derive(Debug)]
pub struct CompletionStore<B> {
    backend: B,
    key: String,
    record: CompletionRecord,
    revision: u64,
    diverged: bool,
}

impl<B: KeyValueBackend> CompletionStore<B> {
    /// Create a store with an empty record. Call [`CompletionStore::reload`]
    /// or use [`CompletionStore::open`] to read persisted state.
    pub fn new(backend: B, key: impl Into<String>) -> Self {
        Self { backend, key: key.into(), record: CompletionRecord::new(), revision: 0, diverged: false }
    }

    /// Create a store and load persisted state, degrading to empty on error
    pub async fn open(backend: B, key: impl Into<String>) -> Self {
        let mut store = Self::new(backend, key);
        // Failure is already logged and leaves the record empty
        let _ = store.reload().await;
        store
    }

    /// Read the persisted record without touching the in-memory snapshot.
    ///
    /// A missing entry is an empty record.
    pub async fn load(&self) -> Result<CompletionRecord, PersistenceError> {
        let stored = self
            .backend
            .get(&self.key)
            .await
            .map_err(|source| PersistenceError::Read { key: self.key.clone(), source })?;

        match stored {
            Some(json) => CompletionRecord::from_json(&self.key, &json),
            None => Ok(CompletionRecord::new()),
        }
    }

    /// Replace the snapshot with persisted state (last write wins).
    ///
    /// On error the snapshot becomes empty and the error is returned so the
    /// caller can report it.
    pub async fn reload(&mut self) -> Result<(), PersistenceError> {
        let result = self.load().await;
        self.revision += 1;
        self.diverged = false;

        match result {
            Ok(record) => {
                tracing::debug!(completed = record.len(), "Reloaded completion record");
                self.record = record;
                Ok(())
            }
            Err(e) => {
                tracing::warn!("Failed to load completed problems, starting empty: {}", e);
                self.record = CompletionRecord::new();
                Err(e)
            }
        }
    }

    /// Flip completion of `id` and persist the whole record
    pub async fn toggle(&mut self, id: &str) -> WriteOutcome {
        let completed = self.record.toggle(id);
        self.revision += 1;
        tracing::debug!(id, completed, "Toggled problem");

        let result = match self.record.to_json() {
            Ok(json) => self
                .backend
                .set(&self.key, &json)
                .await
                .map_err(|source| PersistenceError::Write { key: self.key.clone(), source }),
            Err(e) => Err(e),
        };

        self.finish_write(result)
    }

    /// Remove the persisted record and empty the snapshot
    pub async fn clear(&mut self) -> WriteOutcome {
        self.record.clear();
        self.revision += 1;
        tracing::debug!("Cleared completion record");

        let result = self
            .backend
            .remove(&self.key)
            .await
            .map_err(|source| PersistenceError::Write { key: self.key.clone(), source });

        self.finish_write(result)
    }

    fn finish_write(&mut self, result: Result<(), PersistenceError>) -> WriteOutcome {
        let error = match result {
            Ok(()) => {
                self.diverged = false;
                None
            }
            Err(e) => {
                tracing::warn!("Failed to save completed problems: {}", e);
                self.diverged = true;
                Some(e)
            }
        };

        WriteOutcome { snapshot: self.record.clone(), error }
    }
}

impl<B> CompletionStore<B> {
    /// Current in-memory record
    pub fn snapshot(&self) -> &CompletionRecord {
        &self.record
    }

    pub fn is_completed(&self, id: &str) -> bool {
        self.record.is_completed(id)
    }

    /// Increments on every change to the snapshot
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// True while the last write failed and memory is ahead of storage
    pub fn is_diverged(&self) -> bool {
        self.diverged
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::backend::{FileBackend, MemoryBackend};
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn ids(record: &CompletionRecord) -> Vec<&str> {
        record.ids().collect()
    }

    #[tokio::test]
    async fn missing_entry_loads_empty() {
        let store = CompletionStore::new(MemoryBackend::new(), DEFAULT_STORAGE_KEY);
        assert!(store.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn toggle_persists_full_record() {
        let backend = MemoryBackend::new();
        let mut store = CompletionStore::new(backend.clone(), DEFAULT_STORAGE_KEY);

        let outcome = store.toggle("p1").await;
        assert!(outcome.is_persisted());
        let outcome = store.toggle("p3").await;
        assert_eq!(ids(&outcome.snapshot), vec!["p1", "p3"]);

        assert_eq!(
            backend.raw(DEFAULT_STORAGE_KEY).as_deref(),
            Some(r#"{"version":1,"completed":{"p1":true,"p3":true}}"#)
        );
    }

    #[tokio::test]
    async fn toggle_twice_restores_original() {
        let backend = MemoryBackend::new();
        let mut store = CompletionStore::new(backend.clone(), DEFAULT_STORAGE_KEY);
        let _ = store.toggle("p1").await;
        let before = store.snapshot().clone();

        let _ = store.toggle("p2").await;
        let outcome = store.toggle("p2").await;

        assert_eq!(outcome.snapshot, before);
        assert_eq!(store.load().await.unwrap(), before);
    }

    #[tokio::test]
    async fn uncompleting_deletes_the_entry() {
        let backend = MemoryBackend::new();
        let mut store = CompletionStore::new(backend.clone(), DEFAULT_STORAGE_KEY);
        let _ = store.toggle("p1").await;
        let _ = store.toggle("p1").await;

        let raw = backend.raw(DEFAULT_STORAGE_KEY).unwrap();
        assert!(!raw.contains("p1"));
        assert!(!raw.contains("false"));
    }

    #[tokio::test]
    async fn unknown_ids_are_still_persisted() {
        let mut store = CompletionStore::new(MemoryBackend::new(), DEFAULT_STORAGE_KEY);
        let outcome = store.toggle("p9").await;
        assert!(outcome.is_persisted());
        assert_eq!(ids(&store.load().await.unwrap()), vec!["p9"]);
    }

    #[tokio::test]
    async fn load_after_clear_is_empty() {
        let backend = MemoryBackend::new();
        let mut store = CompletionStore::new(backend.clone(), DEFAULT_STORAGE_KEY);
        let _ = store.toggle("p1").await;

        let outcome = store.clear().await;
        assert!(outcome.is_persisted());
        assert!(outcome.snapshot.is_empty());
        assert!(store.load().await.unwrap().is_empty());
        assert_eq!(backend.raw(DEFAULT_STORAGE_KEY), None);
    }

    #[tokio::test]
    async fn failed_write_keeps_optimistic_state() {
        let backend = MemoryBackend::new();
        let mut store = CompletionStore::new(backend.clone(), DEFAULT_STORAGE_KEY);
        let _ = store.toggle("p1").await;

        backend.set_fail_writes(true);
        let outcome = store.toggle("p2").await;

        assert!(!outcome.is_persisted());
        assert!(outcome.error.as_ref().is_some_and(PersistenceError::is_write));
        assert!(store.is_completed("p2"));
        assert!(store.is_diverged());
        assert_eq!(ids(&store.load().await.unwrap()), vec!["p1"]);

        backend.set_fail_writes(false);
        let outcome = store.toggle("p3").await;
        assert!(outcome.is_persisted());
        assert!(!store.is_diverged());
        assert_eq!(ids(&store.load().await.unwrap()), vec!["p1", "p2", "p3"]);
    }

    #[tokio::test]
    async fn failed_clear_still_empties_memory() {
        let backend = MemoryBackend::new();
        let mut store = CompletionStore::new(backend.clone(), DEFAULT_STORAGE_KEY);
        let _ = store.toggle("p1").await;

        backend.set_fail_writes(true);
        let result = store.clear().await.into_result();

        assert!(result.is_err());
        assert!(store.snapshot().is_empty());
        assert!(store.is_diverged());
    }

    #[tokio::test]
    async fn corrupt_data_degrades_to_empty_on_open() {
        let backend = MemoryBackend::new();
        backend.insert_raw(DEFAULT_STORAGE_KEY, "{garbage");

        let store = CompletionStore::open(backend.clone(), DEFAULT_STORAGE_KEY).await;
        assert!(store.snapshot().is_empty());
        assert!(matches!(store.load().await, Err(PersistenceError::Corrupt { .. })));
    }

    #[tokio::test]
    async fn read_failure_on_reload_empties_snapshot() {
        let backend = MemoryBackend::new();
        let mut store = CompletionStore::new(backend.clone(), DEFAULT_STORAGE_KEY);
        let _ = store.toggle("p1").await;

        backend.set_fail_reads(true);
        let err = store.reload().await.unwrap_err();
        assert!(err.is_read());
        assert!(store.snapshot().is_empty());
    }

    #[tokio::test]
    async fn reload_observes_writes_from_another_store() {
        let backend = MemoryBackend::new();
        let mut list_screen = CompletionStore::open(backend.clone(), DEFAULT_STORAGE_KEY).await;
        let mut stats_screen = CompletionStore::open(backend.clone(), DEFAULT_STORAGE_KEY).await;

        let _ = list_screen.toggle("p4").await;
        assert!(!stats_screen.is_completed("p4"));

        let before = stats_screen.revision();
        stats_screen.reload().await.unwrap();
        assert!(stats_screen.is_completed("p4"));
        assert!(stats_screen.revision() > before);
    }

    #[tokio::test]
    async fn reads_legacy_unversioned_blob() {
        let backend = MemoryBackend::new();
        backend.insert_raw(DEFAULT_STORAGE_KEY, r#"{"p1":true,"p2":false}"#);

        let store = CompletionStore::open(backend, DEFAULT_STORAGE_KEY).await;
        assert_eq!(ids(store.snapshot()), vec!["p1"]);
    }

    #[tokio::test]
    async fn file_backed_store_survives_reopen() {
        let dir = TempDir::new().unwrap();

        let mut store = CompletionStore::open(FileBackend::new(dir.path()), "completed").await;
        let _ = store.toggle("s1p1").await;
        let _ = store.toggle("s2p3").await;
        drop(store);

        let reopened = CompletionStore::open(FileBackend::new(dir.path()), "completed").await;
        assert_eq!(ids(reopened.snapshot()), vec!["s1p1", "s2p3"]);
    }

    #[tokio::test]
    async fn revision_advances_on_every_mutation() {
        let mut store = CompletionStore::new(MemoryBackend::new(), DEFAULT_STORAGE_KEY);
        assert_eq!(store.revision(), 0);
        let _ = store.toggle("a").await;
        let _ = store.toggle("a").await;
        let _ = store.clear().await;
        assert_eq!(store.revision(), 3);
    }
}
