//! Key-value storage backends
//!
//! The store only needs string keys mapped to string values. The backend
//! handles where those live; the store handles what goes in them.

use std::collections::HashMap;
use std::future::Future;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

/// Abstract interface for raw key-value I/O
pub trait KeyValueBackend {
    /// Read the value stored under `key`. A missing key is `Ok(None)`.
    fn get(&self, key: &str) -> impl Future<Output = io::Result<Option<String>>> + Send;

    /// Replace the value stored under `key`
    fn set(&self, key: &str, value: &str) -> impl Future<Output = io::Result<()>> + Send;

    /// Remove `key`. Removing a missing key succeeds.
    fn remove(&self, key: &str) -> impl Future<Output = io::Result<()>> + Send;
}

/// Stores each key as `<dir>/<key>.json`
#[derive(Debug, Clone)]
pub struct FileBackend {
    dir: PathBuf,
}

impl FileBackend {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File path for a key. Characters outside `[A-Za-z0-9_-]` become `_`.
    pub fn path_for(&self, key: &str) -> PathBuf {
        let file_stem: String = key
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect();
        self.dir.join(format!("{}.json", file_stem))
    }
}

impl KeyValueBackend for FileBackend {
    async fn get(&self, key: &str) -> io::Result<Option<String>> {
        match tokio::fs::read_to_string(self.path_for(key)).await {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn set(&self, key: &str, value: &str) -> io::Result<()> {
        tokio::fs::create_dir_all(&self.dir).await?;

        // Sibling temp file, then rename over the target
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, value).await?;
        tokio::fs::rename(&tmp, &path).await
    }

    async fn remove(&self, key: &str) -> io::Result<()> {
        match tokio::fs::remove_file(self.path_for(key)).await {
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            other => other,
        }
    }
}

#[derive(Debug, Default)]
struct MemoryState {
    entries: HashMap<String, String>,
    fail_reads: bool,
    fail_writes: bool,
}

/// In-process backend. Clones share the same entries, which lets two stores
/// observe each other's writes.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every read fail until switched off
    pub fn set_fail_reads(&self, fail: bool) {
        self.with_state(|state| state.fail_reads = fail);
    }

    /// Make every write and remove fail until switched off
    pub fn set_fail_writes(&self, fail: bool) {
        self.with_state(|state| state.fail_writes = fail);
    }

    /// Raw value under `key`, bypassing failure simulation
    pub fn raw(&self, key: &str) -> Option<String> {
        self.with_state(|state| state.entries.get(key).cloned())
    }

    /// Seed a raw value, bypassing failure simulation
    pub fn insert_raw(&self, key: &str, value: &str) {
        self.with_state(|state| {
            state.entries.insert(key.to_string(), value.to_string());
        });
    }

    fn with_state<T>(&self, f: impl FnOnce(&mut MemoryState) -> T) -> T {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut state)
    }
}

impl KeyValueBackend for MemoryBackend {
    async fn get(&self, key: &str) -> io::Result<Option<String>> {
        self.with_state(|state| {
            if state.fail_reads {
                return Err(io::Error::other("simulated read failure"));
            }
            Ok(state.entries.get(key).cloned())
        })
    }

    async fn set(&self, key: &str, value: &str) -> io::Result<()> {
        self.with_state(|state| {
            if state.fail_writes {
                return Err(io::Error::other("simulated write failure"));
            }
            state.entries.insert(key.to_string(), value.to_string());
            Ok(())
        })
    }

    async fn remove(&self, key: &str) -> io::Result<()> {
        self.with_state(|state| {
            if state.fail_writes {
                return Err(io::Error::other("simulated write failure"));
            }
            state.entries.remove(key);
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn file_backend_missing_key_is_none() {
        let dir = TempDir::new().unwrap();
        let backend = FileBackend::new(dir.path());
        assert_eq!(backend.get("completedProblems").await.unwrap(), None);
    }

    #[tokio::test]
    async fn file_backend_set_then_get() {
        let dir = TempDir::new().unwrap();
        let backend = FileBackend::new(dir.path().join("nested"));

        backend.set("completedProblems", "{}").await.unwrap();
        assert_eq!(backend.get("completedProblems").await.unwrap().as_deref(), Some("{}"));
        assert!(backend.path_for("completedProblems").exists());
        assert!(!backend.path_for("completedProblems").with_extension("json.tmp").exists());
    }

    #[tokio::test]
    async fn file_backend_remove_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let backend = FileBackend::new(dir.path());

        backend.set("k", "v").await.unwrap();
        backend.remove("k").await.unwrap();
        backend.remove("k").await.unwrap();
        assert_eq!(backend.get("k").await.unwrap(), None);
    }

    #[test]
    fn file_backend_sanitizes_keys() {
        let backend = FileBackend::new("/data");
        assert_eq!(backend.path_for("../etc/passwd"), PathBuf::from("/data/___etc_passwd.json"));
    }

    #[tokio::test]
    async fn memory_backend_clones_share_entries() {
        let a = MemoryBackend::new();
        let b = a.clone();
        a.set("k", "v").await.unwrap();
        assert_eq!(b.get("k").await.unwrap().as_deref(), Some("v"));
    }

    #[tokio::test]
    async fn memory_backend_simulates_failures() {
        let backend = MemoryBackend::new();
        backend.set_fail_writes(true);
        assert!(backend.set("k", "v").await.is_err());
        assert!(backend.remove("k").await.is_err());

        backend.set_fail_reads(true);
        assert!(backend.get("k").await.is_err());
    }
}
