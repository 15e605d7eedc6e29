//! The completion record and its persisted form

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use super::error::PersistenceError;

/// Current version of the persisted blob
pub const RECORD_VERSION: u32 = 1;

/// The set of completed problem ids.
///
/// Presence means completed. There is no way to hold an explicit "not
/// completed" entry, so the completed count is simply [`CompletionRecord::len`].
/// Ids are not checked against any catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompletionRecord {
    completed: BTreeSet<String>,
}

impl CompletionRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_completed(&self, id: &str) -> bool {
        self.completed.contains(id)
    }

    /// Flip membership of `id`, returning whether it is now completed
    pub fn toggle(&mut self, id: &str) -> bool {
        if self.completed.remove(id) {
            false
        } else {
            self.completed.insert(id.to_string());
            true
        }
    }

    /// Number of completed ids
    pub fn len(&self) -> usize {
        self.completed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.completed.is_empty()
    }

    pub fn clear(&mut self) {
        self.completed.clear();
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.completed.iter().map(String::as_str)
    }

    /// Serialize to the versioned storage blob
    pub fn to_json(&self) -> Result<String, PersistenceError> {
        let blob = VersionedBlob {
            version: RECORD_VERSION,
            completed: self.completed.iter().map(|id| (id.clone(), true)).collect(),
        };
        serde_json::to_string(&blob).map_err(PersistenceError::Encode)
    }

    /// Parse a storage blob.
    ///
    /// Accepts the versioned blob and the older bare `{"id": true}` map. In the
    /// bare form, `false` values are dropped.
    pub fn from_json(key: &str, json: &str) -> Result<Self, PersistenceError> {
        let stored: StoredBlob = serde_json::from_str(json)
            .map_err(|source| PersistenceError::Corrupt { key: key.to_string(), source })?;

        let entries = match stored {
            StoredBlob::Versioned(blob) => {
                if blob.version > RECORD_VERSION {
                    return Err(PersistenceError::UnsupportedVersion {
                        found: blob.version,
                        supported: RECORD_VERSION,
                    });
                }
                blob.completed
            }
            StoredBlob::Legacy(map) => {
                tracing::debug!("Reading unversioned completion record under '{}'", key);
                map
            }
        };

        Ok(entries.into_iter().filter(|(_, done)| *done).map(|(id, _)| id).collect())
    }
}

impl FromIterator<String> for CompletionRecord {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self { completed: iter.into_iter().collect() }
    }
}

impl<'a> FromIterator<&'a str> for CompletionRecord {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        iter.into_iter().map(str::to_string).collect()
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct VersionedBlob {
    version: u32,
    completed: BTreeMap<String, bool>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum StoredBlob {
    Versioned(VersionedBlob),
    Legacy(BTreeMap<String, bool>),
}
