//! Completion tracking
//!
//! The set of completed problems, its storage format, and the store that
//! keeps memory and disk in step.

pub mod backend;
pub mod error;
pub mod record;
pub mod store;

pub use backend::{FileBackend, KeyValueBackend, MemoryBackend};
pub use error::PersistenceError;
pub use record::{CompletionRecord, RECORD_VERSION};
pub use store::{CompletionStore, DEFAULT_STORAGE_KEY, WriteOutcome};
