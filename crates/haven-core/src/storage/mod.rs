//! Typed storage wrappers.
//!
//! Wraps the byte-level [`KvBackend`] with the crate's models and the
//! storage policy the rest of the system relies on:
//!
//! - reads degrade: a missing or malformed record loads as empty/None with
//!   a warning, never an error
//! - writes are explicit: every mutation returns a `Result` the caller
//!   must handle
//! - retention is uniform: one hard cap, enforced inside the message log
//!   for every thread
//!
//! [`Storage`] is the aggregate handle injected into every component that
//! persists. There is no global default instance.

mod message_log;
mod profile;
mod threads;

pub use message_log::MessageLogStorage;
pub use profile::ProfileStorage;
pub use threads::ThreadStorage;

use std::sync::Arc;

use haven_storage::KvBackend;
use serde::de::DeserializeOwned;
use tracing::warn;

use crate::config::CoreConfig;
use crate::error::{CoreError, Result};

/// Well-known id of the bootstrap thread. The legacy flat message log is
/// this thread's log.
pub const DEFAULT_THREAD_ID: &str = "default";

/// Aggregate storage handle wiring every typed wrapper over one shared
/// backend.
#[derive(Clone)]
pub struct Storage {
    pub messages: MessageLogStorage,
    pub profile: ProfileStorage,
    pub threads: ThreadStorage,
}

impl Storage {
    pub fn new(backend: Arc<dyn KvBackend>, config: &CoreConfig) -> Self {
        let messages = MessageLogStorage::new(backend.clone(), config.hard_limit);
        let profile = ProfileStorage::new(backend.clone());
        let threads = ThreadStorage::new(backend, messages.clone());
        Self {
            messages,
            profile,
            threads,
        }
    }
}

/// Load a JSON record, degrading missing or unreadable data to `None`.
pub(crate) async fn read_json<T: DeserializeOwned>(
    backend: &Arc<dyn KvBackend>,
    key: &str,
) -> Option<T> {
    let raw = match backend.get(key).await {
        Ok(raw) => raw?,
        Err(err) => {
            warn!(key, error = %err, "storage read failed, treating record as absent");
            return None;
        }
    };
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(err) => {
            warn!(key, error = %err, "malformed record, treating as absent");
            None
        }
    }
}

/// Serialize and write a JSON record. Failures propagate as
/// [`CoreError::StorageWrite`].
pub(crate) async fn write_json<T: serde::Serialize>(
    backend: &Arc<dyn KvBackend>,
    key: &str,
    value: &T,
) -> Result<()> {
    let raw = serde_json::to_string(value)?;
    backend
        .put(key, &raw)
        .await
        .map_err(|e| CoreError::write(key, e))
}
