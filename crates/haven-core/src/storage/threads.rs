//! Thread registry storage.

use std::sync::Arc;

use haven_storage::{KvBackend, keys};
use tracing::info;

use crate::error::Result;
use crate::models::{Thread, now_ms};

use super::{DEFAULT_THREAD_ID, MessageLogStorage, read_json, write_json};

const DEFAULT_THREAD_NAME: &str = "Default";

/// Registry of named conversation threads.
///
/// Deleting a thread destroys its log in the same logical operation - best
/// effort, not transactional: the registry entry goes first so a partial
/// failure can at worst leave an orphaned log record behind, never a listed
/// thread without a log.
#[derive(Clone)]
pub struct ThreadStorage {
    backend: Arc<dyn KvBackend>,
    logs: MessageLogStorage,
}

impl ThreadStorage {
    pub fn new(backend: Arc<dyn KvBackend>, logs: MessageLogStorage) -> Self {
        Self { backend, logs }
    }

    /// All threads, in store order. Callers sort (typically by `created`
    /// descending). Missing or malformed registry loads as empty.
    pub async fn list(&self) -> Vec<Thread> {
        read_json(&self.backend, keys::THREADS)
            .await
            .unwrap_or_default()
    }

    /// Create a thread with a fresh id, register it and initialize its
    /// empty log.
    pub async fn create(&self, name: impl Into<String>) -> Result<Thread> {
        self.insert(Thread::new(name, now_ms())).await
    }

    /// Rename in place. A missing id is a no-op.
    pub async fn rename(&self, id: &str, new_name: &str) -> Result<()> {
        let mut all = self.list().await;
        let Some(thread) = all.iter_mut().find(|t| t.id == id) else {
            return Ok(());
        };
        thread.name = new_name.to_string();
        write_json(&self.backend, keys::THREADS, &all).await
    }

    /// Remove the registry entry and destroy the thread's log.
    pub async fn delete(&self, id: &str) -> Result<()> {
        let mut all = self.list().await;
        all.retain(|t| t.id != id);
        write_json(&self.backend, keys::THREADS, &all).await?;
        self.logs.clear(id).await
    }

    /// Bootstrap invariant: an empty registry gets a default thread so the
    /// UI always has a valid destination. Returns the thread a fresh
    /// session should land on.
    pub async fn ensure_default(&self) -> Result<Thread> {
        let all = self.list().await;
        if all.is_empty() {
            info!("empty thread registry, creating default thread");
            return self
                .insert(Thread {
                    id: DEFAULT_THREAD_ID.to_string(),
                    name: DEFAULT_THREAD_NAME.to_string(),
                    created: now_ms(),
                })
                .await;
        }
        let landing = all
            .iter()
            .find(|t| t.id == DEFAULT_THREAD_ID)
            .or_else(|| all.iter().max_by_key(|t| t.created))
            .cloned();
        // The registry is non-empty, so a landing thread always exists.
        Ok(landing.unwrap_or_else(|| Thread::new(DEFAULT_THREAD_NAME, now_ms())))
    }

    async fn insert(&self, thread: Thread) -> Result<Thread> {
        let mut all = self.list().await;
        all.push(thread.clone());
        write_json(&self.backend, keys::THREADS, &all).await?;
        self.logs.init_empty(&thread.id).await?;
        Ok(thread)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Message;
    use haven_storage::MemoryBackend;

    fn storage() -> (ThreadStorage, MessageLogStorage) {
        let backend: Arc<dyn KvBackend> = Arc::new(MemoryBackend::new());
        let logs = MessageLogStorage::new(backend.clone(), 40);
        (ThreadStorage::new(backend, logs.clone()), logs)
    }

    #[tokio::test]
    async fn test_create_registers_thread_with_empty_log() {
        let (threads, logs) = storage();
        let t = threads.create("evening check-in").await.unwrap();

        let all = threads.list().await;
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].name, "evening check-in");
        assert!(logs.load(&t.id).await.is_empty());
    }

    #[tokio::test]
    async fn test_created_ids_are_unique() {
        let (threads, _) = storage();
        let a = threads.create("a").await.unwrap();
        let b = threads.create("b").await.unwrap();
        assert_ne!(a.id, b.id);
        assert_eq!(threads.list().await.len(), 2);
    }

    #[tokio::test]
    async fn test_rename_is_idempotent() {
        let (threads, _) = storage();
        let t = threads.create("before").await.unwrap();

        threads.rename(&t.id, "after").await.unwrap();
        let once = threads.list().await;
        threads.rename(&t.id, "after").await.unwrap();
        let twice = threads.list().await;

        assert_eq!(once, twice);
        assert_eq!(twice[0].name, "after");
        // created is immutable through rename
        assert_eq!(twice[0].created, t.created);
    }

    #[tokio::test]
    async fn test_rename_of_missing_id_is_noop() {
        let (threads, _) = storage();
        threads.create("only").await.unwrap();
        threads.rename("missing", "renamed").await.unwrap();
        assert_eq!(threads.list().await[0].name, "only");
    }

    #[tokio::test]
    async fn test_delete_cascades_to_log() {
        let (threads, logs) = storage();
        let t = threads.create("doomed").await.unwrap();
        logs.save_message(&t.id, &Message::user("hi", 1))
            .await
            .unwrap();

        threads.delete(&t.id).await.unwrap();

        assert!(threads.list().await.iter().all(|x| x.id != t.id));
        assert!(logs.load(&t.id).await.is_empty());
    }

    #[tokio::test]
    async fn test_thread_isolation() {
        let (threads, logs) = storage();
        let a = threads.create("a").await.unwrap();
        let b = threads.create("b").await.unwrap();

        logs.append(&a.id, &[Message::user("for a", 1)])
            .await
            .unwrap();

        assert!(logs.load(&b.id).await.is_empty());
        assert_eq!(logs.load(&a.id).await.len(), 1);
    }

    #[tokio::test]
    async fn test_ensure_default_bootstraps_empty_registry() {
        let (threads, logs) = storage();
        let t = threads.ensure_default().await.unwrap();
        assert_eq!(t.id, DEFAULT_THREAD_ID);
        assert_eq!(threads.list().await.len(), 1);
        assert!(logs.load(DEFAULT_THREAD_ID).await.is_empty());

        // A second call does not create another thread.
        let again = threads.ensure_default().await.unwrap();
        assert_eq!(again.id, DEFAULT_THREAD_ID);
        assert_eq!(threads.list().await.len(), 1);
    }

    #[tokio::test]
    async fn test_ensure_default_lands_on_existing_thread() {
        let (threads, _) = storage();
        let t = threads.create("only thread").await.unwrap();
        let landing = threads.ensure_default().await.unwrap();
        assert_eq!(landing.id, t.id);
        assert_eq!(threads.list().await.len(), 1);
    }
}
