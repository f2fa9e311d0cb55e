//! Per-thread message log storage.
//!
//! Append-only ordered logs, one per thread, each a single JSON array
//! record. The hard cap is enforced here on every append so no call site
//! can reintroduce an uncapped log.

use std::sync::Arc;

use haven_storage::{KvBackend, keys};
use tracing::debug;

use crate::error::{CoreError, Result};
use crate::models::Message;

use super::{read_json, write_json};

/// Typed message log storage over the key-value backend.
#[derive(Clone)]
pub struct MessageLogStorage {
    backend: Arc<dyn KvBackend>,
    hard_limit: usize,
}

impl MessageLogStorage {
    pub fn new(backend: Arc<dyn KvBackend>, hard_limit: usize) -> Self {
        Self {
            backend,
            hard_limit,
        }
    }

    /// Full ordered log for the thread. Missing or malformed data loads as
    /// an empty log.
    pub async fn load(&self, thread_id: &str) -> Vec<Message> {
        read_json(&self.backend, &keys::thread_log(thread_id))
            .await
            .unwrap_or_default()
    }

    /// The `n` most recent messages, oldest first.
    pub async fn load_last_n(&self, thread_id: &str, n: usize) -> Vec<Message> {
        let all = self.load(thread_id).await;
        let skip = all.len().saturating_sub(n);
        all.into_iter().skip(skip).collect()
    }

    /// Append an ordered batch, then trim to the hard cap discarding the
    /// oldest entries. One write per batch: a user/assistant pair appended
    /// together can never be half-applied by the log itself.
    pub async fn append(&self, thread_id: &str, batch: &[Message]) -> Result<()> {
        let mut all = self.load(thread_id).await;
        all.extend_from_slice(batch);
        let trimmed = all.len().saturating_sub(self.hard_limit);
        if trimmed > 0 {
            all.drain(..trimmed);
        }
        debug!(thread_id, appended = batch.len(), trimmed, kept = all.len(), "appending to log");
        write_json(&self.backend, &keys::thread_log(thread_id), &all).await
    }

    /// Append a single message.
    pub async fn save_message(&self, thread_id: &str, message: &Message) -> Result<()> {
        self.append(thread_id, std::slice::from_ref(message)).await
    }

    /// Destroy the thread's log record.
    pub async fn clear(&self, thread_id: &str) -> Result<()> {
        let key = keys::thread_log(thread_id);
        self.backend
            .remove(&key)
            .await
            .map_err(|e| CoreError::write(key, e))
    }

    /// Initialize an empty log record for a freshly created thread.
    pub(crate) async fn init_empty(&self, thread_id: &str) -> Result<()> {
        write_json(&self.backend, &keys::thread_log(thread_id), &Vec::<Message>::new()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use haven_storage::MemoryBackend;

    fn log() -> MessageLogStorage {
        MessageLogStorage::new(Arc::new(MemoryBackend::new()), 40)
    }

    #[tokio::test]
    async fn test_load_of_missing_log_is_empty() {
        assert!(log().load("t").await.is_empty());
    }

    #[tokio::test]
    async fn test_malformed_log_loads_as_empty() {
        let backend: Arc<dyn KvBackend> = Arc::new(MemoryBackend::new());
        backend
            .put(&keys::thread_log("t"), "not json at all")
            .await
            .unwrap();
        let log = MessageLogStorage::new(backend, 40);
        assert!(log.load("t").await.is_empty());
    }

    #[tokio::test]
    async fn test_append_preserves_order() {
        let log = log();
        for i in 0..5 {
            log.save_message("t", &Message::user(format!("m{i}"), i))
                .await
                .unwrap();
        }
        let all = log.load("t").await;
        assert_eq!(all.len(), 5);
        assert_eq!(all[0].content, "m0");
        assert_eq!(all[4].content, "m4");
    }

    #[tokio::test]
    async fn test_load_last_n_returns_most_recent_oldest_first() {
        let log = log();
        for i in 0..10 {
            log.save_message("t", &Message::user(format!("m{i}"), i))
                .await
                .unwrap();
        }
        let last = log.load_last_n("t", 3).await;
        assert_eq!(last.len(), 3);
        assert_eq!(last[0].content, "m7");
        assert_eq!(last[2].content, "m9");

        // n larger than the log returns everything.
        assert_eq!(log.load_last_n("t", 100).await.len(), 10);
    }

    #[tokio::test]
    async fn test_hard_cap_discards_oldest() {
        let log = log();
        // 41 sequential saves: the very first message must fall off.
        for i in 0..41 {
            log.save_message("t", &Message::user(format!("m{i}"), i))
                .await
                .unwrap();
        }
        let kept = log.load_last_n("t", 40).await;
        assert_eq!(kept.len(), 40);
        assert_eq!(kept[0].content, "m1");
        assert_eq!(kept[39].content, "m40");
    }

    #[tokio::test]
    async fn test_cap_applies_to_batch_appends() {
        let log = MessageLogStorage::new(Arc::new(MemoryBackend::new()), 4);
        let batch: Vec<Message> = (0..6).map(|i| Message::user(format!("m{i}"), i)).collect();
        log.append("t", &batch).await.unwrap();
        let all = log.load("t").await;
        assert_eq!(all.len(), 4);
        assert_eq!(all[0].content, "m2");
    }

    #[tokio::test]
    async fn test_logs_are_isolated_per_thread() {
        let log = log();
        log.save_message("a", &Message::user("only in a", 1))
            .await
            .unwrap();
        assert!(log.load("b").await.is_empty());
        assert_eq!(log.load("a").await.len(), 1);
    }

    #[tokio::test]
    async fn test_clear_destroys_the_log() {
        let log = log();
        log.save_message("t", &Message::user("hi", 1)).await.unwrap();
        log.clear("t").await.unwrap();
        assert!(log.load("t").await.is_empty());
    }
}
