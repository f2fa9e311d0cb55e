//! Chain orchestration: the send pipeline.

use std::sync::Arc;

use dashmap::DashMap;
use haven_ai::{ChatMessage, CompletionRequest, LlmClient};
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::config::CoreConfig;
use crate::error::{CoreError, Result};
use crate::memory::ThreadMemory;
use crate::prompt::{companion_template, render_prompt};
use crate::storage::Storage;

/// Orchestrates one user send: load history, render the prompt, call the
/// model, persist the exchange.
///
/// Sends on the same thread are serialized behind a per-thread lock so a
/// second send can never interleave its load/persist with the first.
/// Distinct threads proceed independently.
pub struct ChatEngine {
    storage: Storage,
    llm: Arc<dyn LlmClient>,
    config: CoreConfig,
    send_locks: DashMap<String, Arc<Mutex<()>>>,
}

impl ChatEngine {
    /// Build the engine. Fails fast when the companion template has
    /// drifted from its declared fields.
    pub fn new(storage: Storage, llm: Arc<dyn LlmClient>, config: CoreConfig) -> Result<Self> {
        companion_template()?;
        Ok(Self {
            storage,
            llm,
            config,
            send_locks: DashMap::new(),
        })
    }

    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    /// Run the full pipeline for one user message and return the reply.
    ///
    /// Cancelling `cancel` while the model call is in flight abandons the
    /// send before anything is persisted, so a stale reply can never land
    /// in the thread's history. Upstream failures likewise persist
    /// nothing; the caller decides what to show.
    pub async fn send(
        &self,
        thread_id: &str,
        query: &str,
        cancel: &CancellationToken,
    ) -> Result<String> {
        let lock = self.lock_for(thread_id);
        let _guard = lock.lock().await;

        if cancel.is_cancelled() {
            return Err(CoreError::Cancelled);
        }

        let profile = self.storage.profile.load_or_default().await;
        let memory = ThreadMemory::new(self.storage.messages.clone(), thread_id, &profile);
        let transcript = memory.load_transcript(self.config.history_window).await;
        let prompt = render_prompt(&profile, &transcript, query)?;

        debug!(thread_id, prompt_len = prompt.len(), "prompt rendered");

        let request = CompletionRequest::new(vec![
            ChatMessage::system(prompt),
            ChatMessage::user(query),
        ])
        .with_temperature(self.config.temperature);

        let response = tokio::select! {
            _ = cancel.cancelled() => {
                info!(thread_id, "send cancelled while completion was in flight");
                return Err(CoreError::Cancelled);
            }
            result = self.llm.complete(request) => result?,
        };

        memory.save_context(query, &response.content).await?;
        info!(thread_id, reply_len = response.content.len(), "exchange persisted");

        Ok(response.content)
    }

    fn lock_for(&self, thread_id: &str) -> Arc<Mutex<()>> {
        self.send_locks
            .entry(thread_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }
}
