//! Thread-scoped conversation memory.

use tracing::debug;

use crate::error::Result;
use crate::models::{Message, Profile, Role, now_ms};
use crate::storage::MessageLogStorage;

/// Fixed speaker label for assistant turns in the transcript.
pub const ASSISTANT_LABEL: &str = "Haven";

const USER_FALLBACK_LABEL: &str = "User";

/// Converts a thread's log into a chronological transcript for prompt
/// injection and records completed exchanges back into it.
#[derive(Clone)]
pub struct ThreadMemory {
    log: MessageLogStorage,
    thread_id: String,
    user_label: String,
}

impl ThreadMemory {
    pub fn new(log: MessageLogStorage, thread_id: impl Into<String>, profile: &Profile) -> Self {
        let user_label = if profile.name.trim().is_empty() {
            USER_FALLBACK_LABEL.to_string()
        } else {
            profile.name.clone()
        };
        Self {
            log,
            thread_id: thread_id.into(),
            user_label,
        }
    }

    /// Render the `window` most recent messages as `<speaker>: <content>`
    /// lines, oldest first.
    pub async fn load_transcript(&self, window: usize) -> String {
        let rows = self.log.load_last_n(&self.thread_id, window).await;
        debug!(thread_id = %self.thread_id, count = rows.len(), "assembling transcript");
        rows.iter()
            .map(|m| match m.role {
                Role::User => format!("{}: {}", self.user_label, m.content),
                Role::Assistant => format!("{ASSISTANT_LABEL}: {}", m.content),
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Persist one completed exchange: the user message and the reply,
    /// appended together with the reply's timestamp one millisecond later
    /// so ordering survives timestamp collisions.
    pub async fn save_context(&self, input: &str, output: &str) -> Result<()> {
        let t = now_ms();
        let pair = [Message::user(input, t), Message::assistant(output, t + 1)];
        self.log.append(&self.thread_id, &pair).await
    }
}
