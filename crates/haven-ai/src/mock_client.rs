//! Deterministic mock LLM client for engine and CLI tests.

use std::collections::VecDeque;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tokio::time::{Duration, sleep};

use crate::client::{CompletionRequest, CompletionResponse, LlmClient};
use crate::error::{AiError, Result};

/// Scripted completion step with optional delay.
#[derive(Debug, Clone)]
pub enum MockStep {
    /// Return a plain assistant reply.
    Text(String),
    /// Return a reply after a delay, for cancellation and ordering tests.
    DelayedText { delay_ms: u64, content: String },
    /// Return an API error.
    Error(String),
}

impl MockStep {
    pub fn text(content: impl Into<String>) -> Self {
        Self::Text(content.into())
    }

    pub fn delayed(delay_ms: u64, content: impl Into<String>) -> Self {
        Self::DelayedText {
            delay_ms,
            content: content.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::Error(message.into())
    }
}

/// Mock client replaying a fixed script of steps.
///
/// Each `complete` call consumes the next step; once only one step remains
/// it repeats for every further call.
pub struct MockClient {
    steps: Mutex<VecDeque<MockStep>>,
}

impl MockClient {
    pub fn new(steps: Vec<MockStep>) -> Self {
        Self {
            steps: Mutex::new(steps.into()),
        }
    }

    /// Client that always answers with the same text.
    pub fn always(content: impl Into<String>) -> Self {
        Self::new(vec![MockStep::text(content)])
    }
}

#[async_trait]
impl LlmClient for MockClient {
    async fn complete(&self, _request: CompletionRequest) -> Result<CompletionResponse> {
        let step = {
            let mut steps = self.steps.lock().await;
            if steps.len() > 1 {
                steps.pop_front()
            } else {
                steps.front().cloned()
            }
        };

        match step {
            Some(MockStep::Text(content)) => Ok(CompletionResponse {
                content,
                usage: None,
            }),
            Some(MockStep::DelayedText { delay_ms, content }) => {
                sleep(Duration::from_millis(delay_ms)).await;
                Ok(CompletionResponse {
                    content,
                    usage: None,
                })
            }
            Some(MockStep::Error(message)) => Err(AiError::Api(message)),
            None => Err(AiError::Api("mock script exhausted".to_string())),
        }
    }

    fn model(&self) -> String {
        "mock".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::ChatMessage;

    fn request() -> CompletionRequest {
        CompletionRequest::new(vec![ChatMessage::user("hi")])
    }

    #[tokio::test]
    async fn test_steps_are_consumed_in_order() {
        let client = MockClient::new(vec![
            MockStep::text("first"),
            MockStep::error("down"),
            MockStep::text("last"),
        ]);

        assert_eq!(client.complete(request()).await.unwrap().content, "first");
        assert!(client.complete(request()).await.is_err());
        assert_eq!(client.complete(request()).await.unwrap().content, "last");
        // Final step repeats.
        assert_eq!(client.complete(request()).await.unwrap().content, "last");
    }

    #[tokio::test]
    async fn test_always_repeats() {
        let client = MockClient::always("same");
        assert_eq!(client.complete(request()).await.unwrap().content, "same");
        assert_eq!(client.complete(request()).await.unwrap().content, "same");
    }
}
