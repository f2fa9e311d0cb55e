//! Haven AI - LLM boundary.
//!
//! Haven treats the language model as an opaque request/response boundary:
//! a rendered prompt goes in, reply text comes out. This crate defines the
//! [`LlmClient`] contract, an OpenAI-compatible chat-completions client,
//! and a scripted mock client for tests.

pub mod client;
pub mod error;
pub mod mock_client;
pub mod openai;

pub use client::{ChatMessage, CompletionRequest, CompletionResponse, LlmClient, Role, TokenUsage};
pub use error::{AiError, Result};
pub use mock_client::{MockClient, MockStep};
pub use openai::OpenAIClient;
