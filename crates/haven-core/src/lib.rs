//! Haven Core - conversation persistence and prompt assembly.
//!
//! This crate holds everything between the key-value store and the LLM
//! boundary:
//!
//! - [`models`] - messages, threads, the user profile
//! - [`storage`] - typed wrappers over [`haven_storage::KvBackend`] with a
//!   uniform retention cap and an explicit dependency-injection handle
//! - [`memory`] - projection of a message log into an LLM transcript and
//!   persistence of new exchanges
//! - [`prompt`] - validated template rendering of profile, style, facts,
//!   history and query into the final model input
//! - [`engine`] - the send pipeline: load history, render, complete,
//!   persist, with per-thread serialization and cancellation

pub mod config;
pub mod engine;
pub mod error;
pub mod memory;
pub mod models;
pub mod paths;
pub mod prompt;
pub mod storage;

pub use config::CoreConfig;
pub use engine::ChatEngine;
pub use error::{CoreError, Result};
pub use models::{ConversationStyle, CoreFact, Message, Profile, Role, Thread};
pub use storage::{DEFAULT_THREAD_ID, Storage};
