//! Haven Storage - Low-level persistence layer
//!
//! This crate provides the key-value persistence primitive for Haven. Every
//! logical record (profile, thread registry, per-thread message log) is a
//! JSON string stored under a well-known key; the typed wrappers live in
//! haven-core.
//!
//! # Backends
//!
//! - [`RedbBackend`] - embedded redb database file, the production store
//! - [`MemoryBackend`] - in-memory map for tests and ephemeral sessions
//!
//! Both implement the async [`KvBackend`] contract: get/put/remove over
//! string keys. Write failures surface as errors to the caller; the policy
//! of degrading unreadable records to defaults belongs to the typed layer,
//! not here.

pub mod keys;
pub mod kv;
mod redb_backend;

pub use kv::{KvBackend, MemoryBackend};
pub use redb_backend::RedbBackend;
