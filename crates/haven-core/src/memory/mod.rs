//! Memory assembly: projecting stored messages into LLM context and
//! recording new exchanges.

mod thread_memory;

pub use thread_memory::{ASSISTANT_LABEL, ThreadMemory};
