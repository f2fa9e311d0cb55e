//! Data model shared across storage, memory and prompt assembly.

mod message;
mod profile;
mod thread;

pub use message::{Message, Role};
pub(crate) use message::now_ms;
pub use profile::{ConversationStyle, CoreFact, Profile};
pub use thread::Thread;
