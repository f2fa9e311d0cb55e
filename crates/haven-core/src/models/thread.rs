//! Conversation thread metadata.

use serde::{Deserialize, Serialize};

/// An isolated, named conversation owning exactly one message log.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Thread {
    pub id: String,
    /// Mutable user-facing label.
    pub name: String,
    /// Creation time in epoch milliseconds. Immutable.
    pub created: i64,
}

impl Thread {
    pub fn new(name: impl Into<String>, created: i64) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.into(),
            created,
        }
    }
}
