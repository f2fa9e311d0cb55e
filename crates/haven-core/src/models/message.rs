//! Conversation message model.

use serde::{Deserialize, Serialize};

/// Role of a conversation message
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// Single persisted message.
///
/// Within one log, ascending `ts` equals conversation order. A user message
/// and its reply are always appended as a pair with the reply's `ts` one
/// millisecond after the user's, so ordering stays stable even when the
/// clock does not advance between the two.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Message {
    pub id: String,
    pub role: Role,
    pub content: String,
    /// Epoch milliseconds.
    pub ts: i64,
}

impl Message {
    pub fn user(content: impl Into<String>, ts: i64) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            role: Role::User,
            content: content.into(),
            ts,
        }
    }

    pub fn assistant(content: impl Into<String>, ts: i64) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            role: Role::Assistant,
            content: content.into(),
            ts,
        }
    }
}

/// Current time in epoch milliseconds.
pub(crate) fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roles_serialize_lowercase() {
        let msg = Message::user("hi", 1);
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["role"], "user");

        let reply = Message::assistant("hello", 2);
        let json = serde_json::to_value(&reply).unwrap();
        assert_eq!(json["role"], "assistant");
    }

    #[test]
    fn test_ids_are_unique() {
        assert_ne!(Message::user("a", 1).id, Message::user("a", 1).id);
    }
}
