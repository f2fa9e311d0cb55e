//! User profile model.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Conversational stance selecting which instruction paragraph is injected
/// into every prompt.
///
/// The set is closed: deserializing an unknown style fails, and parsing one
/// from user input is a configuration error, never a silent default.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ConversationStyle {
    Supportive,
    Balanced,
    Challenging,
}

impl ConversationStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Supportive => "supportive",
            Self::Balanced => "balanced",
            Self::Challenging => "challenging",
        }
    }
}

impl fmt::Display for ConversationStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConversationStyle {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "supportive" => Ok(Self::Supportive),
            "balanced" => Ok(Self::Balanced),
            "challenging" => Ok(Self::Challenging),
            other => Err(CoreError::Config(format!(
                "Unknown conversation style '{other}' (expected supportive, balanced or challenging)"
            ))),
        }
    }
}

/// Short persisted biographical statement injected into every prompt.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CoreFact {
    pub id: u32,
    pub text: String,
}

/// The single identity/preference record used to personalize every prompt.
/// One per installation, mutated wholesale via the settings flow.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Profile {
    pub name: String,
    pub pronouns: String,
    pub style: ConversationStyle,
    pub core_facts: Vec<CoreFact>,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            name: String::new(),
            pronouns: String::new(),
            style: ConversationStyle::Balanced,
            core_facts: Vec::new(),
        }
    }
}

impl Profile {
    /// Next free fact id (fact ids are small and user-visible).
    pub fn next_fact_id(&self) -> u32 {
        self.core_facts.iter().map(|f| f.id).max().unwrap_or(0) + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_round_trips_through_serde() {
        let json = serde_json::to_string(&ConversationStyle::Challenging).unwrap();
        assert_eq!(json, "\"challenging\"");
        let back: ConversationStyle = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ConversationStyle::Challenging);
    }

    #[test]
    fn test_unknown_style_fails_to_parse() {
        assert!(serde_json::from_str::<ConversationStyle>("\"neil\"").is_err());
        assert!(matches!(
            "mom".parse::<ConversationStyle>(),
            Err(CoreError::Config(_))
        ));
    }

    #[test]
    fn test_profile_schema() {
        let raw = r#"{
            "name": "Ada",
            "pronouns": "she/her",
            "style": "supportive",
            "core_facts": [{"id": 1, "text": "Learning to climb."}]
        }"#;
        let profile: Profile = serde_json::from_str(raw).unwrap();
        assert_eq!(profile.name, "Ada");
        assert_eq!(profile.style, ConversationStyle::Supportive);
        assert_eq!(profile.next_fact_id(), 2);
    }

    #[test]
    fn test_default_profile_is_usable() {
        let profile = Profile::default();
        assert_eq!(profile.style, ConversationStyle::Balanced);
        assert!(profile.core_facts.is_empty());
        assert_eq!(profile.next_fact_id(), 1);
    }
}
