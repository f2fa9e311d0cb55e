//! Profile slot storage.

use std::sync::Arc;

use haven_storage::{KvBackend, keys};

use crate::error::Result;
use crate::models::Profile;

use super::{read_json, write_json};

/// Typed access to the singleton profile record.
#[derive(Clone)]
pub struct ProfileStorage {
    backend: Arc<dyn KvBackend>,
}

impl ProfileStorage {
    pub fn new(backend: Arc<dyn KvBackend>) -> Self {
        Self { backend }
    }

    /// The stored profile, or `None` when absent or unreadable.
    pub async fn load(&self) -> Option<Profile> {
        read_json(&self.backend, keys::PROFILE).await
    }

    /// The stored profile, falling back to defaults.
    pub async fn load_or_default(&self) -> Profile {
        self.load().await.unwrap_or_default()
    }

    /// Overwrite the profile slot. No history is retained.
    pub async fn save(&self, profile: &Profile) -> Result<()> {
        write_json(&self.backend, keys::PROFILE, profile).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ConversationStyle, CoreFact};
    use haven_storage::MemoryBackend;

    fn storage() -> (Arc<dyn KvBackend>, ProfileStorage) {
        let backend: Arc<dyn KvBackend> = Arc::new(MemoryBackend::new());
        (backend.clone(), ProfileStorage::new(backend))
    }

    #[tokio::test]
    async fn test_save_then_load_round_trips() {
        let (_, storage) = storage();
        let profile = Profile {
            name: "Ada".to_string(),
            pronouns: "she/her".to_string(),
            style: ConversationStyle::Challenging,
            core_facts: vec![CoreFact {
                id: 1,
                text: "Writes compilers for fun.".to_string(),
            }],
        };
        storage.save(&profile).await.unwrap();
        assert_eq!(storage.load().await, Some(profile));
    }

    #[tokio::test]
    async fn test_missing_profile_loads_as_none() {
        let (_, storage) = storage();
        assert_eq!(storage.load().await, None);
        assert_eq!(storage.load_or_default().await, Profile::default());
    }

    #[tokio::test]
    async fn test_corrupt_profile_loads_as_none() {
        let (backend, storage) = storage();
        backend.put(keys::PROFILE, "{broken").await.unwrap();
        assert_eq!(storage.load().await, None);
    }

    #[tokio::test]
    async fn test_unknown_style_makes_record_unreadable() {
        let (backend, storage) = storage();
        // Legacy style keys are not silently coerced; the record degrades
        // to defaults instead.
        backend
            .put(
                keys::PROFILE,
                r#"{"name":"A","pronouns":"","style":"neil","core_facts":[]}"#,
            )
            .await
            .unwrap();
        assert_eq!(storage.load().await, None);
    }

    #[tokio::test]
    async fn test_save_overwrites_previous_profile() {
        let (_, storage) = storage();
        let mut profile = Profile::default();
        profile.name = "First".to_string();
        storage.save(&profile).await.unwrap();
        profile.name = "Second".to_string();
        storage.save(&profile).await.unwrap();
        assert_eq!(storage.load().await.unwrap().name, "Second");
    }
}
