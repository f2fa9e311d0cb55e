//! CLI configuration file support
//!
//! Loads configuration from ~/.config/haven/config.toml

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// CLI configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
    /// Default settings
    #[serde(default)]
    pub default: DefaultConfig,
    /// API key settings
    #[serde(default)]
    pub api_keys: ApiKeysConfig,
}

/// Default configuration values
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DefaultConfig {
    /// Database path override
    pub db_path: Option<String>,
    /// Model identifier
    pub model: Option<String>,
    /// Sampling temperature
    pub temperature: Option<f32>,
}

/// API key configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiKeysConfig {
    /// OpenAI API key
    pub openai: Option<String>,
}

impl CliConfig {
    /// Load configuration from the default path
    pub fn load() -> Self {
        Self::load_from_path(Self::default_path())
    }

    /// Load configuration from a specific path
    pub fn load_from_path(path: Option<PathBuf>) -> Self {
        let Some(path) = path else {
            return Self::default();
        };

        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(&path) {
            Ok(content) => toml::from_str(&content).unwrap_or_default(),
            Err(_) => Self::default(),
        }
    }

    /// Get the default configuration file path
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("haven").join("config.toml"))
    }

    /// Resolve the OpenAI API key: environment takes precedence over the
    /// config file.
    pub fn openai_api_key(&self) -> Option<String> {
        std::env::var("OPENAI_API_KEY")
            .ok()
            .filter(|k| !k.trim().is_empty())
            .or_else(|| self.api_keys.openai.clone())
    }
}
