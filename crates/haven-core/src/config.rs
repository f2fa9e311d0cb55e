//! Core configuration.

/// Maximum retained message count per log before oldest entries are
/// discarded.
pub const DEFAULT_HARD_LIMIT: usize = 40;

/// Default number of recent messages projected into the prompt.
pub const DEFAULT_HISTORY_WINDOW: usize = 20;

/// Default model identifier.
pub const DEFAULT_MODEL: &str = "gpt-4o";

/// Default sampling temperature.
pub const DEFAULT_TEMPERATURE: f32 = 0.0;

/// Tunables for storage retention and prompt assembly.
#[derive(Debug, Clone)]
pub struct CoreConfig {
    /// Hard cap applied uniformly to every message log.
    pub hard_limit: usize,
    /// How many recent messages feed the transcript.
    pub history_window: usize,
    /// Model identifier passed to the LLM boundary.
    pub model: String,
    /// Sampling temperature.
    pub temperature: f32,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            hard_limit: DEFAULT_HARD_LIMIT,
            history_window: DEFAULT_HISTORY_WINDOW,
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
        }
    }
}
