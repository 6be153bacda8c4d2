//! Engine configuration.

use std::path::PathBuf;

use super::constants::{NOTIFICATION_TTL_SECONDS, RANDOM_EVENT_CHANCE};

/// Default Gemini-style REST endpoint.
pub const DEFAULT_NARRATIVE_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default narrative model.
pub const DEFAULT_NARRATIVE_MODEL: &str = "gemini-flash-lite-latest";

/// Settings for the HTTP narrative client.
#[derive(Debug, Clone, PartialEq)]
pub struct NarrativeConfig {
    pub endpoint: String,
    pub model: String,
    /// Absent key means the client refuses to send requests.
    pub api_key: Option<String>,
    pub temperature: f64,
    pub top_p: f64,
    pub timeout_secs: u64,
}

impl Default for NarrativeConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_NARRATIVE_ENDPOINT.to_string(),
            model: DEFAULT_NARRATIVE_MODEL.to_string(),
            api_key: None,
            temperature: 0.9,
            top_p: 0.95,
            timeout_secs: 60,
        }
    }
}

impl NarrativeConfig {
    /// Reads `SAGA_NARRATIVE_ENDPOINT`, `SAGA_NARRATIVE_MODEL` and
    /// `GEMINI_API_KEY` (or `API_KEY`), falling back to defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let endpoint = std::env::var("SAGA_NARRATIVE_ENDPOINT").unwrap_or(defaults.endpoint);
        let model = std::env::var("SAGA_NARRATIVE_MODEL").unwrap_or(defaults.model);
        let api_key = std::env::var("GEMINI_API_KEY")
            .or_else(|_| std::env::var("API_KEY"))
            .ok()
            .filter(|key| !key.trim().is_empty());

        Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
            model,
            api_key,
            ..defaults
        }
    }
}

/// Top-level configuration for a game session.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Directory holding the persisted collections
    pub data_dir: PathBuf,

    /// Chance of a random event after an ordinary story segment
    pub random_event_chance: f64,

    /// How long a presentation layer should keep a notification visible
    pub notification_ttl_secs: u64,

    pub narrative: NarrativeConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            random_event_chance: RANDOM_EVENT_CHANCE,
            notification_ttl_secs: NOTIFICATION_TTL_SECONDS,
            narrative: NarrativeConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Default configuration with env overrides (`SAGA_DATA_DIR` plus the
    /// narrative variables).
    pub fn from_env() -> Self {
        let data_dir = std::env::var("SAGA_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_data_dir());

        Self {
            data_dir,
            narrative: NarrativeConfig::from_env(),
            ..Default::default()
        }
    }

    /// Config for tests: no random events, data under the given dir.
    pub fn for_test(data_dir: PathBuf) -> Self {
        Self {
            data_dir,
            random_event_chance: 0.0,
            ..Default::default()
        }
    }
}

/// `~/.saga`, or `./.saga` when the home directory is unknown.
fn default_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".saga")
}
