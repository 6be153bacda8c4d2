//! Error taxonomy shared by the engine.

use crate::core::constants::MIN_BACKSTORY_CHARS;

/// Narrative service failures (network or response shape).
#[derive(Debug, thiserror::Error)]
pub enum NarrativeError {
    #[error("narrative request failed: {0}")]
    Request(String),

    #[error("narrative service returned an invalid response: {0}")]
    InvalidResponse(String),

    #[error("no API key configured for the narrative service")]
    MissingApiKey,
}

/// Storage failures and undecodable persisted records.
#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("corrupt record under '{key}': {reason}")]
    CorruptRecord { key: String, reason: String },
}

/// Backup documents rejected before any merge.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ImportError {
    #[error("backup is not valid JSON: {0}")]
    Malformed(String),

    #[error("backup must be a JSON object")]
    NotAnObject,

    #[error("backup field '{0}' must be an array")]
    WrongShape(&'static str),

    #[error("backup contains no saves, templates or achievements")]
    MissingCollections,
}

/// Character creation form problems. Caught before the form is submitted.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("name must not be empty")]
    EmptyName,

    #[error("backstory needs at least {min} characters (got {actual})")]
    BackstoryTooShort { min: usize, actual: usize },

    #[error("class '{0}' does not exist in this world")]
    UnknownClass(String),
}

impl ValidationError {
    pub fn backstory_too_short(actual: usize) -> Self {
        Self::BackstoryTooShort {
            min: MIN_BACKSTORY_CHARS,
            actual,
        }
    }
}

/// Error returned by game session operations.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("cannot {action} while {phase}")]
    NotAllowed {
        action: &'static str,
        phase: &'static str,
    },

    #[error(transparent)]
    Narrative(#[from] NarrativeError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Import(#[from] ImportError),

    #[error("no save with id '{0}'")]
    UnknownSave(String),

    #[error("no template with id '{0}'")]
    UnknownTemplate(String),

    #[error("skill '{0}' is not available")]
    UnknownSkill(String),

    #[error("failed to encode backup: {0}")]
    Export(#[from] serde_json::Error),
}

impl SessionError {
    pub fn not_allowed(action: &'static str, phase: &'static str) -> Self {
        Self::NotAllowed { action, phase }
    }
}
