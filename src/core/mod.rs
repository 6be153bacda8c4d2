//! Engine-wide constants, configuration and error types.

pub mod config;
pub mod constants;
pub mod error;

pub use config::{EngineConfig, NarrativeConfig};
pub use error::{ImportError, NarrativeError, PersistenceError, SessionError, ValidationError};
