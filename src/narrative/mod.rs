//! Narrative service boundary: segment types, the service trait, prompt
//! construction and the HTTP client.

pub mod gemini;
pub mod prompt;
pub mod service;
pub mod types;

pub use gemini::{parse_segment, GeminiNarrator};
pub use prompt::build_prompt;
pub use service::NarrativeService;
pub use types::{Reward, StorySegment};
