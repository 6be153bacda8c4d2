//! HTTP narrative client for a Gemini-style `generateContent` endpoint.

use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Duration;

use super::prompt::build_prompt;
use super::service::NarrativeService;
use super::types::StorySegment;
use crate::character::Character;
use crate::core::{NarrativeConfig, NarrativeError};

pub struct GeminiNarrator {
    agent: ureq::Agent,
    config: NarrativeConfig,
}

impl GeminiNarrator {
    pub fn new(config: NarrativeConfig) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build();
        Self { agent, config }
    }

    /// Client configured from `SAGA_NARRATIVE_*` and `GEMINI_API_KEY`.
    pub fn from_env() -> Self {
        Self::new(NarrativeConfig::from_env())
    }

    fn request_body(&self, prompt: &str) -> Value {
        json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": story_segment_schema(),
                "temperature": self.config.temperature,
                "topP": self.config.top_p,
            }
        })
    }
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Content,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    #[serde(default)]
    text: Option<String>,
}

impl NarrativeService for GeminiNarrator {
    fn generate_segment(
        &mut self,
        character: &Character,
        history: &[String],
        choice: Option<&str>,
    ) -> Result<StorySegment, NarrativeError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or(NarrativeError::MissingApiKey)?;
        let url = format!(
            "{}/models/{}:generateContent",
            self.config.endpoint, self.config.model
        );
        let prompt = build_prompt(character, history, choice);
        tracing::debug!(model = %self.config.model, history = history.len(), "requesting story segment");

        let response = self
            .agent
            .post(&url)
            .query("key", api_key)
            .send_json(self.request_body(&prompt))
            .map_err(|e| match e {
                ureq::Error::Status(code, response) => {
                    let body = response.into_string().unwrap_or_default();
                    NarrativeError::Request(format!("HTTP {}: {}", code, body))
                }
                other => NarrativeError::Request(other.to_string()),
            })?;

        let payload: GenerateContentResponse = response
            .into_json()
            .map_err(|e| NarrativeError::InvalidResponse(e.to_string()))?;
        let text = payload
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content.parts.into_iter().find_map(|p| p.text))
            .ok_or_else(|| NarrativeError::InvalidResponse("response has no text".to_string()))?;

        parse_segment(&text)
    }
}

/// Parses the model's JSON text, tolerating a Markdown code fence around it.
pub fn parse_segment(text: &str) -> Result<StorySegment, NarrativeError> {
    let trimmed = text.trim();
    let body = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .and_then(|rest| rest.strip_suffix("```"))
        .unwrap_or(trimmed)
        .trim();
    serde_json::from_str(body).map_err(|e| {
        tracing::warn!(error = %e, "narrative response was not a valid story segment");
        NarrativeError::InvalidResponse(e.to_string())
    })
}

fn equipment_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "id": { "type": "STRING", "description": "Unique id in the form 'world-type-name', e.g. 'cyber-weapon-katana'." },
            "name": { "type": "STRING" },
            "description": { "type": "STRING" },
            "type": { "type": "STRING", "description": "One of 'weapon', 'armor', 'accessory'." },
            "worldView": { "type": "STRING" },
            "powerBonus": { "type": "NUMBER", "description": "Power bonus; omit when none." },
            "grantedSkill": {
                "type": "OBJECT",
                "description": "Skill granted while equipped; omit when none.",
                "properties": {
                    "id": { "type": "STRING" },
                    "name": { "type": "STRING" },
                    "description": { "type": "STRING" }
                },
                "required": ["id", "name", "description"]
            }
        },
        "required": ["id", "name", "description", "type", "worldView"]
    })
}

/// JSON schema the model must answer with.
pub fn story_segment_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "situation": {
                "type": "STRING",
                "description": "The current situation in vivid Markdown. Include the hidden-event marker if one fires."
            },
            "choices": {
                "type": "ARRAY",
                "description": "Three short, distinct choices.",
                "items": { "type": "STRING" }
            },
            "isEnd": { "type": "BOOLEAN", "description": "True only when the story reaches an ending." },
            "combatEncounter": {
                "type": "OBJECT",
                "description": "Present only when a fight starts.",
                "properties": {
                    "enemyName": { "type": "STRING" },
                    "enemyPower": { "type": "NUMBER" },
                    "abilities": {
                        "type": "ARRAY",
                        "items": {
                            "type": "OBJECT",
                            "properties": {
                                "id": {
                                    "type": "STRING",
                                    "description": "One of 'SHIELD', 'POISON', 'POWER_DRAIN', 'WEAKEN', 'REGENERATE', 'EMP'."
                                },
                                "name": { "type": "STRING" },
                                "description": { "type": "STRING" }
                            },
                            "required": ["id", "name", "description"]
                        }
                    }
                },
                "required": ["enemyName", "enemyPower"]
            },
            "reward": {
                "type": "OBJECT",
                "description": "Present only when the player earned something.",
                "properties": {
                    "equipment": equipment_schema(),
                    "power": { "type": "NUMBER" }
                }
            }
        },
        "required": ["situation", "choices", "isEnd"]
    })
}
