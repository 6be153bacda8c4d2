//! Story segments as returned by the narrative service.

use serde::{Deserialize, Serialize};

use crate::character::Item;
use crate::combat::EncounterSpec;
use crate::core::constants::{HIDDEN_EVENT_MARKER, MAX_CHOICES};
use crate::utils::serde_num::opt_i32_from_number;

/// Reward attached to a segment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Reward {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub equipment: Option<Item>,
    /// Permanent base power change
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "opt_i32_from_number"
    )]
    pub power: Option<i32>,
}

impl Reward {
    pub fn is_empty(&self) -> bool {
        self.equipment.is_none() && self.power.map_or(true, |p| p == 0)
    }
}

/// One narrated step of the story.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorySegment {
    pub situation: String,
    #[serde(default)]
    pub choices: Vec<String>,
    #[serde(default)]
    pub is_end: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub combat_encounter: Option<EncounterSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reward: Option<Reward>,
}

impl StorySegment {
    /// Plain segment with text and choices.
    pub fn new(situation: &str, choices: &[&str]) -> Self {
        Self {
            situation: situation.to_string(),
            choices: choices.iter().map(|c| c.to_string()).collect(),
            ..Default::default()
        }
    }

    /// Final segment of a story.
    pub fn ending(situation: &str) -> Self {
        Self {
            situation: situation.to_string(),
            is_end: true,
            ..Default::default()
        }
    }

    /// Puts the segment into the shape the engine relies on: at most three
    /// choices, no hidden-event marker in the text, and an explicit effect
    /// family on any granted skill. Returns whether the marker was present.
    pub fn normalize(&mut self) -> bool {
        self.choices.truncate(MAX_CHOICES);

        let hidden = self.situation.contains(HIDDEN_EVENT_MARKER);
        if hidden {
            self.situation = self
                .situation
                .replace(HIDDEN_EVENT_MARKER, "")
                .trim()
                .to_string();
        }

        if let Some(skill) = self
            .reward
            .as_mut()
            .and_then(|r| r.equipment.as_mut())
            .and_then(|item| item.granted_skill.as_mut())
        {
            if skill.effect.is_none() {
                skill.effect = Some(skill.effect());
            }
        }

        hidden
    }
}
