//! Normalizes persisted character records written before skills,
//! equipment and hp existed.

use serde::{Deserialize, Serialize};

use super::equipment::Equipment;
use super::types::{max_hp_for_power, Character, Skill};
use crate::core::constants::MIN_POWER;
use crate::rules::{starting_skills, WorldView};

/// A character as found on disk, any of the later fields may be missing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterRecord {
    pub name: String,
    pub class: String,
    #[serde(default)]
    pub backstory: String,
    pub world_view: WorldView,
    pub power: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hp: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_hp: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skills: Option<Vec<Skill>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub equipment: Option<Equipment>,
}

impl CharacterRecord {
    /// Fills in whatever is missing. Running it on a current record
    /// changes nothing.
    pub fn migrate(&mut self) {
        if self.skills.as_ref().map_or(true, |skills| skills.is_empty()) {
            self.skills = Some(starting_skills(&self.class));
        }
        if self.equipment.is_none() {
            self.equipment = Some(Equipment::new());
        }
        if self.hp.is_none() || self.max_hp.is_none() {
            let max_hp = max_hp_for_power(self.power.max(MIN_POWER));
            self.max_hp = Some(max_hp);
            self.hp = Some(max_hp);
        }
    }

    pub fn needs_migration(&self) -> bool {
        let mut migrated = self.clone();
        migrated.migrate();
        migrated != *self
    }

    /// Migrates and converts into a live character.
    pub fn into_character(mut self) -> Character {
        self.migrate();
        let max_hp = self.max_hp.unwrap_or_else(|| max_hp_for_power(self.power));
        Character {
            name: self.name,
            class: self.class,
            backstory: self.backstory,
            world_view: self.world_view,
            power: self.power.max(MIN_POWER),
            hp: self.hp.unwrap_or(max_hp).min(max_hp),
            max_hp,
            skills: self.skills.unwrap_or_default(),
            equipment: self.equipment.unwrap_or_default(),
        }
    }
}

impl From<Character> for CharacterRecord {
    fn from(character: Character) -> Self {
        Self {
            name: character.name,
            class: character.class,
            backstory: character.backstory,
            world_view: character.world_view,
            power: character.power,
            hp: Some(character.hp),
            max_hp: Some(character.max_hp),
            skills: Some(character.skills),
            equipment: Some(character.equipment),
        }
    }
}
