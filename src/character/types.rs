//! Character, skill and template data.

use serde::{Deserialize, Serialize};

use super::equipment::Equipment;
use crate::core::constants::{BASE_HP, HP_PER_POWER, MIN_POWER, TEMPLATE_POWER};
use crate::rules::{get_skill_def, starting_skills, SkillEffect, WorldView};

/// Max hp that goes with a base power value.
pub fn max_hp_for_power(power: u32) -> u32 {
    power.saturating_mul(HP_PER_POWER).saturating_add(BASE_HP)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Explicit combat family; table skills always carry one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effect: Option<SkillEffect>,
}

impl Skill {
    /// Combat family: the explicit tag, else the table entry for this id,
    /// else a keyword guess from the name.
    pub fn effect(&self) -> SkillEffect {
        self.effect
            .or_else(|| get_skill_def(&self.id).map(|def| def.effect))
            .unwrap_or_else(|| SkillEffect::classify(&self.name))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Character {
    pub name: String,
    pub class: String,
    pub backstory: String,
    pub world_view: WorldView,
    /// Base power; the only persisted power value
    pub power: u32,
    pub hp: u32,
    pub max_hp: u32,
    /// Innate skills, fixed at class selection
    pub skills: Vec<Skill>,
    pub equipment: Equipment,
}

impl Character {
    /// Fresh character with class starting skills, no equipment and full hp.
    pub fn new(name: &str, class: &str, backstory: &str, world_view: WorldView, power: u32) -> Self {
        let power = power.max(MIN_POWER);
        let max_hp = max_hp_for_power(power);
        Self {
            name: name.trim().to_string(),
            class: class.to_string(),
            backstory: backstory.trim().to_string(),
            world_view,
            power,
            hp: max_hp,
            max_hp,
            skills: starting_skills(class),
            equipment: Equipment::new(),
        }
    }

    /// Changes base power and keeps `max_hp` in step. A higher max raises hp
    /// by the same amount; a lower one only clamps hp.
    pub fn set_power(&mut self, power: u32) {
        let power = power.max(MIN_POWER);
        let old_max = self.max_hp;
        self.power = power;
        self.max_hp = max_hp_for_power(power);
        if self.max_hp > old_max {
            self.hp = self.hp.saturating_add(self.max_hp - old_max);
        }
        self.hp = self.hp.min(self.max_hp);
    }

    /// Applies a signed power change, flooring at the minimum power.
    pub fn adjust_power(&mut self, delta: i64) {
        let power = (self.power as i64 + delta).clamp(MIN_POWER as i64, u32::MAX as i64);
        self.set_power(power as u32);
    }

    pub fn restore_hp(&mut self) {
        self.hp = self.max_hp;
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }
}

/// Reusable character seed offered at creation time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterTemplate {
    #[serde(default)]
    pub id: String,
    pub name: String,
    pub class: String,
    pub backstory: String,
    #[serde(default = "default_template_power")]
    pub power: u32,
    #[serde(default)]
    pub skills: Vec<Skill>,
}

fn default_template_power() -> u32 {
    TEMPLATE_POWER
}

impl CharacterTemplate {
    /// Templates collide when their trimmed name, class and backstory match.
    pub fn identity(&self) -> (&str, &str, &str) {
        (self.name.trim(), self.class.as_str(), self.backstory.trim())
    }

    pub fn same_identity(&self, other: &CharacterTemplate) -> bool {
        self.identity() == other.identity()
    }
}
