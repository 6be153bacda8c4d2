//! Characters: data, equipment, power calculation, creation and migration.

pub mod creation;
pub mod equipment;
pub mod migration;
pub mod power;
pub mod types;

pub use creation::{create_character, reroll_from, roll_base_power, CharacterForm};
pub use equipment::{Equipment, EquipmentSlot, Item};
pub use migration::CharacterRecord;
pub use power::{
    active_synergies, available_skills, newly_active_synergies, synergy_bonuses, total_power,
    SynergyBonuses,
};
pub use types::{max_hp_for_power, Character, CharacterTemplate, Skill};
