//! Static rule tables: worlds, skills, synergies, random events and stock templates.

pub mod random_events;
pub mod skills;
pub mod synergies;
pub mod templates;
pub mod worlds;

pub use random_events::{roll_random_event, RandomEvent, RANDOM_EVENTS};
pub use skills::{
    class_skill_ids, get_skill_def, starting_skills, SkillDef, SkillEffect, ALL_SKILLS,
};
pub use synergies::{get_synergy, Synergy, SynergyBonus, ALL_SYNERGIES};
pub use templates::default_templates;
pub use worlds::{world_of_class, WorldView};
