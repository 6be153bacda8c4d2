//! Turn-based combat: encounters, actions and turn resolution.

pub mod logic;
pub mod types;

pub use logic::{is_narrow_escape, resolve_turn, victory_narration, victory_power_gain};
pub use types::{
    enemy_max_hp_for_power, AbilityKind, CombatAction, CombatEncounter, EncounterSpec,
    EnemyAbility, TurnOutcome, TurnReport,
};
