use serde::{Deserialize, Serialize};

use crate::character::Skill;
use crate::core::constants::{ENEMY_BASE_HP, ENEMY_HP_PER_POWER};
use crate::utils::serde_num::u32_from_number;

/// Special abilities an enemy may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AbilityKind {
    /// Enemy hits for 30% less
    Shield,
    /// Flat extra damage to the player after each exchange
    Poison,
    /// Each turn costs the player a point of base power
    PowerDrain,
    /// Player hits for 20% less
    Weaken,
    /// Enemy heals after each exchange
    Regenerate,
    /// Recognised but has no effect on turn resolution
    Emp,
}

impl AbilityKind {
    pub const ALL: [AbilityKind; 6] = [
        AbilityKind::Shield,
        AbilityKind::Poison,
        AbilityKind::PowerDrain,
        AbilityKind::Weaken,
        AbilityKind::Regenerate,
        AbilityKind::Emp,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            AbilityKind::Shield => "SHIELD",
            AbilityKind::Poison => "POISON",
            AbilityKind::PowerDrain => "POWER_DRAIN",
            AbilityKind::Weaken => "WEAKEN",
            AbilityKind::Regenerate => "REGENERATE",
            AbilityKind::Emp => "EMP",
        }
    }

    pub fn from_id(id: &str) -> Option<AbilityKind> {
        Self::ALL.into_iter().find(|kind| kind.id() == id)
    }
}

/// An ability as narrated. Ids outside the known set are kept for display
/// but never affect combat.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyAbility {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
}

impl EnemyAbility {
    pub fn kind(&self) -> Option<AbilityKind> {
        AbilityKind::from_id(&self.id)
    }
}

/// Encounter data as it arrives from the narrative service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncounterSpec {
    pub enemy_name: String,
    #[serde(deserialize_with = "u32_from_number")]
    pub enemy_power: u32,
    #[serde(default)]
    pub abilities: Vec<EnemyAbility>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CombatEncounter {
    pub enemy_name: String,
    pub enemy_power: u32,
    pub enemy_hp: u32,
    pub enemy_max_hp: u32,
    #[serde(default)]
    pub abilities: Vec<EnemyAbility>,
}

impl CombatEncounter {
    pub fn new(spec: EncounterSpec) -> Self {
        let enemy_max_hp = enemy_max_hp_for_power(spec.enemy_power);
        Self {
            enemy_name: spec.enemy_name,
            enemy_power: spec.enemy_power,
            enemy_hp: enemy_max_hp,
            enemy_max_hp,
            abilities: spec.abilities,
        }
    }

    pub fn has_ability(&self, kind: AbilityKind) -> bool {
        self.abilities.iter().any(|a| a.kind() == Some(kind))
    }

    pub fn is_defeated(&self) -> bool {
        self.enemy_hp == 0
    }
}

pub fn enemy_max_hp_for_power(enemy_power: u32) -> u32 {
    enemy_power
        .saturating_mul(ENEMY_HP_PER_POWER)
        .saturating_add(ENEMY_BASE_HP)
}

/// What the player does on their turn.
#[derive(Debug, Clone, PartialEq)]
pub enum CombatAction {
    Attack,
    UseSkill(Skill),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnOutcome {
    /// Both sides still standing
    Ongoing,
    Victory { power_gain: u32 },
    Defeat,
    MutualDestruction,
}

impl TurnOutcome {
    pub fn is_over(&self) -> bool {
        !matches!(self, TurnOutcome::Ongoing)
    }

    pub fn player_died(&self) -> bool {
        matches!(self, TurnOutcome::Defeat | TurnOutcome::MutualDestruction)
    }
}

/// Everything a single turn produced.
#[derive(Debug, Clone, PartialEq)]
pub struct TurnReport {
    /// Damage dealt to the enemy
    pub player_damage: u32,
    /// Damage dealt to the player by the main exchange
    pub enemy_damage: u32,
    pub player_hp: u32,
    /// Player max hp at the start of the turn
    pub player_max_hp: u32,
    pub enemy_hp: u32,
    pub power_drained: u32,
    pub outcome: TurnOutcome,
    /// Narration lines in the order they happened
    pub log: Vec<String>,
}

impl TurnReport {
    /// Story-log entry for the turn.
    pub fn narration(&self) -> String {
        self.log.join("\n")
    }
}
