//! Session lifecycle phases and the transient run state.

use crate::character::Character;
use crate::combat::{CombatEncounter, TurnReport};
use crate::rules::WorldView;

/// Where the session currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GamePhase {
    Welcome,
    WorldSelection,
    CharacterCreation,
    Playing,
    Combat,
    Ended,
    Dead,
    Error,
    LoadGame,
    Achievements,
}

impl GamePhase {
    pub fn name(&self) -> &'static str {
        match self {
            GamePhase::Welcome => "welcome",
            GamePhase::WorldSelection => "world_selection",
            GamePhase::CharacterCreation => "character_creation",
            GamePhase::Playing => "playing",
            GamePhase::Combat => "combat",
            GamePhase::Ended => "ended",
            GamePhase::Dead => "dead",
            GamePhase::Error => "error",
            GamePhase::LoadGame => "load_game",
            GamePhase::Achievements => "achievements",
        }
    }

    /// Only a reset leaves these.
    pub fn is_terminal(&self) -> bool {
        matches!(self, GamePhase::Ended | GamePhase::Dead | GamePhase::Error)
    }
}

/// Everything a reset throws away.
#[derive(Debug, Clone, Default)]
pub struct SessionContext {
    pub world: Option<WorldView>,
    pub character: Option<Character>,
    /// Narration, choice lines and combat logs in order
    pub story: Vec<String>,
    pub choices: Vec<String>,
    pub encounter: Option<CombatEncounter>,
    /// Most recent turn of the current encounter
    pub last_turn: Option<TurnReport>,
    pub error: Option<String>,
}

impl SessionContext {
    /// Fresh context for a new run with `character`.
    pub fn for_character(character: Character) -> Self {
        Self {
            world: Some(character.world_view),
            character: Some(character),
            ..Self::default()
        }
    }

    /// A won fight that has not been continued from yet.
    pub fn pending_victory(&self) -> Option<u32> {
        match self.last_turn.as_ref().map(|t| t.outcome) {
            Some(crate::combat::TurnOutcome::Victory { power_gain }) => Some(power_gain),
            _ => None,
        }
    }
}
