//! Achievement rules: which events unlock what.
//!
//! The predicates are pure. `Achievements::record` applies them and reports
//! only the ids that were actually new, so re-triggering a satisfied
//! condition never duplicates anything.

use super::types::{AchievementId, Achievements};
use crate::character::{total_power, Character, Item};
use crate::combat::{is_narrow_escape, TurnOutcome, TurnReport};
use crate::core::constants::*;

/// Something that happened in a session that achievements care about.
#[derive(Debug, Clone, Copy)]
pub enum GameEvent<'a> {
    /// A new run began; `distinct_classes` counts every class ever played
    GameStarted { distinct_classes: usize },
    TemplateSaved,
    ManualSave,
    StoryEnded,
    SaveLoaded,
    DataExported,
    EquipmentAcquired { item: &'a Item, equipment_full: bool },
    /// Base power, equipment or skills changed
    CharacterChanged { character: &'a Character },
    /// A hidden event fired; `distinct_worlds` counts worlds with one
    HiddenEventFound { distinct_worlds: usize },
    CombatResolved { report: &'a TurnReport },
    /// Story log length after a choice line was appended
    StoryBeat { story_len: usize },
}

/// Achievements whose condition the event satisfies, in unlock order.
pub fn triggered_by(event: &GameEvent) -> Vec<AchievementId> {
    let mut ids = Vec::new();
    match event {
        GameEvent::GameStarted { distinct_classes } => {
            ids.push(AchievementId::Beginner);
            if *distinct_classes >= VERSATILE_CLASSES {
                ids.push(AchievementId::Versatile);
            }
        }
        GameEvent::TemplateSaved => ids.push(AchievementId::Creator),
        GameEvent::ManualSave => ids.push(AchievementId::Saver),
        GameEvent::StoryEnded => ids.push(AchievementId::TheEnd),
        GameEvent::SaveLoaded => ids.push(AchievementId::TimeTraveler),
        GameEvent::DataExported => ids.push(AchievementId::Archivist),
        GameEvent::EquipmentAcquired {
            item,
            equipment_full,
        } => {
            ids.push(AchievementId::EquipmentNovice);
            if *equipment_full {
                ids.push(AchievementId::FullyEquipped);
            }
            if item.id == CUCUMBER_ITEM_ID {
                ids.push(AchievementId::Cucumber);
            }
        }
        GameEvent::CharacterChanged { character } => {
            if character.power >= GEAR_READY_POWER {
                ids.push(AchievementId::GearReady);
            }
            let total = total_power(character);
            if total >= POWER_OVERWHELMING_TOTAL {
                ids.push(AchievementId::PowerOverwhelming);
            }
            if total >= LEGENDARY_WARRIOR_TOTAL {
                ids.push(AchievementId::LegendaryWarrior);
            }
        }
        GameEvent::HiddenEventFound { distinct_worlds } => {
            ids.push(AchievementId::SecretHunter);
            if *distinct_worlds >= PLANESWALKER_WORLDS {
                ids.push(AchievementId::Planeswalker);
            }
        }
        GameEvent::CombatResolved { report } => match report.outcome {
            TurnOutcome::MutualDestruction => {
                ids.push(AchievementId::Death);
                ids.push(AchievementId::MutualDestruction);
            }
            TurnOutcome::Defeat => ids.push(AchievementId::Death),
            TurnOutcome::Victory { .. } => {
                ids.push(AchievementId::FirstBlood);
                if is_narrow_escape(report.player_hp, report.player_max_hp) {
                    ids.push(AchievementId::Survivor);
                }
            }
            TurnOutcome::Ongoing => {}
        },
        GameEvent::StoryBeat { story_len } => {
            if story_len.div_ceil(2) >= STORYTELLER_BEATS {
                ids.push(AchievementId::Storyteller);
            }
        }
    }
    ids
}

impl Achievements {
    /// Evaluates an event and unlocks what it earns. Returns the newly
    /// unlocked ids only.
    pub fn record(&mut self, event: &GameEvent) -> Vec<AchievementId> {
        triggered_by(event)
            .into_iter()
            .filter(|id| self.unlock(*id))
            .collect()
    }
}
