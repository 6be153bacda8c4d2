//! Achievement system types and data structures.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::rules::WorldView;

/// Achievement categories for organization in the browser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AchievementCategory {
    Journey,
    Combat,
    Gear,
    Discovery,
}

impl AchievementCategory {
    /// All categories in display order.
    pub const ALL: [AchievementCategory; 4] = [
        AchievementCategory::Journey,
        AchievementCategory::Combat,
        AchievementCategory::Gear,
        AchievementCategory::Discovery,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            AchievementCategory::Journey => "Journey",
            AchievementCategory::Combat => "Combat",
            AchievementCategory::Gear => "Gear",
            AchievementCategory::Discovery => "Discovery",
        }
    }
}

/// Unique identifier for each achievement. Persisted as the
/// SCREAMING_SNAKE_CASE key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AchievementId {
    // Journey
    Beginner,
    Creator,
    Saver,
    TheEnd,
    TimeTraveler,
    Archivist,
    Storyteller, // 10 story beats
    Versatile,   // 3 distinct classes
    // Combat
    Death,
    FirstBlood,
    Survivor,
    MutualDestruction,
    // Gear and power
    GearReady,         // base power 15
    EquipmentNovice,
    FullyEquipped,
    PowerOverwhelming, // total power 25
    LegendaryWarrior,  // total power 40
    // Discovery
    SecretHunter,
    Planeswalker, // hidden events in 2 worlds
    Cucumber,
}

impl AchievementId {
    /// Persisted key, e.g. `FIRST_BLOOD`.
    pub fn key(&self) -> String {
        serde_json::to_value(self)
            .ok()
            .and_then(|value| value.as_str().map(str::to_string))
            .unwrap_or_default()
    }

    /// Parses a persisted key; unknown keys yield `None`.
    pub fn from_key(key: &str) -> Option<AchievementId> {
        serde_json::from_value(serde_json::Value::String(key.to_string())).ok()
    }
}

#[derive(Debug, Clone)]
pub struct AchievementDef {
    pub id: AchievementId,
    pub name: &'static str,
    pub description: &'static str,
    pub category: AchievementCategory,
    pub secret: bool,
    pub icon: &'static str,
}

/// Unlocked achievements in unlock order. Append-only.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Achievements {
    unlocked: Vec<AchievementId>,
}

impl Achievements {
    pub fn is_unlocked(&self, id: AchievementId) -> bool {
        self.unlocked.contains(&id)
    }

    /// Returns true only when the id was not unlocked before.
    pub fn unlock(&mut self, id: AchievementId) -> bool {
        if self.is_unlocked(id) {
            return false;
        }
        self.unlocked.push(id);
        true
    }

    /// Unions in ids from elsewhere, returns the ones that were new.
    pub fn merge(&mut self, ids: impl IntoIterator<Item = AchievementId>) -> Vec<AchievementId> {
        ids.into_iter().filter(|id| self.unlock(*id)).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = AchievementId> + '_ {
        self.unlocked.iter().copied()
    }

    /// Persisted keys in unlock order.
    pub fn keys(&self) -> Vec<String> {
        self.unlocked.iter().map(AchievementId::key).collect()
    }

    pub fn total_count(&self) -> usize {
        use super::data::ALL_ACHIEVEMENTS;
        ALL_ACHIEVEMENTS.len()
    }

    pub fn unlocked_count(&self) -> usize {
        self.unlocked.len()
    }

    pub fn unlock_percentage(&self) -> f32 {
        let total = self.total_count();
        if total == 0 {
            return 0.0;
        }
        (self.unlocked_count() as f32 / total as f32) * 100.0
    }

    pub fn count_by_category(&self, category: AchievementCategory) -> (usize, usize) {
        use super::data::get_achievements_by_category;

        let defs = get_achievements_by_category(category);
        let unlocked = defs.iter().filter(|def| self.is_unlocked(def.id)).count();
        (unlocked, defs.len())
    }
}

/// Cross-run counters that feed the milestone achievements.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Milestones {
    /// Classes a game has been started with
    pub used_classes: BTreeSet<String>,
    /// Worlds where a hidden event has fired
    pub hidden_event_worlds: BTreeSet<WorldView>,
}

impl Milestones {
    /// Returns true when the class was new.
    pub fn record_class(&mut self, class: &str) -> bool {
        self.used_classes.insert(class.to_string())
    }

    /// Returns true when the world was new.
    pub fn record_hidden_event(&mut self, world: WorldView) -> bool {
        self.hidden_event_worlds.insert(world)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_achievement_unlock() {
        let mut achievements = Achievements::default();

        assert!(!achievements.is_unlocked(AchievementId::FirstBlood));
        assert!(achievements.unlock(AchievementId::FirstBlood));
        assert!(achievements.is_unlocked(AchievementId::FirstBlood));

        // Second unlock is a no-op
        assert!(!achievements.unlock(AchievementId::FirstBlood));
        assert_eq!(achievements.unlocked_count(), 1);
    }

    #[test]
    fn test_keys_match_persisted_format() {
        assert_eq!(AchievementId::FirstBlood.key(), "FIRST_BLOOD");
        assert_eq!(AchievementId::TheEnd.key(), "THE_END");
        assert_eq!(AchievementId::from_key("MUTUAL_DESTRUCTION"), Some(AchievementId::MutualDestruction));
        assert_eq!(AchievementId::from_key("NOT_A_THING"), None);
    }

    #[test]
    fn test_serializes_as_plain_array() {
        let mut achievements = Achievements::default();
        achievements.unlock(AchievementId::Beginner);
        achievements.unlock(AchievementId::Death);
        let json = serde_json::to_string(&achievements).unwrap();
        assert_eq!(json, r#"["BEGINNER","DEATH"]"#);
        let loaded: Achievements = serde_json::from_str(&json).unwrap();
        assert_eq!(loaded, achievements);
    }

    #[test]
    fn test_merge_returns_only_new_ids() {
        let mut achievements = Achievements::default();
        achievements.unlock(AchievementId::Saver);
        let added = achievements.merge([AchievementId::Saver, AchievementId::Cucumber]);
        assert_eq!(added, vec![AchievementId::Cucumber]);
        assert_eq!(achievements.unlocked_count(), 2);
    }

    #[test]
    fn test_unlock_percentage() {
        let mut achievements = Achievements::default();
        assert_eq!(achievements.unlock_percentage(), 0.0);
        achievements.unlock(AchievementId::Beginner);
        assert!((achievements.unlock_percentage() - 5.0).abs() < 0.01);
    }

    #[test]
    fn test_milestones_track_distinct_values() {
        let mut milestones = Milestones::default();
        assert!(milestones.record_class("Data Wizard"));
        assert!(!milestones.record_class("Data Wizard"));
        assert!(milestones.record_hidden_event(WorldView::SteampunkHorror));
        assert!(!milestones.record_hidden_event(WorldView::SteampunkHorror));
        assert_eq!(milestones.used_classes.len(), 1);
    }
}
