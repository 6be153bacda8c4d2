//! Static achievement definitions.

use super::types::{AchievementCategory, AchievementDef, AchievementId};

/// All achievement definitions in display order.
pub const ALL_ACHIEVEMENTS: &[AchievementDef] = &[
    // ═══════════════════════════════════════════════════════════════
    // JOURNEY
    // ═══════════════════════════════════════════════════════════════
    AchievementDef {
        id: AchievementId::Beginner,
        name: "First Steps",
        description: "Begin your first adventure.",
        category: AchievementCategory::Journey,
        secret: false,
        icon: "🌱",
    },
    AchievementDef {
        id: AchievementId::Creator,
        name: "Character Creator",
        description: "Save a custom character template.",
        category: AchievementCategory::Journey,
        secret: false,
        icon: "📝",
    },
    AchievementDef {
        id: AchievementId::Saver,
        name: "Rainy Day Fund",
        description: "Save your progress by hand.",
        category: AchievementCategory::Journey,
        secret: false,
        icon: "💾",
    },
    AchievementDef {
        id: AchievementId::TheEnd,
        name: "An Ending",
        description: "Reach one of the story's endings.",
        category: AchievementCategory::Journey,
        secret: false,
        icon: "🏁",
    },
    AchievementDef {
        id: AchievementId::TimeTraveler,
        name: "Time Traveler",
        description: "Load an old save.",
        category: AchievementCategory::Journey,
        secret: false,
        icon: "⏳",
    },
    AchievementDef {
        id: AchievementId::Archivist,
        name: "Archivist",
        description: "Export your game data.",
        category: AchievementCategory::Journey,
        secret: false,
        icon: "📦",
    },
    AchievementDef {
        id: AchievementId::Storyteller,
        name: "Storyteller",
        description: "Advance through 10 story beats in a single adventure.",
        category: AchievementCategory::Journey,
        secret: false,
        icon: "📖",
    },
    AchievementDef {
        id: AchievementId::Versatile,
        name: "Versatile",
        description: "Start new games with three different classes.",
        category: AchievementCategory::Journey,
        secret: false,
        icon: "🎭",
    },
    // ═══════════════════════════════════════════════════════════════
    // COMBAT
    // ═══════════════════════════════════════════════════════════════
    AchievementDef {
        id: AchievementId::Death,
        name: "The End of the Line",
        description: "Fall in battle.",
        category: AchievementCategory::Combat,
        secret: false,
        icon: "💀",
    },
    AchievementDef {
        id: AchievementId::FirstBlood,
        name: "First Blood",
        description: "Win your first fight.",
        category: AchievementCategory::Combat,
        secret: false,
        icon: "⚔️",
    },
    AchievementDef {
        id: AchievementId::Survivor,
        name: "Survivor",
        description: "Win a fight with a tenth of your HP or less remaining.",
        category: AchievementCategory::Combat,
        secret: false,
        icon: "🩹",
    },
    AchievementDef {
        id: AchievementId::MutualDestruction,
        name: "Mutual Destruction",
        description: "Take your enemy down with you.",
        category: AchievementCategory::Combat,
        secret: false,
        icon: "☠️",
    },
    // ═══════════════════════════════════════════════════════════════
    // GEAR
    // ═══════════════════════════════════════════════════════════════
    AchievementDef {
        id: AchievementId::GearReady,
        name: "Gear Ready",
        description: "Reach 15 base power.",
        category: AchievementCategory::Gear,
        secret: false,
        icon: "🛡️",
    },
    AchievementDef {
        id: AchievementId::EquipmentNovice,
        name: "Armed",
        description: "Equip your first item.",
        category: AchievementCategory::Gear,
        secret: false,
        icon: "🗡️",
    },
    AchievementDef {
        id: AchievementId::FullyEquipped,
        name: "Fully Equipped",
        description: "Fill the weapon, armor and accessory slots.",
        category: AchievementCategory::Gear,
        secret: false,
        icon: "🧰",
    },
    AchievementDef {
        id: AchievementId::PowerOverwhelming,
        name: "Proof of Power",
        description: "Reach 25 total power.",
        category: AchievementCategory::Gear,
        secret: false,
        icon: "💪",
    },
    AchievementDef {
        id: AchievementId::LegendaryWarrior,
        name: "Legendary Warrior",
        description: "Reach 40 total power.",
        category: AchievementCategory::Gear,
        secret: false,
        icon: "👑",
    },
    // ═══════════════════════════════════════════════════════════════
    // DISCOVERY
    // ═══════════════════════════════════════════════════════════════
    AchievementDef {
        id: AchievementId::SecretHunter,
        name: "Secret Hunter",
        description: "Trigger one of a world's hidden events.",
        category: AchievementCategory::Discovery,
        secret: true,
        icon: "🔍",
    },
    AchievementDef {
        id: AchievementId::Planeswalker,
        name: "Planeswalker",
        description: "Find hidden events in at least two different worlds.",
        category: AchievementCategory::Discovery,
        secret: true,
        icon: "🌌",
    },
    AchievementDef {
        id: AchievementId::Cucumber,
        name: "Cucumber",
        description: "You found a... cucumber?",
        category: AchievementCategory::Discovery,
        secret: true,
        icon: "🥒",
    },
];

/// Get the definition for an achievement.
pub fn get_achievement_def(id: AchievementId) -> Option<&'static AchievementDef> {
    ALL_ACHIEVEMENTS.iter().find(|a| a.id == id)
}

/// Get achievements filtered by category.
pub fn get_achievements_by_category(category: AchievementCategory) -> Vec<&'static AchievementDef> {
    ALL_ACHIEVEMENTS
        .iter()
        .filter(|a| a.category == category)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_every_achievement_defined_once() {
        let ids: HashSet<_> = ALL_ACHIEVEMENTS.iter().map(|a| a.id).collect();
        assert_eq!(ids.len(), ALL_ACHIEVEMENTS.len());
        assert_eq!(ALL_ACHIEVEMENTS.len(), 20);
    }

    #[test]
    fn test_categories_cover_everything() {
        let total: usize = AchievementCategory::ALL
            .iter()
            .map(|c| get_achievements_by_category(*c).len())
            .sum();
        assert_eq!(total, ALL_ACHIEVEMENTS.len());
    }

    #[test]
    fn test_lookup() {
        let def = get_achievement_def(AchievementId::Cucumber).unwrap();
        assert!(def.secret);
        assert_eq!(def.category, AchievementCategory::Discovery);
    }
}
