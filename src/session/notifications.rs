//! Events the session emits for a presentation layer to show and expire.

use crate::achievements::{get_achievement_def, AchievementId};
use crate::character::EquipmentSlot;
use crate::rules::{RandomEvent, Synergy};

#[derive(Debug, Clone, PartialEq)]
pub enum Notification {
    AchievementUnlocked {
        id: AchievementId,
    },
    SynergyActivated {
        name: &'static str,
        bonus: String,
    },
    ItemAcquired {
        name: String,
        slot: EquipmentSlot,
        /// Name of the item that was in the slot before
        replaced: Option<String>,
    },
    PowerGained {
        amount: i32,
        power: u32,
    },
    RandomEvent {
        description: &'static str,
        power_effect: i32,
    },
    Info(String),
    Failure(String),
}

impl Notification {
    pub fn synergy(synergy: &Synergy) -> Self {
        Notification::SynergyActivated {
            name: synergy.name,
            bonus: synergy.bonus.describe(),
        }
    }

    pub fn random_event(event: &RandomEvent) -> Self {
        Notification::RandomEvent {
            description: event.description,
            power_effect: event.power_effect,
        }
    }

    pub fn title(&self) -> String {
        match self {
            Notification::AchievementUnlocked { .. } => "Achievement unlocked".to_string(),
            Notification::SynergyActivated { .. } => "Synergy activated".to_string(),
            Notification::ItemAcquired { .. } => "New equipment".to_string(),
            Notification::PowerGained { amount, .. } if *amount < 0 => "Power lost".to_string(),
            Notification::PowerGained { .. } => "Power gained".to_string(),
            Notification::RandomEvent { .. } => "Random event".to_string(),
            Notification::Info(_) => "Info".to_string(),
            Notification::Failure(_) => "Something went wrong".to_string(),
        }
    }

    pub fn message(&self) -> String {
        match self {
            Notification::AchievementUnlocked { id } => match get_achievement_def(*id) {
                Some(def) => format!("{}: {}", def.name, def.description),
                None => id.key(),
            },
            Notification::SynergyActivated { name, bonus } => format!("{} ({})", name, bonus),
            Notification::ItemAcquired {
                name,
                slot,
                replaced: Some(old),
            } => format!("{} equipped as {}, replacing {}.", name, slot.name(), old),
            Notification::ItemAcquired { name, slot, .. } => {
                format!("{} equipped as {}.", name, slot.name())
            }
            Notification::PowerGained { amount, power } => {
                format!("Base power {:+} (now {}).", amount, power)
            }
            Notification::RandomEvent {
                description,
                power_effect,
            } => format!("{} ({:+} power)", description, power_effect),
            Notification::Info(message) | Notification::Failure(message) => message.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_message_names_replaced_item() {
        let n = Notification::ItemAcquired {
            name: "Plasma Katana".to_string(),
            slot: EquipmentSlot::Weapon,
            replaced: Some("Rusty Pipe".to_string()),
        };
        assert!(n.message().contains("replacing Rusty Pipe"));
    }

    #[test]
    fn test_power_loss_title() {
        let n = Notification::PowerGained {
            amount: -2,
            power: 9,
        };
        assert_eq!(n.title(), "Power lost");
        assert_eq!(n.message(), "Base power -2 (now 9).");
    }

    #[test]
    fn test_achievement_message_uses_definition() {
        let n = Notification::AchievementUnlocked {
            id: AchievementId::Beginner,
        };
        let def = get_achievement_def(AchievementId::Beginner).unwrap();
        assert!(n.message().starts_with(def.name));
    }
}
