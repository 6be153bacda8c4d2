//! Power & synergy calculator.
//!
//! Everything here is recomputed from the character on every call. Nothing
//! is cached on the character, so equipment changes never leave stale
//! values behind.

use std::collections::HashSet;

use super::types::{Character, Skill};
use crate::rules::{Synergy, SynergyBonus, ALL_SYNERGIES};

/// Innate skills followed by equipment-granted ones (slot order), unique by id.
pub fn available_skills(character: &Character) -> Vec<Skill> {
    let granted = character
        .equipment
        .iter_equipped()
        .filter_map(|item| item.granted_skill.as_ref());

    let mut seen = HashSet::new();
    character
        .skills
        .iter()
        .chain(granted)
        .filter(|skill| seen.insert(skill.id.clone()))
        .cloned()
        .collect()
}

/// Synergies whose required skills are all currently available, in table order.
pub fn active_synergies(character: &Character) -> Vec<&'static Synergy> {
    let ids: HashSet<String> = available_skills(character)
        .into_iter()
        .map(|skill| skill.id)
        .collect();

    ALL_SYNERGIES
        .iter()
        .filter(|synergy| {
            synergy
                .required_skill_ids
                .iter()
                .all(|id| ids.contains(*id))
        })
        .collect()
}

/// Accumulated effect of every active synergy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SynergyBonuses {
    pub power_bonus: u32,
    /// Product of outgoing damage multipliers
    pub damage_modifier: f64,
    /// Product of incoming damage multipliers
    pub incoming_damage_modifier: f64,
    pub hp_regen: u32,
}

impl Default for SynergyBonuses {
    fn default() -> Self {
        Self {
            power_bonus: 0,
            damage_modifier: 1.0,
            incoming_damage_modifier: 1.0,
            hp_regen: 0,
        }
    }
}

impl SynergyBonuses {
    pub fn from_synergies<'a>(synergies: impl IntoIterator<Item = &'a Synergy>) -> Self {
        synergies
            .into_iter()
            .fold(Self::default(), |mut acc, synergy| {
                match synergy.bonus {
                    SynergyBonus::PowerBonus(value) => acc.power_bonus += value,
                    SynergyBonus::DamageModifier(value) => acc.damage_modifier *= value,
                    SynergyBonus::IncomingDamageModifier(value) => {
                        acc.incoming_damage_modifier *= value
                    }
                    SynergyBonus::HpRegenPerTurn(value) => acc.hp_regen += value,
                }
                acc
            })
    }
}

pub fn synergy_bonuses(character: &Character) -> SynergyBonuses {
    SynergyBonuses::from_synergies(active_synergies(character))
}

/// Base power + equipment bonuses + synergy power bonuses, saturating at
/// `u32::MAX`.
pub fn total_power(character: &Character) -> u32 {
    character
        .equipment
        .iter_equipped()
        .filter_map(|item| item.power_bonus)
        .fold(character.power, u32::saturating_add)
        .saturating_add(synergy_bonuses(character).power_bonus)
}

/// Synergies active in `after` that were not active in `before`.
pub fn newly_active_synergies(before: &Character, after: &Character) -> Vec<&'static Synergy> {
    let previous: HashSet<&str> = active_synergies(before).iter().map(|s| s.id).collect();
    active_synergies(after)
        .into_iter()
        .filter(|synergy| !previous.contains(synergy.id))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::equipment::{EquipmentSlot, Item};
    use crate::rules::{get_skill_def, WorldView};

    fn hacker(power: u32) -> Character {
        // Shadow Hacker: DATA_SPIKE, EVASIVE_MANEUVER, GHOST_PROTOCOL
        Character::new("Zero", "Shadow Hacker", "", WorldView::CyberpunkMythology, power)
    }

    fn item(slot: EquipmentSlot, bonus: Option<u32>, skill: Option<&str>) -> Item {
        Item {
            id: format!("test-{:?}", slot),
            name: "Test Gear".to_string(),
            description: String::new(),
            slot,
            world_view: WorldView::CyberpunkMythology,
            power_bonus: bonus,
            granted_skill: skill.and_then(get_skill_def).map(|def| def.to_skill()),
        }
    }

    #[test]
    fn test_available_skills_merges_equipment() {
        let mut c = hacker(10);
        c.equipment
            .equip(item(EquipmentSlot::Accessory, None, Some("OVERCLOCK")));
        let ids: Vec<String> = available_skills(&c).into_iter().map(|s| s.id).collect();
        assert_eq!(
            ids,
            vec!["DATA_SPIKE", "EVASIVE_MANEUVER", "GHOST_PROTOCOL", "OVERCLOCK"]
        );
    }

    #[test]
    fn test_available_skills_dedupes_by_id() {
        let mut c = hacker(10);
        c.equipment
            .equip(item(EquipmentSlot::Weapon, None, Some("DATA_SPIKE")));
        assert_eq!(available_skills(&c).len(), 3);
    }

    #[test]
    fn test_synergy_needs_every_skill() {
        let mut c = hacker(10);
        assert!(active_synergies(&c).is_empty());
        c.equipment
            .equip(item(EquipmentSlot::Accessory, None, Some("OVERCLOCK")));
        let active: Vec<&str> = active_synergies(&c).iter().map(|s| s.id).collect();
        assert_eq!(active, vec!["SYS_CRASH"]);
    }

    #[test]
    fn test_active_synergies_stable() {
        let mut c = hacker(10);
        c.equipment
            .equip(item(EquipmentSlot::Accessory, None, Some("OVERCLOCK")));
        assert_eq!(active_synergies(&c), active_synergies(&c));
    }

    #[test]
    fn test_unequipping_drops_granted_synergy() {
        let mut c = hacker(10);
        c.equipment
            .equip(item(EquipmentSlot::Accessory, None, Some("OVERCLOCK")));
        c.equipment.unequip(EquipmentSlot::Accessory);
        assert!(active_synergies(&c).is_empty());
    }

    #[test]
    fn test_total_power_adds_equipment_and_synergy_bonus() {
        // Cyber Samurai has ADRENALINE_RUSH; armor grants RADIOACTIVE_RAGE -> +5
        let mut c = Character::new("Kaia", "Cyber Samurai", "", WorldView::CyberpunkMythology, 12);
        assert_eq!(total_power(&c), 12);
        c.equipment.equip(item(EquipmentSlot::Weapon, Some(3), None));
        c.equipment
            .equip(item(EquipmentSlot::Armor, None, Some("RADIOACTIVE_RAGE")));
        assert_eq!(total_power(&c), 20);
        assert_eq!(c.power, 12);
    }

    #[test]
    fn test_total_power_monotonic_in_equipment_bonus() {
        let mut previous = 0;
        for bonus in 0..10 {
            let mut c = hacker(10);
            c.equipment.equip(item(EquipmentSlot::Weapon, Some(bonus), None));
            let total = total_power(&c);
            assert!(total >= previous);
            previous = total;
        }
    }

    #[test]
    fn test_total_power_saturates_on_huge_bonuses() {
        let mut c = hacker(12);
        c.equipment.equip(item(EquipmentSlot::Weapon, Some(u32::MAX), None));
        assert_eq!(total_power(&c), u32::MAX);

        c.equipment.equip(item(EquipmentSlot::Armor, Some(u32::MAX), None));
        c.equipment
            .equip(item(EquipmentSlot::Accessory, Some(u32::MAX), Some("OVERCLOCK")));
        assert_eq!(total_power(&c), u32::MAX);
    }

    #[test]
    fn test_synergy_bonuses_accumulate() {
        let bonuses = SynergyBonuses::from_synergies(crate::rules::ALL_SYNERGIES);
        assert_eq!(bonuses.power_bonus, 8);
        assert!((bonuses.damage_modifier - 1.3 * 1.25).abs() < 1e-9);
        assert!((bonuses.incoming_damage_modifier - 0.75).abs() < 1e-9);
        assert_eq!(bonuses.hp_regen, 4);
    }

    #[test]
    fn test_newly_active_synergies_diff() {
        let before = hacker(10);
        let mut after = before.clone();
        after
            .equipment
            .equip(item(EquipmentSlot::Accessory, None, Some("OVERCLOCK")));
        let new: Vec<&str> = newly_active_synergies(&before, &after)
            .iter()
            .map(|s| s.id)
            .collect();
        assert_eq!(new, vec!["SYS_CRASH"]);
        assert!(newly_active_synergies(&after, &after).is_empty());
    }
}
