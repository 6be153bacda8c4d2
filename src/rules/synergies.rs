//! Skill synergy table.

/// Bonus granted while a synergy is active.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SynergyBonus {
    /// Flat addition to total power
    PowerBonus(u32),
    /// Multiplier on outgoing damage
    DamageModifier(f64),
    /// Multiplier on damage taken
    IncomingDamageModifier(f64),
    /// Hp restored after every combat turn
    HpRegenPerTurn(u32),
}

impl SynergyBonus {
    pub fn describe(&self) -> String {
        match self {
            SynergyBonus::PowerBonus(value) => format!("+{} power", value),
            SynergyBonus::DamageModifier(value) => {
                format!("+{:.0}% damage", (value - 1.0) * 100.0)
            }
            SynergyBonus::IncomingDamageModifier(value) => {
                format!("-{:.0}% damage taken", (1.0 - value) * 100.0)
            }
            SynergyBonus::HpRegenPerTurn(value) => format!("+{} hp per turn", value),
        }
    }
}

/// A bonus that switches on while every required skill is available.
#[derive(Debug, Clone, PartialEq)]
pub struct Synergy {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub required_skill_ids: &'static [&'static str],
    pub bonus: SynergyBonus,
}

pub static ALL_SYNERGIES: &[Synergy] = &[
    Synergy {
        id: "SYS_CRASH",
        name: "System Crash",
        description: "Your data attacks become devastating.",
        required_skill_ids: &["DATA_SPIKE", "OVERCLOCK"],
        bonus: SynergyBonus::DamageModifier(1.3),
    },
    Synergy {
        id: "IMPROV_FORTRESS",
        name: "Improvised Fortress",
        description: "Layered defensive tricks make you very hard to hurt.",
        required_skill_ids: &["DEFENSIVE_STANCE", "SCRAP_ARMOR"],
        bonus: SynergyBonus::IncomingDamageModifier(0.75),
    },
    Synergy {
        id: "BERSERKER_FURY",
        name: "Berserker Fury",
        description: "Chemicals and raw anger turn you into pure destruction.",
        required_skill_ids: &["RADIOACTIVE_RAGE", "ADRENALINE_RUSH"],
        bonus: SynergyBonus::PowerBonus(5),
    },
    Synergy {
        id: "TACTICAL_SUPERIORITY",
        name: "Tactical Superiority",
        description: "Precise analysis and lethal aim let you own the battlefield.",
        required_skill_ids: &["SNIPER_SHOT", "ANALYSIS_WEAKNESS"],
        bonus: SynergyBonus::DamageModifier(1.25),
    },
    Synergy {
        id: "UNBREAKABLE_WILL",
        name: "Unbreakable Will",
        description: "Stubborn instinct and a hardened frame keep you on your feet.",
        required_skill_ids: &["SURVIVAL_INSTINCT", "REINFORCED_CHASSIS"],
        bonus: SynergyBonus::HpRegenPerTurn(4),
    },
    Synergy {
        id: "HOLY_INFERNO",
        name: "Holy Inferno",
        description: "Sacred judgement and purifying fire burn away all that is unclean.",
        required_skill_ids: &["JUDGEMENT_GEAR", "PURIFYING_FLAME"],
        bonus: SynergyBonus::PowerBonus(3),
    },
];

pub fn get_synergy(id: &str) -> Option<&'static Synergy> {
    ALL_SYNERGIES.iter().find(|synergy| synergy.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::skills::get_skill_def;

    #[test]
    fn test_required_skills_exist() {
        for synergy in ALL_SYNERGIES {
            for id in synergy.required_skill_ids {
                assert!(get_skill_def(id).is_some(), "{} needs {}", synergy.id, id);
            }
        }
    }

    #[test]
    fn test_bonus_descriptions() {
        assert_eq!(SynergyBonus::PowerBonus(5).describe(), "+5 power");
        assert_eq!(SynergyBonus::DamageModifier(1.3).describe(), "+30% damage");
        assert_eq!(
            SynergyBonus::IncomingDamageModifier(0.75).describe(),
            "-25% damage taken"
        );
        assert_eq!(SynergyBonus::HpRegenPerTurn(4).describe(), "+4 hp per turn");
    }

    #[test]
    fn test_get_synergy() {
        assert_eq!(get_synergy("HOLY_INFERNO").map(|s| s.name), Some("Holy Inferno"));
        assert!(get_synergy("NOPE").is_none());
    }
}
