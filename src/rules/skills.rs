//! Skill table, combat effect families and class starting skills.

use serde::{Deserialize, Serialize};

use crate::character::Skill;

/// How a skill behaves when used as a combat action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillEffect {
    /// Hits harder than a basic attack
    Heavy,
    /// Overcharged hit, the strongest multiplier
    Burst,
    /// Halves incoming damage at the cost of some outgoing damage
    Defensive,
    /// Chance to avoid the enemy's hit entirely
    Evasive,
    /// Same as a basic attack
    Plain,
}

impl SkillEffect {
    pub fn name(&self) -> &'static str {
        match self {
            SkillEffect::Heavy => "Heavy",
            SkillEffect::Burst => "Burst",
            SkillEffect::Defensive => "Defensive",
            SkillEffect::Evasive => "Evasive",
            SkillEffect::Plain => "Plain",
        }
    }

    /// Best-effort family for skills authored outside the table (narrated
    /// equipment). Families are checked in order heavy, burst, defensive,
    /// evasive; the first keyword hit wins.
    pub fn classify(name: &str) -> SkillEffect {
        let name = name.to_lowercase();
        let families: [(SkillEffect, &[&str]); 4] = [
            (SkillEffect::Heavy, HEAVY_KEYWORDS),
            (SkillEffect::Burst, BURST_KEYWORDS),
            (SkillEffect::Defensive, DEFENSIVE_KEYWORDS),
            (SkillEffect::Evasive, EVASIVE_KEYWORDS),
        ];
        families
            .into_iter()
            .find(|(_, keywords)| keywords.iter().any(|k| name.contains(k)))
            .map(|(effect, _)| effect)
            .unwrap_or(SkillEffect::Plain)
    }
}

const HEAVY_KEYWORDS: &[&str] = &[
    "strike", "slash", "blast", "shot", "spike", "wrench", "potion", "gear", "flame", "smash",
];
const BURST_KEYWORDS: &[&str] = &[
    "adrenaline", "overclock", "serum", "bomb", "rage", "fury", "injection",
];
const DEFENSIVE_KEYWORDS: &[&str] = &[
    "defens", "shield", "chassis", "armor", "hide", "guard", "barrier",
];
const EVASIVE_KEYWORDS: &[&str] = &["evasive", "evade", "dodge", "ghost", "phantom"];

/// Static definition of a skill.
#[derive(Debug, Clone, Copy)]
pub struct SkillDef {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub effect: SkillEffect,
}

impl SkillDef {
    pub fn to_skill(&self) -> Skill {
        Skill {
            id: self.id.to_string(),
            name: self.name.to_string(),
            description: self.description.to_string(),
            effect: Some(self.effect),
        }
    }
}

pub static ALL_SKILLS: &[SkillDef] = &[
    // Cyber Samurai
    SkillDef {
        id: "STRONG_STRIKE",
        name: "Power Slash",
        description: "Spend a little stamina on a much heavier blow.",
        effect: SkillEffect::Heavy,
    },
    SkillDef {
        id: "DEFENSIVE_STANCE",
        name: "Defensive Stance",
        description: "Brace to soften the next hit, at the cost of some attack power.",
        effect: SkillEffect::Defensive,
    },
    SkillDef {
        id: "ADRENALINE_RUSH",
        name: "Adrenaline Rush",
        description: "Flood the body with combat stimulants for a short, violent surge.",
        effect: SkillEffect::Burst,
    },
    // Data Wizard
    SkillDef {
        id: "FIREWALL_BLAST",
        name: "Firewall Blast",
        description: "Release a wave of hostile data that can short out the target.",
        effect: SkillEffect::Heavy,
    },
    SkillDef {
        id: "ENCRYPTION_SHIELD",
        name: "Encryption Shield",
        description: "Weave a lattice of encrypted data to turn attacks aside.",
        effect: SkillEffect::Defensive,
    },
    SkillDef {
        id: "OVERCLOCK",
        name: "Overclock",
        description: "Push the processor past its limits for one devastating strike.",
        effect: SkillEffect::Burst,
    },
    // Shadow Hacker
    SkillDef {
        id: "DATA_SPIKE",
        name: "Data Spike",
        description: "Inject malicious code straight into the enemy's systems.",
        effect: SkillEffect::Heavy,
    },
    SkillDef {
        id: "EVASIVE_MANEUVER",
        name: "Evasive Maneuver",
        description: "Use cover and decoys to slip out of harm's way.",
        effect: SkillEffect::Evasive,
    },
    SkillDef {
        id: "GHOST_PROTOCOL",
        name: "Ghost Protocol",
        description: "Vanish from enemy sensors and line up a surprise attack.",
        effect: SkillEffect::Evasive,
    },
    // Wasteland Ranger
    SkillDef {
        id: "SNIPER_SHOT",
        name: "Sniper Shot",
        description: "Take careful aim at a weak point for a high-damage shot.",
        effect: SkillEffect::Heavy,
    },
    SkillDef {
        id: "TRAP",
        name: "Set Trap",
        description: "Rig the battlefield with a snare that wounds and pins.",
        effect: SkillEffect::Plain,
    },
    SkillDef {
        id: "SURVIVAL_INSTINCT",
        name: "Survival Instinct",
        description: "Wasteland experience reveals openings in the enemy's guard.",
        effect: SkillEffect::Plain,
    },
    // Machine Monk
    SkillDef {
        id: "SYSTEM_SHOCK_PALM",
        name: "System Shock Palm",
        description: "Drive an electromagnetic pulse into the enemy's body.",
        effect: SkillEffect::Plain,
    },
    SkillDef {
        id: "REINFORCED_CHASSIS",
        name: "Reinforced Chassis",
        description: "Harden the frame to shrug off incoming blows.",
        effect: SkillEffect::Defensive,
    },
    SkillDef {
        id: "ENERGY_CYCLE",
        name: "Energy Cycle",
        description: "Convert part of the damage taken into usable energy.",
        effect: SkillEffect::Plain,
    },
    // Clockwork Artificer
    SkillDef {
        id: "OVERDRIVE_WRENCH",
        name: "Overdrive Wrench",
        description: "Smash the target with an energy-charged wrench.",
        effect: SkillEffect::Heavy,
    },
    SkillDef {
        id: "SCRAP_ARMOR",
        name: "Scrap Armor",
        description: "Bolt salvaged plating over vulnerable spots.",
        effect: SkillEffect::Defensive,
    },
    SkillDef {
        id: "CLOCKWORK_BOMB",
        name: "Clockwork Bomb",
        description: "Lob an unstable clockwork explosive.",
        effect: SkillEffect::Burst,
    },
    // Uncanny Physician
    SkillDef {
        id: "INJECT_SERUM",
        name: "Inject Serum",
        description: "Inject an unstable serum that supercharges the next attack.",
        effect: SkillEffect::Burst,
    },
    SkillDef {
        id: "ANALYSIS_WEAKNESS",
        name: "Analyze Weakness",
        description: "Study the enemy for a moment to make every hit count.",
        effect: SkillEffect::Plain,
    },
    SkillDef {
        id: "TOXIC_CONCOCTION",
        name: "Toxic Potion",
        description: "Hurl a flask of corrosive poison.",
        effect: SkillEffect::Heavy,
    },
    // Brass Inquisitor
    SkillDef {
        id: "JUDGEMENT_GEAR",
        name: "Judgement Gear",
        description: "Cast a consecrated gear to pass judgement on the foe.",
        effect: SkillEffect::Heavy,
    },
    SkillDef {
        id: "STEAM_SHIELD",
        name: "Steam Shield",
        description: "Vent high-pressure steam into a protective screen.",
        effect: SkillEffect::Defensive,
    },
    SkillDef {
        id: "PURIFYING_FLAME",
        name: "Purifying Flame",
        description: "Burn the enemy with alchemically blended fire.",
        effect: SkillEffect::Heavy,
    },
    // Mutant Berserker
    SkillDef {
        id: "RADIOACTIVE_RAGE",
        name: "Radioactive Rage",
        description: "Sink into a radiation-fuelled frenzy.",
        effect: SkillEffect::Burst,
    },
    SkillDef {
        id: "SAVAGE_STRIKE",
        name: "Savage Strike",
        description: "A raw, reckless blow with everything behind it.",
        effect: SkillEffect::Heavy,
    },
    SkillDef {
        id: "TOUGH_HIDE",
        name: "Tough Hide",
        description: "Mutated skin that turns blades like leather armor.",
        effect: SkillEffect::Defensive,
    },
    // Equipment-only skills
    SkillDef {
        id: "TARGETING_STRIKE",
        name: "Targeting Strike",
        description: "Let the targeting assist pick the weak point.",
        effect: SkillEffect::Heavy,
    },
    SkillDef {
        id: "AEGIS_SHIELD",
        name: "Aegis Field",
        description: "Project a powerful energy barrier.",
        effect: SkillEffect::Defensive,
    },
    SkillDef {
        id: "FURY_INJECTION",
        name: "Fury Injection",
        description: "A potent injection that floods the muscles with strength.",
        effect: SkillEffect::Burst,
    },
];

pub fn get_skill_def(id: &str) -> Option<&'static SkillDef> {
    ALL_SKILLS.iter().find(|def| def.id == id)
}

/// Skill ids each class starts with.
pub fn class_skill_ids(class: &str) -> &'static [&'static str] {
    match class {
        "Cyber Samurai" => &["STRONG_STRIKE", "DEFENSIVE_STANCE", "ADRENALINE_RUSH"],
        "Data Wizard" => &["FIREWALL_BLAST", "ENCRYPTION_SHIELD", "OVERCLOCK"],
        "Shadow Hacker" => &["DATA_SPIKE", "EVASIVE_MANEUVER", "GHOST_PROTOCOL"],
        "Wasteland Ranger" => &["SNIPER_SHOT", "TRAP", "SURVIVAL_INSTINCT"],
        "Machine Monk" => &["SYSTEM_SHOCK_PALM", "REINFORCED_CHASSIS", "ENERGY_CYCLE"],
        "Clockwork Artificer" => &["OVERDRIVE_WRENCH", "SCRAP_ARMOR", "CLOCKWORK_BOMB"],
        "Uncanny Physician" => &["INJECT_SERUM", "ANALYSIS_WEAKNESS", "TOXIC_CONCOCTION"],
        "Brass Inquisitor" => &["JUDGEMENT_GEAR", "STEAM_SHIELD", "PURIFYING_FLAME"],
        "Mutant Berserker" => &["RADIOACTIVE_RAGE", "SAVAGE_STRIKE", "TOUGH_HIDE"],
        _ => &[],
    }
}

/// Starting skills for a class; unknown classes start with none.
pub fn starting_skills(class: &str) -> Vec<Skill> {
    class_skill_ids(class)
        .iter()
        .filter_map(|id| get_skill_def(id))
        .map(SkillDef::to_skill)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::worlds::WorldView;
    use std::collections::HashSet;

    #[test]
    fn test_skill_ids_unique() {
        let ids: HashSet<_> = ALL_SKILLS.iter().map(|def| def.id).collect();
        assert_eq!(ids.len(), ALL_SKILLS.len());
    }

    #[test]
    fn test_every_class_has_three_known_skills() {
        for world in WorldView::ALL {
            for class in world.classes() {
                let skills = starting_skills(class);
                assert_eq!(skills.len(), 3, "{} should start with 3 skills", class);
            }
        }
    }

    #[test]
    fn test_unknown_class_has_no_skills() {
        assert!(starting_skills("Accountant").is_empty());
    }

    #[test]
    fn test_table_effects_agree_with_keywords_where_names_carry_them() {
        // Tagged table entries are authoritative; keyword classification is
        // only a fallback, but the table names should not contradict it.
        for def in ALL_SKILLS {
            let guessed = SkillEffect::classify(def.name);
            if guessed != SkillEffect::Plain {
                assert_eq!(guessed, def.effect, "{}", def.id);
            }
        }
    }

    #[test]
    fn test_classify_keyword_families() {
        assert_eq!(SkillEffect::classify("Monofilament Strike"), SkillEffect::Heavy);
        assert_eq!(SkillEffect::classify("Berserk Rage"), SkillEffect::Burst);
        assert_eq!(SkillEffect::classify("Brass Shield"), SkillEffect::Defensive);
        assert_eq!(SkillEffect::classify("Phantom Step"), SkillEffect::Evasive);
        assert_eq!(SkillEffect::classify("Target Analysis"), SkillEffect::Plain);
    }

    #[test]
    fn test_classify_heavy_wins_over_later_families() {
        // "Shield Smash" hits both heavy and defensive keywords.
        assert_eq!(SkillEffect::classify("Shield Smash"), SkillEffect::Heavy);
    }
}
