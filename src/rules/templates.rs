//! Templates offered before the player has saved any of their own.

use crate::character::CharacterTemplate;

use super::skills::starting_skills;

struct TemplateSeed {
    id: &'static str,
    name: &'static str,
    class: &'static str,
    backstory: &'static str,
    power: u32,
}

const DEFAULT_TEMPLATE_SEEDS: [TemplateSeed; 3] = [
    TemplateSeed {
        id: "default-1",
        name: "Zero",
        class: "Shadow Hacker",
        backstory: "Raised in the neon-soaked underbelly of the city, Zero rides the data sea through an implanted 'ghost' interface. He ran jobs for the Faceless until one went wrong and made him the target.",
        power: 10,
    },
    TemplateSeed {
        id: "default-2",
        name: "Kaia",
        class: "Cyber Samurai",
        backstory: "Once an elite guard of the Amakumo megacorp, more than sixty percent of her body is tactical prosthetics. Betrayed and left for dead, she walks the ronin's road in search of lost honour and the ones who sold her out.",
        power: 12,
    },
    TemplateSeed {
        id: "default-3",
        name: "Maya",
        class: "Wasteland Ranger",
        backstory: "Born in the irradiated waste after the Collapse, Maya survives with her mechanical falcon Steeleye. She knows every forgotten mile of the land and guards a secret about an oasis from the old world.",
        power: 8,
    },
];

/// The three stock templates, with their class starting skills.
pub fn default_templates() -> Vec<CharacterTemplate> {
    DEFAULT_TEMPLATE_SEEDS
        .iter()
        .map(|seed| CharacterTemplate {
            id: seed.id.to_string(),
            name: seed.name.to_string(),
            class: seed.class.to_string(),
            backstory: seed.backstory.to_string(),
            power: seed.power,
            skills: starting_skills(seed.class),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::worlds::world_of_class;

    #[test]
    fn test_default_templates_are_playable() {
        let templates = default_templates();
        assert_eq!(templates.len(), 3);
        for template in &templates {
            assert!(world_of_class(&template.class).is_some());
            assert_eq!(template.skills.len(), 3);
            assert!(template.backstory.chars().count() >= 20);
        }
    }
}
