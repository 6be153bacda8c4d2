//! Character creation form, validation and stat rolling.

use rand::Rng;

use super::types::{Character, CharacterTemplate};
use crate::core::constants::{
    BASE_POWER, BASE_POWER_ROLL_SPREAD, MIN_BACKSTORY_CHARS, TEMPLATE_POWER,
};
use crate::core::ValidationError;
use crate::rules::{starting_skills, WorldView};

/// What the player fills in on the creation screen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CharacterForm {
    pub name: String,
    pub class: String,
    pub backstory: String,
}

impl CharacterForm {
    pub fn new(name: &str, class: &str, backstory: &str) -> Self {
        Self {
            name: name.to_string(),
            class: class.to_string(),
            backstory: backstory.to_string(),
        }
    }

    /// Prefill from a saved template.
    pub fn from_template(template: &CharacterTemplate) -> Self {
        Self::new(&template.name, &template.class, &template.backstory)
    }

    /// Checks the form against the chosen world.
    pub fn validate(&self, world: WorldView) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyName);
        }
        let backstory_len = self.backstory.trim().chars().count();
        if backstory_len < MIN_BACKSTORY_CHARS {
            return Err(ValidationError::backstory_too_short(backstory_len));
        }
        if !world.has_class(&self.class) {
            return Err(ValidationError::UnknownClass(self.class.clone()));
        }
        Ok(())
    }

    /// Template built from this form; ids are assigned by the caller.
    pub fn to_template(&self, id: String) -> CharacterTemplate {
        CharacterTemplate {
            id,
            name: self.name.trim().to_string(),
            class: self.class.clone(),
            backstory: self.backstory.trim().to_string(),
            power: TEMPLATE_POWER,
            skills: starting_skills(&self.class),
        }
    }
}

/// Base power for a new character: 10 plus 0..=4.
pub fn roll_base_power(rng: &mut impl Rng) -> u32 {
    BASE_POWER + rng.gen_range(0..=BASE_POWER_ROLL_SPREAD)
}

/// Validates the form and rolls a new character.
pub fn create_character(
    form: &CharacterForm,
    world: WorldView,
    rng: &mut impl Rng,
) -> Result<Character, ValidationError> {
    form.validate(world)?;
    Ok(Character::new(
        &form.name,
        &form.class,
        &form.backstory,
        world,
        roll_base_power(rng),
    ))
}

/// New run seeded from an existing character's identity: power is
/// re-rolled, skills reset to the class defaults and equipment cleared.
pub fn reroll_from(character: &Character, rng: &mut impl Rng) -> Character {
    Character::new(
        &character.name,
        &character.class,
        &character.backstory,
        character.world_view,
        roll_base_power(rng),
    )
}
