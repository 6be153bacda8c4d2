//! Prompt text for the narrative model.

use std::fmt::Write;

use crate::character::{active_synergies, available_skills, total_power, Character, EquipmentSlot};
use crate::core::constants::{CUCUMBER_ITEM_ID, HIDDEN_EVENT_MARKER, MAX_CHOICES};
use crate::rules::WorldView;

fn world_description(world: WorldView) -> String {
    let (setting, events, gear, abilities) = match world {
        WorldView::CyberpunkMythology => (
            "a fantasy world where cyberpunk megacities are haunted by ancient myth",
            [
                "Data Gods: deep in the data stream the player stumbles on an ancient node leading to a digital Valhalla.",
                "AI Ghost: the player meets a self-aware AI living in the ruins of an old-era network.",
            ],
            "'Monomolecular Katana' (weapon, +3 power), 'Neural Interface' (accessory, grants a 'Target Analysis' skill), 'Kevlar Weave Vest' (armor, +2 power)",
            "'EMP' (disables one of the player's skills for a while), 'SHIELD' (data shield), 'POWER_DRAIN' (system corruption that saps power)",
        ),
        WorldView::SteampunkHorror => (
            "a dark world of steam and brass where cosmic horror seeps through the gears",
            [
                "Glimpse of the Outer Gods: while repairing an ancient clockwork device the player solves a riddle that reveals something that should not exist.",
                "Strange Cult: the player stumbles into a secret rite of the Brass Blood cult, who worship a mechanical entity.",
            ],
            "'Aether Rifle' (weapon, +3 power), 'Clockwork Servant' (accessory, grants a 'Repair' skill), 'Brass Plate' (armor, +2 power)",
            "'WEAKEN' (maddening whispers), 'SHIELD' (brass armor), 'POISON' (toxic steam)",
        ),
        WorldView::PostApocalypticFantasy => (
            "a world a century after technological collapse, where magic has returned and mutated beasts roam steel ruins",
            [
                "Crystal Garden: deep in a lethal radiation zone the player finds a beautiful, deadly garden grown from raw radiation.",
                "Sky City: the player finds an old map pointing to the wreck of a legendary city that fell from the sky.",
            ],
            "'Rad Axe' (weapon, +3 power), 'Mutant Gland' (accessory, grants a 'Regenerate' skill), 'Scrap Pauldron' (armor, +2 power)",
            "'REGENERATE' (mutant regrowth), 'POISON' (venomous bite), 'WEAKEN' (radiant aura)",
        ),
    };

    format!(
        "The game takes place in {setting}.\n\
         Hidden events: this world hides a few very rare events. When the moment is right you may trigger the one that fits the story best:\n\
         - {}\n\
         - {}\n\
         Whenever you trigger one, include the marker '{HIDDEN_EVENT_MARKER}' somewhere in 'situation'.\n\
         Equipment examples: {gear}.\n\
         Enemy abilities that suit this world: {abilities}.",
        events[0], events[1],
    )
}

fn character_sheet(character: &Character) -> String {
    let mut sheet = String::new();
    let _ = writeln!(sheet, "- Name: {}", character.name);
    let _ = writeln!(sheet, "- Class: {}", character.class);
    let _ = writeln!(sheet, "- Backstory: {}", character.backstory);
    let _ = writeln!(sheet, "- World: {}", character.world_view.key());
    let _ = writeln!(
        sheet,
        "- **Base power: {}** (total {}, HP {}/{})",
        character.power,
        total_power(character),
        character.hp,
        character.max_hp
    );

    let skills: Vec<String> = available_skills(character)
        .into_iter()
        .map(|skill| skill.name)
        .collect();
    let _ = writeln!(sheet, "- Skills: {}", skills.join(", "));

    let _ = writeln!(sheet, "- **Equipment:**");
    for slot in EquipmentSlot::ALL {
        let name = character
            .equipment
            .get(slot)
            .map(|item| item.name.as_str())
            .unwrap_or("none");
        let _ = writeln!(sheet, "  - {}: {}", slot.name(), name);
    }

    let synergies: Vec<&str> = active_synergies(character)
        .into_iter()
        .map(|synergy| synergy.name)
        .collect();
    if !synergies.is_empty() {
        let _ = writeln!(sheet, "- Active synergies: {}", synergies.join(", "));
    }
    sheet
}

/// Full prompt for the next segment.
pub fn build_prompt(character: &Character, history: &[String], choice: Option<&str>) -> String {
    let world = world_description(character.world_view);
    let sheet = character_sheet(character);

    let history_log = if history.is_empty() {
        "The game is just starting. Use the character sheet to open the story in an engaging way, \
         plan three possible directions and offer matching choices."
            .to_string()
    } else {
        history.join("\n")
    };

    let choice_log = choice
        .map(|c| format!("\nThe player's latest choice: \"{}\". Continue the story from it.", c))
        .unwrap_or_default();

    format!(
        "You are a masterful game master for a text adventure, creating personal, branching stories.\n\
         {world}\n\n\
         **Rewards**: after a major challenge, a tough enemy or a hidden area you may grant a permanent \
         power increase (reward.power) or a piece of equipment (reward.equipment). Equipment must fit the \
         world and feel earned; do not hand it out often.\n\n\
         **Secret**: on very rare, absurd occasions (a truly illogical choice) you may award a useless \
         accessory: {{ id: '{CUCUMBER_ITEM_ID}', name: 'Cucumber', description: 'An ordinary cucumber. \
         Crisp. Does nothing.', type: 'accessory', worldView: '{world_key}' }}. Never explain why.\n\n\
         **Skill synergies**: combining certain skills grants combat bonuses. You do not generate them, \
         but be aware they exist.\n\n\
         **Combat**: fights are turn based and HP is computed by the client. To start a fight, fill in \
         'combatEncounter' with the enemy's base power (enemyPower). Balance it against the player's \
         base power ({power}): 80% to 120% for a normal fight, 130% to 150% for a boss. Give the enemy \
         0 to 2 abilities with id, name and description.\n\n\
         Process: first plan three distinct branches, then describe what happens next in vivid \
         Markdown (headings, **bold**, *italics*, lists), then offer exactly {MAX_CHOICES} short choices \
         leading to those branches. Set 'isEnd' to true only at a natural ending.\n\
         ---\n\
         Player character:\n\
         {sheet}\
         ---\n\
         Story so far:\n\
         {history_log}\n\
         {choice_log}\n\
         ---\n\n\
         Respond strictly in the requested JSON format.",
        world_key = character.world_view.key(),
        power = character.power,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hero() -> Character {
        Character::new(
            "Rin",
            "Brass Inquisitor",
            "Hunts heretics in the fog of the lower docks.",
            WorldView::SteampunkHorror,
            12,
        )
    }

    #[test]
    fn test_prompt_includes_character_sheet() {
        let prompt = build_prompt(&hero(), &[], None);
        assert!(prompt.contains("- Name: Rin"));
        assert!(prompt.contains("- Class: Brass Inquisitor"));
        assert!(prompt.contains("Base power: 12"));
        assert!(prompt.contains("Weapon: none"));
        // Judgement Gear + Purifying Flame are both innate
        assert!(prompt.contains("Active synergies: Holy Inferno"));
    }

    #[test]
    fn test_prompt_opening_vs_continuation() {
        let opening = build_prompt(&hero(), &[], None);
        assert!(opening.contains("The game is just starting"));
        assert!(!opening.contains("latest choice"));

        let history = vec!["The fog rolls in.".to_string(), "> Follow the bells".to_string()];
        let next = build_prompt(&hero(), &history, Some("Follow the bells"));
        assert!(next.contains("The fog rolls in."));
        assert!(next.contains("The player's latest choice: \"Follow the bells\""));
    }

    #[test]
    fn test_prompt_mentions_marker_and_easter_egg() {
        let prompt = build_prompt(&hero(), &[], None);
        assert!(prompt.contains(HIDDEN_EVENT_MARKER));
        assert!(prompt.contains(CUCUMBER_ITEM_ID));
        assert!(prompt.contains("worldView: 'steampunk_horror'"));
    }
}
