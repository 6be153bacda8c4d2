//! Combat turn resolution.

use rand::Rng;

use super::types::{AbilityKind, CombatAction, CombatEncounter, TurnOutcome, TurnReport};
use crate::character::{synergy_bonuses, total_power, Character};
use crate::core::constants::*;
use crate::rules::SkillEffect;

/// Permanent base power granted for beating an enemy.
pub fn victory_power_gain(enemy_power: u32) -> u32 {
    (enemy_power as f64 / VICTORY_POWER_DIVISOR).round() as u32 + 1
}

/// Won with hp above zero but at most a tenth of max hp.
pub fn is_narrow_escape(hp: u32, max_hp: u32) -> bool {
    hp > 0 && (hp as f64) <= max_hp as f64 * SURVIVOR_HP_FRACTION
}

/// Story text shown once a fight is won.
pub fn victory_narration(enemy_name: &str, power_gain: u32) -> String {
    format!(
        "> **You defeated {}!**\nYour base power increased by {}.",
        enemy_name, power_gain
    )
}

fn scale(value: u32, factor: f64) -> u32 {
    (value as f64 * factor).floor().max(0.0) as u32
}

/// Resolves one exchange between the player and the enemy.
///
/// Mutates hp on both sides, base power (drain, victory) and returns the
/// numbers plus narration. Randomness is drawn in a fixed order: enemy
/// roll, player roll, then the evasion roll for evasive skills.
pub fn resolve_turn(
    character: &mut Character,
    encounter: &mut CombatEncounter,
    action: &CombatAction,
    rng: &mut impl Rng,
) -> TurnReport {
    let mut log = Vec::new();
    let enemy = encounter.enemy_name.clone();
    let max_hp_before = character.max_hp;

    // 1. Baselines
    let enemy_roll = rng.gen_range(0..=ENEMY_DAMAGE_ROLL_MAX);
    let mut enemy_damage = (encounter.enemy_power / 2 + enemy_roll).max(1);

    // 2. Synergies
    let bonuses = synergy_bonuses(character);

    // 3-4. Pre-strike modifiers on the enemy's hit
    if encounter.has_ability(AbilityKind::Shield) {
        enemy_damage = scale(enemy_damage, SHIELD_MULTIPLIER);
        log.push(format!(
            "{} hides behind its shield and strikes more cautiously.",
            enemy
        ));
    }
    enemy_damage = scale(enemy_damage, bonuses.incoming_damage_modifier);
    if bonuses.incoming_damage_modifier < 1.0 {
        log.push("Your skill synergy absorbs part of the damage!".to_string());
    }

    // 5. Player roll
    let player_roll = rng.gen_range(0..=PLAYER_DAMAGE_ROLL_MAX);
    let action_damage = (total_power(character) / 2).saturating_add(player_roll).max(1);

    // 6. Action
    let (mut player_damage, action_description) = match action {
        CombatAction::Attack => (action_damage, "You make a basic attack.".to_string()),
        CombatAction::UseSkill(skill) => {
            let used = format!("You use {}.", skill.name);
            match skill.effect() {
                SkillEffect::Heavy => (scale(action_damage, HEAVY_MULTIPLIER), used),
                SkillEffect::Burst => (scale(action_damage, BURST_MULTIPLIER), used),
                SkillEffect::Defensive => {
                    enemy_damage = scale(enemy_damage, DEFENSIVE_INCOMING_MULTIPLIER);
                    (scale(action_damage, DEFENSIVE_OUTGOING_MULTIPLIER), used)
                }
                SkillEffect::Evasive => {
                    if rng.gen::<f64>() > EVASION_ROLL_THRESHOLD {
                        enemy_damage = 0;
                        (action_damage, format!("{} The enemy misses you completely!", used))
                    } else {
                        (action_damage, format!("{} Unfortunately, your move was read.", used))
                    }
                }
                SkillEffect::Plain => (action_damage, used),
            }
        }
    };

    // Weaken only bites once the action's damage is known
    if encounter.has_ability(AbilityKind::Weaken) {
        player_damage = scale(player_damage, WEAKEN_MULTIPLIER);
        log.push("Your attack is weakened!".to_string());
    }

    // 7. Synergy damage modifier
    player_damage = scale(player_damage, bonuses.damage_modifier);
    if bonuses.damage_modifier > 1.0 {
        log.push("Your skill synergy empowers your attack!".to_string());
    }

    // 8. Exchange
    let mut enemy_hp = encounter.enemy_hp as i64 - player_damage as i64;
    let mut player_hp = character.hp as i64 - enemy_damage as i64;
    log.push(action_description);
    log.push(format!("You deal **{}** damage to {}.", player_damage, enemy));
    log.push(format!("{} deals **{}** damage to you.", enemy, enemy_damage));

    // 9. Enemy post-effects
    if encounter.has_ability(AbilityKind::Poison) {
        player_hp -= POISON_DAMAGE as i64;
        log.push(format!(
            "Poison courses through you for **{}** extra damage!",
            POISON_DAMAGE
        ));
    }
    let mut power_drained = 0;
    if encounter.has_ability(AbilityKind::PowerDrain) {
        let before = character.power;
        character.adjust_power(-(POWER_DRAIN_AMOUNT as i64));
        power_drained = before - character.power;
        log.push(format!(
            "The enemy drains **{}** point of your base power!",
            POWER_DRAIN_AMOUNT
        ));
    }
    if encounter.has_ability(AbilityKind::Regenerate) {
        enemy_hp = (enemy_hp + REGENERATE_AMOUNT as i64).min(encounter.enemy_max_hp as i64);
        log.push(format!("{} regenerates **{}** HP!", enemy, REGENERATE_AMOUNT));
    }

    // 10. Synergy regen
    if bonuses.hp_regen > 0 {
        player_hp = (player_hp + bonuses.hp_regen as i64).min(character.max_hp as i64);
        log.push(format!(
            "Your skill synergy restores **{}** HP!",
            bonuses.hp_regen
        ));
    }

    // 11. Clamp
    let player_hp = player_hp.clamp(0, character.max_hp as i64) as u32;
    let enemy_hp = enemy_hp.clamp(0, encounter.enemy_max_hp as i64) as u32;
    character.hp = player_hp;
    encounter.enemy_hp = enemy_hp;

    // 12. Outcome
    let outcome = match (!character.is_alive(), encounter.is_defeated()) {
        (true, true) => TurnOutcome::MutualDestruction,
        (true, false) => TurnOutcome::Defeat,
        (false, true) => {
            let power_gain = victory_power_gain(encounter.enemy_power);
            character.adjust_power(power_gain as i64);
            TurnOutcome::Victory { power_gain }
        }
        (false, false) => TurnOutcome::Ongoing,
    };

    tracing::debug!(
        player_damage,
        enemy_damage,
        player_hp,
        enemy_hp,
        ?outcome,
        "combat turn resolved"
    );

    TurnReport {
        player_damage,
        enemy_damage,
        player_hp,
        player_max_hp: max_hp_before,
        enemy_hp,
        power_drained,
        outcome,
        log,
    }
}
