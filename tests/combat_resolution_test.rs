//! Integration test: combat turn resolution
//!
//! Scenario checks for the damage pipeline: baseline bounds, shield and
//! poison interplay, synergy and equipment power, and the hp clamps that
//! hold for every turn.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use saga::character::{total_power, Character, EquipmentSlot, Item};
use saga::combat::{
    resolve_turn, AbilityKind, CombatAction, CombatEncounter, EncounterSpec, EnemyAbility,
    TurnOutcome,
};
use saga::narrative::StorySegment;
use saga::rules::{get_skill_def, WorldView};

// =============================================================================
// Helpers
// =============================================================================

fn ranger(power: u32) -> Character {
    Character::new(
        "Maya",
        "Wasteland Ranger",
        "Grew up hunting mutant boars outside the dome.",
        WorldView::PostApocalypticFantasy,
        power,
    )
}

fn encounter(power: u32, abilities: &[AbilityKind]) -> CombatEncounter {
    CombatEncounter::new(EncounterSpec {
        enemy_name: "Scrap Hound".to_string(),
        enemy_power: power,
        abilities: abilities
            .iter()
            .map(|kind| EnemyAbility {
                id: kind.id().to_string(),
                name: kind.id().to_string(),
                description: String::new(),
            })
            .collect(),
    })
}

fn item(id: &str, slot: EquipmentSlot, bonus: Option<u32>, skill: Option<&str>) -> Item {
    Item {
        id: id.to_string(),
        name: id.to_string(),
        description: String::new(),
        slot,
        world_view: WorldView::PostApocalypticFantasy,
        power_bonus: bonus,
        granted_skill: skill.map(|s| get_skill_def(s).unwrap().to_skill()),
    }
}

// =============================================================================
// Scenarios
// =============================================================================

#[test]
fn test_basic_attack_bounds_for_power_twelve() {
    for seed in 0..200 {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut hero = ranger(12);
        let mut enemy = encounter(10, &[]);
        assert_eq!(enemy.enemy_max_hp, 55);

        let report = resolve_turn(&mut hero, &mut enemy, &CombatAction::Attack, &mut rng);

        assert!((6..=11).contains(&report.player_damage));
        assert_eq!(enemy.enemy_hp, 55 - report.player_damage);
        assert!((5..=8).contains(&report.enemy_damage));
    }
}

#[test]
fn test_shield_and_poison_only_touch_the_player() {
    for seed in 0..100 {
        let mut plain_hero = ranger(12);
        let mut plain_enemy = encounter(10, &[]);
        let plain = resolve_turn(
            &mut plain_hero,
            &mut plain_enemy,
            &CombatAction::Attack,
            &mut ChaCha8Rng::seed_from_u64(seed),
        );

        let mut hero = ranger(12);
        let hp_before = hero.hp;
        let mut enemy = encounter(10, &[AbilityKind::Shield, AbilityKind::Poison]);
        let report = resolve_turn(
            &mut hero,
            &mut enemy,
            &CombatAction::Attack,
            &mut ChaCha8Rng::seed_from_u64(seed),
        );

        // Shield softens the enemy's own hit, never the player's
        assert_eq!(report.player_damage, plain.player_damage);
        assert_eq!(55 - enemy.enemy_hp, plain.player_damage);
        assert_eq!(
            report.enemy_damage,
            (plain.enemy_damage as f64 * 0.7).floor() as u32
        );
        assert_eq!(hp_before - hero.hp, report.enemy_damage + 2);
    }
}

#[test]
fn test_weapon_and_synergy_add_eight_power() {
    let mut hero = Character::new(
        "Grux",
        "Mutant Berserker",
        "Came out of the crater glowing and angry.",
        WorldView::PostApocalypticFantasy,
        10,
    );
    let base = total_power(&hero);
    assert_eq!(base, 10);

    hero.equipment
        .equip(item("rebar-club", EquipmentSlot::Weapon, Some(3), None));
    hero.equipment.equip(item(
        "stim-vest",
        EquipmentSlot::Armor,
        None,
        Some("ADRENALINE_RUSH"),
    ));

    assert_eq!(total_power(&hero), base + 8);
}

#[test]
fn test_hp_stays_within_bounds_every_turn() {
    let mut rng = ChaCha8Rng::seed_from_u64(99);
    for enemy_power in [1, 8, 20, 60] {
        let mut hero = ranger(11);
        let mut enemy = encounter(
            enemy_power,
            &[AbilityKind::Regenerate, AbilityKind::Poison],
        );
        for _ in 0..30 {
            let report = resolve_turn(&mut hero, &mut enemy, &CombatAction::Attack, &mut rng);
            assert!(hero.hp <= hero.max_hp);
            assert!(enemy.enemy_hp <= enemy.enemy_max_hp);
            if report.outcome.is_over() {
                break;
            }
        }
    }
}

#[test]
fn test_victory_grants_power_from_enemy_power() {
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    let mut hero = ranger(14);
    let mut enemy = encounter(12, &[]);
    enemy.enemy_hp = 1;

    let report = resolve_turn(&mut hero, &mut enemy, &CombatAction::Attack, &mut rng);

    // round(12 / 5) + 1
    assert_eq!(report.outcome, TurnOutcome::Victory { power_gain: 3 });
    assert_eq!(hero.power, 17);
    assert_eq!(hero.max_hp, 17 * 4 + 20);
}

#[test]
fn test_power_drain_lowers_base_power_and_max_hp() {
    let mut rng = ChaCha8Rng::seed_from_u64(5);
    let mut hero = ranger(10);
    let mut enemy = encounter(2, &[AbilityKind::PowerDrain]);

    let report = resolve_turn(&mut hero, &mut enemy, &CombatAction::Attack, &mut rng);

    assert_eq!(report.power_drained, 1);
    assert_eq!(hero.power, 9);
    assert_eq!(hero.max_hp, 56);
    assert!(hero.hp <= hero.max_hp);
}

#[test]
fn test_oversized_reward_bonus_saturates_total_power() {
    let segment: StorySegment = serde_json::from_str(
        r#"{
            "situation": "A relic hums in the rubble.",
            "choices": ["Take it"],
            "reward": {
                "equipment": {
                    "id": "post-weapon-relic",
                    "name": "Sunfire Relic",
                    "description": "Far too bright.",
                    "type": "weapon",
                    "worldView": "post_apocalyptic_fantasy",
                    "powerBonus": 1e12
                }
            }
        }"#,
    )
    .unwrap();
    let relic = segment.reward.and_then(|r| r.equipment).unwrap();
    assert_eq!(relic.power_bonus, Some(u32::MAX));

    let mut hero = ranger(12);
    hero.equipment.equip(relic);
    assert_eq!(total_power(&hero), u32::MAX);

    // The turn still resolves and the enemy cannot survive the hit.
    let mut rng = ChaCha8Rng::seed_from_u64(9);
    let mut enemy = encounter(5, &[]);
    let report = resolve_turn(&mut hero, &mut enemy, &CombatAction::Attack, &mut rng);
    assert_eq!(enemy.enemy_hp, 0);
    assert!(matches!(report.outcome, TurnOutcome::Victory { .. }));
}
