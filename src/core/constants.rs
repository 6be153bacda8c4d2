// Character creation and hp
pub const BASE_POWER: u32 = 10;
pub const BASE_POWER_ROLL_SPREAD: u32 = 4;
pub const TEMPLATE_POWER: u32 = 10;
pub const HP_PER_POWER: u32 = 4;
pub const BASE_HP: u32 = 20;
pub const MIN_POWER: u32 = 1;

// Creation form
pub const MIN_BACKSTORY_CHARS: usize = 20;

// Enemy scaling
pub const ENEMY_HP_PER_POWER: u32 = 4;
pub const ENEMY_BASE_HP: u32 = 15;

// Combat turn randomness (inclusive upper bounds)
pub const ENEMY_DAMAGE_ROLL_MAX: u32 = 3;
pub const PLAYER_DAMAGE_ROLL_MAX: u32 = 5;

// Skill effect families
pub const HEAVY_MULTIPLIER: f64 = 1.5;
pub const BURST_MULTIPLIER: f64 = 2.0;
pub const DEFENSIVE_INCOMING_MULTIPLIER: f64 = 0.5;
pub const DEFENSIVE_OUTGOING_MULTIPLIER: f64 = 0.7;
/// An evasive action dodges when a uniform roll lands above this.
pub const EVASION_ROLL_THRESHOLD: f64 = 0.4;

// Enemy abilities
pub const SHIELD_MULTIPLIER: f64 = 0.7;
pub const WEAKEN_MULTIPLIER: f64 = 0.8;
pub const POISON_DAMAGE: u32 = 2;
pub const POWER_DRAIN_AMOUNT: u32 = 1;
pub const REGENERATE_AMOUNT: u32 = 3;

// Victory reward: round(enemy_power / 5) + 1
pub const VICTORY_POWER_DIVISOR: f64 = 5.0;
/// SURVIVOR: win with hp at or below this fraction of max hp.
pub const SURVIVOR_HP_FRACTION: f64 = 0.1;

// Narrative
pub const MAX_CHOICES: usize = 3;
pub const HIDDEN_EVENT_MARKER: &str = "[HIDDEN_EVENT_TRIGGERED]";
pub const CUCUMBER_ITEM_ID: &str = "misc-cucumber";
pub const VICTORY_CHOICE: &str = "Combat result: victory";
pub const RANDOM_EVENT_CHANCE: f64 = 0.2;

// Achievement thresholds
pub const STORYTELLER_BEATS: usize = 10;
pub const VERSATILE_CLASSES: usize = 3;
pub const PLANESWALKER_WORLDS: usize = 2;
pub const GEAR_READY_POWER: u32 = 15;
pub const POWER_OVERWHELMING_TOTAL: u32 = 25;
pub const LEGENDARY_WARRIOR_TOTAL: u32 = 40;

// Persistence
pub const AUTOSAVE_ID: &str = "autosave";
pub const NOTIFICATION_TTL_SECONDS: u64 = 5;
