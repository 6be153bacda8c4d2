//! Achievement system module.
//!
//! Achievements are global across runs. The unlocked set lives in the
//! profile and is stored alongside saves and templates.

pub mod data;
pub mod evaluator;
pub mod types;

pub use data::{get_achievement_def, get_achievements_by_category, ALL_ACHIEVEMENTS};
pub use evaluator::{triggered_by, GameEvent};
pub use types::{AchievementCategory, AchievementDef, AchievementId, Achievements, Milestones};
