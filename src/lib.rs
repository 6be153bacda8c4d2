//! Saga - narrative RPG engine
//!
//! Story segments come from a narrative service; everything else (power,
//! synergies, combat, achievements, saves) is decided here.

pub mod achievements;
pub mod build_info;
pub mod character;
pub mod combat;
pub mod core;
pub mod narrative;
pub mod persistence;
pub mod rules;
pub mod session;
pub mod utils;
