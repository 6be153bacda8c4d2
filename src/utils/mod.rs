//! Utility modules: JSON persistence helpers and lenient number parsing.

pub mod persistence;
pub mod serde_num;
