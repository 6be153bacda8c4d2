//! The game session state machine and the notifications it emits.

pub mod machine;
pub mod notifications;
pub mod types;

pub use machine::{GameSession, CHOICE_LINE_PREFIX};
pub use notifications::Notification;
pub use types::{GamePhase, SessionContext};
