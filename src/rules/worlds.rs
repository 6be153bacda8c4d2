//! Settings a story can take place in, and the classes each offers.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorldView {
    CyberpunkMythology,
    SteampunkHorror,
    PostApocalypticFantasy,
}

impl WorldView {
    /// All worlds in menu order.
    pub const ALL: [WorldView; 3] = [
        WorldView::CyberpunkMythology,
        WorldView::SteampunkHorror,
        WorldView::PostApocalypticFantasy,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            WorldView::CyberpunkMythology => "Cyberpunk Mythology",
            WorldView::SteampunkHorror => "Steampunk Horror",
            WorldView::PostApocalypticFantasy => "Post-Apocalyptic Fantasy",
        }
    }

    /// Stable key used in persisted data and prompts.
    pub fn key(&self) -> &'static str {
        match self {
            WorldView::CyberpunkMythology => "cyberpunk_mythology",
            WorldView::SteampunkHorror => "steampunk_horror",
            WorldView::PostApocalypticFantasy => "post_apocalyptic_fantasy",
        }
    }

    pub fn from_key(key: &str) -> Option<WorldView> {
        Self::ALL.into_iter().find(|world| world.key() == key)
    }

    /// Playable classes, first one is the menu default.
    pub fn classes(&self) -> &'static [&'static str] {
        match self {
            WorldView::CyberpunkMythology => &["Cyber Samurai", "Data Wizard", "Shadow Hacker"],
            WorldView::SteampunkHorror => {
                &["Clockwork Artificer", "Uncanny Physician", "Brass Inquisitor"]
            }
            WorldView::PostApocalypticFantasy => {
                &["Wasteland Ranger", "Machine Monk", "Mutant Berserker"]
            }
        }
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes().contains(&class)
    }
}

/// The world a class belongs to, if any.
pub fn world_of_class(class: &str) -> Option<WorldView> {
    WorldView::ALL.into_iter().find(|world| world.has_class(class))
}
