//! Library categories

use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Grouping of libraries as presented to the user.
///
/// Exclusive categories allow at most one library to be selected, and so at
/// most one library may be flagged as the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LibraryCategory {
    /// Deployment platforms. Hard coded into the templates rather than
    /// declared through dependency merge fields.
    JmePlatform,
    Gui,
    Networking,
    Physics,
    General,
    /// Never offered to the user, only selected indirectly.
    Hidden,
}

impl LibraryCategory {
    pub const ALL: [LibraryCategory; 6] = [
        LibraryCategory::JmePlatform,
        LibraryCategory::Gui,
        LibraryCategory::Networking,
        LibraryCategory::Physics,
        LibraryCategory::General,
        LibraryCategory::Hidden,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            LibraryCategory::JmePlatform => "Platforms",
            LibraryCategory::Gui => "GUI Library",
            LibraryCategory::Networking => "Networking",
            LibraryCategory::Physics => "Physics Library",
            LibraryCategory::General => "General",
            LibraryCategory::Hidden => "Hidden",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            LibraryCategory::JmePlatform => "The platforms the game will be deployed to",
            LibraryCategory::Gui => "A library for building menus and in game user interfaces",
            LibraryCategory::Networking => "Libraries for multiplayer games",
            LibraryCategory::Physics => "A physics engine for collisions and rigid body dynamics",
            LibraryCategory::General => "Other useful libraries",
            LibraryCategory::Hidden => "",
        }
    }

    /// Whether only a single library of this category may be chosen.
    pub fn only_one_allowed(&self) -> bool {
        matches!(self, LibraryCategory::Gui | LibraryCategory::Physics)
    }
}

impl Display for LibraryCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            LibraryCategory::JmePlatform => "JME_PLATFORM",
            LibraryCategory::Gui => "GUI",
            LibraryCategory::Networking => "NETWORKING",
            LibraryCategory::Physics => "PHYSICS",
            LibraryCategory::General => "GENERAL",
            LibraryCategory::Hidden => "HIDDEN",
        };
        write!(f, "{s}")
    }
}
