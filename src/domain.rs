//! Gameplay domains
//!
//! All four share the same engine; they differ in cosmetics and in which
//! leaderboard bucket a run is reported to.

use serde::{Deserialize, Serialize};

/// Leaderboard category a run belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Domain {
    #[default]
    Lightning,
    Fire,
    Water,
    Earth,
}

impl Domain {
    pub const ALL: [Domain; 4] = [Domain::Lightning, Domain::Fire, Domain::Water, Domain::Earth];

    pub fn as_str(&self) -> &'static str {
        match self {
            Domain::Lightning => "lightning",
            Domain::Fire => "fire",
            Domain::Water => "water",
            Domain::Earth => "earth",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "lightning" => Some(Domain::Lightning),
            "fire" => Some(Domain::Fire),
            "water" => Some(Domain::Water),
            "earth" => Some(Domain::Earth),
            _ => None,
        }
    }

    /// Capitalized name used by asset paths (`BG_Fire.png`, ...)
    pub fn asset_name(&self) -> &'static str {
        match self {
            Domain::Lightning => "Lightning",
            Domain::Fire => "Fire",
            Domain::Water => "Water",
            Domain::Earth => "Earth",
        }
    }
}

impl std::fmt::Display for Domain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
