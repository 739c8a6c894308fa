//! Attack kinds and the protection prayers that block them

use serde::{Deserialize, Serialize};

/// Kind of an incoming attack. `Unknown` until the attacker reveals it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttackKind {
    Melee,
    Ranged,
    Magic,
    #[default]
    Unknown,
}

impl AttackKind {
    /// The protection prayer that blocks this attack, if it is known
    pub fn prayer(self) -> Option<Prayer> {
        match self {
            AttackKind::Melee => Some(Prayer::ProtectFromMelee),
            AttackKind::Ranged => Some(Prayer::ProtectFromMissiles),
            AttackKind::Magic => Some(Prayer::ProtectFromMagic),
            AttackKind::Unknown => None,
        }
    }

    /// Exposure bit for safe-tile classification (0 for unknown)
    pub fn exposure_bit(self) -> u8 {
        match self {
            AttackKind::Melee => 1,
            AttackKind::Ranged => 2,
            AttackKind::Magic => 4,
            AttackKind::Unknown => 0,
        }
    }
}

/// Protection prayers the engine can recommend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Prayer {
    ProtectFromMelee,
    ProtectFromMissiles,
    ProtectFromMagic,
}

impl Prayer {
    pub fn as_str(&self) -> &'static str {
        match self {
            Prayer::ProtectFromMelee => "protect_from_melee",
            Prayer::ProtectFromMissiles => "protect_from_missiles",
            Prayer::ProtectFromMagic => "protect_from_magic",
        }
    }

    pub fn blocks(&self) -> AttackKind {
        match self {
            Prayer::ProtectFromMelee => AttackKind::Melee,
            Prayer::ProtectFromMissiles => AttackKind::Ranged,
            Prayer::ProtectFromMagic => AttackKind::Magic,
        }
    }
}

/// Outbound recommendation: a prayer, or explicitly none.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Recommendation {
    #[default]
    None,
    ProtectFromMelee,
    ProtectFromMissiles,
    ProtectFromMagic,
}

impl Recommendation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Recommendation::None => "none",
            Recommendation::ProtectFromMelee => "protect_from_melee",
            Recommendation::ProtectFromMissiles => "protect_from_missiles",
            Recommendation::ProtectFromMagic => "protect_from_magic",
        }
    }

    pub fn prayer(&self) -> Option<Prayer> {
        match self {
            Recommendation::None => None,
            Recommendation::ProtectFromMelee => Some(Prayer::ProtectFromMelee),
            Recommendation::ProtectFromMissiles => Some(Prayer::ProtectFromMissiles),
            Recommendation::ProtectFromMagic => Some(Prayer::ProtectFromMagic),
        }
    }
}

impl From<Option<Prayer>> for Recommendation {
    fn from(prayer: Option<Prayer>) -> Self {
        match prayer {
            None => Recommendation::None,
            Some(Prayer::ProtectFromMelee) => Recommendation::ProtectFromMelee,
            Some(Prayer::ProtectFromMissiles) => Recommendation::ProtectFromMissiles,
            Some(Prayer::ProtectFromMagic) => Recommendation::ProtectFromMagic,
        }
    }
}

impl std::fmt::Display for Recommendation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
