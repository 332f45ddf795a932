//! Map identities - the closed set of named world variants.
//!
//! Each identity selects which resource pool its elite-tier cells draw
//! from, and carries the stable wire id written into encoded artifacts.
//! Source files choose their identity via the leading character of the
//! filename (the `2` in `2_kimberlite.json`).

use serde::{Deserialize, Serialize};

/// A named world variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MapIdentity {
    /// The primary starting world.
    Primary,
    /// Kimberlite motherlode variant.
    Kimberlite,
    /// Iridium motherlode variant.
    Iridium,
    /// Platinum motherlode variant.
    Platinum,
    /// Titanium motherlode variant.
    Titanium,
    /// Wormhole world variant.
    Wormhole,
    /// Common (no rare namesake) variant.
    Common,
}

impl MapIdentity {
    /// All identities, in wire-id order.
    pub const ALL: [Self; 7] = [
        Self::Primary,
        Self::Kimberlite,
        Self::Iridium,
        Self::Platinum,
        Self::Titanium,
        Self::Wormhole,
        Self::Common,
    ];

    /// Stable wire id (1-based; 0 is the reserved NULL slot).
    #[must_use]
    pub const fn id(self) -> u8 {
        match self {
            Self::Primary => 1,
            Self::Kimberlite => 2,
            Self::Iridium => 3,
            Self::Platinum => 4,
            Self::Titanium => 5,
            Self::Wormhole => 6,
            Self::Common => 7,
        }
    }

    /// Look up an identity by wire id.
    #[must_use]
    pub fn from_id(id: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.id() == id)
    }

    /// Resolve an identity from a source filename's leading tag character.
    #[must_use]
    pub fn from_tag(tag: char) -> Option<Self> {
        tag.to_digit(10)
            .and_then(|d| u8::try_from(d).ok())
            .and_then(Self::from_id)
    }

    /// Filename tag character for this identity.
    #[must_use]
    pub fn tag(self) -> char {
        char::from_digit(u32::from(self.id()), 10).unwrap_or('?')
    }
}

impl std::fmt::Display for MapIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Primary => "primary",
            Self::Kimberlite => "kimberlite",
            Self::Iridium => "iridium",
            Self::Platinum => "platinum",
            Self::Titanium => "titanium",
            Self::Wormhole => "wormhole",
            Self::Common => "common",
        };
        f.write_str(name)
    }
}
