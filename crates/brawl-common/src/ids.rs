//! ID types for combatants.

use serde::{Deserialize, Serialize};

/// Which side of an encounter a combatant fights for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// Player-controlled fighter.
    Player,
    /// AI-controlled fighter.
    Enemy,
}

impl Side {
    /// Display label used in logs and overlays.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Player => "player",
            Self::Enemy => "enemy",
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Identifier for a combatant within one encounter.
///
/// Ids are stable for the lifetime of the encounter and are what hit events
/// carry, so event consumers never need a reference into the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CombatantId(u32);

impl CombatantId {
    /// Id reserved for the player fighter.
    pub const PLAYER: Self = Self(1);

    /// Id reserved for the first enemy fighter.
    pub const ENEMY: Self = Self(2);

    /// Creates a combatant id from a raw value.
    #[must_use]
    pub const fn from_raw(value: u32) -> Self {
        Self(value)
    }

    /// Returns the raw id value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Returns the canonical id for a side.
    #[must_use]
    pub const fn for_side(side: Side) -> Self {
        match side {
            Side::Player => Self::PLAYER,
            Side::Enemy => Self::ENEMY,
        }
    }

    /// Returns the side for the canonical ids, `None` for anything else.
    #[must_use]
    pub const fn side(self) -> Option<Side> {
        match self.0 {
            1 => Some(Side::Player),
            2 => Some(Side::Enemy),
            _ => None,
        }
    }
}

impl std::fmt::Display for CombatantId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.side() {
            Some(side) => write!(f, "{side}#{}", self.0),
            None => write!(f, "combatant#{}", self.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_canonical_id_has_no_side() {
        assert_eq!(CombatantId::from_raw(0).side(), None);
        assert_eq!(CombatantId::from_raw(2), CombatantId::ENEMY);
    }

    #[test]
    fn test_raw_round_trip() {
        let id = CombatantId::from_raw(7);
        assert_eq!(id.raw(), 7);
        assert_eq!(id.to_string(), "combatant#7");
        assert_eq!(CombatantId::ENEMY.to_string(), "enemy#2");
    }

    #[test]
    fn test_side_serialization() {
        let json = serde_json::to_string(&Side::Enemy).expect("serialize side");
        assert_eq!(json, "\"Enemy\"");
    }
}
