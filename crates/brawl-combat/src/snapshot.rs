//! Read-only views of an encounter for HUDs, overlays and logs.

use brawl_common::{BrawlError, BrawlResult, CombatantId, SchemaVersion, Side};
use serde::{Deserialize, Serialize};

use crate::action::ActionState;
use crate::encounter::{Encounter, Outcome};
use crate::npc::AiState;
use crate::random::RandomSource;

/// What a renderer needs for one fighter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombatantView {
    /// Combatant id.
    pub id: CombatantId,
    /// Side.
    pub side: Side,
    /// Top-left x.
    pub x: f32,
    /// Top-left y.
    pub y: f32,
    /// Facing right.
    pub facing_right: bool,
    /// Grounded flag.
    pub on_ground: bool,
    /// Current health.
    pub health: i32,
    /// Animation state.
    pub action: ActionState,
    /// AI behavior state, enemies only.
    pub ai_state: Option<AiState>,
}

/// Whole-encounter snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncounterSnapshot {
    /// Format version.
    pub version: SchemaVersion,
    /// Round number.
    pub round: u32,
    /// Ticks processed.
    pub ticks: u64,
    /// Seconds into the round.
    pub round_time: f32,
    /// Round result, if decided.
    pub outcome: Option<Outcome>,
    /// The player.
    pub player: CombatantView,
    /// The enemy.
    pub enemy: CombatantView,
}

impl EncounterSnapshot {
    /// Serializes to JSON.
    ///
    /// # Errors
    /// Returns [`BrawlError::Serialization`] if encoding fails.
    pub fn to_json(&self) -> BrawlResult<String> {
        serde_json::to_string(self).map_err(|e| BrawlError::Serialization(e.to_string()))
    }

    /// Parses JSON and checks the format version.
    ///
    /// # Errors
    /// Returns [`BrawlError::Serialization`] on malformed input and
    /// [`BrawlError::VersionMismatch`] when the snapshot was written by an
    /// incompatible version.
    pub fn from_json(json: &str) -> BrawlResult<Self> {
        let snapshot: Self =
            serde_json::from_str(json).map_err(|e| BrawlError::Serialization(e.to_string()))?;
        if !SchemaVersion::SNAPSHOT.is_compatible_with(&snapshot.version) {
            return Err(BrawlError::VersionMismatch {
                expected: SchemaVersion::SNAPSHOT.to_string(),
                actual: snapshot.version.to_string(),
            });
        }
        Ok(snapshot)
    }

    /// View for a side.
    #[must_use]
    pub fn view(&self, side: Side) -> &CombatantView {
        match side {
            Side::Player => &self.player,
            Side::Enemy => &self.enemy,
        }
    }
}

impl<R: RandomSource> Encounter<R> {
    /// Captures the current state.
    #[must_use]
    pub fn snapshot(&self) -> EncounterSnapshot {
        EncounterSnapshot {
            version: SchemaVersion::SNAPSHOT,
            round: self.round(),
            ticks: self.ticks(),
            round_time: self.round_time(),
            outcome: self.outcome(),
            player: self.view(Side::Player),
            enemy: self.view(Side::Enemy),
        }
    }

    fn view(&self, side: Side) -> CombatantView {
        let body = self.body(side);
        CombatantView {
            id: CombatantId::for_side(side),
            side,
            x: body.map_or(0.0, |b| b.position.x),
            y: body.map_or(0.0, |b| b.position.y),
            facing_right: body.map_or(side == Side::Player, |b| b.facing_right),
            on_ground: body.map_or(true, |b| b.on_ground),
            health: self.stats(side).health(),
            action: self.action_state(side),
            ai_state: (side == Side::Enemy).then(|| self.npc().state()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encounter::EncounterConfig;
    use crate::random::ScriptedRandom;
    use crate::stats::CombatStats;

    fn encounter() -> Encounter<ScriptedRandom> {
        Encounter::with_rng(
            EncounterConfig::default(),
            CombatStats::new(10, 6),
            CombatStats::new(7, 3),
            ScriptedRandom::constant(0.99),
        )
    }

    #[test]
    fn test_snapshot_views() {
        let snapshot = encounter().snapshot();
        assert_eq!(snapshot.round, 1);
        assert_eq!(snapshot.outcome, None);
        assert_eq!(snapshot.player.x, 160.0);
        assert_eq!(snapshot.player.ai_state, None);
        assert_eq!(snapshot.enemy.id, CombatantId::ENEMY);
        assert_eq!(snapshot.enemy.ai_state, Some(AiState::Idle));
        assert_eq!(snapshot.view(Side::Enemy).action, ActionState::Idle);
    }

    #[test]
    fn test_json_round_trip() {
        let snapshot = encounter().snapshot();
        let json = snapshot.to_json();
        assert!(json.is_ok());
        let parsed = json.and_then(|j| EncounterSnapshot::from_json(&j));
        assert_eq!(parsed.ok(), Some(snapshot));
    }

    #[test]
    fn test_incompatible_version_rejected() {
        let mut snapshot = encounter().snapshot();
        snapshot.version = SchemaVersion::new(2, 0, 0);
        let json = snapshot.to_json().unwrap_or_default();
        let result = EncounterSnapshot::from_json(&json);
        assert!(matches!(result, Err(BrawlError::VersionMismatch { .. })));
    }

    #[test]
    fn test_malformed_json() {
        let result = EncounterSnapshot::from_json("{not json");
        assert!(matches!(result, Err(BrawlError::Serialization(_))));
    }
}
