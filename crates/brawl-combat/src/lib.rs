//! # Brawl Combat
//!
//! Real-time combat core for a 2D fighting game.
//!
//! This crate provides:
//! - Kinematic bodies with frame-coupled integration
//! - Simulation space with collision and distance queries
//! - Hitboxes with one-shot strike tracking
//! - Damage resolution against resistance
//! - Enemy AI state machine with difficulty presets
//! - Encounters that run a full player-vs-enemy match
//! - Combat events, action states and snapshots for renderers

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod action;
pub mod attack;
pub mod body;
pub mod encounter;
pub mod events;
pub mod hitbox;
pub mod intent;
pub mod npc;
pub mod random;
pub mod rect;
pub mod resolver;
pub mod snapshot;
pub mod space;
pub mod stats;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::action::*;
    pub use crate::attack::*;
    pub use crate::body::*;
    pub use crate::encounter::*;
    pub use crate::events::*;
    pub use crate::hitbox::*;
    pub use crate::intent::*;
    pub use crate::npc::*;
    pub use crate::random::*;
    pub use crate::rect::*;
    pub use crate::resolver::*;
    pub use crate::snapshot::*;
    pub use crate::space::*;
    pub use crate::stats::*;
}

pub use prelude::*;

#[cfg(test)]
mod tests {
    use super::*;
    use brawl_common::{CombatantId, Side};

    #[test]
    fn test_two_fighters_trade_blows() {
        let attacker = CombatStats::new(10, 6);
        let mut defender = CombatStats::new(10, 6);
        let mut resolver = CombatResolver::new();
        let hit = resolver.resolve(
            CombatantId::PLAYER,
            attacker.damage(),
            CombatantId::ENEMY,
            &mut defender,
        );
        assert_eq!(hit.effective_damage, 8);
        assert_eq!(defender.health(), 92);
    }

    #[test]
    fn test_space_integrates_before_queries() {
        let mut space = SimulationSpace::new(960.0, 540.0, 100.0);
        let a = space.add_body(Body::new(100.0, 0.0, 80.0, 160.0));
        let b = space.add_body(Body::new(300.0, 0.0, 80.0, 160.0));
        for (id, x) in [(a, 100.0), (b, 300.0)] {
            if let Some(body) = space.body_mut(id) {
                body.reset_to(x);
            }
        }
        if let Some(body) = space.body_mut(b) {
            body.move_left(8.0);
        }
        space.update(1.0);
        assert_eq!(space.body(a).map(|b| (b.position.y, b.on_ground)), Some((280.0, true)));
        // b moved before the distance was taken: 300 - 8 * 0.9
        assert!(space
            .body(b)
            .is_some_and(|b| (b.position.x - 292.8).abs() < 1e-3));
        assert!(space.distance(a, b).is_some_and(|d| (d - 192.8).abs() < 1e-3));
    }

    #[test]
    fn test_seeded_match_runs_to_completion() {
        let mut encounter = Encounter::seeded(
            EncounterConfig::default(),
            CombatStats::new(10, 6),
            CombatStats::new(6, 4),
            7,
        );
        let mut outcome = None;
        for tick in 0..20_000u32 {
            let enemy_x = encounter.body(Side::Enemy).map_or(0.0, |b| b.position.x);
            let player_x = encounter.body(Side::Player).map_or(0.0, |b| b.position.x);
            let input = PlayerInput {
                move_right: enemy_x - player_x > 85.0,
                attack: (tick % 20 == 0).then_some(AttackKind::Light),
                ..PlayerInput::default()
            };
            outcome = encounter.step(1.0 / 60.0, &input);
            if outcome.is_some() {
                break;
            }
        }
        assert_eq!(outcome, Some(Outcome::Victory));
        assert!(encounter.hits_landed(Side::Player) > 0);
    }
}
