//! Damage resolution.
//!
//! `effective = max(1, attack - resistance / 3)` with truncating division.
//! The floor of 1 means every landed hit moves the match forward. The
//! resolver does not test overlap; callers invoke it once per confirmed hit.

use brawl_common::CombatantId;
use tracing::debug;

use crate::events::HitEvent;
use crate::stats::CombatStats;

/// Something that can receive resolved damage.
pub trait Damageable {
    /// Stats used for the defense side of the formula.
    fn combat_stats(&self) -> &CombatStats;

    /// Applies already-resolved damage.
    fn apply_damage(&mut self, amount: i32);
}

impl Damageable for CombatStats {
    fn combat_stats(&self) -> &CombatStats {
        self
    }

    fn apply_damage(&mut self, amount: i32) {
        self.lose_health(amount);
    }
}

/// Applies attack/defense arithmetic and keeps simple tallies.
#[derive(Debug, Clone, Default)]
pub struct CombatResolver {
    hits_resolved: u64,
    damage_dealt: u64,
}

impl CombatResolver {
    /// Creates a new resolver.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Damage that gets through `resistance`.
    #[must_use]
    pub const fn effective_damage(attack: i32, resistance: i32) -> i32 {
        let raw = attack - resistance / 3;
        if raw < 1 {
            1
        } else {
            raw
        }
    }

    /// Resolves one attacker's stats against another's, mutating the
    /// defender's health. Returns the effective damage.
    pub fn resolve_stats(&mut self, attacker: &CombatStats, defender: &mut CombatStats) -> i32 {
        let effective = Self::effective_damage(attacker.damage(), defender.resistance());
        defender.lose_health(effective);
        self.tally(effective);
        effective
    }

    /// Resolves a confirmed hit of power `attack` against `defender`.
    pub fn resolve<D: Damageable + ?Sized>(
        &mut self,
        attacker_id: CombatantId,
        attack: i32,
        defender_id: CombatantId,
        defender: &mut D,
    ) -> HitEvent {
        let effective = Self::effective_damage(attack, defender.combat_stats().resistance());
        defender.apply_damage(effective);
        self.tally(effective);

        let remaining_health = defender.combat_stats().health();
        debug!(
            attacker = %attacker_id,
            defender = %defender_id,
            effective,
            remaining_health,
            "hit resolved"
        );

        HitEvent {
            attacker: attacker_id,
            defender: defender_id,
            effective_damage: effective,
            remaining_health,
        }
    }

    /// Number of hits resolved so far.
    #[must_use]
    pub const fn hits_resolved(&self) -> u64 {
        self.hits_resolved
    }

    /// Total effective damage dealt so far.
    #[must_use]
    pub const fn damage_dealt(&self) -> u64 {
        self.damage_dealt
    }

    fn tally(&mut self, effective: i32) {
        self.hits_resolved += 1;
        self.damage_dealt += effective.max(0) as u64;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_effective_damage_example() {
        let attacker = CombatStats::new(10, 6);
        let mut defender = CombatStats::new(10, 6);
        let mut resolver = CombatResolver::new();

        assert_eq!(resolver.resolve_stats(&attacker, &mut defender), 8);
        assert_eq!(defender.health(), 92);
    }

    #[test]
    fn test_resistance_division_truncates() {
        // 7 / 3 == 2
        assert_eq!(CombatResolver::effective_damage(5, 7), 3);
        assert_eq!(CombatResolver::effective_damage(5, 2), 5);
    }

    #[test]
    fn test_damage_floor() {
        assert_eq!(CombatResolver::effective_damage(1, 30), 1);
        assert_eq!(CombatResolver::effective_damage(0, 0), 1);
    }

    #[test]
    fn test_resolve_reports_event() {
        let mut resolver = CombatResolver::new();
        let mut defender = CombatStats::with_health(3, 9, 5);

        let event = resolver.resolve(CombatantId::PLAYER, 10, CombatantId::ENEMY, &mut defender);
        assert_eq!(event.attacker, CombatantId::PLAYER);
        assert_eq!(event.defender, CombatantId::ENEMY);
        assert_eq!(event.effective_damage, 7);
        assert_eq!(event.remaining_health, 0);
        assert_eq!(resolver.hits_resolved(), 1);
        assert_eq!(resolver.damage_dealt(), 7);
    }

    proptest! {
        #[test]
        fn prop_damage_floor(attack in 1i32..1000, resistance in 0i32..1000) {
            prop_assert!(CombatResolver::effective_damage(attack, resistance) >= 1);
        }

        #[test]
        fn prop_health_floor(
            hits in prop::collection::vec((0i32..50, 0i32..20), 1..60),
        ) {
            let mut resolver = CombatResolver::new();
            let mut defender = CombatStats::new(5, 5);
            for (damage, resistance) in hits {
                let attacker = CombatStats::new(damage, resistance);
                resolver.resolve_stats(&attacker, &mut defender);
                prop_assert!(defender.health() >= 0);
            }
        }
    }
}
