//! Combatant stat records.

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Health every fighter starts a round with.
pub const MAX_HEALTH: i32 = 100;

/// Damage, resistance and health of one fighter.
///
/// Values are sanitized on the way in: negative damage or resistance become
/// 0 and health is kept within `0..=MAX_HEALTH`. Damage and resistance have
/// no upper cap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatStats {
    damage: i32,
    resistance: i32,
    health: i32,
}

impl CombatStats {
    /// Creates a full-health stat record.
    #[must_use]
    pub fn new(damage: i32, resistance: i32) -> Self {
        Self::with_health(damage, resistance, MAX_HEALTH)
    }

    /// Creates a stat record with explicit health.
    #[must_use]
    pub fn with_health(damage: i32, resistance: i32, health: i32) -> Self {
        if damage < 0 || resistance < 0 || !(0..=MAX_HEALTH).contains(&health) {
            warn!(
                damage,
                resistance,
                health,
                "stat values out of range, clamping"
            );
        }
        Self {
            damage: damage.max(0),
            resistance: resistance.max(0),
            health: health.clamp(0, MAX_HEALTH),
        }
    }

    /// Attack power.
    #[must_use]
    pub const fn damage(&self) -> i32 {
        self.damage
    }

    /// Defensive power.
    #[must_use]
    pub const fn resistance(&self) -> i32 {
        self.resistance
    }

    /// Current health.
    #[must_use]
    pub const fn health(&self) -> i32 {
        self.health
    }

    /// Health as a fraction of [`MAX_HEALTH`].
    #[must_use]
    pub fn health_ratio(&self) -> f32 {
        self.health as f32 / MAX_HEALTH as f32
    }

    /// Whether health is above zero.
    #[must_use]
    pub const fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// Subtracts `amount` from health, never going below zero.
    /// Returns the health left.
    pub fn lose_health(&mut self, amount: i32) -> i32 {
        self.health = (self.health - amount.max(0)).max(0);
        self.health
    }

    /// Restores full health.
    pub fn restore(&mut self) {
        self.health = MAX_HEALTH;
    }
}

impl Default for CombatStats {
    fn default() -> Self {
        Self::new(5, 5)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_full_health() {
        let stats = CombatStats::new(7, 4);
        assert_eq!(stats.health(), MAX_HEALTH);
        assert!(stats.is_alive());
        assert_eq!(stats.health_ratio(), 1.0);
    }

    #[test]
    fn test_negative_values_clamp() {
        let stats = CombatStats::with_health(-3, -8, 150);
        assert_eq!(stats.damage(), 0);
        assert_eq!(stats.resistance(), 0);
        assert_eq!(stats.health(), MAX_HEALTH);
    }

    #[test]
    fn test_large_values_pass_through() {
        let stats = CombatStats::new(15, 12);
        assert_eq!(stats.damage(), 15);
        assert_eq!(stats.resistance(), 12);
    }

    #[test]
    fn test_lose_health_floors_at_zero() {
        let mut stats = CombatStats::with_health(5, 5, 10);
        assert_eq!(stats.lose_health(4), 6);
        assert_eq!(stats.lose_health(50), 0);
        assert!(!stats.is_alive());

        stats.restore();
        assert_eq!(stats.health(), MAX_HEALTH);
    }

    #[test]
    fn test_negative_loss_is_ignored() {
        let mut stats = CombatStats::new(5, 5);
        assert_eq!(stats.lose_health(-20), MAX_HEALTH);
    }
}
