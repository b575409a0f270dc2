//! Attack kinds and open attack windows.

use brawl_common::CombatantId;
use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::body::Body;
use crate::hitbox::Hitbox;

/// Width of a melee hitbox.
pub const HITBOX_WIDTH: f32 = 40.0;
/// Height of a melee hitbox.
pub const HITBOX_HEIGHT: f32 = 60.0;
/// Distance from the top of the body to the top of the hitbox.
pub const CHEST_OFFSET: f32 = 50.0;

/// Attack variants a fighter can throw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttackKind {
    /// Quick strike at base damage.
    Light,
    /// 1.2x damage, slightly longer window.
    Medium,
    /// 1.5x damage, longest window. Also used for enemy specials.
    Heavy,
}

impl AttackKind {
    /// Attack power for a fighter with `base` damage, truncated.
    #[must_use]
    pub const fn scaled_damage(self, base: i32) -> i32 {
        match self {
            Self::Light => base,
            Self::Medium => scale_power(base, 6, 5),
            Self::Heavy => scale_power(base, 3, 2),
        }
    }

    /// How long the attack stays out, in seconds.
    #[must_use]
    pub const fn window(self) -> f32 {
        match self {
            Self::Light => 0.5,
            Self::Medium => 0.6,
            Self::Heavy => 0.7,
        }
    }
}

/// `base * num / den`, truncated and saturated to the `i32` range.
#[must_use]
pub const fn scale_power(base: i32, num: i64, den: i64) -> i32 {
    let scaled = base as i64 * num / den;
    if scaled > i32::MAX as i64 {
        i32::MAX
    } else if scaled < i32::MIN as i64 {
        i32::MIN
    } else {
        scaled as i32
    }
}

/// Top-left corner of a hitbox thrown from `body`.
///
/// The box sits flush against the body's leading edge at chest height.
#[must_use]
pub fn strike_origin(body: &Body) -> Vec2 {
    let x = if body.facing_right {
        body.position.x + body.width()
    } else {
        body.position.x - HITBOX_WIDTH
    };
    Vec2::new(x, body.position.y + CHEST_OFFSET)
}

/// Builds an active melee hitbox in front of `body`.
#[must_use]
pub fn strike_hitbox(body: &Body, damage: i32) -> Hitbox {
    let origin = strike_origin(body);
    Hitbox::new(origin.x, origin.y, HITBOX_WIDTH, HITBOX_HEIGHT, damage).activated()
}

/// An attack in progress: its hitbox and the time it has left.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActiveAttack {
    /// Who threw it.
    pub owner: CombatantId,
    /// Which variant.
    pub kind: AttackKind,
    /// The damage zone; follows the owner's body.
    pub hitbox: Hitbox,
    remaining: f32,
}

impl ActiveAttack {
    /// Opens an attack window.
    #[must_use]
    pub fn new(owner: CombatantId, kind: AttackKind, hitbox: Hitbox) -> Self {
        Self {
            owner,
            kind,
            hitbox,
            remaining: kind.window(),
        }
    }

    /// Seconds left before the window closes.
    #[must_use]
    pub fn remaining(&self) -> f32 {
        self.remaining
    }

    /// Whether the window is still open.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.remaining > 0.0 && self.hitbox.is_active()
    }

    /// Re-anchors the hitbox to the owner's current position.
    pub fn follow(&mut self, body: &Body) {
        self.hitbox.move_to(strike_origin(body));
    }

    /// Counts the window down. Deactivates the hitbox once it runs out.
    pub fn advance(&mut self, dt: f32) {
        self.remaining = (self.remaining - dt).max(0.0);
        if self.remaining <= 0.0 {
            self.hitbox.deactivate();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scaled_damage_truncates() {
        assert_eq!(AttackKind::Light.scaled_damage(7), 7);
        assert_eq!(AttackKind::Medium.scaled_damage(7), 8);
        assert_eq!(AttackKind::Heavy.scaled_damage(7), 10);
        assert_eq!(AttackKind::Medium.scaled_damage(10), 12);
        assert_eq!(AttackKind::Heavy.scaled_damage(10), 15);
    }

    #[test]
    fn test_huge_damage_saturates() {
        assert_eq!(AttackKind::Heavy.scaled_damage(2_000_000_000), i32::MAX);
        assert_eq!(AttackKind::Medium.scaled_damage(i32::MAX), i32::MAX);
        assert_eq!(scale_power(i32::MAX, 4, 5), 1_717_986_917);
    }

    #[test]
    fn test_windows_grow_with_weight() {
        assert!(AttackKind::Light.window() < AttackKind::Medium.window());
        assert!(AttackKind::Medium.window() < AttackKind::Heavy.window());
    }

    #[test]
    fn test_strike_origin_facing() {
        let mut body = Body::new(100.0, 280.0, 80.0, 160.0);
        body.facing_right = true;
        assert_eq!(strike_origin(&body), Vec2::new(180.0, 330.0));

        body.facing_right = false;
        assert_eq!(strike_origin(&body), Vec2::new(60.0, 330.0));
    }

    #[test]
    fn test_active_attack_expires() {
        let body = Body::new(100.0, 280.0, 80.0, 160.0);
        let mut attack = ActiveAttack::new(
            CombatantId::PLAYER,
            AttackKind::Light,
            strike_hitbox(&body, 5),
        );
        assert!(attack.is_open());

        attack.advance(0.3);
        assert!(attack.is_open());

        attack.advance(0.3);
        assert!(!attack.is_open());
        assert!(!attack.hitbox.is_active());
    }

    #[test]
    fn test_active_attack_follows_body() {
        let mut body = Body::new(100.0, 280.0, 80.0, 160.0);
        let mut attack = ActiveAttack::new(
            CombatantId::PLAYER,
            AttackKind::Heavy,
            strike_hitbox(&body, 5),
        );
        body.position.x = 200.0;
        attack.follow(&body);
        assert_eq!(attack.hitbox.rect().x, 280.0);
    }
}
