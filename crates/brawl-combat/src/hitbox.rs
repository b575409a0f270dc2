//! Hitboxes: transient rectangular attack volumes.
//!
//! A hitbox scores against a given defender at most once per activation.
//! The set of defenders already struck is cleared when the hitbox
//! deactivates, so re-activating the same hitbox starts a fresh strike.

use brawl_common::CombatantId;
use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::rect::Rect;

/// Attack hitbox.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hitbox {
    /// Bounds of the damage zone.
    pub bounds: Rect,
    /// Attack power delivered on a confirmed hit.
    pub damage: i32,
    active: bool,
    struck: Vec<CombatantId>,
}

impl Hitbox {
    /// Creates an inactive hitbox.
    #[must_use]
    pub fn new(x: f32, y: f32, width: f32, height: f32, damage: i32) -> Self {
        Self {
            bounds: Rect::new(x, y, width, height),
            damage,
            active: false,
            struck: Vec::new(),
        }
    }

    /// Returns the hitbox activated.
    #[must_use]
    pub fn activated(mut self) -> Self {
        self.activate();
        self
    }

    /// Returns the bounding rectangle.
    #[must_use]
    pub fn rect(&self) -> Rect {
        self.bounds
    }

    /// Whether the hitbox can currently deal damage.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Turns the hitbox on.
    pub fn activate(&mut self) {
        self.active = true;
    }

    /// Turns the hitbox off and forgets which defenders it struck.
    pub fn deactivate(&mut self) {
        self.active = false;
        self.struck.clear();
    }

    /// Moves the top-left corner.
    pub fn move_to(&mut self, position: Vec2) {
        self.bounds.x = position.x;
        self.bounds.y = position.y;
    }

    /// Checks overlap with another hitbox.
    #[must_use]
    pub fn intersects(&self, other: &Hitbox) -> bool {
        self.bounds.overlaps(&other.bounds)
    }

    /// Checks overlap with an arbitrary rectangle (usually a body).
    #[must_use]
    pub fn intersects_rect(&self, rect: &Rect) -> bool {
        self.bounds.overlaps(rect)
    }

    /// Checks if this activation already scored against `defender`.
    #[must_use]
    pub fn has_struck(&self, defender: CombatantId) -> bool {
        self.struck.contains(&defender)
    }

    /// Active and not yet spent against `defender`.
    #[must_use]
    pub fn can_strike(&self, defender: CombatantId) -> bool {
        self.active && !self.has_struck(defender)
    }

    /// Records a confirmed hit against `defender`.
    ///
    /// Returns `false` when the hit must not be scored: the hitbox is
    /// inactive or this activation already struck `defender`.
    pub fn record_strike(&mut self, defender: CombatantId) -> bool {
        if !self.can_strike(defender) {
            return false;
        }
        self.struck.push(defender);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_hitbox_is_inactive() {
        let hitbox = Hitbox::new(0.0, 0.0, 40.0, 60.0, 8);
        assert!(!hitbox.is_active());
        assert!(!hitbox.can_strike(CombatantId::PLAYER));
    }

    #[test]
    fn test_hitbox_intersects() {
        let a = Hitbox::new(0.0, 0.0, 40.0, 60.0, 1);
        let b = Hitbox::new(30.0, 50.0, 40.0, 60.0, 1);
        let c = Hitbox::new(40.0, 0.0, 40.0, 60.0, 1);
        assert!(a.intersects(&b));
        assert!(!a.intersects(&c));
    }

    #[test]
    fn test_strike_is_one_shot_per_activation() {
        let mut hitbox = Hitbox::new(0.0, 0.0, 40.0, 60.0, 8).activated();

        assert!(hitbox.record_strike(CombatantId::PLAYER));
        assert!(!hitbox.record_strike(CombatantId::PLAYER));
        assert!(hitbox.has_struck(CombatantId::PLAYER));

        // a different defender is still fair game
        assert!(hitbox.record_strike(CombatantId::ENEMY));
    }

    #[test]
    fn test_deactivate_clears_strikes() {
        let mut hitbox = Hitbox::new(0.0, 0.0, 40.0, 60.0, 8).activated();
        assert!(hitbox.record_strike(CombatantId::PLAYER));

        hitbox.deactivate();
        assert!(!hitbox.record_strike(CombatantId::PLAYER));

        hitbox.activate();
        assert!(hitbox.record_strike(CombatantId::PLAYER));
    }

    #[test]
    fn test_move_to_keeps_extent() {
        let mut hitbox = Hitbox::new(0.0, 0.0, 40.0, 60.0, 8);
        hitbox.move_to(Vec2::new(100.0, 200.0));
        assert_eq!(hitbox.rect(), Rect::new(100.0, 200.0, 40.0, 60.0));
    }
}
