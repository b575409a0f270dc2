//! Animation-facing action state.

use serde::{Deserialize, Serialize};

use crate::attack::AttackKind;

/// How long a fighter shows as hurt after taking a hit, in seconds.
pub const HURT_DURATION: f32 = 0.3;

/// Horizontal speed above which a grounded fighter counts as walking.
pub const WALK_THRESHOLD: f32 = 0.1;

/// What a renderer should animate for one fighter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionState {
    /// Standing still
    #[default]
    Idle,
    /// Moving on the ground
    Walking,
    /// Airborne
    Jumping,
    /// Light attack
    Attacking,
    /// Medium attack
    Attacking2,
    /// Heavy attack
    Attacking3,
    /// Holding block
    Blocking,
    /// Recoiling from a hit
    Hurt,
    /// Out of health
    Dead,
}

impl ActionState {
    /// Sprite-sheet style label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Walking => "walking",
            Self::Jumping => "jumping",
            Self::Attacking => "attacking",
            Self::Attacking2 => "attacking2",
            Self::Attacking3 => "attacking3",
            Self::Blocking => "blocking",
            Self::Hurt => "hurt",
            Self::Dead => "dead",
        }
    }

    /// Attack animation for a kind.
    #[must_use]
    pub const fn for_attack(kind: AttackKind) -> Self {
        match kind {
            AttackKind::Light => Self::Attacking,
            AttackKind::Medium => Self::Attacking2,
            AttackKind::Heavy => Self::Attacking3,
        }
    }
}

/// Inputs to [`derive_action`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ActionInputs {
    /// Current health.
    pub health: i32,
    /// Kind of the open attack window, if any.
    pub attack: Option<AttackKind>,
    /// Whether the fighter is blocking.
    pub blocking: bool,
    /// Seconds left on the hurt flash.
    pub hurt_timer: f32,
    /// Grounded flag.
    pub on_ground: bool,
    /// Horizontal velocity.
    pub vx: f32,
}

/// Picks the action to animate. Earlier checks win.
#[must_use]
pub fn derive_action(inputs: &ActionInputs) -> ActionState {
    if inputs.health <= 0 {
        ActionState::Dead
    } else if let Some(kind) = inputs.attack {
        ActionState::for_attack(kind)
    } else if inputs.blocking {
        ActionState::Blocking
    } else if inputs.hurt_timer > 0.0 {
        ActionState::Hurt
    } else if !inputs.on_ground {
        ActionState::Jumping
    } else if inputs.vx.abs() > WALK_THRESHOLD {
        ActionState::Walking
    } else {
        ActionState::Idle
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn standing() -> ActionInputs {
        ActionInputs {
            health: 100,
            on_ground: true,
            ..ActionInputs::default()
        }
    }

    #[test]
    fn test_idle_and_walking() {
        assert_eq!(derive_action(&standing()), ActionState::Idle);
        let walking = ActionInputs {
            vx: -0.5,
            ..standing()
        };
        assert_eq!(derive_action(&walking), ActionState::Walking);
        let drifting = ActionInputs {
            vx: 0.05,
            ..standing()
        };
        assert_eq!(derive_action(&drifting), ActionState::Idle);
    }

    #[test]
    fn test_airborne_beats_walking() {
        let jumping = ActionInputs {
            on_ground: false,
            vx: 5.0,
            ..standing()
        };
        assert_eq!(derive_action(&jumping), ActionState::Jumping);
    }

    #[test]
    fn test_attack_kinds_map() {
        let heavy = ActionInputs {
            attack: Some(AttackKind::Heavy),
            blocking: true,
            ..standing()
        };
        assert_eq!(derive_action(&heavy), ActionState::Attacking3);
        assert_eq!(ActionState::for_attack(AttackKind::Medium).label(), "attacking2");
    }

    #[test]
    fn test_dead_wins() {
        let dead = ActionInputs {
            health: 0,
            attack: Some(AttackKind::Light),
            hurt_timer: 0.2,
            ..standing()
        };
        assert_eq!(derive_action(&dead), ActionState::Dead);
    }

    #[test]
    fn test_hurt_flash() {
        let hurt = ActionInputs {
            hurt_timer: HURT_DURATION,
            on_ground: false,
            ..standing()
        };
        assert_eq!(derive_action(&hurt), ActionState::Hurt);
    }
}
