//! Per-tick action flags.

use serde::{Deserialize, Serialize};

use crate::body::Direction;

/// What a fighter wants to do this tick.
///
/// The NPC controller emits one per update; the host turns the flags into
/// body commands and attack windows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Intent {
    /// Throw a regular attack.
    pub attack: bool,
    /// Hold block.
    pub block: bool,
    /// Move toward x = 0.
    pub move_left: bool,
    /// Move toward the right wall.
    pub move_right: bool,
    /// Jump if grounded.
    pub jump: bool,
    /// Throw the special attack.
    pub special: bool,
}

impl Intent {
    /// No action at all.
    pub const IDLE: Self = Self {
        attack: false,
        block: false,
        move_left: false,
        move_right: false,
        jump: false,
        special: false,
    };

    /// Movement in one direction, nothing else.
    #[must_use]
    pub const fn moving(direction: Direction) -> Self {
        let mut intent = Self::IDLE;
        match direction {
            Direction::Left => intent.move_left = true,
            Direction::Right => intent.move_right = true,
        }
        intent
    }

    /// Whether every flag is false.
    #[must_use]
    pub const fn is_idle(&self) -> bool {
        !(self.attack
            || self.block
            || self.move_left
            || self.move_right
            || self.jump
            || self.special)
    }

    /// Requested horizontal direction. Left wins if both are set.
    #[must_use]
    pub const fn direction(&self) -> Option<Direction> {
        if self.move_left {
            Some(Direction::Left)
        } else if self.move_right {
            Some(Direction::Right)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_default() {
        assert_eq!(Intent::default(), Intent::IDLE);
        assert!(Intent::IDLE.is_idle());
    }

    #[test]
    fn test_moving() {
        let intent = Intent::moving(Direction::Right);
        assert!(intent.move_right);
        assert!(!intent.move_left);
        assert!(!intent.is_idle());
        assert_eq!(intent.direction(), Some(Direction::Right));
    }

    #[test]
    fn test_serializes_flags() {
        let intent = Intent {
            jump: true,
            ..Intent::IDLE
        };
        let json = serde_json::to_string(&intent).unwrap_or_default();
        assert!(json.contains("\"jump\":true"));
        assert!(json.contains("\"attack\":false"));
    }
}
