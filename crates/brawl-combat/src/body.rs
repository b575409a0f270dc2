//! Kinematic body of a single fighter.
//!
//! Integration is frame-coupled: gravity and friction are applied as flat
//! per-call increments, not scaled by `dt`. A host that needs identical
//! behavior across frame rates should drive [`Body::integrate`] from a
//! fixed-timestep accumulator.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::rect::Rect;

/// Ground plane used when a body has not been added to a space.
pub const DEFAULT_GROUND_Y: f32 = 500.0;

/// Horizontal speed used by movement commands that do not pick their own.
pub const DEFAULT_MOVE_SPEED: f32 = 1.0;

/// Smallest extent a body may have on either axis.
pub const MIN_EXTENT: f32 = 1.0;

/// Tunable per-body physics constants.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConstants {
    /// Added to `vy` every integration step while airborne.
    pub gravity: f32,
    /// Multiplied into `vx` every integration step while grounded.
    pub friction: f32,
    /// Horizontal speed cap.
    pub max_speed: f32,
    /// Vertical velocity set by a jump (negative is up).
    pub jump_impulse: f32,
}

impl Default for PhysicsConstants {
    fn default() -> Self {
        Self {
            gravity: 2.0,
            friction: 0.9,
            max_speed: 10.0,
            jump_impulse: -30.0,
        }
    }
}

/// Horizontal direction of travel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// Toward x = 0.
    Left,
    /// Toward the arena's right wall.
    Right,
}

impl Direction {
    /// Direction pointing from `from_x` to `to_x`. Ties resolve to the left.
    #[must_use]
    pub fn toward(from_x: f32, to_x: f32) -> Self {
        if to_x > from_x {
            Self::Right
        } else {
            Self::Left
        }
    }

    /// The opposite direction.
    #[must_use]
    pub const fn reversed(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

/// Kinematic footprint of one combatant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Body {
    /// Top-left corner in pixels.
    pub position: Vec2,
    /// Velocity in pixels per integration step.
    pub velocity: Vec2,
    /// Whether the body rests on the ground plane.
    pub on_ground: bool,
    /// Facing direction, used for hitbox placement and sprites.
    pub facing_right: bool,
    /// Physics tuning.
    pub constants: PhysicsConstants,
    size: Vec2,
    ground_y: f32,
}

impl Body {
    /// Creates a grounded, motionless body.
    ///
    /// Extents below [`MIN_EXTENT`] are raised to it.
    #[must_use]
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            position: Vec2::new(x, y),
            velocity: Vec2::ZERO,
            on_ground: true,
            facing_right: true,
            constants: PhysicsConstants::default(),
            size: Vec2::new(width.max(MIN_EXTENT), height.max(MIN_EXTENT)),
            ground_y: DEFAULT_GROUND_Y,
        }
    }

    /// Sets the physics constants.
    #[must_use]
    pub fn with_constants(mut self, constants: PhysicsConstants) -> Self {
        self.constants = constants;
        self
    }

    /// Sets the initial facing.
    #[must_use]
    pub const fn with_facing(mut self, facing_right: bool) -> Self {
        self.facing_right = facing_right;
        self
    }

    /// Body width.
    #[must_use]
    pub fn width(&self) -> f32 {
        self.size.x
    }

    /// Body height.
    #[must_use]
    pub fn height(&self) -> f32 {
        self.size.y
    }

    /// Y coordinate of the ground plane.
    #[must_use]
    pub fn ground_y(&self) -> f32 {
        self.ground_y
    }

    /// Moves the ground plane. The body settles onto it at the next step.
    pub fn set_ground_y(&mut self, ground_y: f32) {
        self.ground_y = ground_y;
    }

    /// Y coordinate of the top edge when standing on the ground.
    #[must_use]
    pub fn standing_y(&self) -> f32 {
        self.ground_y - self.size.y
    }

    /// Advances the body by one step.
    ///
    /// `dt` does not scale the motion: each call applies one step of
    /// gravity, friction and displacement.
    pub fn integrate(&mut self, _dt: f32, arena_width: f32) {
        let c = self.constants;

        if !self.on_ground {
            self.velocity.y += c.gravity;
        }

        if self.on_ground {
            self.velocity.x *= c.friction;
        }

        self.velocity.x = self.velocity.x.clamp(-c.max_speed, c.max_speed);

        self.position += self.velocity;

        let standing_y = self.standing_y();
        if self.position.y >= standing_y {
            self.position.y = standing_y;
            self.velocity.y = 0.0;
            self.on_ground = true;
        } else {
            self.on_ground = false;
        }

        let max_x = arena_width - self.size.x;
        if self.position.x < 0.0 {
            self.position.x = 0.0;
            self.velocity.x = 0.0;
        } else if self.position.x > max_x {
            self.position.x = max_x;
            self.velocity.x = 0.0;
        }
    }

    /// Starts a jump. Does nothing while airborne.
    pub fn jump(&mut self) {
        if self.on_ground {
            self.velocity.y = self.constants.jump_impulse;
            self.on_ground = false;
        }
    }

    /// Sets leftward velocity and faces left.
    pub fn move_left(&mut self, speed: f32) {
        self.velocity.x = -speed;
        self.facing_right = false;
    }

    /// Sets rightward velocity and faces right.
    pub fn move_right(&mut self, speed: f32) {
        self.velocity.x = speed;
        self.facing_right = true;
    }

    /// Moves in `direction` at `speed`.
    pub fn move_in(&mut self, direction: Direction, speed: f32) {
        match direction {
            Direction::Left => self.move_left(speed),
            Direction::Right => self.move_right(speed),
        }
    }

    /// Stops horizontal motion.
    pub fn halt(&mut self) {
        self.velocity.x = 0.0;
    }

    /// Places the body standing at `x` with no velocity.
    pub fn reset_to(&mut self, x: f32) {
        self.position = Vec2::new(x, self.standing_y());
        self.velocity = Vec2::ZERO;
        self.on_ground = true;
    }

    /// Returns the bounding rectangle.
    #[must_use]
    pub fn rect(&self) -> Rect {
        Rect::new(self.position.x, self.position.y, self.size.x, self.size.y)
    }

    /// Returns the center point.
    #[must_use]
    pub fn center(&self) -> Vec2 {
        self.position + self.size / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const GROUND_Y: f32 = 440.0;
    const ARENA_WIDTH: f32 = 960.0;

    fn grounded_body(x: f32) -> Body {
        let mut body = Body::new(x, 0.0, 80.0, 160.0);
        body.set_ground_y(GROUND_Y);
        body.reset_to(x);
        body
    }

    #[test]
    fn test_move_right_then_integrate() {
        let mut body = grounded_body(160.0);
        body.move_right(8.0);
        body.integrate(1.0, ARENA_WIDTH);

        assert!((body.velocity.x - 7.2).abs() < 1e-4);
        assert!((body.position.x - 167.2).abs() < 1e-4);
        assert!(body.on_ground);
        assert!(body.facing_right);
    }

    #[test]
    fn test_speed_is_clamped() {
        let mut body = grounded_body(400.0);
        body.move_left(50.0);
        body.integrate(1.0, ARENA_WIDTH);

        assert_eq!(body.velocity.x, -10.0);
        assert_eq!(body.position.x, 390.0);
        assert!(!body.facing_right);
    }

    #[test]
    fn test_jump_and_land() {
        let mut body = grounded_body(100.0);
        body.jump();
        assert_eq!(body.velocity.y, -30.0);
        assert!(!body.on_ground);

        body.integrate(1.0, ARENA_WIDTH);
        assert!(!body.on_ground);
        // gravity applied before displacement
        assert_eq!(body.velocity.y, -28.0);
        assert_eq!(body.position.y, body.standing_y() - 28.0);

        for _ in 0..100 {
            body.integrate(1.0, ARENA_WIDTH);
        }
        assert!(body.on_ground);
        assert_eq!(body.position.y, body.standing_y());
        assert_eq!(body.velocity.y, 0.0);
    }

    #[test]
    fn test_jump_is_noop_while_airborne() {
        let mut body = grounded_body(100.0);
        body.jump();
        body.integrate(1.0, ARENA_WIDTH);
        let vy = body.velocity.y;

        body.jump();
        assert_eq!(body.velocity.y, vy);
    }

    #[test]
    fn test_airborne_body_keeps_horizontal_speed() {
        let mut body = grounded_body(100.0);
        body.jump();
        body.move_right(6.0);
        body.integrate(1.0, ARENA_WIDTH);
        assert_eq!(body.velocity.x, 6.0);
        assert_eq!(body.position.x, 106.0);
    }

    #[test]
    fn test_left_wall_clamp_zeroes_velocity() {
        let mut body = grounded_body(2.0);
        body.move_left(10.0);
        body.integrate(1.0, ARENA_WIDTH);
        assert_eq!(body.position.x, 0.0);
        assert_eq!(body.velocity.x, 0.0);
    }

    #[test]
    fn test_right_wall_clamp_zeroes_velocity() {
        let mut body = grounded_body(ARENA_WIDTH - 82.0);
        body.move_right(10.0);
        body.integrate(1.0, ARENA_WIDTH);
        assert_eq!(body.position.x, ARENA_WIDTH - 80.0);
        assert_eq!(body.velocity.x, 0.0);
    }

    #[test]
    fn test_dt_does_not_scale_motion() {
        let mut a = grounded_body(300.0);
        let mut b = grounded_body(300.0);
        a.move_right(5.0);
        b.move_right(5.0);
        a.integrate(1.0, ARENA_WIDTH);
        b.integrate(1.0 / 60.0, ARENA_WIDTH);
        assert_eq!(a.position, b.position);
    }

    #[test]
    fn test_extent_floor() {
        let body = Body::new(0.0, 0.0, 0.0, -5.0);
        assert_eq!(body.width(), MIN_EXTENT);
        assert_eq!(body.height(), MIN_EXTENT);
    }

    #[test]
    fn test_direction_toward() {
        assert_eq!(Direction::toward(0.0, 10.0), Direction::Right);
        assert_eq!(Direction::toward(10.0, 0.0), Direction::Left);
        assert_eq!(Direction::toward(5.0, 5.0), Direction::Left);
        assert_eq!(Direction::Left.reversed(), Direction::Right);
    }

    #[derive(Debug, Clone, Copy)]
    enum Command {
        Left(f32),
        Right(f32),
        Jump,
        Halt,
        Idle,
    }

    fn command() -> impl Strategy<Value = Command> {
        prop_oneof![
            (0.0f32..40.0).prop_map(Command::Left),
            (0.0f32..40.0).prop_map(Command::Right),
            Just(Command::Jump),
            Just(Command::Halt),
            Just(Command::Idle),
        ]
    }

    proptest! {
        #[test]
        fn prop_integration_invariants(
            start_x in 0.0f32..880.0,
            commands in prop::collection::vec(command(), 1..200),
        ) {
            let mut body = grounded_body(start_x);
            for cmd in commands {
                match cmd {
                    Command::Left(speed) => body.move_left(speed),
                    Command::Right(speed) => body.move_right(speed),
                    Command::Jump => body.jump(),
                    Command::Halt => body.halt(),
                    Command::Idle => {}
                }
                body.integrate(1.0, ARENA_WIDTH);

                let bottom = body.position.y + body.height();
                prop_assert!(bottom <= GROUND_Y + 1e-3);
                prop_assert_eq!(body.on_ground, (bottom - GROUND_Y).abs() < 1e-3);
                prop_assert!(body.velocity.x.abs() <= body.constants.max_speed);
                prop_assert!(body.position.x >= 0.0);
                prop_assert!(body.position.x <= ARENA_WIDTH - body.width());
            }
        }

        #[test]
        fn prop_jump_never_changes_airborne_velocity(vy in -30.0f32..30.0) {
            let mut body = grounded_body(100.0);
            body.on_ground = false;
            body.velocity.y = vy;
            body.jump();
            prop_assert_eq!(body.velocity.y, vy);
        }
    }
}
