//! Simulation space: owns the bodies of an encounter and answers spatial
//! queries about them.
//!
//! Bodies live in insertion order and are addressed by [`BodyId`] handles,
//! so iteration (and therefore every tick) is deterministic. Controllers and
//! the input handler hold handles, never references.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::body::Body;

/// Handle to a body inside a [`SimulationSpace`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BodyId(usize);

impl BodyId {
    /// Returns the insertion index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// Container that integrates bodies and answers collision/distance queries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationSpace {
    bodies: Vec<Body>,
    arena_width: f32,
    arena_height: f32,
    ground_y: f32,
}

impl SimulationSpace {
    /// Creates an empty space.
    ///
    /// The ground plane sits `ground_offset` pixels above the arena bottom.
    #[must_use]
    pub fn new(arena_width: f32, arena_height: f32, ground_offset: f32) -> Self {
        Self {
            bodies: Vec::with_capacity(2),
            arena_width,
            arena_height,
            ground_y: arena_height - ground_offset,
        }
    }

    /// Arena width in pixels.
    #[must_use]
    pub fn arena_width(&self) -> f32 {
        self.arena_width
    }

    /// Arena height in pixels.
    #[must_use]
    pub fn arena_height(&self) -> f32 {
        self.arena_height
    }

    /// Y coordinate of the ground plane.
    #[must_use]
    pub fn ground_y(&self) -> f32 {
        self.ground_y
    }

    /// Adds a body, moving it onto this space's ground plane.
    pub fn add_body(&mut self, mut body: Body) -> BodyId {
        body.set_ground_y(self.ground_y);
        let id = BodyId(self.bodies.len());
        self.bodies.push(body);
        id
    }

    /// Number of bodies.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    /// Whether the space holds no bodies.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Gets a body.
    #[must_use]
    pub fn body(&self, id: BodyId) -> Option<&Body> {
        self.bodies.get(id.0)
    }

    /// Gets a body mutably.
    pub fn body_mut(&mut self, id: BodyId) -> Option<&mut Body> {
        self.bodies.get_mut(id.0)
    }

    /// Iterates bodies in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (BodyId, &Body)> {
        self.bodies.iter().enumerate().map(|(i, b)| (BodyId(i), b))
    }

    /// Integrates every body once, in insertion order.
    pub fn update(&mut self, dt: f32) {
        let arena_width = self.arena_width;
        for body in &mut self.bodies {
            body.integrate(dt, arena_width);
        }
    }

    /// Checks if two bodies overlap. Unknown handles never collide.
    #[must_use]
    pub fn collides(&self, a: BodyId, b: BodyId) -> bool {
        match (self.body(a), self.body(b)) {
            (Some(a), Some(b)) => a.rect().overlaps(&b.rect()),
            _ => false,
        }
    }

    /// Euclidean distance between body centers.
    #[must_use]
    pub fn distance(&self, a: BodyId, b: BodyId) -> Option<f32> {
        let a = self.body(a)?;
        let b = self.body(b)?;
        Some(a.center().distance(b.center()))
    }

    /// Pushes two overlapping bodies apart along x.
    ///
    /// The body further left is placed flush against the other. When that
    /// would leave the arena, the left body stays on the wall and the right
    /// one is moved instead. Returns whether anything moved.
    pub fn separate(&mut self, a: BodyId, b: BodyId) -> bool {
        if a == b || !self.collides(a, b) {
            return false;
        }

        let (left, right) = {
            let (ax, bx) = match (self.body(a), self.body(b)) {
                (Some(a), Some(b)) => (a.position.x, b.position.x),
                _ => return false,
            };
            if ax < bx {
                (a, b)
            } else {
                (b, a)
            }
        };

        let (left_width, right_x, right_width) = match (self.body(left), self.body(right)) {
            (Some(l), Some(r)) => (l.width(), r.position.x, r.width()),
            _ => return false,
        };

        let arena_width = self.arena_width;
        let desired_left_x = right_x - left_width;
        if desired_left_x >= 0.0 {
            if let Some(body) = self.body_mut(left) {
                body.position.x = desired_left_x;
            }
        } else {
            if let Some(body) = self.body_mut(left) {
                body.position.x = 0.0;
            }
            if let Some(body) = self.body_mut(right) {
                body.position.x = left_width.min(arena_width - right_width);
            }
        }

        trace!(?left, ?right, "separated overlapping bodies");
        true
    }

    /// Separates every overlapping pair once, in id order.
    pub fn separate_all(&mut self) -> usize {
        let n = self.bodies.len();
        let mut moved = 0;
        for i in 0..n {
            for j in (i + 1)..n {
                if self.separate(BodyId(i), BodyId(j)) {
                    moved += 1;
                }
            }
        }
        moved
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn space_with_two(ax: f32, bx: f32) -> (SimulationSpace, BodyId, BodyId) {
        let mut space = SimulationSpace::new(960.0, 540.0, 100.0);
        let mut a = Body::new(ax, 0.0, 80.0, 160.0);
        let mut b = Body::new(bx, 0.0, 80.0, 160.0);
        a.set_ground_y(space.ground_y());
        b.set_ground_y(space.ground_y());
        a.reset_to(ax);
        b.reset_to(bx);
        let a = space.add_body(a);
        let b = space.add_body(b);
        (space, a, b)
    }

    #[test]
    fn test_add_body_stamps_ground() {
        let mut space = SimulationSpace::new(960.0, 540.0, 100.0);
        let id = space.add_body(Body::new(0.0, 0.0, 80.0, 160.0));
        assert_eq!(space.ground_y(), 440.0);
        assert_eq!(space.body(id).map(Body::ground_y), Some(440.0));
        assert_eq!(id.index(), 0);
    }

    #[test]
    fn test_update_integrates_all_bodies() {
        let (mut space, a, b) = space_with_two(100.0, 500.0);
        if let Some(body) = space.body_mut(a) {
            body.move_right(5.0);
        }
        if let Some(body) = space.body_mut(b) {
            body.move_left(5.0);
        }
        space.update(1.0);

        assert!((space.body(a).map_or(0.0, |b| b.position.x) - 104.5).abs() < 1e-4);
        assert!((space.body(b).map_or(0.0, |b| b.position.x) - 495.5).abs() < 1e-4);
    }

    #[test]
    fn test_distance_between_centers() {
        let (space, a, b) = space_with_two(100.0, 400.0);
        assert_eq!(space.distance(a, b), Some(300.0));
        assert_eq!(space.distance(a, a), Some(0.0));
    }

    #[test]
    fn test_unknown_handle() {
        let (space, a, _) = space_with_two(100.0, 400.0);
        let ghost = BodyId(9);
        assert_eq!(space.distance(a, ghost), None);
        assert!(!space.collides(a, ghost));
    }

    #[test]
    fn test_collides() {
        let (space, a, b) = space_with_two(100.0, 150.0);
        assert!(space.collides(a, b));

        // flush bodies share an edge and do not collide
        let (space, a, b) = space_with_two(100.0, 180.0);
        assert!(!space.collides(a, b));
    }

    #[test]
    fn test_separate_all_skips_distant_bodies() {
        let (mut space, a, b) = space_with_two(100.0, 150.0);
        let far = space.add_body(Body::new(700.0, 0.0, 80.0, 160.0));
        assert_eq!(space.separate_all(), 1);
        assert!(!space.collides(a, b));
        assert_eq!(space.body(far).map(|b| b.position.x), Some(700.0));
    }

    #[test]
    fn test_separate_places_left_body_flush() {
        let (mut space, a, b) = space_with_two(200.0, 250.0);
        assert!(space.separate(a, b));
        assert_eq!(space.body(a).map(|b| b.position.x), Some(170.0));
        assert_eq!(space.body(b).map(|b| b.position.x), Some(250.0));
        assert!(!space.collides(a, b));
    }

    #[test]
    fn test_separate_against_left_wall() {
        let (mut space, a, b) = space_with_two(0.0, 40.0);
        assert!(space.separate(b, a));
        assert_eq!(space.body(a).map(|b| b.position.x), Some(0.0));
        assert_eq!(space.body(b).map(|b| b.position.x), Some(80.0));
        assert!(!space.collides(a, b));
    }

    #[test]
    fn test_separate_all_counts_moves() {
        let (mut space, _, _) = space_with_two(300.0, 320.0);
        assert_eq!(space.separate_all(), 1);
        assert_eq!(space.separate_all(), 0);
    }
}
