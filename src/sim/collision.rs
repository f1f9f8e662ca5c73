//! Collision detection for circles and axis-aligned boxes
//!
//! Pure functions only. Detection never mutates anything; the resolver in
//! `super::resolve` turns a [`CollisionResult`] into velocity and position
//! changes.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned box given by its minimum corner and size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    /// Minimum corner (top-left on a y-down screen)
    pub pos: Vec2,
    pub size: Vec2,
}

impl Aabb {
    pub const fn new(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
    }

    /// Build a box from its center and half extents
    pub fn from_center(center: Vec2, half_extents: Vec2) -> Self {
        Self {
            pos: center - half_extents,
            size: half_extents * 2.0,
        }
    }

    #[inline]
    pub fn half_extents(&self) -> Vec2 {
        self.size / 2.0
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.half_extents()
    }
}

/// A circle in the collision plane
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub center: Vec2,
    pub radius: f32,
}

/// Which face of a box the penetration vector points at.
///
/// Declaration order is the tie-break order of [`classify_direction`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    /// Unit vector of this direction (+y is `Up`)
    pub fn unit(self) -> Vec2 {
        match self {
            Direction::Up => Vec2::Y,
            Direction::Right => Vec2::X,
            Direction::Down => Vec2::NEG_Y,
            Direction::Left => Vec2::NEG_X,
        }
    }

    #[inline]
    pub fn is_horizontal(self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }
}

/// Result of a circle-vs-box check
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionResult {
    /// Whether a collision occurred
    pub collided: bool,
    /// Face classification of `penetration`
    pub direction: Direction,
    /// Vector from the circle center to the closest point on the box
    pub penetration: Vec2,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self {
            collided: false,
            direction: Direction::Up,
            penetration: Vec2::ZERO,
        }
    }
}

/// Two boxes overlap iff their projections overlap on both axes.
///
/// Touching edges count as overlapping.
pub fn aabb_overlap(a: &Aabb, b: &Aabb) -> bool {
    let x = a.pos.x + a.size.x >= b.pos.x && b.pos.x + b.size.x >= a.pos.x;
    let y = a.pos.y + a.size.y >= b.pos.y && b.pos.y + b.size.y >= a.pos.y;
    x && y
}

/// Check a circle against a box.
///
/// The closest point on the box is found by clamping the center-to-center
/// vector to the box half extents. A circle exactly tangent to the box is
/// not a collision: the comparison is strict so that a ball resting where
/// the resolver left it does not bounce again next frame.
pub fn circle_aabb_collision(circle: Circle, aabb: &Aabb) -> CollisionResult {
    let half = aabb.half_extents();
    let center = aabb.center();

    let clamped = (circle.center - center).clamp(-half, half);
    let closest = center + clamped;
    let difference = closest - circle.center;

    if difference.length() < circle.radius {
        CollisionResult {
            collided: true,
            direction: classify_direction(difference),
            penetration: difference,
        }
    } else {
        CollisionResult::miss()
    }
}

/// Classify a vector by the axis direction it is most aligned with.
///
/// Ties go to the earliest entry of [`Direction::ALL`]. A zero vector (circle
/// center inside the box) has no alignment and classifies as `Up`.
pub fn classify_direction(v: Vec2) -> Direction {
    let v = v.normalize_or_zero();
    let mut best = Direction::Up;
    let mut max = f32::NEG_INFINITY;
    for dir in Direction::ALL {
        let dot = v.dot(dir.unit());
        if dot > max {
            max = dot;
            best = dir;
        }
    }
    best
}
