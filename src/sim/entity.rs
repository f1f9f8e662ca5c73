//! Breakout entities: plain data plus small helpers
//!
//! Entities are owned by `GameState` and mutated by the collision resolver
//! and the power-up logic. Nothing is deallocated mid-frame; bricks are
//! flagged `destroyed` instead.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use super::collision::{Aabb, Circle};
use super::resolve::PaddleContact;

pub const WHITE: Vec3 = Vec3::ONE;

/// The ball, tracked by its center
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Resting on the paddle, waiting for release
    pub stuck: bool,
    /// Becomes stuck again on the next paddle contact
    pub sticky: bool,
    /// Does not bounce off destructible bricks
    pub pass_through: bool,
    pub tint: Vec3,
}

impl Ball {
    pub fn new(pos: Vec2, radius: f32, vel: Vec2) -> Self {
        Self {
            pos,
            vel,
            radius,
            stuck: true,
            sticky: false,
            pass_through: false,
            tint: WHITE,
        }
    }

    #[inline]
    pub fn circle(&self) -> Circle {
        Circle {
            center: self.pos,
            radius: self.radius,
        }
    }

    /// Advance by `vel * dt`, reflecting off the left, right and top edges.
    ///
    /// The bottom edge is open; falling out is a loss, not a bounce.
    pub fn advance(&mut self, dt: f32, width: f32) {
        if self.stuck {
            return;
        }
        self.pos += self.vel * dt;

        if self.pos.x - self.radius <= 0.0 {
            self.vel.x = -self.vel.x;
            self.pos.x = self.radius;
        } else if self.pos.x + self.radius >= width {
            self.vel.x = -self.vel.x;
            self.pos.x = width - self.radius;
        }
        if self.pos.y - self.radius <= 0.0 {
            self.vel.y = -self.vel.y;
            self.pos.y = self.radius;
        }
    }

    /// Put the ball back on the paddle with fresh flags
    pub fn reset(&mut self, pos: Vec2, vel: Vec2) {
        self.pos = pos;
        self.vel = vel;
        self.stuck = true;
        self.sticky = false;
        self.pass_through = false;
        self.tint = WHITE;
    }
}

/// The player's paddle, tracked by its top-left corner
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    pub pos: Vec2,
    pub size: Vec2,
    pub tint: Vec3,
}

impl Paddle {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self {
            pos,
            size,
            tint: WHITE,
        }
    }

    #[inline]
    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }

    /// Contact frame for deflection: long axis +x, ball leaves upward (-y)
    pub fn contact(&self) -> PaddleContact {
        PaddleContact {
            center: self.center(),
            half_extent: self.size.x / 2.0,
            long_axis: Vec2::X,
            away: Vec2::NEG_Y,
        }
    }

    /// Move horizontally, staying inside `[0, width]`. Returns the distance moved.
    pub fn slide(&mut self, dx: f32, width: f32) -> f32 {
        let max_x = (width - self.size.x).max(0.0);
        let old = self.pos.x;
        self.pos.x = (self.pos.x + dx).clamp(0.0, max_x);
        self.pos.x - old
    }
}

/// A brick from the level grid
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Brick {
    pub pos: Vec2,
    pub size: Vec2,
    pub tint: Vec3,
    /// Solid bricks bounce the ball but are never destroyed
    pub solid: bool,
    pub destroyed: bool,
}

impl Brick {
    #[inline]
    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }

    /// Must be destroyed to complete the level
    #[inline]
    pub fn counts_for_clear(&self) -> bool {
        !self.solid
    }
}
