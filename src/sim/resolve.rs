//! Collision response
//!
//! Turns a detected [`CollisionResult`] into a bounce. Every response also
//! pushes the ball out of the surface in the same step, so detection on the
//! corrected position reports no collision.

use glam::Vec2;

use super::collision::{CollisionResult, Direction};
use super::entity::Ball;

/// Push a circle out of the box it penetrated, along the classified axis.
///
/// The circle ends up exactly tangent to the face it hit.
pub fn separate(center: &mut Vec2, radius: f32, hit: &CollisionResult) {
    match hit.direction {
        Direction::Left => center.x += radius - hit.penetration.x.abs(),
        Direction::Right => center.x -= radius - hit.penetration.x.abs(),
        Direction::Up => center.y -= radius - hit.penetration.y.abs(),
        Direction::Down => center.y += radius - hit.penetration.y.abs(),
    }
}

/// Bounce a ball off a static block.
///
/// Flips the velocity component of the hit axis and separates. With
/// `pass_through` set nothing changes; the caller still counts the hit.
/// Returns whether the ball was resolved.
pub fn resolve_block_hit(ball: &mut Ball, hit: &CollisionResult, pass_through: bool) -> bool {
    if !hit.collided || pass_through {
        return false;
    }
    if hit.direction.is_horizontal() {
        ball.vel.x = -ball.vel.x;
    } else {
        ball.vel.y = -ball.vel.y;
    }
    separate(&mut ball.pos, ball.radius, hit);
    true
}

/// Geometry of a paddle as seen by the deflection rule
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaddleContact {
    pub center: Vec2,
    /// Half the paddle length along `long_axis`
    pub half_extent: f32,
    /// Unit vector along the paddle
    pub long_axis: Vec2,
    /// Unit normal pointing to the side the ball must leave on
    pub away: Vec2,
}

impl PaddleContact {
    /// Signed contact offset along the paddle, about `[-1, 1]` on the face.
    ///
    /// Not clamped: a contact at or past the paddle end can land slightly
    /// outside that range.
    pub fn offset(&self, ball_center: Vec2) -> f32 {
        if self.half_extent <= 0.0 {
            return 0.0;
        }
        (ball_center - self.center).dot(self.long_axis) / self.half_extent
    }
}

/// New ball velocity after hitting a paddle.
///
/// The component along the paddle becomes `initial_speed * offset * strength`,
/// the result is rescaled to the incoming speed, and the component across
/// the paddle is forced to point `away`. Speed is preserved exactly up to
/// rounding.
pub fn deflect_off_paddle(
    ball_center: Vec2,
    velocity: Vec2,
    paddle: &PaddleContact,
    initial_speed: f32,
    strength: f32,
) -> Vec2 {
    let speed = velocity.length();
    let along = initial_speed * paddle.offset(ball_center) * strength;
    let across = velocity.dot(paddle.away);

    let mut vel = (paddle.long_axis * along + paddle.away * across).normalize_or_zero() * speed;
    if vel == Vec2::ZERO {
        // Moving exactly along a dead-center paddle
        vel = paddle.away * speed;
    }

    let normal = vel.dot(paddle.away);
    if normal < 0.0 {
        vel -= 2.0 * normal * paddle.away;
    }
    vel
}

/// Apply a paddle hit to a ball: separate, deflect, and honour stickiness.
pub fn resolve_paddle_hit(
    ball: &mut Ball,
    hit: &CollisionResult,
    paddle: &PaddleContact,
    initial_speed: f32,
    strength: f32,
) {
    separate(&mut ball.pos, ball.radius, hit);
    ball.vel = deflect_off_paddle(ball.pos, ball.vel, paddle, initial_speed, strength);
    ball.stuck = ball.sticky;
}
