//! TeaPong world and physics
//!
//! The table lies on the XZ plane with Y up. Player one defends the +Z end,
//! player two the -Z end. Collisions run in the table plane, reusing the
//! 2D detector with (x, z) as its (x, y).

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::platform::Keyboard;
use crate::settings::PongSettings;
use crate::sim::collision::{Aabb, Circle, circle_aabb_collision};
use crate::sim::resolve::{PaddleContact, deflect_off_paddle, separate};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    One,
    Two,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::One, Side::Two];

    pub fn index(self) -> usize {
        match self {
            Side::One => 0,
            Side::Two => 1,
        }
    }

    pub fn opponent(self) -> Side {
        match self {
            Side::One => Side::Two,
            Side::Two => Side::One,
        }
    }

    /// Sign of the Z end this side defends
    pub fn end_sign(self) -> f32 {
        match self {
            Side::One => 1.0,
            Side::Two => -1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PongBall {
    pub pos: Vec3,
    pub vel: Vec3,
    pub radius: f32,
    /// Off the table and dropping to the floor
    pub falling: bool,
}

impl PongBall {
    /// Position in the table plane
    pub fn plane(&self) -> Vec2 {
        Vec2::new(self.pos.x, self.pos.z)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PongPaddle {
    /// Center of the paddle
    pub pos: Vec3,
    /// Length along X, depth along Z
    pub size: Vec2,
    pub side: Side,
}

impl PongPaddle {
    pub fn aabb(&self) -> Aabb {
        Aabb::from_center(Vec2::new(self.pos.x, self.pos.z), self.size / 2.0)
    }

    /// Deflection geometry; the ball always leaves toward the table center
    pub fn contact(&self) -> PaddleContact {
        PaddleContact {
            center: Vec2::new(self.pos.x, self.pos.z),
            half_extent: self.size.x / 2.0,
            long_axis: Vec2::X,
            away: Vec2::new(0.0, -self.side.end_sign()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PongEvent {
    Served(Side),
    WallHit,
    PaddleHit(Side),
    PointScored { scorer: Side, score: u32 },
    BallLanded,
    MatchWon(Side),
}

/// Everything the TeaPong states operate on
#[derive(Debug, Clone)]
pub struct PongWorld {
    pub config: PongSettings,
    pub ball: PongBall,
    pub paddles: [PongPaddle; 2],
    pub scores: [u32; 2],
    /// Side the next serve travels toward
    pub serve_toward: Side,
    pub events: Vec<PongEvent>,
    /// Input snapshot fed by the host
    pub input: Keyboard,
}

impl PongWorld {
    pub fn new(config: PongSettings) -> Self {
        let paddles = Side::BOTH.map(|side| PongPaddle {
            pos: Vec3::ZERO,
            size: config.paddle_size,
            side,
        });
        let ball = PongBall {
            pos: Vec3::ZERO,
            vel: Vec3::ZERO,
            radius: config.ball_radius,
            falling: false,
        };
        let mut world = Self {
            config,
            ball,
            paddles,
            scores: [0; 2],
            serve_toward: Side::One,
            events: Vec::new(),
            input: Keyboard::default(),
        };
        world.reset_match();
        world
    }

    /// Height of the ball center while rolling on the table
    fn table_ball_height(&self) -> f32 {
        self.config.table_height + self.ball.radius
    }

    /// Zero the scores, center the paddles and serve
    pub fn reset_match(&mut self) {
        self.scores = [0; 2];
        self.serve_toward = Side::One;
        let half_length = self.config.table_half_length;
        for paddle in &mut self.paddles {
            paddle.size = self.config.paddle_size;
            paddle.pos = Vec3::new(
                0.0,
                self.config.table_height,
                paddle.side.end_sign() * (half_length - paddle.size.y / 2.0),
            );
        }
        self.serve();
        log::info!("TeaPong match reset (first to {})", self.config.points_to_win);
    }

    /// Put the ball at the table center heading for `serve_toward`
    pub fn serve(&mut self) {
        let v = self.config.initial_ball_velocity;
        self.ball.pos = Vec3::new(0.0, self.table_ball_height(), 0.0);
        self.ball.vel = Vec3::new(v.x, 0.0, v.y * self.serve_toward.end_sign());
        self.ball.falling = false;
        self.events.push(PongEvent::Served(self.serve_toward));
    }

    /// Slide a paddle along X; `direction` is -1, 0 or 1
    pub fn move_paddle(&mut self, side: Side, direction: f32, dt: f32) {
        let limit = self.config.table_half_width;
        let paddle = &mut self.paddles[side.index()];
        let max_x = (limit - paddle.size.x / 2.0).max(0.0);
        paddle.pos.x = (paddle.pos.x + direction * self.config.paddle_speed * dt)
            .clamp(-max_x, max_x);
    }

    pub fn score(&self, side: Side) -> u32 {
        self.scores[side.index()]
    }

    /// The side that has reached the winning score, if any
    pub fn winner(&self) -> Option<Side> {
        Side::BOTH
            .into_iter()
            .find(|&side| self.score(side) >= self.config.points_to_win)
    }

    /// Advance one frame. Returns the winner on the frame the match ends.
    pub fn step(&mut self, dt: f32) -> Option<Side> {
        if self.winner().is_some() && !self.ball.falling {
            return None;
        }

        self.ball.pos += self.ball.vel * dt;
        if self.ball.falling {
            self.ball.vel.y -= self.config.gravity * dt;
            return self.check_landing();
        }

        self.bounce_off_sides();
        self.hit_paddles();
        self.check_point();
        None
    }

    fn bounce_off_sides(&mut self) {
        let limit = self.config.table_half_width - self.ball.radius;
        let ball = &mut self.ball;
        if ball.pos.x < -limit {
            ball.pos.x = -limit;
            ball.vel.x = ball.vel.x.abs();
            self.events.push(PongEvent::WallHit);
        } else if ball.pos.x > limit {
            ball.pos.x = limit;
            ball.vel.x = -ball.vel.x.abs();
            self.events.push(PongEvent::WallHit);
        }
    }

    /// First paddle touched this frame deflects the ball
    fn hit_paddles(&mut self) {
        let circle = Circle {
            center: self.ball.plane(),
            radius: self.ball.radius,
        };
        let hit = self
            .paddles
            .iter()
            .map(|paddle| (paddle, circle_aabb_collision(circle, &paddle.aabb())))
            .find(|(_, result)| result.collided)
            .map(|(paddle, result)| (paddle.side, paddle.contact(), result));

        let Some((side, contact, result)) = hit else {
            return;
        };
        let mut center = circle.center;
        separate(&mut center, circle.radius, &result);
        let vel = deflect_off_paddle(
            center,
            Vec2::new(self.ball.vel.x, self.ball.vel.z),
            &contact,
            self.config.initial_ball_velocity.x.abs(),
            self.config.paddle_strength,
        );
        self.ball.pos.x = center.x;
        self.ball.pos.z = center.y;
        self.ball.vel.x = vel.x;
        self.ball.vel.z = vel.y;
        self.events.push(PongEvent::PaddleHit(side));
    }

    /// Ball past a table end: the other side scores and the ball drops
    fn check_point(&mut self) {
        let z = self.ball.pos.z;
        let half_length = self.config.table_half_length;
        let conceded = if z > half_length {
            Side::One
        } else if z < -half_length {
            Side::Two
        } else {
            return;
        };

        let scorer = conceded.opponent();
        self.scores[scorer.index()] += 1;
        self.serve_toward = conceded;
        self.ball.falling = true;
        let score = self.score(scorer);
        log::info!("Point to {:?} ({} - {})", scorer, self.scores[0], self.scores[1]);
        self.events.push(PongEvent::PointScored { scorer, score });
    }

    fn check_landing(&mut self) -> Option<Side> {
        let rest = self.config.floor_height + self.ball.radius;
        if self.ball.pos.y > rest {
            return None;
        }
        self.ball.pos.y = rest;
        self.ball.vel = Vec3::ZERO;
        self.ball.falling = false;
        self.events.push(PongEvent::BallLanded);

        if let Some(winner) = self.winner() {
            log::info!("{:?} wins the match", winner);
            self.events.push(PongEvent::MatchWon(winner));
            return Some(winner);
        }
        self.serve();
        None
    }

    pub fn drain_events(&mut self) -> Vec<PongEvent> {
        std::mem::take(&mut self.events)
    }
}
