//! Tea Arcade - Breakout and TeaPong game cores
//!
//! Core modules:
//! - `sim`: Breakout simulation (collision, power-ups, per-frame update)
//! - `pong`: TeaPong world and its state machine
//! - `fsm`: Named-state finite state machine
//! - `platform`: Input surface and frame timing
//! - `renderer`: Render surface and draw-call recording
//! - `audio`: Sound cues driven by game events
//! - `resources`: Load-once resource cache
//! - `settings`: Data-driven game configuration

pub mod audio;
pub mod fsm;
pub mod platform;
pub mod pong;
pub mod renderer;
pub mod resources;
pub mod settings;
pub mod sim;

pub use fsm::{FiniteStateMachine, State, Transition};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    use glam::Vec2;

    /// Largest delta-time handed to the simulation after a stall
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Breakout play area (pixels, y grows downward)
    pub const SCREEN_WIDTH: f32 = 800.0;
    pub const SCREEN_HEIGHT: f32 = 600.0;

    /// Paddle defaults
    pub const PLAYER_SIZE: Vec2 = Vec2::new(100.0, 20.0);
    pub const PLAYER_VELOCITY: f32 = 500.0;
    /// Width added by each pad-size power-up
    pub const PAD_SIZE_INCREASE: f32 = 50.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 12.5;
    pub const INITIAL_BALL_VELOCITY: Vec2 = Vec2::new(100.0, -350.0);
    /// Deflection multiplier applied to the paddle contact offset
    pub const PADDLE_STRENGTH: f32 = 2.0;
    /// Speed multiplier of the speed power-up
    pub const SPEED_BOOST: f32 = 1.2;

    pub const STARTING_LIVES: u32 = 3;
    pub const BRICK_SCORE: u64 = 10;

    /// Power-up sprites fall straight down
    pub const POWER_UP_SIZE: Vec2 = Vec2::new(60.0, 20.0);
    pub const POWER_UP_FALL_SPEED: f32 = 150.0;

    /// Screen shake after hitting a solid brick (seconds)
    pub const SHAKE_DURATION: f32 = 0.05;

    /// TeaPong table (world units, XZ plane, Y up)
    pub const TABLE_HALF_WIDTH: f32 = 4.0;
    pub const TABLE_HALF_LENGTH: f32 = 7.0;
    pub const TABLE_HEIGHT: f32 = 1.0;
    pub const FLOOR_HEIGHT: f32 = 0.0;

    /// TeaPong paddle footprint (x = width, y = depth along Z)
    pub const PONG_PADDLE_SIZE: Vec2 = Vec2::new(1.5, 0.25);
    pub const PONG_PADDLE_SPEED: f32 = 6.0;

    pub const PONG_BALL_RADIUS: f32 = 0.25;
    /// Serve velocity (x = sideways, y = toward the receiving end)
    pub const PONG_INITIAL_BALL_VELOCITY: Vec2 = Vec2::new(1.5, 5.0);
    pub const GRAVITY: f32 = 9.81;
    pub const POINTS_TO_WIN: u32 = 5;
}
