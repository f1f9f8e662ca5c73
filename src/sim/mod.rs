//! Breakout simulation
//!
//! All gameplay logic lives here. No rendering or platform dependencies
//! beyond the input trait; randomness comes from the seeded RNG in
//! `GameState`.

pub mod collision;
pub mod entity;
pub mod level;
pub mod powerup;
pub mod resolve;
pub mod state;
pub mod tick;

pub use collision::{
    Aabb, Circle, CollisionResult, Direction, aabb_overlap, circle_aabb_collision,
    classify_direction,
};
pub use entity::{Ball, Brick, Paddle};
pub use level::{CellKind, Level, LevelError};
pub use powerup::{Effects, PowerUp, PowerUpKind, PowerUpOdds};
pub use resolve::{PaddleContact, deflect_off_paddle, resolve_block_hit, separate};
pub use state::{GameEvent, GamePhase, GameState};
pub use tick::{process_input, update};
