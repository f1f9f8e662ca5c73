//! Platform abstraction layer
//!
//! What the games need from the host window:
//! - Key state with edge-trigger bookkeeping
//! - Cursor and scroll deltas
//! - Frame timing

pub mod input;
pub mod time;

pub use input::{InputSurface, Key, Keyboard};
pub use time::FrameClock;
