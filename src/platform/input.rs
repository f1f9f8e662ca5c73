//! Keyboard and pointer input
//!
//! The games only read input through [`InputSurface`]. The single write they
//! make is marking a key as processed so edge-triggered commands (menu
//! select, pause) fire once per press.

use std::collections::HashSet;

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Keys the games react to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Enter,
    Space,
    Escape,
    A,
    D,
    W,
    S,
    P,
    Left,
    Right,
    Up,
    Down,
}

/// Read-only view of the host's input state
pub trait InputSurface {
    fn is_key_pressed(&self, key: Key) -> bool;
    fn has_key_been_processed(&self, key: Key) -> bool;
    fn set_key_as_processed(&mut self, key: Key);
    /// Cursor movement since the previous frame
    fn cursor_delta(&self) -> Vec2;
    /// Scroll wheel movement since the previous frame
    fn scroll_delta(&self) -> f32;

    /// True once per press: the key is down and has not been consumed yet
    fn just_pressed(&mut self, key: Key) -> bool {
        if self.is_key_pressed(key) && !self.has_key_been_processed(key) {
            self.set_key_as_processed(key);
            true
        } else {
            false
        }
    }
}

/// Snapshot input state fed by the host event loop
#[derive(Debug, Clone, Default)]
pub struct Keyboard {
    pressed: HashSet<Key>,
    processed: HashSet<Key>,
    last_cursor: Option<Vec2>,
    cursor_delta: Vec2,
    scroll_delta: f32,
}

impl Keyboard {
    pub fn press(&mut self, key: Key) {
        self.pressed.insert(key);
    }

    /// Releasing a key re-arms its edge trigger
    pub fn release(&mut self, key: Key) {
        self.pressed.remove(&key);
        self.processed.remove(&key);
    }

    /// Record an absolute cursor position; the first one only sets the origin
    pub fn move_cursor(&mut self, pos: Vec2) {
        if let Some(last) = self.last_cursor {
            self.cursor_delta += pos - last;
        }
        self.last_cursor = Some(pos);
    }

    pub fn scroll(&mut self, dy: f32) {
        self.scroll_delta += dy;
    }

    /// Clear per-frame deltas. Key state persists.
    pub fn end_frame(&mut self) {
        self.cursor_delta = Vec2::ZERO;
        self.scroll_delta = 0.0;
    }
}

impl InputSurface for Keyboard {
    fn is_key_pressed(&self, key: Key) -> bool {
        self.pressed.contains(&key)
    }

    fn has_key_been_processed(&self, key: Key) -> bool {
        self.processed.contains(&key)
    }

    fn set_key_as_processed(&mut self, key: Key) {
        self.processed.insert(key);
    }

    fn cursor_delta(&self) -> Vec2 {
        self.cursor_delta
    }

    fn scroll_delta(&self) -> f32 {
        self.scroll_delta
    }
}
