//! Breakout game state
//!
//! One `GameState` owns every entity, the effect flags, the RNG and the
//! current phase. Subsystems receive it (or its fields) explicitly.

use std::path::Path;

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::entity::{Ball, Brick, Paddle, WHITE};
use super::level::Level;
use super::powerup::{Effects, PowerUp, PowerUpKind};
use crate::settings::BreakoutSettings;

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Level select, waiting for Enter
    Menu,
    /// Active gameplay
    Active,
    /// Level cleared
    Win,
}

/// Things that happened during a frame, drained by the host for audio/HUD
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    BrickDestroyed { index: usize },
    SolidHit { index: usize },
    PaddleHit,
    PowerUpSpawned(PowerUpKind),
    PowerUpCollected(PowerUpKind),
    PowerUpExpired(PowerUpKind),
    LifeLost { remaining: u32 },
    LevelComplete,
    PhaseChanged(GamePhase),
}

/// Complete Breakout state
#[derive(Debug, Clone)]
pub struct GameState {
    pub config: BreakoutSettings,
    pub phase: GamePhase,
    /// Index into `levels` of the selected level
    pub level: usize,
    pub levels: Vec<Level>,
    pub bricks: Vec<Brick>,
    pub paddle: Paddle,
    pub ball: Ball,
    pub power_ups: Vec<PowerUp>,
    pub effects: Effects,
    pub lives: u32,
    pub score: u64,
    /// Events since the last drain
    pub events: Vec<GameEvent>,
    pub(crate) rng: Pcg32,
}

impl GameState {
    /// Create a game in the menu with the first level loaded
    pub fn new(config: BreakoutSettings, levels: Vec<Level>, seed: u64) -> Self {
        let paddle = Paddle::new(Vec2::ZERO, config.paddle_size);
        let ball = Ball::new(Vec2::ZERO, config.ball_radius, config.initial_ball_velocity);
        let mut state = Self {
            phase: GamePhase::Menu,
            level: 0,
            levels,
            bricks: Vec::new(),
            paddle,
            ball,
            power_ups: Vec::new(),
            effects: Effects::default(),
            lives: config.lives,
            score: 0,
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            config,
        };
        state.reset_level();
        state.reset_player();
        state
    }

    /// Create a game using the configured level files, or the bundled levels
    pub fn from_settings(config: BreakoutSettings, seed: u64) -> Self {
        let levels = if config.levels.is_empty() {
            Level::bundled()
        } else {
            config
                .levels
                .iter()
                .filter_map(|path| match Level::load(path) {
                    Ok(level) => Some(level),
                    Err(e) => {
                        log::error!("Failed to load level {}: {}", path.display(), e);
                        None
                    }
                })
                .collect()
        };
        Self::new(config, levels, seed)
    }

    /// Switch phase, recording the change once
    pub fn set_phase(&mut self, phase: GamePhase) {
        if self.phase != phase {
            log::info!("Phase {:?} -> {:?}", self.phase, phase);
            self.phase = phase;
            self.events.push(GameEvent::PhaseChanged(phase));
        }
    }

    /// Rebuild the bricks of the selected level and restore lives.
    ///
    /// A missing level index keeps whatever bricks were loaded before.
    pub fn reset_level(&mut self) {
        match self.levels.get(self.level) {
            Some(level) => {
                self.bricks = level.bricks(self.config.width, self.config.height / 2.0);
                log::info!("Level '{}' loaded ({} bricks)", level.name, self.bricks.len());
            }
            None => log::warn!("No level at index {}, keeping current bricks", self.level),
        }
        self.power_ups.clear();
        self.lives = self.config.lives;
    }

    /// Put the paddle and ball back at the start and clear temporary effects
    pub fn reset_player(&mut self) {
        let size = self.config.paddle_size;
        self.paddle.size = size;
        self.paddle.pos = Vec2::new(
            self.config.width / 2.0 - size.x / 2.0,
            self.config.height - size.y,
        );
        self.paddle.tint = WHITE;

        let ball_pos = self.paddle.pos + Vec2::new(size.x / 2.0, -self.ball.radius);
        self.ball.reset(ball_pos, self.config.initial_ball_velocity);

        self.effects.confuse = false;
        self.effects.chaos = false;
    }

    /// Replace one level from a file. On failure the old level is kept.
    pub fn reload_level(&mut self, index: usize, path: impl AsRef<Path>) -> bool {
        let path = path.as_ref();
        let level = match Level::load(path) {
            Ok(level) => level,
            Err(e) => {
                log::error!("Failed to load level {}: {}", path.display(), e);
                return false;
            }
        };
        let len = self.levels.len();
        match self.levels.get_mut(index) {
            Some(slot) => *slot = level,
            None if index == len => self.levels.push(level),
            None => {
                log::warn!("Level index {} out of range", index);
                return false;
            }
        }
        if index == self.level {
            self.reset_level();
        }
        true
    }

    /// Select the next level (wrapping) and show it
    pub fn next_level(&mut self) {
        if !self.levels.is_empty() {
            self.level = (self.level + 1) % self.levels.len();
            self.reset_level();
        }
    }

    /// Select the previous level (wrapping) and show it
    pub fn previous_level(&mut self) {
        if !self.levels.is_empty() {
            self.level = self.level.checked_sub(1).unwrap_or(self.levels.len() - 1);
            self.reset_level();
        }
    }

    /// Bricks are loaded and every destructible one is gone
    pub fn is_level_completed(&self) -> bool {
        !self.bricks.is_empty() && super::level::is_completed(&self.bricks)
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
