//! Game settings
//!
//! Stored as JSON next to the binary. Every field has a default, so partial
//! files are fine and a missing or broken file falls back to defaults.

use std::path::{Path, PathBuf};

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::powerup::PowerUpOdds;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Breakout tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BreakoutSettings {
    pub width: f32,
    pub height: f32,
    pub lives: u32,
    pub paddle_size: Vec2,
    /// Paddle speed (pixels per second)
    pub paddle_speed: f32,
    pub ball_radius: f32,
    pub initial_ball_velocity: Vec2,
    /// Paddle deflection multiplier
    pub paddle_strength: f32,
    pub power_up_odds: PowerUpOdds,
    pub power_up_fall_speed: f32,
    /// Level files in menu order; empty uses the bundled levels
    pub levels: Vec<PathBuf>,
}

impl Default for BreakoutSettings {
    fn default() -> Self {
        Self {
            width: SCREEN_WIDTH,
            height: SCREEN_HEIGHT,
            lives: STARTING_LIVES,
            paddle_size: PLAYER_SIZE,
            paddle_speed: PLAYER_VELOCITY,
            ball_radius: BALL_RADIUS,
            initial_ball_velocity: INITIAL_BALL_VELOCITY,
            paddle_strength: PADDLE_STRENGTH,
            power_up_odds: PowerUpOdds::default(),
            power_up_fall_speed: POWER_UP_FALL_SPEED,
            levels: Vec::new(),
        }
    }
}

/// TeaPong tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PongSettings {
    pub table_half_width: f32,
    pub table_half_length: f32,
    /// Height of the table surface above the floor
    pub table_height: f32,
    pub floor_height: f32,
    pub paddle_size: Vec2,
    pub paddle_speed: f32,
    pub ball_radius: f32,
    /// Serve velocity (x = sideways, y = toward the receiver)
    pub initial_ball_velocity: Vec2,
    pub paddle_strength: f32,
    pub gravity: f32,
    pub points_to_win: u32,
}

impl Default for PongSettings {
    fn default() -> Self {
        Self {
            table_half_width: TABLE_HALF_WIDTH,
            table_half_length: TABLE_HALF_LENGTH,
            table_height: TABLE_HEIGHT,
            floor_height: FLOOR_HEIGHT,
            paddle_size: PONG_PADDLE_SIZE,
            paddle_speed: PONG_PADDLE_SPEED,
            ball_radius: PONG_BALL_RADIUS,
            initial_ball_velocity: PONG_INITIAL_BALL_VELOCITY,
            paddle_strength: PADDLE_STRENGTH,
            gravity: GRAVITY,
            points_to_win: POINTS_TO_WIN,
        }
    }
}

/// Audio preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioSettings {
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    pub muted: bool,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.7,
            muted: false,
        }
    }
}

impl AudioSettings {
    pub fn effective_sfx_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            (self.master_volume * self.sfx_volume).clamp(0.0, 1.0)
        }
    }

    pub fn effective_music_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            (self.master_volume * self.music_volume).clamp(0.0, 1.0)
        }
    }
}

/// All settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Seed for power-up drops
    pub seed: u64,
    pub breakout: BreakoutSettings,
    pub pong: PongSettings,
    pub audio: AudioSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: 0x7ea_9075,
            breakout: BreakoutSettings::default(),
            pong: PongSettings::default(),
            audio: AudioSettings::default(),
        }
    }
}

impl Settings {
    pub fn try_load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }

    /// Load settings, falling back to defaults on any error
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::try_load(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Using default settings ({}: {})", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SettingsError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path.as_ref(), json)?;
        log::info!("Settings saved to {}", path.as_ref().display());
        Ok(())
    }
}
