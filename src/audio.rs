//! Sound cues
//!
//! Games never talk to an audio backend directly. They emit events; the
//! [`AudioManager`] turns those into fire-and-forget `play` calls on an
//! [`AudioSurface`].

use crate::pong::PongEvent;
use crate::settings::AudioSettings;
use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    /// Background loop
    Music,
    /// Ball hits paddle
    PaddleHit,
    /// Destructible brick breaks
    BrickBreak,
    /// Ball hits a solid brick
    SolidHit,
    /// Power-up collected
    PowerUp,
    /// Ball hits a table side
    WallHit,
    /// Point scored in TeaPong
    Point,
    /// Match or level won
    Victory,
}

impl SoundEffect {
    /// Clip name handed to the audio backend
    pub fn clip(self) -> &'static str {
        match self {
            SoundEffect::Music => "audio/breakout.mp3",
            SoundEffect::PaddleHit => "audio/bleep.wav",
            SoundEffect::BrickBreak => "audio/bleep.mp3",
            SoundEffect::SolidHit => "audio/solid.wav",
            SoundEffect::PowerUp => "audio/powerup.wav",
            SoundEffect::WallHit => "audio/wall.wav",
            SoundEffect::Point => "audio/point.wav",
            SoundEffect::Victory => "audio/victory.wav",
        }
    }

    pub fn looped(self) -> bool {
        matches!(self, SoundEffect::Music)
    }

    pub fn for_breakout(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::BrickDestroyed { .. } => Some(SoundEffect::BrickBreak),
            GameEvent::SolidHit { .. } => Some(SoundEffect::SolidHit),
            GameEvent::PaddleHit => Some(SoundEffect::PaddleHit),
            GameEvent::PowerUpCollected(_) => Some(SoundEffect::PowerUp),
            GameEvent::LevelComplete => Some(SoundEffect::Victory),
            _ => None,
        }
    }

    pub fn for_pong(event: &PongEvent) -> Option<Self> {
        match event {
            PongEvent::PaddleHit(_) => Some(SoundEffect::PaddleHit),
            PongEvent::WallHit => Some(SoundEffect::WallHit),
            PongEvent::PointScored { .. } => Some(SoundEffect::Point),
            PongEvent::MatchWon(_) => Some(SoundEffect::Victory),
            _ => None,
        }
    }
}

/// Audio backend supplied by the host
pub trait AudioSurface {
    /// Start a clip; no feedback is expected
    fn play(&mut self, clip: &str, looped: bool);

    /// Apply an output volume (0.0 - 1.0)
    fn set_volume(&mut self, _volume: f32) {}

    /// Silence everything currently playing
    fn stop_all(&mut self) {}
}

/// Backend that only logs and remembers what it was asked to play
#[derive(Debug, Clone, Default)]
pub struct LogAudio {
    pub played: Vec<(String, bool)>,
    pub volume: f32,
}

impl AudioSurface for LogAudio {
    fn play(&mut self, clip: &str, looped: bool) {
        log::debug!("Sound '{}' (loop: {})", clip, looped);
        self.played.push((clip.to_string(), looped));
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume;
    }

    fn stop_all(&mut self) {
        log::debug!("Sound stopped");
    }
}

/// Audio manager for the games
#[derive(Debug)]
pub struct AudioManager<A: AudioSurface> {
    surface: A,
    settings: AudioSettings,
    music_started: bool,
}

impl<A: AudioSurface> AudioManager<A> {
    pub fn new(mut surface: A, settings: AudioSettings) -> Self {
        surface.set_volume(settings.effective_sfx_volume());
        Self {
            surface,
            settings,
            music_started: false,
        }
    }

    pub fn surface(&self) -> &A {
        &self.surface
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.settings.master_volume = vol.clamp(0.0, 1.0);
        self.surface.set_volume(self.settings.effective_sfx_volume());
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.settings.sfx_volume = vol.clamp(0.0, 1.0);
        self.surface.set_volume(self.settings.effective_sfx_volume());
    }

    /// Mute/unmute all audio. Music restarts on the next `start_music`.
    pub fn set_muted(&mut self, muted: bool) {
        self.settings.muted = muted;
        if muted {
            self.surface.stop_all();
            self.music_started = false;
        }
        self.surface.set_volume(self.settings.effective_sfx_volume());
    }

    pub fn is_muted(&self) -> bool {
        self.settings.muted
    }

    /// Start the background loop unless it is already running
    pub fn start_music(&mut self) {
        if self.music_started || self.settings.effective_music_volume() <= 0.0 {
            return;
        }
        self.surface.play(SoundEffect::Music.clip(), true);
        self.music_started = true;
    }

    /// Play a sound effect
    pub fn play(&mut self, effect: SoundEffect) {
        if effect.looped() {
            self.start_music();
            return;
        }
        if self.settings.effective_sfx_volume() <= 0.0 {
            return;
        }
        self.surface.play(effect.clip(), false);
    }

    pub fn handle_breakout(&mut self, events: &[GameEvent]) {
        for effect in events.iter().filter_map(SoundEffect::for_breakout) {
            self.play(effect);
        }
    }

    pub fn handle_pong(&mut self, events: &[PongEvent]) {
        for effect in events.iter().filter_map(SoundEffect::for_pong) {
            self.play(effect);
        }
    }
}
