//! Tea Arcade entry point
//!
//! Runs either game headless for a number of frames with a simple autopilot
//! at the keyboard. Draw calls go to a `DrawList`, sounds to the log.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use tea_arcade::Settings;
use tea_arcade::audio::{AudioManager, LogAudio};
use tea_arcade::platform::{FrameClock, InputSurface, Key, Keyboard};
use tea_arcade::pong::{PLAY, Side, TeaPong};
use tea_arcade::renderer::{BreakoutTextures, DrawList, PongMeshes, draw_breakout, draw_pong};
use tea_arcade::resources::{HeadlessLoader, ResourceManager};
use tea_arcade::sim::{GamePhase, GameState, process_input, update};

const FRAME_TIME: f64 = 1.0 / 60.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Game {
    Breakout,
    Teapong,
}

#[derive(Debug, Parser)]
#[command(name = "tea-arcade", version, about = "Breakout and TeaPong, headless")]
struct Args {
    /// Game to run
    #[arg(value_enum, default_value_t = Game::Breakout)]
    game: Game,
    /// Frames to simulate at 60 fps
    #[arg(short, long, default_value_t = 3600)]
    frames: u32,
    /// Settings file (JSON); defaults are used when missing
    #[arg(short, long)]
    settings: Option<PathBuf>,
    /// Override the RNG seed from the settings
    #[arg(long)]
    seed: Option<u64>,
    /// Write the effective settings to this file and exit
    #[arg(long)]
    write_settings: Option<PathBuf>,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let mut settings = match &args.settings {
        Some(path) => Settings::load(path),
        None => Settings::default(),
    };
    if let Some(seed) = args.seed {
        settings.seed = seed;
    }

    if let Some(path) = &args.write_settings {
        if let Err(e) = settings.save(path) {
            log::error!("Failed to write settings: {}", e);
            std::process::exit(1);
        }
        return;
    }

    log::info!("Tea Arcade starting ({:?}, {} frames)...", args.game, args.frames);
    match args.game {
        Game::Breakout => run_breakout(settings, args.frames),
        Game::Teapong => run_teapong(settings, args.frames),
    }
}

/// Press `key` this frame, re-arming its edge trigger
fn tap(keys: &mut Keyboard, key: Key) {
    keys.release(key);
    keys.press(key);
}

fn hold(keys: &mut Keyboard, key: Key, down: bool) {
    if down {
        keys.press(key);
    } else {
        keys.release(key);
    }
}

fn run_breakout(settings: Settings, frames: u32) {
    let mut state = GameState::from_settings(settings.breakout, settings.seed);
    let mut resources = ResourceManager::new(HeadlessLoader::default());
    let Some(textures) = BreakoutTextures::load(&mut resources) else {
        log::error!("Breakout textures unavailable");
        return;
    };
    let mut audio = AudioManager::new(LogAudio::default(), settings.audio);
    audio.start_music();

    let mut keys = Keyboard::default();
    let mut clock = FrameClock::new();
    let mut draws = DrawList::new();
    let mut draw_calls = 0usize;
    let mut wins = 0u32;

    for frame in 0..frames {
        let dt = clock.tick(f64::from(frame) * FRAME_TIME);

        match state.phase {
            GamePhase::Menu | GamePhase::Win => tap(&mut keys, Key::Enter),
            GamePhase::Active => {
                let target = state.ball.pos.x;
                let center = state.paddle.center().x;
                hold(&mut keys, Key::A, target < center - 10.0);
                hold(&mut keys, Key::D, target > center + 10.0);
                hold(&mut keys, Key::Space, true);
            }
        }

        process_input(&mut state, &mut keys, dt);
        update(&mut state, dt);
        keys.end_frame();

        let events = state.drain_events();
        wins += events
            .iter()
            .filter(|e| matches!(e, tea_arcade::sim::GameEvent::LevelComplete))
            .count() as u32;
        audio.handle_breakout(&events);

        draws.clear();
        draw_breakout(&state, &textures, &mut draws);
        draw_calls += draws.len();
    }

    log::info!(
        "Breakout done: phase {:?}, score {}, lives {}, levels cleared {}, {} draw calls, {} sounds",
        state.phase,
        state.score,
        state.lives,
        wins,
        draw_calls,
        audio.surface().played.len()
    );
}

fn run_teapong(settings: Settings, frames: u32) {
    let mut game = TeaPong::new(settings.pong);
    let mut resources = ResourceManager::new(HeadlessLoader::default());
    let Some(meshes) = PongMeshes::load(&mut resources) else {
        log::error!("TeaPong meshes unavailable");
        return;
    };
    let mut audio = AudioManager::new(LogAudio::default(), settings.audio);

    let mut clock = FrameClock::new();
    let mut draws = DrawList::new();
    let mut draw_calls = 0usize;

    for frame in 0..frames {
        let dt = clock.tick(f64::from(frame) * FRAME_TIME);

        if game.current_state() == PLAY {
            let ball = game.world.ball.pos.x;
            for (side, left, right) in [(Side::One, Key::A, Key::D), (Side::Two, Key::Left, Key::Right)] {
                let paddle = game.world.paddles[side.index()].pos.x;
                let keys = &mut game.world.input;
                hold(keys, left, ball < paddle - 0.2);
                hold(keys, right, ball > paddle + 0.2);
            }
        } else if game.world.input.is_key_pressed(Key::Enter) {
            game.world.input.release(Key::Enter);
        } else {
            game.world.input.press(Key::Enter);
        }

        game.frame(dt);
        audio.handle_pong(&game.world.drain_events());

        draws.clear();
        draw_pong(&game, &meshes, 4.0 / 3.0, &mut draws);
        draw_calls += draws.len();
    }

    log::info!(
        "TeaPong done: state '{}', score {} - {}, {} draw calls, {} sounds",
        game.current_state(),
        game.world.score(Side::One),
        game.world.score(Side::Two),
        draw_calls,
        audio.surface().played.len()
    );
}
