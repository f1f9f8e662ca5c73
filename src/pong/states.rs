//! TeaPong game states

use super::world::{PongWorld, Side};
use super::{MENU, PAUSE, PLAY, WIN};
use crate::fsm::{State, Transition};
use crate::platform::{InputSurface, Key};

/// Waiting for Enter. Leaving the menu starts a fresh match.
#[derive(Debug, Default)]
pub struct MenuState;

impl State<PongWorld> for MenuState {
    fn execute(&mut self, world: &mut PongWorld, _dt: f32) -> Transition {
        if world.input.just_pressed(Key::Enter) {
            Transition::Change(PLAY)
        } else {
            Transition::Stay
        }
    }

    fn exit(&mut self, world: &mut PongWorld) {
        world.reset_match();
    }
}

#[derive(Debug, Default)]
pub struct PlayState;

impl PlayState {
    fn axis(input: &impl InputSurface, negative: Key, positive: Key) -> f32 {
        let mut axis = 0.0;
        if input.is_key_pressed(negative) {
            axis -= 1.0;
        }
        if input.is_key_pressed(positive) {
            axis += 1.0;
        }
        axis
    }
}

impl State<PongWorld> for PlayState {
    fn execute(&mut self, world: &mut PongWorld, dt: f32) -> Transition {
        if world.input.just_pressed(Key::P) {
            return Transition::Change(PAUSE);
        }

        let one = Self::axis(&world.input, Key::A, Key::D);
        let two = Self::axis(&world.input, Key::Left, Key::Right);
        world.move_paddle(Side::One, one, dt);
        world.move_paddle(Side::Two, two, dt);

        match world.step(dt) {
            Some(_) => Transition::Change(WIN),
            None => Transition::Stay,
        }
    }
}

/// Everything frozen until P is pressed again
#[derive(Debug, Default)]
pub struct PauseState;

impl State<PongWorld> for PauseState {
    fn enter(&mut self, _world: &mut PongWorld) {
        log::debug!("Paused");
    }

    fn execute(&mut self, world: &mut PongWorld, _dt: f32) -> Transition {
        if world.input.just_pressed(Key::P) {
            Transition::Revert
        } else {
            Transition::Stay
        }
    }
}

#[derive(Debug, Default)]
pub struct WinState;

impl State<PongWorld> for WinState {
    fn enter(&mut self, world: &mut PongWorld) {
        if let Some(winner) = world.winner() {
            log::info!("Match over: {:?} wins {} - {}", winner, world.scores[0], world.scores[1]);
        }
    }

    fn execute(&mut self, world: &mut PongWorld, _dt: f32) -> Transition {
        if world.input.just_pressed(Key::Enter) {
            Transition::Change(MENU)
        } else {
            Transition::Stay
        }
    }
}
