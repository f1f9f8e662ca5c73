//! TeaPong: two paddles on a 3D table
//!
//! The world holds the physics; a state machine with menu, play, pause and
//! win states decides what runs each frame.

pub mod camera;
pub mod states;
pub mod world;

pub use camera::OrbitCamera;
pub use world::{PongBall, PongEvent, PongPaddle, PongWorld, Side};

use crate::fsm::FiniteStateMachine;
use crate::platform::InputSurface;
use crate::settings::PongSettings;
use states::{MenuState, PauseState, PlayState, WinState};

pub const MENU: &str = "menu";
pub const PLAY: &str = "play";
pub const PAUSE: &str = "pause";
pub const WIN: &str = "win";

/// A TeaPong game: world, camera and state machine
#[derive(Debug)]
pub struct TeaPong {
    pub world: PongWorld,
    pub camera: OrbitCamera,
    fsm: FiniteStateMachine<PongWorld>,
}

impl TeaPong {
    pub fn new(config: PongSettings) -> Self {
        let camera = OrbitCamera::looking_at(glam::Vec3::new(0.0, config.table_height, 0.0));
        let mut world = PongWorld::new(config);
        let mut fsm = FiniteStateMachine::<PongWorld>::new(MENU, Box::new(MenuState), &mut world);
        fsm.add_state(PLAY, Box::new(PlayState));
        fsm.add_state(PAUSE, Box::new(PauseState));
        fsm.add_state(WIN, Box::new(WinState));
        Self { world, camera, fsm }
    }

    /// Run one frame: camera from pointer input, then the current state
    pub fn frame(&mut self, dt: f32) {
        self.camera.orbit(self.world.input.cursor_delta());
        self.camera.zoom(self.world.input.scroll_delta());
        self.fsm.execute_current_state(&mut self.world, dt);
        self.world.input.end_frame();
    }

    pub fn current_state(&self) -> &str {
        self.fsm.current_state_id()
    }

    /// Force a state change, e.g. from a host menu
    pub fn change_state(&mut self, name: &str) -> bool {
        self.fsm.change_state(name, &mut self.world)
    }
}
