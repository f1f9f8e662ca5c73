//! Orbit camera around the table
//!
//! Cursor movement orbits, scroll zooms. Only rendering reads it.

use glam::{Mat4, Vec2, Vec3};
use serde::{Deserialize, Serialize};

const MIN_PITCH: f32 = 0.05;
const MAX_PITCH: f32 = 1.5;
const MIN_DISTANCE: f32 = 4.0;
const MAX_DISTANCE: f32 = 40.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrbitCamera {
    /// Point the camera looks at
    pub target: Vec3,
    /// Rotation around Y in radians; 0 looks from +Z
    pub yaw: f32,
    /// Elevation above the table plane in radians
    pub pitch: f32,
    pub distance: f32,
    /// Radians per pixel of cursor movement
    pub sensitivity: f32,
    /// Distance per scroll step
    pub zoom_speed: f32,
    pub fov_y: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self {
            target: Vec3::new(0.0, 1.0, 0.0),
            yaw: 0.0,
            pitch: 0.6,
            distance: 14.0,
            sensitivity: 0.005,
            zoom_speed: 1.0,
            fov_y: 45f32.to_radians(),
            near: 0.1,
            far: 100.0,
        }
    }
}

impl OrbitCamera {
    pub fn looking_at(target: Vec3) -> Self {
        Self {
            target,
            ..Default::default()
        }
    }

    pub fn orbit(&mut self, cursor_delta: Vec2) {
        self.yaw -= cursor_delta.x * self.sensitivity;
        self.pitch = (self.pitch + cursor_delta.y * self.sensitivity).clamp(MIN_PITCH, MAX_PITCH);
    }

    pub fn zoom(&mut self, scroll: f32) {
        self.distance = (self.distance - scroll * self.zoom_speed).clamp(MIN_DISTANCE, MAX_DISTANCE);
    }

    pub fn eye(&self) -> Vec3 {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        self.target + self.distance * Vec3::new(cos_pitch * sin_yaw, sin_pitch, cos_pitch * cos_yaw)
    }

    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye(), self.target, Vec3::Y)
    }

    pub fn projection(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, aspect, self.near, self.far)
    }
}
