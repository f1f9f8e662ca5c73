//! Rendering interface
//!
//! The games describe a frame as sprite and mesh draw calls against a
//! [`RenderSurface`]. How those reach the GPU is up to the host; the
//! [`DrawList`] recorder packs them into upload-ready instance buffers.

pub mod batch;
pub mod draw;

pub use batch::{DrawList, MeshInstance, SpriteInstance};
pub use draw::{BreakoutTextures, PongMeshes, draw_breakout, draw_pong};

use glam::{Mat4, Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::sim::Effects;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TextureId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MeshId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ShaderId(pub u32);

/// Draw target supplied by the host. Calls are fire-and-forget.
pub trait RenderSurface {
    /// Textured quad; `position` is the top-left corner, `rotation` in radians
    fn draw_sprite(&mut self, texture: TextureId, position: Vec2, size: Vec2, rotation: f32, tint: Vec3);

    /// Mesh with a clip-from-model `transform`
    fn draw_mesh(&mut self, mesh: MeshId, shader: ShaderId, transform: Mat4);

    /// Full-screen effect flags for the frame
    fn post_effects(&mut self, _effects: &Effects) {}
}
