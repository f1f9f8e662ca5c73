//! Instance data for batched drawing

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec2, Vec3};

use super::{MeshId, RenderSurface, ShaderId, TextureId};
use crate::sim::Effects;

/// One textured quad
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct SpriteInstance {
    pub position: [f32; 2],
    pub size: [f32; 2],
    pub tint: [f32; 3],
    pub rotation: f32,
    pub texture: u32,
}

impl SpriteInstance {
    pub fn new(texture: TextureId, position: Vec2, size: Vec2, rotation: f32, tint: Vec3) -> Self {
        Self {
            position: position.to_array(),
            size: size.to_array(),
            tint: tint.to_array(),
            rotation,
            texture: texture.0,
        }
    }
}

/// One mesh draw
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct MeshInstance {
    pub transform: [[f32; 4]; 4],
    pub mesh: u32,
    pub shader: u32,
}

/// Records a frame of draw calls
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    pub sprites: Vec<SpriteInstance>,
    pub meshes: Vec<MeshInstance>,
    pub effects: Effects,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.sprites.clear();
        self.meshes.clear();
        self.effects = Effects::default();
    }

    pub fn len(&self) -> usize {
        self.sprites.len() + self.meshes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Sprite instances as raw bytes for a vertex buffer
    pub fn sprite_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.sprites)
    }

    pub fn mesh_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.meshes)
    }
}

impl RenderSurface for DrawList {
    fn draw_sprite(&mut self, texture: TextureId, position: Vec2, size: Vec2, rotation: f32, tint: Vec3) {
        self.sprites
            .push(SpriteInstance::new(texture, position, size, rotation, tint));
    }

    fn draw_mesh(&mut self, mesh: MeshId, shader: ShaderId, transform: Mat4) {
        self.meshes.push(MeshInstance {
            transform: transform.to_cols_array_2d(),
            mesh: mesh.0,
            shader: shader.0,
        });
    }

    fn post_effects(&mut self, effects: &Effects) {
        self.effects = effects.clone();
    }
}
