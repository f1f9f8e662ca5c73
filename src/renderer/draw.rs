//! Scene drawing for both games

use glam::{Mat4, Quat, Vec2, Vec3};

use super::{MeshId, RenderSurface, ShaderId, TextureId};
use crate::pong::TeaPong;
use crate::resources::{AssetLoader, ResourceManager};
use crate::sim::entity::WHITE;
use crate::sim::{GameState, PowerUpKind};

/// Thickness of the table top and the paddles
const TABLE_THICKNESS: f32 = 0.1;
const PADDLE_HEIGHT: f32 = 0.3;

/// Texture handles used by Breakout
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BreakoutTextures {
    pub background: TextureId,
    pub ball: TextureId,
    pub paddle: TextureId,
    pub block: TextureId,
    pub block_solid: TextureId,
    /// Indexed like `PowerUpKind::ALL`
    pub power_ups: [TextureId; 6],
}

impl BreakoutTextures {
    /// Load (or reuse) every Breakout texture. `None` if any is missing.
    pub fn load<L: AssetLoader>(resources: &mut ResourceManager<L>) -> Option<Self> {
        let background = resources.load_texture("background", "textures/background.jpg", false)?;
        let ball = resources.load_texture("face", "textures/awesomeface.png", true)?;
        let paddle = resources.load_texture("paddle", "textures/paddle.png", true)?;
        let block = resources.load_texture("block", "textures/block.png", false)?;
        let block_solid = resources.load_texture("block_solid", "textures/block_solid.png", false)?;

        let mut power_ups = [TextureId(0); 6];
        for (slot, kind) in power_ups.iter_mut().zip(PowerUpKind::ALL) {
            let name = kind.texture_name();
            *slot = resources.load_texture(name, format!("textures/{}.png", name), true)?;
        }

        Some(Self {
            background,
            ball,
            paddle,
            block,
            block_solid,
            power_ups,
        })
    }

    fn power_up(&self, kind: PowerUpKind) -> TextureId {
        let index = PowerUpKind::ALL
            .iter()
            .position(|&k| k == kind)
            .unwrap_or_default();
        self.power_ups[index]
    }
}

/// Mesh handles used by TeaPong
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PongMeshes {
    pub table: MeshId,
    pub paddle: MeshId,
    pub ball: MeshId,
    pub shader: ShaderId,
}

impl PongMeshes {
    pub fn load<L: AssetLoader>(resources: &mut ResourceManager<L>) -> Option<Self> {
        Some(Self {
            table: resources.load_mesh("table", "models/table.obj")?,
            paddle: resources.load_mesh("paddle", "models/paddle.obj")?,
            ball: resources.load_mesh("teapot", "models/teapot.obj")?,
            shader: resources.load_shader("model", "shaders/model.vs", "shaders/model.fs")?,
        })
    }
}

/// Emit one Breakout frame. Destroyed bricks and collected power-ups are skipped.
pub fn draw_breakout<R: RenderSurface + ?Sized>(
    state: &GameState,
    textures: &BreakoutTextures,
    surface: &mut R,
) {
    let screen = Vec2::new(state.config.width, state.config.height);
    surface.draw_sprite(textures.background, Vec2::ZERO, screen, 0.0, WHITE);

    for brick in state.bricks.iter().filter(|b| !b.destroyed) {
        let texture = if brick.solid {
            textures.block_solid
        } else {
            textures.block
        };
        surface.draw_sprite(texture, brick.pos, brick.size, 0.0, brick.tint);
    }

    let paddle = &state.paddle;
    surface.draw_sprite(textures.paddle, paddle.pos, paddle.size, 0.0, paddle.tint);

    for power_up in state.power_ups.iter().filter(|p| !p.destroyed) {
        surface.draw_sprite(
            textures.power_up(power_up.kind),
            power_up.pos,
            power_up.size,
            0.0,
            power_up.kind.tint(),
        );
    }

    let ball = &state.ball;
    surface.draw_sprite(
        textures.ball,
        ball.pos - Vec2::splat(ball.radius),
        Vec2::splat(ball.radius * 2.0),
        0.0,
        ball.tint,
    );

    surface.post_effects(&state.effects);
}

/// Emit one TeaPong frame seen through the game's orbit camera
pub fn draw_pong<R: RenderSurface + ?Sized>(
    game: &TeaPong,
    meshes: &PongMeshes,
    aspect: f32,
    surface: &mut R,
) {
    let world = &game.world;
    let config = &world.config;
    let view_projection = game.camera.projection(aspect) * game.camera.view();

    let table = Mat4::from_scale_rotation_translation(
        Vec3::new(
            config.table_half_width * 2.0,
            TABLE_THICKNESS,
            config.table_half_length * 2.0,
        ),
        Quat::IDENTITY,
        Vec3::new(0.0, config.table_height - TABLE_THICKNESS / 2.0, 0.0),
    );
    surface.draw_mesh(meshes.table, meshes.shader, view_projection * table);

    for paddle in &world.paddles {
        let model = Mat4::from_scale_rotation_translation(
            Vec3::new(paddle.size.x, PADDLE_HEIGHT, paddle.size.y),
            Quat::IDENTITY,
            paddle.pos + Vec3::Y * (PADDLE_HEIGHT / 2.0),
        );
        surface.draw_mesh(meshes.paddle, meshes.shader, view_projection * model);
    }

    let ball = Mat4::from_scale_rotation_translation(
        Vec3::splat(world.ball.radius * 2.0),
        Quat::IDENTITY,
        world.ball.pos,
    );
    surface.draw_mesh(meshes.ball, meshes.shader, view_projection * ball);
}
