//! Per-frame Breakout update
//!
//! `process_input` then `update`, once per rendered frame with that frame's
//! delta time. Neither returns errors; problems are logged and the frame
//! goes on.

use super::collision::circle_aabb_collision;
use super::powerup::{PowerUp, collect_power_ups, roll_spawns, update_power_ups};
use super::resolve::{resolve_block_hit, resolve_paddle_hit};
use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::{BRICK_SCORE, SHAKE_DURATION};
use crate::platform::{InputSurface, Key};

/// Apply keyboard input for the current phase
pub fn process_input<I: InputSurface + ?Sized>(state: &mut GameState, input: &mut I, dt: f32) {
    match state.phase {
        GamePhase::Menu => {
            if input.just_pressed(Key::Enter) {
                state.set_phase(GamePhase::Active);
            }
            if input.just_pressed(Key::W) {
                state.next_level();
            }
            if input.just_pressed(Key::S) {
                state.previous_level();
            }
        }
        GamePhase::Win => {
            if input.just_pressed(Key::Enter) {
                state.effects.chaos = false;
                state.set_phase(GamePhase::Menu);
            }
        }
        GamePhase::Active => {
            let step = state.config.paddle_speed * dt;
            let mut dx = 0.0;
            if input.is_key_pressed(Key::A) {
                dx -= step;
            }
            if input.is_key_pressed(Key::D) {
                dx += step;
            }
            if dx != 0.0 {
                let moved = state.paddle.slide(dx, state.config.width);
                if state.ball.stuck {
                    state.ball.pos.x += moved;
                }
            }
            if input.is_key_pressed(Key::Space) {
                state.ball.stuck = false;
            }
        }
    }
}

/// Advance the game by one frame
pub fn update(state: &mut GameState, dt: f32) {
    state.effects.update_shake(dt);
    if state.phase != GamePhase::Active {
        return;
    }

    state.ball.advance(dt, state.config.width);

    do_collisions(state);

    let expired = update_power_ups(
        &mut state.power_ups,
        dt,
        &mut state.ball,
        &mut state.paddle,
        &mut state.effects,
    );
    state
        .events
        .extend(expired.into_iter().map(GameEvent::PowerUpExpired));

    // Ball fully below the screen
    if state.ball.pos.y - state.ball.radius >= state.config.height {
        state.lives = state.lives.saturating_sub(1);
        state.events.push(GameEvent::LifeLost {
            remaining: state.lives,
        });
        if state.lives == 0 {
            state.reset_level();
            state.set_phase(GamePhase::Menu);
        }
        state.reset_player();
    }

    if state.phase == GamePhase::Active && state.is_level_completed() {
        state.events.push(GameEvent::LevelComplete);
        state.reset_level();
        state.reset_player();
        state.effects.chaos = true;
        state.set_phase(GamePhase::Win);
    }
}

/// Ball vs bricks, power-ups vs paddle, ball vs paddle.
///
/// Only the first brick the ball touches is handled each frame; remaining
/// bricks are checked again next frame.
fn do_collisions(state: &mut GameState) {
    let circle = state.ball.circle();
    let hit = state
        .bricks
        .iter()
        .enumerate()
        .filter(|(_, brick)| !brick.destroyed)
        .map(|(index, brick)| (index, circle_aabb_collision(circle, &brick.aabb())))
        .find(|(_, result)| result.collided);

    if let Some((index, result)) = hit {
        let brick = &mut state.bricks[index];
        let solid = brick.solid;
        if solid {
            state.effects.start_shake(SHAKE_DURATION);
            state.events.push(GameEvent::SolidHit { index });
        } else {
            brick.destroyed = true;
            let origin = brick.pos;
            state.score += BRICK_SCORE;
            state.events.push(GameEvent::BrickDestroyed { index });
            for kind in roll_spawns(&mut state.rng, &state.config.power_up_odds) {
                state
                    .power_ups
                    .push(PowerUp::new(kind, origin, state.config.power_up_fall_speed));
                state.events.push(GameEvent::PowerUpSpawned(kind));
            }
        }
        let pass_through = state.ball.pass_through && !solid;
        resolve_block_hit(&mut state.ball, &result, pass_through);
    }

    let collected = collect_power_ups(
        &mut state.power_ups,
        &mut state.ball,
        &mut state.paddle,
        &mut state.effects,
        state.config.height,
    );
    state
        .events
        .extend(collected.into_iter().map(GameEvent::PowerUpCollected));

    if state.ball.stuck {
        return;
    }
    let result = circle_aabb_collision(state.ball.circle(), &state.paddle.aabb());
    if result.collided {
        let contact = state.paddle.contact();
        resolve_paddle_hit(
            &mut state.ball,
            &result,
            &contact,
            state.config.initial_ball_velocity.x.abs(),
            state.config.paddle_strength,
        );
        state.events.push(GameEvent::PaddleHit);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::Keyboard;
    use crate::settings::BreakoutSettings;
    use crate::sim::collision::Aabb;
    use crate::sim::entity::Brick;
    use crate::sim::level::Level;
    use crate::sim::powerup::{PowerUpKind, PowerUpOdds};
    use glam::{Vec2, Vec3};

    const DT: f32 = 1.0 / 60.0;

    fn no_drops() -> BreakoutSettings {
        BreakoutSettings {
            power_up_odds: PowerUpOdds {
                speed: 0,
                sticky: 0,
                pass_through: 0,
                pad_size_increase: 0,
                confuse: 0,
                chaos: 0,
            },
            ..Default::default()
        }
    }

    fn single_brick(solid: bool) -> GameState {
        let mut state = GameState::new(no_drops(), Level::bundled(), 3);
        state.bricks = vec![
            Brick {
                pos: Vec2::new(0.0, 0.0),
                size: Vec2::new(100.0, 20.0),
                tint: Vec3::ONE,
                solid,
                destroyed: false,
            },
            // Keeps the level incomplete
            Brick {
                pos: Vec2::new(700.0, 0.0),
                size: Vec2::new(100.0, 20.0),
                tint: Vec3::ONE,
                solid: false,
                destroyed: false,
            },
        ];
        state.phase = GamePhase::Active;
        state.ball.stuck = false;
        state
    }

    #[test]
    fn test_menu_enter_starts_once() {
        let mut state = GameState::new(no_drops(), Level::bundled(), 3);
        let mut keys = Keyboard::default();
        keys.press(Key::Enter);
        process_input(&mut state, &mut keys, DT);
        assert_eq!(state.phase, GamePhase::Active);

        // Held Enter on the win screen does not bounce straight back
        state.phase = GamePhase::Win;
        process_input(&mut state, &mut keys, DT);
        assert_eq!(state.phase, GamePhase::Win);
        keys.release(Key::Enter);
        keys.press(Key::Enter);
        process_input(&mut state, &mut keys, DT);
        assert_eq!(state.phase, GamePhase::Menu);
    }

    #[test]
    fn test_menu_level_select() {
        let mut state = GameState::new(no_drops(), Level::bundled(), 3);
        let mut keys = Keyboard::default();
        keys.press(Key::W);
        process_input(&mut state, &mut keys, DT);
        process_input(&mut state, &mut keys, DT);
        assert_eq!(state.level, 1);
        keys.release(Key::W);
        keys.press(Key::S);
        process_input(&mut state, &mut keys, DT);
        assert_eq!(state.level, 0);
    }

    #[test]
    fn test_stuck_ball_follows_paddle_and_launches() {
        let mut state = GameState::new(no_drops(), Level::bundled(), 3);
        state.phase = GamePhase::Active;
        let mut keys = Keyboard::default();
        keys.press(Key::A);
        process_input(&mut state, &mut keys, 0.1);
        assert_eq!(state.paddle.pos.x, 300.0);
        assert_eq!(state.ball.pos.x, 350.0);

        keys.press(Key::Space);
        process_input(&mut state, &mut keys, 0.0);
        assert!(!state.ball.stuck);
    }

    #[test]
    fn test_brick_destroyed_from_below() {
        let mut state = single_brick(false);
        // Next step puts the ball 6.25 into the brick's bottom face
        state.ball.pos = Vec2::new(50.0, 32.5);
        state.ball.vel = Vec2::new(0.0, -375.0);
        update(&mut state, DT);

        assert!(state.bricks[0].destroyed);
        assert_eq!(state.ball.vel, Vec2::new(0.0, 375.0));
        assert_eq!(state.ball.pos.y, 32.5);
        assert!(!circle_aabb_collision(state.ball.circle(), &state.bricks[0].aabb()).collided);
        assert_eq!(state.score, BRICK_SCORE);
        assert!(state.events.contains(&GameEvent::BrickDestroyed { index: 0 }));
    }

    #[test]
    fn test_solid_brick_bounces_and_shakes() {
        let mut state = single_brick(true);
        state.ball.pos = Vec2::new(50.0, 32.5);
        state.ball.vel = Vec2::new(0.0, -375.0);
        update(&mut state, DT);

        assert!(!state.bricks[0].destroyed);
        assert!(state.effects.shake);
        assert!(state.ball.vel.y > 0.0);
        assert!(state.events.contains(&GameEvent::SolidHit { index: 0 }));
    }

    #[test]
    fn test_pass_through_only_ignores_destructible() {
        let mut state = single_brick(false);
        state.ball.pass_through = true;
        state.ball.pos = Vec2::new(50.0, 32.5);
        state.ball.vel = Vec2::new(0.0, -375.0);
        update(&mut state, DT);
        assert!(state.bricks[0].destroyed);
        assert_eq!(state.ball.vel, Vec2::new(0.0, -375.0));

        let mut state = single_brick(true);
        state.ball.pass_through = true;
        state.ball.pos = Vec2::new(50.0, 32.5);
        state.ball.vel = Vec2::new(0.0, -375.0);
        update(&mut state, DT);
        assert_eq!(state.ball.vel, Vec2::new(0.0, 375.0));
    }

    #[test]
    fn test_one_brick_per_frame() {
        let mut state = single_brick(false);
        // Two bricks stacked; the ball overlaps both
        state.bricks[1].pos = Vec2::new(0.0, 20.0);
        state.ball.pos = Vec2::new(50.0, 25.0);
        state.ball.vel = Vec2::ZERO;
        update(&mut state, DT);
        let destroyed = state.bricks.iter().filter(|b| b.destroyed).count();
        assert_eq!(destroyed, 1);
        assert!(state.bricks[0].destroyed);
    }

    #[test]
    fn test_paddle_bounce_keeps_speed() {
        let mut state = single_brick(false);
        state.ball.pos = Vec2::new(425.0, 562.0);
        state.ball.vel = Vec2::new(-120.0, 420.0);
        let speed = state.ball.vel.length();
        update(&mut state, DT);
        assert!(state.events.contains(&GameEvent::PaddleHit));
        assert!((state.ball.vel.length() - speed).abs() < 1e-2);
        assert!(state.ball.vel.y < 0.0);
        assert!(state.ball.vel.x > 0.0);
    }

    #[test]
    fn test_loss_goes_to_menu_once() {
        let mut state = single_brick(false);
        state.lives = 1;
        state.ball.pos = Vec2::new(400.0, 640.0);
        state.ball.vel = Vec2::new(0.0, 100.0);
        update(&mut state, DT);

        assert_eq!(state.phase, GamePhase::Menu);
        assert_eq!(state.lives, 3);
        assert!(state.ball.stuck);
        let menus = |events: &[GameEvent]| {
            events
                .iter()
                .filter(|e| **e == GameEvent::PhaseChanged(GamePhase::Menu))
                .count()
        };
        assert_eq!(menus(&state.drain_events()), 1);

        // Subsequent frames, even back in play, do not repeat the transition
        update(&mut state, DT);
        state.set_phase(GamePhase::Active);
        for _ in 0..10 {
            update(&mut state, DT);
        }
        assert_eq!(menus(&state.drain_events()), 0);
        assert_eq!(state.phase, GamePhase::Active);
    }

    #[test]
    fn test_life_lost_keeps_playing() {
        let mut state = single_brick(false);
        state.ball.pos = Vec2::new(400.0, 640.0);
        state.ball.vel = Vec2::new(0.0, 100.0);
        update(&mut state, DT);
        assert_eq!(state.phase, GamePhase::Active);
        assert_eq!(state.lives, 2);
        assert!(state.ball.stuck);
        assert!(state.events.contains(&GameEvent::LifeLost { remaining: 2 }));
    }

    #[test]
    fn test_clearing_level_wins_with_chaos() {
        let mut state = single_brick(false);
        state.bricks[1].destroyed = true;
        state.ball.pos = Vec2::new(50.0, 32.5);
        state.ball.vel = Vec2::new(0.0, -375.0);
        update(&mut state, DT);

        assert_eq!(state.phase, GamePhase::Win);
        assert!(state.effects.chaos);
        assert!(state.events.contains(&GameEvent::LevelComplete));
        // Level rebuilt for the next round
        assert!(!state.is_level_completed());
    }

    #[test]
    fn test_power_up_drops_and_collects() {
        let mut config = no_drops();
        config.power_up_odds.sticky = 1;
        let mut state = GameState::new(config, Level::bundled(), 3);
        state.bricks = vec![Brick {
            pos: Vec2::new(350.0, 540.0),
            size: Vec2::new(100.0, 20.0),
            tint: Vec3::ONE,
            solid: false,
            destroyed: false,
        }];
        state.bricks.push(Brick {
            pos: Vec2::new(0.0, 0.0),
            size: Vec2::new(10.0, 10.0),
            tint: Vec3::ONE,
            solid: false,
            destroyed: false,
        });
        state.phase = GamePhase::Active;
        state.ball.stuck = false;
        state.ball.vel = Vec2::ZERO;

        // Knock the low brick out directly
        let aabb: Aabb = state.bricks[0].aabb();
        state.ball.pos = Vec2::new(aabb.center().x, aabb.pos.y + aabb.size.y + 6.0);
        update(&mut state, DT);
        assert!(state.events.contains(&GameEvent::PowerUpSpawned(PowerUpKind::Sticky)));
        assert_eq!(state.power_ups.len(), 1);

        // Park the ball and let the power-up fall onto the paddle
        state.ball.pos = Vec2::new(100.0, 100.0);
        state.ball.vel = Vec2::ZERO;
        for _ in 0..30 {
            update(&mut state, DT);
        }
        assert!(state.events.contains(&GameEvent::PowerUpCollected(PowerUpKind::Sticky)));
        assert!(state.ball.sticky);
    }
}
