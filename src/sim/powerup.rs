//! Timed power-ups dropped by destroyed bricks
//!
//! Lifecycle: spawned (falling) -> collected -> activated -> expired ->
//! reaped. A power-up is `destroyed` as soon as it is collected or falls off
//! the screen; it stays in the collection while `activated` so its timer can
//! run out, and is removed once `destroyed && !activated`.

use glam::{Vec2, Vec3};
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::{Aabb, aabb_overlap};
use super::entity::{Ball, Paddle, WHITE};
use crate::consts::{PAD_SIZE_INCREASE, POWER_UP_SIZE, SPEED_BOOST};

/// Paddle tint while sticky
pub const STICKY_TINT: Vec3 = Vec3::new(1.0, 0.5, 1.0);
/// Ball tint while passing through bricks
pub const PASS_THROUGH_TINT: Vec3 = Vec3::new(1.0, 0.5, 0.5);

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerUpKind {
    Speed,
    Sticky,
    PassThrough,
    PadSizeIncrease,
    Confuse,
    Chaos,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 6] = [
        PowerUpKind::Speed,
        PowerUpKind::Sticky,
        PowerUpKind::PassThrough,
        PowerUpKind::PadSizeIncrease,
        PowerUpKind::Confuse,
        PowerUpKind::Chaos,
    ];

    /// Effect duration in seconds; 0 means the effect is applied once and kept
    pub fn duration(self) -> f32 {
        match self {
            PowerUpKind::Speed | PowerUpKind::PadSizeIncrease => 0.0,
            PowerUpKind::Sticky => 20.0,
            PowerUpKind::PassThrough => 10.0,
            PowerUpKind::Confuse | PowerUpKind::Chaos => 15.0,
        }
    }

    pub fn tint(self) -> Vec3 {
        match self {
            PowerUpKind::Speed => Vec3::new(0.5, 0.5, 1.0),
            PowerUpKind::Sticky => STICKY_TINT,
            PowerUpKind::PassThrough => Vec3::new(0.5, 1.0, 0.5),
            PowerUpKind::PadSizeIncrease => Vec3::new(1.0, 0.6, 0.4),
            PowerUpKind::Confuse => Vec3::new(1.0, 0.3, 0.3),
            PowerUpKind::Chaos => Vec3::new(0.9, 0.25, 0.25),
        }
    }

    /// Logical texture name used by the renderer
    pub fn texture_name(self) -> &'static str {
        match self {
            PowerUpKind::Speed => "powerup_speed",
            PowerUpKind::Sticky => "powerup_sticky",
            PowerUpKind::PassThrough => "powerup_passthrough",
            PowerUpKind::PadSizeIncrease => "powerup_increase",
            PowerUpKind::Confuse => "powerup_confuse",
            PowerUpKind::Chaos => "powerup_chaos",
        }
    }
}

/// Spawn odds per kind, as "one in N" (0 disables the kind)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PowerUpOdds {
    pub speed: u32,
    pub sticky: u32,
    pub pass_through: u32,
    pub pad_size_increase: u32,
    pub confuse: u32,
    pub chaos: u32,
}

impl Default for PowerUpOdds {
    fn default() -> Self {
        Self {
            speed: 75,
            sticky: 75,
            pass_through: 75,
            pad_size_increase: 75,
            // Negative effects drop far more often
            confuse: 15,
            chaos: 15,
        }
    }
}

impl PowerUpOdds {
    pub fn one_in(&self, kind: PowerUpKind) -> u32 {
        match kind {
            PowerUpKind::Speed => self.speed,
            PowerUpKind::Sticky => self.sticky,
            PowerUpKind::PassThrough => self.pass_through,
            PowerUpKind::PadSizeIncrease => self.pad_size_increase,
            PowerUpKind::Confuse => self.confuse,
            PowerUpKind::Chaos => self.chaos,
        }
    }
}

/// Screen-wide effect flags toggled by power-ups
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Effects {
    pub confuse: bool,
    pub chaos: bool,
    pub shake: bool,
    /// Seconds of shake left
    pub shake_time: f32,
}

impl Effects {
    /// Start (or restart) a screen shake
    pub fn start_shake(&mut self, seconds: f32) {
        self.shake = true;
        self.shake_time = seconds;
    }

    pub fn update_shake(&mut self, dt: f32) {
        if self.shake_time > 0.0 {
            self.shake_time -= dt;
            if self.shake_time <= 0.0 {
                self.shake = false;
            }
        }
    }
}

/// A falling or active power-up
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUp {
    pub kind: PowerUpKind,
    pub pos: Vec2,
    pub size: Vec2,
    pub vel: Vec2,
    /// Seconds of effect left once activated
    pub duration: f32,
    pub activated: bool,
    pub destroyed: bool,
}

impl PowerUp {
    pub fn new(kind: PowerUpKind, pos: Vec2, fall_speed: f32) -> Self {
        Self {
            kind,
            pos,
            size: POWER_UP_SIZE,
            vel: Vec2::new(0.0, fall_speed),
            duration: kind.duration(),
            activated: false,
            destroyed: false,
        }
    }

    #[inline]
    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }
}

/// One independent 1-in-`one_in` trial
fn should_spawn<R: Rng>(rng: &mut R, one_in: u32) -> bool {
    one_in > 0 && rng.random_range(0..one_in) == 0
}

/// Roll every kind independently; any number of kinds may drop at once.
pub fn roll_spawns<R: Rng>(rng: &mut R, odds: &PowerUpOdds) -> Vec<PowerUpKind> {
    PowerUpKind::ALL
        .into_iter()
        .filter(|&kind| should_spawn(rng, odds.one_in(kind)))
        .collect()
}

/// Whether a power-up of `kind` other than an expired one is still running
pub fn is_other_active(power_ups: &[PowerUp], kind: PowerUpKind) -> bool {
    power_ups.iter().any(|p| p.activated && p.kind == kind)
}

/// Apply the effect of a collected power-up.
///
/// Confuse and chaos exclude each other: triggering one while the other is
/// on does nothing.
pub fn activate(kind: PowerUpKind, ball: &mut Ball, paddle: &mut Paddle, effects: &mut Effects) {
    match kind {
        PowerUpKind::Speed => ball.vel *= SPEED_BOOST,
        PowerUpKind::Sticky => {
            ball.sticky = true;
            paddle.tint = STICKY_TINT;
        }
        PowerUpKind::PassThrough => {
            ball.pass_through = true;
            ball.tint = PASS_THROUGH_TINT;
        }
        PowerUpKind::PadSizeIncrease => paddle.size.x += PAD_SIZE_INCREASE,
        PowerUpKind::Confuse => {
            if !effects.chaos {
                effects.confuse = true;
            }
        }
        PowerUpKind::Chaos => {
            if !effects.confuse {
                effects.chaos = true;
            }
        }
    }
    log::debug!("Power-up activated: {:?}", kind);
}

/// Revert the flag set by `kind`. One-shot kinds have nothing to revert.
fn deactivate(kind: PowerUpKind, ball: &mut Ball, paddle: &mut Paddle, effects: &mut Effects) {
    match kind {
        PowerUpKind::Sticky => {
            ball.sticky = false;
            paddle.tint = WHITE;
        }
        PowerUpKind::PassThrough => {
            ball.pass_through = false;
            ball.tint = WHITE;
        }
        PowerUpKind::Confuse => effects.confuse = false,
        PowerUpKind::Chaos => effects.chaos = false,
        PowerUpKind::Speed | PowerUpKind::PadSizeIncrease => {}
    }
}

/// Collect power-ups touching the paddle and retire those that fell past `bottom`.
///
/// Returns the kinds collected this frame.
pub fn collect_power_ups(
    power_ups: &mut [PowerUp],
    ball: &mut Ball,
    paddle: &mut Paddle,
    effects: &mut Effects,
    bottom: f32,
) -> Vec<PowerUpKind> {
    let mut collected = Vec::new();
    for power_up in power_ups.iter_mut().filter(|p| !p.destroyed) {
        if power_up.pos.y >= bottom {
            power_up.destroyed = true;
        }
        if aabb_overlap(&paddle.aabb(), &power_up.aabb()) {
            activate(power_up.kind, ball, paddle, effects);
            power_up.destroyed = true;
            power_up.activated = true;
            collected.push(power_up.kind);
        }
    }
    collected
}

/// Advance, age and reap power-ups. Returns the kinds that expired this frame.
///
/// A flag is only reverted when no other instance of the same kind is still
/// active, so overlapping pick-ups extend rather than cut short the effect.
pub fn update_power_ups(
    power_ups: &mut Vec<PowerUp>,
    dt: f32,
    ball: &mut Ball,
    paddle: &mut Paddle,
    effects: &mut Effects,
) -> Vec<PowerUpKind> {
    let mut expired = Vec::new();
    for i in 0..power_ups.len() {
        let power_up = &mut power_ups[i];
        power_up.pos += power_up.vel * dt;
        if !power_up.activated {
            continue;
        }
        power_up.duration -= dt;
        if power_up.duration <= 0.0 {
            power_up.activated = false;
            let kind = power_up.kind;
            if !is_other_active(&power_ups[..], kind) {
                deactivate(kind, ball, paddle, effects);
            }
            expired.push(kind);
        }
    }
    power_ups.retain(|p| !(p.destroyed && !p.activated));
    expired
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn actors() -> (Ball, Paddle, Effects) {
        (
            Ball::new(Vec2::new(400.0, 567.5), 12.5, Vec2::new(100.0, -350.0)),
            Paddle::new(Vec2::new(350.0, 580.0), Vec2::new(100.0, 20.0)),
            Effects::default(),
        )
    }

    fn collected(kind: PowerUpKind, duration: f32) -> PowerUp {
        let mut power_up = PowerUp::new(kind, Vec2::new(0.0, 700.0), 0.0);
        power_up.duration = duration;
        power_up.activated = true;
        power_up.destroyed = true;
        power_up
    }

    #[test]
    fn test_overlapping_sticky_does_not_revert_early() {
        let (mut ball, mut paddle, mut effects) = actors();
        activate(PowerUpKind::Sticky, &mut ball, &mut paddle, &mut effects);
        activate(PowerUpKind::Sticky, &mut ball, &mut paddle, &mut effects);
        let mut power_ups = vec![
            collected(PowerUpKind::Sticky, 1.0),
            collected(PowerUpKind::Sticky, 3.0),
        ];

        // First expires, second still running
        let expired = update_power_ups(&mut power_ups, 1.5, &mut ball, &mut paddle, &mut effects);
        assert_eq!(expired, vec![PowerUpKind::Sticky]);
        assert!(ball.sticky);
        assert_eq!(paddle.tint, STICKY_TINT);
        assert_eq!(power_ups.len(), 1);

        // Second expires
        update_power_ups(&mut power_ups, 2.0, &mut ball, &mut paddle, &mut effects);
        assert!(!ball.sticky);
        assert_eq!(paddle.tint, WHITE);
        assert!(power_ups.is_empty());
    }

    #[test]
    fn test_simultaneous_expiry_reverts_once_both_done() {
        let (mut ball, mut paddle, mut effects) = actors();
        activate(PowerUpKind::PassThrough, &mut ball, &mut paddle, &mut effects);
        let mut power_ups = vec![
            collected(PowerUpKind::PassThrough, 0.5),
            collected(PowerUpKind::PassThrough, 0.25),
        ];
        let expired = update_power_ups(&mut power_ups, 1.0, &mut ball, &mut paddle, &mut effects);
        assert_eq!(expired.len(), 2);
        assert!(!ball.pass_through);
    }

    #[test]
    fn test_different_kind_does_not_block_revert() {
        let (mut ball, mut paddle, mut effects) = actors();
        activate(PowerUpKind::Sticky, &mut ball, &mut paddle, &mut effects);
        activate(PowerUpKind::PassThrough, &mut ball, &mut paddle, &mut effects);
        let mut power_ups = vec![
            collected(PowerUpKind::Sticky, 0.5),
            collected(PowerUpKind::PassThrough, 5.0),
        ];
        update_power_ups(&mut power_ups, 1.0, &mut ball, &mut paddle, &mut effects);
        assert!(!ball.sticky);
        assert!(ball.pass_through);
    }

    #[test]
    fn test_confuse_and_chaos_exclusive() {
        let (mut ball, mut paddle, mut effects) = actors();
        activate(PowerUpKind::Chaos, &mut ball, &mut paddle, &mut effects);
        activate(PowerUpKind::Confuse, &mut ball, &mut paddle, &mut effects);
        assert!(effects.chaos);
        assert!(!effects.confuse);

        let mut effects = Effects::default();
        activate(PowerUpKind::Confuse, &mut ball, &mut paddle, &mut effects);
        activate(PowerUpKind::Chaos, &mut ball, &mut paddle, &mut effects);
        assert!(effects.confuse);
        assert!(!effects.chaos);
    }

    #[test]
    fn test_one_shot_kinds() {
        let (mut ball, mut paddle, mut effects) = actors();
        activate(PowerUpKind::Speed, &mut ball, &mut paddle, &mut effects);
        activate(PowerUpKind::PadSizeIncrease, &mut ball, &mut paddle, &mut effects);
        assert!((ball.vel - Vec2::new(120.0, -420.0)).length() < 1e-3);
        assert_eq!(paddle.size.x, 150.0);

        // Duration 0: deactivated on the next aging step, effect kept
        let mut power_ups = vec![collected(PowerUpKind::PadSizeIncrease, 0.0)];
        let expired = update_power_ups(&mut power_ups, 0.016, &mut ball, &mut paddle, &mut effects);
        assert_eq!(expired, vec![PowerUpKind::PadSizeIncrease]);
        assert!(power_ups.is_empty());
        assert_eq!(paddle.size.x, 150.0);
    }

    #[test]
    fn test_collect_and_fall_out() {
        let (mut ball, mut paddle, mut effects) = actors();
        let mut power_ups = vec![
            // Overlapping the paddle
            PowerUp::new(PowerUpKind::Sticky, Vec2::new(360.0, 570.0), 150.0),
            // Past the bottom of the screen
            PowerUp::new(PowerUpKind::Chaos, Vec2::new(10.0, 600.0), 150.0),
            // Still falling
            PowerUp::new(PowerUpKind::Speed, Vec2::new(10.0, 100.0), 150.0),
        ];
        let got = collect_power_ups(&mut power_ups, &mut ball, &mut paddle, &mut effects, 600.0);
        assert_eq!(got, vec![PowerUpKind::Sticky]);
        assert!(ball.sticky);
        assert!(!effects.chaos);
        assert!(power_ups[0].activated && power_ups[0].destroyed);
        assert!(power_ups[1].destroyed && !power_ups[1].activated);

        update_power_ups(&mut power_ups, 0.1, &mut ball, &mut paddle, &mut effects);
        assert_eq!(power_ups.len(), 2);
        assert!((power_ups[1].pos.y - 115.0).abs() < 1e-4);
    }

    #[test]
    fn test_roll_spawns_is_independent_per_kind() {
        // Odds of 1 always spawn, 0 never
        let odds = PowerUpOdds {
            speed: 1,
            sticky: 0,
            pass_through: 1,
            pad_size_increase: 0,
            confuse: 1,
            chaos: 1,
        };
        let mut rng = Pcg32::seed_from_u64(7);
        let kinds = roll_spawns(&mut rng, &odds);
        assert_eq!(
            kinds,
            vec![
                PowerUpKind::Speed,
                PowerUpKind::PassThrough,
                PowerUpKind::Confuse,
                PowerUpKind::Chaos
            ]
        );
    }

    #[test]
    fn test_roll_spawns_rates() {
        let odds = PowerUpOdds::default();
        let mut rng = Pcg32::seed_from_u64(42);
        let trials = 30_000;
        let mut chaos = 0;
        let mut speed = 0;
        for _ in 0..trials {
            for kind in roll_spawns(&mut rng, &odds) {
                match kind {
                    PowerUpKind::Chaos => chaos += 1,
                    PowerUpKind::Speed => speed += 1,
                    _ => {}
                }
            }
        }
        // Expected 2000 and 400
        assert!((1700..2300).contains(&chaos), "chaos spawned {}", chaos);
        assert!((280..520).contains(&speed), "speed spawned {}", speed);
    }

    #[test]
    fn test_shake_timer() {
        let mut effects = Effects::default();
        effects.start_shake(0.05);
        effects.update_shake(0.03);
        assert!(effects.shake);
        effects.update_shake(0.03);
        assert!(!effects.shake);
    }
}
