//! Player and ball entities
//!
//! Passive state holders. Rules and physics mutate them; they never reach out
//! to the arena or the active mode themselves.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::direction_between;
use crate::settings::{BallSettings, PlayerSettings};

/// Which of the two players
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerId {
    One,
    Two,
}

impl PlayerId {
    /// Both players in iteration order (player 1 first)
    pub const BOTH: [PlayerId; 2] = [PlayerId::One, PlayerId::Two];

    /// Array index (0 or 1)
    #[inline]
    pub fn index(self) -> usize {
        match self {
            PlayerId::One => 0,
            PlayerId::Two => 1,
        }
    }

    /// Human-facing number (1 or 2)
    #[inline]
    pub fn number(self) -> u8 {
        self.index() as u8 + 1
    }

    #[inline]
    pub fn rival(self) -> PlayerId {
        match self {
            PlayerId::One => PlayerId::Two,
            PlayerId::Two => PlayerId::One,
        }
    }
}

/// Result of a push attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PushOutcome {
    /// Cooldown still running, nothing happened
    NotReady,
    /// Push fired; `struck_rival` is true if the rival was within range
    Fired { struck_rival: bool },
}

impl PushOutcome {
    pub fn struck_rival(self) -> bool {
        matches!(self, PushOutcome::Fired { struck_rival: true })
    }
}

/// A player body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub pos: Vec2,
    /// Velocity used by the last integration step
    pub vel: Vec2,
    /// Input-driven velocity for the current tick
    pub move_vel: Vec2,
    /// Decaying velocity from being struck by a push
    pub knockback: Vec2,
    pub radius: f32,
    pub base_speed: f32,
    pub speed_modifier: f32,
    /// Seconds until push is ready again (0 = ready)
    pub push_cooldown: f32,
    /// Cumulative match score
    pub score: i32,
    /// Score earned in the current mode
    pub mode_score: i32,
}

impl Player {
    pub fn new(id: PlayerId, pos: Vec2, settings: &PlayerSettings) -> Self {
        Self {
            id,
            pos,
            vel: Vec2::ZERO,
            move_vel: Vec2::ZERO,
            knockback: Vec2::ZERO,
            radius: settings.radius,
            base_speed: settings.speed,
            speed_modifier: 1.0,
            push_cooldown: 0.0,
            score: 0,
            mode_score: 0,
        }
    }

    /// Current movement speed including any mode modifier
    #[inline]
    pub fn speed(&self) -> f32 {
        self.base_speed * self.speed_modifier
    }

    /// Set movement from a direction whose components are each -1, 0 or 1.
    /// Diagonals are scaled per axis so they match axis speed.
    pub fn move_in(&mut self, dir: Vec2, diagonal_factor: f32) {
        let mut vel = dir * self.speed();
        if dir.x != 0.0 && dir.y != 0.0 {
            vel *= diagonal_factor;
        }
        self.move_vel = vel;
    }

    #[inline]
    pub fn can_push(&self) -> bool {
        self.push_cooldown <= 0.0
    }

    /// Push the ball and the rival away if they are in range.
    ///
    /// Velocities are set, not added: the ball leaves at `push_force`, a
    /// struck rival at `knockback_force`.
    pub fn push(&mut self, ball: &mut Ball, rival: &mut Player, settings: &PlayerSettings) -> PushOutcome {
        if !self.can_push() {
            return PushOutcome::NotReady;
        }
        self.push_cooldown = settings.push_cooldown;

        if self.pos.distance(ball.pos) < settings.push_radius {
            ball.vel = direction_between(self.pos, ball.pos) * settings.push_force;
        }

        let struck_rival = self.pos.distance(rival.pos) < settings.push_radius;
        if struck_rival {
            rival.knockback = direction_between(self.pos, rival.pos) * settings.knockback_force;
        }

        PushOutcome::Fired { struck_rival }
    }

    pub fn set_speed_modifier(&mut self, factor: f32) {
        self.speed_modifier = factor;
    }

    pub fn reset_speed(&mut self) {
        self.speed_modifier = 1.0;
    }

    /// Add to both the cumulative and the current-mode score. No floor.
    pub fn add_score(&mut self, delta: i32) {
        self.score += delta;
        self.mode_score += delta;
    }

    pub fn reset_mode_score(&mut self) {
        self.mode_score = 0;
    }

    /// Teleport and stop all motion
    pub fn place(&mut self, pos: Vec2) {
        self.pos = pos;
        self.vel = Vec2::ZERO;
        self.move_vel = Vec2::ZERO;
        self.knockback = Vec2::ZERO;
    }

    /// Per-tick bookkeeping: cooldown and knockback decay
    pub fn tick(&mut self, dt: f32, knockback_drag: f32) {
        self.push_cooldown = (self.push_cooldown - dt).max(0.0);

        let speed = self.knockback.length();
        if speed > 0.0 {
            let reduced = (speed - knockback_drag * dt).max(0.0);
            self.knockback *= reduced / speed;
        }
    }
}

/// Detonation countdown carried by the ball while the explosive mode runs
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Explosive {
    armed: bool,
    remaining: f32,
}

impl Explosive {
    pub fn arm(&mut self, duration: f32) {
        self.armed = true;
        self.remaining = duration;
    }

    /// Advance the countdown; returns true when it reaches zero
    pub fn tick(&mut self, dt: f32) -> bool {
        if !self.armed {
            return false;
        }
        self.remaining -= dt;
        self.remaining <= 0.0
    }

    pub fn reset_timer(&mut self, duration: f32) {
        self.remaining = duration;
    }

    pub fn disarm(&mut self) {
        self.armed = false;
        self.remaining = 0.0;
    }

    #[inline]
    pub fn is_armed(&self) -> bool {
        self.armed
    }

    #[inline]
    pub fn remaining(&self) -> f32 {
        self.remaining.max(0.0)
    }
}

/// The ball
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub explosive: Explosive,
}

impl Ball {
    pub fn new(pos: Vec2, settings: &BallSettings) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            radius: settings.radius,
            explosive: Explosive::default(),
        }
    }

    /// Teleport and stop
    pub fn place(&mut self, pos: Vec2) {
        self.pos = pos;
        self.vel = Vec2::ZERO;
    }

    /// Rescale velocity down to `max_speed`, keeping its direction
    pub fn enforce_speed_cap(&mut self, max_speed: f32) {
        let speed = self.vel.length();
        if speed > max_speed {
            self.vel *= max_speed / speed;
        }
    }

    /// Linear drag toward rest
    pub fn apply_drag(&mut self, drag: f32, dt: f32) {
        let speed = self.vel.length();
        if speed > 0.0 {
            let reduced = (speed - drag * dt).max(0.0);
            self.vel *= reduced / speed;
        }
    }
}
