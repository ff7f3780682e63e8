//! Seeded demo input
//!
//! Drives both players for headless runs and attract mode: chase the ball,
//! push when something is in range, press start on the menu and results
//! screens. All randomness comes from a seeded PCG so equal seeds replay
//! equal matches.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::sim::{MatchController, MatchPhase, PlayerId, PlayerInput, TickInput, World};

/// How far off the ball each player aims (so bots don't stack perfectly)
const AIM_JITTER: f32 = 40.0;
/// Closer than this on an axis counts as lined up
const DEAD_ZONE: f32 = 8.0;
/// Chance of pushing on a tick where a push would land
const PUSH_CHANCE: f64 = 0.25;

#[derive(Debug, Clone)]
pub struct Autopilot {
    rng: Pcg32,
}

impl Autopilot {
    pub fn new(seed: u64) -> Self {
        log::debug!("Autopilot seeded with {seed}");
        Self {
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Input for the next tick of `ctrl`
    pub fn input(&mut self, ctrl: &MatchController) -> TickInput {
        match ctrl.phase() {
            MatchPhase::Menu | MatchPhase::Results => TickInput {
                start: true,
                ..Default::default()
            },
            MatchPhase::Transition => TickInput::default(),
            MatchPhase::Playing => {
                let push_radius = ctrl.settings().player.push_radius;
                TickInput {
                    players: PlayerId::BOTH.map(|id| self.steer(ctrl.world(), id, push_radius)),
                    start: false,
                }
            }
        }
    }

    fn steer(&mut self, world: &World, id: PlayerId, push_radius: f32) -> PlayerInput {
        let me = world.player(id);
        let rival = world.player(id.rival());

        let jitter = Vec2::new(
            self.rng.random_range(-AIM_JITTER..AIM_JITTER),
            self.rng.random_range(-AIM_JITTER..AIM_JITTER),
        );
        let to_target = world.ball.pos + jitter - me.pos;

        let in_range = me.pos.distance(world.ball.pos) < push_radius || me.pos.distance(rival.pos) < push_radius;
        let push = me.can_push() && in_range && self.rng.random_bool(PUSH_CHANCE);

        PlayerInput {
            up: to_target.y < -DEAD_ZONE,
            down: to_target.y > DEAD_ZONE,
            left: to_target.x < -DEAD_ZONE,
            right: to_target.x > DEAD_ZONE,
            push,
        }
    }
}
