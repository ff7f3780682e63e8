//! Survival Goal
//!
//! Side-open arena with two goals. A goal only counts after the scorer
//! survives the confirmation window without leaving the arena sideways.
//! Falling off a side gives the opponent a point.

use super::{ModeContext, ModeRules};
use crate::display::Tint;
use crate::settings::Settings;
use crate::sim::arena::{Arena, ZoneKind};
use crate::sim::entities::{Player, PlayerId};
use crate::sim::physics::{Body, Overlap};
use crate::sim::timer::Countdown;

#[derive(Debug, Clone, Copy)]
struct PendingGoal {
    scorer: PlayerId,
    window: Countdown,
}

#[derive(Debug, Default)]
pub struct SurvivalGoal {
    pending: Option<PendingGoal>,
}

impl SurvivalGoal {
    /// Player whose goal is awaiting confirmation
    pub fn pending_scorer(&self) -> Option<PlayerId> {
        self.pending.map(|p| p.scorer)
    }
}

fn is_out_of_bounds(player: &Player, width: f32) -> bool {
    player.pos.x < 0.0 || player.pos.x > width
}

impl ModeRules for SurvivalGoal {
    fn configure_arena(&mut self, arena: &mut Arena, settings: &Settings) {
        arena.build_boundaries(&settings.arena, true);
        arena.build_goals(&settings.arena, false);
    }

    fn on_overlap(&mut self, ctx: &mut ModeContext<'_>, overlap: &Overlap) {
        let (Body::Ball, ZoneKind::Goal, Some(scorer)) = (overlap.body, overlap.zone, overlap.for_player) else {
            return;
        };
        // One pending goal at a time
        if self.pending.is_some() {
            return;
        }

        self.pending = Some(PendingGoal {
            scorer,
            window: Countdown::new(ctx.settings.modes.survival_goal.confirm_window),
        });
        ctx.announce(format!("GOAL PENDING P{}!", scorer.number()), Tint::Player(scorer));
        ctx.world.reset_ball();
    }

    fn update_rules(&mut self, ctx: &mut ModeContext<'_>, dt: f32) {
        let width = ctx.world.arena.width;
        let settings = ctx.settings;
        let rules = &settings.modes.survival_goal;

        if let Some(pending) = &mut self.pending {
            let expired = pending.window.tick(dt);
            let scorer = pending.scorer;

            if is_out_of_bounds(ctx.world.player(scorer), width) {
                self.pending = None;
                ctx.announce("GOAL CANCELLED!", Tint::Alert);
            } else if expired {
                self.pending = None;
                ctx.award(scorer, rules.goal_points);
                ctx.announce(format!("GOAL P{}!", scorer.number()), Tint::Player(scorer));
            }
        }

        for id in PlayerId::BOTH {
            if is_out_of_bounds(ctx.world.player(id), width) {
                let rival = id.rival();
                ctx.award(rival, rules.fall_points);
                ctx.announce(format!("P{} FELL!", id.number()), Tint::Player(rival));
                ctx.reset_field();
            }
        }
    }
}
