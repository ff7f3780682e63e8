//! Controlled Impact
//!
//! The ball carries a fuse. When it runs out, whoever is nearest the ball
//! loses points and the ball is reset with a fresh fuse.

use super::{ModeContext, ModeRules};
use crate::display::Tint;
use crate::settings::Settings;
use crate::sim::arena::Arena;

#[derive(Debug, Default)]
pub struct ControlledImpact;

impl ModeRules for ControlledImpact {
    fn configure_arena(&mut self, arena: &mut Arena, settings: &Settings) {
        arena.build_boundaries(&settings.arena, false);
    }

    fn on_start(&mut self, ctx: &mut ModeContext<'_>) {
        ctx.world.ball.explosive.arm(ctx.settings.modes.controlled_impact.fuse);
    }

    fn update_rules(&mut self, ctx: &mut ModeContext<'_>, dt: f32) {
        if !ctx.world.ball.explosive.tick(dt) {
            return;
        }

        let settings = ctx.settings;
        let rules = &settings.modes.controlled_impact;
        let victim = ctx.world.nearest_player_to_ball();
        log::debug!("Detonation at {:?}, P{} nearest", ctx.world.ball.pos, victim.number());

        ctx.award(victim, -rules.detonation_penalty);
        ctx.announce(
            format!("EXPLOSION! P{} -{}", victim.number(), rules.detonation_penalty),
            Tint::Alert,
        );

        ctx.world.ball.explosive.reset_timer(rules.fuse);
        ctx.world.reset_ball();
    }
}
