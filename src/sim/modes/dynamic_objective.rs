//! Dynamic Objective
//!
//! Two goals sway up and down out of phase. Scoring right after striking the
//! rival with a push earns a bonus.

use super::{ModeContext, ModeRules, RivalStrikeHook};
use crate::display::Tint;
use crate::settings::Settings;
use crate::sim::arena::{Arena, ZoneKind};
use crate::sim::entities::PlayerId;
use crate::sim::physics::{Body, Overlap};

#[derive(Debug, Default)]
pub struct DynamicObjective {
    /// Last player whose push struck the rival, cleared by the next goal
    last_rival_strike: Option<PlayerId>,
}

impl DynamicObjective {
    pub fn last_rival_strike(&self) -> Option<PlayerId> {
        self.last_rival_strike
    }
}

impl RivalStrikeHook for DynamicObjective {
    fn on_rival_struck(&mut self, pusher: PlayerId) {
        log::debug!("P{} struck the rival", pusher.number());
        self.last_rival_strike = Some(pusher);
    }
}

impl ModeRules for DynamicObjective {
    fn configure_arena(&mut self, arena: &mut Arena, settings: &Settings) {
        arena.build_boundaries(&settings.arena, false);
        arena.build_goals(&settings.arena, true);
    }

    fn on_start(&mut self, ctx: &mut ModeContext<'_>) {
        ctx.world.arena.update_moving_goals(ctx.match_time, &ctx.settings.arena);
    }

    fn on_overlap(&mut self, ctx: &mut ModeContext<'_>, overlap: &Overlap) {
        let (Body::Ball, ZoneKind::Goal, Some(scorer)) = (overlap.body, overlap.zone, overlap.for_player) else {
            return;
        };

        let settings = ctx.settings;
        let rules = &settings.modes.dynamic_objective;
        let points = match self.last_rival_strike.take() {
            Some(striker) if striker == scorer => rules.strike_bonus_points,
            _ => rules.goal_points,
        };

        ctx.award(scorer, points);
        ctx.announce(format!("GOAL P{}! +{points}", scorer.number()), Tint::Player(scorer));
        ctx.world.reset_ball();
    }

    fn update_rules(&mut self, ctx: &mut ModeContext<'_>, _dt: f32) {
        ctx.world.arena.update_moving_goals(ctx.match_time, &ctx.settings.arena);
    }

    fn rival_strike_hook(&mut self) -> Option<&mut dyn RivalStrikeHook> {
        Some(self)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::Harness;
    use super::super::ModeKind;
    use super::*;

    fn goal_for(player: PlayerId) -> Overlap {
        Overlap {
            body: Body::Ball,
            zone: ZoneKind::Goal,
            for_player: Some(player),
        }
    }

    #[test]
    fn test_plain_goal_scores_one() {
        let mut h = Harness::new();
        let mut mode = h.started(ModeKind::DynamicObjective);
        h.overlap(&mut mode, goal_for(PlayerId::Two));
        assert_eq!(h.mode_scores(), [0, 1]);
        assert_eq!(h.world.ball.pos, h.world.arena.center());
    }

    #[test]
    fn test_strike_then_goal_scores_bonus_once() {
        let mut h = Harness::new();
        let mut mode = h.started(ModeKind::DynamicObjective);

        assert!(mode.notify_rival_struck(PlayerId::One));
        h.overlap(&mut mode, goal_for(PlayerId::One));
        assert_eq!(h.mode_scores(), [2, 0]);

        h.overlap(&mut mode, goal_for(PlayerId::One));
        assert_eq!(h.mode_scores(), [3, 0]);
    }

    #[test]
    fn test_bonus_flag_cleared_by_other_players_goal() {
        let mut rules = DynamicObjective::default();
        let mut h = Harness::new();
        rules.configure_arena(&mut h.world.arena, &h.settings);

        rules.on_rival_struck(PlayerId::One);
        rules.on_overlap(&mut h.ctx(), &goal_for(PlayerId::Two));
        assert_eq!(h.mode_scores(), [0, 1]);
        assert_eq!(rules.last_rival_strike(), None);

        rules.on_overlap(&mut h.ctx(), &goal_for(PlayerId::One));
        assert_eq!(h.mode_scores(), [1, 1]);
    }

    #[test]
    fn test_latest_strike_wins() {
        let mut rules = DynamicObjective::default();
        rules.on_rival_struck(PlayerId::One);
        rules.on_rival_struck(PlayerId::Two);
        assert_eq!(rules.last_rival_strike(), Some(PlayerId::Two));
    }

    #[test]
    fn test_goals_follow_match_clock() {
        let mut h = Harness::new();
        let mut mode = h.started(ModeKind::DynamicObjective);
        let before: Vec<f32> = h.world.arena.zones_of(ZoneKind::Goal).map(|g| g.region.center().y).collect();
        assert!(before.iter().all(|y| (*y - 384.0).abs() < 1e-3));

        h.run(&mut mode, 10, 0.1);
        let after: Vec<f32> = h.world.arena.zones_of(ZoneKind::Goal).map(|g| g.region.center().y).collect();
        // Half a cycle apart: mirrored around the midline
        assert!(after[0] > 384.0);
        assert!(((after[0] - 384.0) + (after[1] - 384.0)).abs() < 1e-2);
    }
}
