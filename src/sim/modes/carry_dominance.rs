//! Carry Dominance
//!
//! The player nearest the ball (within the carry radius) is the carrier and
//! moves slower. Carrying it into your own end zone is a touchdown. A
//! non-carrier holding the center zone long enough earns a control point.

use super::{ModeContext, ModeRules};
use crate::display::Tint;
use crate::settings::Settings;
use crate::sim::arena::{Arena, ZoneKind};
use crate::sim::entities::PlayerId;
use crate::sim::physics::{Body, Overlap};
use crate::sim::world::World;

/// Continuous occupancy of the center zone
#[derive(Debug, Default, Clone, Copy)]
struct CenterControl {
    occupant: Option<PlayerId>,
    held: f32,
}

#[derive(Debug, Default)]
pub struct CarryDominance {
    carrier: Option<PlayerId>,
    control: CenterControl,
}

impl CarryDominance {
    pub fn carrier(&self) -> Option<PlayerId> {
        self.carrier
    }

    /// Seconds the current occupant has held the center
    pub fn control_time(&self) -> f32 {
        self.control.held
    }
}

/// Nearest player strictly within `radius` of the ball; ties keep player 1
fn find_carrier(world: &World, radius: f32) -> Option<PlayerId> {
    let mut carrier = None;
    let mut best = radius;
    for player in &world.players {
        let dist = player.pos.distance(world.ball.pos);
        if dist < best {
            best = dist;
            carrier = Some(player.id);
        }
    }
    carrier
}

impl ModeRules for CarryDominance {
    fn configure_arena(&mut self, arena: &mut Arena, settings: &Settings) {
        arena.build_boundaries(&settings.arena, false);
        arena.build_end_zones(&settings.arena);
        arena.build_center_zone(&settings.arena);
    }

    fn on_overlap(&mut self, ctx: &mut ModeContext<'_>, overlap: &Overlap) {
        let (Body::Player(id), ZoneKind::EndZone) = (overlap.body, overlap.zone) else {
            return;
        };
        if overlap.for_player != Some(id) || self.carrier != Some(id) {
            return;
        }

        let points = ctx.settings.modes.carry_dominance.touchdown_points;
        ctx.award(id, points);
        ctx.announce(format!("TOUCHDOWN P{}!", id.number()), Tint::Player(id));

        self.carrier = None;
        ctx.world.player_mut(id).reset_speed();
        ctx.reset_field();
    }

    fn update_rules(&mut self, ctx: &mut ModeContext<'_>, dt: f32) {
        let settings = ctx.settings;
        let rules = &settings.modes.carry_dominance;

        let carrier = find_carrier(ctx.world, rules.carry_radius);
        if carrier != self.carrier {
            if let Some(old) = self.carrier {
                ctx.world.player_mut(old).reset_speed();
            }
            if let Some(new) = carrier {
                ctx.world.player_mut(new).set_speed_modifier(rules.carry_speed_factor);
            }
            self.carrier = carrier;
        }

        // Later players in iteration order win a shared center
        let mut occupant = None;
        for player in &ctx.world.players {
            if Some(player.id) != self.carrier && ctx.world.arena.is_in_center_zone(player.pos) {
                occupant = Some(player.id);
            }
        }

        if occupant != self.control.occupant {
            self.control = CenterControl { occupant, held: 0.0 };
        }
        let Some(holder) = occupant else {
            return;
        };

        self.control.held += dt;
        if self.control.held >= rules.control_time {
            ctx.award(holder, rules.control_points);
            ctx.announce(format!("CONTROL P{}!", holder.number()), Tint::Player(holder));
            self.control.held = 0.0;
        }
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::super::test_support::Harness;
    use super::super::{Mode, ModeKind};
    use super::*;

    fn setup() -> (Harness, Mode) {
        let mut h = Harness::new();
        let mode = h.started(ModeKind::CarryDominance);
        // Ball parked away from everyone so nobody carries
        h.world.ball.pos = Vec2::new(512.0, 100.0);
        (h, mode)
    }

    fn end_zone(player: PlayerId, zone_owner: PlayerId) -> Overlap {
        Overlap {
            body: Body::Player(player),
            zone: ZoneKind::EndZone,
            for_player: Some(zone_owner),
        }
    }

    #[test]
    fn test_arena_layout() {
        let (h, _mode) = setup();
        assert_eq!(h.world.arena.zones_of(ZoneKind::Wall).count(), 4);
        assert_eq!(h.world.arena.zones_of(ZoneKind::EndZone).count(), 2);
        assert_eq!(h.world.arena.zones_of(ZoneKind::CenterZone).count(), 1);
    }

    #[test]
    fn test_carrier_is_slowed() {
        let (mut h, mut mode) = setup();
        h.world.ball.pos = h.world.players[0].pos + Vec2::new(40.0, 0.0);
        h.run(&mut mode, 1, 0.1);
        assert_eq!(h.world.players[0].speed_modifier, 0.6);
        assert_eq!(h.world.players[1].speed_modifier, 1.0);

        // Ball moves out of range, penalty lifted
        h.world.ball.pos = Vec2::new(512.0, 100.0);
        h.run(&mut mode, 1, 0.1);
        assert_eq!(h.world.players[0].speed_modifier, 1.0);
    }

    #[test]
    fn test_carry_radius_is_strict() {
        let (mut h, mut mode) = setup();
        h.world.ball.pos = h.world.players[0].pos + Vec2::new(50.0, 0.0);
        h.run(&mut mode, 1, 0.1);
        assert_eq!(h.world.players[0].speed_modifier, 1.0);
    }

    #[test]
    fn test_touchdown_only_for_carrier_in_own_end_zone() {
        let (mut h, mut mode) = setup();
        h.world.players[0].pos = Vec2::new(60.0, 384.0);
        h.world.ball.pos = Vec2::new(90.0, 384.0);
        h.run(&mut mode, 1, 0.1);

        // Rival's end zone, or not the carrier: nothing
        h.overlap(&mut mode, end_zone(PlayerId::One, PlayerId::Two));
        h.overlap(&mut mode, end_zone(PlayerId::Two, PlayerId::Two));
        assert_eq!(h.mode_scores(), [0, 0]);

        h.overlap(&mut mode, end_zone(PlayerId::One, PlayerId::One));
        assert_eq!(h.mode_scores(), [2, 0]);
        assert_eq!(h.world.players[0].pos, Vec2::new(200.0, 384.0));
        assert_eq!(h.world.players[0].speed_modifier, 1.0);
        assert_eq!(h.world.ball.pos, h.world.arena.center());

        // Carrier was cleared, lingering overlap does not score again
        h.overlap(&mut mode, end_zone(PlayerId::One, PlayerId::One));
        assert_eq!(h.mode_scores(), [2, 0]);
    }

    #[test]
    fn test_center_control_after_three_seconds() {
        let (mut h, mut mode) = setup();
        h.world.players[1].pos = h.world.arena.center();

        h.run(&mut mode, 5, 0.5);
        assert_eq!(h.mode_scores(), [0, 0]);
        h.run(&mut mode, 1, 0.5);
        assert_eq!(h.mode_scores(), [0, 1]);
        assert_eq!(h.announcements.last().map(|a| a.text.as_str()), Some("CONTROL P2!"));
        assert_eq!(h.world.players[1].mode_score, 1);
    }

    #[test]
    fn test_control_point_restarts_the_count() {
        let mut rules = CarryDominance::default();
        let mut h = Harness::new();
        rules.configure_arena(&mut h.world.arena, &h.settings);
        h.world.ball.pos = Vec2::new(512.0, 100.0);
        h.world.players[1].pos = h.world.arena.center();

        for _ in 0..6 {
            rules.update_rules(&mut h.ctx(), 0.5);
        }
        assert_eq!(h.mode_scores(), [0, 1]);
        assert_eq!(rules.control_time(), 0.0);

        // A second point takes another full hold
        for _ in 0..5 {
            rules.update_rules(&mut h.ctx(), 0.5);
        }
        assert_eq!(h.mode_scores(), [0, 1]);
        rules.update_rules(&mut h.ctx(), 0.5);
        assert_eq!(h.mode_scores(), [0, 2]);
    }

    #[test]
    fn test_leaving_center_restarts_from_zero() {
        let (mut h, mut mode) = setup();
        let center = h.world.arena.center();
        h.world.players[0].pos = center;

        h.run(&mut mode, 5, 0.5);
        h.run(&mut mode, 1, 0.4);
        assert_eq!(h.mode_scores(), [0, 0]);

        h.world.players[0].pos = Vec2::new(200.0, 384.0);
        h.run(&mut mode, 1, 0.5);

        h.world.players[0].pos = center;
        h.run(&mut mode, 5, 0.5);
        assert_eq!(h.mode_scores(), [0, 0], "partial occupancy earns no credit");
        h.run(&mut mode, 1, 0.5);
        assert_eq!(h.mode_scores(), [1, 0]);
    }

    #[test]
    fn test_carrier_does_not_hold_center() {
        let (mut h, mut mode) = setup();
        let center = h.world.arena.center();
        h.world.players[0].pos = center;
        h.world.ball.pos = center + Vec2::new(30.0, 0.0);

        h.run(&mut mode, 8, 0.5);
        assert_eq!(h.mode_scores(), [0, 0]);
    }

    #[test]
    fn test_control_timer_resets_when_occupant_changes() {
        let mut rules = CarryDominance::default();
        let mut h = Harness::new();
        rules.configure_arena(&mut h.world.arena, &h.settings);
        h.world.ball.pos = Vec2::new(512.0, 100.0);
        let center = h.world.arena.center();

        h.world.players[0].pos = center;
        rules.update_rules(&mut h.ctx(), 2.0);
        assert_eq!(rules.carrier(), None);
        assert_eq!(rules.control_time(), 2.0);

        // Player 2 steps in too and takes over the count
        h.world.players[1].pos = center + Vec2::new(40.0, 0.0);
        rules.update_rules(&mut h.ctx(), 0.5);
        assert_eq!(rules.control_time(), 0.5);
        assert_eq!(h.mode_scores(), [0, 0]);
    }
}
