//! Triple Risk
//!
//! Baskets on each side inside a lava field. Scoring while standing in the
//! lava is worth more, but staying there burns points. The safe zone shrinks
//! on a fixed interval.

use super::{ModeContext, ModeRules};
use crate::display::Tint;
use crate::settings::Settings;
use crate::sim::arena::{Arena, ZoneKind};
use crate::sim::entities::PlayerId;
use crate::sim::physics::{Body, Overlap};

#[derive(Debug, Default)]
pub struct TripleRisk {
    /// Continuous seconds each player has spent outside the safe zone
    lava_exposure: [f32; 2],
    shrink_clock: f32,
    shrinks: u32,
}

impl TripleRisk {
    pub fn shrink_count(&self) -> u32 {
        self.shrinks
    }

    pub fn lava_exposure(&self, id: PlayerId) -> f32 {
        self.lava_exposure[id.index()]
    }
}

impl ModeRules for TripleRisk {
    fn configure_arena(&mut self, arena: &mut Arena, settings: &Settings) {
        arena.build_boundaries(&settings.arena, false);
        arena.build_baskets(&settings.arena);
        arena.build_lava_field(&settings.arena);
    }

    fn on_overlap(&mut self, ctx: &mut ModeContext<'_>, overlap: &Overlap) {
        let (Body::Ball, ZoneKind::Basket, Some(scorer)) = (overlap.body, overlap.zone, overlap.for_player) else {
            return;
        };

        let settings = ctx.settings;
        let rules = &settings.modes.triple_risk;
        let in_lava = !ctx.world.arena.is_in_safe_zone(ctx.world.player(scorer).pos);
        let points = if in_lava { rules.risky_basket_points } else { rules.basket_points };

        ctx.award(scorer, points);
        ctx.announce(format!("BASKET P{}! +{points}", scorer.number()), Tint::Player(scorer));
        ctx.world.reset_ball();
    }

    fn update_rules(&mut self, ctx: &mut ModeContext<'_>, dt: f32) {
        let settings = ctx.settings;
        let rules = &settings.modes.triple_risk;

        ctx.world.arena.advance(dt);

        for id in PlayerId::BOTH {
            let exposure = &mut self.lava_exposure[id.index()];
            if ctx.world.arena.is_in_safe_zone(ctx.world.player(id).pos) {
                *exposure = 0.0;
                continue;
            }

            *exposure += dt;
            if *exposure >= rules.lava_grace {
                *exposure = 0.0;
                ctx.award(id, -rules.lava_penalty);
                ctx.announce(format!("P{} BURNED! -{}", id.number(), rules.lava_penalty), Tint::Lava);
            }
        }

        self.shrink_clock += dt;
        if self.shrink_clock >= rules.shrink_interval && self.shrinks < rules.max_shrinks {
            self.shrink_clock = 0.0;
            self.shrinks += 1;
            ctx.world.arena.shrink_safe_zone(rules.shrink_factor);
            log::debug!("Safe zone shrink {}/{}", self.shrinks, rules.max_shrinks);
            ctx.announce("SAFE ZONE SHRINKING!", Tint::Lava);
        }
    }
}
