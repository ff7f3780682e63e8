//! Mode rule engine
//!
//! Every mode goes through the same lifecycle:
//! `Constructed --start--> Active --cleanup--> Ended`, with `update` only
//! legal while active. [`Mode`] owns that lifecycle, the countdown and the
//! win check; the variant-specific rules sit behind [`ModeRules`].

mod carry_dominance;
mod controlled_impact;
mod dynamic_objective;
mod survival_goal;
mod triple_risk;

pub use carry_dominance::CarryDominance;
pub use controlled_impact::ControlledImpact;
pub use dynamic_objective::DynamicObjective;
pub use survival_goal::SurvivalGoal;
pub use triple_risk::TripleRisk;

use std::fmt;

use serde::{Deserialize, Serialize};

use super::arena::Arena;
use super::entities::PlayerId;
use super::physics::Overlap;
use super::world::World;
use crate::display::{Announcement, Tint};
use crate::settings::Settings;

/// The five modes, in play order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModeKind {
    SurvivalGoal,
    CarryDominance,
    TripleRisk,
    DynamicObjective,
    ControlledImpact,
}

impl ModeKind {
    pub const ALL: [ModeKind; 5] = [
        ModeKind::SurvivalGoal,
        ModeKind::CarryDominance,
        ModeKind::TripleRisk,
        ModeKind::DynamicObjective,
        ModeKind::ControlledImpact,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ModeKind::SurvivalGoal => "SURVIVAL GOAL",
            ModeKind::CarryDominance => "CARRY DOMINANCE",
            ModeKind::TripleRisk => "TRIPLE RISK",
            ModeKind::DynamicObjective => "DYNAMIC OBJECTIVE",
            ModeKind::ControlledImpact => "CONTROLLED IMPACT",
        }
    }

    /// Short rules shown on the intro overlay
    pub fn rules(self) -> &'static [&'static str] {
        match self {
            ModeKind::SurvivalGoal => &[
                "Score goals or push your rival off the edge.",
                "Fall after scoring and the goal is lost.",
            ],
            ModeKind::CarryDominance => &[
                "Carry the ball into your end zone.",
                "Hold the center for extra points.",
            ],
            ModeKind::TripleRisk => &[
                "Sink the ball in your basket.",
                "Shoot from the lava for triple points.",
            ],
            ModeKind::DynamicObjective => &[
                "The goals never stay still.",
                "Adapt and make the most of the chaos.",
            ],
            ModeKind::ControlledImpact => &[
                "The ball is going to explode.",
                "Don't be the closest when it does.",
            ],
        }
    }

    fn rules_impl(self) -> Box<dyn ModeRules> {
        match self {
            ModeKind::SurvivalGoal => Box::new(SurvivalGoal::default()),
            ModeKind::CarryDominance => Box::new(CarryDominance::default()),
            ModeKind::TripleRisk => Box::new(TripleRisk::default()),
            ModeKind::DynamicObjective => Box::new(DynamicObjective::default()),
            ModeKind::ControlledImpact => Box::new(ControlledImpact),
        }
    }
}

impl fmt::Display for ModeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How a finished mode ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModeOutcome {
    Winner(PlayerId),
    Draw,
}

impl ModeOutcome {
    /// Compare mode scores; equal scores are a draw
    pub fn from_scores(scores: [i32; 2]) -> Self {
        match scores[0].cmp(&scores[1]) {
            std::cmp::Ordering::Greater => ModeOutcome::Winner(PlayerId::One),
            std::cmp::Ordering::Less => ModeOutcome::Winner(PlayerId::Two),
            std::cmp::Ordering::Equal => ModeOutcome::Draw,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Lifecycle {
    Constructed,
    Active,
    Ended,
}

/// Everything a mode may touch during a call
pub struct ModeContext<'a> {
    pub world: &'a mut World,
    pub settings: &'a Settings,
    pub announcements: &'a mut Vec<Announcement>,
    /// Seconds of match time, shared by everything that animates
    pub match_time: f32,
}

impl ModeContext<'_> {
    pub fn announce(&mut self, text: impl Into<String>, tint: Tint) {
        self.announcements.push(Announcement {
            text: text.into(),
            tint,
        });
    }

    pub fn award(&mut self, player: PlayerId, points: i32) {
        self.world.player_mut(player).add_score(points);
        log::debug!("P{} {:+} (mode score {})", player.number(), points, self.world.player(player).mode_score);
    }

    /// Players back to spawn and ball back to center. Scores are untouched.
    pub fn reset_field(&mut self) {
        self.world.reset_positions(self.settings);
        self.world.reset_ball();
    }
}

/// Variant-specific rules. Shared wiring (walls, body contacts, countdown,
/// win check) is handled by [`Mode`] and the physics step.
pub trait ModeRules: fmt::Debug {
    /// Build this mode's zones into an empty arena
    fn configure_arena(&mut self, arena: &mut Arena, settings: &Settings);

    /// Extra setup after players and ball are placed
    fn on_start(&mut self, _ctx: &mut ModeContext<'_>) {}

    /// A body is overlapping one of this mode's sensor zones
    fn on_overlap(&mut self, _ctx: &mut ModeContext<'_>, _overlap: &Overlap) {}

    /// Per-tick rules, after the countdown has been decremented
    fn update_rules(&mut self, ctx: &mut ModeContext<'_>, dt: f32);

    /// Capability check for the push notification
    fn rival_strike_hook(&mut self) -> Option<&mut dyn RivalStrikeHook> {
        None
    }
}

/// Optional capability: react to a push that struck the rival
pub trait RivalStrikeHook {
    fn on_rival_struck(&mut self, pusher: PlayerId);
}

/// A mode instance with its lifecycle
#[derive(Debug)]
pub struct Mode {
    kind: ModeKind,
    lifecycle: Lifecycle,
    time_remaining: f32,
    rules: Box<dyn ModeRules>,
}

impl Mode {
    pub fn new(kind: ModeKind, settings: &Settings) -> Self {
        Self {
            kind,
            lifecycle: Lifecycle::Constructed,
            time_remaining: settings.modes.duration,
            rules: kind.rules_impl(),
        }
    }

    #[inline]
    pub fn kind(&self) -> ModeKind {
        self.kind
    }

    #[inline]
    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.lifecycle == Lifecycle::Active
    }

    #[inline]
    pub fn time_remaining(&self) -> f32 {
        self.time_remaining
    }

    /// Configure arena, reset players and ball, arm mode-specific state
    pub fn start(&mut self, ctx: &mut ModeContext<'_>) {
        debug_assert_eq!(self.lifecycle, Lifecycle::Constructed, "{} started twice", self.kind);
        debug_assert!(ctx.world.arena.is_empty(), "zones leaked into {}", self.kind);
        if self.lifecycle != Lifecycle::Constructed {
            log::warn!("Ignoring start of {} in state {:?}", self.kind, self.lifecycle);
            return;
        }
        if !ctx.world.arena.is_empty() {
            log::warn!("Arena not empty when starting {}; clearing", self.kind);
            ctx.world.arena.clear_all();
        }

        self.rules.configure_arena(&mut ctx.world.arena, ctx.settings);

        ctx.world.reset_positions(ctx.settings);
        for player in &mut ctx.world.players {
            player.reset_speed();
            player.reset_mode_score();
        }
        ctx.world.reset_ball();

        self.rules.on_start(ctx);
        self.lifecycle = Lifecycle::Active;
        log::info!("Mode started: {} ({}s)", self.kind, self.time_remaining);
    }

    /// Deliver a physics overlap to the rules
    pub fn handle_overlap(&mut self, ctx: &mut ModeContext<'_>, overlap: &Overlap) {
        if self.is_active() {
            self.rules.on_overlap(ctx, overlap);
        }
    }

    /// Decrement the countdown and run the mode's rules
    pub fn update(&mut self, ctx: &mut ModeContext<'_>, dt: f32) {
        debug_assert!(self.is_active(), "update on {} in state {:?}", self.kind, self.lifecycle);
        if !self.is_active() {
            log::warn!("Ignoring update of {} in state {:?}", self.kind, self.lifecycle);
            return;
        }
        self.time_remaining -= dt;
        // Within half a step of zero counts as expired
        if self.time_remaining < dt * 0.5 {
            self.time_remaining = self.time_remaining.min(0.0);
        }
        self.rules.update_rules(ctx, dt);
    }

    /// `None` while time remains, otherwise the outcome by mode score
    pub fn check_win_condition(&self, world: &World) -> Option<ModeOutcome> {
        if self.time_remaining > 0.0 {
            return None;
        }
        Some(ModeOutcome::from_scores(world.mode_scores()))
    }

    /// Forward a push that struck the rival. Returns whether this mode listens.
    pub fn notify_rival_struck(&mut self, pusher: PlayerId) -> bool {
        if !self.is_active() {
            return false;
        }
        match self.rules.rival_strike_hook() {
            Some(hook) => {
                hook.on_rival_struck(pusher);
                true
            }
            None => false,
        }
    }

    /// Release every zone and ball sub-state this mode created. Exactly once.
    pub fn cleanup(&mut self, world: &mut World) {
        debug_assert_eq!(self.lifecycle, Lifecycle::Active, "cleanup of {} in wrong state", self.kind);
        if self.lifecycle != Lifecycle::Active {
            log::warn!("Ignoring cleanup of {} in state {:?}", self.kind, self.lifecycle);
            return;
        }
        world.arena.clear_all();
        world.ball.explosive.disarm();
        for player in &mut world.players {
            player.reset_speed();
        }
        self.lifecycle = Lifecycle::Ended;
        log::info!("Mode ended: {} {:?}", self.kind, world.mode_scores());
    }
}
