//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only (and only outside the rules, in the autopilot)
//! - Stable iteration order (player 1 before player 2)
//! - No rendering or platform dependencies

pub mod arena;
pub mod collision;
pub mod entities;
pub mod modes;
pub mod physics;
pub mod sequencer;
pub mod state;
pub mod tick;
pub mod timer;
pub mod world;

pub use arena::{Arena, Rect, Region, SafeZone, Zone, ZoneKind};
pub use collision::CollisionResult;
pub use entities::{Ball, Explosive, Player, PlayerId, PushOutcome};
pub use modes::{Lifecycle, Mode, ModeKind, ModeOutcome, ModeRules, RivalStrikeHook};
pub use physics::{Body, Overlap};
pub use sequencer::{Advance, ModeScore, ModeSequencer};
pub use state::{MatchController, MatchPhase, MatchResults};
pub use tick::{PlayerInput, TickInput, tick};
pub use timer::Countdown;
pub use world::World;
