//! Match controller state
//!
//! Top-level state machine: `Menu -> Transition -> Playing -> (Transition |
//! Results) -> Menu`. Owns the world, the sequencer and the intro countdown.
//! Phase changes live here; the per-tick driving lives in `tick`.

use serde::{Deserialize, Serialize};

use super::entities::PlayerId;
use super::modes::{ModeContext, ModeKind, ModeOutcome};
use super::sequencer::{Advance, ModeScore, ModeSequencer};
use super::timer::Countdown;
use super::world::World;
use crate::display::{Announcement, Display};
use crate::settings::Settings;

/// Current phase of the match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchPhase {
    /// Waiting for a start press
    Menu,
    /// Rules overlay for the next mode is counting down
    Transition,
    /// A mode is live
    Playing,
    /// All modes played, final results on screen
    Results,
}

/// Final summary of a match
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResults {
    /// Cumulative scores (sum of the per-mode scores)
    pub totals: [i32; 2],
    pub per_mode: Vec<ModeScore>,
    /// Modes won by each player; drawn modes count for neither
    pub mode_wins: [u32; 2],
    pub draws: u32,
    /// Higher total wins; `None` on equal totals
    pub winner: Option<PlayerId>,
}

impl MatchResults {
    pub fn from_history(per_mode: &[ModeScore]) -> Self {
        let mut totals = [0; 2];
        let mut mode_wins = [0; 2];
        let mut draws = 0;

        for entry in per_mode {
            totals[0] += entry.scores[0];
            totals[1] += entry.scores[1];
            match ModeOutcome::from_scores(entry.scores) {
                ModeOutcome::Winner(id) => mode_wins[id.index()] += 1,
                ModeOutcome::Draw => draws += 1,
            }
        }

        let winner = match ModeOutcome::from_scores(totals) {
            ModeOutcome::Winner(id) => Some(id),
            ModeOutcome::Draw => None,
        };

        Self {
            totals,
            per_mode: per_mode.to_vec(),
            mode_wins,
            draws,
            winner,
        }
    }
}

/// Owns everything a match needs
#[derive(Debug)]
pub struct MatchController {
    pub(crate) settings: Settings,
    pub(crate) world: World,
    pub(crate) sequencer: ModeSequencer,
    pub(crate) phase: MatchPhase,
    pub(crate) intro: Option<Countdown>,
    /// Seconds of match time since the match started
    pub(crate) clock: f32,
    pub(crate) announcements: Vec<Announcement>,
    results: Option<MatchResults>,
}

impl MatchController {
    pub fn new(settings: Settings) -> Self {
        let world = World::new(&settings);
        Self {
            settings,
            world,
            sequencer: ModeSequencer::new(),
            phase: MatchPhase::Menu,
            intro: None,
            clock: 0.0,
            announcements: Vec::new(),
            results: None,
        }
    }

    #[inline]
    pub fn phase(&self) -> MatchPhase {
        self.phase
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    /// Direct entity access, for scripted scenarios and tests
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn sequencer(&self) -> &ModeSequencer {
        &self.sequencer
    }

    /// Kind of the mode being introduced or played
    pub fn current_mode(&self) -> Option<ModeKind> {
        self.sequencer.current().map(|m| m.kind())
    }

    pub fn match_time(&self) -> f32 {
        self.clock
    }

    /// Seconds left on the intro overlay, if one is showing
    pub fn intro_remaining(&self) -> Option<f32> {
        self.intro.map(|c| c.remaining())
    }

    pub fn results(&self) -> Option<&MatchResults> {
        self.results.as_ref()
    }

    /// Reset cumulative scores and the sequencer, then introduce mode 1
    pub fn start_match(&mut self, display: &mut dyn Display) {
        if let Some(mode) = self.sequencer.current_mut() {
            if mode.is_active() {
                mode.cleanup(&mut self.world);
            }
        }
        self.sequencer.reset();
        self.world = World::new(&self.settings);
        self.clock = 0.0;
        self.results = None;
        self.announcements.clear();
        log::info!("Match started");
        self.begin_next_mode(display);
    }

    /// Close the current mode and introduce the next, or finish the match
    pub fn begin_next_mode(&mut self, display: &mut dyn Display) {
        match self.sequencer.advance(&mut self.world, &self.settings) {
            Advance::Next(kind) => {
                let intro = Countdown::new(self.settings.modes.intro_duration);
                display.show_mode_intro(kind.name(), kind.rules());
                display.update_intro_countdown(intro.whole_seconds());
                self.intro = Some(intro);
                self.phase = MatchPhase::Transition;
            }
            Advance::Complete => self.finish_match(display),
        }
    }

    /// Intro finished: start the introduced mode
    pub(crate) fn enter_playing(&mut self) {
        self.intro = None;
        let Some(mode) = self.sequencer.current_mut() else {
            log::warn!("Intro finished with no mode to start");
            return;
        };
        let mut ctx = ModeContext {
            world: &mut self.world,
            settings: &self.settings,
            announcements: &mut self.announcements,
            match_time: self.clock,
        };
        mode.start(&mut ctx);
        self.phase = MatchPhase::Playing;
    }

    fn finish_match(&mut self, display: &mut dyn Display) {
        let results = MatchResults::from_history(self.sequencer.mode_scores());
        debug_assert_eq!(results.totals, self.world.totals(), "totals drifted from recorded mode scores");

        log::info!(
            "Match over: P1 {} - P2 {} (winner: {:?})",
            results.totals[0],
            results.totals[1],
            results.winner
        );
        display.show_final_results(results.totals[0], results.totals[1], &results.per_mode);

        self.intro = None;
        self.results = Some(results);
        self.phase = MatchPhase::Results;
    }

    /// Leave the results screen
    pub fn return_to_menu(&mut self) {
        debug_assert_eq!(self.phase, MatchPhase::Results);
        self.phase = MatchPhase::Menu;
    }
}
