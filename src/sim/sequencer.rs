//! Mode sequencer
//!
//! Strictly linear walk through [`ModeKind::ALL`]. Every advance past an
//! opened mode records that mode's `[p1, p2]` scores and cleans it up.

use serde::{Deserialize, Serialize};

use super::modes::{Mode, ModeKind};
use super::world::World;
use crate::settings::Settings;

/// Recorded scores of one completed mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModeScore {
    pub kind: ModeKind,
    pub scores: [i32; 2],
}

/// Result of [`ModeSequencer::advance`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// A new mode is ready to be introduced and started
    Next(ModeKind),
    /// Every mode has been played
    Complete,
}

#[derive(Debug, Default)]
pub struct ModeSequencer {
    /// `None` before the first advance
    index: Option<usize>,
    current: Option<Mode>,
    history: Vec<ModeScore>,
}

impl ModeSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Close the current mode (if any) and open the next one
    pub fn advance(&mut self, world: &mut World, settings: &Settings) -> Advance {
        if let Some(mut mode) = self.current.take() {
            self.history.push(ModeScore {
                kind: mode.kind(),
                scores: world.mode_scores(),
            });
            if mode.is_active() {
                mode.cleanup(world);
            }
        }

        let next = self.index.map_or(0, |i| i + 1);
        if next >= ModeKind::ALL.len() {
            // Stay parked past the end; advancing again is a no-op
            self.index = Some(ModeKind::ALL.len());
            log::info!("All modes complete: {:?}", self.history);
            return Advance::Complete;
        }

        let kind = ModeKind::ALL[next];
        self.index = Some(next);
        self.current = Some(Mode::new(kind, settings));
        log::debug!("Sequencer at mode {} of {}: {kind}", next + 1, ModeKind::ALL.len());
        Advance::Next(kind)
    }

    /// Back to the pre-start state with an empty history. The caller is
    /// responsible for a mode that is still running.
    pub fn reset(&mut self) {
        self.index = None;
        self.current = None;
        self.history.clear();
    }

    /// Scores recorded so far, one entry per completed mode
    pub fn mode_scores(&self) -> &[ModeScore] {
        &self.history
    }

    pub fn current(&self) -> Option<&Mode> {
        self.current.as_ref()
    }

    pub fn current_mut(&mut self) -> Option<&mut Mode> {
        self.current.as_mut()
    }

    /// Zero-based index of the current mode, `None` before start
    pub fn current_index(&self) -> Option<usize> {
        self.index
    }

    pub fn is_complete(&self) -> bool {
        self.index.is_some_and(|i| i >= ModeKind::ALL.len())
    }
}
