//! Countdown timers advanced by the simulation tick
//!
//! Nothing fires on its own: the owner ticks the timer and reads `remaining`
//! and `has_fired` back.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Countdown {
    remaining: f32,
    fired: bool,
}

impl Countdown {
    pub fn new(duration: f32) -> Self {
        Self {
            remaining: duration,
            fired: false,
        }
    }

    /// Advance by `dt`; returns true only on the tick the countdown fires
    pub fn tick(&mut self, dt: f32) -> bool {
        if self.fired {
            return false;
        }
        self.remaining -= dt;
        if self.remaining <= 0.0 {
            self.remaining = 0.0;
            self.fired = true;
            return true;
        }
        false
    }

    #[inline]
    pub fn remaining(&self) -> f32 {
        self.remaining
    }

    #[inline]
    pub fn has_fired(&self) -> bool {
        self.fired
    }

    /// Whole seconds left, rounded up (what an on-screen countdown shows)
    pub fn whole_seconds(&self) -> u32 {
        self.remaining.ceil().max(0.0) as u32
    }
}
