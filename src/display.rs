//! Display collaborator
//!
//! The simulation never draws. The match controller reports what should be on
//! screen through this trait; a renderer, a terminal or a test recorder sits
//! behind it.

use serde::{Deserialize, Serialize};

use crate::sim::{ModeScore, PlayerId};

/// Announcement color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tint {
    Player(PlayerId),
    Alert,
    Lava,
    Neutral,
}

/// Transient message produced by the rules
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Announcement {
    pub text: String,
    pub tint: Tint,
}

pub trait Display {
    /// Replace any announcement currently showing
    fn show_announcement(&mut self, text: &str, tint: Tint);

    /// Show the rules overlay for the next mode
    fn show_mode_intro(&mut self, name: &str, rules: &[&str]);

    /// Whole seconds left on the rules overlay
    fn update_intro_countdown(&mut self, _seconds: u32) {}

    /// Overlay finished; the mode is starting
    fn hide_mode_intro(&mut self) {}

    /// Name of the mode being played, shown until the next intro
    fn show_mode_title(&mut self, _name: &str) {}

    fn update_score(&mut self, p1: i32, p2: i32);

    fn update_timer(&mut self, seconds_remaining: f32);

    fn show_final_results(&mut self, p1_total: i32, p2_total: i32, per_mode: &[ModeScore]);
}

/// Display that writes everything to the log
#[derive(Debug, Default)]
pub struct LogDisplay {
    last_timer: Option<u32>,
}

impl Display for LogDisplay {
    fn show_announcement(&mut self, text: &str, tint: Tint) {
        log::info!("[{tint:?}] {text}");
    }

    fn show_mode_intro(&mut self, name: &str, rules: &[&str]) {
        log::info!("=== {name} ===");
        for rule in rules {
            log::info!("  {rule}");
        }
    }

    fn update_intro_countdown(&mut self, seconds: u32) {
        log::debug!("Starting in: {seconds}");
    }

    fn show_mode_title(&mut self, name: &str) {
        log::info!("Now playing: {name}");
    }

    fn update_score(&mut self, p1: i32, p2: i32) {
        log::trace!("P1: {p1}  P2: {p2}");
    }

    fn update_timer(&mut self, seconds_remaining: f32) {
        // Only log whole-second changes
        let shown = seconds_remaining.ceil().max(0.0) as u32;
        if self.last_timer != Some(shown) {
            self.last_timer = Some(shown);
            log::trace!("Time: {shown}");
        }
    }

    fn show_final_results(&mut self, p1_total: i32, p2_total: i32, per_mode: &[ModeScore]) {
        let headline = match p1_total.cmp(&p2_total) {
            std::cmp::Ordering::Greater => "PLAYER 1 WINS!",
            std::cmp::Ordering::Less => "PLAYER 2 WINS!",
            std::cmp::Ordering::Equal => "DRAW!",
        };
        log::info!("{headline}  P1: {p1_total} - P2: {p2_total}");
        for entry in per_mode {
            log::info!("  {}: P1 {} - P2 {}", entry.kind.name(), entry.scores[0], entry.scores[1]);
        }
    }
}

/// One call made on a [`RecordingDisplay`]
#[derive(Debug, Clone, PartialEq)]
pub enum DisplayCall {
    Announcement(Announcement),
    ModeIntro { name: String, rules: Vec<String> },
    IntroCountdown(u32),
    HideModeIntro,
    ModeTitle(String),
    Score(i32, i32),
    Timer(f32),
    FinalResults { p1_total: i32, p2_total: i32, per_mode: Vec<ModeScore> },
}

/// Display that keeps every call, for headless runs and tests
#[derive(Debug, Default)]
pub struct RecordingDisplay {
    pub calls: Vec<DisplayCall>,
}

impl RecordingDisplay {
    pub fn announcements(&self) -> impl Iterator<Item = &Announcement> {
        self.calls.iter().filter_map(|c| match c {
            DisplayCall::Announcement(a) => Some(a),
            _ => None,
        })
    }

    pub fn count(&self, pred: impl Fn(&DisplayCall) -> bool) -> usize {
        self.calls.iter().filter(|c| pred(c)).count()
    }
}

impl Display for RecordingDisplay {
    fn show_announcement(&mut self, text: &str, tint: Tint) {
        self.calls.push(DisplayCall::Announcement(Announcement {
            text: text.to_string(),
            tint,
        }));
    }

    fn show_mode_intro(&mut self, name: &str, rules: &[&str]) {
        self.calls.push(DisplayCall::ModeIntro {
            name: name.to_string(),
            rules: rules.iter().map(|r| r.to_string()).collect(),
        });
    }

    fn update_intro_countdown(&mut self, seconds: u32) {
        self.calls.push(DisplayCall::IntroCountdown(seconds));
    }

    fn hide_mode_intro(&mut self) {
        self.calls.push(DisplayCall::HideModeIntro);
    }

    fn show_mode_title(&mut self, name: &str) {
        self.calls.push(DisplayCall::ModeTitle(name.to_string()));
    }

    fn update_score(&mut self, p1: i32, p2: i32) {
        self.calls.push(DisplayCall::Score(p1, p2));
    }

    fn update_timer(&mut self, seconds_remaining: f32) {
        self.calls.push(DisplayCall::Timer(seconds_remaining));
    }

    fn show_final_results(&mut self, p1_total: i32, p2_total: i32, per_mode: &[ModeScore]) {
        self.calls.push(DisplayCall::FinalResults {
            p1_total,
            p2_total,
            per_mode: per_mode.to_vec(),
        });
    }
}
