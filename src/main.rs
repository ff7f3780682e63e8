//! FusionBots headless runner
//!
//! Plays one full match with both players on autopilot, logging what a
//! display would show, then prints the results as JSON.
//!
//! Usage: `fusion-bots [settings.json] [seed]`

use fusion_bots::consts::{MAX_SUBSTEPS, SIM_DT};
use fusion_bots::sim::{MatchController, MatchPhase, tick};
use fusion_bots::{Autopilot, LogDisplay, Settings};

/// Wall time per simulated frame; substeps make up the difference to `SIM_DT`
const FRAME_DT: f32 = 1.0 / 30.0;
/// Give up if a match somehow never finishes (simulated seconds)
const MAX_MATCH_SECONDS: f32 = 30.0 * 60.0;

/// Fixed-step driver: accumulates frame time and runs whole ticks
struct Runner {
    ctrl: MatchController,
    pilot: Autopilot,
    display: LogDisplay,
    accumulator: f32,
    elapsed: f32,
}

impl Runner {
    fn new(settings: Settings, seed: u64) -> Self {
        Self {
            ctrl: MatchController::new(settings),
            pilot: Autopilot::new(seed),
            display: LogDisplay::default(),
            accumulator: 0.0,
            elapsed: 0.0,
        }
    }

    fn update(&mut self, dt: f32) {
        let dt = dt.min(0.1);
        self.accumulator += dt;
        self.elapsed += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            let input = self.pilot.input(&self.ctrl);
            tick(&mut self.ctrl, &input, SIM_DT, &mut self.display);
            self.accumulator -= SIM_DT;
            substeps += 1;

            if self.ctrl.phase() == MatchPhase::Results {
                self.accumulator = 0.0;
                break;
            }
        }
    }
}

fn load_settings(path: Option<&str>) -> Settings {
    let Some(path) = path else {
        return Settings::default();
    };
    match Settings::load(path) {
        Ok(settings) => settings,
        Err(e) => {
            log::warn!("Falling back to default settings: {e}");
            Settings::default()
        }
    }
}

fn main() {
    #[cfg(not(target_arch = "wasm32"))]
    env_logger::init();
    log::info!("FusionBots (headless) starting...");

    let args: Vec<String> = std::env::args().skip(1).collect();
    let settings = load_settings(args.first().map(String::as_str));
    let seed = match args.get(1).map(|s| s.parse::<u64>()) {
        Some(Ok(seed)) => seed,
        Some(Err(e)) => {
            log::warn!("Ignoring invalid seed: {e}");
            0
        }
        None => 0,
    };
    log::info!("Autopilot seed: {seed}");

    let mut runner = Runner::new(settings, seed);
    while runner.ctrl.phase() != MatchPhase::Results {
        if runner.elapsed > MAX_MATCH_SECONDS {
            log::error!("Match did not finish after {MAX_MATCH_SECONDS}s; aborting");
            std::process::exit(1);
        }
        runner.update(FRAME_DT);
    }

    match runner.ctrl.results().map(serde_json::to_string_pretty) {
        Some(Ok(json)) => println!("{json}"),
        Some(Err(e)) => {
            log::error!("Failed to serialize results: {e}");
            std::process::exit(1);
        }
        None => {
            log::error!("Match ended without results");
            std::process::exit(1);
        }
    }
}
