//! Fixed timestep match tick
//!
//! One call per frame, run to completion. Within a `Playing` tick the order is
//! fixed: movement, physics (overlap events go to the mode as they are
//! collected), pushes (player 1 then player 2), mode update, announcements and
//! readouts, win check, and finally the mode transition if the mode ended.

use glam::Vec2;

use super::entities::PlayerId;
use super::modes::ModeContext;
use super::physics;
use super::state::{MatchController, MatchPhase};
use crate::display::Display;

/// Logical actions of one player for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlayerInput {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    /// Push was just pressed this tick
    pub push: bool,
}

impl PlayerInput {
    /// Held directions as a vector with -1/0/1 components (y grows downward).
    /// When opposite directions are both held, down and right win.
    pub fn direction(&self) -> Vec2 {
        let mut dir = Vec2::ZERO;
        if self.up {
            dir.y = -1.0;
        }
        if self.down {
            dir.y = 1.0;
        }
        if self.left {
            dir.x = -1.0;
        }
        if self.right {
            dir.x = 1.0;
        }
        dir
    }
}

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickInput {
    pub players: [PlayerInput; 2],
    /// Start/confirm was just pressed (menu and results screens)
    pub start: bool,
}

/// Advance the match by one fixed timestep
pub fn tick(ctrl: &mut MatchController, input: &TickInput, dt: f32, display: &mut dyn Display) {
    match ctrl.phase {
        MatchPhase::Menu => {
            if input.start {
                ctrl.start_match(display);
            }
        }
        MatchPhase::Transition => tick_intro(ctrl, dt, display),
        MatchPhase::Playing => tick_playing(ctrl, input, dt, display),
        MatchPhase::Results => {
            if input.start {
                ctrl.return_to_menu();
            }
        }
    }
}

/// Count down the rules overlay, then start the mode
fn tick_intro(ctrl: &mut MatchController, dt: f32, display: &mut dyn Display) {
    let Some(intro) = ctrl.intro.as_mut() else {
        log::warn!("Transition without an intro countdown; starting mode");
        ctrl.enter_playing();
        return;
    };

    let shown = intro.whole_seconds();
    if intro.tick(dt) {
        display.hide_mode_intro();
        ctrl.enter_playing();
        if let Some(kind) = ctrl.current_mode() {
            display.show_mode_title(kind.name());
        }
        publish(ctrl, display);
    } else if intro.whole_seconds() != shown {
        display.update_intro_countdown(intro.whole_seconds());
    }
}

fn tick_playing(ctrl: &mut MatchController, input: &TickInput, dt: f32, display: &mut dyn Display) {
    let settings = &ctrl.settings;

    // Movement from held directions
    for (player, player_input) in ctrl.world.players.iter_mut().zip(&input.players) {
        player.move_in(player_input.direction(), settings.player.diagonal_factor);
    }

    let overlaps = physics::step(&mut ctrl.world, settings, dt);
    ctrl.clock += dt;

    let Some(mode) = ctrl.sequencer.current_mut() else {
        log::warn!("Playing without a current mode");
        return;
    };
    let mut ctx = ModeContext {
        world: &mut ctrl.world,
        settings,
        announcements: &mut ctrl.announcements,
        match_time: ctrl.clock,
    };

    for overlap in &overlaps {
        mode.handle_overlap(&mut ctx, overlap);
    }

    for id in PlayerId::BOTH {
        if !input.players[id.index()].push {
            continue;
        }
        let outcome = ctx.world.push(id, &settings.player);
        log::debug!("P{} push: {:?}", id.number(), outcome);
        if outcome.struck_rival() && mode.notify_rival_struck(id) {
            log::debug!("Rival strike by P{} delivered to {}", id.number(), mode.kind());
        }
    }

    mode.update(&mut ctx, dt);
    let outcome = mode.check_win_condition(ctx.world);
    let kind = mode.kind();

    publish(ctrl, display);

    if let Some(outcome) = outcome {
        log::info!("{kind} finished: {outcome:?}");
        ctrl.begin_next_mode(display);
    }
}

/// Forward queued announcements and refresh the score and timer readouts
fn publish(ctrl: &mut MatchController, display: &mut dyn Display) {
    for announcement in ctrl.announcements.drain(..) {
        display.show_announcement(&announcement.text, announcement.tint);
    }

    let [p1, p2] = ctrl.world.totals();
    display.update_score(p1, p2);
    if let Some(mode) = ctrl.sequencer.current() {
        display.update_timer(mode.time_remaining().max(0.0));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::display::{DisplayCall, RecordingDisplay};
    use crate::settings::Settings;
    use crate::sim::arena::ZoneKind;
    use crate::sim::modes::ModeKind;
    use crate::Autopilot;
    use proptest::prelude::*;

    const START: TickInput = TickInput {
        players: [PlayerInput {
            up: false,
            down: false,
            left: false,
            right: false,
            push: false,
        }; 2],
        start: true,
    };

    fn started() -> (MatchController, RecordingDisplay) {
        let mut ctrl = MatchController::new(Settings::default());
        let mut display = RecordingDisplay::default();
        tick(&mut ctrl, &START, SIM_DT, &mut display);
        (ctrl, display)
    }

    /// Tick with idle input until `done` holds, with a safety cap
    fn run_until(
        ctrl: &mut MatchController,
        display: &mut RecordingDisplay,
        dt: f32,
        done: impl Fn(&MatchController) -> bool,
    ) {
        let idle = TickInput::default();
        for _ in 0..10_000 {
            if done(ctrl) {
                return;
            }
            tick(ctrl, &idle, dt, display);
        }
        panic!("condition not reached; phase {:?}", ctrl.phase());
    }

    fn is_final_results(call: &DisplayCall) -> bool {
        matches!(call, DisplayCall::FinalResults { .. })
    }

    #[test]
    fn test_player_input_direction() {
        let input = PlayerInput {
            up: true,
            down: true,
            left: true,
            ..Default::default()
        };
        assert_eq!(input.direction(), Vec2::new(-1.0, 1.0));
        assert_eq!(PlayerInput::default().direction(), Vec2::ZERO);
    }

    #[test]
    fn test_menu_waits_for_start() {
        let mut ctrl = MatchController::new(Settings::default());
        let mut display = RecordingDisplay::default();
        tick(&mut ctrl, &TickInput::default(), SIM_DT, &mut display);
        assert_eq!(ctrl.phase(), MatchPhase::Menu);
        assert!(display.calls.is_empty());

        tick(&mut ctrl, &START, SIM_DT, &mut display);
        assert_eq!(ctrl.phase(), MatchPhase::Transition);
    }

    #[test]
    fn test_intro_counts_down_then_starts_mode() {
        let (mut ctrl, mut display) = started();
        for _ in 0..13 {
            tick(&mut ctrl, &TickInput::default(), 0.5, &mut display);
        }
        assert_eq!(ctrl.phase(), MatchPhase::Transition);
        assert!(ctrl.world().arena.is_empty(), "arena built only once the mode starts");

        tick(&mut ctrl, &TickInput::default(), 0.5, &mut display);
        assert_eq!(ctrl.phase(), MatchPhase::Playing);
        assert!(!ctrl.world().arena.is_empty());

        let countdown: Vec<u32> = display
            .calls
            .iter()
            .filter_map(|c| match c {
                DisplayCall::IntroCountdown(s) => Some(*s),
                _ => None,
            })
            .collect();
        assert_eq!(countdown, vec![7, 6, 5, 4, 3, 2, 1]);
        assert_eq!(display.count(|c| *c == DisplayCall::HideModeIntro), 1);

        let titles: Vec<&DisplayCall> = display.calls.iter().filter(|c| matches!(c, DisplayCall::ModeTitle(_))).collect();
        assert_eq!(titles, vec![&DisplayCall::ModeTitle(ModeKind::SurvivalGoal.name().to_string())]);
    }

    #[test]
    fn test_input_ignored_outside_playing() {
        let (mut ctrl, mut display) = started();
        let before = ctrl.world().players[0].pos;
        let mut input = TickInput::default();
        input.players[0].right = true;
        input.players[0].push = true;

        tick(&mut ctrl, &input, 0.5, &mut display);
        assert_eq!(ctrl.phase(), MatchPhase::Transition);
        assert_eq!(ctrl.world().players[0].pos, before);
        assert!(ctrl.world().players[0].can_push());
    }

    #[test]
    fn test_movement_applied_while_playing() {
        let (mut ctrl, mut display) = started();
        run_until(&mut ctrl, &mut display, 0.5, |c| c.phase() == MatchPhase::Playing);

        let mut input = TickInput::default();
        input.players[1].up = true;
        tick(&mut ctrl, &input, 0.1, &mut display);
        assert!((ctrl.world().players[1].pos.y - (384.0 - 22.0)).abs() < 1e-3);
        assert_eq!(ctrl.match_time(), 0.1);
    }

    #[test]
    fn test_full_match_totals_and_single_results() {
        let (mut ctrl, mut display) = started();
        run_until(&mut ctrl, &mut display, 0.5, |c| c.phase() == MatchPhase::Results);

        let results = ctrl.results().cloned().unwrap();
        assert_eq!(results.per_mode.len(), 5);
        let kinds: Vec<ModeKind> = results.per_mode.iter().map(|m| m.kind).collect();
        assert_eq!(kinds, ModeKind::ALL);

        let summed = results
            .per_mode
            .iter()
            .fold([0, 0], |acc, m| [acc[0] + m.scores[0], acc[1] + m.scores[1]]);
        assert_eq!(results.totals, summed);
        assert_eq!(ctrl.world().totals(), summed);

        // Idle players tie for distance: every detonation hits player 1
        assert_eq!(results.per_mode[4].scores, [-20, 0]);

        for _ in 0..20 {
            tick(&mut ctrl, &TickInput::default(), 0.5, &mut display);
        }
        assert_eq!(display.count(is_final_results), 1);
        assert!(ctrl.world().arena.is_empty());
        assert!(!ctrl.world().ball.explosive.is_armed());
    }

    #[test]
    fn test_restart_from_results() {
        let (mut ctrl, mut display) = started();
        run_until(&mut ctrl, &mut display, 0.5, |c| c.phase() == MatchPhase::Results);

        tick(&mut ctrl, &START, SIM_DT, &mut display);
        assert_eq!(ctrl.phase(), MatchPhase::Menu);

        tick(&mut ctrl, &START, SIM_DT, &mut display);
        assert_eq!(ctrl.phase(), MatchPhase::Transition);
        assert_eq!(ctrl.current_mode(), Some(ModeKind::SurvivalGoal));
        assert_eq!(ctrl.world().totals(), [0, 0]);
        assert!(ctrl.results().is_none());
    }

    #[test]
    fn test_rival_strike_reaches_dynamic_objective() {
        let (mut ctrl, mut display) = started();
        run_until(&mut ctrl, &mut display, 0.5, |c| {
            c.phase() == MatchPhase::Playing && c.current_mode() == Some(ModeKind::DynamicObjective)
        });

        let world = ctrl.world_mut();
        world.players[0].pos = Vec2::new(300.0, 384.0);
        world.players[1].pos = Vec2::new(360.0, 384.0);
        let mut push = TickInput::default();
        push.players[0].push = true;
        tick(&mut ctrl, &push, SIM_DT, &mut display);
        assert!(ctrl.world().players[1].knockback.x > 0.0);

        let goal = ctrl
            .world()
            .arena
            .zones_of(ZoneKind::Goal)
            .find(|z| z.for_player == Some(PlayerId::One))
            .map(|z| z.region.center())
            .unwrap();
        ctrl.world_mut().ball.pos = goal;
        tick(&mut ctrl, &TickInput::default(), SIM_DT, &mut display);

        assert_eq!(ctrl.world().players[0].mode_score, 2);
        assert!(display.announcements().any(|a| a.text == "GOAL P1! +2"));
    }

    #[test]
    fn test_rival_strike_ignored_by_other_modes() {
        let (mut ctrl, mut display) = started();
        run_until(&mut ctrl, &mut display, 0.5, |c| c.phase() == MatchPhase::Playing);
        assert_eq!(ctrl.current_mode(), Some(ModeKind::SurvivalGoal));

        let world = ctrl.world_mut();
        world.players[0].pos = Vec2::new(300.0, 384.0);
        world.players[1].pos = Vec2::new(360.0, 384.0);
        let mut push = TickInput::default();
        push.players[0].push = true;
        tick(&mut ctrl, &push, SIM_DT, &mut display);

        assert!(ctrl.world().players[1].knockback.x > 0.0);
        assert_eq!(ctrl.world().mode_scores(), [0, 0]);
    }

    #[test]
    fn test_autopilot_matches_are_deterministic() {
        let run = |seed: u64| {
            let mut ctrl = MatchController::new(Settings::default());
            let mut display = RecordingDisplay::default();
            let mut pilot = Autopilot::new(seed);
            for _ in 0..3_000 {
                let input = pilot.input(&ctrl);
                tick(&mut ctrl, &input, SIM_DT, &mut display);
            }
            (serde_json::to_string(ctrl.world()).unwrap(), display.calls.len())
        };
        assert_eq!(run(7), run(7));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(16))]

        #[test]
        fn prop_totals_equal_sum_of_mode_scores(
            injected in prop::collection::vec((-5i32..=5, -5i32..=5), 5),
        ) {
            let (mut ctrl, mut display) = started();

            for (index, (a, b)) in injected.iter().enumerate() {
                run_until(&mut ctrl, &mut display, 0.5, |c| {
                    c.phase() == MatchPhase::Playing && c.sequencer().current_index() == Some(index)
                });
                ctrl.world_mut().players[0].add_score(*a);
                ctrl.world_mut().players[1].add_score(*b);
            }
            run_until(&mut ctrl, &mut display, 0.5, |c| c.phase() == MatchPhase::Results);

            let results = ctrl.results().cloned().unwrap();
            prop_assert_eq!(results.per_mode.len(), 5);
            let summed = results
                .per_mode
                .iter()
                .fold([0, 0], |acc, m| [acc[0] + m.scores[0], acc[1] + m.scores[1]]);
            prop_assert_eq!(results.totals, summed);
            prop_assert_eq!(ctrl.world().totals(), summed);

            // Idle players never score in these modes, so only the injected points land
            for index in [0usize, 1, 3] {
                let (a, b) = injected[index];
                prop_assert_eq!(results.per_mode[index].scores, [a, b]);
            }
            prop_assert_eq!(display.count(is_final_results), 1);
        }
    }
}
