use super::*;
use anyhow::anyhow;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
enum DisplayEvent {
    Active(usize, bool),
    Reset(usize),
    Play(usize),
}

#[derive(Default)]
struct RecordingDisplay {
    active: Vec<bool>,
    progress: Option<f64>,
    counter: Option<String>,
    events: Vec<DisplayEvent>,
    fullscreen: bool,
    refuse_fullscreen: bool,
}

impl RecordingDisplay {
    fn with_sections(count: usize) -> Self {
        Self {
            active: vec![false; count],
            ..Self::default()
        }
    }

    fn active_sections(&self) -> Vec<usize> {
        self.active
            .iter()
            .enumerate()
            .filter(|(_, active)| **active)
            .map(|(index, _)| index)
            .collect()
    }

    fn plays_of(&self, section: usize) -> usize {
        self.events
            .iter()
            .filter(|e| **e == DisplayEvent::Play(section))
            .count()
    }
}

impl DisplayPort for RecordingDisplay {
    fn set_active(&mut self, section: usize, active: bool) {
        self.active[section] = active;
        self.events.push(DisplayEvent::Active(section, active));
    }

    fn set_progress(&mut self, fraction: f64) {
        self.progress = Some(fraction);
    }

    fn set_counter_text(&mut self, text: &str) {
        self.counter = Some(text.to_string());
    }

    fn reset_animation(&mut self, section: usize) {
        self.events.push(DisplayEvent::Reset(section));
    }

    fn play_animation(&mut self, section: usize) {
        self.events.push(DisplayEvent::Play(section));
    }
}

impl FullscreenPort for RecordingDisplay {
    fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    fn request_fullscreen(&mut self) -> anyhow::Result<()> {
        if self.refuse_fullscreen {
            return Err(anyhow!("fullscreen not allowed"));
        }
        self.fullscreen = true;
        Ok(())
    }

    fn exit_fullscreen(&mut self) -> anyhow::Result<()> {
        self.fullscreen = false;
        Ok(())
    }
}

type TestController = NavigationController<RecordingDisplay, ManualClock>;

fn controller_with(animated_counts: Vec<usize>) -> (TestController, ManualClock) {
    let clock = ManualClock::new();
    let display = RecordingDisplay::with_sections(animated_counts.len());
    let controller = NavigationController::new(
        animated_counts,
        display,
        clock.clone(),
        TransitionTiming::default(),
    )
    .expect("deck has sections");
    (controller, clock)
}

fn controller(sections: usize) -> (TestController, ManualClock) {
    controller_with(vec![0; sections])
}

/// Runs both transition phases to completion.
fn settle(controller: &mut TestController, clock: &ManualClock) {
    let timing = controller.timing();
    clock.advance(timing.fade_out);
    controller.tick();
    clock.advance(timing.fade_in);
    controller.tick();
}

#[test]
fn test_no_sections_means_no_controller() {
    let controller = NavigationController::new(
        Vec::new(),
        RecordingDisplay::default(),
        ManualClock::new(),
        TransitionTiming::default(),
    );
    assert!(controller.is_none());
}

#[test]
fn test_initial_state_shows_first_section() {
    let (controller, _) = controller_with(vec![2, 0, 0]);
    let display = controller.display();

    assert_eq!(controller.current_index(), 0);
    assert!(!controller.is_transitioning());
    assert_eq!(display.active_sections(), vec![0]);
    assert_eq!(display.counter.as_deref(), Some("1 / 3"));
    assert!((display.progress.unwrap() - 1.0 / 3.0).abs() < 1e-9);
    assert_eq!(
        display.events,
        vec![
            DisplayEvent::Active(0, true),
            DisplayEvent::Reset(0),
            DisplayEvent::Play(0),
        ]
    );
}

#[test]
fn test_transition_runs_through_both_phases() {
    let (mut controller, clock) = controller(3);

    assert_eq!(
        controller.next(),
        NavigationOutcome::Started { from: 0, to: 1 }
    );
    assert!(matches!(
        controller.phase(),
        TransitionPhase::Deactivating { target: 1, .. }
    ));
    assert!(controller.display().active_sections().is_empty());
    assert_eq!(controller.current_index(), 0);

    clock.advance(Duration::from_millis(299));
    assert!(!controller.tick());
    assert!(controller.display().active_sections().is_empty());

    clock.advance(Duration::from_millis(1));
    assert!(controller.tick());
    assert!(matches!(controller.phase(), TransitionPhase::Activating { .. }));
    assert_eq!(controller.current_index(), 1);
    assert_eq!(controller.display().active_sections(), vec![1]);
    assert_eq!(controller.display().counter.as_deref(), Some("2 / 3"));

    clock.advance(controller.timing().fade_in);
    assert!(controller.tick());
    assert!(controller.phase().is_idle());
    assert!(controller.next_deadline().is_none());
}

#[test]
fn test_next_deadline_follows_phase() {
    let (mut controller, clock) = controller(2);
    let start = clock.now();
    controller.next();
    assert_eq!(
        controller.next_deadline(),
        Some(start + controller.timing().fade_out)
    );
}

#[test]
fn test_late_tick_completes_fade_out_only() {
    let (mut controller, clock) = controller(3);
    controller.next();
    clock.advance(Duration::from_secs(5));
    controller.tick();
    // the lock is held for a full fade-in measured from activation
    assert!(controller.is_transitioning());
    assert_eq!(controller.current_index(), 1);
}

#[test]
fn test_debounce_drops_second_request() {
    let (mut controller, clock) = controller(5);

    assert!(controller.next().is_started());
    assert_eq!(
        controller.next(),
        NavigationOutcome::Ignored(IgnoreReason::Transitioning)
    );
    settle(&mut controller, &clock);

    assert_eq!(controller.current_index(), 1);
}

#[test]
fn test_requests_during_fade_in_are_dropped() {
    let (mut controller, clock) = controller(5);
    controller.next();
    clock.advance(controller.timing().fade_out);
    controller.tick();

    assert_eq!(
        controller.go_to(4),
        NavigationOutcome::Ignored(IgnoreReason::Transitioning)
    );
    assert_eq!(
        controller.prev(),
        NavigationOutcome::Ignored(IgnoreReason::Transitioning)
    );

    clock.advance(controller.timing().fade_in);
    controller.tick();
    assert!(controller.go_to(4).is_started());
}

#[test]
fn test_out_of_range_and_redundant_targets_are_ignored() {
    let (mut controller, _) = controller(3);

    assert_eq!(
        controller.go_to(3),
        NavigationOutcome::Ignored(IgnoreReason::OutOfRange)
    );
    assert_eq!(
        controller.go_to(usize::MAX),
        NavigationOutcome::Ignored(IgnoreReason::OutOfRange)
    );
    assert_eq!(
        controller.go_to(0),
        NavigationOutcome::Ignored(IgnoreReason::AlreadyActive)
    );
    assert_eq!(
        controller.first(),
        NavigationOutcome::Ignored(IgnoreReason::AlreadyActive)
    );
    assert!(!controller.is_transitioning());
    assert_eq!(controller.display().active_sections(), vec![0]);
}

#[test]
fn test_boundaries_are_idempotent() {
    let (mut controller, clock) = controller(3);

    for _ in 0..3 {
        assert_eq!(
            controller.prev(),
            NavigationOutcome::Ignored(IgnoreReason::Boundary)
        );
    }
    assert_eq!(controller.state().current_index, 0);

    controller.last();
    settle(&mut controller, &clock);
    let before = controller.state();
    for _ in 0..3 {
        assert_eq!(
            controller.next(),
            NavigationOutcome::Ignored(IgnoreReason::Boundary)
        );
    }
    assert_eq!(controller.state(), before);
    assert!(before.is_last());
}

#[test]
fn test_single_section_never_moves() {
    let (mut controller, _) = controller(1);
    assert!(!controller.next().is_started());
    assert!(!controller.prev().is_started());
    assert!(!controller.last().is_started());
    assert_eq!(controller.display().counter.as_deref(), Some("1 / 1"));
}

#[test]
fn test_single_active_and_range_invariants_hold() {
    let (mut controller, clock) = controller(4);
    let requests: [fn(&mut TestController) -> NavigationOutcome; 6] = [
        |c| c.next(),
        |c| c.last(),
        |c| c.next(),
        |c| c.prev(),
        |c| c.go_to(7),
        |c| c.first(),
    ];

    for request in requests.iter().cycle().take(24) {
        let started = request(&mut controller).is_started();
        if started {
            assert!(controller.display().active_sections().is_empty());
        }
        settle(&mut controller, &clock);

        let state = controller.state();
        assert!(state.current_index < state.section_count);
        assert_eq!(
            controller.display().active_sections(),
            vec![state.current_index]
        );
    }
}

#[test]
fn test_projection_matches_every_index() {
    let (mut controller, clock) = controller(4);

    for target in [3, 1, 2, 0] {
        controller.go_to(target);
        settle(&mut controller, &clock);

        let display = controller.display();
        assert_eq!(
            display.counter.as_deref(),
            Some(format!("{} / 4", target + 1).as_str())
        );
        let expected = (target + 1) as f64 / 4.0 * 100.0;
        assert!((display.progress.unwrap() * 100.0 - expected).abs() < 1e-9);
    }
}

#[test]
fn test_five_section_walkthrough() {
    let (mut controller, clock) = controller(5);
    let steps: [(fn(&mut TestController) -> NavigationOutcome, usize, &str); 4] = [
        (|c| c.next(), 1, "2 / 5"),
        (|c| c.next(), 2, "3 / 5"),
        (|c| c.last(), 4, "5 / 5"),
        (|c| c.prev(), 3, "4 / 5"),
    ];

    for (action, index, counter) in steps {
        assert!(action(&mut controller).is_started());
        settle(&mut controller, &clock);
        assert_eq!(controller.current_index(), index);
        assert_eq!(controller.display().counter.as_deref(), Some(counter));
    }
}

#[test]
fn test_enter_animation_replays_on_every_visit() {
    let (mut controller, clock) = controller_with(vec![0, 3, 0]);

    controller.next();
    settle(&mut controller, &clock);
    controller.prev();
    settle(&mut controller, &clock);
    controller.next();
    settle(&mut controller, &clock);

    let display = controller.display();
    assert_eq!(display.plays_of(1), 2);
    assert_eq!(display.plays_of(0), 0);

    let last_reset = display
        .events
        .iter()
        .rposition(|e| *e == DisplayEvent::Reset(1))
        .unwrap();
    assert_eq!(display.events[last_reset + 1], DisplayEvent::Play(1));
}

#[test]
fn test_fullscreen_toggles_and_swallows_refusal() {
    let (mut controller, _) = controller(2);

    controller.toggle_fullscreen();
    assert!(controller.display().fullscreen);
    controller.toggle_fullscreen();
    assert!(!controller.display().fullscreen);

    controller.display_mut().refuse_fullscreen = true;
    controller.toggle_fullscreen();
    assert!(!controller.display().fullscreen);
    assert_eq!(controller.current_index(), 0);
}
