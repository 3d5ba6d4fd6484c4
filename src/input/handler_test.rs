use super::*;
use crate::navigation::{
    DisplayPort, FullscreenPort, ManualClock, NavigationController, TransitionTiming,
};
use crossterm::event::{KeyCode, KeyModifiers};

#[derive(Default)]
struct CountingDisplay {
    counter: String,
    fullscreen: bool,
}

impl DisplayPort for CountingDisplay {
    fn set_active(&mut self, _section: usize, _active: bool) {}

    fn set_progress(&mut self, _fraction: f64) {}

    fn set_counter_text(&mut self, text: &str) {
        self.counter = text.to_string();
    }

    fn reset_animation(&mut self, _section: usize) {}

    fn play_animation(&mut self, _section: usize) {}
}

impl FullscreenPort for CountingDisplay {
    fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    fn request_fullscreen(&mut self) -> anyhow::Result<()> {
        self.fullscreen = true;
        Ok(())
    }

    fn exit_fullscreen(&mut self) -> anyhow::Result<()> {
        self.fullscreen = false;
        Ok(())
    }
}

type Controller = NavigationController<CountingDisplay, ManualClock>;

fn presenter(sections: usize) -> (Controller, ManualClock) {
    let clock = ManualClock::new();
    let controller = NavigationController::new(
        vec![0; sections],
        CountingDisplay::default(),
        clock.clone(),
        TransitionTiming::default(),
    )
    .unwrap();
    (controller, clock)
}

fn settle(controller: &mut Controller, clock: &ManualClock) {
    clock.advance(controller.timing().fade_out);
    controller.tick();
    clock.advance(controller.timing().fade_in);
    controller.tick();
}

#[test]
fn test_key_repeat_inside_lock_advances_once() {
    let (mut controller, clock) = presenter(5);
    let mut input = InputHandler::default();

    for _ in 0..2 {
        let outcome = input.handle_key(KeyCode::Right, KeyModifiers::empty(), Some(&mut controller));
        assert_eq!(outcome, InputOutcome::Consumed);
    }
    settle(&mut controller, &clock);

    assert_eq!(controller.current_index(), 1);
    assert_eq!(controller.display().counter, "2 / 5");
}

#[test]
fn test_keys_drive_the_whole_table() {
    let (mut controller, clock) = presenter(5);
    let mut input = InputHandler::default();
    let none = KeyModifiers::empty();

    let steps = [
        (KeyCode::Char(' '), 1),
        (KeyCode::PageDown, 2),
        (KeyCode::End, 4),
        (KeyCode::Up, 3),
        (KeyCode::Home, 0),
        (KeyCode::Down, 1),
        (KeyCode::PageUp, 0),
    ];
    for (key, expected) in steps {
        input.handle_key(key, none, Some(&mut controller));
        settle(&mut controller, &clock);
        assert_eq!(controller.current_index(), expected, "after {:?}", key);
    }
}

#[test]
fn test_unmapped_keys_are_ignored() {
    let (mut controller, _) = presenter(3);
    let mut input = InputHandler::default();

    let outcome = input.handle_key(KeyCode::Char('z'), KeyModifiers::empty(), Some(&mut controller));
    assert_eq!(outcome, InputOutcome::Ignored);
    assert!(!controller.is_transitioning());
}

#[test]
fn test_fullscreen_key_toggles_either_case() {
    let (mut controller, _) = presenter(2);
    let mut input = InputHandler::default();

    input.handle_key(KeyCode::Char('f'), KeyModifiers::empty(), Some(&mut controller));
    assert!(controller.display().fullscreen);
    input.handle_key(KeyCode::Char('F'), KeyModifiers::SHIFT, Some(&mut controller));
    assert!(!controller.display().fullscreen);
}

#[test]
fn test_quit_works_without_sections() {
    let mut input = InputHandler::default();
    let outcome = input.handle_key::<CountingDisplay, ManualClock>(
        KeyCode::Char('q'),
        KeyModifiers::empty(),
        None,
    );
    assert_eq!(outcome, InputOutcome::Quit);

    let outcome =
        input.handle_key::<CountingDisplay, ManualClock>(KeyCode::Right, KeyModifiers::empty(), None);
    assert_eq!(outcome, InputOutcome::Ignored);
}

#[test]
fn test_click_zones_on_wide_viewport() {
    let (mut controller, clock) = presenter(5);
    let mut input = InputHandler::default();

    input.handle_click(800.0, 1000.0, PointerTarget::Passive, Some(&mut controller));
    settle(&mut controller, &clock);
    assert_eq!(controller.current_index(), 1);

    input.handle_click(200.0, 1000.0, PointerTarget::Passive, Some(&mut controller));
    settle(&mut controller, &clock);
    assert_eq!(controller.current_index(), 0);

    let middle = input.handle_click(500.0, 1000.0, PointerTarget::Passive, Some(&mut controller));
    assert_eq!(middle, InputOutcome::Ignored);

    let on_link = input.handle_click(800.0, 1000.0, PointerTarget::Interactive, Some(&mut controller));
    assert_eq!(on_link, InputOutcome::Ignored);
    assert!(!controller.is_transitioning());
}

#[test]
fn test_touch_swipes() {
    let (mut controller, clock) = presenter(5);
    let mut input = InputHandler::default();

    input.handle_touch_start(TouchPoint::new(300.0, 200.0));
    let outcome = input.handle_touch_end(TouchPoint::new(100.0, 210.0), Some(&mut controller));
    assert_eq!(outcome, InputOutcome::Consumed);
    settle(&mut controller, &clock);
    assert_eq!(controller.current_index(), 1);

    input.handle_touch_start(TouchPoint::new(300.0, 200.0));
    let outcome = input.handle_touch_end(TouchPoint::new(290.0, 210.0), Some(&mut controller));
    assert_eq!(outcome, InputOutcome::Ignored);
    assert!(!controller.is_transitioning());
}

#[test]
fn test_terminal_press_release_on_one_cell_is_a_click() {
    let (mut controller, _) = presenter(3);
    let mut input = InputHandler::default();

    input.pointer_down(90, 10);
    let outcome = input.pointer_up(90, 10, 100, PointerTarget::Passive, Some(&mut controller));

    assert_eq!(outcome, InputOutcome::Consumed);
    assert!(controller.is_transitioning());
}

#[test]
fn test_terminal_drag_is_a_swipe() {
    let (mut controller, clock) = presenter(3);
    let mut input = InputHandler::default();

    // 30 columns at 8px is well past the 50px threshold
    input.pointer_down(60, 10);
    input.pointer_up(30, 10, 100, PointerTarget::Passive, Some(&mut controller));
    settle(&mut controller, &clock);
    assert_eq!(controller.current_index(), 1);

    input.pointer_down(30, 10);
    input.pointer_up(60, 11, 100, PointerTarget::Passive, Some(&mut controller));
    settle(&mut controller, &clock);
    assert_eq!(controller.current_index(), 0);
}

#[test]
fn test_short_terminal_drag_does_nothing() {
    let (mut controller, _) = presenter(3);
    let mut input = InputHandler::default();

    input.pointer_down(90, 10);
    let outcome = input.pointer_up(92, 10, 100, PointerTarget::Passive, Some(&mut controller));

    assert_eq!(outcome, InputOutcome::Ignored);
    assert!(!controller.is_transitioning());
}
