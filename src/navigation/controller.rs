use std::time::Instant;

use crate::logging;
use crate::navigation::display::{DisplayPort, FullscreenPort};
use crate::navigation::transition::{Clock, SystemClock, TransitionPhase, TransitionTiming};
use crate::navigation::types::{
    counter_text, progress_fraction, IgnoreReason, NavigationOutcome, NavigationState,
};

/// Owns the active section index and the transition lock, and keeps the
/// display in step with them.
///
/// Exactly one section is active except between the two phases of a
/// transition, when none is. `current_index` only changes when a
/// `Deactivating` phase completes inside [`NavigationController::tick`].
pub struct NavigationController<P, C = SystemClock> {
    display: P,
    clock: C,
    timing: TransitionTiming,
    /// Animated children per section, in section order
    animated_counts: Vec<usize>,
    current: usize,
    phase: TransitionPhase,
}

impl<P: DisplayPort, C: Clock> NavigationController<P, C> {
    /// Takes over `display` and shows the first section.
    ///
    /// `animated_counts` has one entry per section. Returns `None` when there
    /// are no sections: an empty presentation has nothing to navigate.
    pub fn new(
        animated_counts: Vec<usize>,
        display: P,
        clock: C,
        timing: TransitionTiming,
    ) -> Option<Self> {
        if animated_counts.is_empty() {
            logging::warn("No sections found, navigation disabled");
            return None;
        }

        let mut controller = Self {
            display,
            clock,
            timing,
            animated_counts,
            current: 0,
            phase: TransitionPhase::Idle,
        };

        controller.display.set_active(0, true);
        controller.update_widgets();
        controller.play_enter_animation(0);
        logging::debug(&format!(
            "Navigation ready with {} sections",
            controller.section_count()
        ));

        Some(controller)
    }

    pub fn display(&self) -> &P {
        &self.display
    }

    pub fn display_mut(&mut self) -> &mut P {
        &mut self.display
    }

    pub fn timing(&self) -> TransitionTiming {
        self.timing
    }

    pub fn phase(&self) -> TransitionPhase {
        self.phase
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn section_count(&self) -> usize {
        self.animated_counts.len()
    }

    pub fn is_transitioning(&self) -> bool {
        !self.phase.is_idle()
    }

    pub fn state(&self) -> NavigationState {
        NavigationState {
            current_index: self.current,
            section_count: self.section_count(),
            is_transitioning: self.is_transitioning(),
        }
    }

    pub fn next(&mut self) -> NavigationOutcome {
        if self.is_transitioning() {
            return NavigationOutcome::Ignored(IgnoreReason::Transitioning);
        }
        if self.state().is_last() {
            return NavigationOutcome::Ignored(IgnoreReason::Boundary);
        }
        self.go_to(self.current + 1)
    }

    pub fn prev(&mut self) -> NavigationOutcome {
        if self.is_transitioning() {
            return NavigationOutcome::Ignored(IgnoreReason::Transitioning);
        }
        if self.state().is_first() {
            return NavigationOutcome::Ignored(IgnoreReason::Boundary);
        }
        self.go_to(self.current - 1)
    }

    pub fn first(&mut self) -> NavigationOutcome {
        self.go_to(0)
    }

    pub fn last(&mut self) -> NavigationOutcome {
        self.go_to(self.section_count() - 1)
    }

    /// Starts a transition to `target`.
    ///
    /// The current section is hidden immediately; the target is shown once
    /// the fade-out phase has elapsed and [`tick`](Self::tick) runs.
    pub fn go_to(&mut self, target: usize) -> NavigationOutcome {
        if self.is_transitioning() {
            return NavigationOutcome::Ignored(IgnoreReason::Transitioning);
        }
        if target >= self.section_count() {
            return NavigationOutcome::Ignored(IgnoreReason::OutOfRange);
        }
        if target == self.current {
            return NavigationOutcome::Ignored(IgnoreReason::AlreadyActive);
        }

        let from = self.current;
        self.display.set_active(from, false);
        self.phase = TransitionPhase::Deactivating {
            target,
            until: self.clock.now() + self.timing.fade_out,
        };
        logging::debug(&format!("Transition {} -> {} started", from, target));

        NavigationOutcome::Started { from, to: target }
    }

    /// Advances the transition phases whose deadlines have passed. Returns
    /// true when anything changed.
    pub fn tick(&mut self) -> bool {
        let now = self.clock.now();
        let mut changed = false;

        loop {
            match self.phase {
                TransitionPhase::Deactivating { target, until } if now >= until => {
                    self.activate(target);
                    self.phase = TransitionPhase::Activating {
                        until: now + self.timing.fade_in,
                    };
                    changed = true;
                }
                TransitionPhase::Activating { until } if now >= until => {
                    self.phase = TransitionPhase::Idle;
                    changed = true;
                }
                _ => break,
            }
        }

        changed
    }

    /// When `tick` next has work to do, if a transition is in flight.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.phase.deadline()
    }

    fn activate(&mut self, target: usize) {
        self.display.set_active(target, true);
        self.play_enter_animation(target);
        self.current = target;
        self.update_widgets();
    }

    fn play_enter_animation(&mut self, section: usize) {
        if self.animated_counts.get(section).copied().unwrap_or(0) == 0 {
            return;
        }
        self.display.reset_animation(section);
        self.display.play_animation(section);
    }

    fn update_widgets(&mut self) {
        let count = self.section_count();
        self.display.set_progress(progress_fraction(self.current, count));
        self.display.set_counter_text(&counter_text(self.current, count));
    }
}

impl<P: DisplayPort + FullscreenPort, C: Clock> NavigationController<P, C> {
    /// Enters fullscreen when windowed and leaves it otherwise. A surface that
    /// refuses is left as it was.
    pub fn toggle_fullscreen(&mut self) {
        let result = if self.display.is_fullscreen() {
            self.display.exit_fullscreen()
        } else {
            self.display.request_fullscreen()
        };

        if let Err(err) = result {
            logging::debug(&format!("Fullscreen toggle refused: {}", err));
        }
    }
}
