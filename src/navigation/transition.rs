use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Source of time for the transition phases.
pub trait Clock {
    fn now(&self) -> Instant;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// A clock that only moves when told to. Clones share the same time, so a
/// handle kept outside the controller can advance the controller's clock.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Rc<Cell<Instant>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            now: Rc::new(Cell::new(Instant::now())),
        }
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.now.get()
    }
}

/// Durations of the two transition phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionTiming {
    /// Time between hiding the old section and showing the new one
    pub fade_out: Duration,
    /// Time after showing the new section before input is accepted again
    pub fade_in: Duration,
}

impl TransitionTiming {
    pub fn from_millis(fade_out_ms: u64, fade_in_ms: u64) -> Self {
        Self {
            fade_out: Duration::from_millis(fade_out_ms),
            fade_in: Duration::from_millis(fade_in_ms),
        }
    }
}

impl Default for TransitionTiming {
    fn default() -> Self {
        Self::from_millis(300, 300)
    }
}

/// `Idle → Deactivating → Activating → Idle`. Anything but `Idle` holds the
/// transition lock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionPhase {
    Idle,
    /// The old section is hidden; `target` becomes active at `until`
    Deactivating { target: usize, until: Instant },
    /// The new section is shown; the lock is released at `until`
    Activating { until: Instant },
}

impl TransitionPhase {
    pub fn is_idle(&self) -> bool {
        matches!(self, TransitionPhase::Idle)
    }

    pub fn deadline(&self) -> Option<Instant> {
        match self {
            TransitionPhase::Idle => None,
            TransitionPhase::Deactivating { until, .. } | TransitionPhase::Activating { until } => {
                Some(*until)
            }
        }
    }
}
