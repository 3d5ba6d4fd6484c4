/// What a navigation request did.
///
/// Ignored requests are not errors; callers are free to drop the outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationOutcome {
    /// A transition from `from` to `to` is now in flight
    Started { from: usize, to: usize },
    /// Nothing changed
    Ignored(IgnoreReason),
}

impl NavigationOutcome {
    pub fn is_started(&self) -> bool {
        matches!(self, NavigationOutcome::Started { .. })
    }
}

/// Why a request was dropped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// Another transition still holds the lock
    Transitioning,
    /// The target index does not name a section
    OutOfRange,
    /// The target is the section already shown
    AlreadyActive,
    /// `next` on the last section or `prev` on the first
    Boundary,
}

/// Read-only snapshot of the controller state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavigationState {
    pub current_index: usize,
    pub section_count: usize,
    pub is_transitioning: bool,
}

impl NavigationState {
    pub fn is_first(&self) -> bool {
        self.current_index == 0
    }

    pub fn is_last(&self) -> bool {
        self.current_index + 1 == self.section_count
    }
}

/// Progress fill in `0.0..=1.0` for section `index` of `count`.
pub fn progress_fraction(index: usize, count: usize) -> f64 {
    if count == 0 {
        return 0.0;
    }
    (index + 1) as f64 / count as f64
}

/// Counter text, e.g. `"3 / 5"`.
pub fn counter_text(index: usize, count: usize) -> String {
    format!("{} / {}", index + 1, count)
}
