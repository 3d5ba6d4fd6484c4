use crate::input::key_mapping::SlideAction;

/// What a click landed on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerTarget {
    /// Links and other controls that own their clicks
    Interactive,
    /// Slide content or chrome
    Passive,
}

/// Splits the viewport into retreat, neutral and advance columns.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClickZones {
    /// Clicks left of this fraction of the width go back
    pub retreat_below: f64,
    /// Clicks right of this fraction of the width go forward
    pub advance_above: f64,
}

impl ClickZones {
    pub fn new(retreat_below: f64, advance_above: f64) -> Self {
        Self {
            retreat_below,
            advance_above,
        }
    }

    pub fn action_for(&self, x: f64, viewport_width: f64, target: PointerTarget) -> Option<SlideAction> {
        if target == PointerTarget::Interactive || viewport_width <= 0.0 {
            return None;
        }

        if x > viewport_width * self.advance_above {
            Some(SlideAction::Next)
        } else if x < viewport_width * self.retreat_below {
            Some(SlideAction::Previous)
        } else {
            None
        }
    }
}

impl Default for ClickZones {
    fn default() -> Self {
        Self::new(0.35, 0.65)
    }
}
