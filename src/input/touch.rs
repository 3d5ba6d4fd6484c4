use crate::input::key_mapping::SlideAction;

/// A point in device-independent pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchPoint {
    pub x: f64,
    pub y: f64,
}

impl TouchPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Turns a touch start/end pair into a swipe.
///
/// A swipe must be mostly horizontal and longer than `threshold`. Swiping
/// left advances, swiping right goes back.
#[derive(Debug, Clone)]
pub struct SwipeTracker {
    threshold: f64,
    start: Option<TouchPoint>,
}

impl SwipeTracker {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            start: None,
        }
    }

    pub fn begin(&mut self, point: TouchPoint) {
        self.start = Some(point);
    }

    /// Ends the gesture. Without a recorded start nothing happens.
    pub fn end(&mut self, point: TouchPoint) -> Option<SlideAction> {
        let start = self.start.take()?;
        let dx = point.x - start.x;
        let dy = point.y - start.y;

        if dx.abs() <= dy.abs() || dx.abs() <= self.threshold {
            return None;
        }

        if dx < 0.0 {
            Some(SlideAction::Next)
        } else {
            Some(SlideAction::Previous)
        }
    }
}

impl Default for SwipeTracker {
    fn default() -> Self {
        Self::new(50.0)
    }
}
