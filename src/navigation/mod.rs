pub mod controller;
pub mod display;
pub mod transition;
pub mod types;

#[cfg(test)]
mod controller_test;

pub use controller::NavigationController;
pub use display::{DisplayPort, FullscreenPort};
pub use transition::{Clock, ManualClock, SystemClock, TransitionPhase, TransitionTiming};
pub use types::*;
