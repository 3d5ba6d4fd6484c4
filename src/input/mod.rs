pub mod handler;
pub mod key_mapping;
pub mod pointer;
pub mod touch;

#[cfg(test)]
mod handler_test;

pub use handler::{dispatch, CellSize, InputHandler, InputOutcome};
pub use key_mapping::{KeyBindings, KeyCombination, KeyMapping, SlideAction};
pub use pointer::{ClickZones, PointerTarget};
pub use touch::{SwipeTracker, TouchPoint};
