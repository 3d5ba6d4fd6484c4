use crossterm::event::{KeyCode, KeyModifiers};

use crate::input::key_mapping::{KeyMapping, SlideAction};
use crate::input::pointer::{ClickZones, PointerTarget};
use crate::input::touch::{SwipeTracker, TouchPoint};
use crate::logging;
use crate::navigation::{Clock, DisplayPort, FullscreenPort, NavigationController};

/// Result of feeding one input event to the handler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputOutcome {
    /// The event means nothing to the presenter
    Ignored,
    /// The event was a presenter command and must not be handled elsewhere
    Consumed,
    /// The user asked to leave
    Quit,
}

/// Pixel size of one terminal cell, used to measure gestures
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellSize {
    pub width_px: f64,
    pub height_px: f64,
}

impl CellSize {
    pub fn to_point(&self, column: u16, row: u16) -> TouchPoint {
        TouchPoint::new(column as f64 * self.width_px, row as f64 * self.height_px)
    }
}

impl Default for CellSize {
    fn default() -> Self {
        Self {
            width_px: 8.0,
            height_px: 16.0,
        }
    }
}

/// Translates keys, clicks and swipes into navigation requests.
///
/// The handler never changes navigation state itself; every effect goes
/// through the controller, which drops whatever it cannot honour.
pub struct InputHandler {
    key_mapping: KeyMapping,
    click_zones: ClickZones,
    swipe: SwipeTracker,
    cell_size: CellSize,
    pressed_cell: Option<(u16, u16)>,
}

impl InputHandler {
    pub fn new(
        key_mapping: KeyMapping,
        click_zones: ClickZones,
        swipe: SwipeTracker,
        cell_size: CellSize,
    ) -> Self {
        Self {
            key_mapping,
            click_zones,
            swipe,
            cell_size,
            pressed_cell: None,
        }
    }

    pub fn handle_key<P, C>(
        &mut self,
        key: KeyCode,
        modifiers: KeyModifiers,
        navigation: Option<&mut NavigationController<P, C>>,
    ) -> InputOutcome
    where
        P: DisplayPort + FullscreenPort,
        C: Clock,
    {
        match self.key_mapping.get_action(key, modifiers) {
            Some(action) => dispatch(action, navigation),
            None => InputOutcome::Ignored,
        }
    }

    /// A click at `x` across a viewport `width` wide, in any unit.
    pub fn handle_click<P, C>(
        &mut self,
        x: f64,
        width: f64,
        target: PointerTarget,
        navigation: Option<&mut NavigationController<P, C>>,
    ) -> InputOutcome
    where
        P: DisplayPort + FullscreenPort,
        C: Clock,
    {
        match self.click_zones.action_for(x, width, target) {
            Some(action) => dispatch(action, navigation),
            None => InputOutcome::Ignored,
        }
    }

    pub fn handle_touch_start(&mut self, point: TouchPoint) {
        self.swipe.begin(point);
    }

    pub fn handle_touch_end<P, C>(
        &mut self,
        point: TouchPoint,
        navigation: Option<&mut NavigationController<P, C>>,
    ) -> InputOutcome
    where
        P: DisplayPort + FullscreenPort,
        C: Clock,
    {
        match self.swipe.end(point) {
            Some(action) => dispatch(action, navigation),
            None => InputOutcome::Ignored,
        }
    }

    /// Left button pressed on a terminal cell: the start of a gesture.
    pub fn pointer_down(&mut self, column: u16, row: u16) {
        self.pressed_cell = Some((column, row));
        self.handle_touch_start(self.cell_size.to_point(column, row));
    }

    /// Left button released. A release far enough away is a swipe; a release
    /// on the pressed cell is a click.
    pub fn pointer_up<P, C>(
        &mut self,
        column: u16,
        row: u16,
        viewport_columns: u16,
        target: PointerTarget,
        navigation: Option<&mut NavigationController<P, C>>,
    ) -> InputOutcome
    where
        P: DisplayPort + FullscreenPort,
        C: Clock,
    {
        let pressed = self.pressed_cell.take();
        let swipe = self.swipe.end(self.cell_size.to_point(column, row));

        if let Some(action) = swipe {
            return dispatch(action, navigation);
        }
        if pressed == Some((column, row)) {
            return self.handle_click(column as f64, viewport_columns as f64, target, navigation);
        }
        InputOutcome::Ignored
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new(
            KeyMapping::default(),
            ClickZones::default(),
            SwipeTracker::default(),
            CellSize::default(),
        )
    }
}

/// Sends one action to the controller. Without a controller only `Quit`
/// still means anything.
pub fn dispatch<P, C>(
    action: SlideAction,
    navigation: Option<&mut NavigationController<P, C>>,
) -> InputOutcome
where
    P: DisplayPort + FullscreenPort,
    C: Clock,
{
    if action == SlideAction::Quit {
        return InputOutcome::Quit;
    }

    let Some(navigation) = navigation else {
        return InputOutcome::Ignored;
    };

    let outcome = match action {
        SlideAction::Next => navigation.next(),
        SlideAction::Previous => navigation.prev(),
        SlideAction::First => navigation.first(),
        SlideAction::Last => navigation.last(),
        SlideAction::ToggleFullscreen => {
            navigation.toggle_fullscreen();
            return InputOutcome::Consumed;
        }
        SlideAction::Quit => return InputOutcome::Quit,
    };
    logging::debug(&format!("{:?} -> {:?}", action, outcome));

    InputOutcome::Consumed
}
