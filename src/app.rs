//! `app.rs` - Presenter state: the deck, its navigation and input routing.
use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::layout::Rect;

use crate::config::Config;
use crate::deck::Deck;
use crate::input::{InputHandler, InputOutcome};
use crate::logging;
use crate::navigation::{NavigationController, SystemClock};
use crate::ui::layout::{Hit, LayoutContext};
use crate::ui::slide_view::{SlideView, ViewOptions};

/// Redraw interval while animated lines are being revealed
const ANIMATION_FRAME: Duration = Duration::from_millis(40);
/// Poll interval when nothing is moving
const IDLE_POLL: Duration = Duration::from_millis(500);

pub struct App {
    pub config: Config,
    pub deck: Deck,
    /// `None` for a deck without sections: nothing to navigate
    pub navigation: Option<NavigationController<SlideView, SystemClock>>,
    pub input: InputHandler,
    pub should_quit: bool,
}

impl App {
    pub fn new(config: Config, deck: Deck) -> Self {
        let view = SlideView::new(&deck, ViewOptions::from_config(&config));
        let navigation =
            NavigationController::new(deck.animated_counts(), view, SystemClock, config.timing());
        let input = config.input_handler();

        if navigation.is_none() {
            logging::warn(&format!("{} has no slides", deck.display_title()));
        }

        Self {
            config,
            deck,
            navigation,
            input,
            should_quit: false,
        }
    }

    pub fn view(&self) -> Option<&SlideView> {
        self.navigation.as_ref().map(|navigation| navigation.display())
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    fn apply(&mut self, outcome: InputOutcome) {
        if outcome == InputOutcome::Quit {
            logging::info("Quit requested");
            self.quit();
        }
    }

    pub fn handle_key(&mut self, key: KeyCode, modifiers: KeyModifiers) {
        let outcome = self.input.handle_key(key, modifiers, self.navigation.as_mut());
        self.apply(outcome);
    }

    pub fn handle_pointer_down(&mut self, column: u16, row: u16) {
        self.input.pointer_down(column, row);
    }

    /// Finishes a press started by `handle_pointer_down`, with `screen` the
    /// current terminal area.
    pub fn handle_pointer_up(&mut self, column: u16, row: u16, screen: Rect) {
        let hit = match self.view() {
            Some(view) => LayoutContext::new(screen, view.is_fullscreen()).locate(
                column,
                row,
                &self.deck,
                view,
                Instant::now(),
            ),
            None => Hit::None,
        };
        if let Hit::Link(url) = &hit {
            logging::debug(&format!("Click on link {}", url));
        }

        let outcome = self.input.pointer_up(
            column,
            row,
            screen.width,
            hit.pointer_target(),
            self.navigation.as_mut(),
        );
        self.apply(outcome);
    }

    /// Advances transitions and reveal animations. Returns true when the
    /// screen needs redrawing.
    pub fn tick(&mut self, now: Instant) -> bool {
        let Some(navigation) = self.navigation.as_mut() else {
            return false;
        };
        let changed = navigation.tick();
        let animating = navigation.display().is_animating(now);
        navigation.display_mut().settle_animations(now);
        changed || animating
    }

    /// How long the event loop may block before `tick` has work again.
    pub fn poll_timeout(&self, now: Instant) -> Duration {
        let Some(navigation) = self.navigation.as_ref() else {
            return IDLE_POLL;
        };

        let mut timeout = IDLE_POLL;
        if let Some(deadline) = navigation.next_deadline() {
            timeout = timeout.min(deadline.saturating_duration_since(now));
        }
        if navigation.display().is_animating(now) {
            timeout = timeout.min(ANIMATION_FRAME);
        }
        timeout
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app(source: &str) -> App {
        App::new(Config::defaults(), Deck::parse(source).unwrap())
    }

    #[test]
    fn empty_deck_is_inert_but_quits() {
        let mut app = app("");
        assert!(app.navigation.is_none());
        assert!(app.view().is_none());

        app.handle_key(KeyCode::Right, KeyModifiers::empty());
        assert!(!app.should_quit);
        assert!(!app.tick(Instant::now()));

        app.handle_key(KeyCode::Char('q'), KeyModifiers::empty());
        assert!(app.should_quit);
    }

    #[test]
    fn first_slide_is_shown_on_start() {
        let app = app("# One\n---\n# Two\n");
        let view = app.view().unwrap();
        assert_eq!(view.active_section(), Some(0));
        assert_eq!(view.counter(), Some("1 / 2"));
    }

    #[test]
    fn poll_timeout_waits_for_transition_deadline() {
        let mut app = app("# One\n---\n# Two\n");
        let now = Instant::now();
        assert_eq!(app.poll_timeout(now), IDLE_POLL);

        app.handle_key(KeyCode::Right, KeyModifiers::empty());
        assert!(app.poll_timeout(Instant::now()) <= app.config.timing().fade_out);
    }

    #[test]
    fn click_on_link_does_not_navigate() {
        let mut app = app("# One\nread the docs at [docs](https://docs.rs)\n---\n# Two\n");
        let screen = Rect::new(0, 0, 30, 10);
        let content = LayoutContext::new(screen, false).content_area();
        // the link label starts 17 columns into the line, inside the right zone
        let column = content.x + 19;
        assert!(column as f64 > screen.width as f64 * 0.65);

        app.handle_pointer_down(column, content.y + 1);
        app.handle_pointer_up(column, content.y + 1, screen);
        assert!(!app.navigation.as_ref().unwrap().is_transitioning());

        app.handle_pointer_down(column, content.y + 3);
        app.handle_pointer_up(column, content.y + 3, screen);
        assert!(app.navigation.as_ref().unwrap().is_transitioning());
    }
}
