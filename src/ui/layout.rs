use ratatui::layout::{Constraint, Layout, Margin, Position, Rect};
use std::rc::Rc;
use std::time::Instant;

use crate::deck::Deck;
use crate::input::PointerTarget;
use crate::ui::slide_view::SlideView;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Hit {
    /// A link span on the active slide
    Link(String),
    /// Anywhere else on the slide body
    Slide,
    /// Header or footer
    Chrome,
    None,
}

impl Hit {
    pub fn pointer_target(&self) -> PointerTarget {
        match self {
            Hit::Link(_) => PointerTarget::Interactive,
            _ => PointerTarget::Passive,
        }
    }
}

/// Screen geometry shared by the renderer and mouse hit-testing, so both
/// agree on where every slide line sits.
pub struct LayoutContext {
    root: Rect,
    chunks: Rc<[Rect]>,
}

impl LayoutContext {
    pub fn new(root: Rect, fullscreen: bool) -> Self {
        let chrome = if fullscreen { 0 } else { 1 };
        let chunks = Layout::default()
            .direction(ratatui::layout::Direction::Vertical)
            .constraints([
                Constraint::Length(chrome),
                Constraint::Min(1),
                Constraint::Length(chrome),
            ])
            .split(root);

        Self { root, chunks }
    }

    pub fn header_area(&self) -> Rect {
        self.chunks[0]
    }

    pub fn body_area(&self) -> Rect {
        self.chunks[1]
    }

    pub fn footer_area(&self) -> Rect {
        self.chunks[2]
    }

    /// Where slide lines are drawn: the body minus a small gutter.
    pub fn content_area(&self) -> Rect {
        self.body_area().inner(Margin {
            horizontal: 4,
            vertical: 1,
        })
    }

    pub fn locate(&self, column: u16, row: u16, deck: &Deck, view: &SlideView, now: Instant) -> Hit {
        let position = Position::new(column, row);

        if !self.root.contains(position) {
            return Hit::None;
        }
        if !self.body_area().contains(position) {
            return Hit::Chrome;
        }

        let content = self.content_area();
        let Some(section) = view.active_section().and_then(|index| deck.section(index)) else {
            return Hit::Slide;
        };
        if !content.contains(position) {
            return Hit::Slide;
        }

        let block_index = (row - content.y) as usize;
        if !view.is_block_revealed(section, block_index, now) {
            return Hit::Slide;
        }

        let relative_x = (column - content.x) as usize;
        section.blocks[block_index]
            .link_columns()
            .into_iter()
            .find(|(start, end, _)| (*start..*end).contains(&relative_x))
            .map_or(Hit::Slide, |(_, _, url)| Hit::Link(url.to_string()))
    }
}
