use anyhow::Result;
use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};
use std::time::Instant;

use super::SlideCapture;
use crate::deck::Deck;
use crate::theme::Theme;
use crate::ui::render_presentation;
use crate::ui::slide_view::SlideView;

/// Draws slides with the presenter's own renderer into an off-screen
/// buffer of a fixed size.
pub struct TerminalCapture {
    width: u16,
    height: u16,
    theme: Theme,
}

impl TerminalCapture {
    pub fn new(width: u16, height: u16, theme: Theme) -> Self {
        Self { width, height, theme }
    }
}

impl SlideCapture for TerminalCapture {
    fn capture(&mut self, deck: &Deck, view: &SlideView) -> Result<Vec<String>> {
        let mut terminal = Terminal::new(TestBackend::new(self.width, self.height))?;
        terminal.draw(|frame| render_presentation(frame, deck, view, &self.theme, Instant::now()))?;
        Ok(buffer_lines(terminal.backend().buffer()))
    }
}

/// Buffer rows as text, trailing padding removed.
fn buffer_lines(buffer: &Buffer) -> Vec<String> {
    let area = buffer.area;
    (area.top()..area.bottom())
        .map(|y| {
            let row: String = (area.left()..area.right())
                .map(|x| buffer[(x, y)].symbol())
                .collect();
            row.trim_end().to_string()
        })
        .collect()
}
