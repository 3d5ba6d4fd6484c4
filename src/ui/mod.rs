use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Gauge, Paragraph},
    Frame,
};
use std::time::Instant;

use crate::app::App;
use crate::deck::{Block as DeckBlock, BlockKind, Deck, Inline, Section};
use crate::theme::Theme;

pub mod layout;
pub mod slide_view;

pub use layout::{Hit, LayoutContext};
pub use slide_view::{AnimationState, SlideView, ViewOptions};

/// Renders the entire UI of the application.
pub fn render(frame: &mut Frame, app: &App) {
    let now = Instant::now();
    match app.view() {
        Some(view) => render_presentation(frame, &app.deck, view, &app.config.theme, now),
        None => render_empty_deck(frame, &app.deck, &app.config.theme),
    }
}

/// Draws the active slide of `deck` with its chrome. Shared by the live
/// presenter and offline export.
pub fn render_presentation(frame: &mut Frame, deck: &Deck, view: &SlideView, theme: &Theme, now: Instant) {
    frame.render_widget(
        Block::default().style(Style::default().bg(theme.base_color())),
        frame.area(),
    );

    let layout = LayoutContext::new(frame.area(), view.is_fullscreen());

    if !view.is_fullscreen() {
        render_header(frame, deck, view, theme, layout.header_area());
        render_progress(frame, view, theme, layout.footer_area());
    }

    // Between the two transition phases no section is active and the body
    // stays blank.
    if let Some(section) = view.active_section().and_then(|index| deck.section(index)) {
        render_section(frame, section, view, theme, layout.content_area(), now);
    }
}

fn render_header(frame: &mut Frame, deck: &Deck, view: &SlideView, theme: &Theme, area: Rect) {
    let style = Style::default()
        .fg(theme.subtext_color())
        .bg(theme.surface_color());

    frame.render_widget(
        Paragraph::new(Line::from(format!(" {}", deck.display_title()))).style(style),
        area,
    );

    if let Some(counter) = view.counter() {
        frame.render_widget(
            Paragraph::new(Line::from(format!("{} ", counter)))
                .alignment(Alignment::Right)
                .style(style),
            area,
        );
    }
}

fn render_progress(frame: &mut Frame, view: &SlideView, theme: &Theme, area: Rect) {
    let Some(progress) = view.progress() else {
        return;
    };

    let gauge = Gauge::default()
        .gauge_style(
            Style::default()
                .fg(theme.progress_color())
                .bg(theme.surface_color()),
        )
        .ratio(progress)
        .label("");
    frame.render_widget(gauge, area);
}

fn render_section(frame: &mut Frame, section: &Section, view: &SlideView, theme: &Theme, area: Rect, now: Instant) {
    let lines: Vec<Line> = section
        .blocks
        .iter()
        .enumerate()
        .map(|(index, block)| {
            if view.is_block_revealed(section, index, now) {
                block_line(block, theme)
            } else {
                Line::default()
            }
        })
        .collect();

    frame.render_widget(
        Paragraph::new(lines).style(Style::default().fg(theme.text_color())),
        area,
    );
}

fn block_line<'a>(block: &'a DeckBlock, theme: &Theme) -> Line<'a> {
    let base = match block.kind {
        BlockKind::Heading => Style::default()
            .fg(theme.heading_color())
            .add_modifier(Modifier::BOLD),
        BlockKind::Code => Style::default().fg(theme.code_color()),
        _ => Style::default().fg(theme.text_color()),
    };

    let mut spans = Vec::with_capacity(block.spans.len() + 1);
    if !block.prefix().is_empty() {
        spans.push(Span::styled(block.prefix(), Style::default().fg(theme.accent_color())));
    }
    for inline in &block.spans {
        spans.push(match inline {
            Inline::Text(text) => Span::styled(text.as_str(), base),
            Inline::Link { label, .. } => Span::styled(
                label.as_str(),
                base.fg(theme.link_color()).add_modifier(Modifier::UNDERLINED),
            ),
        });
    }
    Line::from(spans)
}

fn render_empty_deck(frame: &mut Frame, deck: &Deck, theme: &Theme) {
    frame.render_widget(
        Block::default().style(Style::default().bg(theme.base_color())),
        frame.area(),
    );

    let area = frame.area();
    let middle = Rect::new(area.x, area.y + area.height / 2, area.width, 1.min(area.height));
    frame.render_widget(
        Paragraph::new(format!("{} has no slides. Press q to quit.", deck.display_title()))
            .alignment(Alignment::Center)
            .style(Style::default().fg(theme.subtext_color())),
        middle,
    );
}
