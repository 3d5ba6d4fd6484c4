use std::io;
use std::time::Instant;

use crossterm::event::{self, Event, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind};
use ratatui::backend::Backend;
use ratatui::layout::Rect;
use ratatui::Terminal;

use crate::app::App;
use crate::ui;

pub struct Runner<'a, B: Backend> {
    terminal: &'a mut Terminal<B>,
    app: App,
    needs_redraw: bool,
}

impl<'a, B: Backend> Runner<'a, B> {
    pub fn new(terminal: &'a mut Terminal<B>, app: App) -> Self {
        Self {
            terminal,
            app,
            needs_redraw: true,
        }
    }

    pub async fn run(mut self) -> Result<(), io::Error> {
        loop {
            self.tick()?;

            if self.app.should_quit {
                return Ok(());
            }
        }
    }

    /// Draws if needed, waits for input or the next transition deadline,
    /// then lets the app advance its phases.
    fn tick(&mut self) -> Result<(), io::Error> {
        if self.needs_redraw {
            self.terminal.draw(|frame| ui::render(frame, &self.app))?;
            self.needs_redraw = false;
        }

        let timeout = self.app.poll_timeout(Instant::now());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => self.handle_key(key),
                Event::Mouse(mouse) => self.handle_mouse(mouse)?,
                Event::Resize(_, _) => self.needs_redraw = true,
                _ => {}
            }
        }

        if self.app.tick(Instant::now()) {
            self.needs_redraw = true;
        }
        Ok(())
    }

    fn handle_key(&mut self, key: KeyEvent) {
        // Release events would double every keystroke on terminals that report them
        if key.kind == KeyEventKind::Release {
            return;
        }
        self.app.handle_key(key.code, key.modifiers);
        self.needs_redraw = true;
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) -> Result<(), io::Error> {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.app.handle_pointer_down(mouse.column, mouse.row);
            }
            MouseEventKind::Up(MouseButton::Left) => {
                let size = self.terminal.size()?;
                let screen = Rect::new(0, 0, size.width, size.height);
                self.app.handle_pointer_up(mouse.column, mouse.row, screen);
                self.needs_redraw = true;
            }
            _ => {}
        }
        Ok(())
    }
}
