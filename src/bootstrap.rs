use std::io::{self, Stdout};
use std::panic;

use anyhow::{Context, Result};
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use crate::config::Config;
use crate::logging;

pub type AppTerminal = Terminal<CrosstermBackend<Stdout>>;

/// Starts file logging as configured. Failing to log is not fatal.
pub fn init_logging(config: &Config) {
    match logging::init_logger(&config.log_dir(), config.logging.level) {
        Ok(path) => logging::info(&format!("Logging to {}", path.display())),
        Err(err) => eprintln!("Logging disabled: {:#}", err),
    }
}

/// Logs panics and puts the terminal back into cooked mode first, so the
/// default panic message is readable.
pub fn install_panic_hook() {
    let default_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);

        let panic_message = if let Some(msg) = panic_info.payload().downcast_ref::<&str>() {
            msg.to_string()
        } else if let Some(msg) = panic_info.payload().downcast_ref::<String>() {
            msg.clone()
        } else {
            "Unknown panic message".to_string()
        };

        let location = panic_info
            .location()
            .map(|loc| format!("{}:{}:{}", loc.file(), loc.line(), loc.column()))
            .unwrap_or_else(|| "unknown location".to_string());

        logging::error(&format!(
            "PANIC:\nMessage: {}\nLocation: {}",
            panic_message, location
        ));

        default_hook(panic_info);
    }));
}

/// Raw mode, alternate screen and mouse capture for as long as it lives.
pub struct TerminalSession {
    terminal: AppTerminal,
}

impl TerminalSession {
    pub fn new() -> Result<Self> {
        enable_raw_mode().context("Failed to enable raw mode")?;
        logging::debug("Enabled raw mode");

        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
            .context("Failed to enter alternate screen")?;
        logging::debug("Entered alternate screen");

        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;

        Ok(Self { terminal })
    }

    pub fn terminal_mut(&mut self) -> &mut AppTerminal {
        &mut self.terminal
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        if let Err(err) = disable_raw_mode() {
            logging::error(&format!("Failed to disable raw mode: {}", err));
        }

        let backend = self.terminal.backend_mut();
        if let Err(err) = execute!(backend, LeaveAlternateScreen, DisableMouseCapture) {
            logging::error(&format!("Failed to leave alternate screen: {}", err));
        }

        if let Err(err) = self.terminal.show_cursor() {
            logging::error(&format!("Failed to show cursor: {}", err));
        }
    }
}
