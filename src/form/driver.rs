use ratatui::{
    crossterm::event::{self, Event, KeyEventKind},
    DefaultTerminal,
};
use tracing::debug;

use super::{view, Form, FormOutcome};
use crate::result::Result;

/// Interface for showing the form to the user until they submit or quit
pub trait FormDriver {
    fn run(&mut self, form: &mut Form) -> Result<FormOutcome>;
}

/// Show the form in the current terminal.
///
/// The terminal is in raw mode on the alternate screen while this value
/// lives, and restored when it is dropped (or on panic).
pub struct TerminalDriver {
    terminal: DefaultTerminal,
}

impl TerminalDriver {
    pub fn start() -> Result<Self> {
        let terminal = ratatui::try_init()?;
        debug!("Terminal initialized");
        Ok(Self { terminal })
    }
}

impl Drop for TerminalDriver {
    fn drop(&mut self) {
        ratatui::restore();
        debug!("Terminal restored");
    }
}

impl FormDriver for TerminalDriver {
    fn run(&mut self, form: &mut Form) -> Result<FormOutcome> {
        loop {
            self.terminal.draw(|frame| view::render(frame, form))?;

            // Only key presses, releases are reported by some platforms
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    if let Some(outcome) = form.handle_key(key) {
                        return Ok(outcome);
                    }
                }
            }
        }
    }
}
