mod driver;
mod field;
mod view;

pub use driver::{FormDriver, TerminalDriver};
pub use field::TextField;

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// The field receiving the key presses.
///
/// Focus moves forward with Tab and backward with Shift+Tab, wrapping around.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Url,
    Start,
    End,
}

impl Focus {
    pub const ALL: [Focus; 3] = [Focus::Url, Focus::Start, Focus::End];

    pub fn next(self) -> Self {
        match self {
            Focus::Url => Focus::Start,
            Focus::Start => Focus::End,
            Focus::End => Focus::Url,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Focus::Url => Focus::End,
            Focus::Start => Focus::Url,
            Focus::End => Focus::Start,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Focus::Url => "URL",
            Focus::Start => "Start Timestamp",
            Focus::End => "End Timestamp",
        }
    }

    pub fn placeholder(self) -> &'static str {
        match self {
            Focus::Url => "Enter video URL",
            Focus::Start => "Enter start timestamp in seconds (e.g. 90)",
            Focus::End => "Enter end timestamp (e.g. 120) or duration (e.g. +30, -30)",
        }
    }
}

/// The raw text of the three fields at submission time
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormValues {
    pub url: String,
    pub start: String,
    pub end: String,
}

/// How the user left the form
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormOutcome {
    Submit(FormValues),
    Quit,
}

/// A three-field form: video URL, start timestamp, end timestamp
#[derive(Debug, Clone)]
pub struct Form {
    url: TextField,
    start: TextField,
    end: TextField,
    focus: Focus,

    /// Why the last submission was rejected
    error: Option<String>,
}

impl Form {
    /// Create the form with the URL field focused
    pub fn new(url: &str, start: &str) -> Self {
        Self {
            url: TextField::new(url),
            start: TextField::new(start),
            end: TextField::default(),
            focus: Focus::Url,
            error: None,
        }
    }

    pub fn field(&self, focus: Focus) -> &TextField {
        match focus {
            Focus::Url => &self.url,
            Focus::Start => &self.start,
            Focus::End => &self.end,
        }
    }

    fn focused_mut(&mut self) -> &mut TextField {
        match self.focus {
            Focus::Url => &mut self.url,
            Focus::Start => &mut self.start,
            Focus::End => &mut self.end,
        }
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn set_error(&mut self, error: String) {
        self.error = Some(error);
    }

    pub fn values(&self) -> FormValues {
        FormValues {
            url: self.url.value().to_owned(),
            start: self.start.value().to_owned(),
            end: self.end.value().to_owned(),
        }
    }

    /// Update the form with a key press.
    ///
    /// Return the outcome if the key ends the form.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<FormOutcome> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Char('c') if ctrl => return Some(FormOutcome::Quit),
            KeyCode::Esc => return Some(FormOutcome::Quit),
            KeyCode::Enter => return Some(FormOutcome::Submit(self.values())),

            KeyCode::Tab | KeyCode::Down => self.focus = self.focus.next(),
            KeyCode::BackTab | KeyCode::Up => self.focus = self.focus.prev(),

            KeyCode::Char('u') if ctrl => self.edit(TextField::clear),
            KeyCode::Char(c) if !ctrl && !key.modifiers.contains(KeyModifiers::ALT) => {
                self.edit(|field| field.insert(c))
            }
            KeyCode::Backspace => self.edit(TextField::backspace),
            KeyCode::Delete => self.edit(TextField::delete),
            KeyCode::Left => self.focused_mut().move_left(),
            KeyCode::Right => self.focused_mut().move_right(),
            KeyCode::Home => self.focused_mut().move_home(),
            KeyCode::End => self.focused_mut().move_end(),
            _ => {}
        }

        None
    }

    /// Change the focused field text. The previous error no longer applies
    fn edit<F: FnOnce(&mut TextField)>(&mut self, f: F) {
        f(self.focused_mut());
        self.error = None;
    }
}
