mod clipboard;
mod command;
mod terminal;

pub use clipboard::{read_or_empty, CommandClipboard, StaticText};
pub use terminal::{bootstrap, Bootstrap, CommandHost};
