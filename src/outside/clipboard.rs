use tracing::{debug, warn};

use super::command::{run_command, Capture};
use crate::{
    config::ClipboardSettings,
    result::{bail, Error, Result},
};

/// Interface for getting the text the user copied
pub trait ClipboardReader {
    fn read_text(&self) -> Result<String>;
}

/// Read the clipboard by running the first clipboard program that works.
///
/// Each command is a program followed by its arguments, and must print the
/// clipboard content on its standard output.
pub struct CommandClipboard {
    commands: Vec<Vec<String>>,
}

impl CommandClipboard {
    pub fn new(settings: &ClipboardSettings) -> Self {
        Self {
            commands: settings.commands.clone(),
        }
    }

    fn read_with(program: &str, args: &[String]) -> Result<String> {
        let res = run_command(program, |cmd| cmd.args(args), Capture::STDOUT)?;
        if !res.status.success() {
            return bail(format!("{program} exited with {}", res.status));
        }

        match String::from_utf8(res.stdout) {
            Ok(text) => Ok(text),
            Err(_) => bail(format!("{program} output is not valid UTF-8")),
        }
    }
}

impl ClipboardReader for CommandClipboard {
    fn read_text(&self) -> Result<String> {
        for command in &self.commands {
            let Some((program, args)) = command.split_first() else {
                continue;
            };

            match Self::read_with(program, args) {
                Ok(text) => {
                    debug!("Read {} bytes from the clipboard with {program}", text.len());
                    return Ok(text);
                }
                Err(err) => debug!("Could not read the clipboard with {program}: {err}"),
            }
        }

        Err(Error::NoClipboardProgram)
    }
}

/// Clipboard replacement for when the text is already known, e.g. given on the command line
pub struct StaticText(pub String);

impl ClipboardReader for StaticText {
    fn read_text(&self) -> Result<String> {
        Ok(self.0.clone())
    }
}

/// Read the clipboard, falling back to an empty text on failure.
///
/// Clipboard programs add a trailing newline, which is not part of any link.
pub fn read_or_empty(reader: &dyn ClipboardReader) -> String {
    match reader.read_text() {
        Ok(text) => text.trim().to_owned(),
        Err(err) => {
            warn!("Could not access the clipboard: {err}");
            String::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn commands(list: &[&[&str]]) -> ClipboardSettings {
        ClipboardSettings {
            commands: list
                .iter()
                .map(|cmd| cmd.iter().map(|s| s.to_string()).collect())
                .collect(),
        }
    }

    #[cfg(unix)]
    #[test]
    fn first_working_program_wins() {
        let clipboard = CommandClipboard::new(&commands(&[
            &["clipmark-surely-missing-program"],
            &["sh", "-c", "exit 1"],
            &["sh", "-c", "printf first"],
            &["sh", "-c", "printf second"],
        ]));
        assert_eq!(clipboard.read_text().unwrap(), "first");
    }

    #[test]
    fn no_program_is_a_domain_error() {
        let clipboard = CommandClipboard::new(&commands(&[&[], &["clipmark-surely-missing-program"]]));
        assert!(matches!(
            clipboard.read_text(),
            Err(Error::NoClipboardProgram)
        ));
    }

    #[test]
    fn failure_reads_as_empty() {
        let clipboard = CommandClipboard::new(&commands(&[]));
        assert_eq!(read_or_empty(&clipboard), "");
    }

    #[test]
    fn text_is_trimmed() {
        let text = StaticText(" https://example-video.com/watch?v=x\n".to_owned());
        assert_eq!(read_or_empty(&text), "https://example-video.com/watch?v=x");
    }
}
