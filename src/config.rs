use std::path::Path;

use config::{Config, File, FileFormat};
use miette::{Context, IntoDiagnostic, Result};
use serde::Deserialize;

/// Settings read from the optional configuration file.
/// Every key has a default value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub terminal: TerminalSettings,
    pub clipboard: ClipboardSettings,
}

/// How to show the form in a dedicated terminal emulator window
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TerminalSettings {
    /// Relaunch inside the terminal emulator when not already in it
    pub relaunch: bool,

    /// The terminal emulator program
    pub program: String,

    /// Arguments given to the terminal emulator before the command to run in it
    pub args: Vec<String>,

    /// An environment variable that the terminal emulator sets for its children
    pub hosted_env: Option<String>,
}

impl Default for TerminalSettings {
    fn default() -> Self {
        Self {
            relaunch: false,
            program: "kitty".to_owned(),
            args: vec!["--class".to_owned(), "clipmark".to_owned()],
            hosted_env: Some("KITTY_PID".to_owned()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ClipboardSettings {
    /// Programs printing the clipboard content, tried in order
    pub commands: Vec<Vec<String>>,
}

impl Default for ClipboardSettings {
    fn default() -> Self {
        let commands: [&[&str]; 4] = [
            &["wl-paste", "--no-newline"],
            &["xclip", "-selection", "clipboard", "-o"],
            &["xsel", "--clipboard", "--output"],
            &["pbpaste"],
        ];

        Self {
            commands: commands
                .iter()
                .map(|cmd| cmd.iter().map(|s| s.to_string()).collect())
                .collect(),
        }
    }
}

impl Settings {
    /// Load the settings from the TOML file, or the defaults if there is none
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path).format(FileFormat::Toml));
        }

        builder
            .build()
            .into_diagnostic()
            .wrap_err("Could not read the configuration file")?
            .try_deserialize()
            .into_diagnostic()
            .wrap_err("Invalid configuration")
    }

    /// Parse the settings from a TOML string
    #[cfg(test)]
    pub fn from_toml(toml: &str) -> Result<Self> {
        Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()
            .into_diagnostic()?
            .try_deserialize()
            .into_diagnostic()
    }
}
