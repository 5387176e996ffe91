use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use tracing::Level;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One labelled line per value
    Text,
    /// A single line: `<url> <start> <end>`
    Plain,
}

macro_rules! arg_env {
    ($v:literal) => {
        concat!("CLIPMARK_", $v)
    };
}

/// Pick a start and end timestamp for the video link in the clipboard.
///
/// The link and the timestamp it may carry are pre-filled in a small terminal form.
/// Edit them, then press Enter to print the validated link and timestamps.
#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Args {
    /// The video link to use instead of the clipboard content
    pub link: Option<String>,

    /// The path to a TOML configuration file
    #[arg(long, env=arg_env!("CONFIG"))]
    pub config: Option<PathBuf>,

    /// The path to the log file.
    /// By default, logs go to a new temporary file
    #[arg(long, env=arg_env!("LOG_FILE"))]
    pub log_file: Option<PathBuf>,

    /// The maximum level of the logged messages
    #[arg(long, default_value_t=Level::INFO, env=arg_env!("LOG_LEVEL"))]
    pub log_level: Level,

    /// Open the form in the configured terminal emulator if not already inside it
    #[arg(long, env=arg_env!("RELAUNCH"))]
    pub relaunch: bool,

    /// Write the result to this file instead of the standard output
    #[arg(long, env=arg_env!("RESULT_FILE"))]
    pub result_file: Option<PathBuf>,

    /// How to print the result
    #[arg(long, value_enum, default_value_t=OutputFormat::Text, env=arg_env!("FORMAT"))]
    pub format: OutputFormat,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let args = Args::try_parse_from(["clipmark"]).unwrap();
        assert_eq!(args.link, None);
        assert_eq!(args.log_level, Level::INFO);
        assert_eq!(args.format, OutputFormat::Text);
        assert!(!args.relaunch);
        assert_eq!(args.result_file, None);
    }

    #[test]
    fn all_options() {
        let args = Args::try_parse_from([
            "clipmark",
            "https://example-video.com/watch?v=x",
            "--log-level",
            "debug",
            "--format",
            "plain",
            "--relaunch",
            "--config",
            "clipmark.toml",
        ])
        .unwrap();

        assert_eq!(args.link.as_deref(), Some("https://example-video.com/watch?v=x"));
        assert_eq!(args.log_level, Level::DEBUG);
        assert_eq!(args.format, OutputFormat::Plain);
        assert!(args.relaunch);
        assert_eq!(args.config, Some(PathBuf::from("clipmark.toml")));
    }

    #[test]
    fn command_is_well_formed() {
        use clap::CommandFactory;
        Args::command().debug_assert();
    }
}
