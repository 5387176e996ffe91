use std::{
    ffi::{OsStr, OsString},
    process::ExitStatus,
};

use tracing::{debug, info};

use super::command::run_attached;
use crate::{config::TerminalSettings, result::Result};

/// Set on the relaunched process so that it never relaunches itself again,
/// whatever the terminal emulator exports.
pub const HOSTED_MARKER_ENV: &str = "CLIPMARK_HOSTED";

/// Interface for the terminal emulator the form should be shown in
pub trait TerminalHost {
    /// Whether the current process already runs inside the terminal host
    fn is_hosted(&self) -> bool;

    /// Start the program again inside the terminal host and wait for it
    fn relaunch(&self, program: &OsStr, args: &[OsString]) -> Result<ExitStatus>;
}

/// What the caller should do after [`bootstrap`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bootstrap {
    /// Keep going in the current process
    Continue,

    /// The work was done by a relaunched process, which ended with this status
    Relaunched(ExitStatus),
}

/// Relaunch the program inside the terminal host if not already hosted.
pub fn bootstrap(
    host: &dyn TerminalHost,
    program: &OsStr,
    args: &[OsString],
) -> Result<Bootstrap> {
    if host.is_hosted() {
        debug!("Already inside the terminal host");
        return Ok(Bootstrap::Continue);
    }

    info!("Not inside the terminal host, relaunching");
    let status = host
        .relaunch(program, args)
        .map_err(|err| err.wrap_err_with(|| "Could not launch the terminal host"))?;
    Ok(Bootstrap::Relaunched(status))
}

/// A terminal emulator started as an external program.
///
/// e.g. with the default settings: `kitty --class clipmark <program> <args>...`
pub struct CommandHost<F = fn(&str) -> Option<OsString>> {
    program: String,
    args: Vec<String>,
    hosted_env: Option<String>,
    getenv: F,
}

fn process_env(key: &str) -> Option<OsString> {
    std::env::var_os(key)
}

impl CommandHost {
    pub fn new(settings: &TerminalSettings) -> Self {
        CommandHost::with_env(settings, process_env as fn(&str) -> Option<OsString>)
    }
}

impl<F: Fn(&str) -> Option<OsString>> CommandHost<F> {
    /// Build the host with a custom environment lookup
    pub fn with_env(settings: &TerminalSettings, getenv: F) -> CommandHost<F> {
        CommandHost {
            program: settings.program.clone(),
            args: settings.args.clone(),
            hosted_env: settings.hosted_env.clone(),
            getenv,
        }
    }

    fn is_set(&self, key: &str) -> bool {
        (self.getenv)(key).is_some_and(|v| !v.is_empty())
    }
}

impl<F: Fn(&str) -> Option<OsString>> TerminalHost for CommandHost<F> {
    fn is_hosted(&self) -> bool {
        self.is_set(HOSTED_MARKER_ENV)
            || self
                .hosted_env
                .as_deref()
                .is_some_and(|key| self.is_set(key))
    }

    fn relaunch(&self, program: &OsStr, args: &[OsString]) -> Result<ExitStatus> {
        run_attached(&self.program, |cmd| {
            cmd.env(HOSTED_MARKER_ENV, "1")
                .args(&self.args)
                .arg(program)
                .args(args)
        })
    }
}
