mod cli;
mod config;
mod form;
mod io;
mod logging;
mod my_regex;
mod outside;
mod output;
mod result;
mod session;
mod types;

use std::{
    ffi::OsString,
    io::{IsTerminal, Write},
};

use clap::Parser;
use miette::{bail, Context, IntoDiagnostic, Result};
use tracing::{debug, info};

use crate::{
    cli::Args,
    config::Settings,
    form::TerminalDriver,
    io::open_log_file,
    logging::init_logging,
    output::format_submission,
    outside::{bootstrap, read_or_empty, Bootstrap, CommandClipboard, CommandHost, StaticText},
    session::{run_session, Prefill},
};

fn main() -> Result<()> {
    // Initialize the environment & CLI
    let args = Args::parse();
    let settings = Settings::load(args.config.as_deref())?;

    let (log_file, log_path) = open_log_file(args.log_file.as_deref())
        .map_err(|err| err.wrap_err_with(|| "Could not open the log file"))?;
    init_logging(args.log_level, log_file)?;
    debug!("Logging to {}", log_path.display());
    debug!("Settings: {settings:?}");

    if (args.relaunch || settings.terminal.relaunch) && relaunch_in_terminal(&args, &settings)? {
        return Ok(());
    }

    // Get the link from the command line or the clipboard
    let text = match &args.link {
        Some(link) => read_or_empty(&StaticText(link.clone())),
        None => read_or_empty(&CommandClipboard::new(&settings.clipboard)),
    };
    let prefill = Prefill::from_text(&text);

    // The terminal must be restored before printing anything
    let submission = {
        let mut driver = TerminalDriver::start()
            .map_err(|err| err.wrap_err_with(|| "Could not set up the terminal"))?;
        run_session(&mut driver, prefill.to_form())?
    };

    let Some(submission) = submission else {
        info!("Nothing to output");
        return Ok(());
    };

    match &args.result_file {
        Some(path) => {
            let out = format_submission(&submission, args.format, false);
            std::fs::write(path, out)
                .into_diagnostic()
                .wrap_err_with(|| format!("Could not write {}", path.display()))?;
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            let out = format_submission(&submission, args.format, stdout.is_terminal());
            stdout.write_all(out.as_bytes()).into_diagnostic()?;
        }
    }

    Ok(())
}

/// Run the program again inside the terminal emulator if needed.
///
/// Return whether the work was done by the relaunched program.
/// Its result goes through a temporary file since its standard output is the
/// terminal emulator window.
fn relaunch_in_terminal(args: &Args, settings: &Settings) -> Result<bool> {
    let host = CommandHost::new(&settings.terminal);
    let program = std::env::current_exe()
        .into_diagnostic()
        .wrap_err("Could not find the current executable")?;
    let mut child_args: Vec<OsString> = std::env::args_os().skip(1).collect();

    // The result is already written to a file if the user asked for it
    let result_file = if args.result_file.is_none() {
        let file = tempfile::NamedTempFile::new().into_diagnostic()?;
        child_args.push("--result-file".into());
        child_args.push(file.path().into());
        Some(file)
    } else {
        None
    };

    let status = match bootstrap(&host, program.as_os_str(), &child_args)? {
        Bootstrap::Continue => return Ok(false),
        Bootstrap::Relaunched(status) => status,
    };

    if !status.success() {
        bail!("The program in the terminal emulator ended with {status}");
    }

    if let Some(file) = result_file {
        let out = std::fs::read(file.path()).into_diagnostic()?;
        std::io::stdout().write_all(&out).into_diagnostic()?;
    }

    Ok(true)
}
