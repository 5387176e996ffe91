use std::process::{Command, ExitStatus, Output, Stdio};

use bitflags::bitflags;
use tracing::{debug, enabled, trace, Level};

use crate::result::Result;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Capture: u8 {
        const STDIN = 0b0000001;
        const STDOUT = 0b0000010;
        const STDERR = 0b0000100;
    }
}

/// Run a command, returning its raw output handle.
///
/// IO handles will be captured only if the caller required it or if the log level is Debug.
/// In that last case, `stdout` and `stderr` will be logged.
///
/// The function returns an error only if the command failed to execute.
/// If the program runs but returns a non-0 status code, it will not trigger an error.
pub fn run_command<F: FnOnce(&mut Command) -> &mut Command>(
    program: &str,
    f: F,
    capture: Capture,
) -> Result<Output> {
    let is_debug = enabled!(Level::DEBUG);
    let get_io = |capture| {
        if capture {
            Stdio::piped()
        } else {
            Stdio::null()
        }
    };

    let mut cmd = Command::new(program);
    let cmd = f(&mut cmd)
        .stdin(get_io(capture.contains(Capture::STDIN)))
        .stdout(get_io(is_debug || capture.contains(Capture::STDOUT)))
        .stderr(get_io(is_debug || capture.contains(Capture::STDERR)));

    debug!("Executing command: {cmd:?}");
    let res = cmd.output()?;

    if is_debug {
        debug!("status: {}", res.status);
        debug!("stdout: {} bytes long", res.stdout.len());
        trace!("stdout: {:?}", String::from_utf8_lossy(&res.stdout));
        debug!("stderr: {} bytes long", res.stderr.len());
        trace!("stderr: {:?}", String::from_utf8_lossy(&res.stderr));
    }

    Ok(res)
}

/// Run a command attached to the current standard streams and wait for it.
///
/// As with [`run_command`], only a failure to execute is an error.
pub fn run_attached<F: FnOnce(&mut Command) -> &mut Command>(
    program: &str,
    f: F,
) -> Result<ExitStatus> {
    let mut cmd = Command::new(program);
    let cmd = f(&mut cmd);

    debug!("Executing attached command: {cmd:?}");
    let status = cmd.status()?;
    debug!("status: {status}");

    Ok(status)
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn captures_stdout() {
        let res = run_command("sh", |cmd| cmd.args(["-c", "printf hello"]), Capture::STDOUT)
            .unwrap();
        assert!(res.status.success());
        assert_eq!(res.stdout, b"hello");
    }

    #[test]
    fn failing_status_is_not_an_error() {
        let res = run_command("sh", |cmd| cmd.args(["-c", "exit 3"]), Capture::empty()).unwrap();
        assert_eq!(res.status.code(), Some(3));
    }

    #[test]
    fn missing_program_is_an_error() {
        let res = run_command("clipmark-surely-missing-program", |cmd| cmd, Capture::empty());
        assert!(res.is_err());
    }

    #[test]
    fn attached_returns_status() {
        let status = run_attached("sh", |cmd| cmd.args(["-c", "exit 0"])).unwrap();
        assert!(status.success());
    }
}
