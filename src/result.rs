use std::fmt::Display;

use miette::miette;

#[derive(Debug)]
pub enum Error {
    /// None of the clipboard programs could be run
    NoClipboardProgram,

    Miette(miette::Report),
}

impl From<miette::Report> for Error {
    fn from(err: miette::Report) -> Self {
        Error::Miette(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Miette(miette::Report::from_err(err))
    }
}

impl From<Error> for miette::Report {
    fn from(err: Error) -> Self {
        match err {
            Error::NoClipboardProgram => miette!(
                help = "Install wl-clipboard, xclip or xsel, or pass the link as an argument",
                "No clipboard program available"
            ),
            Error::Miette(err) => err,
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::NoClipboardProgram => f.write_str("No clipboard program available"),
            Error::Miette(err) => write!(f, "{err}"),
        }
    }
}

impl Error {
    pub fn wrap_err_with<D, F>(self, f: F) -> Error
    where
        D: Display + Send + Sync + 'static,
        F: FnOnce() -> D,
    {
        match self {
            Error::Miette(report) => Error::Miette(report.wrap_err(f())),
            err => err,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// Create an error from a message
pub fn err_msg<D: Display + Send + Sync + 'static>(msg: D) -> Error {
    Error::Miette(miette!("{msg}"))
}

/// Return early with an error built from a message
pub fn bail<T, D: Display + Send + Sync + 'static>(msg: D) -> Result<T> {
    Err(err_msg(msg))
}
