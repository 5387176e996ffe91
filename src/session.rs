use miette::Diagnostic;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::{
    form::{Form, FormDriver, FormOutcome, FormValues},
    result::Result,
    types::{normalize, validate, LinkError, TimestampError, TimestampPair, VideoLink},
};

/// What the form starts with
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Prefill {
    pub url: String,
    pub timestamp: String,
}

impl Prefill {
    /// Pre-fill the form from a text that may be a video link.
    ///
    /// Anything that is not a video link gives an empty form.
    pub fn from_text(text: &str) -> Self {
        match validate(text) {
            Ok(check) if check.is_video_url => {
                debug!("Found a video link with timestamp {:?}", check.timestamp);
                Self {
                    url: text.to_owned(),
                    timestamp: check.timestamp,
                }
            }
            Ok(_) => {
                info!("Not a video link, starting with an empty form");
                Self::default()
            }
            Err(err) => {
                info!("Starting with an empty form: {err}");
                Self::default()
            }
        }
    }

    pub fn to_form(&self) -> Form {
        Form::new(&self.url, &self.timestamp)
    }
}

#[derive(Debug, Error, Diagnostic)]
pub enum SubmitError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Link(#[from] LinkError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Timestamp(#[from] TimestampError),
}

impl SubmitError {
    /// The error followed by how to fix it, on one line
    pub fn to_message(&self) -> String {
        match self.help() {
            Some(help) => format!("{self}. {help}"),
            None => self.to_string(),
        }
    }
}

/// A validated link with its timestamps
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub link: VideoLink,
    pub range: TimestampPair,
}

impl Submission {
    /// Check the values of a submitted form
    pub fn from_values(values: &FormValues) -> std::result::Result<Self, SubmitError> {
        let link = VideoLink::parse(&values.url)?;
        let range = normalize(&values.start, &values.end)?;
        Ok(Self { link, range })
    }
}

/// Show the form until its values are valid or the user quits.
///
/// Rejected values are kept in the form along with the reason,
/// for the user to fix them.
pub fn run_session(driver: &mut dyn FormDriver, mut form: Form) -> Result<Option<Submission>> {
    loop {
        match driver.run(&mut form)? {
            FormOutcome::Quit => {
                info!("Form cancelled");
                return Ok(None);
            }
            FormOutcome::Submit(values) => match Submission::from_values(&values) {
                Ok(submission) => {
                    info!(
                        "Validated {} with range {} ({}s)",
                        submission.link,
                        submission.range,
                        submission.range.duration()
                    );
                    return Ok(Some(submission));
                }
                Err(err) => {
                    warn!("Rejected form values {values:?}: {err}");
                    form.set_error(err.to_message());
                }
            },
        }
    }
}
