use std::{fmt::Display, str::FromStr};

use miette::Diagnostic;
use thiserror::Error;

/// Which side of a [`TimestampPair`] an error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    Start,
    End,
}

impl Display for Bound {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Bound::Start => f.write_str("start"),
            Bound::End => f.write_str("end"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum TimestampError {
    #[error("Invalid start timestamp: '{input}'")]
    #[diagnostic(
        code(clipmark::timestamp::invalid_start),
        help("The start is a number of seconds, e.g. 90")
    )]
    InvalidStart { input: String },

    #[error("Invalid end timestamp: '{input}'")]
    #[diagnostic(
        code(clipmark::timestamp::invalid_end),
        help("The end is a number of seconds (90), a duration after the start (+30) or before it (-30)")
    )]
    InvalidEnd { input: String },

    #[error("Invalid duration: '{input}'")]
    #[diagnostic(
        code(clipmark::timestamp::invalid_duration),
        help("A duration after the start is '+' followed by a number of seconds, e.g. +30")
    )]
    InvalidDuration { input: String },

    #[error("Invalid negative duration: '{input}'")]
    #[diagnostic(
        code(clipmark::timestamp::invalid_negative_duration),
        help("A duration before the start is '-' followed by a non-zero number of seconds, e.g. -30")
    )]
    InvalidNegativeDuration { input: String },

    #[error("The {bound} timestamp resolves to {value}s from '{input}', which is before the video start")]
    #[diagnostic(
        code(clipmark::timestamp::negative),
        help("Timestamps must not be negative")
    )]
    NegativeTimestamp {
        bound: Bound,
        input: String,
        value: i64,
    },
}

/// The end field of the form, before it is resolved against the start
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndTimestamp {
    /// `90`: seconds from the video start
    Absolute(i64),

    /// `+30`: seconds after the start timestamp
    After(i64),

    /// `-30`: seconds before the start timestamp. Always negative.
    Before(i64),
}

impl FromStr for EndTimestamp {
    type Err = TimestampError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(duration) = s.strip_prefix('+') {
            match duration.parse::<i64>() {
                Ok(d) if d >= 0 => Ok(Self::After(d)),
                _ => Err(TimestampError::InvalidDuration {
                    input: s.to_owned(),
                }),
            }
        } else if s.starts_with('-') {
            // Keep the sign, the value is directly the offset to apply
            match s.parse::<i64>() {
                Ok(d) if d < 0 => Ok(Self::Before(d)),
                _ => Err(TimestampError::InvalidNegativeDuration {
                    input: s.to_owned(),
                }),
            }
        } else {
            s.parse()
                .map(Self::Absolute)
                .map_err(|_| TimestampError::InvalidEnd {
                    input: s.to_owned(),
                })
        }
    }
}

impl EndTimestamp {
    /// Compute the absolute end from the start.
    /// `input` is the text this value was parsed from, for error reporting.
    fn resolve(self, start: i64, input: &str) -> Result<i64, TimestampError> {
        match self {
            Self::Absolute(end) => Ok(end),
            Self::After(d) => start
                .checked_add(d)
                .ok_or_else(|| TimestampError::InvalidDuration {
                    input: input.to_owned(),
                }),
            Self::Before(d) => {
                start
                    .checked_add(d)
                    .ok_or_else(|| TimestampError::InvalidNegativeDuration {
                        input: input.to_owned(),
                    })
            }
        }
    }
}

/// A validated `[start, end]` range in seconds.
///
/// Both values are non-negative and `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimestampPair {
    start: u64,
    end: u64,
}

impl TimestampPair {
    pub fn start(&self) -> u64 {
        self.start
    }

    pub fn end(&self) -> u64 {
        self.end
    }

    /// Length of the range in seconds
    pub fn duration(&self) -> u64 {
        self.end - self.start
    }
}

impl Display for TimestampPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}s - {}s", self.start, self.end)
    }
}

/// Parse the start and end texts of the form into an ordered pair.
///
/// The start is an integer number of seconds. The end is either absolute
/// (`90`) or relative to the start (`+30`, `-30`).
///
/// If the end comes before the start, both are swapped.
pub fn normalize(start_text: &str, end_text: &str) -> Result<TimestampPair, TimestampError> {
    let start: i64 = start_text
        .parse()
        .map_err(|_| TimestampError::InvalidStart {
            input: start_text.to_owned(),
        })?;

    let end = end_text
        .parse::<EndTimestamp>()?
        .resolve(start, end_text)?;

    let start = non_negative(Bound::Start, start_text, start)?;
    let end = non_negative(Bound::End, end_text, end)?;

    Ok(if end < start {
        TimestampPair {
            start: end,
            end: start,
        }
    } else {
        TimestampPair { start, end }
    })
}

fn non_negative(bound: Bound, input: &str, value: i64) -> Result<u64, TimestampError> {
    u64::try_from(value).map_err(|_| TimestampError::NegativeTimestamp {
        bound,
        input: input.to_owned(),
        value,
    })
}
