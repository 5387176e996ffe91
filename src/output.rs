use indoc::formatdoc;
use owo_colors::OwoColorize;

use crate::{cli::OutputFormat, session::Submission};

/// Format the validated values for the user or a calling script.
///
/// Labels are only colored when `color` is set, e.g. when writing to a terminal.
pub fn format_submission(submission: &Submission, format: OutputFormat, color: bool) -> String {
    let link = &submission.link;
    let start = submission.range.start();
    let end = submission.range.end();

    match format {
        OutputFormat::Plain => format!("{link} {start} {end}\n"),
        OutputFormat::Text => {
            let label = |s: &'static str| {
                if color {
                    s.bold().green().to_string()
                } else {
                    s.to_owned()
                }
            };

            formatdoc! {"
                {url_label} {link}
                {start_label} {start}
                {end_label} {end}
                ",
                url_label = label("URL:"),
                link = link,
                start_label = label("Start Timestamp:"),
                start = start,
                end_label = label("End Timestamp:"),
                end = end,
            }
        }
    }
}
