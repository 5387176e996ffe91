use std::{fs::File, sync::Mutex};

use miette::{Context, IntoDiagnostic, Result};
use time::{format_description::FormatItem, macros::format_description, OffsetDateTime, UtcOffset};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::{
    fmt::{format, FmtContext, FormatEvent, FormatFields},
    registry::LookupSpan,
    FmtSubscriber,
};

const TIME_FORMAT: &[FormatItem<'static>] = format_description!("[hour]:[minute]:[second]");

/// Initialize the logging system.
///
/// The terminal belongs to the form, so every message goes to the log file.
pub fn init_logging(level: Level, file: File) -> Result<()> {
    // Getting the local offset can fail on some platforms, UTC is good enough for logs
    let local_offset = UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC);

    let subscriber = file_subscriber(level, local_offset, file);

    tracing::subscriber::set_global_default(subscriber)
        .into_diagnostic()
        .wrap_err("Setting default subscriber failed")
}

fn file_subscriber(
    level: Level,
    offset: UtcOffset,
    file: File,
) -> impl Subscriber + Send + Sync + 'static {
    FmtSubscriber::builder()
        .with_ansi(false)
        .event_format(MyPrettyLogger::new(offset))
        .with_max_level(level)
        .with_writer(Mutex::new(file))
        .finish()
}

/// Custom logger as the default ones are not as customizable as I want.
/// Plain text only, the output is a file
struct MyPrettyLogger {
    offset: UtcOffset,
}

impl MyPrettyLogger {
    fn new(offset: UtcOffset) -> Self {
        Self { offset }
    }
}

impl<S, N> FormatEvent<S, N> for MyPrettyLogger
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: format::Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let metadata = event.metadata();

        let now = OffsetDateTime::now_utc()
            .to_offset(self.offset)
            .time()
            .format(TIME_FORMAT)
            .map_err(|_| std::fmt::Error)?;
        let thread = std::thread::current();
        let thread_name = thread.name().unwrap_or("?");

        write!(
            &mut writer,
            "{} {:>5} {} ",
            now,
            metadata.level(),
            thread_name,
        )?;

        ctx.field_format().format_fields(writer.by_ref(), event)?;

        writeln!(writer)
    }
}

#[cfg(test)]
mod tests {
    use tracing::{debug, warn};

    use super::*;

    #[test]
    fn plain_lines_in_the_file() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let subscriber = file_subscriber(Level::INFO, UtcOffset::UTC, file.reopen().unwrap());

        tracing::subscriber::with_default(subscriber, || {
            warn!("Rejected form values");
            debug!("Not written");
        });

        let content = std::fs::read_to_string(file.path()).unwrap();
        assert!(!content.contains('\x1b'), "{content:?}");

        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 1, "{content:?}");

        let fields: Vec<&str> = lines[0].split_whitespace().collect();
        assert_eq!(fields[0].len(), "HH:MM:SS".len());
        assert_eq!(fields[1], "WARN");
        assert!(lines[0].ends_with(" Rejected form values"), "{content:?}");
    }
}
