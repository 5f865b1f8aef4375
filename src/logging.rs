//! Console and file logging for a conversion run

use std::fmt;
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::EnvFilter;

use crate::config::LogLevel;

/// Environment variable holding an `EnvFilter` directive that overrides `--log-level`
pub const LOG_ENV: &str = "MOTHERSTARTER_LOG";

/// `LEVEL - message`, optionally prefixed by a local timestamp
#[derive(Debug, Clone, Copy)]
pub struct DashFormat {
    timestamps: bool,
}

impl DashFormat {
    /// Format used on the console
    pub fn console() -> Self {
        Self { timestamps: false }
    }

    /// Format used in the log file
    pub fn file() -> Self {
        Self { timestamps: true }
    }
}

fn level_label(level: &Level) -> &'static str {
    match *level {
        Level::ERROR => "ERROR",
        Level::WARN => "WARNING",
        Level::INFO => "INFO",
        Level::DEBUG => "DEBUG",
        Level::TRACE => "TRACE",
    }
}

impl<S, N> FormatEvent<S, N> for DashFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        if self.timestamps {
            write!(
                writer,
                "{} - ",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S,%3f")
            )?;
        }
        write!(writer, "{} - ", level_label(event.metadata().level()))?;
        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

fn filter(level: LogLevel) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(level.as_directive()))
}

/// Build a subscriber logging to stderr and appending to `log_file`.
///
/// The caller decides how long it is installed, e.g. with
/// [`tracing::subscriber::with_default`].
pub fn subscriber(level: LogLevel, log_file: &Path) -> Result<impl Subscriber + Send + Sync> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)
        .with_context(|| format!("Failed to open log file: {}", log_file.display()))?;

    let console_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .event_format(DashFormat::console());

    let file_layer = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .event_format(DashFormat::file());

    Ok(tracing_subscriber::registry()
        .with(filter(level))
        .with(console_layer)
        .with(file_layer))
}
