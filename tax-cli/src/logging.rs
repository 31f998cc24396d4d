//! Tracing setup for the command line.
//!
//! Logs go to stderr so the report on stdout stays clean, and optionally
//! to an append-mode file.

use std::fs::File;
use std::io::{self, IsTerminal};
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};
use chrono::Local;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::fmt::FmtContext;
use tracing_subscriber::fmt::format::{FormatEvent, FormatFields, Writer};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "warn";

/// Local-time event format: timestamp, level, crate name, fields.
struct LocalFmt;

impl<S, N> FormatEvent<S, N> for LocalFmt
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let meta = event.metadata();
        let ansi = writer.has_ansi_escapes();

        if ansi {
            write!(writer, "\x1b[2m")?
        }
        write!(writer, "{} ", Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z"))?;
        if ansi {
            write!(writer, "\x1b[0m")?
        }

        let (pre, post) = if ansi {
            match *meta.level() {
                Level::ERROR => ("\x1b[1;31m", "\x1b[0m"),
                Level::WARN => ("\x1b[1;33m", "\x1b[0m"),
                Level::INFO => ("\x1b[1;32m", "\x1b[0m"),
                Level::DEBUG => ("\x1b[1;34m", "\x1b[0m"),
                Level::TRACE => ("\x1b[1;35m", "\x1b[0m"),
            }
        } else {
            ("", "")
        };
        write!(writer, "{}{:>5}{} ", pre, meta.level(), post)?;

        if let Some(target) = meta.target().split("::").next() {
            if ansi {
                write!(writer, "\x1b[36m{target}\x1b[0m ")?;
            } else {
                write!(writer, "{target} ")?;
            }
        }

        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

/// Chooses the filter: explicit `level`, else `RUST_LOG`, else `warn`.
fn make_filter(level: Option<&str>) -> Result<EnvFilter> {
    match level {
        Some(level) => {
            EnvFilter::try_new(level).with_context(|| format!("invalid log level '{level}'"))
        }
        None => Ok(EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))),
    }
}

/// Installs the global subscriber. Call once, before any work.
///
/// - stderr: colored when attached to a terminal, plain when piped.
/// - `log_file`: appended to without color, if given.
pub fn init_logging(
    level: Option<&str>,
    log_file: Option<&Path>,
) -> Result<()> {
    let filter = make_filter(level)?;

    let file_layer = match log_file {
        Some(path) => {
            let file = File::options()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("cannot open log file '{}'", path.display()))?;
            Some(
                tracing_subscriber::fmt::layer()
                    .event_format(LocalFmt)
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
        }
        None => None,
    };

    let stderr_layer = tracing_subscriber::fmt::layer()
        .event_format(LocalFmt)
        .with_ansi(io::stderr().is_terminal())
        .with_writer(io::stderr);

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .context("logging already initialized")
}
