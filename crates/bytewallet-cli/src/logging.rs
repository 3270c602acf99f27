/*
[INPUT]:  Log level filter and log file settings
[OUTPUT]: Global tracing subscriber writing to stderr and a daily log file
[POS]:    Observability - process-wide logging setup
[UPDATE]: When changing log format, sinks or rotation
*/

use anyhow::{Context, Result, anyhow};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

use crate::config::LogConfig;

/// Install the global subscriber.
///
/// Files are named `<prefix>.<YYYY-MM-DD>.log` inside `log.dir`. Keep the
/// returned guard alive until exit or buffered lines are lost.
pub fn init_tracing(log_level: &str, log: &LogConfig) -> Result<WorkerGuard> {
    let filter = EnvFilter::try_new(log_level).context("invalid log level")?;

    let appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(&log.file_prefix)
        .filename_suffix("log")
        .build(&log.dir)
        .with_context(|| format!("create log directory {}", log.dir))?;
    let (file_writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(fmt::layer().with_ansi(false).with_writer(file_writer))
        .try_init()
        .map_err(|err| anyhow!(err))
        .context("initialize tracing subscriber")?;

    Ok(guard)
}
