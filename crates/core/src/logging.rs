//! Structured logging for hosts that embed the app bar binding.
//!
//! The crate itself only emits `tracing` events. This module installs a
//! subscriber for them, driven by [`LoggingSettings`]:
//!
//! - Without a `directory`, human readable logs go to standard error
//! - With a `directory`, JSON logs are written to `appbar-<run_id>.json`
//!   through a non-blocking appender, and only the `max_files` most recent run
//!   logs are kept
//!
//! The run ID is a UUID v7, so run log file names sort chronologically.
//!
//! The level can be overridden with `RUST_LOG`:
//!
//! ```bash
//! RUST_LOG=appbar_core::view=trace,info ./host
//! ```
//!
//! # Example
//!
//! ```no_run
//! use appbar_core::logging::{init_logging, shutdown_logging};
//! use appbar_core::settings::LoggingSettings;
//!
//! let settings = LoggingSettings {
//!     directory: Some("logs".into()),
//!     ..LoggingSettings::default()
//! };
//!
//! init_logging(&settings)?;
//! tracing::info!("host started");
//! shutdown_logging();
//! # Ok::<(), anyhow::Error>(())
//! ```

use crate::settings::LoggingSettings;
use anyhow::{Context, Error};
use std::fs;
use std::fs::DirEntry;
use std::path::Path;
use std::sync::mpsc;
use std::sync::{Mutex, OnceLock};
use std::thread;
use std::time::Duration;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

const LOG_FILE_PREFIX: &str = "appbar-";
const LOG_FILE_SUFFIX: &str = "json";

static LOG_GUARD: OnceLock<Mutex<Option<WorkerGuard>>> = OnceLock::new();
static RUN_ID: OnceLock<String> = OnceLock::new();

/// Returns the ID of this process run, generated on first access.
///
/// ```
/// use appbar_core::logging::get_run_id;
///
/// assert_eq!(get_run_id(), get_run_id());
/// ```
pub fn get_run_id() -> &'static str {
    RUN_ID.get_or_init(|| Uuid::now_v7().to_string()).as_str()
}

/// Makes room for a new run log: deletes the oldest ones so that, once the
/// new file exists, at most `max_files` remain.
///
/// A `max_files` of 0 keeps everything.
fn cleanup_run_logs(log_dir: &Path, max_files: usize) -> Result<(), Error> {
    let Some(keep) = max_files.checked_sub(1) else {
        return Ok(());
    };

    let mut entries = collect_run_log_entries(log_dir)?;
    if entries.len() <= keep {
        return Ok(());
    }

    entries.sort_by_key(|entry| entry.file_name());
    let stale = entries.len() - keep;
    for entry in entries.into_iter().take(stale) {
        fs::remove_file(entry.path())
            .with_context(|| format!("can't remove old log file {}", entry.path().display()))?;
    }

    Ok(())
}

fn collect_run_log_entries(log_dir: &Path) -> Result<Vec<DirEntry>, Error> {
    fs::read_dir(log_dir)
        .with_context(|| format!("can't read log directory {}", log_dir.display()))?
        .filter_map(|entry| match entry {
            Ok(entry) if !is_run_log_entry(&entry) => None,
            entry => Some(entry.context("can't read log directory entry")),
        })
        .collect()
}

/// Run logs are named `appbar-<run_id>.json`.
fn is_run_log_entry(entry: &DirEntry) -> bool {
    let file_name = entry.file_name();
    let file_name = file_name.to_string_lossy();

    file_name.starts_with(LOG_FILE_PREFIX) && file_name.ends_with(LOG_FILE_SUFFIX)
}

/// Installs the global tracing subscriber.
///
/// Does nothing when logging is disabled. Fails if a global subscriber is
/// already installed, if the level can't be parsed, or if the log directory
/// can't be prepared.
pub fn init_logging(settings: &LoggingSettings) -> Result<(), Error> {
    if !settings.enabled {
        return Ok(());
    }

    let filter = build_filter(settings)?;

    let Some(directory) = &settings.directory else {
        let fmt_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

        return tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .try_init()
            .context("can't initialize tracing subscriber");
    };

    let current_working_dir =
        std::env::current_dir().context("can't get current working directory")?;
    let log_dir = current_working_dir.join(directory);
    fs::create_dir_all(&log_dir)
        .with_context(|| format!("can't create log directory {}", log_dir.display()))?;

    cleanup_run_logs(&log_dir, settings.max_files)?;

    let appender = tracing_appender::rolling::Builder::new()
        .rotation(tracing_appender::rolling::Rotation::NEVER)
        .filename_prefix(format!("{}{}", LOG_FILE_PREFIX, get_run_id()))
        .filename_suffix(LOG_FILE_SUFFIX)
        .build(&log_dir)
        .context("can't initialize rolling log file appender")?;

    let (non_blocking, guard) = tracing_appender::non_blocking(appender);
    let _ = LOG_GUARD.set(Mutex::new(Some(guard)));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .json()
        .with_ansi(false)
        .with_writer(non_blocking)
        .with_current_span(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()
        .context("can't initialize tracing subscriber")?;

    eprintln!("Run started with ID: {}", get_run_id());

    Ok(())
}

/// Flushes buffered log lines, waiting at most five seconds.
pub fn shutdown_logging() {
    if let Some(mutex) = LOG_GUARD.get() {
        if let Ok(mut guard_opt) = mutex.lock() {
            if let Some(guard) = guard_opt.take() {
                let (tx, rx) = mpsc::channel();

                thread::spawn(move || {
                    drop(guard);
                    let _ = tx.send(());
                });

                let _ = rx.recv_timeout(Duration::from_secs(5));
            }
        }
    }
}

/// `RUST_LOG` wins over the configured level; an empty level means "info".
fn build_filter(settings: &LoggingSettings) -> Result<EnvFilter, Error> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }

    let level = settings.level.trim();
    let level = if level.is_empty() { "info" } else { level };

    EnvFilter::builder()
        .parse(level)
        .context("invalid logging level")
}
