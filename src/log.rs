// src/log.rs
//
// Logging front-end. The short macros (`logf!`, `logd!`, `logw!`, `loge!`)
// forward to `tracing`; `init_file` / `init_stderr` install the subscriber.
// Lines are stamped with time elapsed since start, like the old debug.log.

use std::fs::{self, OpenOptions};
use std::io;
use std::path::Path;
use std::sync::{Mutex, OnceLock};
use std::time::Instant;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::{format::Writer, time::FormatTime};

#[doc(hidden)]
pub use tracing as __tracing;

static START: OnceLock<Instant> = OnceLock::new();
static INSTALLED: OnceLock<()> = OnceLock::new();

fn start() -> Instant {
    *START.get_or_init(Instant::now)
}

fn fmt_elapsed(ms: u128) -> String {
    let total_ms = ms as u64;
    let h = total_ms / 3_600_000;
    let m = (total_ms % 3_600_000) / 60_000;
    let s = (total_ms % 60_000) / 1_000;
    let ms = total_ms % 1_000;
    format!("{h:02}:{m:02}:{s:02}.{ms:03}")
}

struct Elapsed;

impl FormatTime for Elapsed {
    fn format_time(&self, w: &mut Writer<'_>) -> std::fmt::Result {
        write!(w, "[{}]", fmt_elapsed(start().elapsed().as_millis()))
    }
}

fn filter(default: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

/// Append log lines to `path` (GUI). Creates parent dirs.
/// Only the first successful init wins; later calls are no-ops.
pub fn init_file(path: &Path) -> io::Result<()> {
    if INSTALLED.get().is_some() {
        return Ok(());
    }
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    start();

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter("debug"))
        .with_timer(Elapsed)
        .with_ansi(false)
        .with_target(false)
        .with_writer(Mutex::new(file))
        .try_init();
    let _ = INSTALLED.set(());
    Ok(())
}

/// Log to stderr (CLI). Warnings only unless `verbose`.
pub fn init_stderr(verbose: bool) {
    if INSTALLED.get().is_some() {
        return;
    }
    start();

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter(if verbose { "debug" } else { "warn" }))
        .with_timer(Elapsed)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init();
    let _ = INSTALLED.set(());
}

/// Info-level logging
#[macro_export]
macro_rules! logf {
    ($($arg:tt)*) => {
        $crate::log::__tracing::info!($($arg)*)
    };
}

/// Debug-level logging
#[macro_export]
macro_rules! logd {
    ($($arg:tt)*) => {
        $crate::log::__tracing::debug!($($arg)*)
    };
}

/// Warn-level logging
#[macro_export]
macro_rules! logw {
    ($($arg:tt)*) => {
        $crate::log::__tracing::warn!($($arg)*)
    };
}

/// Error-level logging
#[macro_export]
macro_rules! loge {
    ($($arg:tt)*) => {
        $crate::log::__tracing::error!($($arg)*)
    };
}
