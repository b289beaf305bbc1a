#![cfg(feature = "std")]

//! Stderr logger for the binaries. Stdout is left to the board display.

use std::env;

use log::{LevelFilter, Metadata, Record};

/// Environment variable holding the log level (`off`, `error` .. `trace`).
pub const LOG_ENV: &str = "SEABATTLE_LOG";

struct StderrLogger;

impl log::Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        // module path without the crate prefix
        let target = record
            .target()
            .strip_prefix("seabattle::")
            .unwrap_or(record.target());
        eprintln!("{:<5} [{}] {}", record.level(), target, record.args());
    }

    fn flush(&self) {}
}

static LOGGER: StderrLogger = StderrLogger;

/// Level for a raw `SEABATTLE_LOG` value. Unset or unparsable means `warn`.
pub fn log_level(value: Option<&str>) -> LevelFilter {
    value
        .and_then(|lvl| lvl.trim().parse().ok())
        .unwrap_or(LevelFilter::Warn)
}

/// Install the stderr logger at the level named by `SEABATTLE_LOG`.
/// Calling it again keeps the first logger.
pub fn init_logging() {
    let level = log_level(env::var(LOG_ENV).ok().as_deref());
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level);
    }
}
