#![cfg(feature = "std")]

use log::LevelFilter;
use seabattle::{init_logging, log_level};

#[test]
fn test_log_level_defaults_to_warn() {
    assert_eq!(log_level(None), LevelFilter::Warn);
    assert_eq!(log_level(Some("")), LevelFilter::Warn);
    assert_eq!(log_level(Some("loud")), LevelFilter::Warn);
}

#[test]
fn test_log_level_parses_names() {
    assert_eq!(log_level(Some("debug")), LevelFilter::Debug);
    assert_eq!(log_level(Some(" TRACE ")), LevelFilter::Trace);
    assert_eq!(log_level(Some("off")), LevelFilter::Off);
}

#[test]
fn test_init_logging_twice_is_harmless() {
    init_logging();
    init_logging();
    log::warn!("logger installed");
}
