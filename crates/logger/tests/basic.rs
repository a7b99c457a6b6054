//! Integration tests for level handling in the `logger` crate

use logger::{debug, error, info, warn};
use logger::{level, set_level, set_level_from_str, Level};

#[test]
fn level_parse_accepts_valid_and_applies_it() {
    assert!(set_level_from_str("error"));
    assert_eq!(level(), Level::Error);
    assert!(set_level_from_str("Warning"));
    assert_eq!(level(), Level::Warn);
    assert!(set_level_from_str("debug"));
    assert_eq!(level(), Level::Debug);
}

#[test]
fn level_parse_rejects_invalid() {
    assert!(!set_level_from_str("invalid"));
    assert!(!set_level_from_str(""));
}

#[test]
fn logs_do_not_panic() {
    set_level(Level::Debug);
    info!("student {} loaded", 7);
    warn!("snapshot field '{}' dropped", "peso");
    error!("fetch failed: {}", "connection refused");
    debug!("debug integration");
}
