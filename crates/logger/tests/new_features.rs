//! Tests for verbose and file-logging features.

use logger::{enable_verbose, error, info, verbose, warn};

#[cfg(feature = "verbose")]
#[test]
fn verbose_respects_runtime_flag() {
    verbose!("This should not appear");

    enable_verbose();
    assert!(logger::is_verbose_enabled());
    verbose!("This should appear: verbose test {}", 42);
}

#[cfg(feature = "file-logging")]
#[test]
fn file_logging_writes_stamped_lines() {
    use logger::{close_file_logging, init_file_logging, set_level, Level};
    use std::fs;

    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let log_path = dir.path().join("gymevo.log");

    set_level(Level::Info);
    assert!(init_file_logging(&log_path));

    info!("Report exported");
    warn!("Snapshot field dropped");
    error!("Could not load history");

    enable_verbose();
    verbose!("This verbose message should NOT be in the file");

    close_file_logging();

    let contents = fs::read_to_string(&log_path).expect("Failed to read log file");
    assert!(contents.contains("[INFO] Report exported"));
    assert!(contents.contains("[WARN] Snapshot field dropped"));
    assert!(contents.contains("[ERROR] Could not load history"));
    assert!(!contents.contains("verbose message"));

    // Every line starts with a "YYYY-MM-DD HH:MM:SS" stamp
    for line in contents.lines() {
        let stamp = line.get(..19).expect("line shorter than a timestamp");
        assert!(chrono_like(stamp), "unexpected stamp in {line:?}");
    }
}

#[cfg(feature = "file-logging")]
fn chrono_like(stamp: &str) -> bool {
    let bytes = stamp.as_bytes();
    bytes[4] == b'-' && bytes[7] == b'-' && bytes[10] == b' ' && bytes[13] == b':' && bytes[16] == b':'
}
