//! Tests for the print-file backend: counting, summary, write/count atomicity.

use prtlog::{EclipsePrtLog, LogBackend, Severity};
use std::fs;
use std::io::{self, Write};
use tempfile::TempDir;

/// Accepts the first `remaining` writes, then fails.
struct FailAfter {
    remaining: usize,
    written: Vec<u8>,
}

impl Write for FailAfter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.remaining == 0 {
            return Err(io::Error::other("disk full"));
        }
        self.remaining -= 1;
        self.written.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

const EMPTY_SUMMARY: &str = "\nError summary:\n\
Warnings          0\n\
Info              0\n\
Errors            0\n\
Bugs              0\n\
Debug             0\n\
Problems          0\n";

#[test]
fn writes_and_counts() {
    let mut out = Vec::new();
    let mut log = EclipsePrtLog::borrowed(&mut out, Severity::ALL, false);
    log.add_message(Severity::WARNING, "w1").unwrap();
    log.add_message(Severity::WARNING, "w2").unwrap();
    log.add_message(Severity::ERROR, "e1").unwrap();

    assert_eq!(log.num_messages(Severity::WARNING), 2);
    assert_eq!(log.num_messages(Severity::ERROR), 1);
    assert_eq!(log.num_messages(Severity::BUG), 0);
    log.close().unwrap();

    assert_eq!(String::from_utf8(out).unwrap(), "w1\nw2\ne1\n");
}

#[test]
fn summary_written_once_with_zero_messages() {
    let mut out = Vec::new();
    let log = EclipsePrtLog::borrowed(&mut out, Severity::ALL, true);
    log.close().unwrap();

    let content = String::from_utf8(out).unwrap();
    assert_eq!(content, EMPTY_SUMMARY);
    assert_eq!(content.matches("Error summary:").count(), 1);
}

#[test]
fn summary_is_last_content_of_file() {
    let tmp_dir = TempDir::new().unwrap();
    let path = tmp_dir.path().join("CASE.PRT");

    let mut log = EclipsePrtLog::open(&path, Severity::ALL, false, true).unwrap();
    log.add_message(Severity::WARNING, "Keyword ignored").unwrap();
    log.add_message(Severity::PROBLEM, "Newton failed").unwrap();
    log.add_message(Severity::PROBLEM, "Timestep chopped").unwrap();
    log.close().unwrap();

    let content = fs::read_to_string(&path).unwrap();
    let expected = "Keyword ignored\nNewton failed\nTimestep chopped\n\
\nError summary:\n\
Warnings          1\n\
Info              0\n\
Errors            0\n\
Bugs              0\n\
Debug             0\n\
Problems          2\n";
    assert_eq!(content, expected);
}

#[test]
fn drop_writes_summary_to_file() {
    let tmp_dir = TempDir::new().unwrap();
    let path = tmp_dir.path().join("CASE.PRT");

    drop(EclipsePrtLog::open(&path, Severity::ALL, false, true).unwrap());

    assert_eq!(fs::read_to_string(&path).unwrap(), EMPTY_SUMMARY);
}

#[test]
fn borrowed_stream_gets_summary_and_stays_open() {
    let mut out = Vec::new();
    {
        let mut log = EclipsePrtLog::borrowed(&mut out, Severity::ALL, true);
        log.add_message(Severity::INFO, "step 1").unwrap();
    }
    writeln!(out, "after").unwrap();

    let content = String::from_utf8(out).unwrap();
    assert!(content.starts_with("step 1\n\nError summary:\n"));
    assert!(content.contains("Info              1\n"));
    assert!(content.ends_with("Problems          0\nafter\n"));
}

#[test]
fn no_summary_when_disabled() {
    let mut out = Vec::new();
    let mut log = EclipsePrtLog::borrowed(&mut out, Severity::ALL, false);
    assert!(!log.print_summary());
    log.add_message(Severity::BUG, "oops").unwrap();
    log.close().unwrap();

    assert_eq!(out, b"oops\n");
}

#[test]
fn summary_bypasses_mask() {
    let mut out = Vec::new();
    let log = EclipsePrtLog::borrowed(&mut out, Severity::ERROR, true);
    log.close().unwrap();

    assert!(String::from_utf8(out).unwrap().contains("Error summary:"));
}

#[test]
fn counts_equal_lines_written() {
    let mut out = Vec::new();
    let mut log = EclipsePrtLog::borrowed(&mut out, Severity::WARNING | Severity::ERROR, false);
    let flags = [
        Severity::WARNING,
        Severity::INFO,
        Severity::ERROR,
        Severity::WARNING | Severity::BUG,
        Severity::WARNING | Severity::ERROR,
        Severity::ERROR,
    ];
    for flag in flags {
        log.add_message(flag, "m").unwrap();
    }
    let counted = log.counts().map(|c| c.total()).unwrap();
    log.close().unwrap();

    assert_eq!(counted, 4);
    assert_eq!(String::from_utf8(out).unwrap().lines().count(), counted);
}

#[test]
fn failed_write_is_not_counted() {
    let mut sink = FailAfter {
        remaining: 1,
        written: Vec::new(),
    };
    {
        let mut log = EclipsePrtLog::borrowed(&mut sink, Severity::ALL, false);
        log.add_message(Severity::ERROR, "first").unwrap();
        assert!(log.add_message(Severity::ERROR, "second").is_err());
        assert_eq!(log.num_messages(Severity::ERROR), 1);
    }
    assert_eq!(sink.written, b"first\n");
}

#[test]
fn close_reports_summary_failure() {
    let mut sink = FailAfter {
        remaining: 0,
        written: Vec::new(),
    };
    let log = EclipsePrtLog::borrowed(&mut sink, Severity::ALL, true);
    assert!(log.close().is_err());
}

#[cfg(target_os = "linux")]
#[test]
fn full_print_file_fails_without_counting() {
    let mut log = EclipsePrtLog::open("/dev/full", Severity::ALL, false, true).unwrap();
    assert!(log.add_message(Severity::WARNING, "lost").is_err());
    assert_eq!(log.num_messages(Severity::WARNING), 0);
    assert!(log.close().is_err());
}

#[cfg(target_os = "linux")]
#[test]
fn failed_summary_on_drop_reaches_stderr_channel() {
    let log = EclipsePrtLog::open("/dev/full", Severity::ALL, false, true).unwrap();
    drop(log);
    assert!(prtlog::internal::is_initialized());
}
