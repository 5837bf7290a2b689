//! Tests for the multi-backend logger and its builder.

use prtlog::config::StdTarget;
use prtlog::{
    CounterLog, Destination, Error, LogBackend, Logger, Severity, SimpleMessageFormatter,
    StreamLog, TagLimiter,
};
use std::collections::HashMap;
use std::fs;
use tempfile::TempDir;

#[test]
fn builder_default() {
    let logger = Logger::builder().build().unwrap();
    assert_eq!(logger.backend_count(), 0);
    assert!(!logger.enabled(Severity::ERROR));
}

#[test]
fn fans_out_to_every_backend() {
    let mut out = Vec::new();
    {
        let mut logger = Logger::builder()
            .counter("count")
            .done()
            .stream("errors")
            .mask(Severity::ERROR | Severity::BUG)
            .destination(Destination::borrowed(&mut out))
            .done()
            .build()
            .unwrap();

        logger.warning("w").unwrap();
        logger.error("e").unwrap();
        logger.bug("b").unwrap();

        assert_eq!(logger.num_messages("count", Severity::WARNING), Some(1));
        assert_eq!(logger.num_messages("count", Severity::ERROR), Some(1));
        assert_eq!(logger.num_messages("errors", Severity::ERROR), None);
        logger.close().unwrap();
    }
    assert_eq!(String::from_utf8(out).unwrap(), "e\nb\n");
}

#[test]
fn backend_names_keep_registration_order() {
    let logger = Logger::builder()
        .counter("zeta")
        .done()
        .counter("alpha")
        .done()
        .build()
        .unwrap();
    let names: Vec<&str> = logger.backend_names().collect();
    assert_eq!(names, vec!["zeta", "alpha"]);
}

#[test]
fn add_backend_replaces_same_name() {
    let mut logger = Logger::new();
    assert!(logger.add_backend("c", CounterLog::new()).is_none());
    logger.add_message(Severity::INFO, "x").unwrap();

    let replaced = logger
        .add_backend("c", CounterLog::with_mask(Severity::ERROR))
        .unwrap();
    assert_eq!(replaced.counts().map(|c| c.get(Severity::INFO)), Some(1));
    assert_eq!(logger.backend_count(), 1);
    assert_eq!(logger.backend("c").map(|b| b.mask()), Some(Severity::ERROR));
}

#[test]
fn remove_backend() {
    let mut logger = Logger::new();
    logger.add_backend("c", CounterLog::new());
    assert!(logger.has_backend("c"));

    let removed = logger.remove_backend("c");
    assert!(removed.is_some());
    assert!(!logger.has_backend("c"));
    assert!(logger.remove_backend("c").is_none());
}

#[test]
fn enabled_checks_any_mask() {
    let logger = Logger::builder()
        .counter("a")
        .mask(Severity::WARNING)
        .done()
        .counter("b")
        .mask(Severity::ERROR)
        .done()
        .build()
        .unwrap();

    assert!(logger.enabled(Severity::WARNING));
    assert!(logger.enabled(Severity::ERROR));
    assert!(!logger.enabled(Severity::WARNING | Severity::ERROR));
    assert!(!logger.enabled(Severity::DEBUG));
    assert!(!logger.enabled(Severity::NONE));
}

#[test]
fn builder_formatter_applies_to_all_backends() {
    let mut first = Vec::new();
    let mut second = Vec::new();
    {
        let logger = Logger::builder()
            .formatter(SimpleMessageFormatter::new())
            .stream("one")
            .destination(Destination::borrowed(&mut first))
            .done()
            .stream("two")
            .destination(Destination::borrowed(&mut second))
            .done()
            .build();
        let mut logger = logger.unwrap();
        logger.note("hello").unwrap();
    }
    assert_eq!(first, b"Note: hello\n");
    assert_eq!(second, b"Note: hello\n");
}

#[test]
fn builder_limiter_is_per_backend() {
    let mut terminal = Vec::new();
    let mut prt = Vec::new();
    {
        let mut logger = Logger::builder()
            .limiter(|| TagLimiter::new(Some(1), HashMap::new()))
            .stream("terminal")
            .destination(Destination::borrowed(&mut terminal))
            .done()
            .prt("prt")
            .destination(Destination::borrowed(&mut prt))
            .print_summary(false)
            .done()
            .build()
            .unwrap();

        for _ in 0..3 {
            logger
                .add_tagged_message(Severity::WARNING, "COMPDAT", "first occurrence")
                .unwrap();
        }
        assert_eq!(logger.num_messages("prt", Severity::WARNING), Some(2));
        logger.close().unwrap();
    }

    let expected = "first occurrence\nMessage limit reached for message tag: COMPDAT\n";
    assert_eq!(String::from_utf8(terminal).unwrap(), expected);
    assert_eq!(String::from_utf8(prt).unwrap(), expected);
}

#[test]
fn set_limiter_builds_one_limiter_per_backend() {
    let mut logger = Logger::builder()
        .counter("a")
        .done()
        .counter("b")
        .done()
        .build()
        .unwrap();
    logger.set_limiter(|| TagLimiter::new(Some(2), HashMap::new()));

    for _ in 0..5 {
        logger
            .add_tagged_message(Severity::ERROR, "WELSPECS", "x")
            .unwrap();
    }

    // two messages plus one limit notice each
    assert_eq!(logger.num_messages("a", Severity::ERROR), Some(3));
    assert_eq!(logger.num_messages("b", Severity::ERROR), Some(3));
}

#[test]
fn prt_backend_via_builder_writes_summary_on_close() {
    let tmp_dir = TempDir::new().unwrap();
    let path = tmp_dir.path().join("CASE.PRT");

    let mut logger = Logger::builder()
        .prt("prt")
        .path(&path)
        .done()
        .build()
        .unwrap();
    logger.problem("chopped").unwrap();
    assert_eq!(logger.num_messages("prt", Severity::PROBLEM), Some(1));
    logger.close().unwrap();

    let content = fs::read_to_string(&path).unwrap();
    assert!(content.starts_with("chopped\n\nError summary:\n"));
    assert!(content.ends_with("Problems          1\n"));
}

#[test]
fn builder_stream_append() {
    let tmp_dir = TempDir::new().unwrap();
    let path = tmp_dir.path().join("run.log");
    fs::write(&path, "old\n").unwrap();

    let mut logger = Logger::builder()
        .stream("file")
        .path(&path)
        .append(true)
        .done()
        .build()
        .unwrap();
    logger.info("new").unwrap();
    logger.close().unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), "old\nnew\n");
}

#[test]
fn build_reports_open_failure() {
    let tmp_dir = TempDir::new().unwrap();
    let path = tmp_dir.path().join("no").join("such").join("dir.log");

    let result = Logger::builder()
        .stream("stderr")
        .std(StdTarget::Stderr)
        .done()
        .stream("file")
        .path(&path)
        .done()
        .build();

    assert!(matches!(result, Err(Error::Open { .. })));
}

#[test]
fn backend_mut_reaches_registered_backend() {
    let mut out = Vec::new();
    {
        let mut logger = Logger::new();
        logger.add_backend("s", StreamLog::borrowed(&mut out, Severity::ALL));
        let backend = logger.backend_mut("s").unwrap();
        backend.add_message(Severity::INFO, "direct").unwrap();
        logger.flush().unwrap();
    }
    assert_eq!(out, b"direct\n");
}
