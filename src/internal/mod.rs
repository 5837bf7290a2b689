//! prtlog's own diagnostic channel: a `StreamLog` on stderr, masked by config.
//!
//! Uses `OnceLock` so the channel is initialized exactly once, even if several
//! entry points race to call `init`. Nothing here may be called while the
//! channel's lock is held; backends only report through it from paths outside
//! their `record` step.

use crate::backend::{Destination, LogBackend, StreamLog};
use crate::config::Config;
use crate::fmt::SimpleMessageFormatter;
use crate::severity::Severity;
use std::io;
use std::sync::{Arc, Mutex, OnceLock};

static INTERNAL_LOG: OnceLock<Mutex<StreamLog<'static>>> = OnceLock::new();

/// Mask used when no config is supplied.
pub const DEFAULT_MASK: Severity = Severity::from_bits(
    Severity::WARNING.bits() | Severity::ERROR.bits() | Severity::BUG.bits(),
);

/// Initializes with [`DEFAULT_MASK`]. Later calls are no-ops.
pub fn init() {
    init_with_mask(DEFAULT_MASK);
}

/// Initializes with the config's `general.internal_mask`.
pub fn init_with_config(config: &Config) {
    init_with_mask(config.general.internal_mask);
    debug(
        "INTERNAL",
        &format!("Internal mask: {}", config.general.internal_mask),
    );
}

fn init_with_mask(mask: Severity) {
    INTERNAL_LOG.get_or_init(|| {
        let mut log = StreamLog::new(Destination::owned(io::stderr()), mask);
        log.set_formatter(Arc::new(SimpleMessageFormatter::new()));
        Mutex::new(log)
    });
}

#[must_use]
pub fn is_initialized() -> bool {
    INTERNAL_LOG.get().is_some()
}

/// Pre-init calls vanish rather than fail, so early startup code can report
/// freely. [`lost`] is the exception.
fn log(severity: Severity, scope: &str, msg: &str) {
    if let Some(lock) = INTERNAL_LOG.get()
        && let Ok(mut log) = lock.lock()
    {
        // stderr failing leaves nowhere to report to
        let _ = log.add_message(severity, &format!("prtlog {scope}: {msg}"));
    }
}

pub fn debug(scope: &str, msg: &str) {
    log(Severity::DEBUG, scope, msg);
}

pub fn info(scope: &str, msg: &str) {
    log(Severity::INFO, scope, msg);
}

pub fn warning(scope: &str, msg: &str) {
    log(Severity::WARNING, scope, msg);
}

pub fn error(scope: &str, msg: &str) {
    log(Severity::ERROR, scope, msg);
}

/// For failures with no caller left to return them to, such as a flush in
/// `Drop`. Initializes the channel with [`DEFAULT_MASK`] first if needed, so
/// the report reaches stderr even when nothing called [`init`].
pub fn lost(scope: &str, msg: &str) {
    init();
    error(scope, msg);
}
