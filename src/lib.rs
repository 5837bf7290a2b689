//! `prtlog` - severity-masked log backends for batch simulation runs.
//!
//! Messages carry a [`Severity`] bit flag. Each backend owns a mask and admits
//! a message only when every bit of its flag is in the mask; admitted messages
//! pass an optional shared [`MessageLimiter`] and [`MessageFormatter`] before
//! the backend records them:
//! - [`CounterLog`] counts messages per flag
//! - [`StreamLog`] writes one line per message to a file or writer
//! - [`EclipsePrtLog`] writes, counts, and closes with an error summary
//!
//! A [`Logger`] fans each message out to any number of named backends.
//!
//! # Example
//!
//! ```
//! use prtlog::{CounterLog, LogBackend, Severity, StreamLog};
//!
//! let mut counter = CounterLog::with_mask(Severity::WARNING | Severity::ERROR);
//! counter.add_message(Severity::WARNING, "Keyword ignored").unwrap();
//! counter.add_message(Severity::INFO, "Not counted").unwrap();
//! assert_eq!(counter.num_messages(Severity::WARNING), 1);
//! assert_eq!(counter.num_messages(Severity::INFO), 0);
//!
//! let mut out = Vec::new();
//! let mut stream = StreamLog::borrowed(&mut out, Severity::ALL);
//! stream.add_message(Severity::NOTE, "Reading deck").unwrap();
//! stream.close().unwrap();
//! assert_eq!(out, b"Reading deck\n");
//! ```

pub mod backend;
pub mod config;
pub mod error;
pub mod fmt;
pub mod internal;
pub mod limit;
pub mod logger;
pub mod severity;

pub use backend::{
    Admission, CounterLog, Destination, EclipsePrtLog, LogBackend, MessageCounts, Pipeline,
    StreamLog,
};
pub use config::Config;
pub use error::Error;
pub use fmt::{Color, FnFormatter, MessageFormatter, SimpleMessageFormatter};
pub use limit::{LimitResponse, MessageLimiter, TagLimiter};
pub use logger::{Logger, LoggerBuilder};
pub use severity::{ParseSeverityError, Severity};
