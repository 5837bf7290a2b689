//! Log backends: destinations that decide whether and how to record a message.
//!
//! Every backend shares one admission pipeline (mask, limiter, formatter) and
//! differs only in [`LogBackend::record`], the single step a concrete backend
//! implements. Three backends ship with the crate:
//!
//! - [`CounterLog`] counts accepted messages per severity flag
//! - [`StreamLog`] writes them, one per line, to a file or a writer
//! - [`EclipsePrtLog`] does both and can close with a summary block

mod counter;
mod destination;
mod prt;
mod stream;

pub use counter::{CounterLog, MessageCounts};
pub use destination::Destination;
pub use prt::EclipsePrtLog;
pub use stream::StreamLog;

use crate::error::Error;
use crate::fmt::MessageFormatter;
use crate::limit::{LimitResponse, MessageLimiter};
use crate::severity::Severity;
use std::fmt;
use std::sync::Arc;

/// Result of running a message through mask and limiter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Admission {
    /// Filtered out by the mask or suppressed by the limiter.
    Rejected,
    /// Record the message itself.
    Accepted,
    /// The limiter just crossed a limit: record this notice instead of the message.
    LimitNotice(String),
}

/// Mask, formatter and limiter of one backend.
///
/// The mask is fixed at construction. Formatter and limiter are shared
/// strategy objects and may be swapped at any time; a swap affects only
/// messages added afterwards.
#[derive(Clone)]
pub struct Pipeline {
    mask: Severity,
    formatter: Option<Arc<dyn MessageFormatter>>,
    limiter: Option<Arc<dyn MessageLimiter>>,
}

impl fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline")
            .field("mask", &self.mask)
            .field("formatter", &self.formatter.is_some())
            .field("limiter", &self.limiter.is_some())
            .finish()
    }
}

impl Pipeline {
    /// Identity formatting, no limiting.
    #[must_use]
    pub const fn new(mask: Severity) -> Self {
        Self {
            mask,
            formatter: None,
            limiter: None,
        }
    }

    #[must_use]
    pub const fn mask(&self) -> Severity {
        self.mask
    }

    /// Mask test followed by at most one limiter query.
    ///
    /// A zero flag names no class and is never admitted. The limiter is only
    /// consulted for messages that passed the mask, so masked-out messages
    /// never advance its counters.
    #[must_use]
    pub fn admit(&self, severity: Severity, tag: &str) -> Admission {
        if severity.is_empty() || !severity.is_subset_of(self.mask) {
            return Admission::Rejected;
        }

        let Some(limiter) = &self.limiter else {
            return Admission::Accepted;
        };

        match limiter.handle(tag, severity) {
            LimitResponse::Print => Admission::Accepted,
            LimitResponse::JustOverTagLimit => Admission::LimitNotice(format!(
                "Message limit reached for message tag: {tag}"
            )),
            LimitResponse::JustOverCategoryLimit => Admission::LimitNotice(format!(
                "Message limit reached for message category: {severity}"
            )),
            LimitResponse::OverTagLimit | LimitResponse::OverCategoryLimit => Admission::Rejected,
        }
    }

    /// Applies the formatter, or passes `text` through unchanged when none is set.
    #[must_use]
    pub fn format(&self, severity: Severity, text: &str) -> String {
        self.formatter.as_ref().map_or_else(
            || text.to_string(),
            |formatter| formatter.format(severity, text),
        )
    }

    pub fn set_formatter(&mut self, formatter: Option<Arc<dyn MessageFormatter>>) {
        self.formatter = formatter;
    }

    pub fn set_limiter(&mut self, limiter: Option<Arc<dyn MessageLimiter>>) {
        self.limiter = limiter;
    }
}

/// A destination for log messages.
///
/// Implementors provide access to their [`Pipeline`] and the [`record`](Self::record)
/// step. The provided methods form the admission sequence
/// (mask, limiter, formatter, record) and are not meant to be overridden.
///
/// Not designed for concurrent use: one logical writer per backend. Wrap a
/// backend in a `Mutex` to share it between threads.
pub trait LogBackend: Send {
    fn pipeline(&self) -> &Pipeline;

    fn pipeline_mut(&mut self) -> &mut Pipeline;

    /// Records one accepted, already formatted message.
    ///
    /// # Errors
    /// I/O errors from the underlying sink. A failed write is not retried.
    fn record(&mut self, severity: Severity, text: &str) -> Result<(), Error>;

    /// Per-flag counts, for backends that keep them.
    fn counts(&self) -> Option<&MessageCounts> {
        None
    }

    /// Pushes buffered output to the sink.
    ///
    /// # Errors
    /// I/O errors from the underlying sink.
    fn flush(&mut self) -> Result<(), Error> {
        Ok(())
    }

    /// Ends the backend's life, surfacing errors that `Drop` could only report.
    ///
    /// # Errors
    /// I/O errors from flushing or writing a closing summary.
    fn close(self: Box<Self>) -> Result<(), Error> {
        Ok(())
    }

    fn mask(&self) -> Severity {
        self.pipeline().mask()
    }

    fn set_formatter(&mut self, formatter: Arc<dyn MessageFormatter>) {
        self.pipeline_mut().set_formatter(Some(formatter));
    }

    fn clear_formatter(&mut self) {
        self.pipeline_mut().set_formatter(None);
    }

    fn set_limiter(&mut self, limiter: Arc<dyn MessageLimiter>) {
        self.pipeline_mut().set_limiter(Some(limiter));
    }

    fn clear_limiter(&mut self) {
        self.pipeline_mut().set_limiter(None);
    }

    fn format_message(&self, severity: Severity, text: &str) -> String {
        self.pipeline().format(severity, text)
    }

    /// Same as [`add_tagged_message`](Self::add_tagged_message) with an empty tag.
    ///
    /// # Errors
    /// Write failures from [`record`](Self::record). Filtered messages are `Ok`.
    fn add_message(&mut self, severity: Severity, text: &str) -> Result<(), Error> {
        self.add_tagged_message(severity, "", text)
    }

    /// Runs the admission sequence and records the message if it survives.
    ///
    /// # Errors
    /// Write failures from [`record`](Self::record). Filtered messages are `Ok`.
    fn add_tagged_message(
        &mut self,
        severity: Severity,
        tag: &str,
        text: &str,
    ) -> Result<(), Error> {
        let formatted = match self.pipeline().admit(severity, tag) {
            Admission::Rejected => return Ok(()),
            Admission::Accepted => self.format_message(severity, text),
            Admission::LimitNotice(notice) => self.format_message(severity, &notice),
        };
        self.record(severity, &formatted)
    }
}
