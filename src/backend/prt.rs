//! Print-file backend: writes like [`StreamLog`](super::StreamLog), counts
//! like [`CounterLog`](super::CounterLog), and closes with an error summary.

use super::{Destination, LogBackend, MessageCounts, Pipeline};
use crate::error::Error;
use crate::internal;
use crate::severity::Severity;
use std::io::Write;
use std::path::Path;

/// Row order and labels of the closing summary.
const SUMMARY_ROWS: [(&str, Severity); 6] = [
    ("Warnings", Severity::WARNING),
    ("Info", Severity::INFO),
    ("Errors", Severity::ERROR),
    ("Bugs", Severity::BUG),
    ("Debug", Severity::DEBUG),
    ("Problems", Severity::PROBLEM),
];

/// Writes and counts every accepted message.
///
/// A message is counted only after its line was written, so the counters
/// always equal the number of lines this backend wrote. With
/// `print_summary`, closing (or dropping) appends one summary block as the
/// final content, even when no message was ever recorded.
///
/// File lines are unbuffered, so a failed write is returned by
/// `add_message` and leaves the counters untouched. When only `Drop` is left
/// to write the summary, a failure there is reported on stderr.
#[derive(Debug)]
pub struct EclipsePrtLog<'a> {
    pipeline: Pipeline,
    destination: Destination<'a>,
    counts: MessageCounts,
    print_summary: bool,
    closed: bool,
}

impl<'a> EclipsePrtLog<'a> {
    #[must_use]
    pub fn new(destination: Destination<'a>, mask: Severity, print_summary: bool) -> Self {
        Self {
            pipeline: Pipeline::new(mask),
            destination,
            counts: MessageCounts::new(),
            print_summary,
            closed: false,
        }
    }

    /// Opens the print file and becomes its owner. Truncates unless `append`.
    ///
    /// # Errors
    /// [`Error::Open`] if the file cannot be opened for writing.
    pub fn open(
        path: impl AsRef<Path>,
        mask: Severity,
        append: bool,
        print_summary: bool,
    ) -> Result<Self, Error> {
        Ok(Self::new(
            Destination::file(path, append)?,
            mask,
            print_summary,
        ))
    }

    /// Writes to a caller-owned writer. The summary still goes to that writer.
    #[must_use]
    pub fn borrowed<W: Write + Send>(
        writer: &'a mut W,
        mask: Severity,
        print_summary: bool,
    ) -> Self {
        Self::new(Destination::borrowed(writer), mask, print_summary)
    }

    #[must_use]
    pub fn num_messages(&self, severity: Severity) -> usize {
        self.counts.get(severity)
    }

    #[must_use]
    pub const fn print_summary(&self) -> bool {
        self.print_summary
    }

    #[must_use]
    pub const fn destination(&self) -> &Destination<'a> {
        &self.destination
    }

    /// The closing block, without its trailing newline.
    #[must_use]
    pub fn summary(&self) -> String {
        let mut summary = String::from("\nError summary:");
        for (label, severity) in SUMMARY_ROWS {
            summary.push('\n');
            summary.push_str(&format!("{label:<18}{}", self.counts.get(severity)));
        }
        summary
    }

    /// Writes the summary if enabled, then flushes.
    ///
    /// # Errors
    /// I/O errors from writing the summary or the final flush.
    pub fn close(mut self) -> Result<(), Error> {
        self.finish()
    }

    fn finish(&mut self) -> Result<(), Error> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        if self.print_summary {
            let summary = self.summary();
            self.destination.write_line(&summary)?;
        }
        self.destination.flush()
    }
}

impl LogBackend for EclipsePrtLog<'_> {
    fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    fn pipeline_mut(&mut self) -> &mut Pipeline {
        &mut self.pipeline
    }

    fn record(&mut self, severity: Severity, text: &str) -> Result<(), Error> {
        self.destination.write_line(text)?;
        self.counts.increment(severity);
        Ok(())
    }

    fn counts(&self) -> Option<&MessageCounts> {
        Some(&self.counts)
    }

    fn flush(&mut self) -> Result<(), Error> {
        self.destination.flush()
    }

    fn close(self: Box<Self>) -> Result<(), Error> {
        EclipsePrtLog::close(*self)
    }
}

impl Drop for EclipsePrtLog<'_> {
    fn drop(&mut self) {
        if let Err(e) = self.finish() {
            internal::lost("PRT", &format!("Closing summary failed: {e}"));
        }
    }
}
