//! Line-per-message writer over an owned file or a caller's writer.

use super::{Destination, LogBackend, Pipeline};
use crate::error::Error;
use crate::internal;
use crate::severity::Severity;
use std::io::Write;
use std::path::Path;

/// Writes each accepted message as one line.
///
/// A file line is written before `add_message` returns, so a failed write
/// is the caller's `Err`. A writer with its own buffer may fail only at
/// flush: call [`close`](Self::close) to observe that. Dropping without
/// `close` flushes too and reports a failure on stderr. Not `Clone`: the
/// backend is the single owner of its destination.
#[derive(Debug)]
pub struct StreamLog<'a> {
    pipeline: Pipeline,
    destination: Destination<'a>,
    closed: bool,
}

impl<'a> StreamLog<'a> {
    #[must_use]
    pub fn new(destination: Destination<'a>, mask: Severity) -> Self {
        Self {
            pipeline: Pipeline::new(mask),
            destination,
            closed: false,
        }
    }

    /// Opens `path` and becomes its owner. Truncates unless `append`.
    ///
    /// # Errors
    /// [`Error::Open`] if the file cannot be opened for writing.
    pub fn open(path: impl AsRef<Path>, mask: Severity, append: bool) -> Result<Self, Error> {
        Ok(Self::new(Destination::file(path, append)?, mask))
    }

    /// Writes to a caller-owned writer that outlives the backend.
    #[must_use]
    pub fn borrowed<W: Write + Send>(writer: &'a mut W, mask: Severity) -> Self {
        Self::new(Destination::borrowed(writer), mask)
    }

    #[must_use]
    pub const fn destination(&self) -> &Destination<'a> {
        &self.destination
    }

    /// Flushes the destination and ends the backend. An owned file is closed
    /// when the returned handle goes out of scope, which is right here.
    ///
    /// # Errors
    /// I/O errors from the final flush.
    pub fn close(mut self) -> Result<(), Error> {
        self.finish()
    }

    fn finish(&mut self) -> Result<(), Error> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        self.destination.flush()
    }
}

impl LogBackend for StreamLog<'_> {
    fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    fn pipeline_mut(&mut self) -> &mut Pipeline {
        &mut self.pipeline
    }

    fn record(&mut self, _severity: Severity, text: &str) -> Result<(), Error> {
        self.destination.write_line(text)
    }

    fn flush(&mut self) -> Result<(), Error> {
        self.destination.flush()
    }

    fn close(self: Box<Self>) -> Result<(), Error> {
        StreamLog::close(*self)
    }
}

impl Drop for StreamLog<'_> {
    fn drop(&mut self) {
        if let Err(e) = self.finish() {
            internal::lost("STREAM", &format!("Flush on drop failed: {e}"));
        }
    }
}
