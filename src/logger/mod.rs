//! Routes each message to every registered backend. Each backend applies its
//! own mask, limiter and formatter, so one call can land in a counter, a
//! terminal stream and a print file with different results.

mod builder;
mod from_config;

pub use builder::{CounterBuilder, LoggerBuilder, PrtBuilder, StreamBuilder};

use crate::backend::LogBackend;
use crate::error::Error;
use crate::fmt::MessageFormatter;
use crate::internal;
use crate::limit::MessageLimiter;
use crate::severity::Severity;
use std::fmt;
use std::sync::Arc;

type NamedBackend<'a> = (String, Box<dyn LogBackend + 'a>);

/// Named backends in registration order.
#[derive(Default)]
pub struct Logger<'a> {
    backends: Vec<NamedBackend<'a>>,
}

impl fmt::Debug for Logger<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("backends", &self.backend_names().collect::<Vec<_>>())
            .finish()
    }
}

impl<'a> Logger<'a> {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            backends: Vec::new(),
        }
    }

    #[must_use]
    pub fn builder() -> LoggerBuilder<'a> {
        LoggerBuilder::new()
    }

    /// Registers `backend` under `name`, returning any backend it replaces so
    /// the caller decides when that one is closed.
    pub fn add_backend(
        &mut self,
        name: impl Into<String>,
        backend: impl LogBackend + 'a,
    ) -> Option<Box<dyn LogBackend + 'a>> {
        self.add_boxed_backend(name, Box::new(backend))
    }

    pub fn add_boxed_backend(
        &mut self,
        name: impl Into<String>,
        backend: Box<dyn LogBackend + 'a>,
    ) -> Option<Box<dyn LogBackend + 'a>> {
        let name = name.into();
        internal::debug(
            "LOGGER",
            &format!("Adding backend '{name}' (mask {})", backend.mask()),
        );
        if let Some(slot) = self.backends.iter_mut().find(|(n, _)| *n == name) {
            return Some(std::mem::replace(&mut slot.1, backend));
        }
        self.backends.push((name, backend));
        None
    }

    pub fn remove_backend(&mut self, name: &str) -> Option<Box<dyn LogBackend + 'a>> {
        let index = self.backends.iter().position(|(n, _)| n == name)?;
        internal::debug("LOGGER", &format!("Removing backend '{name}'"));
        Some(self.backends.remove(index).1)
    }

    #[must_use]
    pub fn has_backend(&self, name: &str) -> bool {
        self.backends.iter().any(|(n, _)| n == name)
    }

    #[must_use]
    pub fn backend(&self, name: &str) -> Option<&(dyn LogBackend + 'a)> {
        self.backends
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, backend)| backend.as_ref())
    }

    pub fn backend_mut(&mut self, name: &str) -> Option<&mut (dyn LogBackend + 'a)> {
        self.backends
            .iter_mut()
            .find(|(n, _)| n == name)
            .map(|(_, backend)| backend.as_mut())
    }

    pub fn backend_names(&self) -> impl Iterator<Item = &str> {
        self.backends.iter().map(|(name, _)| name.as_str())
    }

    #[must_use]
    pub fn backend_count(&self) -> usize {
        self.backends.len()
    }

    /// True if at least one backend's mask admits `severity`. Lets callers
    /// skip building expensive message text nobody would record.
    #[must_use]
    pub fn enabled(&self, severity: Severity) -> bool {
        !severity.is_empty()
            && self
                .backends
                .iter()
                .any(|(_, backend)| severity.is_subset_of(backend.mask()))
    }

    /// # Errors
    /// The first write failure; every backend is still attempted.
    pub fn add_message(&mut self, severity: Severity, text: &str) -> Result<(), Error> {
        self.add_tagged_message(severity, "", text)
    }

    /// # Errors
    /// The first write failure; every backend is still attempted.
    pub fn add_tagged_message(
        &mut self,
        severity: Severity,
        tag: &str,
        text: &str,
    ) -> Result<(), Error> {
        let mut first_error = None;
        for (_, backend) in &mut self.backends {
            if let Err(e) = backend.add_tagged_message(severity, tag, text) {
                first_error = first_error.or(Some(e));
            }
        }
        first_error.map_or(Ok(()), Err)
    }

    /// Exact-flag count from the named backend, `None` if it doesn't exist
    /// or doesn't count.
    #[must_use]
    pub fn num_messages(&self, name: &str, severity: Severity) -> Option<usize> {
        self.backend(name)?.counts().map(|counts| counts.get(severity))
    }

    /// Attaches one shared formatter to every registered backend.
    pub fn set_formatter(&mut self, formatter: &Arc<dyn MessageFormatter>) {
        for (_, backend) in &mut self.backends {
            backend.set_formatter(Arc::clone(formatter));
        }
    }

    /// Gives every registered backend its own limiter built by `make`. Each
    /// backend counts tags over the messages it alone admitted, so a message
    /// that passes one backend's limit is not charged against another's.
    pub fn set_limiter<L: MessageLimiter + 'static>(&mut self, make: impl Fn() -> L) {
        self.attach_limiters(&|| -> Arc<dyn MessageLimiter> { Arc::new(make()) });
    }

    fn attach_limiters(&mut self, make: &dyn Fn() -> Arc<dyn MessageLimiter>) {
        for (_, backend) in &mut self.backends {
            backend.set_limiter(make());
        }
    }

    /// # Errors
    /// The first flush failure; every backend is still flushed.
    pub fn flush(&mut self) -> Result<(), Error> {
        let mut first_error = None;
        for (_, backend) in &mut self.backends {
            if let Err(e) = backend.flush() {
                first_error = first_error.or(Some(e));
            }
        }
        first_error.map_or(Ok(()), Err)
    }

    /// Closes every backend in registration order, writing summaries.
    ///
    /// # Errors
    /// The first close failure; every backend is still closed.
    pub fn close(self) -> Result<(), Error> {
        let mut first_error = None;
        for (name, backend) in self.backends {
            internal::debug("LOGGER", &format!("Closing backend '{name}'"));
            if let Err(e) = backend.close() {
                first_error = first_error.or(Some(e));
            }
        }
        first_error.map_or(Ok(()), Err)
    }
}

// Shorthands for `add_message` with a fixed class; errors as there.
#[allow(clippy::missing_errors_doc)]
impl Logger<'_> {
    pub fn debug(&mut self, text: &str) -> Result<(), Error> {
        self.add_message(Severity::DEBUG, text)
    }

    pub fn note(&mut self, text: &str) -> Result<(), Error> {
        self.add_message(Severity::NOTE, text)
    }

    pub fn info(&mut self, text: &str) -> Result<(), Error> {
        self.add_message(Severity::INFO, text)
    }

    pub fn warning(&mut self, text: &str) -> Result<(), Error> {
        self.add_message(Severity::WARNING, text)
    }

    pub fn error(&mut self, text: &str) -> Result<(), Error> {
        self.add_message(Severity::ERROR, text)
    }

    pub fn problem(&mut self, text: &str) -> Result<(), Error> {
        self.add_message(Severity::PROBLEM, text)
    }

    pub fn bug(&mut self, text: &str) -> Result<(), Error> {
        self.add_message(Severity::BUG, text)
    }
}
