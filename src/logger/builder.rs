//! Stepwise construction of a [`Logger`]: one sub-builder per backend kind,
//! each returning to the parent with `done()`.
//!
//! Opening a file can fail. The first failure is kept, later backends are
//! skipped, and [`LoggerBuilder::build`] reports it.

use super::Logger;
use crate::backend::{CounterLog, Destination, EclipsePrtLog, LogBackend, StreamLog};
use crate::config::StdTarget;
use crate::error::Error;
use crate::fmt::MessageFormatter;
use crate::limit::MessageLimiter;
use crate::severity::Severity;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;

pub struct LoggerBuilder<'a> {
    logger: Logger<'a>,
    formatter: Option<Arc<dyn MessageFormatter>>,
    limiter: Option<LimiterFactory>,
    error: Option<Error>,
}

type LimiterFactory = Box<dyn Fn() -> Arc<dyn MessageLimiter>>;

impl Default for LoggerBuilder<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> LoggerBuilder<'a> {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            logger: Logger::new(),
            formatter: None,
            limiter: None,
            error: None,
        }
    }

    /// Formatter attached to every backend at `build()`.
    #[must_use]
    pub fn formatter(self, formatter: impl MessageFormatter + 'static) -> Self {
        self.shared_formatter(Arc::new(formatter))
    }

    #[must_use]
    pub fn shared_formatter(mut self, formatter: Arc<dyn MessageFormatter>) -> Self {
        self.formatter = Some(formatter);
        self
    }

    /// At `build()`, `make` is called once per backend. Every backend gets a
    /// fresh limiter, so tag counts never leak from one backend to another.
    #[must_use]
    pub fn limiter<L: MessageLimiter + 'static>(
        mut self,
        make: impl Fn() -> L + 'static,
    ) -> Self {
        self.limiter = Some(Box::new(move || -> Arc<dyn MessageLimiter> {
            Arc::new(make())
        }));
        self
    }

    /// Registers an already constructed backend.
    #[must_use]
    pub fn backend(mut self, name: impl Into<String>, backend: impl LogBackend + 'a) -> Self {
        // a replaced backend of the same name is dropped, and closed, here
        let _ = self.logger.add_backend(name, backend);
        self
    }

    #[must_use]
    pub fn counter(self, name: impl Into<String>) -> CounterBuilder<'a> {
        CounterBuilder {
            parent: self,
            name: name.into(),
            mask: Severity::ALL,
        }
    }

    #[must_use]
    pub fn stream(self, name: impl Into<String>) -> StreamBuilder<'a> {
        StreamBuilder {
            parent: self,
            name: name.into(),
            mask: Severity::ALL,
            target: Target::default(),
        }
    }

    #[must_use]
    pub fn prt(self, name: impl Into<String>) -> PrtBuilder<'a> {
        PrtBuilder {
            parent: self,
            name: name.into(),
            mask: Severity::ALL,
            target: Target::default(),
            print_summary: true,
        }
    }

    fn open_backend<B: LogBackend + 'a>(
        mut self,
        name: String,
        open: impl FnOnce() -> Result<B, Error>,
    ) -> Self {
        if self.error.is_some() {
            return self;
        }
        match open() {
            Ok(backend) => self.backend(name, backend),
            Err(e) => {
                self.error = Some(e);
                self
            }
        }
    }

    /// # Errors
    /// The first backend that failed to open.
    pub fn build(self) -> Result<Logger<'a>, Error> {
        if let Some(e) = self.error {
            return Err(e);
        }

        let mut logger = self.logger;
        if let Some(formatter) = &self.formatter {
            logger.set_formatter(formatter);
        }
        if let Some(make) = &self.limiter {
            logger.attach_limiters(&**make);
        }
        Ok(logger)
    }
}

/// Where a stream or PRT backend will write once built.
enum Target<'a> {
    Path { path: PathBuf, append: bool },
    Std(StdTarget),
    Destination(Destination<'a>),
}

impl Default for Target<'_> {
    fn default() -> Self {
        Self::Std(StdTarget::default())
    }
}

impl<'a> Target<'a> {
    fn open(self) -> Result<Destination<'a>, Error> {
        match self {
            Self::Path { path, append } => Destination::file(path, append),
            Self::Std(StdTarget::Stdout) => Ok(Destination::owned(io::stdout())),
            Self::Std(StdTarget::Stderr) => Ok(Destination::owned(io::stderr())),
            Self::Destination(destination) => Ok(destination),
        }
    }

    fn set_append(&mut self, enabled: bool) {
        if let Self::Path { append, .. } = self {
            *append = enabled;
        }
    }
}

pub struct CounterBuilder<'a> {
    parent: LoggerBuilder<'a>,
    name: String,
    mask: Severity,
}

impl<'a> CounterBuilder<'a> {
    #[must_use]
    pub const fn mask(mut self, mask: Severity) -> Self {
        self.mask = mask;
        self
    }

    #[must_use]
    pub fn done(self) -> LoggerBuilder<'a> {
        let backend = CounterLog::with_mask(self.mask);
        self.parent.backend(self.name, backend)
    }
}

pub struct StreamBuilder<'a> {
    parent: LoggerBuilder<'a>,
    name: String,
    mask: Severity,
    target: Target<'a>,
}

impl<'a> StreamBuilder<'a> {
    #[must_use]
    pub const fn mask(mut self, mask: Severity) -> Self {
        self.mask = mask;
        self
    }

    /// Write to a file, truncated unless `append(true)` follows.
    #[must_use]
    pub fn path(mut self, path: impl Into<PathBuf>) -> Self {
        self.target = Target::Path {
            path: path.into(),
            append: false,
        };
        self
    }

    #[must_use]
    pub fn append(mut self, enabled: bool) -> Self {
        self.target.set_append(enabled);
        self
    }

    #[must_use]
    pub fn std(mut self, target: StdTarget) -> Self {
        self.target = Target::Std(target);
        self
    }

    #[must_use]
    pub fn destination(mut self, destination: Destination<'a>) -> Self {
        self.target = Target::Destination(destination);
        self
    }

    #[must_use]
    pub fn done(self) -> LoggerBuilder<'a> {
        let Self {
            parent,
            name,
            mask,
            target,
        } = self;
        parent.open_backend(name, || Ok(StreamLog::new(target.open()?, mask)))
    }
}

pub struct PrtBuilder<'a> {
    parent: LoggerBuilder<'a>,
    name: String,
    mask: Severity,
    target: Target<'a>,
    print_summary: bool,
}

impl<'a> PrtBuilder<'a> {
    #[must_use]
    pub const fn mask(mut self, mask: Severity) -> Self {
        self.mask = mask;
        self
    }

    /// Write to a print file, truncated unless `append(true)` follows.
    #[must_use]
    pub fn path(mut self, path: impl Into<PathBuf>) -> Self {
        self.target = Target::Path {
            path: path.into(),
            append: false,
        };
        self
    }

    #[must_use]
    pub fn append(mut self, enabled: bool) -> Self {
        self.target.set_append(enabled);
        self
    }

    #[must_use]
    pub fn std(mut self, target: StdTarget) -> Self {
        self.target = Target::Std(target);
        self
    }

    #[must_use]
    pub fn destination(mut self, destination: Destination<'a>) -> Self {
        self.target = Target::Destination(destination);
        self
    }

    #[must_use]
    pub const fn print_summary(mut self, enabled: bool) -> Self {
        self.print_summary = enabled;
        self
    }

    #[must_use]
    pub fn done(self) -> LoggerBuilder<'a> {
        let Self {
            parent,
            name,
            mask,
            target,
            print_summary,
        } = self;
        parent.open_backend(name, || {
            Ok(EclipsePrtLog::new(target.open()?, mask, print_summary))
        })
    }
}
