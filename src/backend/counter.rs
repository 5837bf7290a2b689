//! Counting backend: keeps how many messages of each flag were accepted.

use super::{LogBackend, Pipeline};
use crate::error::Error;
use crate::severity::Severity;
use std::collections::BTreeMap;

/// Per-flag message counters.
///
/// Keys are exact flag values: a `WARNING | ERROR` message is counted under
/// that combination only, never under `WARNING` or `ERROR`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageCounts(BTreeMap<Severity, usize>);

impl MessageCounts {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment(&mut self, severity: Severity) {
        *self.0.entry(severity).or_insert(0) += 1;
    }

    /// Exact-key lookup; 0 for flags never recorded.
    #[must_use]
    pub fn get(&self, severity: Severity) -> usize {
        self.0.get(&severity).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.0.values().sum()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Recorded flags in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = (Severity, usize)> + '_ {
        self.0.iter().map(|(severity, count)| (*severity, *count))
    }
}

/// Counts accepted messages and discards their text.
#[derive(Debug, Clone)]
pub struct CounterLog {
    pipeline: Pipeline,
    counts: MessageCounts,
}

impl Default for CounterLog {
    fn default() -> Self {
        Self::new()
    }
}

impl CounterLog {
    /// Accepts every severity class.
    #[must_use]
    pub fn new() -> Self {
        Self::with_mask(Severity::ALL)
    }

    #[must_use]
    pub fn with_mask(mask: Severity) -> Self {
        Self {
            pipeline: Pipeline::new(mask),
            counts: MessageCounts::new(),
        }
    }

    #[must_use]
    pub fn num_messages(&self, severity: Severity) -> usize {
        self.counts.get(severity)
    }

    pub fn clear(&mut self) {
        self.counts.clear();
    }
}

impl LogBackend for CounterLog {
    fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    fn pipeline_mut(&mut self) -> &mut Pipeline {
        &mut self.pipeline
    }

    fn record(&mut self, severity: Severity, _text: &str) -> Result<(), Error> {
        self.counts.increment(severity);
        Ok(())
    }

    fn counts(&self) -> Option<&MessageCounts> {
        Some(&self.counts)
    }
}
