//! Rate control for repeated messages.
//!
//! A limiter is asked exactly once per admitted message. The answer depends on
//! everything it has seen so far, so the query is a side-effecting call that
//! advances the limiter's counters.

use crate::severity::Severity;
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

/// Outcome of a limiter query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimitResponse {
    /// Within all limits: record the message.
    Print,
    /// First message over its tag's limit: record a notice instead.
    JustOverTagLimit,
    /// First message over its category's limit: record a notice instead.
    JustOverCategoryLimit,
    /// Already past the tag limit: drop silently.
    OverTagLimit,
    /// Already past the category limit: drop silently.
    OverCategoryLimit,
}

impl LimitResponse {
    #[must_use]
    pub const fn admits(self) -> bool {
        matches!(self, Self::Print)
    }
}

/// Decides whether a tagged message of a given severity may be recorded.
///
/// Implementations that keep state must serialize it internally: one limiter
/// may be shared by many backends, and each `handle` call has to behave as a
/// single indivisible query.
pub trait MessageLimiter: Send + Sync {
    fn handle(&self, tag: &str, severity: Severity) -> LimitResponse;
}

#[derive(Debug, Default)]
struct Counts {
    tags: HashMap<String, usize>,
    categories: HashMap<Severity, usize>,
}

/// Caps how many messages share a tag, and optionally how many messages of
/// each exact severity flag are recorded.
///
/// Untagged messages never count towards a tag limit. A message already over
/// its tag limit is not counted towards its category.
#[derive(Debug)]
pub struct TagLimiter {
    tag_limit: Option<usize>,
    category_limits: HashMap<Severity, usize>,
    counts: Mutex<Counts>,
}

impl Default for TagLimiter {
    fn default() -> Self {
        Self::unlimited()
    }
}

impl TagLimiter {
    #[must_use]
    pub fn new(tag_limit: Option<usize>, category_limits: HashMap<Severity, usize>) -> Self {
        Self {
            tag_limit,
            category_limits,
            counts: Mutex::new(Counts::default()),
        }
    }

    /// A limiter that prints everything but still keeps counts.
    #[must_use]
    pub fn unlimited() -> Self {
        Self::new(None, HashMap::new())
    }

    #[must_use]
    pub const fn tag_limit(&self) -> Option<usize> {
        self.tag_limit
    }

    /// How many messages with `tag` have been seen, including suppressed ones.
    #[must_use]
    pub fn encountered(&self, tag: &str) -> usize {
        let counts = self.counts.lock().unwrap_or_else(PoisonError::into_inner);
        counts.tags.get(tag).copied().unwrap_or(0)
    }

    /// Per-flag counts of messages that passed the tag limit.
    #[must_use]
    pub fn category_counts(&self) -> HashMap<Severity, usize> {
        let counts = self.counts.lock().unwrap_or_else(PoisonError::into_inner);
        counts.categories.clone()
    }
}

/// `count` is 1-based: the `limit`th message still prints.
const fn over_limit(
    count: usize,
    limit: usize,
    just: LimitResponse,
    over: LimitResponse,
) -> LimitResponse {
    if count <= limit {
        LimitResponse::Print
    } else if count == limit + 1 {
        just
    } else {
        over
    }
}

impl MessageLimiter for TagLimiter {
    fn handle(&self, tag: &str, severity: Severity) -> LimitResponse {
        let mut counts = self.counts.lock().unwrap_or_else(PoisonError::into_inner);

        let mut response = LimitResponse::Print;
        if !tag.is_empty()
            && let Some(limit) = self.tag_limit
        {
            let count = counts.tags.entry(tag.to_string()).or_insert(0);
            *count += 1;
            response = over_limit(
                *count,
                limit,
                LimitResponse::JustOverTagLimit,
                LimitResponse::OverTagLimit,
            );
        }

        if response.admits() {
            let count = counts.categories.entry(severity).or_insert(0);
            *count += 1;
            if let Some(&limit) = self.category_limits.get(&severity) {
                response = over_limit(
                    *count,
                    limit,
                    LimitResponse::JustOverCategoryLimit,
                    LimitResponse::OverCategoryLimit,
                );
            }
        }

        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn over_limit_boundaries() {
        let just = LimitResponse::JustOverTagLimit;
        let over = LimitResponse::OverTagLimit;
        assert_eq!(over_limit(2, 2, just, over), LimitResponse::Print);
        assert_eq!(over_limit(3, 2, just, over), just);
        assert_eq!(over_limit(4, 2, just, over), over);
    }

    #[test]
    fn zero_limit_suppresses_first_message() {
        let just = LimitResponse::JustOverCategoryLimit;
        let over = LimitResponse::OverCategoryLimit;
        assert_eq!(over_limit(1, 0, just, over), just);
    }
}
