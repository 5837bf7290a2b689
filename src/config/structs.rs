//! Configuration struct definitions.

use crate::severity::Severity;
use serde::Deserialize;
use std::collections::HashMap;

/// Settings that apply to the crate as a whole.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Which classes of prtlog's own diagnostics reach stderr.
    pub internal_mask: Severity,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            internal_mask: crate::internal::DEFAULT_MASK,
        }
    }
}

/// Shared formatter attached to every configured backend.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FormatterConfig {
    /// Without a formatter, backends record message text unchanged.
    pub enabled: bool,
    pub prefix: bool,
    pub colors: bool,
    /// strftime format; no timestamp when absent.
    pub timestamp_format: Option<String>,
    /// Severity name to `#RRGGBB`, overriding the default class colors.
    pub class_colors: HashMap<String, String>,
}

impl Default for FormatterConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            prefix: true,
            colors: false,
            timestamp_format: None,
            class_colors: HashMap::new(),
        }
    }
}

/// Shared limiter attached to every configured backend.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LimiterConfig {
    /// Maximum messages per non-empty tag.
    pub tag_limit: Option<usize>,
    /// Severity name to maximum messages of that exact class.
    pub categories: HashMap<String, usize>,
}

impl LimiterConfig {
    /// No limits configured means no limiter gets attached.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.tag_limit.is_some() || !self.categories.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    Counter,
    Stream,
    Prt,
}

/// Standard stream for stream and PRT backends without a `path`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StdTarget {
    Stdout,
    #[default]
    Stderr,
}

/// One `[backends.<name>]` table.
#[derive(Debug, Clone, Deserialize)]
pub struct BackendConfig {
    pub kind: BackendKind,
    #[serde(default = "default_mask")]
    pub mask: Severity,
    /// File to open; `~` is expanded. Takes precedence over `target`.
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub append: bool,
    #[serde(default)]
    pub target: StdTarget,
    /// PRT backends only.
    #[serde(default = "default_print_summary")]
    pub print_summary: bool,
}

const fn default_mask() -> Severity {
    Severity::ALL
}

const fn default_print_summary() -> bool {
    true
}
