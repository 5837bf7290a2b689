//! Presentation of accepted messages. A formatter is a pure strategy object
//! that backends share through an `Arc`; it never decides whether a message
//! is written, only how it reads.

mod color;

pub use color::{Color, colorize};

use crate::severity::Severity;
use chrono::Local;
use std::collections::HashMap;
use std::fmt::Write;

/// Turns `(severity, text)` into the text a backend records.
///
/// `Send + Sync` so one formatter can serve backends on several threads.
pub trait MessageFormatter: Send + Sync {
    fn format(&self, severity: Severity, text: &str) -> String;
}

/// Prefix, timestamp and color decoration for print files and terminals.
#[derive(Debug, Clone)]
pub struct SimpleMessageFormatter {
    prefix: bool,
    colors: bool,
    timestamp_format: Option<String>,
    class_colors: HashMap<Severity, Color>,
}

impl Default for SimpleMessageFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl SimpleMessageFormatter {
    /// Class prefix on, colors and timestamps off.
    #[must_use]
    pub fn new() -> Self {
        Self {
            prefix: true,
            colors: false,
            timestamp_format: None,
            class_colors: HashMap::new(),
        }
    }

    /// Prepend `Warning: `, `Error: ` and so on.
    #[must_use]
    pub const fn prefix(mut self, enabled: bool) -> Self {
        self.prefix = enabled;
        self
    }

    /// Wrap warnings, errors, problems, bugs and debug output in ANSI color.
    /// Leave this off for files; the escapes end up in the file verbatim.
    #[must_use]
    pub const fn colors(mut self, enabled: bool) -> Self {
        self.colors = enabled;
        self
    }

    /// Lead each message with the local time in the given strftime format.
    #[must_use]
    pub fn timestamp_format(mut self, format: impl Into<String>) -> Self {
        self.timestamp_format = Some(format.into());
        self
    }

    /// Override the color of one severity class.
    #[must_use]
    pub fn class_color(mut self, severity: Severity, color: Color) -> Self {
        self.class_colors.insert(severity, color);
        self
    }

    fn color_for(&self, severity: Severity) -> Option<Color> {
        self.class_colors
            .get(&severity)
            .copied()
            .or_else(|| Color::for_severity(severity))
    }
}

impl MessageFormatter for SimpleMessageFormatter {
    fn format(&self, severity: Severity, text: &str) -> String {
        let mut msg = if self.prefix {
            format!("{}{text}", severity.prefix())
        } else {
            text.to_string()
        };

        // An invalid strftime spec makes `Display` fail; skip the stamp then.
        if let Some(ts_format) = &self.timestamp_format {
            let mut timestamp = String::new();
            if write!(timestamp, "{}", Local::now().format(ts_format)).is_ok() {
                msg = format!("{timestamp} {msg}");
            }
        }

        if self.colors
            && let Some(color) = self.color_for(severity)
        {
            msg = colorize(&msg, color);
        }

        msg
    }
}

/// Adapts a closure into a formatter.
pub struct FnFormatter<F>(pub F);

impl<F> MessageFormatter for FnFormatter<F>
where
    F: Fn(Severity, &str) -> String + Send + Sync,
{
    fn format(&self, severity: Severity, text: &str) -> String {
        (self.0)(severity, text)
    }
}
