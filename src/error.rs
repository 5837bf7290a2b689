//! Unified error type for all prtlog operations.

use std::path::PathBuf;

/// Error type for prtlog operations.
#[derive(Debug)]
pub enum Error {
    /// I/O error while writing, flushing or reading.
    Io(std::io::Error),
    /// A file destination could not be opened for writing.
    Open {
        path: PathBuf,
        source: std::io::Error,
    },
    /// TOML config parsing error.
    ConfigParse(toml::de::Error),
    /// Config directory not found.
    ConfigDirNotFound,
    /// Unknown severity name or malformed mask.
    InvalidSeverity(String),
    /// A configured backend is missing a required setting.
    InvalidBackend { name: String, reason: String },
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::Open { path, source } => {
                write!(f, "cannot open {} for writing: {source}", path.display())
            }
            Self::ConfigParse(e) => write!(f, "parse error: {e}"),
            Self::ConfigDirNotFound => write!(f, "config directory not found"),
            Self::InvalidSeverity(s) => write!(f, "invalid severity: {s}"),
            Self::InvalidBackend { name, reason } => {
                write!(f, "invalid backend '{name}': {reason}")
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) | Self::Open { source: e, .. } => Some(e),
            Self::ConfigParse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<toml::de::Error> for Error {
    fn from(e: toml::de::Error) -> Self {
        Self::ConfigParse(e)
    }
}

impl From<crate::severity::ParseSeverityError> for Error {
    fn from(e: crate::severity::ParseSeverityError) -> Self {
        Self::InvalidSeverity(e.to_string())
    }
}
