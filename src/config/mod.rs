//! TOML configuration: which backends to build, with which masks and
//! destinations, and the formatter and limiter they share.
//!
//! ```toml
//! [general]
//! internal_mask = ["warning", "error", "bug"]
//!
//! [formatter]
//! prefix = true
//!
//! [limiter]
//! tag_limit = 10
//! categories = { warning = 100 }
//!
//! [backends.prt]
//! kind = "prt"
//! path = "~/runs/CASE.PRT"
//! mask = "all"
//!
//! [backends.terminal]
//! kind = "stream"
//! target = "stdout"
//! mask = "info|warning|error|problem|bug"
//!
//! [backends.counter]
//! kind = "counter"
//! ```

mod structs;

pub use structs::{
    BackendConfig, BackendKind, FormatterConfig, GeneralConfig, LimiterConfig, StdTarget,
};

use crate::internal;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// An empty file must still produce a working configuration, so every
/// section defaults.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,
    pub formatter: FormatterConfig,
    pub limiter: LimiterConfig,
    /// Keyed by backend name; ordered so loggers are built deterministically.
    pub backends: BTreeMap<String, BackendConfig>,
}

impl Config {
    /// Loads the default config file, or defaults when it doesn't exist.
    ///
    /// # Errors
    /// Fails if the config directory can't be determined, the file can't be
    /// read, or TOML parsing hits a syntax error.
    pub fn load() -> Result<Self, crate::Error> {
        internal::debug("CONFIG", "Loading config from default location");
        let path = Self::get_config_path()?;
        if !path.exists() {
            internal::debug("CONFIG", "Config file not found, using defaults");
            return Ok(Self::default());
        }
        Self::load_from(&path)
    }

    /// Loads configuration from an explicit path.
    ///
    /// # Errors
    /// Returns error if the file cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self, crate::Error> {
        let content = fs::read_to_string(path)?;
        let config = Self::parse(&content)?;
        internal::info(
            "CONFIG",
            &format!("Config loaded from {}", path.display()),
        );
        Ok(config)
    }

    /// # Errors
    /// TOML syntax errors and invalid severity names.
    pub fn parse(content: &str) -> Result<Self, crate::Error> {
        Ok(toml::from_str(content)?)
    }

    /// `<config dir>/prtlog/prtlog.toml`, e.g. `~/.config/prtlog/prtlog.toml` on Linux.
    ///
    /// # Errors
    /// Fails when the platform has no concept of a config directory.
    pub fn get_config_path() -> Result<PathBuf, crate::Error> {
        directories::BaseDirs::new()
            .map(|dirs| dirs.config_dir().join("prtlog").join("prtlog.toml"))
            .ok_or(crate::Error::ConfigDirNotFound)
    }
}

/// Expands a leading `~` in configured paths.
#[must_use]
pub fn expand_path(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).as_ref())
}
