//! Logger construction from a loaded [`Config`].

use super::{Logger, LoggerBuilder};
use crate::config::{
    BackendConfig, BackendKind, Config, FormatterConfig, LimiterConfig, expand_path,
};
use crate::error::Error;
use crate::fmt::{Color, SimpleMessageFormatter};
use crate::internal;
use crate::limit::TagLimiter;
use crate::severity::Severity;
use std::collections::HashMap;

impl Logger<'static> {
    /// Loads the default config file and builds a logger from it.
    ///
    /// # Errors
    /// Config loading errors, invalid severity names, and destinations that
    /// fail to open.
    pub fn from_default_config() -> Result<Self, Error> {
        let config = Config::load()?;
        Self::from_config(&config)
    }

    /// Builds every `[backends.*]` entry, in name order, sharing one formatter.
    /// Each backend gets its own limiter with the configured limits. Also initializes the internal
    /// diagnostic channel from `[general]` if nothing did so earlier.
    ///
    /// # Errors
    /// Invalid severity names, stream backends without a usable destination,
    /// and files that fail to open.
    pub fn from_config(config: &Config) -> Result<Self, Error> {
        internal::init_with_config(config);
        internal::debug("LOGGER", "Building logger from config");
        let mut builder = LoggerBuilder::new();

        if config.formatter.enabled {
            builder = builder.formatter(build_formatter(&config.formatter)?);
        }

        if config.limiter.is_active() {
            let (tag_limit, categories) = build_limits(&config.limiter)?;
            builder =
                builder.limiter(move || TagLimiter::new(tag_limit, categories.clone()));
        }

        if config.backends.is_empty() {
            internal::warning("LOGGER", "No backends configured");
        }

        for (name, backend) in &config.backends {
            validate_backend(name, backend)?;
            builder = configure_backend(builder, name, backend);
        }

        let logger = builder.build()?;
        internal::debug(
            "LOGGER",
            &format!(
                "Backends enabled: [{}]",
                logger.backend_names().collect::<Vec<_>>().join(", ")
            ),
        );
        Ok(logger)
    }
}

fn build_formatter(config: &FormatterConfig) -> Result<SimpleMessageFormatter, Error> {
    let mut formatter = SimpleMessageFormatter::new()
        .prefix(config.prefix)
        .colors(config.colors);
    if let Some(ts_format) = &config.timestamp_format {
        formatter = formatter.timestamp_format(ts_format);
    }
    for (name, hex) in &config.class_colors {
        formatter = formatter.class_color(name.parse::<Severity>()?, Color::from_hex(hex));
    }
    Ok(formatter)
}

type Limits = (Option<usize>, HashMap<Severity, usize>);

fn build_limits(config: &LimiterConfig) -> Result<Limits, Error> {
    let categories = config
        .categories
        .iter()
        .map(|(name, limit)| -> Result<(Severity, usize), Error> {
            Ok((name.parse::<Severity>()?, *limit))
        })
        .collect::<Result<HashMap<_, _>, _>>()?;
    internal::debug(
        "LIMITER",
        &format!(
            "Tag limit: {:?}, category limits: {}",
            config.tag_limit,
            categories.len()
        ),
    );
    Ok((config.tag_limit, categories))
}

fn validate_backend(name: &str, config: &BackendConfig) -> Result<(), Error> {
    let invalid = |reason: &str| Error::InvalidBackend {
        name: name.to_string(),
        reason: reason.to_string(),
    };
    if config.mask.is_empty() {
        return Err(invalid("mask admits no severity"));
    }
    if config.kind == BackendKind::Counter && config.path.is_some() {
        return Err(invalid("counter backends do not write to a path"));
    }
    Ok(())
}

fn configure_backend(
    builder: LoggerBuilder<'static>,
    name: &str,
    config: &BackendConfig,
) -> LoggerBuilder<'static> {
    match config.kind {
        BackendKind::Counter => builder.counter(name).mask(config.mask).done(),
        BackendKind::Stream => {
            let stream = builder.stream(name).mask(config.mask);
            match &config.path {
                Some(path) => stream.path(expand_path(path)).append(config.append).done(),
                None => stream.std(config.target).done(),
            }
        }
        BackendKind::Prt => {
            let prt = builder
                .prt(name)
                .mask(config.mask)
                .print_summary(config.print_summary);
            match &config.path {
                Some(path) => prt.path(expand_path(path)).append(config.append).done(),
                None => prt.std(config.target).done(),
            }
        }
    }
}
