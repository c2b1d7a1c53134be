// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Telemetry initialization and configuration.

use std::io;
use tracing::Level;
use tracing_subscriber::{
    fmt::{self, time::ChronoLocal},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Layer, Registry,
};

/// Format of local timestamps on every line.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Configuration for telemetry initialization.
///
/// Every field maps to a key of the `telemetry` section of the config file.
#[derive(Debug, Clone, PartialEq)]
pub struct TelemetryConfig {
    /// Default log level if RUST_LOG is not set (`level`).
    pub default_level: Level,

    /// Whether to use ANSI colors in output (`ansi`).
    pub ansi_colors: bool,

    /// Whether to use compact log format (`compact`).
    pub compact: bool,

    /// Whether to prefix lines with a local timestamp (`timestamps`).
    pub timestamps: bool,

    /// Custom filter directive, overrides RUST_LOG and default_level (`filter`).
    pub filter_directive: Option<String>,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            default_level: Level::INFO,
            ansi_colors: true,
            compact: true,
            timestamps: true,
            filter_directive: None,
        }
    }
}

impl TelemetryConfig {
    /// Set the default log level.
    pub fn with_level(mut self, level: Level) -> Self {
        self.default_level = level;
        self
    }

    fn filter(&self) -> EnvFilter {
        let fallback = || EnvFilter::new(self.default_level.to_string());
        match &self.filter_directive {
            Some(directive) => EnvFilter::try_new(directive).unwrap_or_else(|_| fallback()),
            None => EnvFilter::try_from_default_env().unwrap_or_else(|_| fallback()),
        }
    }
}

/// Guard returned by [`init_telemetry`].
///
/// Keep this guard alive for the duration of your program.
pub struct TelemetryGuard {
    _private: (),
}

/// Initialize telemetry with the given configuration.
///
/// This should be called once at application startup. A second call fails
/// because a global subscriber is already set.
pub fn init_telemetry(config: &TelemetryConfig) -> io::Result<TelemetryGuard> {
    let fmt_layer = fmt::layer().with_ansi(config.ansi_colors).with_target(true);

    let timer = || ChronoLocal::new(TIMESTAMP_FORMAT.to_string());
    let fmt_layer: Box<dyn Layer<Registry> + Send + Sync> = match (config.compact, config.timestamps) {
        (true, true) => fmt_layer.compact().with_timer(timer()).boxed(),
        (true, false) => fmt_layer.compact().without_time().boxed(),
        (false, true) => fmt_layer.with_timer(timer()).boxed(),
        (false, false) => fmt_layer.without_time().boxed(),
    };

    tracing_subscriber::registry()
        .with(fmt_layer)
        .with(config.filter())
        .try_init()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))?;

    Ok(TelemetryGuard { _private: () })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_telemetry_config_default() {
        let config = TelemetryConfig::default();
        assert_eq!(config.default_level, Level::INFO);
        assert!(config.ansi_colors);
        assert!(config.compact);
        assert!(config.timestamps);
        assert!(config.filter_directive.is_none());
    }

    #[test]
    fn test_with_level() {
        let config = TelemetryConfig::default().with_level(Level::DEBUG);
        assert_eq!(config.default_level, Level::DEBUG);
        assert!(config.compact);
    }

    #[test]
    fn test_explicit_filter_wins() {
        use tracing::level_filters::LevelFilter;

        let config = TelemetryConfig {
            filter_directive: Some("ulog=trace".to_string()),
            ..Default::default()
        };
        assert_eq!(config.filter().max_level_hint(), Some(LevelFilter::TRACE));

        let config = TelemetryConfig {
            filter_directive: Some("warn".to_string()),
            ..Default::default()
        }
        .with_level(Level::DEBUG);
        assert_eq!(config.filter().max_level_hint(), Some(LevelFilter::WARN));
    }
}
