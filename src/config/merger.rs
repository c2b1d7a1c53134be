// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Configuration merging.
//!
//! Handles merging configurations from different sources with proper precedence.

use std::str::FromStr;

use tracing::Level;

use crate::error::ConfigError;
use crate::types::Severity;

use super::types::{ResolvedConfig, TelemetryFileConfig, UlogConfig};

/// Explicit settings that win over the config file, typically from the CLI.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub threshold: Option<Severity>,
    pub logger_name: Option<String>,
    pub parameter_separator: Option<String>,
    pub include_trace: Option<bool>,
}

/// Default configuration values.
pub fn default_config() -> ResolvedConfig {
    ResolvedConfig::default()
}

/// Merge a config file with explicit overrides.
///
/// Precedence (highest to lowest):
/// 1. Overrides
/// 2. Config file
/// 3. Default values
pub fn merge_config(
    file: Option<UlogConfig>,
    overrides: ConfigOverrides,
) -> Result<ResolvedConfig, ConfigError> {
    let mut result = default_config();

    if let Some(config) = file {
        apply_file_config(&mut result, config)?;
    }

    apply_overrides(&mut result, overrides);

    Ok(result)
}

fn apply_file_config(result: &mut ResolvedConfig, config: UlogConfig) -> Result<(), ConfigError> {
    if let Some(threshold) = config.threshold {
        result.threshold = threshold;
    }

    if let Some(name) = config.logger_name {
        result.logger_name = name;
    }

    if let Some(separator) = config.parameter_separator {
        result.parameter_separator = separator;
    }

    if let Some(include_trace) = config.include_trace {
        result.include_trace = include_trace;
    }

    if let Some(telemetry) = config.telemetry {
        apply_telemetry(result, telemetry)?;
    }

    Ok(())
}

fn apply_telemetry(result: &mut ResolvedConfig, config: TelemetryFileConfig) -> Result<(), ConfigError> {
    let telemetry = &mut result.telemetry;

    if let Some(level) = config.level {
        telemetry.default_level =
            Level::from_str(&level).map_err(|e| ConfigError::InvalidValue {
                field: "telemetry.level".to_string(),
                message: format!("'{level}': {e}"),
            })?;
    }

    if config.filter.is_some() {
        telemetry.filter_directive = config.filter;
    }

    if let Some(ansi) = config.ansi {
        telemetry.ansi_colors = ansi;
    }

    if let Some(compact) = config.compact {
        telemetry.compact = compact;
    }

    if let Some(timestamps) = config.timestamps {
        telemetry.timestamps = timestamps;
    }

    Ok(())
}

fn apply_overrides(result: &mut ResolvedConfig, overrides: ConfigOverrides) {
    if let Some(threshold) = overrides.threshold {
        result.threshold = threshold;
    }

    if let Some(name) = overrides.logger_name {
        result.logger_name = name;
    }

    if let Some(separator) = overrides.parameter_separator {
        result.parameter_separator = separator;
    }

    if let Some(include_trace) = overrides.include_trace {
        result.include_trace = include_trace;
    }
}
