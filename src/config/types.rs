// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Configuration type definitions.
//!
//! Defines the structure of the config file and the resolved configuration,
//! supporting JSON and YAML formats.

use serde::{Deserialize, Serialize};

use crate::instrument::Ulog;
use crate::telemetry::TelemetryConfig;
use crate::types::Severity;

/// Configuration as written in `ulog.json` or `ulog.yaml`.
///
/// Every field is optional; missing fields fall back to lower-precedence
/// sources.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UlogConfig {
    /// Minimum severity that reaches the backend
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threshold: Option<Severity>,

    /// Name recorded on every emitted record
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logger_name: Option<String>,

    /// Prefix written before each logged parameter
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameter_separator: Option<String>,

    /// Attach a backtrace to failure records
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_trace: Option<bool>,

    /// Subscriber settings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub telemetry: Option<TelemetryFileConfig>,
}

/// The `telemetry` section of the config file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TelemetryFileConfig {
    /// Default level when `RUST_LOG` is unset (`error` .. `trace`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,

    /// Filter directive that overrides `RUST_LOG`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub ansi: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub compact: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamps: Option<bool>,
}

/// Fully resolved configuration with all defaults applied.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    pub threshold: Severity,
    pub logger_name: String,
    pub parameter_separator: String,
    pub include_trace: bool,
    pub telemetry: TelemetryConfig,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            threshold: Ulog::DEFAULT_THRESHOLD,
            logger_name: "root".to_string(),
            parameter_separator: Ulog::DEFAULT_PARAMETER_SEPARATOR.to_string(),
            include_trace: true,
            telemetry: TelemetryConfig::default(),
        }
    }
}
