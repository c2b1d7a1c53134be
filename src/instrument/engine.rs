// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! The instrumentation engine and its severity gate.

use std::fmt;
use std::sync::Arc;

#[cfg(feature = "telemetry")]
use tracing::{debug, trace};

use super::args::{ArgsConfig, LogArgs};
use super::call::{CallConfig, LogCall};
use super::context::LayerKind;
use super::exception::{ExceptionConfig, LogException};
use super::returns::{LogReturn, ReturnConfig};
use super::Function;
use crate::backend::{LogBackend, TracingBackend};
use crate::config::ResolvedConfig;
use crate::error::UlogError;
use crate::types::Severity;

/// Builds instrumentation layers that share one backend and one threshold.
///
/// The threshold is fixed when the engine is built; every layer created from
/// it emits only when its own severity is at or above that threshold.
#[derive(Clone)]
pub struct Ulog {
    backend: Arc<dyn LogBackend>,
    threshold: Severity,
    separator: Arc<str>,
}

impl Ulog {
    /// Threshold used when none is configured.
    pub const DEFAULT_THRESHOLD: Severity = Severity::Error;

    /// Prefix written before each `name: value` pair of an argument dump.
    pub const DEFAULT_PARAMETER_SEPARATOR: &'static str = "\n";

    /// Create an engine around a backend.
    pub fn new(backend: impl LogBackend + 'static) -> Self {
        Self::from_shared(Arc::new(backend))
    }

    /// Create an engine around an already shared backend.
    pub fn from_shared(backend: Arc<dyn LogBackend>) -> Self {
        Self {
            backend,
            threshold: Self::DEFAULT_THRESHOLD,
            separator: Arc::from(Self::DEFAULT_PARAMETER_SEPARATOR),
        }
    }

    /// Create an engine that emits `tracing` events tagged with `name`.
    pub fn tracing(name: impl Into<String>) -> Self {
        Self::new(TracingBackend::new(name))
    }

    /// Create a `tracing` engine from resolved configuration.
    pub fn from_config(config: &ResolvedConfig) -> Self {
        Self::tracing(config.logger_name.clone())
            .with_threshold(config.threshold)
            .with_parameter_separator(config.parameter_separator.as_str())
    }

    /// Set the minimum severity that reaches the backend.
    pub fn with_threshold(mut self, threshold: Severity) -> Self {
        self.threshold = threshold;
        self
    }

    /// Set the prefix written before each logged parameter.
    pub fn with_parameter_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = Arc::from(separator.into());
        self
    }

    /// Active threshold.
    pub fn threshold(&self) -> Severity {
        self.threshold
    }

    /// Active parameter separator.
    pub fn parameter_separator(&self) -> &str {
        &self.separator
    }

    /// Check whether a record at `severity` would pass the gate.
    pub fn is_enabled(&self, severity: Severity) -> bool {
        severity >= self.threshold
    }

    /// Log arguments before each call of `f`.
    pub fn log_args<F: Function>(&self, f: F, config: ArgsConfig) -> Result<LogArgs<F>, UlogError> {
        LogArgs::new(f, self, config)
    }

    /// Announce each call of `f` before it runs.
    pub fn log_call<F: Function>(&self, f: F, config: CallConfig) -> Result<LogCall<F>, UlogError> {
        LogCall::new(f, self, config)
    }

    /// Log the value returned by each successful call of `f`.
    pub fn log_return<F>(&self, f: F, config: ReturnConfig) -> Result<LogReturn<F>, UlogError>
    where
        F: Function,
        F::Output: fmt::Display,
    {
        LogReturn::new(f, self, config)
    }

    /// Log every failure raised by `f`, then hand it back unchanged.
    pub fn log_exception<F>(
        &self,
        f: F,
        config: ExceptionConfig,
    ) -> Result<LogException<F>, UlogError>
    where
        F: Function,
        F::Error: fmt::Display,
    {
        LogException::new(f, self, config)
    }

    pub(crate) fn emitter(&self, kind: LayerKind, callable: &str, severity: Severity) -> Emitter {
        #[cfg(feature = "telemetry")]
        debug!(
            target: "ulog::engine",
            callable = %callable,
            kind = kind.as_str(),
            severity = %severity,
            enabled = self.is_enabled(severity),
            "Instrumentation layer built"
        );
        #[cfg(not(feature = "telemetry"))]
        let _ = (kind, callable);

        Emitter {
            backend: Arc::clone(&self.backend),
            threshold: self.threshold,
            severity,
            separator: Arc::clone(&self.separator),
        }
    }
}

impl fmt::Debug for Ulog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ulog")
            .field("threshold", &self.threshold)
            .field("separator", &self.separator)
            .finish_non_exhaustive()
    }
}

/// Per-layer handle on the backend with the gate decision baked in.
#[derive(Clone)]
pub(crate) struct Emitter {
    backend: Arc<dyn LogBackend>,
    threshold: Severity,
    severity: Severity,
    separator: Arc<str>,
}

impl Emitter {
    /// Equal to the threshold passes.
    pub(crate) fn enabled(&self) -> bool {
        let enabled = self.severity >= self.threshold;
        #[cfg(feature = "telemetry")]
        {
            if !enabled {
                trace!(
                    target: "ulog::engine",
                    severity = %self.severity,
                    threshold = %self.threshold,
                    "Gate closed"
                );
            }
        }
        enabled
    }

    pub(crate) fn separator(&self) -> &str {
        &self.separator
    }

    pub(crate) fn emit(&self, message: &str, include_trace: bool) {
        self.backend.log(self.severity, message, include_trace);
    }
}

impl fmt::Debug for Emitter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Emitter")
            .field("threshold", &self.threshold)
            .field("severity", &self.severity)
            .finish_non_exhaustive()
    }
}
