// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! `tracing` backend.

use std::backtrace::Backtrace;

use tracing::Level;

use super::LogBackend;
use crate::types::Severity;

/// Emit one event at the `tracing` level matching `$severity`.
///
/// `tracing` needs the level at the callsite, so each arm expands its own event.
macro_rules! event_at {
    ($severity:expr, $($rest:tt)+) => {
        match $severity {
            Severity::Critical | Severity::Error => tracing::error!($($rest)+),
            Severity::Warning => tracing::warn!($($rest)+),
            Severity::Info => tracing::info!($($rest)+),
            Severity::Debug => tracing::debug!($($rest)+),
            Severity::NotSet => tracing::trace!($($rest)+),
        }
    };
}

/// The `tracing` level a severity is emitted at.
///
/// `tracing` has no level above `ERROR`, so `Critical` shares it; the original
/// severity is always recorded in the `severity` field.
pub fn level_for(severity: Severity) -> Level {
    match severity {
        Severity::Critical | Severity::Error => Level::ERROR,
        Severity::Warning => Level::WARN,
        Severity::Info => Level::INFO,
        Severity::Debug => Level::DEBUG,
        Severity::NotSet => Level::TRACE,
    }
}

/// Backend that turns each record into a `tracing` event with target `ulog`.
#[derive(Debug, Clone)]
pub struct TracingBackend {
    name: String,
}

impl TracingBackend {
    /// Create a backend that tags events with the given logger name.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Logger name recorded on every event.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Default for TracingBackend {
    fn default() -> Self {
        Self::new("root")
    }
}

impl LogBackend for TracingBackend {
    fn log(&self, severity: Severity, message: &str, include_trace: bool) {
        let logger = self.name.as_str();
        if include_trace {
            let backtrace = Backtrace::force_capture();
            event_at!(
                severity,
                target: "ulog",
                logger,
                severity = %severity,
                backtrace = %backtrace,
                "{}",
                message
            );
        } else {
            event_at!(
                severity,
                target: "ulog",
                logger,
                severity = %severity,
                "{}",
                message
            );
        }
    }
}
