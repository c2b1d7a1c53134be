// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Logging backends.
//!
//! The instrumentation engine never writes output itself. Every formatted
//! message is handed to a [`LogBackend`], which decides how to record it.
//!
//! - [`TracingBackend`] - forwards records to `tracing` events
//! - [`MemoryBackend`] - keeps records in memory for inspection and tests

mod memory;
mod trace;

pub use memory::{MemoryBackend, Record};
pub use trace::{level_for, TracingBackend};

use crate::types::Severity;

/// Sink for fully formatted log messages.
///
/// Implementations must not reformat `message`. When `include_trace` is set
/// the record comes from a failure path and the backend should attach stack
/// context. Thread-safety of emission is the backend's responsibility.
#[cfg_attr(test, mockall::automock)]
pub trait LogBackend: Send + Sync {
    /// Record one message.
    fn log(&self, severity: Severity, message: &str, include_trace: bool);
}

impl<T: LogBackend + ?Sized> LogBackend for std::sync::Arc<T> {
    fn log(&self, severity: Severity, message: &str, include_trace: bool) {
        (**self).log(severity, message, include_trace)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockall::predicate::eq;
    use std::sync::Arc;

    #[test]
    fn test_arc_forwards_to_inner_backend() {
        let mut mock = MockLogBackend::new();
        mock.expect_log()
            .with(eq(Severity::Warning), eq("low disk"), eq(true))
            .times(1)
            .return_const(());

        let shared = Arc::new(mock);
        LogBackend::log(&shared, Severity::Warning, "low disk", true);
    }

    #[test]
    fn test_trait_object_through_arc() {
        let memory = MemoryBackend::new();
        let shared: Arc<dyn LogBackend> = Arc::new(memory.clone());
        shared.log(Severity::Debug, "one", false);
        Arc::clone(&shared).log(Severity::Info, "two", false);
        assert_eq!(memory.messages(), vec!["one", "two"]);
    }
}
