// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! In-memory backend.

use std::sync::{Arc, Mutex, MutexGuard};

use super::LogBackend;
use crate::types::Severity;

/// One emitted log record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub severity: Severity,
    pub message: String,
    pub include_trace: bool,
}

/// Backend that stores every record it receives.
///
/// Clones share the same storage, so a handle kept by the caller observes
/// records emitted through the copy given to [`Ulog`](crate::Ulog).
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    records: Arc<Mutex<Vec<Record>>>,
}

impl MemoryBackend {
    /// Create an empty backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all records so far.
    pub fn records(&self) -> Vec<Record> {
        self.lock().clone()
    }

    /// Messages of all records so far.
    pub fn messages(&self) -> Vec<String> {
        self.lock().iter().map(|r| r.message.clone()).collect()
    }

    /// Number of records so far.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Check if nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Drop all records.
    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Record>> {
        // A panic while holding the lock leaves the vector intact.
        self.records.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl LogBackend for MemoryBackend {
    fn log(&self, severity: Severity, message: &str, include_trace: bool) {
        self.lock().push(Record {
            severity,
            message: message.to_string(),
            include_trace,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_backend_records() {
        let backend = MemoryBackend::new();
        assert!(backend.is_empty());

        backend.log(Severity::Info, "first", false);
        backend.log(Severity::Error, "second", true);

        assert_eq!(backend.len(), 2);
        assert_eq!(backend.messages(), vec!["first", "second"]);
        assert_eq!(
            backend.records()[1],
            Record {
                severity: Severity::Error,
                message: "second".to_string(),
                include_trace: true,
            }
        );
    }

    #[test]
    fn test_memory_backend_clones_share_storage() {
        let backend = MemoryBackend::new();
        let handle = backend.clone();
        backend.log(Severity::Debug, "shared", false);
        assert_eq!(handle.len(), 1);

        handle.clear();
        assert!(backend.is_empty());
    }
}
