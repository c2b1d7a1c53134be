// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Subscriber setup for applications using ulog.
//!
//! [`TracingBackend`](crate::TracingBackend) emits ordinary `tracing` events,
//! so nothing is printed until a subscriber is installed. Binaries call
//! [`init_telemetry`] once at startup:
//!
//! ```rust,ignore
//! use ulog::telemetry::{init_telemetry, TelemetryConfig};
//!
//! let _guard = init_telemetry(&TelemetryConfig::default())?;
//! ```
//!
//! Records are emitted under the `ulog` target and the crate's own
//! diagnostics under `ulog::engine`, so `RUST_LOG=ulog=debug` shows both.

mod init;

pub use init::{init_telemetry, TelemetryConfig, TelemetryGuard, TIMESTAMP_FORMAT};
