// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! ulog - call logging decorators.
//!
//! Wraps any callable with layers that log its arguments, its return value
//! or its failures, without changing what the callable returns.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - [`types`] - Severity levels and call-site arguments
//! - [`error`] - Error types and result aliases
//! - [`signature`] - Parameter descriptors for wrapped callables
//! - [`resolver`] - Resolution of a parameter's value at one call site
//! - [`template`] - Message templates with `{placeholder}` substitution
//! - [`instrument`] - The engine, the [`Function`] trait and the logging layers
//! - [`backend`] - Sinks that receive formatted records
//! - [`config`] - Configuration loading and merging
//! - [`telemetry`] - Subscriber setup for binaries
//!
//! # Example
//!
//! ```rust
//! use ulog::{args, Arguments, CallError, ExceptionConfig, Func, Function, Instrument,
//!            MemoryBackend, Severity, Signature, Ulog};
//!
//! let backend = MemoryBackend::new();
//! let ulog = Ulog::new(backend.clone()).with_threshold(Severity::Warning);
//!
//! let sig = Signature::function("parse_port").param("raw").build()?;
//! let parse_port = Func::new(sig, |call: &Arguments| {
//!     let raw = call.positional()[0].as_str().unwrap_or_default();
//!     raw.parse::<u16>().map_err(|e| e.to_string())
//! })
//! .log_exception(&ulog, ExceptionConfig::default().with_template("{raw}: {exception}"))?;
//!
//! assert_eq!(parse_port.invoke(&args!["8080"]).unwrap(), 8080);
//! assert!(matches!(parse_port.invoke(&args!["http"]), Err(CallError::Raised(_))));
//! assert_eq!(backend.messages(), vec!["http: invalid digit found in string"]);
//! # Ok::<(), ulog::UlogError>(())
//! ```

pub mod backend;
pub mod config;
pub mod error;
pub mod instrument;
pub mod resolver;
pub mod signature;
pub mod telemetry;
pub mod template;
pub mod types;

#[doc(hidden)]
pub use serde_json;

// Re-export commonly used types at crate root
pub use backend::{LogBackend, MemoryBackend, Record, TracingBackend};
pub use config::{load_config, ConfigOverrides, ResolvedConfig};
pub use error::{CallError, ConfigError, Result, TemplateError, UlogError};
pub use instrument::{
    ArgsConfig, CallConfig, CallContext, ExceptionConfig, Func, Function, Instrument, LogArgs,
    LogCall, LogException, LogReturn, ReturnConfig, TypedFunc, Ulog,
};
pub use resolver::resolve;
pub use signature::{Signature, SignatureBuilder};
pub use template::Template;
pub use types::{Arguments, Severity};

/// ulog version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
