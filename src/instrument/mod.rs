// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Call instrumentation.
//!
//! This module defines the abstractions for wrapping a callable with logging
//! without touching its body:
//!
//! - [`Function`] trait - the invocation contract every callable and every
//!   layer implements
//! - [`Func`] / [`TypedFunc`] - adapters turning closures into [`Function`]s
//! - [`Ulog`] - the engine holding backend, threshold and separator
//! - [`LogArgs`], [`LogCall`], [`LogReturn`], [`LogException`] - the layers
//! - [`Instrument`] - extension trait for chaining layers
//!
//! # Example
//!
//! ```
//! use ulog::{args, Arguments, ArgsConfig, ExceptionConfig, Func, Function, Instrument,
//!            MemoryBackend, ReturnConfig, Severity, Signature, Ulog};
//!
//! let backend = MemoryBackend::new();
//! let ulog = Ulog::new(backend.clone()).with_threshold(Severity::Debug);
//!
//! let signature = Signature::function("double").param("x").build()?;
//! let double = Func::new(signature, |call: &Arguments| {
//!     call.positional()[0].as_i64().map(|x| x * 2).ok_or("not an integer")
//! })
//! .log_args(&ulog, ArgsConfig::default())?
//! .log_return(&ulog, ReturnConfig::default())?
//! .log_exception(&ulog, ExceptionConfig::default())?;
//!
//! assert_eq!(double.invoke(&args![21]).unwrap(), 42);
//! assert_eq!(backend.len(), 2);
//! # Ok::<(), ulog::UlogError>(())
//! ```

mod args;
mod call;
mod context;
mod engine;
mod exception;
mod returns;

pub use args::{ArgsConfig, LogArgs};
pub use call::{CallConfig, LogCall};
pub use context::CallContext;
pub use engine::Ulog;
pub use exception::{ExceptionConfig, LogException};
pub use returns::{LogReturn, ReturnConfig};

use std::fmt;
use std::marker::PhantomData;

use serde::de::DeserializeOwned;

use crate::error::{CallError, UlogError};
use crate::signature::Signature;
use crate::types::Arguments;

/// Invocation contract shared by callables and the layers wrapping them.
///
/// A layer keeps `Output` and `Error` of the callable it wraps and forwards
/// its [`Signature`], so wrapping never changes what a caller sees.
pub trait Function {
    /// Value returned on success.
    type Output;

    /// The callable's own failure type.
    type Error;

    /// Static description of the callable.
    fn signature(&self) -> &Signature;

    /// Run the callable with one set of arguments.
    fn invoke(&self, args: &Arguments) -> Result<Self::Output, CallError<Self::Error>>;
}

/// A closure over raw [`Arguments`], described by a [`Signature`].
pub struct Func<F> {
    signature: Signature,
    body: F,
}

impl<F, T, E> Func<F>
where
    F: Fn(&Arguments) -> Result<T, E>,
{
    /// Wrap `body` as a callable named by `signature`.
    pub fn new(signature: Signature, body: F) -> Self {
        Self { signature, body }
    }
}

impl<F, T, E> Function for Func<F>
where
    F: Fn(&Arguments) -> Result<T, E>,
{
    type Output = T;
    type Error = E;

    fn signature(&self) -> &Signature {
        &self.signature
    }

    fn invoke(&self, args: &Arguments) -> Result<T, CallError<E>> {
        (self.body)(args).map_err(CallError::Raised)
    }
}

impl<F> fmt::Debug for Func<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Func")
            .field("signature", &self.signature)
            .finish_non_exhaustive()
    }
}

/// A closure over a typed argument struct.
///
/// Arguments are bound through [`Signature::bind_as`] before the body runs,
/// so defaults apply and malformed calls fail as
/// [`CallError::Instrumentation`].
pub struct TypedFunc<A, F> {
    signature: Signature,
    body: F,
    _args: PhantomData<fn(A)>,
}

impl<A, F, T, E> TypedFunc<A, F>
where
    A: DeserializeOwned,
    F: Fn(A) -> Result<T, E>,
{
    /// Wrap `body` as a callable named by `signature`.
    pub fn new(signature: Signature, body: F) -> Self {
        Self {
            signature,
            body,
            _args: PhantomData,
        }
    }
}

impl<A, F, T, E> Function for TypedFunc<A, F>
where
    A: DeserializeOwned,
    F: Fn(A) -> Result<T, E>,
{
    type Output = T;
    type Error = E;

    fn signature(&self) -> &Signature {
        &self.signature
    }

    fn invoke(&self, args: &Arguments) -> Result<T, CallError<E>> {
        let bound = self.signature.bind_as::<A>(args)?;
        (self.body)(bound).map_err(CallError::Raised)
    }
}

impl<A, F> fmt::Debug for TypedFunc<A, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypedFunc")
            .field("signature", &self.signature)
            .finish_non_exhaustive()
    }
}

/// Fluent layering for any [`Function`].
pub trait Instrument: Function + Sized {
    /// See [`Ulog::log_args`].
    fn log_args(self, ulog: &Ulog, config: ArgsConfig) -> Result<LogArgs<Self>, UlogError> {
        ulog.log_args(self, config)
    }

    /// See [`Ulog::log_call`].
    fn log_call(self, ulog: &Ulog, config: CallConfig) -> Result<LogCall<Self>, UlogError> {
        ulog.log_call(self, config)
    }

    /// See [`Ulog::log_return`].
    fn log_return(self, ulog: &Ulog, config: ReturnConfig) -> Result<LogReturn<Self>, UlogError>
    where
        Self::Output: fmt::Display,
    {
        ulog.log_return(self, config)
    }

    /// See [`Ulog::log_exception`].
    fn log_exception(
        self,
        ulog: &Ulog,
        config: ExceptionConfig,
    ) -> Result<LogException<Self>, UlogError>
    where
        Self::Error: fmt::Display,
    {
        ulog.log_exception(self, config)
    }
}

impl<F: Function> Instrument for F {}
