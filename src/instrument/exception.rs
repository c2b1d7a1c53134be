// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Failure logging.

use std::any::{type_name, Any};
use std::fmt;
use std::panic::{self, AssertUnwindSafe};

use super::context::{CallContext, LayerKind};
use super::engine::{Emitter, Ulog};
use super::Function;
use crate::error::{CallError, UlogError};
use crate::signature::Signature;
use crate::template::Template;
use crate::types::{short_type_name, Arguments, Severity};

/// Default message for [`LogException`].
pub const DEFAULT_EXCEPTION_TEMPLATE: &str =
    "Call: \"{callable_name}\" raised exception of type {exception_type}";

/// Type name reported for a caught panic.
const PANIC_TYPE_NAME: &str = "panic";

/// Options for [`LogException`].
#[derive(Debug, Clone)]
pub struct ExceptionConfig {
    template: String,
    severity: Severity,
    include_trace: bool,
    catch_panics: bool,
}

impl Default for ExceptionConfig {
    fn default() -> Self {
        Self {
            template: DEFAULT_EXCEPTION_TEMPLATE.to_string(),
            severity: Severity::Error,
            include_trace: true,
            catch_panics: true,
        }
    }
}

impl ExceptionConfig {
    /// Set the message template.
    pub fn with_template(mut self, template: impl Into<String>) -> Self {
        self.template = template.into();
        self
    }

    /// Set the severity records are emitted at.
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// Ask the backend to attach a backtrace.
    pub fn with_trace(mut self, include_trace: bool) -> Self {
        self.include_trace = include_trace;
        self
    }

    /// Log panics too. The panic is resumed after logging.
    pub fn with_panics(mut self, catch_panics: bool) -> Self {
        self.catch_panics = catch_panics;
        self
    }
}

/// Layer that logs every failure of the wrapped callable and hands it back
/// untouched.
///
/// Only [`CallError::Raised`] failures are logged. Instrumentation errors
/// from inner layers pass through as they are.
#[derive(Debug)]
pub struct LogException<F> {
    inner: F,
    emitter: Emitter,
    display_name: String,
    template: Template,
    include_trace: bool,
    catch_panics: bool,
}

impl<F> LogException<F>
where
    F: Function,
    F::Error: fmt::Display,
{
    pub(crate) fn new(inner: F, ulog: &Ulog, config: ExceptionConfig) -> Result<Self, UlogError> {
        let template = Template::parse(config.template)?;
        LayerKind::Exception.validate(&template, inner.signature())?;

        let display_name = inner.signature().display_name();
        let emitter = ulog.emitter(LayerKind::Exception, &display_name, config.severity);
        Ok(Self {
            inner,
            emitter,
            display_name,
            template,
            include_trace: config.include_trace,
            catch_panics: config.catch_panics,
        })
    }

    /// The wrapped callable.
    pub fn inner(&self) -> &F {
        &self.inner
    }

    /// Render and emit one failure record.
    ///
    /// Exactly one record is emitted per failure. When the template cannot be
    /// rendered for this call, a fallback message naming the callable, the
    /// failure and the render error is emitted instead.
    fn report(&self, args: &Arguments, type_name: String, message: String) {
        let rendered = CallContext::new(self.inner.signature(), &self.display_name, args)
            .raised(type_name.clone(), message.clone())
            .render(&self.template);
        let record = match rendered {
            Ok(record) => record,
            Err(err) => {
                #[cfg(feature = "telemetry")]
                tracing::warn!(
                    target: "ulog::engine",
                    callable = %self.display_name,
                    error = %err,
                    "Failed to render exception message, using fallback"
                );
                fallback_message(&self.display_name, &type_name, &message, &err)
            }
        };
        self.emitter.emit(&record, self.include_trace);
    }
}

fn fallback_message(callable: &str, type_name: &str, message: &str, err: &UlogError) -> String {
    format!(
        "Call: \"{callable}\" raised exception of type {type_name}: {message} (template error: {err})"
    )
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "Box<dyn Any>".to_string()
    }
}

impl<F> Function for LogException<F>
where
    F: Function,
    F::Error: fmt::Display,
{
    type Output = F::Output;
    type Error = F::Error;

    fn signature(&self) -> &Signature {
        self.inner.signature()
    }

    fn invoke(&self, args: &Arguments) -> Result<F::Output, CallError<F::Error>> {
        if !self.emitter.enabled() {
            return self.inner.invoke(args);
        }

        let result = if self.catch_panics {
            match panic::catch_unwind(AssertUnwindSafe(|| self.inner.invoke(args))) {
                Ok(result) => result,
                Err(payload) => {
                    self.report(args, PANIC_TYPE_NAME.to_string(), panic_message(&*payload));
                    panic::resume_unwind(payload);
                }
            }
        } else {
            self.inner.invoke(args)
        };

        if let Err(CallError::Raised(err)) = &result {
            let type_name = short_type_name(type_name::<F::Error>());
            self.report(args, type_name, err.to_string());
        }
        result
    }
}
