// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Post-call return value logging.

use std::fmt;

use super::context::{CallContext, LayerKind};
use super::engine::{Emitter, Ulog};
use super::Function;
use crate::error::{CallError, UlogError};
use crate::signature::Signature;
use crate::template::Template;
use crate::types::{Arguments, Severity};

/// Default message for [`LogReturn`].
pub const DEFAULT_RETURN_TEMPLATE: &str = "Call: \"{callable_name}\" returned value \"{return_value}\"";

/// Options for [`LogReturn`].
#[derive(Debug, Clone)]
pub struct ReturnConfig {
    template: String,
    severity: Severity,
}

impl Default for ReturnConfig {
    fn default() -> Self {
        Self {
            template: DEFAULT_RETURN_TEMPLATE.to_string(),
            severity: Severity::Debug,
        }
    }
}

impl ReturnConfig {
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
}

/// Layer that logs the value a callable returned.
///
/// The value is only formatted through `Display`; the caller receives the
/// original value.
#[derive(Debug)]
pub struct LogReturn<F> {
    inner: F,
    emitter: Emitter,
    display_name: String,
    template: Template,
}

impl<F> LogReturn<F>
where
    F: Function,
    F::Output: fmt::Display,
{
    pub(crate) fn new(inner: F, ulog: &Ulog, config: ReturnConfig) -> Result<Self, UlogError> {
        let template = Template::parse(config.template)?;
        LayerKind::Return.validate(&template, inner.signature())?;

        let display_name = inner.signature().display_name();
        let emitter = ulog.emitter(LayerKind::Return, &display_name, config.severity);
        Ok(Self {
            inner,
            emitter,
            display_name,
            template,
        })
    }

    /// The wrapped callable.
    pub fn inner(&self) -> &F {
        &self.inner
    }
}

impl<F> Function for LogReturn<F>
where
    F: Function,
    F::Output: fmt::Display,
{
    type Output = F::Output;
    type Error = F::Error;

    fn signature(&self) -> &Signature {
        self.inner.signature()
    }

    fn invoke(&self, args: &Arguments) -> Result<F::Output, CallError<F::Error>> {
        let value = self.inner.invoke(args)?;
        if self.emitter.enabled() {
            let message = CallContext::new(self.inner.signature(), &self.display_name, args)
                .returned(value.to_string())
                .render(&self.template)?;
            self.emitter.emit(&message, false);
        }
        Ok(value)
    }
}
