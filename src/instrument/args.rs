// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Pre-call argument logging.

use std::fmt::Write as _;

use serde_json::Value;

use super::context::{CallContext, LayerKind};
use super::engine::{Emitter, Ulog};
use super::Function;
use crate::error::{CallError, UlogError};
use crate::resolver::resolve;
use crate::signature::Signature;
use crate::template::Template;
use crate::types::{display_value, Arguments, Severity};

/// Default message for [`LogArgs`].
pub const DEFAULT_ARGS_TEMPLATE: &str = "Call: \"{callable_name}\" called with arguments";

/// Options for [`LogArgs`].
#[derive(Debug, Clone)]
pub struct ArgsConfig {
    template: String,
    severity: Severity,
    arguments: Option<Vec<String>>,
}

impl Default for ArgsConfig {
    fn default() -> Self {
        Self {
            template: DEFAULT_ARGS_TEMPLATE.to_string(),
            severity: Severity::Debug,
            arguments: None,
        }
    }
}

impl ArgsConfig {
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

    /// Log only the named parameters, in this order. An empty list means
    /// "log everything that was passed".
    pub fn with_arguments<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        self.arguments = if names.is_empty() { None } else { Some(names) };
        self
    }
}

/// Layer that logs a callable's arguments before running it.
#[derive(Debug)]
pub struct LogArgs<F> {
    inner: F,
    emitter: Emitter,
    display_name: String,
    template: Template,
    arguments: Option<Vec<String>>,
}

impl<F: Function> LogArgs<F> {
    pub(crate) fn new(inner: F, ulog: &Ulog, config: ArgsConfig) -> Result<Self, UlogError> {
        let signature = inner.signature();
        let template = Template::parse(config.template)?;
        LayerKind::Args.validate(&template, signature)?;

        if let Some(names) = &config.arguments {
            if let Some(unknown) = names.iter().find(|name| !signature.declares(name)) {
                return Err(UlogError::UnknownParameter {
                    name: unknown.clone(),
                });
            }
        }

        let display_name = signature.display_name();
        let emitter = ulog.emitter(LayerKind::Args, &display_name, config.severity);
        Ok(Self {
            inner,
            emitter,
            display_name,
            template,
            arguments: config.arguments,
        })
    }

    /// The wrapped callable.
    pub fn inner(&self) -> &F {
        &self.inner
    }

    /// Build the full message for one call.
    fn message(&self, args: &Arguments) -> Result<String, UlogError> {
        let signature = self.inner.signature();
        let mut message =
            CallContext::new(signature, &self.display_name, args).render(&self.template)?;
        let separator = self.emitter.separator();

        match &self.arguments {
            Some(names) => {
                for name in names {
                    let value = resolve(name, signature, args)?;
                    push_pair(&mut message, separator, name, value);
                }
            }
            None => {
                for (name, value) in passed_arguments(signature, args)? {
                    push_pair(&mut message, separator, name, value);
                }
            }
        }
        Ok(message)
    }
}

/// Positional values by declared name, then keyword values in call order.
/// Defaults are never consulted.
fn passed_arguments<'a>(
    signature: &'a Signature,
    args: &'a Arguments,
) -> Result<Vec<(&'a str, &'a Value)>, UlogError> {
    let params = signature.params();
    if args.positional().len() > params.len() {
        return Err(UlogError::TooManyArguments {
            expected: params.len(),
            given: args.positional().len(),
        });
    }

    let positional = params
        .iter()
        .map(String::as_str)
        .zip(args.positional().iter());
    let keyword = args.keyword().iter().map(|(name, value)| (name.as_str(), value));
    Ok(positional.chain(keyword).collect())
}

fn push_pair(message: &mut String, separator: &str, name: &str, value: &Value) {
    let _ = write!(message, "{separator}{name}: {}", display_value(value));
}

impl<F: Function> Function for LogArgs<F> {
    type Output = F::Output;
    type Error = F::Error;

    fn signature(&self) -> &Signature {
        self.inner.signature()
    }

    fn invoke(&self, args: &Arguments) -> Result<F::Output, CallError<F::Error>> {
        if self.emitter.enabled() {
            let message = self.message(args)?;
            self.emitter.emit(&message, false);
        }
        self.inner.invoke(args)
    }
}
