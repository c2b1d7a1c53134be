// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Per-invocation call context used to render message templates.

use std::borrow::Cow;

use crate::error::UlogError;
use crate::resolver::resolve;
use crate::signature::Signature;
use crate::template::Template;
use crate::types::{display_value, Arguments};

/// Which layer a template belongs to. Decides the built-in placeholders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LayerKind {
    Args,
    Call,
    Return,
    Exception,
}

impl LayerKind {
    #[cfg(any(test, feature = "telemetry"))]
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Self::Args => "log_args",
            Self::Call => "log_call",
            Self::Return => "log_return",
            Self::Exception => "log_exception",
        }
    }

    fn provides(self, name: &str, signature: &Signature) -> bool {
        match name {
            "callable_name" | "func_name" => true,
            "class_name" => signature.owner().is_some(),
            "return_value" => self == Self::Return,
            "exception_type" | "exception" => self == Self::Exception,
            _ => false,
        }
    }

    /// Check every placeholder in `template` against the built-ins of this
    /// layer and the parameters declared by `signature`.
    pub(crate) fn validate(self, template: &Template, signature: &Signature) -> Result<(), UlogError> {
        template.validate(|name| self.provides(name, signature) || signature.declares(name))
    }
}

#[derive(Debug, Clone)]
enum Outcome {
    Pending,
    Returned(String),
    Raised { type_name: String, message: String },
}

/// Data available to a template during one wrapped invocation.
#[derive(Debug, Clone)]
pub struct CallContext<'a> {
    signature: &'a Signature,
    display_name: &'a str,
    args: &'a Arguments,
    outcome: Outcome,
}

impl<'a> CallContext<'a> {
    /// Context for a call that has not run yet.
    pub fn new(signature: &'a Signature, display_name: &'a str, args: &'a Arguments) -> Self {
        Self {
            signature,
            display_name,
            args,
            outcome: Outcome::Pending,
        }
    }

    /// Attach the stringified return value.
    pub fn returned(mut self, value: String) -> Self {
        self.outcome = Outcome::Returned(value);
        self
    }

    /// Attach the failure type name and its message.
    pub fn raised(mut self, type_name: String, message: String) -> Self {
        self.outcome = Outcome::Raised { type_name, message };
        self
    }

    /// Callable name as shown in messages.
    pub fn display_name(&self) -> &str {
        self.display_name
    }

    /// Arguments of this invocation.
    pub fn args(&self) -> &Arguments {
        self.args
    }

    /// Value of one placeholder.
    pub fn lookup(&self, key: &str) -> Result<Cow<'_, str>, UlogError> {
        match (key, &self.outcome) {
            ("callable_name", _) => Ok(Cow::Borrowed(self.display_name)),
            ("func_name", _) => Ok(Cow::Borrowed(self.signature.name())),
            ("class_name", _) if self.signature.owner().is_some() => {
                Ok(Cow::Borrowed(self.signature.owner().unwrap_or_default()))
            }
            ("return_value", Outcome::Returned(value)) => Ok(Cow::Borrowed(value)),
            ("exception_type", Outcome::Raised { type_name, .. }) => Ok(Cow::Borrowed(type_name)),
            ("exception", Outcome::Raised { message, .. }) => Ok(Cow::Borrowed(message)),
            (name, _) => match resolve(name, self.signature, self.args) {
                Ok(value) => Ok(Cow::Owned(display_value(value))),
                Err(UlogError::UnknownParameter { name }) => Err(UlogError::UnknownPlaceholder { name }),
                Err(err) => Err(err),
            },
        }
    }

    /// Render `template` against this context.
    pub fn render(&self, template: &Template) -> Result<String, UlogError> {
        template.render(|name| self.lookup(name))
    }
}
