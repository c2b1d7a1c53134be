// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Pre-call announcement.

use super::context::{CallContext, LayerKind};
use super::engine::{Emitter, Ulog};
use super::Function;
use crate::error::{CallError, UlogError};
use crate::signature::Signature;
use crate::template::Template;
use crate::types::{Arguments, Severity};

/// Default message for [`LogCall`].
pub const DEFAULT_CALL_TEMPLATE: &str = "Call: \"{callable_name}\"";

/// Options for [`LogCall`].
#[derive(Debug, Clone)]
pub struct CallConfig {
    template: String,
    severity: Severity,
}

impl Default for CallConfig {
    fn default() -> Self {
        Self {
            template: DEFAULT_CALL_TEMPLATE.to_string(),
            severity: Severity::Debug,
        }
    }
}

impl CallConfig {
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

/// Layer that emits one record before every call.
#[derive(Debug)]
pub struct LogCall<F> {
    inner: F,
    emitter: Emitter,
    display_name: String,
    template: Template,
}

impl<F: Function> LogCall<F> {
    pub(crate) fn new(inner: F, ulog: &Ulog, config: CallConfig) -> Result<Self, UlogError> {
        let template = Template::parse(config.template)?;
        LayerKind::Call.validate(&template, inner.signature())?;

        let display_name = inner.signature().display_name();
        let emitter = ulog.emitter(LayerKind::Call, &display_name, config.severity);
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

impl<F: Function> Function for LogCall<F> {
    type Output = F::Output;
    type Error = F::Error;

    fn signature(&self) -> &Signature {
        self.inner.signature()
    }

    fn invoke(&self, args: &Arguments) -> Result<F::Output, CallError<F::Error>> {
        if self.emitter.enabled() {
            let message = CallContext::new(self.inner.signature(), &self.display_name, args)
                .render(&self.template)?;
            self.emitter.emit(&message, false);
        }
        self.inner.invoke(args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args;
    use crate::backend::MemoryBackend;
    use crate::instrument::Func;

    type Body = fn(&Arguments) -> Result<i64, String>;

    fn deposit() -> Func<Body> {
        let sig = Signature::method("Account", "deposit")
            .param("amount")
            .build()
            .unwrap();
        let body: Body = |call| Ok(call.positional()[0].as_i64().unwrap_or(0));
        Func::new(sig, body)
    }

    #[test]
    fn test_log_call_default_message_uses_qualified_name() {
        let backend = MemoryBackend::new();
        let ulog = Ulog::new(backend.clone()).with_threshold(Severity::Debug);
        let f = ulog.log_call(deposit(), CallConfig::default()).unwrap();

        assert_eq!(f.invoke(&args![5]).unwrap(), 5);
        assert_eq!(backend.messages(), vec!["Call: \"Account.deposit\""]);
    }

    #[test]
    fn test_log_call_class_and_func_placeholders() {
        let backend = MemoryBackend::new();
        let ulog = Ulog::new(backend.clone()).with_threshold(Severity::Debug);
        let f = ulog
            .log_call(
                deposit(),
                CallConfig::default()
                    .with_template("{class_name}::{func_name}({amount})")
                    .with_severity(Severity::Info),
            )
            .unwrap();

        f.invoke(&args![12]).unwrap();
        assert_eq!(backend.messages(), vec!["Account::deposit(12)"]);
        assert_eq!(backend.records()[0].severity, Severity::Info);
    }

    #[test]
    fn test_log_call_gate_closed() {
        let backend = MemoryBackend::new();
        let ulog = Ulog::new(backend.clone());
        let f = ulog.log_call(deposit(), CallConfig::default()).unwrap();

        assert_eq!(f.invoke(&args![3]).unwrap(), 3);
        assert!(backend.is_empty());
    }

    #[test]
    fn test_log_call_rejects_bad_template() {
        let ulog = Ulog::new(MemoryBackend::new());
        let err = ulog
            .log_call(deposit(), CallConfig::default().with_template("{return_value}"))
            .unwrap_err();
        assert!(matches!(err, UlogError::UnknownPlaceholder { .. }));

        let err = ulog
            .log_call(deposit(), CallConfig::default().with_template("{oops"))
            .unwrap_err();
        assert!(matches!(err, UlogError::Template(_)));
    }
}
