// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Signature descriptors.
//!
//! A [`Signature`] is the static stand-in for runtime introspection: it names
//! the callable, lists its declared parameters in order and carries defaults
//! for the trailing ones. It is built once per instrumented target and shared
//! by every layer that wraps it.

use std::collections::HashSet;

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::UlogError;
use crate::resolver::resolve;
use crate::types::Arguments;

/// Static description of a callable's name and parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct Signature {
    name: String,
    owner: Option<String>,
    receiver: Option<String>,
    params: Vec<String>,
    defaults: Vec<Value>,
}

impl Signature {
    /// Start describing a free function.
    pub fn function(name: impl Into<String>) -> SignatureBuilder {
        SignatureBuilder::new(name.into(), None)
    }

    /// Start describing a method of `owner`. The receiver defaults to `self`
    /// and is never counted as a positional parameter.
    pub fn method(owner: impl Into<String>, name: impl Into<String>) -> SignatureBuilder {
        let mut builder = SignatureBuilder::new(name.into(), Some(owner.into()));
        builder.receiver = Some("self".to_string());
        builder
    }

    /// Bare callable name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Owning type name, when the callable is a method.
    pub fn owner(&self) -> Option<&str> {
        self.owner.as_deref()
    }

    /// Receiver name, when the callable is bound to an instance.
    pub fn receiver(&self) -> Option<&str> {
        self.receiver.as_deref()
    }

    /// Name used in log messages: `Type.name` for methods, `name` otherwise.
    pub fn display_name(&self) -> String {
        match &self.owner {
            Some(owner) => format!("{owner}.{}", self.name),
            None => self.name.clone(),
        }
    }

    /// Declared parameters in order, receiver excluded.
    pub fn params(&self) -> &[String] {
        &self.params
    }

    /// Index of a declared parameter, receiver excluded.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.params.iter().position(|p| p == name)
    }

    /// Check if a name is a declared parameter.
    pub fn declares(&self, name: &str) -> bool {
        self.index_of(name).is_some()
    }

    /// Default for the parameter at `index`, if it lies in the trailing
    /// defaulted window.
    pub fn default_at(&self, index: usize) -> Option<&Value> {
        let first_default = self.params.len() - self.defaults.len();
        index
            .checked_sub(first_default)
            .and_then(|offset| self.defaults.get(offset))
    }

    /// Number of parameters that carry a default.
    pub fn default_count(&self) -> usize {
        self.defaults.len()
    }

    /// Bind a call's arguments to every declared parameter.
    ///
    /// Returns an object in declaration order. Rejects extra positional
    /// values, unknown keywords and parameters supplied twice.
    pub fn bind(&self, args: &Arguments) -> Result<Map<String, Value>, UlogError> {
        if args.positional().len() > self.params.len() {
            return Err(UlogError::TooManyArguments {
                expected: self.params.len(),
                given: args.positional().len(),
            });
        }

        for name in args.keyword().keys() {
            match self.index_of(name) {
                None => return Err(UlogError::UnknownParameter { name: name.clone() }),
                Some(index) if index < args.positional().len() => {
                    return Err(UlogError::DuplicateArgument { name: name.clone() });
                }
                Some(_) => {}
            }
        }

        let mut bound = Map::new();
        for name in &self.params {
            let value = resolve(name, self, args)?;
            bound.insert(name.clone(), value.clone());
        }
        Ok(bound)
    }

    /// Bind a call's arguments and deserialize them into `T`.
    pub fn bind_as<T: DeserializeOwned>(&self, args: &Arguments) -> Result<T, UlogError> {
        let bound = self.bind(args)?;
        serde_json::from_value(Value::Object(bound)).map_err(|err| {
            UlogError::InvalidArguments(format!("{}: {err}", self.display_name()))
        })
    }
}

/// Builder for [`Signature`].
#[derive(Debug, Clone)]
pub struct SignatureBuilder {
    name: String,
    owner: Option<String>,
    receiver: Option<String>,
    params: Vec<(String, Option<Value>)>,
}

impl SignatureBuilder {
    fn new(name: String, owner: Option<String>) -> Self {
        Self {
            name,
            owner,
            receiver: None,
            params: Vec::new(),
        }
    }

    /// Rename the receiver (methods only).
    pub fn receiver(mut self, name: impl Into<String>) -> Self {
        self.receiver = Some(name.into());
        self
    }

    /// Declare a required parameter.
    pub fn param(mut self, name: impl Into<String>) -> Self {
        self.params.push((name.into(), None));
        self
    }

    /// Declare a parameter with a default value.
    pub fn param_with_default(mut self, name: impl Into<String>, default: impl Into<Value>) -> Self {
        self.params.push((name.into(), Some(default.into())));
        self
    }

    /// Validate and build the signature.
    ///
    /// Names must be non-empty and unique, and every parameter after the
    /// first defaulted one must also carry a default.
    pub fn build(self) -> Result<Signature, UlogError> {
        if self.name.trim().is_empty() {
            return Err(UlogError::InvalidSignature(
                "callable name must not be empty".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        if let Some(receiver) = &self.receiver {
            seen.insert(receiver.as_str());
        }

        let mut params = Vec::with_capacity(self.params.len());
        let mut defaults = Vec::new();
        for (name, default) in &self.params {
            if name.is_empty() {
                return Err(UlogError::InvalidSignature(format!(
                    "{}: parameter names must not be empty",
                    self.name
                )));
            }
            if !seen.insert(name.as_str()) {
                return Err(UlogError::InvalidSignature(format!(
                    "{}: duplicate parameter '{name}'",
                    self.name
                )));
            }
            match default {
                Some(value) => defaults.push(value.clone()),
                None if !defaults.is_empty() => {
                    return Err(UlogError::InvalidSignature(format!(
                        "{}: required parameter '{name}' follows a defaulted parameter",
                        self.name
                    )));
                }
                None => {}
            }
            params.push(name.clone());
        }

        Ok(Signature {
            name: self.name,
            owner: self.owner,
            receiver: self.receiver,
            params,
            defaults,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args;
    use serde::Deserialize;
    use serde_json::json;

    fn greet() -> Signature {
        Signature::function("greet")
            .param("p1")
            .param_with_default("kw1", "")
            .build()
            .unwrap()
    }

    #[test]
    fn test_function_signature() {
        let sig = greet();
        assert_eq!(sig.name(), "greet");
        assert_eq!(sig.display_name(), "greet");
        assert_eq!(sig.owner(), None);
        assert_eq!(sig.receiver(), None);
        assert_eq!(sig.params(), &["p1".to_string(), "kw1".to_string()]);
        assert_eq!(sig.default_count(), 1);
        assert_eq!(sig.default_at(0), None);
        assert_eq!(sig.default_at(1), Some(&json!("")));
        assert_eq!(sig.default_at(2), None);
    }

    #[test]
    fn test_method_signature() {
        let sig = Signature::method("Calculator", "divide")
            .param("x")
            .param("y")
            .build()
            .unwrap();
        assert_eq!(sig.display_name(), "Calculator.divide");
        assert_eq!(sig.receiver(), Some("self"));
        assert_eq!(sig.index_of("x"), Some(0));
        assert!(!sig.declares("self"));
    }

    #[test]
    fn test_build_rejects_required_after_default() {
        let err = Signature::function("f")
            .param_with_default("a", 1)
            .param("b")
            .build()
            .unwrap_err();
        assert!(matches!(err, UlogError::InvalidSignature(_)));
        assert!(err.to_string().contains("'b'"));
    }

    #[test]
    fn test_build_rejects_duplicates_and_empty_names() {
        assert!(Signature::function("f").param("a").param("a").build().is_err());
        assert!(Signature::function("").build().is_err());
        assert!(Signature::function("f").param("").build().is_err());
        assert!(Signature::method("T", "m").param("self").build().is_err());
        assert!(Signature::method("T", "m")
            .receiver("this")
            .param("self")
            .build()
            .is_ok());
    }

    #[test]
    fn test_bind_fills_defaults_in_declaration_order() {
        let bound = greet().bind(&args!["v1"]).unwrap();
        assert_eq!(Value::Object(bound), json!({"p1": "v1", "kw1": ""}));

        let bound = greet().bind(&args![; kw1 = "k", p1 = "p"]).unwrap();
        let names: Vec<&str> = bound.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["p1", "kw1"]);
    }

    #[test]
    fn test_bind_rejects_bad_calls() {
        let sig = greet();
        assert_eq!(
            sig.bind(&args!["a", "b", "c"]).unwrap_err(),
            UlogError::TooManyArguments { expected: 2, given: 3 }
        );
        assert_eq!(
            sig.bind(&args!["a"; p1 = "b"]).unwrap_err(),
            UlogError::DuplicateArgument { name: "p1".to_string() }
        );
        assert_eq!(
            sig.bind(&args!["a"; other = 1]).unwrap_err(),
            UlogError::UnknownParameter { name: "other".to_string() }
        );
        assert_eq!(
            sig.bind(&args![]).unwrap_err(),
            UlogError::MissingArgument { name: "p1".to_string(), index: 0 }
        );
    }

    #[test]
    fn test_bind_as_typed() {
        #[derive(Debug, Deserialize, PartialEq)]
        struct Greet {
            p1: String,
            kw1: String,
        }

        let typed: Greet = greet().bind_as(&args!["v1"; kw1 = "v2"]).unwrap();
        assert_eq!(
            typed,
            Greet {
                p1: "v1".to_string(),
                kw1: "v2".to_string()
            }
        );

        let err = greet().bind_as::<Greet>(&args![7]).unwrap_err();
        assert!(matches!(err, UlogError::InvalidArguments(_)));
    }
}
