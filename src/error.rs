// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Error types for ulog.
//!
//! Instrumentation keeps two kinds of failure apart: configuration mistakes
//! made when decorating a callable ([`UlogError`]) and the callable's own
//! failures, which are carried through [`CallError::Raised`] untouched.

use thiserror::Error;

/// Errors raised while parsing a message template.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    #[error("Unmatched '{{' at offset {offset}")]
    UnmatchedOpen { offset: usize },

    #[error("Unmatched '}}' at offset {offset}")]
    UnmatchedClose { offset: usize },

    #[error("Invalid placeholder: {{{name}}}")]
    InvalidPlaceholder { name: String },
}

/// Configuration errors surfaced by the instrumentation engine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UlogError {
    #[error("Unknown argument {name}")]
    UnknownParameter { name: String },

    #[error("Caller didn't provide a required positional parameter '{name}' at index {index}")]
    MissingArgument { name: String, index: usize },

    #[error("Too many positional arguments: expected at most {expected}, got {given}")]
    TooManyArguments { expected: usize, given: usize },

    #[error("Argument '{name}' supplied both positionally and by keyword")]
    DuplicateArgument { name: String },

    #[error("Unknown placeholder in message template: {{{name}}}")]
    UnknownPlaceholder { name: String },

    #[error("Template error: {0}")]
    Template(#[from] TemplateError),

    #[error("Invalid signature: {0}")]
    InvalidSignature(String),

    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),
}

impl UlogError {
    /// Check if this error names a parameter the callable does not declare.
    pub fn is_unknown_parameter(&self) -> bool {
        matches!(self, Self::UnknownParameter { .. })
    }

    /// Check if this error names a declared parameter that was never supplied.
    pub fn is_missing_argument(&self) -> bool {
        matches!(self, Self::MissingArgument { .. })
    }
}

/// Outcome of a failed instrumented call.
///
/// `Raised` carries the wrapped callable's own error value exactly as it was
/// returned. `Instrumentation` is produced only by a logging layer.
#[derive(Error, Debug, PartialEq)]
pub enum CallError<E> {
    #[error("{0}")]
    Raised(E),

    #[error("Instrumentation error: {0}")]
    Instrumentation(UlogError),
}

impl<E> CallError<E> {
    /// The wrapped callable's error, if this is one.
    pub fn raised(&self) -> Option<&E> {
        match self {
            Self::Raised(err) => Some(err),
            Self::Instrumentation(_) => None,
        }
    }

    /// Consume and return the wrapped callable's error, if this is one.
    pub fn into_raised(self) -> Option<E> {
        match self {
            Self::Raised(err) => Some(err),
            Self::Instrumentation(_) => None,
        }
    }

    /// The instrumentation error, if this is one.
    pub fn instrumentation(&self) -> Option<&UlogError> {
        match self {
            Self::Raised(_) => None,
            Self::Instrumentation(err) => Some(err),
        }
    }

    /// Check if the failure came from the wrapped callable.
    pub fn is_raised(&self) -> bool {
        matches!(self, Self::Raised(_))
    }
}

impl<E> From<UlogError> for CallError<E> {
    fn from(err: UlogError) -> Self {
        Self::Instrumentation(err)
    }
}

/// Errors that can occur during configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config file not found: {0}")]
    NotFound(String),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },

    #[error("IO error reading config: {0}")]
    IoError(String),

    #[error("YAML parsing error: {0}")]
    YamlError(String),

    #[error("JSON parsing error: {0}")]
    JsonError(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => Self::NotFound(err.to_string()),
            _ => Self::IoError(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        Self::JsonError(err.to_string())
    }
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::YamlError(err.to_string())
    }
}

/// Result type alias using anyhow for flexible error handling.
pub type Result<T> = anyhow::Result<T>;
