// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Core type definitions shared by the resolver, templates and layers.

use std::fmt;
use std::str::FromStr;

use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Ordered classification of a log record's importance.
///
/// Variants are declared lowest first so the derived ordering follows the
/// numeric rank: `Critical > Error > Warning > Info > Debug > NotSet`.
///
/// Accepts names (see [`FromStr`]) or exact numeric ranks such as `30`, both
/// when parsed and when deserialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    NotSet,
    Debug,
    Info,
    Warning,
    Error,
    Critical,
}

impl Severity {
    /// All severities, lowest first.
    pub const ALL: [Severity; 6] = [
        Severity::NotSet,
        Severity::Debug,
        Severity::Info,
        Severity::Warning,
        Severity::Error,
        Severity::Critical,
    ];

    /// Numeric rank, compatible with the conventional 0..=50 logging scale.
    pub fn rank(self) -> u8 {
        match self {
            Self::NotSet => 0,
            Self::Debug => 10,
            Self::Info => 20,
            Self::Warning => 30,
            Self::Error => 40,
            Self::Critical => 50,
        }
    }

    /// Look up a severity by its exact numeric rank.
    pub fn from_rank(rank: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.rank() == rank)
    }

    /// Lowercase name used in config files and log fields.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NotSet => "notset",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
            Self::Critical => "critical",
        }
    }
}

impl Default for Severity {
    fn default() -> Self {
        Self::NotSet
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(rank) = s.parse::<u8>() {
            return Self::from_rank(rank).ok_or_else(|| format!("unknown severity rank {rank}"));
        }
        match s.to_lowercase().as_str() {
            "critical" => Ok(Self::Critical),
            "error" => Ok(Self::Error),
            "warning" | "warn" => Ok(Self::Warning),
            "info" => Ok(Self::Info),
            "debug" => Ok(Self::Debug),
            "notset" | "not_set" | "none" => Ok(Self::NotSet),
            other => Err(format!("unknown severity '{other}'")),
        }
    }
}

impl<'de> Deserialize<'de> for Severity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Rank(u8),
            Name(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Rank(rank) => Self::from_rank(rank)
                .ok_or_else(|| de::Error::custom(format!("unknown severity rank {rank}"))),
            Raw::Name(name) => name.parse().map_err(de::Error::custom),
        }
    }
}

/// Concrete arguments supplied at one call site.
///
/// Keyword arguments keep their call order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Arguments {
    positional: Vec<Value>,
    keyword: Map<String, Value>,
}

impl Arguments {
    /// Create an empty argument list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create arguments from positional values only.
    pub fn from_positional<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self {
            positional: values.into_iter().map(Into::into).collect(),
            keyword: Map::new(),
        }
    }

    /// Append a positional value.
    pub fn with_positional(mut self, value: impl Into<Value>) -> Self {
        self.positional.push(value.into());
        self
    }

    /// Add or replace a keyword value.
    pub fn with_keyword(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.keyword.insert(name.into(), value.into());
        self
    }

    /// Positional values, in call order.
    pub fn positional(&self) -> &[Value] {
        &self.positional
    }

    /// Keyword values, in call order.
    pub fn keyword(&self) -> &Map<String, Value> {
        &self.keyword
    }

    /// Look up a keyword value by name.
    pub fn get_keyword(&self, name: &str) -> Option<&Value> {
        self.keyword.get(name)
    }

    /// Total number of supplied values.
    pub fn len(&self) -> usize {
        self.positional.len() + self.keyword.len()
    }

    /// Check if no values were supplied.
    pub fn is_empty(&self) -> bool {
        self.positional.is_empty() && self.keyword.is_empty()
    }
}

/// Build [`Arguments`] from positional expressions followed by `name = value`
/// keyword pairs. Every value goes through `serde_json::json!`.
///
/// ```
/// use ulog::args;
///
/// let call = args![3, "v1"; kw1 = "v2"];
/// assert_eq!(call.positional().len(), 2);
/// assert_eq!(call.get_keyword("kw1"), Some(&serde_json::json!("v2")));
/// ```
#[macro_export]
macro_rules! args {
    () => {
        $crate::Arguments::new()
    };
    ($($pos:expr),+ $(,)?) => {
        $crate::Arguments::new()
            $(.with_positional($crate::serde_json::json!($pos)))+
    };
    ($($pos:expr),* ; $($name:ident = $val:expr),+ $(,)?) => {
        $crate::Arguments::new()
            $(.with_positional($crate::serde_json::json!($pos)))*
            $(.with_keyword(stringify!($name), $crate::serde_json::json!($val)))+
    };
}

/// Render a value the way it appears in log lines.
///
/// Strings are written without quotes, everything else as compact JSON.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Strip module paths from a Rust type name, keeping generic structure.
///
/// `alloc::boxed::Box<dyn core::error::Error>` becomes `Box<dyn Error>`.
pub fn short_type_name(full: &str) -> String {
    let mut out = String::with_capacity(full.len());
    let mut start = 0;
    for (i, c) in full.char_indices() {
        if c.is_alphanumeric() || c == '_' || c == ':' {
            continue;
        }
        push_last_segment(&mut out, &full[start..i]);
        out.push(c);
        start = i + c.len_utf8();
    }
    push_last_segment(&mut out, &full[start..]);
    out
}

fn push_last_segment(out: &mut String, path: &str) {
    out.push_str(path.rsplit("::").next().unwrap_or(path));
}
