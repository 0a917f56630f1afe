//! Core types for the publishing pipeline.
//!
//! Each pipeline stage consumes the previous stage's output type and
//! returns a new value: [`RawParameter`] (author input) is normalized
//! into [`DeclaredParameter`] by validation, which becomes
//! [`ResolvedParameter`] once source references are filled in. No
//! stage mutates shared state.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use ssm_store::{GetParametersOutput, ParameterTier, ParameterType, PutOutcome, RemoteParameter};

/// A declared parameter value: a literal string, a string list, or an
/// arbitrary structured value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParameterValue {
    /// Plain string value.
    Text(String),
    /// List value, stored comma-joined under the `StringList` type.
    List(Vec<String>),
    /// Structured value, stored via the JSON convention.
    Structured(serde_json::Value),
}

impl ParameterValue {
    /// Serialize for storage under the given type.
    ///
    /// Plain strings pass through unchanged; lists comma-join when the
    /// target type is `StringList`; everything else uses JSON.
    pub fn serialize_for(&self, kind: ParameterType) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::List(items) if kind == ParameterType::StringList => items.join(","),
            Self::List(items) => serde_json::to_string(items).unwrap_or_default(),
            Self::Structured(value) => serde_json::to_string(value).unwrap_or_default(),
        }
    }

    /// Compare against a remotely stored string under the given type.
    ///
    /// Plain strings compare by exact equality. Lists and structured
    /// values deserialize the stored string first and compare
    /// structurally; a stored value that does not parse never matches.
    pub fn matches_stored(&self, stored: &str, kind: ParameterType) -> bool {
        match self {
            Self::Text(text) => text == stored,
            Self::List(items) if kind == ParameterType::StringList => {
                // An empty list stores as ""; split would yield one
                // empty element and never match it.
                if items.is_empty() {
                    stored.is_empty()
                } else {
                    stored.split(',').eq(items.iter().map(String::as_str))
                }
            }
            Self::List(items) => json_matches(stored, &serde_json::json!(items)),
            Self::Structured(value) => json_matches(stored, value),
        }
    }
}

fn json_matches(stored: &str, value: &serde_json::Value) -> bool {
    serde_json::from_str::<serde_json::Value>(stored)
        .map(|parsed| parsed == *value)
        .unwrap_or(false)
}

impl From<&str> for ParameterValue {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for ParameterValue {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<Vec<String>> for ParameterValue {
    fn from(items: Vec<String>) -> Self {
        Self::List(items)
    }
}

/// A flag that should be boolean but is accepted loosely.
///
/// Author configuration sometimes carries `secure: yes` or
/// `secure: 1`; those deserialize as [`Toggle::Other`], draw a warning
/// during validation, and coerce by JSON truthiness.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Toggle {
    Bool(bool),
    Other(serde_json::Value),
}

impl Toggle {
    /// The boolean value, if this really is one.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(value) => Some(*value),
            Self::Other(_) => None,
        }
    }

    /// Coerce by JSON truthiness: null, false, 0, and "" are false,
    /// everything else is true.
    pub fn truthy(&self) -> bool {
        match self {
            Self::Bool(value) => *value,
            Self::Other(value) => match value {
                serde_json::Value::Null => false,
                serde_json::Value::Bool(b) => *b,
                serde_json::Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
                serde_json::Value::String(s) => !s.is_empty(),
                serde_json::Value::Array(_) | serde_json::Value::Object(_) => true,
            },
        }
    }
}

/// An author-supplied parameter declaration, as deserialized from
/// configuration. Everything is optional here; validation decides
/// what is fatal.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawParameter {
    /// Parameter path, unique within a run.
    #[serde(default)]
    pub path: Option<String>,
    /// Literal value. Exactly one of `value`/`source` must be set.
    #[serde(default)]
    pub value: Option<ParameterValue>,
    /// Name of a stack output to copy the value from.
    #[serde(default)]
    pub source: Option<String>,
    /// Whether the value is stored encrypted. Defaults to true.
    #[serde(default)]
    pub secure: Option<Toggle>,
    /// Explicit storage type; derived from `secure` when absent.
    #[serde(default, rename = "type")]
    pub kind: Option<ParameterType>,
    /// Storage tier hint, passed through unchanged.
    #[serde(default)]
    pub tier: Option<ParameterTier>,
    /// Description, at most 1024 characters.
    #[serde(default)]
    pub description: Option<String>,
    /// Set to false to drop the declaration before validation.
    #[serde(default)]
    pub enabled: Option<bool>,
}

impl RawParameter {
    /// A declaration carrying a literal value.
    pub fn literal(path: impl Into<String>, value: impl Into<ParameterValue>) -> Self {
        Self {
            path: Some(path.into()),
            value: Some(value.into()),
            ..Self::default()
        }
    }

    /// A declaration sourcing its value from a stack output.
    pub fn sourced(path: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            path: Some(path.into()),
            source: Some(source.into()),
            ..Self::default()
        }
    }
}

/// Where a declared parameter's value comes from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ValueSource {
    /// The declaration carries the value itself.
    Literal(ParameterValue),
    /// The value is copied from the named stack output.
    Source(String),
}

/// A validated declaration: path checked, `secure` normalized,
/// value-or-source guaranteed to be exactly one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeclaredParameter {
    pub path: String,
    pub value: ValueSource,
    pub secure: bool,
    pub kind: Option<ParameterType>,
    pub tier: Option<ParameterTier>,
    pub description: Option<String>,
}

impl DeclaredParameter {
    /// Whether the value still needs resolving against stack outputs.
    pub fn needs_resolution(&self) -> bool {
        matches!(self.value, ValueSource::Source(_))
    }
}

/// A declaration with its value resolved, ready to diff and write.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedParameter {
    pub path: String,
    pub value: ParameterValue,
    pub secure: bool,
    pub kind: Option<ParameterType>,
    pub tier: Option<ParameterTier>,
    pub description: Option<String>,
}

impl ResolvedParameter {
    /// The storage type this parameter is written under: the declared
    /// type when present, otherwise `SecureString` when secure and
    /// `String` when not.
    pub fn storage_kind(&self) -> ParameterType {
        self.kind.unwrap_or(if self.secure {
            ParameterType::SecureString
        } else {
            ParameterType::String
        })
    }

    /// The value as it would be stored.
    pub fn serialized_value(&self) -> String {
        self.value.serialize_for(self.storage_kind())
    }
}

/// Merged result of the batched remote state fetch.
#[derive(Debug, Clone, Default)]
pub struct RemoteSnapshot {
    parameters: HashMap<String, RemoteParameter>,
    invalid_names: Vec<String>,
}

impl RemoteSnapshot {
    /// Create an empty snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge one batch query result into the snapshot.
    pub fn merge(&mut self, output: GetParametersOutput) {
        for parameter in output.parameters {
            self.parameters.insert(parameter.name.clone(), parameter);
        }
        self.invalid_names.extend(output.invalid_names);
    }

    /// The stored entry for a path, if the path exists remotely.
    pub fn get(&self, path: &str) -> Option<&RemoteParameter> {
        self.parameters.get(path)
    }

    /// Names the store reported as invalid or unrecognized.
    pub fn invalid_names(&self) -> &[String] {
        &self.invalid_names
    }

    /// Number of parameters that exist remotely.
    pub fn len(&self) -> usize {
        self.parameters.len()
    }

    /// Whether no declared path exists remotely.
    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty()
    }
}

/// Three-way partition of declarations against remote state.
///
/// The buckets are disjoint by path and their union equals the
/// declaration set exactly once; each bucket preserves declaration
/// order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParameterDiff {
    /// Declared but absent remotely.
    pub non_existing: Vec<ResolvedParameter>,
    /// Present remotely with a different value.
    pub changed: Vec<ResolvedParameter>,
    /// Present remotely with a matching value.
    pub unchanged: Vec<ResolvedParameter>,
}

impl ParameterDiff {
    /// Parameters that need a write: new ones first, then changed ones.
    pub fn to_write(&self) -> impl Iterator<Item = &ResolvedParameter> {
        self.non_existing.iter().chain(self.changed.iter())
    }

    /// Whether remote state already matches every declaration.
    pub fn is_converged(&self) -> bool {
        self.non_existing.is_empty() && self.changed.is_empty()
    }

    /// Total number of declarations across all buckets.
    pub fn len(&self) -> usize {
        self.non_existing.len() + self.changed.len() + self.unchanged.len()
    }

    /// Whether the diff covers no declarations at all.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// One write that failed, with the reason.
#[derive(Debug, Clone, PartialEq)]
pub struct FailedWrite {
    pub path: String,
    pub reason: String,
}

/// Per-item results of the update phase.
///
/// A failing write never cancels its siblings; both lists together
/// cover every attempted write exactly once.
#[derive(Debug, Clone, Default)]
pub struct PublishOutcome {
    /// Writes that succeeded, with the store's resulting metadata.
    pub written: Vec<PutOutcome>,
    /// Writes that failed.
    pub failed: Vec<FailedWrite>,
}

impl PublishOutcome {
    /// Whether every attempted write succeeded.
    pub fn all_succeeded(&self) -> bool {
        self.failed.is_empty()
    }

    /// Total number of attempted writes.
    pub fn total(&self) -> usize {
        self.written.len() + self.failed.len()
    }
}

/// Summary of one full pipeline run.
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    /// Paths that did not exist remotely and were created.
    pub created: Vec<String>,
    /// Paths whose remote value differed and were updated.
    pub updated: Vec<String>,
    /// Paths already matching remote state; not written.
    pub unchanged: Vec<String>,
    /// Writes that failed, with reasons.
    pub failed: Vec<FailedWrite>,
    /// Store metadata for every successful write.
    pub written: Vec<PutOutcome>,
}

impl RunSummary {
    /// Whether the run as a whole succeeded.
    pub fn all_succeeded(&self) -> bool {
        self.failed.is_empty()
    }
}
