//! Wire-level types shared with the parameter store.

use serde::{Deserialize, Serialize};

/// Maximum number of names a single `get_parameters` call may carry.
pub const GET_PARAMETERS_BATCH_LIMIT: usize = 10;

/// Storage type of a parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParameterType {
    String,
    SecureString,
    StringList,
}

impl ParameterType {
    /// The store's string name for this type.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::String => "String",
            Self::SecureString => "SecureString",
            Self::StringList => "StringList",
        }
    }
}

impl std::fmt::Display for ParameterType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Storage tier hint, passed through to the store unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParameterTier {
    Standard,
    Advanced,
}

impl std::fmt::Display for ParameterTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Standard => f.write_str("Standard"),
            Self::Advanced => f.write_str("Advanced"),
        }
    }
}

/// The store's current state for one parameter path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteParameter {
    /// Full parameter path.
    pub name: String,
    /// Stored value, decrypted when the query asked for decryption.
    pub value: String,
    /// Stored type.
    #[serde(rename = "type")]
    pub kind: ParameterType,
}

/// Result of one batched `get_parameters` query.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GetParametersOutput {
    /// Parameters that exist in the store.
    pub parameters: Vec<RemoteParameter>,
    /// Names the store did not recognize.
    pub invalid_names: Vec<String>,
}

/// A single parameter write.
#[derive(Debug, Clone, PartialEq)]
pub struct PutRequest {
    /// Full parameter path.
    pub name: String,
    /// Serialized value.
    pub value: String,
    /// Storage type to write.
    pub kind: ParameterType,
    /// Optional tier hint.
    pub tier: Option<ParameterTier>,
    /// Description attached to the parameter.
    pub description: String,
    /// Whether an existing value may be replaced.
    pub overwrite: bool,
}

/// Result of one parameter write.
#[derive(Debug, Clone, PartialEq)]
pub struct PutOutcome {
    /// Path that was written.
    pub name: String,
    /// Version the store assigned to the new value.
    pub version: i64,
    /// Tier the store placed the value in.
    pub tier: ParameterTier,
}

/// One output of an infrastructure stack, consumed to satisfy
/// source references.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StackOutput {
    /// Output key, matched exactly against source references.
    pub key: String,
    /// Output value.
    pub value: String,
    /// Optional description attached to the output.
    pub description: Option<String>,
}
