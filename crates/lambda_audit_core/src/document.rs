use percent_encoding::percent_decode_str;
use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const BUILT_IN_MARKER: &str = "built-in";

/// Body of a resolved policy.
///
/// AWS-owned managed policies are never fetched and carry the `"built-in"`
/// marker instead of a document.
#[derive(Debug, Clone, PartialEq)]
pub enum PolicyDocument {
    BuiltIn,
    Document(Value),
}

impl PolicyDocument {
    pub fn is_built_in(&self) -> bool {
        matches!(self, Self::BuiltIn)
    }
}

impl Serialize for PolicyDocument {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::BuiltIn => serializer.serialize_str(BUILT_IN_MARKER),
            Self::Document(value) => value.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for PolicyDocument {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        match value {
            Value::String(text) if text == BUILT_IN_MARKER => Ok(Self::BuiltIn),
            other => Ok(Self::Document(other)),
        }
    }
}

/// Decodes a policy document as IAM returns it: URL-encoded JSON.
pub fn decode_policy_document(raw: &str) -> Result<Value, String> {
    let decoded = percent_decode_str(raw)
        .decode_utf8()
        .map_err(|error| format!("policy document is not valid UTF-8: {error}"))?;

    let value: Value = serde_json::from_str(&decoded)
        .map_err(|error| format!("policy document is not valid JSON: {error}"))?;

    // Some templating tools store the document as a JSON string literal.
    match value {
        Value::String(inner) => serde_json::from_str(&inner)
            .map_err(|error| format!("policy document is not valid JSON: {error}")),
        other => Ok(other),
    }
}
