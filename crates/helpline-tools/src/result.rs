// SPDX-FileCopyrightText: 2026 Helpline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Decoded tool server payloads.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

/// Decoded payload of one tool call.
///
/// `success` and `message` are lifted out; every other top-level field stays in `data`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ToolInvocationResult {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(flatten)]
    pub data: Map<String, Value>,
}

impl ToolInvocationResult {
    /// Result returned when no JSON object could be extracted.
    pub fn invalid_format() -> Self {
        Self {
            success: false,
            message: "invalid response format".to_string(),
            data: Map::new(),
        }
    }

    /// Builds a result from a parsed JSON object.
    ///
    /// A non-boolean `success` is treated as `false`; a non-string `message` as empty.
    pub fn from_object(mut map: Map<String, Value>) -> Self {
        let success = map.remove("success").and_then(|v| v.as_bool()).unwrap_or(false);
        let message = match map.remove("message") {
            Some(Value::String(s)) => s,
            _ => String::new(),
        };
        Self {
            success,
            message,
            data: map,
        }
    }

    /// Search hits under `results`, in server order.
    ///
    /// Missing or non-array `results` yields no hits. Items that fail to
    /// decode are skipped one by one.
    pub fn results(&self) -> Vec<SearchResult> {
        self.decode_field("results")
    }

    /// Tool descriptors under `tools`.
    pub fn tools(&self) -> Vec<ToolDescriptor> {
        self.decode_field("tools")
    }

    /// Page body under `content`.
    pub fn content(&self) -> Option<&str> {
        self.data.get("content").and_then(Value::as_str)
    }

    fn decode_field<T: serde::de::DeserializeOwned>(&self, key: &str) -> Vec<T> {
        let items = match self.data.get(key) {
            None => return Vec::new(),
            Some(Value::Array(items)) => items,
            Some(other) => {
                warn!(field = key, found = %other, "ignoring non-array field in tool result");
                return Vec::new();
            }
        };
        items
            .iter()
            .enumerate()
            .filter_map(|(index, item)| match T::deserialize(item) {
                Ok(decoded) => Some(decoded),
                Err(e) => {
                    warn!(field = key, index, error = %e, "skipping malformed item in tool result");
                    None
                }
            })
            .collect()
    }
}

/// One document hit from a `search` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub excerpt: String,
}

/// A tool advertised by `listTools`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDescriptor {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub parameters: Value,
}

fn string_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number id, found {other}"
        ))),
    }
}
