// SPDX-FileCopyrightText: 2026 Helpline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Two-stage JSON extraction from tool server stdout.
//!
//! Stage one reads the text between the sentinel markers. Stage two, used
//! when the markers are missing, misordered, or wrap invalid JSON, parses the
//! span from the first `{` to the last `}`.

use serde_json::{Map, Value};

use crate::result::ToolInvocationResult;

pub const JSON_START: &str = "---JSON_START---";
pub const JSON_END: &str = "---JSON_END---";

/// Outcome of scanning stdout for a JSON object.
#[derive(Debug, Clone, PartialEq)]
pub enum Extraction {
    /// Parsed from between the sentinel markers.
    Sentinel(Map<String, Value>),
    /// Parsed from the outermost brace span.
    Recovered(Map<String, Value>),
    /// No JSON object could be found.
    Failed,
}

impl Extraction {
    /// Short name for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Sentinel(_) => "sentinel",
            Self::Recovered(_) => "recovered",
            Self::Failed => "failed",
        }
    }

    /// Decodes into a result. `Failed` becomes the "invalid response format" result.
    pub fn into_result(self) -> ToolInvocationResult {
        match self {
            Self::Sentinel(map) | Self::Recovered(map) => ToolInvocationResult::from_object(map),
            Self::Failed => ToolInvocationResult::invalid_format(),
        }
    }
}

/// Extracts the JSON object a tool server printed.
pub fn extract_json(stdout: &str) -> Extraction {
    if let Some(map) = between_sentinels(stdout).and_then(parse_object) {
        return Extraction::Sentinel(map);
    }
    if let Some(map) = brace_span(stdout).and_then(parse_object) {
        return Extraction::Recovered(map);
    }
    Extraction::Failed
}

fn between_sentinels(stdout: &str) -> Option<&str> {
    let start = stdout.find(JSON_START)?;
    let end = stdout.find(JSON_END)?;
    let body_start = start + JSON_START.len();
    if end < body_start {
        return None;
    }
    stdout.get(body_start..end).map(str::trim)
}

fn brace_span(stdout: &str) -> Option<&str> {
    let open = stdout.find('{')?;
    let close = stdout.rfind('}')?;
    if close <= open {
        return None;
    }
    stdout.get(open..=close)
}

fn parse_object(text: &str) -> Option<Map<String, Value>> {
    match serde_json::from_str(text) {
        Ok(Value::Object(map)) => Some(map),
        _ => None,
    }
}
