// SPDX-FileCopyrightText: 2026 Helpline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Tool dispatch and sentinel output.

use helpline_tools::{JSON_END, JSON_START, ToolDescriptor, ToolInvocationResult};
use serde_json::{Map, Value, json};
use tracing::{error, warn};

use crate::client::{ConfluenceClient, ConfluenceCredentials};

const CREDENTIALS_MISSING: &str = "Confluence API credentials are not configured.";

/// Tools this server answers, as advertised by `listTools`.
pub fn tool_catalog() -> Vec<ToolDescriptor> {
    vec![
        ToolDescriptor {
            name: "search".to_string(),
            description: "Searches for documents in Confluence".to_string(),
            parameters: json!({
                "type": "object",
                "properties": {
                    "query": {"type": "string", "description": "The search query"}
                },
                "required": ["query"]
            }),
        },
        ToolDescriptor {
            name: "getPageContent".to_string(),
            description: "Fetches the content of a specific Confluence page".to_string(),
            parameters: json!({
                "type": "object",
                "properties": {
                    "pageId": {"type": "string", "description": "The ID of the page to fetch"}
                },
                "required": ["pageId"]
            }),
        },
    ]
}

/// Parses the `--params` argument. Absent means an empty object.
pub fn parse_params(raw: Option<&str>) -> Result<Value, String> {
    match raw {
        None => Ok(Value::Object(Map::new())),
        Some(raw) => serde_json::from_str(raw).map_err(|e| format!("invalid --params JSON: {e}")),
    }
}

/// Wraps `result` in the sentinel lines callers scan for.
pub fn render_output(result: &ToolInvocationResult) -> String {
    let body = serde_json::to_string(result).unwrap_or_else(|e| {
        json!({"success": false, "message": format!("failed to encode result: {e}")}).to_string()
    });
    format!("{JSON_START}\n{body}\n{JSON_END}")
}

fn failure(message: impl Into<String>) -> ToolInvocationResult {
    ToolInvocationResult {
        success: false,
        message: message.into(),
        data: Map::new(),
    }
}

fn success(message: String, key: &str, value: Value) -> ToolInvocationResult {
    let mut data = Map::new();
    data.insert(key.to_string(), value);
    ToolInvocationResult {
        success: true,
        message,
        data,
    }
}

/// Answers one tool call. Every outcome, including remote failures, is a result.
pub struct ToolServer {
    client: Option<ConfluenceClient>,
}

impl ToolServer {
    /// `None` means credentials are missing; document tools then report so.
    pub fn new(client: Option<ConfluenceClient>) -> Self {
        Self { client }
    }

    pub fn from_env() -> Self {
        let client = ConfluenceCredentials::from_env().and_then(|creds| {
            ConfluenceClient::new(creds)
                .inspect_err(|e| warn!(error = %e, "could not build Confluence client"))
                .ok()
        });
        Self::new(client)
    }

    pub async fn dispatch(&self, tool: &str, params: &Value) -> ToolInvocationResult {
        match tool {
            "search" => self.search(params).await,
            "getPageContent" => self.page_content(params).await,
            "listTools" => match serde_json::to_value(tool_catalog()) {
                Ok(tools) => success("Available tools".to_string(), "tools", tools),
                Err(e) => failure(e.to_string()),
            },
            _ => failure("Unknown tool"),
        }
    }

    async fn search(&self, params: &Value) -> ToolInvocationResult {
        let Some(client) = &self.client else {
            return failure(CREDENTIALS_MISSING);
        };
        let Some(query) = params.get("query").and_then(Value::as_str) else {
            return failure("missing required parameter `query`");
        };

        match client.search(query).await {
            Ok(hits) => {
                let message = format!("Successfully found {} documents for: {query}", hits.len());
                match serde_json::to_value(hits) {
                    Ok(results) => success(message, "results", results),
                    Err(e) => failure(e.to_string()),
                }
            }
            Err(e) => {
                error!(error = %e, "confluence search failed");
                failure(remote_message(e))
            }
        }
    }

    async fn page_content(&self, params: &Value) -> ToolInvocationResult {
        let Some(client) = &self.client else {
            return failure(CREDENTIALS_MISSING);
        };
        let page_id = match params.get("pageId") {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            _ => return failure("missing required parameter `pageId`"),
        };

        match client.page_content(&page_id).await {
            Ok(content) => success(
                format!("Successfully fetched content for page ID: {page_id}"),
                "content",
                Value::String(content),
            ),
            Err(e) => {
                error!(error = %e, page_id = page_id.as_str(), "confluence page fetch failed");
                failure(remote_message(e))
            }
        }
    }
}

/// Message without the error-kind prefix.
fn remote_message(e: helpline_core::HelplineError) -> String {
    use helpline_core::HelplineError as E;
    match e {
        E::RemoteApi { message, .. } | E::Invocation { message, .. } => message,
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use helpline_tools::{Extraction, extract_json};

    #[test]
    fn missing_params_flag_is_empty_object() {
        assert_eq!(parse_params(None).unwrap(), json!({}));
    }

    #[test]
    fn malformed_params_are_reported() {
        let err = parse_params(Some("{not json")).unwrap_err();
        assert!(err.starts_with("invalid --params JSON: "), "got: {err}");
    }

    #[test]
    fn output_is_extractable_by_sentinels() {
        let out = render_output(&failure("Unknown tool"));
        assert!(out.starts_with("---JSON_START---\n"));
        assert!(out.ends_with("\n---JSON_END---"));
        match extract_json(&out) {
            Extraction::Sentinel(map) => {
                assert_eq!(map.get("success"), Some(&json!(false)));
                assert_eq!(map.get("message"), Some(&json!("Unknown tool")));
            }
            other => panic!("expected sentinel extraction, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn unknown_tool() {
        let result = ToolServer::new(None).dispatch("deletePage", &json!({})).await;
        assert!(!result.success);
        assert_eq!(result.message, "Unknown tool");
    }

    #[tokio::test]
    async fn document_tools_need_credentials() {
        let server = ToolServer::new(None);
        for tool in ["search", "getPageContent"] {
            let result = server.dispatch(tool, &json!({"query": "q", "pageId": "1"})).await;
            assert!(!result.success);
            assert_eq!(result.message, CREDENTIALS_MISSING);
        }
    }

    #[tokio::test]
    async fn list_tools_works_without_credentials() {
        let result = ToolServer::new(None).dispatch("listTools", &json!({})).await;
        assert!(result.success);
        let names: Vec<String> = result.tools().into_iter().map(|t| t.name).collect();
        assert_eq!(names, vec!["search", "getPageContent"]);
    }
}
