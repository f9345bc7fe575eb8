// SPDX-FileCopyrightText: 2026 Helpline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Document context lookup: search, take the top hit, fetch its content.
//!
//! Never fails. Every outcome, including an unreachable tool server, ends
//! in a context string for the prompt plus a [`ContextStatus`].

use std::sync::Arc;

use helpline_config::HelplineConfig;
use helpline_core::HelplineError;
use serde_json::json;
use strum::Display;
use tracing::{debug, info, warn};

use crate::protocol::{ProcessInvoker, ToolInvoker};
use crate::result::{SearchResult, ToolDescriptor};

pub const NO_RESULTS: &str = "No relevant documents found.";

/// How a context lookup ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum ContextStatus {
    /// Top document found and its content fetched.
    Found,
    /// Top document found but `getPageContent` was unsuccessful.
    ContentUnavailable,
    /// Search succeeded with zero hits.
    NoResults,
    /// Search reported `success: false`.
    SearchUnsuccessful,
    /// The tool server could not be invoked.
    ToolError,
}

/// Context string plus the outcome that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolContext {
    pub status: ContextStatus,
    pub text: String,
    /// Top search hit, when there was one.
    pub document: Option<SearchResult>,
}

/// Runs the search-then-fetch sequence against one tool server.
pub struct ToolOrchestrator {
    invoker: Arc<dyn ToolInvoker>,
    server: String,
    label: String,
}

impl ToolOrchestrator {
    pub fn new(
        invoker: Arc<dyn ToolInvoker>,
        server: impl Into<String>,
        label: impl Into<String>,
    ) -> Self {
        Self {
            invoker,
            server: server.into(),
            label: label.into(),
        }
    }

    /// Process-backed orchestrator using the `[tools]` section.
    pub fn from_config(config: &HelplineConfig) -> Self {
        Self::new(
            Arc::new(ProcessInvoker::from_config(config)),
            config.tools.server.clone(),
            config.tools.label.clone(),
        )
    }

    pub fn server(&self) -> &str {
        &self.server
    }

    /// Context string for `query_text`.
    pub async fn get_tool_context(&self, query_text: &str) -> String {
        self.fetch_context(query_text).await.text
    }

    /// Context string and outcome for `query_text`.
    pub async fn fetch_context(&self, query_text: &str) -> ToolContext {
        match self.lookup(query_text).await {
            Ok(context) => {
                info!(server = self.server.as_str(), status = %context.status, "tool context ready");
                context
            }
            Err(e) => {
                warn!(server = self.server.as_str(), error = %e, "tool context lookup failed");
                ToolContext {
                    status: ContextStatus::ToolError,
                    text: format!("Error connecting to the {} tool.", self.label),
                    document: None,
                }
            }
        }
    }

    async fn lookup(&self, query_text: &str) -> Result<ToolContext, HelplineError> {
        let search = self
            .invoker
            .invoke(&self.server, "search", &json!({ "query": query_text }))
            .await?;

        if !search.success {
            debug!(message = search.message.as_str(), "search unsuccessful");
            return Ok(ToolContext {
                status: ContextStatus::SearchUnsuccessful,
                text: NO_RESULTS.to_string(),
                document: None,
            });
        }

        let Some(top) = search.results().into_iter().next() else {
            return Ok(ToolContext {
                status: ContextStatus::NoResults,
                text: NO_RESULTS.to_string(),
                document: None,
            });
        };

        let page = self
            .invoker
            .invoke(&self.server, "getPageContent", &json!({ "pageId": top.id.as_str() }))
            .await?;

        let (status, text) = if page.success {
            (
                ContextStatus::Found,
                format!(
                    "{} Tool: Found document \"{}\"\n\n{}",
                    self.label,
                    top.title,
                    page.content().unwrap_or_default()
                ),
            )
        } else {
            (
                ContextStatus::ContentUnavailable,
                format!(
                    "{} Tool: Found document \"{}\" but could not fetch the content.",
                    self.label, top.title
                ),
            )
        };

        Ok(ToolContext {
            status,
            text,
            document: Some(top),
        })
    }

    /// Tools advertised by the server's `listTools`.
    pub async fn list_tools(&self) -> Result<Vec<ToolDescriptor>, HelplineError> {
        let listing = self
            .invoker
            .invoke(&self.server, "listTools", &json!({}))
            .await?;
        if !listing.success {
            return Err(HelplineError::RemoteApi {
                message: listing.message,
                source: None,
            });
        }
        Ok(listing.tools())
    }
}
