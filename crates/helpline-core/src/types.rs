// SPDX-FileCopyrightText: 2026 Helpline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared by the support pipeline and provider adapters.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Health status reported by adapter health checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// Adapter is fully operational.
    Healthy,
    /// Adapter is operational but experiencing issues.
    Degraded(String),
    /// Adapter is not operational.
    Unhealthy(String),
}

/// Identifies the kind of adapter behind a [`crate::PluginAdapter`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
pub enum AdapterType {
    Provider,
}

/// An incoming customer query. Request-scoped and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    /// Free-form query text as typed by the customer.
    pub text: String,
    /// Identifier of the requesting user.
    pub user_id: String,
    /// Ticket category (e.g. "chat").
    pub ticket_type: String,
    /// Channel the query arrived on (e.g. "live-chat").
    pub channel: String,
}

impl Query {
    /// Builds a query from its text and the caller identity triple.
    pub fn new(
        text: impl Into<String>,
        user_id: impl Into<String>,
        ticket_type: impl Into<String>,
        channel: impl Into<String>,
    ) -> Self {
        Self {
            text: text.into(),
            user_id: user_id.into(),
            ticket_type: ticket_type.into(),
            channel: channel.into(),
        }
    }

    /// Returns the identity triple forwarded to the provider.
    pub fn context(&self) -> RequestContext {
        RequestContext {
            user_id: self.user_id.clone(),
            ticket_type: self.ticket_type.clone(),
            channel: self.channel.clone(),
        }
    }
}

/// Caller identity attached to every generation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestContext {
    pub user_id: String,
    pub ticket_type: String,
    pub channel: String,
}

/// A generation request sent to an LLM provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// Fully assembled prompt.
    pub input: String,
    /// Model identifier chosen by the router.
    pub model: String,
    /// Provider identifier (e.g. "google-ai").
    pub provider: String,
    /// Caller identity, used for attribution only.
    pub context: RequestContext,
}

/// Token accounting reported by a provider.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

/// A full (non-streaming) provider response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationResponse {
    pub content: String,
    pub model: String,
    pub finish_reason: Option<String>,
    pub usage: Option<TokenUsage>,
}

/// A single fragment from a streaming provider response.
///
/// `content` is `None` for chunks that only carry metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StreamChunk {
    pub content: Option<String>,
    pub finish_reason: Option<String>,
    pub usage: Option<TokenUsage>,
}

impl StreamChunk {
    /// A chunk carrying only text.
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            ..Self::default()
        }
    }
}
