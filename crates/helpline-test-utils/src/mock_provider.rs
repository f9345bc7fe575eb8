// SPDX-FileCopyrightText: 2026 Helpline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock LLM provider adapter for deterministic testing.
//!
//! `MockProvider` implements `ProviderAdapter` with pre-configured replies,
//! enabling fast, CI-runnable tests without external API calls.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use futures::stream;
use tokio::sync::Mutex;

use helpline_core::{
    AdapterType, ChunkStream, GenerationRequest, GenerationResponse, HealthStatus, HelplineError,
    PluginAdapter, ProviderAdapter, StreamChunk, TokenUsage,
};

/// One scripted reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockReply {
    /// Streamed as a metadata-only chunk, the text, then a finish chunk.
    Text(String),
    /// Streamed chunk by chunk; `None` is a chunk without content.
    Chunks(Vec<Option<String>>),
    /// The given chunks, then a provider error mid-stream.
    FailMidStream {
        chunks: Vec<String>,
        message: String,
    },
    /// `stream` / `complete` itself fails.
    Reject(String),
}

/// A mock LLM provider that returns pre-configured replies.
///
/// Replies are popped from a FIFO queue. When the queue is empty,
/// a default "mock response" text is returned. Every request is recorded.
pub struct MockProvider {
    replies: Arc<Mutex<VecDeque<MockReply>>>,
    requests: Arc<Mutex<Vec<GenerationRequest>>>,
}

impl MockProvider {
    /// Create a new mock provider with an empty reply queue.
    pub fn new() -> Self {
        Self::with_replies(Vec::new())
    }

    /// Create a mock provider pre-loaded with plain text responses.
    pub fn with_responses(responses: Vec<String>) -> Self {
        Self::with_replies(responses.into_iter().map(MockReply::Text).collect())
    }

    /// Create a mock provider pre-loaded with the given replies.
    pub fn with_replies(replies: Vec<MockReply>) -> Self {
        Self {
            replies: Arc::new(Mutex::new(VecDeque::from(replies))),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Add a reply to the end of the queue.
    pub async fn push_reply(&self, reply: MockReply) {
        self.replies.lock().await.push_back(reply);
    }

    /// Requests received so far, oldest first.
    pub async fn requests(&self) -> Vec<GenerationRequest> {
        self.requests.lock().await.clone()
    }

    async fn next_reply(&self, request: GenerationRequest) -> MockReply {
        self.requests.lock().await.push(request);
        self.replies
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| MockReply::Text("mock response".to_string()))
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

fn provider_error(message: String) -> HelplineError {
    HelplineError::Provider {
        message,
        source: None,
    }
}

fn mock_usage() -> TokenUsage {
    TokenUsage {
        input_tokens: 10,
        output_tokens: 20,
    }
}

#[async_trait]
impl PluginAdapter for MockProvider {
    fn name(&self) -> &str {
        "mock-provider"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Provider
    }

    async fn health_check(&self) -> Result<HealthStatus, HelplineError> {
        Ok(HealthStatus::Healthy)
    }
}

#[async_trait]
impl ProviderAdapter for MockProvider {
    async fn complete(
        &self,
        request: GenerationRequest,
    ) -> Result<GenerationResponse, HelplineError> {
        let model = request.model.clone();
        let content = match self.next_reply(request).await {
            MockReply::Text(text) => text,
            MockReply::Chunks(chunks) => chunks.into_iter().flatten().collect(),
            MockReply::FailMidStream { message, .. } | MockReply::Reject(message) => {
                return Err(provider_error(message));
            }
        };
        Ok(GenerationResponse {
            content,
            model,
            finish_reason: Some("STOP".to_string()),
            usage: Some(mock_usage()),
        })
    }

    async fn stream(&self, request: GenerationRequest) -> Result<ChunkStream, HelplineError> {
        let chunks: Vec<Result<StreamChunk, HelplineError>> = match self.next_reply(request).await
        {
            MockReply::Text(text) => vec![
                Ok(StreamChunk::default()),
                Ok(StreamChunk::text(text)),
                Ok(StreamChunk {
                    content: None,
                    finish_reason: Some("STOP".to_string()),
                    usage: Some(mock_usage()),
                }),
            ],
            MockReply::Chunks(chunks) => chunks
                .into_iter()
                .map(|content| {
                    Ok(StreamChunk {
                        content,
                        ..StreamChunk::default()
                    })
                })
                .collect(),
            MockReply::FailMidStream { chunks, message } => chunks
                .into_iter()
                .map(|text| Ok(StreamChunk::text(text)))
                .chain(std::iter::once(Err(provider_error(message))))
                .collect(),
            MockReply::Reject(message) => return Err(provider_error(message)),
        };
        Ok(Box::pin(stream::iter(chunks)))
    }
}
