// SPDX-FileCopyrightText: 2026 Helpline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Provider adapter trait for LLM integrations.

use std::pin::Pin;

use async_trait::async_trait;
use futures_core::Stream;

use crate::error::HelplineError;
use crate::traits::adapter::PluginAdapter;
use crate::types::{GenerationRequest, GenerationResponse, StreamChunk};

/// A boxed stream of response fragments.
pub type ChunkStream = Pin<Box<dyn Stream<Item = Result<StreamChunk, HelplineError>> + Send>>;

/// Adapter for LLM provider integrations.
///
/// Provider adapters handle communication with language model APIs,
/// supporting both single-shot completion and streaming responses.
#[async_trait]
pub trait ProviderAdapter: PluginAdapter {
    /// Sends a generation request and returns the full response.
    async fn complete(
        &self,
        request: GenerationRequest,
    ) -> Result<GenerationResponse, HelplineError>;

    /// Sends a generation request and returns a stream of response chunks.
    ///
    /// The stream is finite; it ends after the provider's final chunk.
    async fn stream(&self, request: GenerationRequest) -> Result<ChunkStream, HelplineError>;
}
