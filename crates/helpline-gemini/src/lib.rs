// SPDX-FileCopyrightText: 2026 Helpline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Google AI (Gemini) provider adapter for Helpline.
//!
//! This crate implements [`ProviderAdapter`] for the Generative Language API,
//! providing both single-shot completion and streaming SSE responses.

pub mod client;
pub mod sse;
pub mod types;

use std::time::Duration;

use async_trait::async_trait;
use futures::stream::StreamExt;
use helpline_config::HelplineConfig;
use helpline_core::{
    AdapterType, ChunkStream, GenerationRequest, GenerationResponse, HealthStatus, HelplineError,
    PluginAdapter, ProviderAdapter, StreamChunk, TokenUsage,
};
use secrecy::SecretString;
use tracing::{debug, info};

use crate::client::GeminiClient;
use crate::types::{GenerateContentRequest, GenerateContentResponse, UsageMetadata};

/// Provider identifier carried by every generation request.
pub const PROVIDER_ID: &str = "google-ai";

/// Environment variables consulted, in order, when no key is configured.
const API_KEY_VARS: [&str; 2] = ["GEMINI_API_KEY", "GOOGLE_API_KEY"];

/// Gemini provider implementing [`ProviderAdapter`].
///
/// API key resolution order: config -> `GEMINI_API_KEY` -> `GOOGLE_API_KEY` -> error.
pub struct GeminiProvider {
    client: GeminiClient,
}

impl GeminiProvider {
    /// Creates a provider from the `[gemini]` section.
    pub fn from_config(config: &HelplineConfig) -> Result<Self, HelplineError> {
        let api_key = resolve_api_key(config.gemini.api_key.as_deref(), |name| {
            std::env::var(name).ok()
        })?;
        let client = GeminiClient::new(
            &api_key,
            config.gemini.base_url.clone(),
            Duration::from_secs(config.gemini.timeout_secs),
        )?;

        info!(base_url = client.base_url(), "Gemini provider initialized");
        Ok(Self { client })
    }

    /// Wraps an existing client.
    pub fn with_client(client: GeminiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PluginAdapter for GeminiProvider {
    fn name(&self) -> &str {
        PROVIDER_ID
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Provider
    }

    /// Lists models, which costs no tokens.
    async fn health_check(&self) -> Result<HealthStatus, HelplineError> {
        match self.client.list_models().await {
            Ok(()) => Ok(HealthStatus::Healthy),
            Err(e) => Ok(HealthStatus::Unhealthy(e.to_string())),
        }
    }
}

#[async_trait]
impl ProviderAdapter for GeminiProvider {
    async fn complete(
        &self,
        request: GenerationRequest,
    ) -> Result<GenerationResponse, HelplineError> {
        log_request(&request);
        let api_request = GenerateContentRequest::user_text(request.input);
        let response = self.client.generate(&request.model, &api_request).await?;

        Ok(GenerationResponse {
            content: response.text().unwrap_or_default(),
            model: response
                .model_version
                .clone()
                .unwrap_or_else(|| request.model.clone()),
            finish_reason: response.finish_reason().map(str::to_string),
            usage: response.usage_metadata.map(to_usage),
        })
    }

    async fn stream(&self, request: GenerationRequest) -> Result<ChunkStream, HelplineError> {
        log_request(&request);
        let api_request = GenerateContentRequest::user_text(request.input);
        let fragments = self
            .client
            .stream_generate(&request.model, &api_request)
            .await?;

        Ok(Box::pin(
            fragments.map(|result| result.map(|fragment| to_chunk(&fragment))),
        ))
    }
}

fn log_request(request: &GenerationRequest) {
    debug!(
        model = request.model.as_str(),
        provider = request.provider.as_str(),
        user_id = request.context.user_id.as_str(),
        ticket_type = request.context.ticket_type.as_str(),
        channel = request.context.channel.as_str(),
        "sending generation request"
    );
}

/// Maps one streamed fragment. Fragments without text yield `content: None`.
fn to_chunk(fragment: &GenerateContentResponse) -> StreamChunk {
    StreamChunk {
        content: fragment.text(),
        finish_reason: fragment.finish_reason().map(str::to_string),
        usage: fragment.usage_metadata.map(to_usage),
    }
}

fn to_usage(usage: UsageMetadata) -> TokenUsage {
    TokenUsage {
        input_tokens: usage.prompt_token_count,
        output_tokens: usage.candidates_token_count,
    }
}

/// Resolves the API key from config, then from `lookup` over [`API_KEY_VARS`].
fn resolve_api_key(
    config_key: Option<&str>,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<SecretString, HelplineError> {
    if let Some(key) = config_key.filter(|k| !k.is_empty()) {
        return Ok(SecretString::from(key.to_string()));
    }
    API_KEY_VARS
        .iter()
        .find_map(|name| lookup(name).filter(|v| !v.is_empty()))
        .map(SecretString::from)
        .ok_or_else(|| {
            HelplineError::Config(
                "Gemini API key not found. Set gemini.api_key in config or GEMINI_API_KEY / GOOGLE_API_KEY environment variable.".into(),
            )
        })
}
