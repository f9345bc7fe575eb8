// SPDX-FileCopyrightText: 2026 Helpline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! One query in, one generated reply out.

use std::sync::Arc;

use futures::StreamExt;
use helpline_config::HelplineConfig;
use helpline_core::{GenerationRequest, HelplineError, ProviderAdapter, Query};
use helpline_router::{Complexity, ModelRouter};
use helpline_tools::{ContextStatus, ToolOrchestrator};
use tracing::{debug, info};

use crate::prompt::build_prompt;

/// Provider identifier attached to every generation request.
pub const PROVIDER_ID: &str = "google-ai";

/// Generated reply plus how it was produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupportResponse {
    /// Concatenated text of every streamed chunk.
    pub content: String,
    pub model: String,
    pub complexity: Complexity,
    pub context_status: ContextStatus,
}

/// Handles support queries: route, fetch context, prompt, stream.
///
/// Tool failures only change the context string. The provider is the
/// sole source of request errors.
pub struct SupportHandler {
    router: ModelRouter,
    orchestrator: ToolOrchestrator,
    provider: Arc<dyn ProviderAdapter>,
    instructions: String,
}

impl SupportHandler {
    pub fn new(
        router: ModelRouter,
        orchestrator: ToolOrchestrator,
        provider: Arc<dyn ProviderAdapter>,
        instructions: impl Into<String>,
    ) -> Self {
        Self {
            router,
            orchestrator,
            provider,
            instructions: instructions.into(),
        }
    }

    /// Handler wired from configuration with a process-backed orchestrator.
    pub fn from_config(config: &HelplineConfig, provider: Arc<dyn ProviderAdapter>) -> Self {
        Self::new(
            ModelRouter::new(config.routing.clone(), config.gemini.default_model.clone()),
            ToolOrchestrator::from_config(config),
            provider,
            config.agent.instructions.clone(),
        )
    }

    pub fn orchestrator(&self) -> &ToolOrchestrator {
        &self.orchestrator
    }

    /// Handles `query` and returns the full reply.
    pub async fn handle(&self, query: &Query) -> Result<SupportResponse, HelplineError> {
        self.handle_with(query, |_| {}).await
    }

    /// Like [`handle`](Self::handle), calling `on_chunk` with each text
    /// fragment as it arrives.
    pub async fn handle_with<F>(
        &self,
        query: &Query,
        mut on_chunk: F,
    ) -> Result<SupportResponse, HelplineError>
    where
        F: FnMut(&str) + Send,
    {
        let decision = self.router.route(&query.text);
        let context = self.orchestrator.fetch_context(&query.text).await;

        info!(
            complexity = %decision.complexity,
            model = decision.model.as_str(),
            context = %context.status,
            "handling support query"
        );

        let request = GenerationRequest {
            input: build_prompt(&context.text, &query.text, &self.instructions),
            model: decision.model.clone(),
            provider: PROVIDER_ID.to_string(),
            context: query.context(),
        };

        let mut stream = self.provider.stream(request).await?;
        let mut content = String::new();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            if let Some(text) = chunk.content.as_deref() {
                on_chunk(text);
                content.push_str(text);
            }
        }

        debug!(chars = content.len(), "response complete");

        Ok(SupportResponse {
            content,
            model: decision.model,
            complexity: decision.complexity,
            context_status: context.status,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use helpline_test_utils::{MockProvider, ScriptedInvoker};
    use serde_json::json;

    fn handler(provider: Arc<MockProvider>) -> SupportHandler {
        let invoker = ScriptedInvoker::new().then_reply(json!({"success": true, "results": []}));
        SupportHandler::new(
            ModelRouter::with_defaults(),
            ToolOrchestrator::new(Arc::new(invoker), "confluence", "Confluence"),
            provider,
            "Answer briefly.",
        )
    }

    #[tokio::test]
    async fn custom_instructions_end_the_prompt() {
        let provider = Arc::new(MockProvider::new());
        handler(provider.clone())
            .handle(&Query::new("hi", "u", "chat", "live-chat"))
            .await
            .unwrap();
        assert!(provider.requests().await[0].input.ends_with("\n\nAnswer briefly."));
    }

    #[tokio::test]
    #[tracing_test::traced_test]
    async fn routing_outcome_is_logged() {
        let provider = Arc::new(MockProvider::new());
        handler(provider)
            .handle(&Query::new("app crash on login", "u", "chat", "live-chat"))
            .await
            .unwrap();
        assert!(logs_contain("handling support query"));
        assert!(logs_contain("gemini-pro"));
    }
}
