// SPDX-FileCopyrightText: 2026 Helpline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end support flow against scripted tool and provider doubles.

use std::sync::Arc;

use helpline_agent::{SupportHandler, build_prompt};
use helpline_config::model::default_instructions;
use helpline_core::{HelplineError, Query};
use helpline_router::{Complexity, ModelRouter};
use helpline_test_utils::{MockProvider, MockReply, ScriptedInvoker};
use helpline_tools::{ContextStatus, ToolOrchestrator};
use serde_json::json;

fn chat_query(text: &str) -> Query {
    Query::new(text, "user-chat", "chat", "live-chat")
}

fn handler(invoker: Arc<ScriptedInvoker>, provider: Arc<MockProvider>) -> SupportHandler {
    SupportHandler::new(
        ModelRouter::with_defaults(),
        ToolOrchestrator::new(invoker, "confluence", "Confluence"),
        provider,
        default_instructions(),
    )
}

#[tokio::test]
async fn complex_query_without_documents() {
    let invoker = Arc::new(
        ScriptedInvoker::new().then_reply(json!({"success": true, "message": "ok", "results": []})),
    );
    let provider = Arc::new(MockProvider::with_replies(vec![MockReply::Chunks(vec![
        Some("Sorry ".into()),
        Some("about that.".into()),
    ])]));

    let response = handler(invoker.clone(), provider.clone())
        .handle(&chat_query("my upload fails constantly"))
        .await
        .unwrap();

    assert_eq!(response.content, "Sorry about that.");
    assert_eq!(response.model, "gemini-pro");
    assert_eq!(response.complexity, Complexity::Complex);
    assert_eq!(response.context_status, ContextStatus::NoResults);

    let requests = provider.requests().await;
    assert_eq!(requests.len(), 1);
    assert_eq!(
        requests[0].input,
        build_prompt(
            "No relevant documents found.",
            "my upload fails constantly",
            &default_instructions()
        )
    );
    assert_eq!(requests[0].provider, "google-ai");
    assert_eq!(requests[0].context.user_id, "user-chat");
    assert_eq!(requests[0].context.ticket_type, "chat");
    assert_eq!(requests[0].context.channel, "live-chat");

    let calls = invoker.calls().await;
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].tool, "search");
    assert_eq!(calls[0].params, json!({"query": "my upload fails constantly"}));
}

#[tokio::test]
async fn simple_query_with_found_document() {
    let invoker = Arc::new(
        ScriptedInvoker::new()
            .then_reply(json!({"success": true, "results": [{"id": "12", "title": "Refunds"}]}))
            .then_reply(json!({"success": true, "content": "Refunds take 5 days."})),
    );
    let provider = Arc::new(MockProvider::with_responses(vec!["You will get it.".into()]));

    let response = handler(invoker.clone(), provider.clone())
        .handle(&chat_query("How do I get a refund?"))
        .await
        .unwrap();

    assert_eq!(response.model, "gemini-1.5-flash");
    assert_eq!(response.complexity, Complexity::Simple);
    assert_eq!(response.context_status, ContextStatus::Found);
    assert_eq!(response.content, "You will get it.");

    let prompt = &provider.requests().await[0].input;
    assert!(prompt.starts_with(
        "Confluence Tool: Found document \"Refunds\"\n\nRefunds take 5 days.\n\nCustomer query: How do I get a refund?"
    ));
    assert_eq!(invoker.calls().await[1].params, json!({"pageId": "12"}));
}

#[tokio::test]
async fn tool_failure_still_generates_a_reply() {
    let invoker = Arc::new(ScriptedInvoker::new().then_fail("timed out"));
    let provider = Arc::new(MockProvider::with_responses(vec!["Here to help.".into()]));

    let response = handler(invoker, provider.clone())
        .handle(&chat_query("hello"))
        .await
        .unwrap();

    assert_eq!(response.context_status, ContextStatus::ToolError);
    assert!(
        provider.requests().await[0]
            .input
            .starts_with("Error connecting to the Confluence tool.\n\n")
    );
}

#[tokio::test]
async fn missing_content_chunks_count_as_empty() {
    let invoker = Arc::new(ScriptedInvoker::new().then_reply(json!({"success": true, "results": []})));
    let provider = Arc::new(MockProvider::with_replies(vec![MockReply::Chunks(vec![
        None,
        Some("a".into()),
        None,
        Some("b".into()),
    ])]));

    let mut seen = Vec::new();
    let response = handler(invoker, provider)
        .handle_with(&chat_query("hi"), |text| seen.push(text.to_string()))
        .await
        .unwrap();

    assert_eq!(response.content, "ab");
    assert_eq!(seen, vec!["a", "b"]);
}

#[tokio::test]
async fn provider_error_mid_stream_fails_the_request() {
    let invoker = Arc::new(ScriptedInvoker::new().then_reply(json!({"success": true, "results": []})));
    let provider = Arc::new(MockProvider::with_replies(vec![MockReply::FailMidStream {
        chunks: vec!["partial".into()],
        message: "quota exceeded".into(),
    }]));

    let err = handler(invoker, provider)
        .handle(&chat_query("hi"))
        .await
        .unwrap_err();
    assert!(matches!(err, HelplineError::Provider { .. }));
}

#[tokio::test]
async fn provider_rejection_fails_the_request() {
    let invoker = Arc::new(ScriptedInvoker::new().then_reply(json!({"success": true, "results": []})));
    let provider = Arc::new(MockProvider::with_replies(vec![MockReply::Reject(
        "unauthorized".into(),
    )]));

    let result = handler(invoker, provider).handle(&chat_query("hi")).await;
    assert!(result.is_err());
}
