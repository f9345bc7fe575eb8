// SPDX-FileCopyrightText: 2026 Helpline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Runs the `confluence-tool-server` binary the way the support pipeline does.

use std::time::Duration;

use helpline_config::{ServerConfig, ServerRegistry};
use helpline_tools::{ProcessInvoker, ToolInvoker, ToolOrchestrator, extract_json};
use serde_json::json;
use tokio::process::Command;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const BIN: &str = env!("CARGO_BIN_EXE_confluence-tool-server");

const CREDENTIAL_VARS: [&str; 4] = [
    "CONFLUENCE_BASE_URL",
    "ATLASSIAN_USERNAME",
    "ATLASSIAN_API_TOKEN",
    "CONFLUENCE_SPACE",
];

fn server_command() -> Command {
    let mut cmd = Command::new(BIN);
    for var in CREDENTIAL_VARS {
        cmd.env_remove(var);
    }
    cmd
}

async fn run(cmd: &mut Command) -> (bool, serde_json::Value) {
    let output = cmd.output().await.unwrap();
    let stdout = String::from_utf8(output.stdout).unwrap();
    let payload = extract_json(&stdout).into_result();
    (
        output.status.success(),
        serde_json::to_value(payload).unwrap(),
    )
}

#[tokio::test]
async fn missing_credentials_reported_in_payload() {
    let (ok, payload) = run(server_command().args(["search", "--params", r#"{"query":"refund"}"#])).await;
    assert!(ok);
    assert_eq!(payload["success"], json!(false));
    assert_eq!(
        payload["message"],
        json!("Confluence API credentials are not configured.")
    );
}

#[tokio::test]
async fn malformed_params_still_exit_zero() {
    let (ok, payload) = run(server_command().args(["search", "--params", "{oops"])).await;
    assert!(ok);
    assert_eq!(payload["success"], json!(false));
    assert!(
        payload["message"]
            .as_str()
            .unwrap()
            .starts_with("invalid --params JSON")
    );
}

#[tokio::test]
async fn search_and_fetch_against_stub_confluence() {
    let wiki = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/api/content/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [{
                "id": "55",
                "title": "Account lockout",
                "body": {"view": {"value": "<p>Wait 15 minutes.</p>"}},
                "_links": {"webui": "/pages/55"}
            }]
        })))
        .mount(&wiki)
        .await;
    Mock::given(method("GET"))
        .and(path("/rest/api/content/55"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "55",
            "title": "Account lockout",
            "body": {"view": {"value": "<p>Wait <b>15</b> minutes, then retry.</p>"}}
        })))
        .mount(&wiki)
        .await;

    let with_creds = |cmd: &mut Command| {
        cmd.env("CONFLUENCE_BASE_URL", wiki.uri())
            .env("ATLASSIAN_USERNAME", "agent@example.com")
            .env("ATLASSIAN_API_TOKEN", "token");
    };

    let mut search = server_command();
    with_creds(&mut search);
    search.args(["search", "--params", r#"{"query":"locked"}"#]);
    let (ok, payload) = run(&mut search).await;
    assert!(ok);
    assert_eq!(payload["success"], json!(true));
    assert_eq!(payload["message"], json!("Successfully found 1 documents for: locked"));
    assert_eq!(payload["results"][0]["id"], json!("55"));
    assert_eq!(payload["results"][0]["url"], json!(format!("{}/pages/55", wiki.uri())));

    let mut fetch = server_command();
    with_creds(&mut fetch);
    fetch.args(["getPageContent", "--params", r#"{"pageId":"55"}"#]);
    let (_, payload) = run(&mut fetch).await;
    assert_eq!(payload["content"], json!("Wait 15 minutes, then retry."));
    assert_eq!(
        payload["message"],
        json!("Successfully fetched content for page ID: 55")
    );
}

fn registry() -> ServerRegistry {
    ServerRegistry::new().with_server("confluence", ServerConfig::new(BIN, Vec::new()))
}

#[tokio::test]
async fn process_invoker_lists_tools() {
    let orchestrator = ToolOrchestrator::new(
        std::sync::Arc::new(ProcessInvoker::new(registry(), Duration::from_secs(30))),
        "confluence",
        "Confluence",
    );
    let tools = orchestrator.list_tools().await.unwrap();
    let names: Vec<&str> = tools.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["search", "getPageContent"]);
}

#[tokio::test]
async fn process_invoker_decodes_unknown_tool() {
    let invoker = ProcessInvoker::new(registry(), Duration::from_secs(30));
    let result = invoker
        .invoke("confluence", "archivePage", &json!({}))
        .await
        .unwrap();
    assert!(!result.success);
    assert_eq!(result.message, "Unknown tool");
}
