// SPDX-FileCopyrightText: 2026 Helpline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Command-line behavior of the `helpline` binary.

use std::path::Path;
use std::process::{Command, Output, Stdio};

use tokio::io::AsyncWriteExt;
use wiremock::matchers::{body_string_contains, method, path, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

const BIN: &str = env!("CARGO_BIN_EXE_helpline");

fn helpline(dir: &Path, args: &[&str]) -> Output {
    Command::new(BIN)
        .current_dir(dir)
        .args(args)
        .env_remove("GEMINI_API_KEY")
        .env_remove("GOOGLE_API_KEY")
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

/// Runs the binary with `input` piped to stdin and a dummy API key.
async fn session(dir: &Path, args: &[&str], input: &str, envs: &[(&str, &str)]) -> Output {
    let mut child = tokio::process::Command::new(BIN)
        .current_dir(dir)
        .args(args)
        .env_remove("GOOGLE_API_KEY")
        .env_remove("RUST_LOG")
        .env("GEMINI_API_KEY", "dummy")
        .env("NO_COLOR", "1")
        .envs(envs.iter().copied())
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .unwrap();
    let mut stdin = child.stdin.take().unwrap();
    stdin.write_all(input.as_bytes()).await.unwrap();
    drop(stdin);
    child.wait_with_output().await.unwrap()
}

fn gemini_config(dir: &Path, server: &MockServer) -> String {
    write_config(dir, &format!("[gemini]\nbase_url = \"{}\"\n", server.uri()))
}

fn write_config(dir: &Path, toml: &str) -> String {
    let path = dir.join("helpline.toml");
    std::fs::write(&path, toml).unwrap();
    path.display().to_string()
}

#[test]
fn unknown_config_key_fails_with_suggestion() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path(), "[tools]\nsever = \"wiki\"\n");

    let out = helpline(dir.path(), &["--config", &config, "check-config"]);
    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("server"), "stderr: {stderr}");
}

#[test]
fn check_config_accepts_defaults_without_server_map() {
    let dir = tempfile::tempdir().unwrap();
    let out = helpline(dir.path(), &["check-config"]);
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("config OK"), "stdout: {stdout}");
    assert!(stdout.contains("tool servers: 0"));
}

#[test]
fn check_config_rejects_malformed_server_map() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join(".mcp-config.json"), "{ not json").unwrap();
    let out = helpline(dir.path(), &["check-config"]);
    assert!(!out.status.success());
}

#[test]
fn ask_without_api_key_reports_configuration_error() {
    let dir = tempfile::tempdir().unwrap();
    let out = helpline(dir.path(), &["ask", "hello"]);
    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("API key not found"), "stderr: {stderr}");
}

#[cfg(unix)]
#[test]
fn tools_lists_what_the_server_advertises() {
    let dir = tempfile::tempdir().unwrap();
    let payload = r#"{"success":true,"message":"ok","tools":[{"name":"search","description":"Searches for documents in Confluence"}]}"#;
    let script = format!("printf '%s\\n' '---JSON_START---' '{payload}' '---JSON_END---'");
    let servers = serde_json::json!({
        "mcpServers": {"confluence": {"command": "sh", "args": ["-c", script]}}
    });
    std::fs::write(dir.path().join(".mcp-config.json"), servers.to_string()).unwrap();

    let out = helpline(dir.path(), &["tools"]);
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("search"));
    assert!(stdout.contains("Searches for documents in Confluence"));
}

#[test]
fn tools_fails_when_server_is_not_configured() {
    let dir = tempfile::tempdir().unwrap();
    let out = helpline(dir.path(), &["tools"]);
    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("not found in tool server config"), "stderr: {stderr}");
}

#[test]
fn check_config_show_prints_effective_settings() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path(), "[tools]\nlabel = \"Wiki\"\n");
    let out = helpline(dir.path(), &["--config", &config, "check-config", "--show"]);
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("label = \"Wiki\""), "stdout: {stdout}");
}

#[test]
fn missing_explicit_config_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("absent.toml").display().to_string();
    let out = helpline(dir.path(), &["--config", &missing, "check-config"]);
    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("does not exist"), "stderr: {stderr}");
}

#[tokio::test]
async fn piped_shell_prints_banner_and_marker_then_quits() {
    let dir = tempfile::tempdir().unwrap();
    let out = session(dir.path(), &[], "QUIT\n", &[]).await;

    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("Customer Support Chatbot"), "stdout: {stdout}");
    assert!(stdout.contains("Enter 'quit' to exit."));
    assert!(stdout.ends_with("> "), "stdout: {stdout}");
}

#[tokio::test]
async fn piped_shell_streams_reply_before_next_marker() {
    let gemini = MockServer::start().await;
    let body = concat!(
        "data: {\"candidates\":[{\"content\":{\"parts\":[{\"text\":\"Open Settings, \"}]}}]}\n\n",
        "data: {\"candidates\":[{\"content\":{\"parts\":[{\"text\":\"then Security.\"}]},\"finishReason\":\"STOP\"}]}\n\n",
    );
    Mock::given(method("POST"))
        .and(path_regex(r"^/models/[^/]+:streamGenerateContent$"))
        .and(body_string_contains("Customer query: How do I reset my password?"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "text/event-stream")
                .set_body_string(body),
        )
        .expect(1)
        .mount(&gemini)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let config = gemini_config(dir.path(), &gemini);
    let out = session(
        dir.path(),
        &["--config", &config, "shell"],
        "How do I reset my password?\nquit\n",
        &[("RUST_LOG", "helpline_gemini=debug")],
    )
    .await;

    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    let stdout = String::from_utf8_lossy(&out.stdout);
    let first_marker = stdout.find("> ").expect("initial marker");
    let reply = stdout
        .find("Open Settings, then Security.")
        .expect("streamed reply");
    let last_marker = stdout.rfind("> ").unwrap();
    assert!(first_marker < reply && reply < last_marker, "stdout: {stdout}");

    let stderr = String::from_utf8_lossy(&out.stderr);
    for identity in ["user-chat", "live-chat"] {
        assert!(stderr.contains(identity), "stderr: {stderr}");
    }
}

#[tokio::test]
async fn check_config_online_reports_healthy_provider() {
    let gemini = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/models"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"models": []})))
        .expect(1)
        .mount(&gemini)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let config = gemini_config(dir.path(), &gemini);
    let out = session(dir.path(), &["--config", &config, "check-config", "--online"], "", &[]).await;

    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("provider google-ai: healthy"), "stdout: {stdout}");
}

#[tokio::test]
async fn check_config_online_fails_on_rejected_key() {
    let gemini = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/models"))
        .respond_with(ResponseTemplate::new(403).set_body_json(serde_json::json!({
            "error": {"code": 403, "message": "API key not valid", "status": "PERMISSION_DENIED"}
        })))
        .mount(&gemini)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let config = gemini_config(dir.path(), &gemini);
    let out = session(dir.path(), &["--config", &config, "check-config", "--online"], "", &[]).await;

    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("google-ai unhealthy"), "stderr: {stderr}");
}
