// SPDX-FileCopyrightText: 2026 Helpline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Tool invocation over child processes.
//!
//! One process per call, no retries. The child is killed if it outlives the
//! configured timeout.

use std::path::Path;
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use helpline_config::{HelplineConfig, ServerConfig, ServerRegistry};
use helpline_core::HelplineError;
use serde_json::Value;
use tokio::process::Command;
use tracing::{debug, error, warn};

use crate::extract::{Extraction, extract_json};
use crate::result::ToolInvocationResult;

/// Calls a named tool on a named tool server.
///
/// Implementations return `Ok` for every response the server produced,
/// including unsuccessful and unparseable ones, and `Err` only when the
/// server could not be reached.
#[async_trait]
pub trait ToolInvoker: Send + Sync {
    async fn invoke(
        &self,
        server_name: &str,
        tool_name: &str,
        params: &Value,
    ) -> Result<ToolInvocationResult, HelplineError>;
}

/// Argument vector for one call: `args..., tool, --params, <json>`.
///
/// The command itself is `server.command`; nothing passes through a shell.
pub fn build_argv(server: &ServerConfig, tool_name: &str, params_json: &str) -> Vec<String> {
    let mut argv = server.args.clone();
    argv.push(tool_name.to_string());
    argv.push("--params".to_string());
    argv.push(params_json.to_string());
    argv
}

/// [`ToolInvoker`] that spawns the configured executable for every call.
#[derive(Debug, Clone)]
pub struct ProcessInvoker {
    servers: ServerRegistry,
    timeout: Duration,
}

impl ProcessInvoker {
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

    pub fn new(servers: ServerRegistry, timeout: Duration) -> Self {
        Self { servers, timeout }
    }

    /// Reads the server map named by `tools.config_path` and uses `tools.timeout_secs`.
    pub fn from_config(config: &HelplineConfig) -> Self {
        let servers = ServerRegistry::load(Path::new(&config.tools.config_path));
        Self::new(servers, Duration::from_secs(config.tools.timeout_secs))
    }
}

#[async_trait]
impl ToolInvoker for ProcessInvoker {
    async fn invoke(
        &self,
        server_name: &str,
        tool_name: &str,
        params: &Value,
    ) -> Result<ToolInvocationResult, HelplineError> {
        let server = self
            .servers
            .get(server_name)
            .ok_or_else(|| HelplineError::ServerNotFound {
                name: server_name.to_string(),
            })?;

        let params_json = serde_json::to_string(params).map_err(|e| HelplineError::Parse {
            message: format!("failed to encode tool params: {e}"),
            source: Some(Box::new(e)),
        })?;
        let argv = build_argv(server, tool_name, &params_json);

        debug!(server = server_name, tool = tool_name, command = %server.command, "spawning tool server");

        let child = Command::new(&server.command)
            .args(&argv)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| HelplineError::Invocation {
                message: format!("failed to spawn `{}`: {e}", server.command),
                source: Some(Box::new(e)),
            })?;

        // Dropping the wait future on timeout drops the child, which kills it.
        let output = match tokio::time::timeout(self.timeout, child.wait_with_output()).await {
            Ok(result) => result.map_err(|e| HelplineError::Invocation {
                message: format!("failed to collect tool server output: {e}"),
                source: Some(Box::new(e)),
            })?,
            Err(_) => {
                error!(server = server_name, tool = tool_name, timeout = ?self.timeout, "tool server timed out");
                return Err(HelplineError::Invocation {
                    message: format!("tool server timed out after {:?}", self.timeout),
                    source: None,
                });
            }
        };

        let stderr = String::from_utf8_lossy(&output.stderr);
        if !output.status.success() {
            let message = if stderr.trim().is_empty() {
                format!("tool server exited with {}", output.status)
            } else {
                stderr.trim().to_string()
            };
            error!(server = server_name, tool = tool_name, status = %output.status, "tool server failed");
            return Err(HelplineError::Invocation {
                message,
                source: None,
            });
        }
        if !stderr.trim().is_empty() {
            warn!(server = server_name, tool = tool_name, stderr = %stderr.trim(), "tool server wrote to stderr");
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let extraction = extract_json(&stdout);
        match &extraction {
            Extraction::Sentinel(_) => {}
            Extraction::Recovered(_) => {
                warn!(server = server_name, tool = tool_name, "tool output had no usable sentinels, recovered JSON from braces");
            }
            Extraction::Failed => {
                warn!(server = server_name, tool = tool_name, "no JSON object in tool output");
            }
        }
        debug!(server = server_name, tool = tool_name, extraction = extraction.kind(), "tool call finished");

        Ok(extraction.into_result())
    }
}
