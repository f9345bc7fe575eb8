// SPDX-FileCopyrightText: 2026 Helpline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Helpline support assistant.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level Helpline configuration.
///
/// Loaded from TOML files following the XDG hierarchy, with environment
/// variable overrides. All sections are optional.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct HelplineConfig {
    /// Assistant identity and prompt settings.
    #[serde(default)]
    pub agent: AgentConfig,

    /// Google AI (Gemini) provider settings.
    #[serde(default)]
    pub gemini: GeminiConfig,

    /// Model routing settings.
    #[serde(default)]
    pub routing: RoutingConfig,

    /// Out-of-process tool server settings.
    #[serde(default)]
    pub tools: ToolsConfig,
}

/// Assistant identity and prompt configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AgentConfig {
    /// Display name of the assistant.
    #[serde(default = "default_agent_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Instruction appended after the customer query in every prompt.
    #[serde(default = "default_instructions")]
    pub instructions: String,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            name: default_agent_name(),
            log_level: default_log_level(),
            instructions: default_instructions(),
        }
    }
}

fn default_agent_name() -> String {
    "helpline".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

pub fn default_instructions() -> String {
    "Please provide a helpful and empathetic response. Format the response using markdown for readability.".to_string()
}

/// Google AI (Gemini) API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GeminiConfig {
    /// API key. `None` falls back to `GEMINI_API_KEY` / `GOOGLE_API_KEY`.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Model used when routing is disabled.
    #[serde(default = "default_gemini_model")]
    pub default_model: String,

    /// Base URL of the Generative Language API.
    #[serde(default = "default_gemini_base_url")]
    pub base_url: String,

    /// Request timeout in seconds.
    #[serde(default = "default_gemini_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            default_model: default_gemini_model(),
            base_url: default_gemini_base_url(),
            timeout_secs: default_gemini_timeout_secs(),
        }
    }
}

fn default_gemini_model() -> String {
    "gemini-1.5-flash".to_string()
}

fn default_gemini_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_gemini_timeout_secs() -> u64 {
    120
}

/// Model routing configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RoutingConfig {
    /// Enable model routing. When false, uses `gemini.default_model` for all queries.
    #[serde(default = "default_routing_enabled")]
    pub enabled: bool,

    /// Force all queries to a specific model, bypassing classification.
    #[serde(default)]
    pub force_model: Option<String>,

    /// Model identifier for simple queries.
    #[serde(default = "default_simple_model")]
    pub simple_model: String,

    /// Model identifier for complex queries.
    #[serde(default = "default_complex_model")]
    pub complex_model: String,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            enabled: default_routing_enabled(),
            force_model: None,
            simple_model: default_simple_model(),
            complex_model: default_complex_model(),
        }
    }
}

fn default_routing_enabled() -> bool {
    true
}

/// Default model for simple queries.
pub fn default_simple_model() -> String {
    "gemini-1.5-flash".to_string()
}

/// Default model for complex queries.
pub fn default_complex_model() -> String {
    "gemini-pro".to_string()
}

/// Tool server configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ToolsConfig {
    /// Path of the JSON tool server map (`{"mcpServers": {...}}`).
    #[serde(default = "default_tools_config_path")]
    pub config_path: String,

    /// Name of the document-search server in the map.
    #[serde(default = "default_tools_server")]
    pub server: String,

    /// Label used in context strings ("{label} Tool: ...").
    #[serde(default = "default_tools_label")]
    pub label: String,

    /// Wall-clock limit for one tool server process, in seconds.
    #[serde(default = "default_tools_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            config_path: default_tools_config_path(),
            server: default_tools_server(),
            label: default_tools_label(),
            timeout_secs: default_tools_timeout_secs(),
        }
    }
}

fn default_tools_config_path() -> String {
    ".mcp-config.json".to_string()
}

fn default_tools_server() -> String {
    "confluence".to_string()
}

fn default_tools_label() -> String {
    "Confluence".to_string()
}

fn default_tools_timeout_secs() -> u64 {
    30
}
