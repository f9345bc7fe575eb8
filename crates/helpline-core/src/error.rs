// SPDX-FileCopyrightText: 2026 Helpline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Helpline support assistant.

use thiserror::Error;

/// The primary error type used across the support pipeline.
#[derive(Debug, Error)]
pub enum HelplineError {
    /// Configuration errors (invalid TOML, unreadable tool server map, missing credentials).
    #[error("configuration error: {0}")]
    Config(String),

    /// A tool server name was not present in the tool server map.
    #[error("configuration error: server \"{name}\" not found in tool server config")]
    ServerNotFound { name: String },

    /// Tool server process could not be spawned, exited non-zero, or timed out.
    #[error("invocation error: {message}")]
    Invocation {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Malformed JSON that could not be recovered.
    #[error("parse error: {message}")]
    Parse {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The remote document API returned an error.
    #[error("remote API error: {message}")]
    RemoteApi {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// LLM provider errors (API failure, bad model, stream interruption).
    #[error("provider error: {message}")]
    Provider {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl HelplineError {
    /// Returns true for errors caused by missing or invalid configuration.
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Config(_) | Self::ServerNotFound { .. })
    }
}
