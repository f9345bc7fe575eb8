// SPDX-FileCopyrightText: 2026 Helpline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Tool server map loaded from a JSON file.
//!
//! The file has the shape `{"mcpServers": {"<name>": {"command": "...", "args": [...]}}}`.
//! A missing file is an empty map. The map is read once and handed to the
//! invoker explicitly; nothing here is global.

use std::collections::BTreeMap;
use std::path::Path;

use helpline_core::HelplineError;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// How to launch one tool server process.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Executable to run.
    pub command: String,
    /// Arguments placed before the tool name.
    #[serde(default)]
    pub args: Vec<String>,
}

impl ServerConfig {
    pub fn new(command: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            command: command.into(),
            args,
        }
    }
}

/// Read-only map of tool server name to launch configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ServerRegistry {
    #[serde(rename = "mcpServers", default)]
    servers: BTreeMap<String, ServerConfig>,
}

impl ServerRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a server entry.
    pub fn with_server(mut self, name: impl Into<String>, config: ServerConfig) -> Self {
        self.servers.insert(name.into(), config);
        self
    }

    /// Looks up a server by name.
    pub fn get(&self, name: &str) -> Option<&ServerConfig> {
        self.servers.get(name)
    }

    /// Server names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.servers.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.servers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.servers.is_empty()
    }

    /// Parses a registry from JSON text.
    pub fn from_json(json: &str) -> Result<Self, HelplineError> {
        serde_json::from_str(json).map_err(|e| HelplineError::Parse {
            message: format!("invalid tool server config: {e}"),
            source: Some(Box::new(e)),
        })
    }

    /// Reads a registry from `path`, failing on unreadable or malformed files.
    ///
    /// A file that does not exist yields an empty registry.
    pub fn try_load(path: &Path) -> Result<Self, HelplineError> {
        if !path.exists() {
            debug!(path = %path.display(), "tool server config not found, using empty map");
            return Ok(Self::new());
        }
        let content = std::fs::read_to_string(path).map_err(|e| {
            HelplineError::Config(format!("failed to read {}: {e}", path.display()))
        })?;
        Self::from_json(&content)
    }

    /// Reads a registry from `path`, degrading to an empty map on any error.
    pub fn load(path: &Path) -> Self {
        match Self::try_load(path) {
            Ok(registry) => registry,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to load tool server config");
                Self::new()
            }
        }
    }
}
