// SPDX-FileCopyrightText: 2026 Helpline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration system for the Helpline support assistant.
//!
//! Two inputs are handled here: the layered TOML settings ([`HelplineConfig`])
//! and the JSON tool server map ([`ServerRegistry`]).
//!
//! # Usage
//!
//! ```no_run
//! use helpline_config::load_and_validate;
//!
//! let config = load_and_validate().expect("config errors");
//! println!("tool server: {}", config.tools.server);
//! ```

pub mod diagnostic;
pub mod loader;
pub mod model;
pub mod servers;
pub mod validation;

use std::path::Path;

pub use diagnostic::{ConfigError, render_errors};
pub use loader::{load_config, load_config_from_path, load_config_from_str};
pub use model::HelplineConfig;
pub use servers::{ServerConfig, ServerRegistry};

/// Load configuration from the XDG hierarchy and validate it.
pub fn load_and_validate() -> Result<HelplineConfig, Vec<ConfigError>> {
    finish(loader::load_config(), collect_toml_sources)
}

/// Load configuration from an explicit file (plus env overrides) and validate it.
///
/// Unlike the standard locations, an explicit file must exist.
pub fn load_and_validate_path(path: &Path) -> Result<HelplineConfig, Vec<ConfigError>> {
    if !path.is_file() {
        return Err(vec![ConfigError::FileNotFound {
            path: path.display().to_string(),
        }]);
    }
    finish(loader::load_config_from_path(path), || {
        std::fs::read_to_string(path)
            .map(|content| vec![(path.display().to_string(), content)])
            .unwrap_or_default()
    })
}

/// Load configuration from a TOML string and validate it.
pub fn load_and_validate_str(toml_content: &str) -> Result<HelplineConfig, Vec<ConfigError>> {
    finish(loader::load_config_from_str(toml_content), || {
        vec![("<inline>".to_string(), toml_content.to_string())]
    })
}

/// Load the tool server map named by `config.tools.config_path`, strictly.
///
/// Used by `check-config`; the runtime path uses the lenient [`ServerRegistry::load`].
pub fn load_servers_strict(config: &HelplineConfig) -> Result<ServerRegistry, ConfigError> {
    ServerRegistry::try_load(Path::new(&config.tools.config_path)).map_err(|e| {
        ConfigError::ToolServers {
            message: e.to_string(),
        }
    })
}

/// The effective configuration as TOML, with the API key masked.
pub fn render_effective(config: &HelplineConfig) -> Result<String, helpline_core::HelplineError> {
    let mut shown = config.clone();
    if shown.gemini.api_key.is_some() {
        shown.gemini.api_key = Some("********".to_string());
    }
    toml::to_string_pretty(&shown)
        .map_err(|e| helpline_core::HelplineError::Internal(format!("failed to render config: {e}")))
}

#[allow(clippy::result_large_err)]
fn finish(
    loaded: Result<HelplineConfig, figment::Error>,
    sources: impl FnOnce() -> Vec<(String, String)>,
) -> Result<HelplineConfig, Vec<ConfigError>> {
    match loaded {
        Ok(config) => {
            validation::validate_config(&config)?;
            Ok(config)
        }
        Err(err) => Err(diagnostic::figment_to_config_errors(err, &sources())),
    }
}

fn collect_toml_sources() -> Vec<(String, String)> {
    let mut candidates = vec![std::path::PathBuf::from("/etc/helpline/helpline.toml")];
    if let Some(dir) = dirs::config_dir() {
        candidates.push(dir.join("helpline/helpline.toml"));
    }
    if let Ok(cwd) = std::env::current_dir() {
        candidates.push(cwd.join("helpline.toml"));
    }

    candidates
        .into_iter()
        .filter_map(|path| {
            std::fs::read_to_string(&path)
                .ok()
                .map(|content| (path.display().to_string(), content))
        })
        .collect()
}
