// SPDX-FileCopyrightText: 2026 Helpline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.

use crate::diagnostic::ConfigError;
use crate::model::HelplineConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Collects every failure instead of stopping at the first.
pub fn validate_config(config: &HelplineConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if !LOG_LEVELS.contains(&config.agent.log_level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "agent.log_level `{}` must be one of: {}",
                config.agent.log_level,
                LOG_LEVELS.join(", ")
            ),
        });
    }

    let base_url = config.gemini.base_url.trim();
    if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
        errors.push(ConfigError::Validation {
            message: format!("gemini.base_url `{base_url}` must be an http(s) URL"),
        });
    }

    for (key, value) in [
        ("gemini.default_model", &config.gemini.default_model),
        ("routing.simple_model", &config.routing.simple_model),
        ("routing.complex_model", &config.routing.complex_model),
        ("tools.config_path", &config.tools.config_path),
        ("tools.server", &config.tools.server),
    ] {
        if value.trim().is_empty() {
            errors.push(ConfigError::Validation {
                message: format!("{key} must not be empty"),
            });
        }
    }

    if let Some(forced) = &config.routing.force_model {
        if forced.trim().is_empty() {
            errors.push(ConfigError::Validation {
                message: "routing.force_model must not be empty when set".to_string(),
            });
        }
    }

    if config.tools.timeout_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "tools.timeout_secs must be at least 1".to_string(),
        });
    }

    if config.gemini.timeout_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "gemini.timeout_secs must be at least 1".to_string(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
