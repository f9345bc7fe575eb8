// SPDX-FileCopyrightText: 2026 Helpline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Layered configuration loading with Figment.
//!
//! Lookup order: `./helpline.toml` > `~/.config/helpline/helpline.toml` > `/etc/helpline/helpline.toml`,
//! with `HELPLINE_` environment variables on top.

#![allow(clippy::result_large_err)] // figment::Error is external

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::HelplineConfig;

/// Sections that environment variables may address.
const ENV_SECTIONS: &[&str] = &["agent", "gemini", "routing", "tools"];

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/helpline/helpline.toml`
/// 3. `~/.config/helpline/helpline.toml`
/// 4. `./helpline.toml`
/// 5. `HELPLINE_*` environment variables
pub fn load_config() -> Result<HelplineConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no files, no env).
pub fn load_config_from_str(toml_content: &str) -> Result<HelplineConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(HelplineConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from one file with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<HelplineConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(HelplineConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// The Figment used by [`load_config`], before extraction.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(HelplineConfig::default()))
        .merge(Toml::file("/etc/helpline/helpline.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("helpline/helpline.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("helpline.toml"))
        .merge(env_provider())
}

/// Environment provider with an explicit section mapping.
///
/// `Env::split("_")` would turn `HELPLINE_TOOLS_TIMEOUT_SECS` into
/// `tools.timeout.secs`; only the first underscore after the section is a separator.
fn env_provider() -> Env {
    Env::prefixed("HELPLINE_").map(|key| map_env_key(key.as_str()).into())
}

/// Maps a prefix-stripped env var name to a dotted, lowercase config path.
pub fn map_env_key(key: &str) -> String {
    let key = key.to_ascii_lowercase();
    for section in ENV_SECTIONS {
        if let Some(rest) = key.strip_prefix(section) {
            if let Some(field) = rest.strip_prefix('_') {
                return format!("{section}.{field}");
            }
        }
    }
    key
}
