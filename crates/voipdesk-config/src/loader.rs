// SPDX-FileCopyrightText: 2026 Voipdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Layered config loading with Figment.
//!
//! Precedence (later wins): compiled defaults, `/etc/voipdesk/voipdesk.toml`,
//! `<config dir>/voipdesk/voipdesk.toml`, `./voipdesk.toml`, `VOIPDESK_*` env vars.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::VoipdeskConfig;

const SYSTEM_CONFIG: &str = "/etc/voipdesk/voipdesk.toml";
const LOCAL_CONFIG: &str = "voipdesk.toml";

/// Config sections that env var names are split on, in match order.
const SECTIONS: &[&str] = &["console", "gateway", "bridge", "polling", "upload", "retry"];

/// Path of the per-user config file, if the platform has a config directory.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("voipdesk").join(LOCAL_CONFIG))
}

/// Every file location consulted by [`load_config`], lowest precedence first.
pub fn config_file_locations() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from(SYSTEM_CONFIG)];
    paths.extend(user_config_path());
    paths.push(PathBuf::from(LOCAL_CONFIG));
    paths
}

/// Build the Figment used internally for config loading (exposed for diagnostic use).
pub fn build_figment() -> Figment {
    config_file_locations()
        .into_iter()
        .fold(
            Figment::new().merge(Serialized::defaults(VoipdeskConfig::default())),
            |figment, path| figment.merge(Toml::file(path)),
        )
        .merge(env_provider())
}

/// Load configuration from the standard hierarchy with env var overrides.
pub fn load_config() -> Result<VoipdeskConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no file lookup, no env).
pub fn load_config_from_str(toml_content: &str) -> Result<VoipdeskConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(VoipdeskConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from one explicit file with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<VoipdeskConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(VoipdeskConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// `VOIPDESK_GATEWAY_TIMEOUT_SECS` maps to `gateway.timeout_secs`.
///
/// Only the first underscore after a known section name becomes a dot;
/// `Env::split("_")` would break keys such as `timeout_secs`.
fn env_provider() -> Env {
    Env::prefixed("VOIPDESK_").map(|key| {
        let key_str = key.as_str();
        SECTIONS
            .iter()
            .find_map(|section| {
                key_str
                    .strip_prefix(section)
                    .and_then(|rest| rest.strip_prefix('_'))
                    .map(|field| format!("{section}.{field}"))
            })
            .unwrap_or_else(|| key_str.to_string())
            .into()
    })
}
