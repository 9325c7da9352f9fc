// SPDX-FileCopyrightText: 2026 Voipdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the voipdesk console.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.
//! API credentials are not configuration: they live in the settings store.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Top-level voipdesk configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct VoipdeskConfig {
    /// Console-wide settings (logging, local paths).
    #[serde(default)]
    pub console: ConsoleConfig,

    /// Outbound HTTP gateway settings.
    #[serde(default)]
    pub gateway: GatewayConfig,

    /// Message bridge settings.
    #[serde(default)]
    pub bridge: BridgeConfig,

    /// Background polling periods.
    #[serde(default)]
    pub polling: PollingConfig,

    /// Audio upload defaults.
    #[serde(default)]
    pub upload: UploadConfig,

    /// Optional retry decorator around the gateway.
    #[serde(default)]
    pub retry: RetryConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ConsoleConfig {
    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Settings file path. Defaults to `<config dir>/voipdesk/settings.json`.
    #[serde(default)]
    pub settings_path: Option<String>,

    /// Directory that receives downloaded recordings.
    #[serde(default = "default_download_dir")]
    pub download_dir: String,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            settings_path: None,
            download_dir: default_download_dir(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_download_dir() -> String {
    dirs::download_dir()
        .map(|d| d.display().to_string())
        .unwrap_or_else(|| ".".to_string())
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GatewayConfig {
    /// Ceiling applied to every outbound request.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// `User-Agent` sent with every request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl GatewayConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_user_agent() -> String {
    concat!("voipdesk/", env!("CARGO_PKG_VERSION")).to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct BridgeConfig {
    /// Number of in-flight frames the bridge buffers before callers wait.
    #[serde(default = "default_channel_capacity")]
    pub channel_capacity: usize,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            channel_capacity: default_channel_capacity(),
        }
    }
}

fn default_channel_capacity() -> usize {
    64
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PollingConfig {
    /// Period of the user-status poll.
    #[serde(default = "default_poll_secs")]
    pub status_interval_secs: u64,

    /// Period of the per-user availability fan-out.
    #[serde(default = "default_poll_secs")]
    pub availability_interval_secs: u64,
}

impl PollingConfig {
    pub fn status_interval(&self) -> Duration {
        Duration::from_secs(self.status_interval_secs)
    }

    pub fn availability_interval(&self) -> Duration {
        Duration::from_secs(self.availability_interval_secs)
    }
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            status_interval_secs: default_poll_secs(),
            availability_interval_secs: default_poll_secs(),
        }
    }
}

fn default_poll_secs() -> u64 {
    60
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct UploadConfig {
    /// Tag given to newly enqueued sounds.
    #[serde(default = "default_tag")]
    pub default_tag: String,

    /// Numeric audio category given to newly enqueued sounds.
    #[serde(default = "default_audio_type")]
    pub default_audio_type: u32,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            default_tag: default_tag(),
            default_audio_type: default_audio_type(),
        }
    }
}

fn default_tag() -> String {
    "Hold Music".to_string()
}

fn default_audio_type() -> u32 {
    1
}

/// Retry decorator settings. Disabled unless explicitly turned on.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RetryConfig {
    #[serde(default)]
    pub enabled: bool,

    /// Total attempts including the first one.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Fixed delay between attempts.
    #[serde(default = "default_backoff_ms")]
    pub backoff_ms: u64,
}

impl RetryConfig {
    pub fn backoff(&self) -> Duration {
        Duration::from_millis(self.backoff_ms)
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            max_attempts: default_max_attempts(),
            backoff_ms: default_backoff_ms(),
        }
    }
}

fn default_max_attempts() -> u32 {
    3
}

fn default_backoff_ms() -> u64 {
    500
}
