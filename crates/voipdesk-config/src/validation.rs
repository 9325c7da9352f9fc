// SPDX-FileCopyrightText: 2026 Voipdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Collects every violation instead of failing on the first one.

use crate::diagnostic::ConfigError;
use crate::model::VoipdeskConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
pub fn validate_config(config: &VoipdeskConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if !LOG_LEVELS.contains(&config.console.log_level.as_str()) {
        errors.push(ConfigError::validation(format!(
            "console.log_level `{}` must be one of: {}",
            config.console.log_level,
            LOG_LEVELS.join(", ")
        )));
    }

    if config.console.download_dir.trim().is_empty() {
        errors.push(ConfigError::validation(
            "console.download_dir must not be empty",
        ));
    }

    if let Some(path) = &config.console.settings_path
        && path.trim().is_empty()
    {
        errors.push(ConfigError::validation(
            "console.settings_path must not be empty when set",
        ));
    }

    if config.gateway.timeout_secs == 0 {
        errors.push(ConfigError::validation(
            "gateway.timeout_secs must be greater than 0",
        ));
    }

    if config.bridge.channel_capacity == 0 {
        errors.push(ConfigError::validation(
            "bridge.channel_capacity must be greater than 0",
        ));
    }

    if config.polling.status_interval_secs == 0 {
        errors.push(ConfigError::validation(
            "polling.status_interval_secs must be greater than 0",
        ));
    }

    if config.polling.availability_interval_secs == 0 {
        errors.push(ConfigError::validation(
            "polling.availability_interval_secs must be greater than 0",
        ));
    }

    if config.upload.default_tag.trim().is_empty() {
        errors.push(ConfigError::validation("upload.default_tag must not be empty"));
    }

    if config.retry.enabled && config.retry.max_attempts < 2 {
        errors.push(ConfigError::validation(format!(
            "retry.max_attempts must be at least 2 when retry is enabled, got {}",
            config.retry.max_attempts
        )));
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::UploadConfig;

    #[test]
    fn defaults_are_valid() {
        assert!(validate_config(&VoipdeskConfig::default()).is_ok());
    }

    #[test]
    fn collects_all_errors() {
        let mut config = VoipdeskConfig::default();
        config.gateway.timeout_secs = 0;
        config.bridge.channel_capacity = 0;
        config.console.log_level = "loud".into();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn retry_needs_more_than_one_attempt() {
        let mut config = VoipdeskConfig::default();
        config.retry.enabled = true;
        config.retry.max_attempts = 1;
        let errors = validate_config(&config).unwrap_err();
        assert!(errors[0].to_string().contains("retry.max_attempts"));
    }

    #[test]
    fn zero_poll_intervals_from_toml_are_rejected() {
        let toml_str = r#"
[polling]
status_interval_secs = 0
availability_interval_secs = 0
"#;
        let config: VoipdeskConfig = toml::from_str(toml_str).unwrap();
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors[0].to_string().contains("polling.status_interval_secs"));
        assert!(errors[1].to_string().contains("polling.availability_interval_secs"));
    }

    #[test]
    fn partial_sections_from_toml_keep_defaults() {
        let toml_str = r#"
[upload]
default_tag = "IVR"

[retry]
enabled = true
"#;
        let config: VoipdeskConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.upload.default_tag, "IVR");
        assert_eq!(config.upload.default_audio_type, UploadConfig::default().default_audio_type);
        assert!(validate_config(&config).is_ok());
    }
}
