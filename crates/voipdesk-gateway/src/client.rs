// SPDX-FileCopyrightText: 2026 Voipdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The host-side gateway: one HTTP client, one credential profile.
//!
//! [`Gateway`] owns a single `reqwest::Client` and the active
//! [`ActiveProfile`] (base address plus credentials). Every outbound request
//! snapshots the profile once, so a concurrent [`Gateway::apply_credentials`]
//! is observed either entirely or not at all.

use std::sync::Arc;
use std::time::Duration;

use arc_swap::ArcSwapOption;
use async_trait::async_trait;
use reqwest::Method;
use serde_json::Value;
use tracing::{debug, info, warn};
use voipdesk_config::model::GatewayConfig;
use voipdesk_core::{ApiRequest, CredentialBundle, Verb, VoipdeskError};

use crate::ApiGateway;

/// Base address and the credentials sent to it. Replaced as one value.
#[derive(Debug)]
pub struct ActiveProfile {
    pub base_url: String,
    pub credentials: Option<CredentialBundle>,
}

/// HTTP gateway to the remote VOIP API.
///
/// Stateless across calls apart from the profile. Performs no retries; wrap
/// it in [`RetryingGateway`](crate::RetryingGateway) for that.
pub struct Gateway {
    client: reqwest::Client,
    profile: ArcSwapOption<ActiveProfile>,
    timeout: Duration,
}

impl Gateway {
    /// Builds the gateway with the configured timeout ceiling and no profile.
    pub fn new(config: &GatewayConfig) -> Result<Self, VoipdeskError> {
        let timeout = config.timeout();
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| VoipdeskError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            profile: ArcSwapOption::empty(),
            timeout,
        })
    }

    /// Sets a base address with no credentials. Requests to it carry no auth headers.
    pub fn with_endpoint(self, base_url: impl Into<String>) -> Self {
        self.profile.store(Some(Arc::new(ActiveProfile {
            base_url: base_url.into(),
            credentials: None,
        })));
        self
    }

    /// Replaces base address and credentials in one atomic store.
    pub fn apply_credentials(&self, bundle: CredentialBundle) {
        info!(base_url = %bundle.api_url, user = %bundle.auth_user, "API credentials applied");
        self.profile.store(Some(Arc::new(ActiveProfile {
            base_url: bundle.api_url.clone(),
            credentials: Some(bundle),
        })));
    }

    /// The current profile. Host-side only; never handed to the bridge.
    pub fn active_profile(&self) -> Option<Arc<ActiveProfile>> {
        self.profile.load_full()
    }

    /// The fixed per-request ceiling.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Sends one request and returns the JSON body of a 2xx response.
    ///
    /// Failures are logged here, once, and returned as
    /// [`VoipdeskError::Transport`] or [`VoipdeskError::Rejected`].
    pub async fn request(&self, request: ApiRequest) -> Result<Value, VoipdeskError> {
        let result = self.send(&request).await;
        if let Err(e) = &result {
            warn!(
                verb = %request.verb,
                path = %request.path,
                error = %e,
                "API request failed"
            );
        }
        result
    }

    pub async fn get(&self, path: &str) -> Result<Value, VoipdeskError> {
        self.request(ApiRequest::new(Verb::Get, path)).await
    }

    pub async fn post(&self, path: &str, body: Option<Value>) -> Result<Value, VoipdeskError> {
        self.request(ApiRequest::new(Verb::Post, path).with_body(body))
            .await
    }

    pub async fn put(&self, path: &str, body: Option<Value>) -> Result<Value, VoipdeskError> {
        self.request(ApiRequest::new(Verb::Put, path).with_body(body))
            .await
    }

    pub async fn delete(&self, path: &str) -> Result<Value, VoipdeskError> {
        self.request(ApiRequest::new(Verb::Delete, path)).await
    }

    pub async fn patch(&self, path: &str, body: Option<Value>) -> Result<Value, VoipdeskError> {
        self.request(ApiRequest::new(Verb::Patch, path).with_body(body))
            .await
    }

    async fn send(&self, request: &ApiRequest) -> Result<Value, VoipdeskError> {
        // One snapshot per request: base and credentials always belong together.
        let profile = self.profile.load_full();
        let url = resolve_url(profile.as_deref(), &request.path)?;

        let mut builder = self.client.request(method_for(request.verb), &url);

        for (name, value) in &request.options.headers {
            if is_auth_header(name) {
                continue;
            }
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(credentials) = profile.as_ref().and_then(|p| p.credentials.as_ref()) {
            for (name, value) in credentials.auth_headers() {
                builder = builder.header(name, value);
            }
        }
        let limit = request
            .options
            .timeout
            .map_or(self.timeout, |timeout| timeout.min(self.timeout));
        builder = builder.timeout(limit);
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| transport_error(e, limit))?;

        let status = response.status();
        debug!(status = %status, verb = %request.verb, path = %request.path, "API response received");

        let body = response
            .text()
            .await
            .map_err(|e| transport_error(e, limit))?;

        if status.is_success() {
            return Ok(parse_body(&body));
        }

        let message = upstream_message(&body)
            .unwrap_or_else(|| format!("Request failed with status code {}", status.as_u16()));
        Err(VoipdeskError::Rejected {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl ApiGateway for Gateway {
    fn apply_credentials(&self, bundle: CredentialBundle) {
        Gateway::apply_credentials(self, bundle);
    }

    async fn request(&self, request: ApiRequest) -> Result<Value, VoipdeskError> {
        Gateway::request(self, request).await
    }
}

fn method_for(verb: Verb) -> Method {
    match verb {
        Verb::Get => Method::GET,
        Verb::Post => Method::POST,
        Verb::Put => Method::PUT,
        Verb::Delete => Method::DELETE,
        Verb::Patch => Method::PATCH,
    }
}

fn is_auth_header(name: &str) -> bool {
    name.get(..7)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case("x-auth-"))
}

/// True for `scheme://...` and protocol-relative `//host` paths.
pub(crate) fn is_absolute_url(path: &str) -> bool {
    let rest = match path.split_once(':') {
        Some((scheme, rest))
            if scheme.starts_with(|c: char| c.is_ascii_alphabetic())
                && scheme
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.')) =>
        {
            rest
        }
        _ => path,
    };
    rest.starts_with("//")
}

/// Joins base and path with exactly one slash between them.
fn resolve_url(profile: Option<&ActiveProfile>, path: &str) -> Result<String, VoipdeskError> {
    if is_absolute_url(path) {
        return Err(VoipdeskError::InvalidPath(path.to_string()));
    }
    let profile = profile.ok_or_else(|| VoipdeskError::transport("no API endpoint configured"))?;
    Ok(format!(
        "{}/{}",
        profile.base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    ))
}

fn transport_error(e: reqwest::Error, limit: Duration) -> VoipdeskError {
    let message = if e.is_timeout() {
        format!("timeout of {}ms exceeded", limit.as_millis())
    } else {
        format!("request failed: {e}")
    };
    VoipdeskError::Transport {
        message,
        source: Some(Box::new(e)),
    }
}

/// Empty bodies become `null`; bodies that are not JSON are returned as a string.
fn parse_body(body: &str) -> Value {
    if body.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(body).unwrap_or_else(|_| Value::String(body.to_string()))
}

/// The remote's own explanation, if the error body carries one.
fn upstream_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    ["message", "status_message", "error"]
        .iter()
        .find_map(|key| {
            value
                .get(*key)?
                .as_str()
                .filter(|msg| !msg.trim().is_empty())
        })
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(base: &str) -> ActiveProfile {
        ActiveProfile {
            base_url: base.to_string(),
            credentials: None,
        }
    }

    #[test]
    fn joins_with_single_slash() {
        let p = profile("https://api.example.net/");
        assert_eq!(
            resolve_url(Some(&p), "/voip/user").unwrap(),
            "https://api.example.net/voip/user"
        );
        let p = profile("https://api.example.net");
        assert_eq!(
            resolve_url(Some(&p), "voip/user").unwrap(),
            "https://api.example.net/voip/user"
        );
    }

    #[test]
    fn rejects_absolute_urls() {
        let p = profile("https://api.example.net");
        for path in ["https://evil.example/x", "//evil.example/x", "HTTP://x/y"] {
            assert!(
                matches!(resolve_url(Some(&p), path), Err(VoipdeskError::InvalidPath(_))),
                "{path} should be rejected"
            );
        }
        assert!(!is_absolute_url("/voip/call?start=2024-01-01T00:00:00Z"));
    }

    #[test]
    fn missing_endpoint_is_a_transport_failure() {
        let err = resolve_url(None, "/voip/user").unwrap_err();
        assert!(err.is_transport());
    }

    #[test]
    fn body_parsing() {
        assert_eq!(parse_body(""), Value::Null);
        assert_eq!(parse_body("{\"a\":1}"), serde_json::json!({"a": 1}));
        assert_eq!(parse_body("plain"), Value::String("plain".into()));
    }

    #[test]
    fn upstream_message_prefers_message_fields() {
        assert_eq!(
            upstream_message(r#"{"status_message":"User not found"}"#).as_deref(),
            Some("User not found")
        );
        assert_eq!(upstream_message(r#"{"message":""}"#), None);
        assert_eq!(
            upstream_message(r#"{"message":"  ","status_message":"Bad extension"}"#).as_deref(),
            Some("Bad extension")
        );
        assert_eq!(upstream_message("<html>"), None);
    }

    #[test]
    fn auth_header_detection_is_case_insensitive() {
        assert!(is_auth_header("x-auth-user"));
        assert!(is_auth_header("X-Auth-Password"));
        assert!(!is_auth_header("X-Request-Id"));
    }
}
