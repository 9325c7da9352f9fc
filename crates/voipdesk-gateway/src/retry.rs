// SPDX-FileCopyrightText: 2026 Voipdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Opt-in retry decorator around an [`ApiGateway`].
//!
//! Retries only idempotent verbs, only on transport failures or
//! 429/502/503/504, with a fixed backoff between a bounded number of attempts.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tracing::warn;
use voipdesk_config::model::RetryConfig;
use voipdesk_core::{ApiRequest, CredentialBundle, VoipdeskError};

use crate::ApiGateway;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts including the first one.
    pub max_attempts: u32,
    pub backoff: Duration,
}

impl From<&RetryConfig> for RetryPolicy {
    fn from(config: &RetryConfig) -> Self {
        Self {
            max_attempts: config.max_attempts.max(1),
            backoff: config.backoff(),
        }
    }
}

impl RetryPolicy {
    fn should_retry(&self, request: &ApiRequest, error: &VoipdeskError, attempt: u32) -> bool {
        attempt < self.max_attempts && request.verb.is_idempotent() && is_transient(error)
    }
}

fn is_transient(error: &VoipdeskError) -> bool {
    match error {
        VoipdeskError::Transport { .. } => true,
        VoipdeskError::Rejected { status, .. } => matches!(status, 429 | 502 | 503 | 504),
        _ => false,
    }
}

pub struct RetryingGateway<G> {
    inner: G,
    policy: RetryPolicy,
}

impl<G: ApiGateway> RetryingGateway<G> {
    pub fn new(inner: G, policy: RetryPolicy) -> Self {
        Self { inner, policy }
    }

    pub fn inner(&self) -> &G {
        &self.inner
    }
}

#[async_trait]
impl<G: ApiGateway> ApiGateway for RetryingGateway<G> {
    fn apply_credentials(&self, bundle: CredentialBundle) {
        self.inner.apply_credentials(bundle);
    }

    async fn request(&self, request: ApiRequest) -> Result<Value, VoipdeskError> {
        let mut attempt = 1;
        loop {
            match self.inner.request(request.clone()).await {
                Err(e) if self.policy.should_retry(&request, &e, attempt) => {
                    warn!(
                        attempt,
                        max_attempts = self.policy.max_attempts,
                        verb = %request.verb,
                        path = %request.path,
                        "transient API failure, retrying"
                    );
                    tokio::time::sleep(self.policy.backoff).await;
                    attempt += 1;
                }
                result => return result,
            }
        }
    }
}
