// SPDX-FileCopyrightText: 2026 Voipdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Credential-scoped HTTP gateway for the voipdesk console.
//!
//! The gateway is the only component that holds the API password and the
//! only one that talks to the remote VOIP API. It lives on the host side of
//! the bridge; the presentation side reaches it exclusively through catalog
//! operations.

pub mod client;
pub mod download;
pub mod retry;

use async_trait::async_trait;
use serde_json::Value;
use voipdesk_core::{ApiRequest, CredentialBundle, VoipdeskError};

pub use client::{ActiveProfile, Gateway};
pub use download::FileDownloadSurface;
pub use retry::{RetryPolicy, RetryingGateway};

/// What the bridge host needs from a gateway.
#[async_trait]
pub trait ApiGateway: Send + Sync {
    /// Atomically replaces the base address and credentials.
    fn apply_credentials(&self, bundle: CredentialBundle);

    /// Sends one request relative to the active base address.
    async fn request(&self, request: ApiRequest) -> Result<Value, VoipdeskError>;
}
