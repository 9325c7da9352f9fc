// SPDX-FileCopyrightText: 2026 Voipdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types used across the gateway, bridge and client.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum::{Display, EnumString};

/// Settings-store key holding the serialized [`AppFeatures`].
pub const FEATURES_KEY: &str = "app_features";

/// The HTTP verbs the gateway exposes. Nothing else can be requested.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum Verb {
    Get,
    Post,
    Put,
    Delete,
    Patch,
}

impl Verb {
    /// Verbs that may be repeated without changing the outcome.
    pub fn is_idempotent(self) -> bool {
        matches!(self, Verb::Get | Verb::Put | Verb::Delete)
    }
}

/// Per-call options. Host-side only; the bridge never forwards them.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    /// Extra headers. The gateway's credential headers always win over these.
    pub headers: Vec<(String, String)>,
    /// Per-call timeout, capped by the gateway ceiling.
    pub timeout: Option<Duration>,
}

/// A verb plus a relative resource path; the gateway supplies the base address.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub verb: Verb,
    pub path: String,
    pub body: Option<Value>,
    pub options: RequestOptions,
}

impl ApiRequest {
    pub fn new(verb: Verb, path: impl Into<String>) -> Self {
        Self {
            verb,
            path: path.into(),
            body: None,
            options: RequestOptions::default(),
        }
    }

    pub fn with_body(mut self, body: Option<Value>) -> Self {
        self.body = body;
        self
    }

    pub fn with_options(mut self, options: RequestOptions) -> Self {
        self.options = options;
        self
    }
}

/// Feature switches persisted next to the credentials.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppFeatures {
    #[serde(default)]
    pub enable_call_recording_download: bool,
}
