// SPDX-FileCopyrightText: 2026 Voipdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The fixed operation catalog of the bridge.
//!
//! A call is encoded as one JSON object tagged by `op`. Decoding anything
//! outside this enum fails, so no other verb, URL or operation can be
//! smuggled across the boundary.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::credentials::CredentialBundle;
use crate::types::{ApiRequest, Verb};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "kebab-case")]
pub enum BridgeCall {
    ApplySettings {
        bundle: CredentialBundle,
    },
    Get {
        path: String,
    },
    Post {
        path: String,
        #[serde(default)]
        body: Option<Value>,
    },
    Put {
        path: String,
        #[serde(default)]
        body: Option<Value>,
    },
    Delete {
        path: String,
    },
    Patch {
        path: String,
        #[serde(default)]
        body: Option<Value>,
    },
    DownloadFile {
        url: String,
        filename: String,
    },
}

impl BridgeCall {
    /// Wire name of the operation.
    pub fn op(&self) -> &'static str {
        match self {
            BridgeCall::ApplySettings { .. } => "apply-settings",
            BridgeCall::Get { .. } => "get",
            BridgeCall::Post { .. } => "post",
            BridgeCall::Put { .. } => "put",
            BridgeCall::Delete { .. } => "delete",
            BridgeCall::Patch { .. } => "patch",
            BridgeCall::DownloadFile { .. } => "download-file",
        }
    }

    /// Builds the call for a verb, dropping the body for GET and DELETE.
    pub fn request(verb: Verb, path: impl Into<String>, body: Option<Value>) -> Self {
        let path = path.into();
        match verb {
            Verb::Get => BridgeCall::Get { path },
            Verb::Post => BridgeCall::Post { path, body },
            Verb::Put => BridgeCall::Put { path, body },
            Verb::Delete => BridgeCall::Delete { path },
            Verb::Patch => BridgeCall::Patch { path, body },
        }
    }

    /// The gateway request this call maps to, if it is one of the verb operations.
    pub fn to_api_request(&self) -> Option<ApiRequest> {
        let request = match self {
            BridgeCall::Get { path } => ApiRequest::new(Verb::Get, path.clone()),
            BridgeCall::Post { path, body } => {
                ApiRequest::new(Verb::Post, path.clone()).with_body(body.clone())
            }
            BridgeCall::Put { path, body } => {
                ApiRequest::new(Verb::Put, path.clone()).with_body(body.clone())
            }
            BridgeCall::Delete { path } => ApiRequest::new(Verb::Delete, path.clone()),
            BridgeCall::Patch { path, body } => {
                ApiRequest::new(Verb::Patch, path.clone()).with_body(body.clone())
            }
            BridgeCall::ApplySettings { .. } | BridgeCall::DownloadFile { .. } => return None,
        };
        Some(request)
    }
}
