// SPDX-FileCopyrightText: 2026 Voipdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Typed VOIP resources on top of [`ConsoleClient`].
//!
//! Every public operation first checks readiness and fails with
//! [`VoipdeskError::NotConfigured`] without touching the bridge when no
//! credentials are stored. The nested [`ApiResponse`] status is checked here,
//! with the accepted codes of each resource.

mod audio;
mod calls;
mod groups;
mod queues;
mod users;

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;
use voipdesk_core::VoipdeskError;

use crate::facade::ConsoleClient;
use crate::response::ApiResponse;

pub use calls::{CallWindow, recording_file_name};

pub(crate) const OK: &[u16] = &[200];
pub(crate) const CREATED: &[u16] = &[200, 201];
pub(crate) const DELETED: &[u16] = &[200, 204];

#[derive(Clone)]
pub struct VoipApi {
    client: Arc<ConsoleClient>,
}

impl VoipApi {
    pub fn new(client: Arc<ConsoleClient>) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &Arc<ConsoleClient> {
        &self.client
    }

    /// Applies the stored credentials, or fails with `NotConfigured`.
    pub async fn ensure_configured(&self) -> Result<(), VoipdeskError> {
        if self.client.ensure_ready().await {
            Ok(())
        } else {
            Err(VoipdeskError::NotConfigured)
        }
    }

    async fn fetch_list<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>, VoipdeskError> {
        self.ensure_configured().await?;
        self.client
            .get_json::<ApiResponse<Vec<T>>>(path)
            .await?
            .into_data(OK)
    }
}

/// Checks a write's nested status. An empty body (`204 No Content`) counts as accepted.
pub(crate) fn check_write(value: Value, accepted: &[u16]) -> Result<(), VoipdeskError> {
    check_write_or(value, accepted, "Unknown error")
}

/// [`check_write`] with a resource-specific message for a rejection that has none.
pub(crate) fn check_write_or(
    value: Value,
    accepted: &[u16],
    fallback: &str,
) -> Result<(), VoipdeskError> {
    if value.is_null() {
        return Ok(());
    }
    let response: ApiResponse<Value> =
        serde_json::from_value(value).map_err(|e| VoipdeskError::Decode(e.to_string()))?;
    if response.is_accepted(accepted) {
        Ok(())
    } else {
        Err(response.rejection_or(fallback))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn write_check_accepts_listed_codes_and_no_content() {
        assert!(check_write(Value::Null, DELETED).is_ok());
        assert!(check_write(json!({"status_code": 204}), DELETED).is_ok());
        assert!(check_write(json!({"status_code": 201}), CREATED).is_ok());
        let err = check_write(json!({"status_code": 201}), OK).unwrap_err();
        assert!(matches!(err, VoipdeskError::Resource { status_code: 201, .. }));
    }

    #[test]
    fn write_rejection_without_message_uses_fallback() {
        let err = check_write_or(json!({"status_code": 500}), CREATED, "Upload failed").unwrap_err();
        assert_eq!(err.to_string(), "Upload failed");
        let err = check_write(json!({"status_code": 500}), CREATED).unwrap_err();
        assert_eq!(err.to_string(), "Unknown error");
    }
}
