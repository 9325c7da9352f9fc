// SPDX-FileCopyrightText: 2026 Voipdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The uniform result shape that crosses the bridge.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::VoipdeskError;

/// Fallback text when a failed envelope arrives without an error message.
const UNKNOWN_ERROR: &str = "unknown error";

/// `{success, data?, error?}`: the only value the presentation side ever receives.
///
/// Build it with [`ok`](Self::ok), [`ack`](Self::ack) or [`fail`](Self::fail);
/// those keep `data` and `error` mutually exclusive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultEnvelope {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ResultEnvelope {
    pub fn ok(data: Value) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    /// Success without a payload (`apply-settings`, `download-file`).
    pub fn ack() -> Self {
        Self {
            success: true,
            data: None,
            error: None,
        }
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }

    /// Converts any result into an envelope; the error is flattened to its display text.
    pub fn from_result(result: Result<Value, VoipdeskError>) -> Self {
        match result {
            Ok(data) => Self::ok(data),
            Err(e) => Self::fail(e.to_string()),
        }
    }

    /// Restores call/raise semantics: `data` (or `null`) on success,
    /// [`VoipdeskError::Remote`] carrying the envelope text otherwise.
    pub fn into_result(self) -> Result<Value, VoipdeskError> {
        if self.success {
            Ok(self.data.unwrap_or(Value::Null))
        } else {
            Err(VoipdeskError::Remote(
                self.error.unwrap_or_else(|| UNKNOWN_ERROR.to_string()),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn ack_serializes_without_payload_fields() {
        let json = serde_json::to_string(&ResultEnvelope::ack()).unwrap();
        assert_eq!(json, r#"{"success":true}"#);
    }

    #[test]
    fn failure_carries_only_error() {
        let env = ResultEnvelope::fail("boom");
        let json = serde_json::to_value(&env).unwrap();
        assert_eq!(json, json!({"success": false, "error": "boom"}));
    }

    #[test]
    fn into_result_returns_data_unmodified() {
        let data = json!({"result": [1, 2, 3], "status_code": 200});
        let value = ResultEnvelope::ok(data.clone()).into_result().unwrap();
        assert_eq!(value, data);
    }

    #[test]
    fn into_result_raises_envelope_text() {
        let err = ResultEnvelope::fail("Request failed with status code 401")
            .into_result()
            .unwrap_err();
        assert_eq!(err.to_string(), "Request failed with status code 401");
    }

    #[test]
    fn failure_without_text_still_raises() {
        let env = ResultEnvelope {
            success: false,
            data: None,
            error: None,
        };
        assert_eq!(env.into_result().unwrap_err().to_string(), "unknown error");
    }

    #[test]
    fn from_result_flattens_errors() {
        let env = ResultEnvelope::from_result(Err(VoipdeskError::transport("connection refused")));
        assert!(!env.success);
        assert_eq!(env.error.as_deref(), Some("connection refused"));
        assert!(env.data.is_none());
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn failed_envelope_round_trips_error_text(msg in ".*") {
                let env = ResultEnvelope::fail(msg.clone());
                let wire = serde_json::to_string(&env).unwrap();
                let back: ResultEnvelope = serde_json::from_str(&wire).unwrap();
                prop_assert_eq!(back.into_result().unwrap_err().to_string(), msg);
            }
        }
    }
}
