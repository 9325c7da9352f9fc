// SPDX-FileCopyrightText: 2026 Voipdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The remote API's own envelope, nested inside a successful bridge result.

use serde::{Deserialize, Serialize};
use voipdesk_core::VoipdeskError;

const UNKNOWN_ERROR: &str = "Unknown error";

/// `{result, status_code, status_message}` as returned by every VOIP resource.
///
/// A 2xx transport response can still carry a non-accepted `status_code`;
/// callers decide which codes count as success.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    #[serde(default = "Option::default")]
    pub result: Option<T>,
    #[serde(default)]
    pub status_code: u16,
    #[serde(default)]
    pub status_message: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn is_accepted(&self, accepted: &[u16]) -> bool {
        accepted.contains(&self.status_code)
    }

    /// The `result` (which may be absent) when `status_code` is accepted.
    pub fn into_result(self, accepted: &[u16]) -> Result<Option<T>, VoipdeskError> {
        if self.is_accepted(accepted) {
            Ok(self.result)
        } else {
            Err(self.rejection())
        }
    }

    /// Like [`into_result`](Self::into_result), but a missing `result` is also a failure.
    pub fn into_data(self, accepted: &[u16]) -> Result<T, VoipdeskError> {
        if !self.is_accepted(accepted) {
            return Err(self.rejection());
        }
        match self.result {
            Some(data) => Ok(data),
            None => Err(self.rejection()),
        }
    }

    fn rejection(&self) -> VoipdeskError {
        self.rejection_or(UNKNOWN_ERROR)
    }

    /// The failure for this status, with `fallback` standing in for a blank message.
    pub fn rejection_or(&self, fallback: &str) -> VoipdeskError {
        VoipdeskError::Resource {
            status_code: self.status_code,
            message: self
                .status_message
                .clone()
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| fallback.to_string()),
        }
    }
}
