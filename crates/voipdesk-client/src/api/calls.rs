// SPDX-FileCopyrightText: 2026 Voipdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use chrono::{DateTime, Duration, SecondsFormat, Utc};
use tracing::info;
use voipdesk_core::VoipdeskError;

use super::{OK, VoipApi};
use crate::models::{CallRecord, RecordingLink};
use crate::response::ApiResponse;

/// Upper bound the call-history endpoint is asked for.
const CALL_LIMIT: u32 = 1000;
const DEFAULT_WINDOW_HOURS: i64 = 48;

/// A closed time range of call history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl CallWindow {
    /// The `hours` ending at `end`.
    pub fn ending_at(end: DateTime<Utc>, hours: i64) -> Self {
        Self {
            start: end - Duration::hours(hours),
            end,
        }
    }

    pub fn last_hours(hours: i64) -> Self {
        Self::ending_at(Utc::now(), hours)
    }

    /// `/voip/call?start=..&end=..&limit=1000` with second-precision `Z` timestamps.
    pub fn request_path(&self) -> String {
        format!(
            "/voip/call?start={}&end={}&limit={CALL_LIMIT}",
            encode_timestamp(self.start),
            encode_timestamp(self.end)
        )
    }
}

impl Default for CallWindow {
    fn default() -> Self {
        Self::last_hours(DEFAULT_WINDOW_HOURS)
    }
}

fn encode_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Secs, true)
        .replace(':', "%3A")
}

pub fn recording_file_name(call_uuid: &str) -> String {
    format!("recording-{call_uuid}.mp3")
}

impl VoipApi {
    pub async fn list_calls(&self, window: CallWindow) -> Result<Vec<CallRecord>, VoipdeskError> {
        self.fetch_list(&window.request_path()).await
    }

    /// The downloadable URL of a call's recording.
    pub async fn recording_url(&self, call_uuid: &str) -> Result<String, VoipdeskError> {
        self.ensure_configured().await?;
        let response: ApiResponse<RecordingLink> = self
            .client
            .get_json(&format!("/voip/call/{call_uuid}/audio"))
            .await?;
        let status_code = response.status_code;
        let link = response.into_data(OK)?;
        if link.recording.is_empty() {
            return Err(VoipdeskError::Resource {
                status_code,
                message: "call has no recording".to_string(),
            });
        }
        Ok(link.recording)
    }

    /// Resolves the recording URL and hands it to the host's download surface.
    /// Returns the file name the recording is saved under.
    pub async fn download_recording(&self, call_uuid: &str) -> Result<String, VoipdeskError> {
        if !self.client.features().enable_call_recording_download {
            return Err(VoipdeskError::FeatureDisabled(
                "call recording download".to_string(),
            ));
        }
        let url = self.recording_url(call_uuid).await?;
        let filename = recording_file_name(call_uuid);
        self.client.download_file(&url, &filename).await?;
        info!(call = %call_uuid, filename = %filename, "recording download requested");
        Ok(filename)
    }
}
