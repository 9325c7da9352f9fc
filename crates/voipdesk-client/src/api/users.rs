// SPDX-FileCopyrightText: 2026 Voipdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use voipdesk_core::VoipdeskError;

use super::{OK, VoipApi};
use crate::models::{Availability, User, UserStatus};
use crate::response::ApiResponse;

impl VoipApi {
    pub async fn list_users(&self) -> Result<Vec<User>, VoipdeskError> {
        self.fetch_list("/voip/user").await
    }

    pub async fn list_user_statuses(&self) -> Result<Vec<UserStatus>, VoipdeskError> {
        self.fetch_list("/voip/user-status").await
    }

    pub async fn user_availability(&self, user_uuid: &str) -> Result<bool, VoipdeskError> {
        self.ensure_configured().await?;
        self.fetch_availability(user_uuid).await
    }

    /// Availability without the readiness check, for callers that already did it
    /// once for a whole batch. A nested status other than 200 means unavailable.
    pub async fn fetch_availability(&self, user_uuid: &str) -> Result<bool, VoipdeskError> {
        let response: ApiResponse<Availability> = self
            .client
            .get_json(&format!("/voip/user/{user_uuid}/availability"))
            .await?;
        Ok(response.is_accepted(OK) && response.result.is_some_and(|a| a.available))
    }
}
