// SPDX-FileCopyrightText: 2026 Voipdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use tracing::info;
use voipdesk_core::{Verb, VoipdeskError};

use super::{OK, VoipApi, check_write};
use crate::models::{HuntGroup, HuntGroupUpdate};

impl VoipApi {
    pub async fn list_hunt_groups(&self) -> Result<Vec<HuntGroup>, VoipdeskError> {
        self.fetch_list("/voip/group").await
    }

    /// Replaces the member list of `group`, resending its name and extension.
    pub async fn set_hunt_group_members(
        &self,
        group: &HuntGroup,
        members: Vec<String>,
    ) -> Result<HuntGroup, VoipdeskError> {
        self.ensure_configured().await?;
        let body = HuntGroupUpdate {
            name: &group.name,
            extension_number: group.extension_number,
            members: &members,
        };
        let reply = self
            .client
            .send_json(Verb::Put, &format!("/voip/group/{}", group.uuid), &body)
            .await?;
        check_write(reply, OK)?;
        info!(group = %group.uuid, members = members.len(), "hunt group members updated");
        Ok(HuntGroup {
            members,
            ..group.clone()
        })
    }

    /// Adds `user_uuid` to `group` or removes it when already a member.
    pub async fn toggle_hunt_group_member(
        &self,
        group: &HuntGroup,
        user_uuid: &str,
    ) -> Result<HuntGroup, VoipdeskError> {
        self.set_hunt_group_members(group, group.toggled_members(user_uuid))
            .await
    }
}
