// SPDX-FileCopyrightText: 2026 Voipdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use tracing::info;
use voipdesk_core::{Verb, VoipdeskError};

use super::{OK, VoipApi, check_write};
use crate::models::{CallQueue, CallQueueUpdate, QueueSettings};

impl VoipApi {
    pub async fn list_call_queues(&self) -> Result<Vec<CallQueue>, VoipdeskError> {
        self.fetch_list("/voip/queue-group").await
    }

    /// Saves new settings (and optionally a new name), keeping the queue's members.
    pub async fn update_call_queue(
        &self,
        queue: &CallQueue,
        name: Option<&str>,
        settings: QueueSettings,
    ) -> Result<CallQueue, VoipdeskError> {
        self.ensure_configured().await?;
        let name = name.unwrap_or(&queue.name);
        let body = CallQueueUpdate {
            name,
            settings: &settings,
            members: &queue.members,
        };
        let reply = self
            .client
            .send_json(Verb::Put, &format!("/voip/queue-group/{}", queue.uuid), &body)
            .await?;
        check_write(reply, OK)?;
        info!(queue = %queue.uuid, "call queue settings saved");
        Ok(CallQueue {
            uuid: queue.uuid.clone(),
            name: name.to_string(),
            settings,
            members: queue.members.clone(),
        })
    }
}
