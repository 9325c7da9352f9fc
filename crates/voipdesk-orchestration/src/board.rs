// SPDX-FileCopyrightText: 2026 Voipdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Live user board: the user list plus two background polls, one for
//! presence status and one fanning out availability checks per user.

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use voipdesk_client::{User, UserStatus, VoipApi};
use voipdesk_config::model::PollingConfig;
use voipdesk_core::VoipdeskError;

use crate::fanout::{AvailabilityRecord, fan_out, lookup};
use crate::poller::{Poller, Snapshot};

const UNKNOWN_STATUS: &str = "unknown";

/// One line of the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoardRow {
    pub uuid: String,
    pub display_name: String,
    pub extension: u64,
    pub status: String,
    pub available: bool,
}

pub struct UserBoard {
    users: Vec<User>,
    statuses: Poller<UserStatus>,
    availability: Option<Poller<AvailabilityRecord>>,
}

impl UserBoard {
    /// Loads the users once, then starts both polls. Availability is not
    /// polled when there are no users.
    pub async fn start(
        api: VoipApi,
        polling: &PollingConfig,
        cancel: &CancellationToken,
    ) -> Result<Self, VoipdeskError> {
        let users = api.list_users().await?;

        let status_api = api.clone();
        let statuses = Poller::spawn("user-status", polling.status_interval(), cancel, move || {
            let api = status_api.clone();
            async move { api.list_user_statuses().await }
        })?;

        let availability = if users.is_empty() {
            None
        } else {
            let subjects: Arc<Vec<String>> = Arc::new(users.iter().map(|u| u.uuid.clone()).collect());
            Some(Poller::spawn(
                "availability",
                polling.availability_interval(),
                cancel,
                move || {
                    let api = api.clone();
                    let subjects = Arc::clone(&subjects);
                    async move {
                        api.ensure_configured().await?;
                        let api = &api;
                        let records =
                            fan_out(&subjects, |id| async move { api.fetch_availability(&id).await })
                                .await;
                        Ok::<_, VoipdeskError>(records)
                    }
                },
            )?)
        };

        Ok(Self {
            users,
            statuses,
            availability,
        })
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    /// The latest status for a user, `"unknown"` before the first poll lands.
    pub fn status_of(&self, user_uuid: &str) -> String {
        self.statuses
            .latest()
            .items
            .into_iter()
            .find(|s| s.uuid == user_uuid)
            .map(|s| s.status)
            .unwrap_or_else(|| UNKNOWN_STATUS.to_string())
    }

    pub fn is_available(&self, user_uuid: &str) -> bool {
        self.availability.as_ref().is_some_and(|poller| {
            lookup(&poller.latest().items, user_uuid)
                .copied()
                .unwrap_or_default()
        })
    }

    pub fn rows(&self) -> Vec<BoardRow> {
        let statuses = self.statuses.latest().items;
        let availability = self
            .availability
            .as_ref()
            .map(|p| p.latest().items)
            .unwrap_or_default();

        self.users
            .iter()
            .map(|u| BoardRow {
                uuid: u.uuid.clone(),
                display_name: u.display_name.clone(),
                extension: u.extension,
                status: statuses
                    .iter()
                    .find(|s| s.uuid == u.uuid)
                    .map(|s| s.status.clone())
                    .unwrap_or_else(|| UNKNOWN_STATUS.to_string()),
                available: lookup(&availability, &u.uuid).copied().unwrap_or_default(),
            })
            .collect()
    }

    pub fn status_updates(&self) -> watch::Receiver<Snapshot<UserStatus>> {
        self.statuses.subscribe()
    }

    pub fn availability_updates(&self) -> Option<watch::Receiver<Snapshot<AvailabilityRecord>>> {
        self.availability.as_ref().map(Poller::subscribe)
    }

    pub async fn shutdown(self) {
        self.statuses.shutdown().await;
        if let Some(poller) = self.availability {
            poller.shutdown().await;
        }
    }
}
