// SPDX-FileCopyrightText: 2026 Voipdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Sound library view: cached sound and playlist lists plus the upload queue.

use std::sync::RwLock;

use tracing::warn;
use voipdesk_client::{NewPlaylist, Playlist, Sound, VoipApi};
use voipdesk_config::model::UploadConfig;
use voipdesk_core::VoipdeskError;

use crate::upload::{UploadQueue, UploadSummary};

const UNKNOWN_SOUND: &str = "Unknown";

pub struct AudioLibrary {
    api: VoipApi,
    queue: UploadQueue,
    sounds: RwLock<Vec<Sound>>,
    playlists: RwLock<Vec<Playlist>>,
}

impl AudioLibrary {
    pub fn new(api: VoipApi, upload: UploadConfig) -> Self {
        Self {
            api,
            queue: UploadQueue::new(upload),
            sounds: RwLock::new(Vec::new()),
            playlists: RwLock::new(Vec::new()),
        }
    }

    pub fn queue(&self) -> &UploadQueue {
        &self.queue
    }

    pub fn sounds(&self) -> Vec<Sound> {
        self.sounds.read().unwrap_or_else(|p| p.into_inner()).clone()
    }

    pub fn playlists(&self) -> Vec<Playlist> {
        self.playlists.read().unwrap_or_else(|p| p.into_inner()).clone()
    }

    pub async fn refresh_sounds(&self) -> Result<Vec<Sound>, VoipdeskError> {
        let sounds = self.api.list_sounds().await?;
        *self.sounds.write().unwrap_or_else(|p| p.into_inner()) = sounds.clone();
        Ok(sounds)
    }

    pub async fn refresh_playlists(&self) -> Result<Vec<Playlist>, VoipdeskError> {
        let playlists = self.api.list_playlists().await?;
        *self.playlists.write().unwrap_or_else(|p| p.into_inner()) = playlists.clone();
        Ok(playlists)
    }

    /// Uploads every pending item, then refreshes the sound list once.
    pub async fn upload_all(&self) -> Result<UploadSummary, VoipdeskError> {
        if self.queue.is_uploading() {
            return Err(VoipdeskError::QueueBusy);
        }
        self.api.ensure_configured().await?;
        self.queue
            .start(&self.api, async {
                if let Err(e) = self.refresh_sounds().await {
                    warn!(error = %e, "sound list refresh after upload failed");
                }
            })
            .await
    }

    pub async fn delete_sound(&self, sound_uuid: &str) -> Result<(), VoipdeskError> {
        self.api.delete_sound(sound_uuid).await?;
        if let Err(e) = self.refresh_sounds().await {
            warn!(error = %e, "sound list refresh after delete failed");
        }
        Ok(())
    }

    pub async fn create_playlist(&self, playlist: &NewPlaylist) -> Result<(), VoipdeskError> {
        self.api.create_playlist(playlist).await?;
        if let Err(e) = self.refresh_playlists().await {
            warn!(error = %e, "playlist refresh after create failed");
        }
        Ok(())
    }

    /// Name of a cached sound, `"Unknown"` when it is not in the last listing.
    pub fn sound_name(&self, sound_uuid: &str) -> String {
        self.sounds
            .read()
            .unwrap_or_else(|p| p.into_inner())
            .iter()
            .find(|s| s.uuid == sound_uuid && !s.name.is_empty())
            .map(|s| s.name.clone())
            .unwrap_or_else(|| UNKNOWN_SOUND.to_string())
    }

    /// Discards the queue unless a batch is running. Returns whether it was cleared.
    pub fn close(&self) -> bool {
        self.queue.clear().is_ok()
    }
}
