// SPDX-FileCopyrightText: 2026 Voipdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use tracing::info;
use voipdesk_core::{Verb, VoipdeskError};

use super::{CREATED, DELETED, VoipApi, check_write, check_write_or};
use crate::models::{NewPlaylist, Playlist, Sound, SoundUpload};

impl VoipApi {
    pub async fn list_sounds(&self) -> Result<Vec<Sound>, VoipdeskError> {
        self.fetch_list("/voip/sound").await
    }

    pub async fn upload_sound(&self, upload: &SoundUpload) -> Result<(), VoipdeskError> {
        self.ensure_configured().await?;
        let reply = self.client.send_json(Verb::Post, "/voip/sound", upload).await?;
        check_write_or(reply, CREATED, "Upload failed")?;
        info!(name = %upload.name, file = %upload.file_name, "sound uploaded");
        Ok(())
    }

    pub async fn delete_sound(&self, sound_uuid: &str) -> Result<(), VoipdeskError> {
        self.ensure_configured().await?;
        let reply = self.client.delete(&format!("/voip/sound/{sound_uuid}")).await?;
        check_write(reply, DELETED)?;
        info!(sound = %sound_uuid, "sound deleted");
        Ok(())
    }

    pub async fn list_playlists(&self) -> Result<Vec<Playlist>, VoipdeskError> {
        self.fetch_list("/voip/playlist").await
    }

    /// Fails before any I/O when the name is blank.
    pub async fn create_playlist(&self, playlist: &NewPlaylist) -> Result<(), VoipdeskError> {
        if playlist.name.trim().is_empty() {
            return Err(VoipdeskError::InvalidInput(
                "Playlist name is required".to_string(),
            ));
        }
        self.ensure_configured().await?;
        let reply = self
            .client
            .send_json(Verb::Post, "/voip/playlist", playlist)
            .await?;
        check_write(reply, CREATED)?;
        info!(name = %playlist.name, sounds = playlist.sounds.len(), "playlist created");
        Ok(())
    }
}
