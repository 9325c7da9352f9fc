// SPDX-FileCopyrightText: 2026 Voipdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Sequential sound upload queue.
//!
//! Files are enqueued as `pending` items carrying the configured default tag
//! and audio type. [`UploadQueue::start`] uploads pending items one at a time
//! in enqueue order. A failed item records its error and the batch moves on.
//! The queue refuses mutation while a batch is running.

use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;
use voipdesk_client::{SoundUpload, VoipApi};
use voipdesk_config::model::UploadConfig;
use voipdesk_core::VoipdeskError;

const UPLOAD_FAILED: &str = "Upload failed";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UploadStatus {
    Pending,
    Uploading,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UploadItem {
    pub id: String,
    pub path: PathBuf,
    /// Display name, the file stem unless edited.
    pub name: String,
    pub file_name: String,
    pub tag: String,
    pub audio_type: u32,
    pub status: UploadStatus,
    pub error: Option<String>,
}

/// Edits applied to a queued item before upload. `None` leaves a field as is.
#[derive(Debug, Clone, Default)]
pub struct ItemEdit {
    pub name: Option<String>,
    pub tag: Option<String>,
    pub audio_type: Option<u32>,
}

/// The items a batch processed, in the order they were uploaded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UploadSummary {
    pub items: Vec<UploadItem>,
}

impl UploadSummary {
    pub fn succeeded(&self) -> usize {
        self.count(UploadStatus::Success)
    }

    pub fn failed(&self) -> usize {
        self.count(UploadStatus::Error)
    }

    fn count(&self, status: UploadStatus) -> usize {
        self.items.iter().filter(|i| i.status == status).count()
    }
}

/// Where encoded sounds are sent.
#[async_trait]
pub trait SoundSink: Send + Sync {
    async fn upload(&self, sound: &SoundUpload) -> Result<(), VoipdeskError>;
}

#[async_trait]
impl SoundSink for VoipApi {
    async fn upload(&self, sound: &SoundUpload) -> Result<(), VoipdeskError> {
        self.upload_sound(sound).await
    }
}

#[derive(Debug, Default)]
struct QueueState {
    items: Vec<UploadItem>,
    uploading: bool,
}

pub struct UploadQueue {
    state: Mutex<QueueState>,
    defaults: UploadConfig,
}

/// Clears the uploading flag when the batch ends, including on cancellation.
struct BatchGuard<'a> {
    queue: &'a UploadQueue,
}

impl Drop for BatchGuard<'_> {
    fn drop(&mut self) {
        self.queue.lock().uploading = false;
    }
}

impl UploadQueue {
    pub fn new(defaults: UploadConfig) -> Self {
        Self {
            state: Mutex::new(QueueState::default()),
            defaults,
        }
    }

    fn lock(&self) -> MutexGuard<'_, QueueState> {
        self.state.lock().unwrap_or_else(|p| p.into_inner())
    }

    fn lock_idle(&self) -> Result<MutexGuard<'_, QueueState>, VoipdeskError> {
        let state = self.lock();
        if state.uploading {
            return Err(VoipdeskError::QueueBusy);
        }
        Ok(state)
    }

    /// Adds one pending item per path and returns their ids.
    pub fn enqueue_paths<I, P>(&self, paths: I) -> Result<Vec<String>, VoipdeskError>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let items = paths
            .into_iter()
            .map(|p| self.new_item(p.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;

        let mut state = self.lock_idle()?;
        let ids = items.iter().map(|i| i.id.clone()).collect();
        state.items.extend(items);
        Ok(ids)
    }

    fn new_item(&self, path: &Path) -> Result<UploadItem, VoipdeskError> {
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| VoipdeskError::InvalidPath(path.display().to_string()))?;
        let name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(file_name);

        Ok(UploadItem {
            id: Uuid::new_v4().to_string(),
            path: path.to_path_buf(),
            name: name.to_string(),
            file_name: file_name.to_string(),
            tag: self.defaults.default_tag.clone(),
            audio_type: self.defaults.default_audio_type,
            status: UploadStatus::Pending,
            error: None,
        })
    }

    pub fn edit(&self, id: &str, edit: ItemEdit) -> Result<(), VoipdeskError> {
        let mut state = self.lock_idle()?;
        let item = state
            .items
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or_else(|| VoipdeskError::InvalidInput(format!("no queued upload `{id}`")))?;
        if let Some(name) = edit.name {
            item.name = name;
        }
        if let Some(tag) = edit.tag {
            item.tag = tag;
        }
        if let Some(audio_type) = edit.audio_type {
            item.audio_type = audio_type;
        }
        Ok(())
    }

    /// Removes an item. Returns whether it was queued.
    pub fn remove(&self, id: &str) -> Result<bool, VoipdeskError> {
        let mut state = self.lock_idle()?;
        let before = state.items.len();
        state.items.retain(|i| i.id != id);
        Ok(state.items.len() != before)
    }

    pub fn clear(&self) -> Result<(), VoipdeskError> {
        self.lock_idle()?.items.clear();
        Ok(())
    }

    pub fn items(&self) -> Vec<UploadItem> {
        self.lock().items.clone()
    }

    pub fn is_uploading(&self) -> bool {
        self.lock().uploading
    }

    pub fn pending_count(&self) -> usize {
        self.lock()
            .items
            .iter()
            .filter(|i| i.status == UploadStatus::Pending)
            .count()
    }

    /// Uploads every pending item in order, then awaits `refresh` once.
    ///
    /// The uploading flag is set for the whole batch and cleared after the
    /// last item resolves, before `refresh` runs. Fails with `QueueBusy` if a
    /// batch is already running.
    pub async fn start<R>(&self, sink: &dyn SoundSink, refresh: R) -> Result<UploadSummary, VoipdeskError>
    where
        R: Future<Output = ()>,
    {
        let pending: Vec<String> = {
            let mut state = self.lock_idle()?;
            state.uploading = true;
            state
                .items
                .iter()
                .filter(|i| i.status == UploadStatus::Pending)
                .map(|i| i.id.clone())
                .collect()
        };
        let guard = BatchGuard { queue: self };
        info!(count = pending.len(), "upload batch started");

        let mut summary = UploadSummary::default();
        for id in pending {
            let Some(item) = self.mark(&id, UploadStatus::Uploading, None) else {
                continue;
            };
            let outcome = upload_one(sink, &item).await;
            let finished = match outcome {
                Ok(()) => {
                    info!(file = %item.file_name, "upload succeeded");
                    self.mark(&id, UploadStatus::Success, None)
                }
                Err(e) => {
                    let message = failure_message(&e);
                    warn!(file = %item.file_name, error = %message, "upload failed");
                    self.mark(&id, UploadStatus::Error, Some(message))
                }
            };
            summary.items.extend(finished);
        }
        drop(guard);

        info!(
            succeeded = summary.succeeded(),
            failed = summary.failed(),
            "upload batch finished"
        );
        refresh.await;
        Ok(summary)
    }

    fn mark(&self, id: &str, status: UploadStatus, error: Option<String>) -> Option<UploadItem> {
        let mut state = self.lock();
        let item = state.items.iter_mut().find(|i| i.id == id)?;
        item.status = status;
        item.error = error;
        Some(item.clone())
    }
}

async fn upload_one(sink: &dyn SoundSink, item: &UploadItem) -> Result<(), VoipdeskError> {
    let bytes = tokio::fs::read(&item.path).await?;
    let sound = SoundUpload::encode(&item.name, &item.file_name, &item.tag, item.audio_type, &bytes);
    sink.upload(&sound).await
}

fn failure_message(error: &VoipdeskError) -> String {
    let message = error.to_string();
    if message.trim().is_empty() {
        UPLOAD_FAILED.to_string()
    } else {
        message
    }
}
