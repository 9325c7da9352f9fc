// SPDX-FileCopyrightText: 2026 Voipdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! A [`DownloadSurface`] that streams files into a local directory.

use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use futures::StreamExt;
use tokio::io::AsyncWriteExt;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};
use voipdesk_core::{DownloadSurface, VoipdeskError};

/// Writes downloads under one directory.
///
/// `download` only accepts the request; the transfer runs in the background.
/// Call [`FileDownloadSurface::finish`] to wait for every accepted transfer.
/// Transfers that completed before a later one was accepted are dropped from
/// the pending set; their outcome is only logged.
pub struct FileDownloadSurface {
    client: reqwest::Client,
    dir: PathBuf,
    pending: Mutex<Vec<JoinHandle<Result<PathBuf, VoipdeskError>>>>,
}

impl FileDownloadSurface {
    /// `stall_timeout` bounds connecting and each read, not the whole transfer.
    pub fn new(dir: impl Into<PathBuf>, stall_timeout: Duration) -> Result<Self, VoipdeskError> {
        let client = reqwest::Client::builder()
            .connect_timeout(stall_timeout)
            .read_timeout(stall_timeout)
            .build()
            .map_err(|e| VoipdeskError::Config(format!("failed to build download client: {e}")))?;

        Ok(Self {
            client,
            dir: dir.into(),
            pending: Mutex::new(Vec::new()),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Waits for all accepted downloads and returns the paths that were written.
    pub async fn finish(&self) -> Vec<Result<PathBuf, VoipdeskError>> {
        let handles = match self.pending.lock() {
            Ok(mut pending) => std::mem::take(&mut *pending),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        };
        let mut results = Vec::with_capacity(handles.len());
        for handle in handles {
            results.push(match handle.await {
                Ok(result) => result,
                Err(e) => Err(VoipdeskError::Internal(format!("download task failed: {e}"))),
            });
        }
        results
    }
}

#[async_trait]
impl DownloadSurface for FileDownloadSurface {
    fn name(&self) -> &str {
        "file"
    }

    async fn download(&self, url: &str, filename: &str) -> Result<(), VoipdeskError> {
        let target = self.dir.join(safe_file_name(filename)?);
        tokio::fs::create_dir_all(&self.dir).await?;

        let client = self.client.clone();
        let url = url.to_string();
        info!(url = %url, target = %target.display(), "download accepted");

        let handle = tokio::spawn(async move {
            let result = fetch_to_file(&client, &url, &target).await;
            match &result {
                Ok(path) => debug!(target = %path.display(), "download complete"),
                Err(e) => error!(url = %url, error = %e, "download failed"),
            }
            result
        });

        let mut pending = self.pending.lock().unwrap_or_else(|p| p.into_inner());
        pending.retain(|h| !h.is_finished());
        pending.push(handle);
        Ok(())
    }
}

/// Keeps only the final path component so a filename cannot escape the directory.
fn safe_file_name(filename: &str) -> Result<&str, VoipdeskError> {
    Path::new(filename)
        .file_name()
        .and_then(|name| name.to_str())
        .filter(|name| !name.is_empty())
        .ok_or_else(|| VoipdeskError::InvalidPath(filename.to_string()))
}

async fn fetch_to_file(
    client: &reqwest::Client,
    url: &str,
    target: &Path,
) -> Result<PathBuf, VoipdeskError> {
    let response = client
        .get(url)
        .send()
        .await
        .and_then(|r| r.error_for_status())
        .map_err(|e| VoipdeskError::Transport {
            message: format!("download failed: {e}"),
            source: Some(Box::new(e)),
        })?;

    let mut file = tokio::fs::File::create(target).await?;
    let mut stream = response.bytes_stream();
    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|e| VoipdeskError::Transport {
            message: format!("download interrupted: {e}"),
            source: Some(Box::new(e)),
        })?;
        file.write_all(&chunk).await?;
    }
    file.flush().await?;
    Ok(target.to_path_buf())
}
