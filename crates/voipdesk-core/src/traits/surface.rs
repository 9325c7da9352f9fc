// SPDX-FileCopyrightText: 2026 Voipdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The platform surface that performs file downloads.

use async_trait::async_trait;

use crate::error::VoipdeskError;

/// Accepts download requests on behalf of the attached presentation surface.
#[async_trait]
pub trait DownloadSurface: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &str;

    /// Resolves once the download has been accepted, not once it completes.
    async fn download(&self, url: &str, filename: &str) -> Result<(), VoipdeskError>;
}
