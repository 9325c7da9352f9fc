// SPDX-FileCopyrightText: 2026 Voipdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the voipdesk console.

use thiserror::Error;

/// The primary error type shared by the gateway, bridge, client, and orchestration crates.
///
/// The `Display` output of the transport-facing variants is exactly the text
/// that crosses the bridge in a failed [`ResultEnvelope`](crate::ResultEnvelope),
/// so it never carries a variant prefix.
#[derive(Debug, Error)]
pub enum VoipdeskError {
    /// Configuration errors (invalid values, unbuildable HTTP client).
    #[error("configuration error: {0}")]
    Config(String),

    /// No credential bundle is stored; dependent calls must not be attempted.
    #[error("API settings not configured. Please configure them with `voipdesk configure`.")]
    NotConfigured,

    /// The request path was a full URL instead of a relative resource path.
    #[error("invalid request path `{0}`: expected a relative resource path")]
    InvalidPath(String),

    /// Network-level failure: connection refused, DNS, timeout, unreadable body.
    #[error("{message}")]
    Transport {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The remote API answered with a non-2xx status.
    #[error("{message}")]
    Rejected { status: u16, message: String },

    /// A failure re-raised from a bridge envelope; carries the envelope's error text verbatim.
    #[error("{0}")]
    Remote(String),

    /// Transport succeeded but the nested `status_code` of the resource envelope is not accepted.
    #[error("{message}")]
    Resource { status_code: u16, message: String },

    /// A 2xx body did not have the expected shape.
    #[error("unexpected response: {0}")]
    Decode(String),

    /// Input rejected before any request was made.
    #[error("{0}")]
    InvalidInput(String),

    /// The operation is switched off in the stored app features.
    #[error("{0} is disabled in settings")]
    FeatureDisabled(String),

    /// A download was requested while no presentation surface is attached.
    #[error("No window available")]
    SurfaceUnavailable,

    /// The upload queue rejects mutation while a batch is running.
    #[error("upload queue is busy")]
    QueueBusy,

    /// The durable settings store could not be read or written.
    #[error("settings store error: {0}")]
    Settings(String),

    /// Local file access failed (upload payloads, download targets).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl VoipdeskError {
    /// Builds a transport failure without an underlying source.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
            source: None,
        }
    }

    /// Returns true when the error came from the network layer rather than the remote API.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }
}
