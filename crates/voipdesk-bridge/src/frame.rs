// SPDX-FileCopyrightText: 2026 Voipdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Text frames exchanged between the two contexts.

use tokio::sync::{mpsc, oneshot};
use voipdesk_core::{BridgeCall, ResultEnvelope};

use crate::client::BridgeClient;

/// One request: the serialized call and the slot its serialized envelope goes into.
#[derive(Debug)]
pub struct Frame {
    pub payload: String,
    pub reply: oneshot::Sender<String>,
}

/// Host end of the channel, consumed by [`BridgeHost::serve`](crate::BridgeHost::serve).
pub struct BridgeInbox {
    pub(crate) rx: mpsc::Receiver<Frame>,
}

impl BridgeInbox {
    pub async fn recv(&mut self) -> Option<Frame> {
        self.rx.recv().await
    }
}

/// Creates a connected presentation/host pair buffering up to `capacity` frames.
pub fn channel(capacity: usize) -> (BridgeClient, BridgeInbox) {
    let (tx, rx) = mpsc::channel(capacity.max(1));
    (BridgeClient::new(tx), BridgeInbox { rx })
}

/// Decodes a call frame. Anything outside the catalog is rejected.
pub fn decode_call(payload: &str) -> Result<BridgeCall, String> {
    serde_json::from_str(payload).map_err(|e| format!("invalid bridge message: {e}"))
}

pub fn encode_envelope(envelope: &ResultEnvelope) -> String {
    serde_json::to_string(envelope).unwrap_or_else(|e| {
        // Only reachable if a data value fails to serialize, which Value never does.
        let fallback = ResultEnvelope::fail(format!("unencodable bridge result: {e}"));
        serde_json::to_string(&fallback)
            .unwrap_or_else(|_| r#"{"success":false,"error":"unencodable bridge result"}"#.into())
    })
}
