// SPDX-FileCopyrightText: 2026 Voipdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Presentation-side invoker.

use async_trait::async_trait;
use tokio::sync::{mpsc, oneshot};
use tracing::debug;
use voipdesk_core::{Bridge, BridgeCall, ResultEnvelope};

use crate::frame::Frame;

const BRIDGE_CLOSED: &str = "bridge closed";

/// Sends catalog calls to the host and waits for the envelope.
///
/// Cheap to clone; every clone shares the same channel.
#[derive(Clone)]
pub struct BridgeClient {
    tx: mpsc::Sender<Frame>,
}

impl BridgeClient {
    pub(crate) fn new(tx: mpsc::Sender<Frame>) -> Self {
        Self { tx }
    }

    /// Sends an already-serialized frame. Exposed for callers that speak the wire format directly.
    pub async fn invoke_raw(&self, payload: String) -> String {
        let (reply, response) = oneshot::channel();
        if self.tx.send(Frame { payload, reply }).await.is_err() {
            return closed();
        }
        response.await.unwrap_or_else(|_| closed())
    }
}

#[async_trait]
impl Bridge for BridgeClient {
    async fn invoke(&self, call: BridgeCall) -> ResultEnvelope {
        let op = call.op();
        let payload = match serde_json::to_string(&call) {
            Ok(payload) => payload,
            Err(e) => return ResultEnvelope::fail(format!("invalid bridge message: {e}")),
        };

        let raw = self.invoke_raw(payload).await;
        let envelope = serde_json::from_str(&raw)
            .unwrap_or_else(|e| ResultEnvelope::fail(format!("invalid bridge reply: {e}")));
        debug!(op, success = envelope.success, "bridge call resolved");
        envelope
    }
}

fn closed() -> String {
    crate::frame::encode_envelope(&ResultEnvelope::fail(BRIDGE_CLOSED))
}
