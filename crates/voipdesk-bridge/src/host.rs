// SPDX-FileCopyrightText: 2026 Voipdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Host-side dispatcher.
//!
//! Every frame is decoded against the catalog, executed against the gateway
//! or the attached surface, and answered exactly once with an envelope.
//! Native errors never cross: they are flattened to their display text here.

use std::sync::{Arc, RwLock};

use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use voipdesk_core::{BridgeCall, DownloadSurface, ResultEnvelope, VoipdeskError};
use voipdesk_gateway::ApiGateway;

use crate::frame::{BridgeInbox, Frame, decode_call, encode_envelope};

pub struct BridgeHost {
    gateway: Arc<dyn ApiGateway>,
    surface: RwLock<Option<Arc<dyn DownloadSurface>>>,
}

impl BridgeHost {
    pub fn new(gateway: Arc<dyn ApiGateway>) -> Self {
        Self {
            gateway,
            surface: RwLock::new(None),
        }
    }

    /// Attaches the presentation surface that receives `download-file` requests.
    pub fn attach_surface(&self, surface: Arc<dyn DownloadSurface>) {
        info!(surface = surface.name(), "presentation surface attached");
        *self.surface.write().unwrap_or_else(|p| p.into_inner()) = Some(surface);
    }

    pub fn detach_surface(&self) {
        if let Some(surface) = self.surface.write().unwrap_or_else(|p| p.into_inner()).take() {
            info!(surface = surface.name(), "presentation surface detached");
        }
    }

    fn current_surface(&self) -> Option<Arc<dyn DownloadSurface>> {
        self.surface
            .read()
            .unwrap_or_else(|p| p.into_inner())
            .clone()
    }

    /// Executes one catalog call.
    pub async fn dispatch(&self, call: BridgeCall) -> ResultEnvelope {
        debug!(op = call.op(), "bridge dispatch");
        match call {
            BridgeCall::ApplySettings { bundle } => {
                self.gateway.apply_credentials(bundle);
                ResultEnvelope::ack()
            }
            BridgeCall::DownloadFile { url, filename } => {
                let Some(surface) = self.current_surface() else {
                    warn!(filename = %filename, "download requested with no surface attached");
                    return ResultEnvelope::fail(VoipdeskError::SurfaceUnavailable.to_string());
                };
                match surface.download(&url, &filename).await {
                    Ok(()) => ResultEnvelope::ack(),
                    Err(e) => ResultEnvelope::fail(e.to_string()),
                }
            }
            call => match call.to_api_request() {
                Some(request) => ResultEnvelope::from_result(self.gateway.request(request).await),
                None => ResultEnvelope::fail(format!("unsupported bridge operation `{}`", call.op())),
            },
        }
    }

    /// Decodes, dispatches and encodes one text frame.
    pub async fn handle_payload(&self, payload: &str) -> String {
        let envelope = match decode_call(payload) {
            Ok(call) => self.dispatch(call).await,
            Err(message) => {
                warn!(error = %message, "rejected bridge frame");
                ResultEnvelope::fail(message)
            }
        };
        encode_envelope(&envelope)
    }

    /// Answers frames until the token is cancelled or every client is gone.
    ///
    /// Each frame runs on its own task so independent callers are not
    /// serialized behind a slow request.
    pub async fn serve(self: Arc<Self>, mut inbox: BridgeInbox, cancel: CancellationToken) {
        info!("bridge host serving");
        loop {
            tokio::select! {
                frame = inbox.recv() => {
                    let Some(Frame { payload, reply }) = frame else {
                        debug!("all bridge clients dropped");
                        break;
                    };
                    let host = Arc::clone(&self);
                    tokio::spawn(async move {
                        let response = host.handle_payload(&payload).await;
                        if reply.send(response).is_err() {
                            debug!("bridge caller went away before the reply");
                        }
                    });
                }
                _ = cancel.cancelled() => {
                    info!("shutdown signal received, stopping bridge host");
                    break;
                }
            }
        }
        info!("bridge host stopped");
    }
}
