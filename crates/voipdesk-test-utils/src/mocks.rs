// SPDX-FileCopyrightText: 2026 Voipdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory stand-ins for the console's collaborators.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;
use voipdesk_core::{
    Bridge, BridgeCall, CREDENTIALS_KEY, CredentialBundle, DownloadSurface, ResultEnvelope,
    SettingsStore, VoipdeskError,
};

/// A `SettingsStore` held entirely in memory.
#[derive(Default)]
pub struct MemorySettingsStore {
    values: Mutex<HashMap<String, Value>>,
}

impl MemorySettingsStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that already holds `bundle` under the credentials key.
    pub fn with_credentials(bundle: &CredentialBundle) -> Self {
        let store = Self::new();
        store
            .values
            .lock()
            .unwrap()
            .insert(CREDENTIALS_KEY.to_string(), serde_json::to_value(bundle).unwrap());
        store
    }

    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<_> = self.values.lock().unwrap().keys().cloned().collect();
        keys.sort();
        keys
    }
}

impl SettingsStore for MemorySettingsStore {
    fn get(&self, key: &str) -> Result<Option<Value>, VoipdeskError> {
        Ok(self.values.lock().unwrap().get(key).cloned())
    }

    fn set(&self, key: &str, value: Value) -> Result<(), VoipdeskError> {
        self.values.lock().unwrap().insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), VoipdeskError> {
        self.values.lock().unwrap().remove(key);
        Ok(())
    }
}

type Handler = Box<dyn Fn(&BridgeCall) -> ResultEnvelope + Send + Sync>;

/// A `Bridge` that records every call and answers from a handler.
///
/// The default handler acknowledges `apply-settings` and `download-file` and
/// answers every request with `{success: true, data: null}`.
pub struct ScriptedBridge {
    calls: Mutex<Vec<BridgeCall>>,
    handler: Handler,
}

impl ScriptedBridge {
    pub fn new() -> Self {
        Self::with_handler(|call| match call {
            BridgeCall::ApplySettings { .. } | BridgeCall::DownloadFile { .. } => {
                ResultEnvelope::ack()
            }
            _ => ResultEnvelope::ok(Value::Null),
        })
    }

    pub fn with_handler(
        handler: impl Fn(&BridgeCall) -> ResultEnvelope + Send + Sync + 'static,
    ) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            handler: Box::new(handler),
        }
    }

    /// Answers every call with the same envelope.
    pub fn always(envelope: ResultEnvelope) -> Self {
        Self::with_handler(move |_| envelope.clone())
    }

    pub fn calls(&self) -> Vec<BridgeCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Operation names in call order, e.g. `["apply-settings", "get"]`.
    pub fn ops(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().iter().map(BridgeCall::op).collect()
    }
}

impl Default for ScriptedBridge {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Bridge for ScriptedBridge {
    async fn invoke(&self, call: BridgeCall) -> ResultEnvelope {
        let envelope = (self.handler)(&call);
        self.calls.lock().unwrap().push(call);
        envelope
    }
}

/// A `DownloadSurface` that accepts everything and remembers `(url, filename)`.
#[derive(Default)]
pub struct RecordingSurface {
    downloads: Mutex<Vec<(String, String)>>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn downloads(&self) -> Vec<(String, String)> {
        self.downloads.lock().unwrap().clone()
    }
}

#[async_trait]
impl DownloadSurface for RecordingSurface {
    fn name(&self) -> &str {
        "recording"
    }

    async fn download(&self, url: &str, filename: &str) -> Result<(), VoipdeskError> {
        self.downloads
            .lock()
            .unwrap()
            .push((url.to_string(), filename.to_string()));
        Ok(())
    }
}
