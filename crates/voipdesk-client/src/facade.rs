// SPDX-FileCopyrightText: 2026 Voipdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The presentation-side facade over the bridge.
//!
//! [`ConsoleClient`] turns envelopes back into ordinary `Result`s: a
//! successful envelope yields its `data` untouched, a failed one yields
//! [`VoipdeskError::Remote`] whose message is exactly the envelope text.

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, info, warn};
use voipdesk_core::{
    AppFeatures, Bridge, BridgeCall, CREDENTIALS_KEY, CredentialBundle, FEATURES_KEY,
    SettingsStore, Verb, VoipdeskError,
};

pub struct ConsoleClient {
    bridge: Arc<dyn Bridge>,
    settings: Arc<dyn SettingsStore>,
}

impl ConsoleClient {
    pub fn new(bridge: Arc<dyn Bridge>, settings: Arc<dyn SettingsStore>) -> Self {
        Self { bridge, settings }
    }

    pub fn settings(&self) -> &Arc<dyn SettingsStore> {
        &self.settings
    }

    /// The stored credential bundle, if one exists and parses.
    pub fn stored_credentials(&self) -> Option<CredentialBundle> {
        let value = match self.settings.get(CREDENTIALS_KEY) {
            Ok(value) => value?,
            Err(e) => {
                warn!(error = %e, "failed to read stored API settings");
                return None;
            }
        };
        match serde_json::from_value(value) {
            Ok(bundle) => Some(bundle),
            Err(e) => {
                warn!(error = %e, "stored API settings are unreadable, ignoring them");
                None
            }
        }
    }

    /// Pushes the stored credentials to the host.
    ///
    /// Returns `false` without touching the bridge when nothing usable is
    /// stored, and `false` when the host does not acknowledge.
    pub async fn ensure_ready(&self) -> bool {
        let Some(bundle) = self.stored_credentials() else {
            debug!("no API settings stored");
            return false;
        };
        let envelope = self.bridge.invoke(BridgeCall::ApplySettings { bundle }).await;
        if !envelope.success {
            warn!(
                error = envelope.error.as_deref().unwrap_or_default(),
                "host refused API settings"
            );
        }
        envelope.success
    }

    /// Persists the settings screen's values and applies the credentials.
    pub async fn save_settings(
        &self,
        bundle: CredentialBundle,
        features: AppFeatures,
    ) -> Result<(), VoipdeskError> {
        self.settings
            .set(CREDENTIALS_KEY, to_value(&bundle)?)?;
        self.settings.set(FEATURES_KEY, to_value(&features)?)?;
        info!(base_url = %bundle.api_url, "API settings saved");
        self.bridge
            .invoke(BridgeCall::ApplySettings { bundle })
            .await
            .into_result()
            .map(drop)
    }

    /// Forgets the stored credentials. The host keeps its current profile until the next apply.
    pub fn clear_settings(&self) -> Result<(), VoipdeskError> {
        self.settings.remove(CREDENTIALS_KEY)
    }

    /// Feature switches; defaults when absent or unreadable.
    pub fn features(&self) -> AppFeatures {
        match self.settings.get(FEATURES_KEY) {
            Ok(Some(value)) => serde_json::from_value(value).unwrap_or_else(|e| {
                warn!(error = %e, "stored app features are unreadable, using defaults");
                AppFeatures::default()
            }),
            Ok(None) => AppFeatures::default(),
            Err(e) => {
                warn!(error = %e, "failed to read app features, using defaults");
                AppFeatures::default()
            }
        }
    }

    pub async fn get(&self, path: &str) -> Result<Value, VoipdeskError> {
        self.call(Verb::Get, path, None).await
    }

    pub async fn post(&self, path: &str, body: Option<Value>) -> Result<Value, VoipdeskError> {
        self.call(Verb::Post, path, body).await
    }

    pub async fn put(&self, path: &str, body: Option<Value>) -> Result<Value, VoipdeskError> {
        self.call(Verb::Put, path, body).await
    }

    pub async fn delete(&self, path: &str) -> Result<Value, VoipdeskError> {
        self.call(Verb::Delete, path, None).await
    }

    pub async fn patch(&self, path: &str, body: Option<Value>) -> Result<Value, VoipdeskError> {
        self.call(Verb::Patch, path, body).await
    }

    /// `GET` decoded into `T`.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, VoipdeskError> {
        decode(self.get(path).await?)
    }

    /// A body-carrying verb with a typed body and a typed reply.
    pub async fn send_json<T, B>(&self, verb: Verb, path: &str, body: &B) -> Result<T, VoipdeskError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        decode(self.call(verb, path, Some(to_value(body)?)).await?)
    }

    /// Hands a URL to the host's presentation surface.
    pub async fn download_file(&self, url: &str, filename: &str) -> Result<(), VoipdeskError> {
        self.bridge
            .invoke(BridgeCall::DownloadFile {
                url: url.to_string(),
                filename: filename.to_string(),
            })
            .await
            .into_result()
            .map(drop)
    }

    async fn call(
        &self,
        verb: Verb,
        path: &str,
        body: Option<Value>,
    ) -> Result<Value, VoipdeskError> {
        self.bridge
            .invoke(BridgeCall::request(verb, path, body))
            .await
            .into_result()
    }
}

fn to_value<T: Serialize + ?Sized>(value: &T) -> Result<Value, VoipdeskError> {
    serde_json::to_value(value).map_err(|e| VoipdeskError::Internal(format!("serialize: {e}")))
}

fn decode<T: DeserializeOwned>(value: Value) -> Result<T, VoipdeskError> {
    serde_json::from_value(value).map_err(|e| VoipdeskError::Decode(e.to_string()))
}
