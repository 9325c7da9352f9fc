// SPDX-FileCopyrightText: 2026 Voipdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end harness: presentation facade, bridge, host and gateway against
//! a wiremock VOIP API.

use std::sync::Arc;

use serde_json::Value;
use tokio_util::sync::CancellationToken;
use voipdesk_bridge::{BridgeHost, channel};
use voipdesk_client::{ConsoleClient, VoipApi};
use voipdesk_config::model::GatewayConfig;
use voipdesk_core::{CREDENTIALS_KEY, CredentialBundle, SettingsStore};
use voipdesk_gateway::Gateway;
use wiremock::MockServer;

use crate::mocks::MemorySettingsStore;

pub const TEST_AUTH_FOR: &str = "tenant-test";
pub const TEST_AUTH_RESELLER: &str = "reseller-test";
pub const TEST_AUTH_PASSWORD: &str = "s3cret";
pub const TEST_AUTH_USER: &str = "operator";

pub struct TestHarness {
    pub server: MockServer,
    pub gateway: Arc<Gateway>,
    pub host: Arc<BridgeHost>,
    pub settings: Arc<MemorySettingsStore>,
    pub client: Arc<ConsoleClient>,
    pub api: VoipApi,
    cancel: CancellationToken,
}

impl TestHarness {
    /// A running stack with no stored credentials.
    pub async fn start() -> Self {
        let server = MockServer::start().await;
        let gateway = Arc::new(
            Gateway::new(&GatewayConfig::default()).expect("gateway builds with defaults"),
        );
        let host = Arc::new(BridgeHost::new(gateway.clone()));
        let (bridge, inbox) = channel(16);
        let cancel = CancellationToken::new();
        tokio::spawn(Arc::clone(&host).serve(inbox, cancel.clone()));

        let settings = Arc::new(MemorySettingsStore::new());
        let client = Arc::new(ConsoleClient::new(Arc::new(bridge), settings.clone()));
        let api = VoipApi::new(client.clone());

        Self {
            server,
            gateway,
            host,
            settings,
            client,
            api,
            cancel,
        }
    }

    /// A running stack whose settings store points at the mock server.
    pub async fn configured() -> Self {
        let harness = Self::start().await;
        harness.store_credentials();
        harness
    }

    pub fn bundle(&self) -> CredentialBundle {
        CredentialBundle::new(
            self.server.uri(),
            TEST_AUTH_FOR,
            TEST_AUTH_RESELLER,
            TEST_AUTH_PASSWORD,
            TEST_AUTH_USER,
        )
    }

    pub fn store_credentials(&self) {
        let value = serde_json::to_value(self.bundle()).expect("bundle serializes");
        self.settings
            .set(CREDENTIALS_KEY, value)
            .expect("memory store accepts writes");
    }

    /// Bodies of every request the mock server has seen, in order.
    pub async fn received_bodies(&self) -> Vec<Value> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .map(|r| serde_json::from_slice(&r.body).unwrap_or(Value::Null))
            .collect()
    }

    pub fn shutdown(&self) {
        self.cancel.cancel();
    }
}

impl Drop for TestHarness {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
