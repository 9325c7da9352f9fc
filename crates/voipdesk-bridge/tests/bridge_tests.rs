// SPDX-FileCopyrightText: 2026 Voipdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Client, host and gateway wired together over a real channel.

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use tokio_util::sync::CancellationToken;
use voipdesk_bridge::{BridgeHost, channel};
use voipdesk_config::model::GatewayConfig;
use voipdesk_core::{Bridge, BridgeCall, CredentialBundle, ResultEnvelope};
use voipdesk_gateway::Gateway;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

struct Running {
    client: voipdesk_bridge::BridgeClient,
    gateway: Arc<Gateway>,
    cancel: CancellationToken,
    task: tokio::task::JoinHandle<()>,
}

fn start() -> Running {
    let gateway = Arc::new(Gateway::new(&GatewayConfig::default()).unwrap());
    let host = Arc::new(BridgeHost::new(gateway.clone()));
    let (client, inbox) = channel(8);
    let cancel = CancellationToken::new();
    let task = tokio::spawn(host.serve(inbox, cancel.clone()));
    Running {
        client,
        gateway,
        cancel,
        task,
    }
}

#[tokio::test]
async fn settings_then_request_round_trip() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/voip/user"))
        .and(header("X-Auth-User", "ops"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"result": [{"uuid": "u1"}], "status_code": 200})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let running = start();
    let bundle = CredentialBundle::new(server.uri(), "tenant", "reseller", "pw", "ops");
    let ack = running
        .client
        .invoke(BridgeCall::ApplySettings {
            bundle: bundle.clone(),
        })
        .await;
    assert_eq!(ack, ResultEnvelope::ack());

    let profile = running.gateway.active_profile().unwrap();
    assert_eq!(profile.credentials.as_ref(), Some(&bundle));

    let envelope = running
        .client
        .invoke(BridgeCall::Get {
            path: "/voip/user".into(),
        })
        .await;
    assert_eq!(
        envelope.data.unwrap()["result"][0]["uuid"],
        json!("u1")
    );

    running.cancel.cancel();
    running.task.await.unwrap();
}

#[tokio::test]
async fn upstream_failure_arrives_as_text() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .respond_with(
            ResponseTemplate::new(422).set_body_json(json!({"message": "Invalid members"})),
        )
        .mount(&server)
        .await;

    let running = start();
    running
        .client
        .invoke(BridgeCall::ApplySettings {
            bundle: CredentialBundle::new(server.uri(), "f", "r", "p", "u"),
        })
        .await;

    let envelope = running
        .client
        .invoke(BridgeCall::Put {
            path: "/voip/group/g1".into(),
            body: Some(json!({"members": []})),
        })
        .await;
    assert_eq!(envelope, ResultEnvelope::fail("Invalid members"));
}

#[tokio::test]
async fn slow_call_does_not_block_others() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(400)))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/fast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!("fast")))
        .mount(&server)
        .await;

    let running = start();
    running
        .client
        .invoke(BridgeCall::ApplySettings {
            bundle: CredentialBundle::new(server.uri(), "f", "r", "p", "u"),
        })
        .await;

    let slow_client = running.client.clone();
    let slow = tokio::spawn(async move {
        slow_client
            .invoke(BridgeCall::Get {
                path: "/slow".into(),
            })
            .await
    });
    tokio::time::sleep(Duration::from_millis(20)).await;

    let fast = running
        .client
        .invoke(BridgeCall::Get {
            path: "/fast".into(),
        })
        .await;
    assert_eq!(fast.data, Some(json!("fast")));
    assert!(!slow.is_finished());
    assert!(slow.await.unwrap().success);
}

#[tokio::test]
async fn calls_after_shutdown_fail_cleanly() {
    let running = start();
    running.cancel.cancel();
    running.task.await.unwrap();

    let envelope = running
        .client
        .invoke(BridgeCall::Get {
            path: "/voip/user".into(),
        })
        .await;
    assert_eq!(envelope, ResultEnvelope::fail("bridge closed"));
}
