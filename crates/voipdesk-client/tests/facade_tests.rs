// SPDX-FileCopyrightText: 2026 Voipdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Facade behaviour against a scripted bridge.

use std::sync::Arc;

use serde_json::json;
use voipdesk_client::{ConsoleClient, NewPlaylist, SoundUpload, VoipApi};
use voipdesk_core::{
    AppFeatures, BridgeCall, CREDENTIALS_KEY, CredentialBundle, FEATURES_KEY, ResultEnvelope,
    SettingsStore, VoipdeskError,
};
use voipdesk_test_utils::{MemorySettingsStore, ScriptedBridge};

fn bundle() -> CredentialBundle {
    CredentialBundle::new("https://voip.example.net", "t", "r", "pw", "ops")
}

fn unconfigured() -> (Arc<ScriptedBridge>, VoipApi) {
    let bridge = Arc::new(ScriptedBridge::new());
    let client = ConsoleClient::new(bridge.clone(), Arc::new(MemorySettingsStore::new()));
    (bridge, VoipApi::new(Arc::new(client)))
}

#[tokio::test]
async fn every_resource_short_circuits_when_not_configured() {
    let (bridge, api) = unconfigured();

    assert!(matches!(api.list_users().await, Err(VoipdeskError::NotConfigured)));
    assert!(matches!(api.list_user_statuses().await, Err(VoipdeskError::NotConfigured)));
    assert!(matches!(api.user_availability("u1").await, Err(VoipdeskError::NotConfigured)));
    assert!(matches!(api.list_hunt_groups().await, Err(VoipdeskError::NotConfigured)));
    assert!(matches!(api.list_call_queues().await, Err(VoipdeskError::NotConfigured)));
    assert!(matches!(
        api.list_calls(Default::default()).await,
        Err(VoipdeskError::NotConfigured)
    ));
    assert!(matches!(api.recording_url("c1").await, Err(VoipdeskError::NotConfigured)));
    assert!(matches!(api.list_sounds().await, Err(VoipdeskError::NotConfigured)));
    assert!(matches!(api.delete_sound("s1").await, Err(VoipdeskError::NotConfigured)));
    assert!(matches!(api.list_playlists().await, Err(VoipdeskError::NotConfigured)));
    let upload = SoundUpload::encode("a", "a.mp3", "Hold Music", 1, b"x");
    assert!(matches!(api.upload_sound(&upload).await, Err(VoipdeskError::NotConfigured)));
    let playlist = NewPlaylist {
        name: "Lobby".into(),
        ..Default::default()
    };
    assert!(matches!(
        api.create_playlist(&playlist).await,
        Err(VoipdeskError::NotConfigured)
    ));

    assert_eq!(bridge.call_count(), 0);
}

#[tokio::test]
async fn ensure_ready_pushes_the_stored_bundle() {
    let bridge = Arc::new(ScriptedBridge::new());
    let store = Arc::new(MemorySettingsStore::with_credentials(&bundle()));
    let client = ConsoleClient::new(bridge.clone(), store);

    assert!(client.ensure_ready().await);
    assert_eq!(
        bridge.calls(),
        vec![BridgeCall::ApplySettings { bundle: bundle() }]
    );
}

#[tokio::test]
async fn unacknowledged_settings_are_not_ready() {
    let bridge = Arc::new(ScriptedBridge::always(ResultEnvelope::fail("host busy")));
    let store = Arc::new(MemorySettingsStore::with_credentials(&bundle()));
    let client = ConsoleClient::new(bridge, store);
    assert!(!client.ensure_ready().await);
}

#[tokio::test]
async fn unwrap_returns_data_or_error_text_unchanged() {
    let data = json!({"result": [{"uuid": "u1"}], "status_code": 200});
    let ok = ConsoleClient::new(
        Arc::new(ScriptedBridge::always(ResultEnvelope::ok(data.clone()))),
        Arc::new(MemorySettingsStore::new()),
    );
    assert_eq!(ok.get("/voip/user").await.unwrap(), data);
    assert_eq!(ok.post("/voip/sound", Some(json!({}))).await.unwrap(), data);

    let failing = ConsoleClient::new(
        Arc::new(ScriptedBridge::always(ResultEnvelope::fail(
            "timeout of 30000ms exceeded",
        ))),
        Arc::new(MemorySettingsStore::new()),
    );
    for result in [
        failing.get("/voip/user").await,
        failing.put("/voip/group/g", None).await,
        failing.patch("/voip/group/g", None).await,
        failing.delete("/voip/sound/s").await,
    ] {
        assert_eq!(result.unwrap_err().to_string(), "timeout of 30000ms exceeded");
    }
    let err = failing.download_file("https://cdn/x", "x.mp3").await.unwrap_err();
    assert!(matches!(err, VoipdeskError::Remote(ref m) if m == "timeout of 30000ms exceeded"));
}

#[tokio::test]
async fn verb_calls_use_catalog_operations() {
    let bridge = Arc::new(ScriptedBridge::new());
    let client = ConsoleClient::new(bridge.clone(), Arc::new(MemorySettingsStore::new()));
    client.get("/a").await.unwrap();
    client.post("/b", Some(json!({"x": 1}))).await.unwrap();
    client.put("/c", None).await.unwrap();
    client.delete("/d").await.unwrap();
    client.patch("/e", Some(json!([]))).await.unwrap();
    client.download_file("https://cdn/f", "f.mp3").await.unwrap();
    assert_eq!(
        bridge.ops(),
        vec!["get", "post", "put", "delete", "patch", "download-file"]
    );
}

#[tokio::test]
async fn save_settings_persists_and_applies() {
    let bridge = Arc::new(ScriptedBridge::new());
    let store = Arc::new(MemorySettingsStore::new());
    let client = ConsoleClient::new(bridge.clone(), store.clone());

    let features = AppFeatures {
        enable_call_recording_download: true,
    };
    client.save_settings(bundle(), features).await.unwrap();

    assert_eq!(store.keys(), vec![CREDENTIALS_KEY, FEATURES_KEY]);
    assert_eq!(
        store.get(CREDENTIALS_KEY).unwrap().unwrap()["authPassword"],
        "pw"
    );
    assert_eq!(client.features(), features);
    assert_eq!(client.stored_credentials(), Some(bundle()));
    assert_eq!(bridge.ops(), vec!["apply-settings"]);

    client.clear_settings().unwrap();
    assert!(!client.ensure_ready().await);
    assert_eq!(bridge.call_count(), 1);
}

#[tokio::test]
async fn blank_playlist_name_fails_before_any_call() {
    let bridge = Arc::new(ScriptedBridge::new());
    let store = Arc::new(MemorySettingsStore::with_credentials(&bundle()));
    let api = VoipApi::new(Arc::new(ConsoleClient::new(bridge.clone(), store)));

    let err = api
        .create_playlist(&NewPlaylist {
            name: "   ".into(),
            ..Default::default()
        })
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Playlist name is required");
    assert_eq!(bridge.call_count(), 0);
}

#[tokio::test]
async fn recording_download_is_gated_by_feature_switch() {
    let bridge = Arc::new(ScriptedBridge::new());
    let store = Arc::new(MemorySettingsStore::with_credentials(&bundle()));
    let api = VoipApi::new(Arc::new(ConsoleClient::new(bridge.clone(), store)));

    let err = api.download_recording("c1").await.unwrap_err();
    assert!(matches!(err, VoipdeskError::FeatureDisabled(_)));
    assert_eq!(bridge.call_count(), 0);
}
